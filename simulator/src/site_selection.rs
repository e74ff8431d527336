use std::collections::HashMap;
use denovonear::types::{AlleleChoice, Consequence};
use serde_json;

/// Counts how often each site was drawn, per consequence category
pub struct SiteSelectionStats {
    site_counts: HashMap<Consequence, HashMap<i64, u64>>,
}

impl SiteSelectionStats {
    pub fn new() -> Self {
        Self {
            site_counts: HashMap::new(),
        }
    }

    pub fn record_site(&mut self, consequence: Consequence, site: &AlleleChoice) {
        *self.site_counts
            .entry(consequence)
            .or_default()
            .entry(site.position)
            .or_insert(0) += 1;
    }

    /// Total draws recorded for a category
    pub fn total(&self, consequence: Consequence) -> u64 {
        self.site_counts
            .get(&consequence)
            .map(|counts| counts.values().sum())
            .unwrap_or(0)
    }

    /// Per-position counts for a category, sorted by position
    pub fn get_sorted_counts(&self, consequence: Consequence) -> Vec<(i64, u64)> {
        let mut counts: Vec<_> = self.site_counts
            .get(&consequence)
            .map(|counts| counts.clone().into_iter().collect())
            .unwrap_or_default();

        counts.sort_by(|a, b| a.0.cmp(&b.0));
        counts
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({ "site_selection": self.categories_json() })
    }

    /// Sorted counts for every category with recorded draws
    pub fn categories_json(&self) -> serde_json::Value {
        let mut categories = serde_json::Map::new();
        for consequence in Consequence::ALL {
            if !self.site_counts.contains_key(&consequence) {
                continue;
            }
            let counts = self.get_sorted_counts(consequence);
            categories.insert(consequence.to_string(), serde_json::json!(
                counts.iter().map(|(position, draws)| {
                    serde_json::json!({
                        "position": position,
                        "draws": draws
                    })
                }).collect::<Vec<_>>()
            ));
        }

        serde_json::Value::Object(categories)
    }
}

impl Default for SiteSelectionStats {
    fn default() -> Self {
        Self::new()
    }
}
