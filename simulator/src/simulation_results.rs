use chrono::Local;
use denovonear::types::{Consequence, Strand};
use denovonear::{ClusteringConfig, ClusteringResult};
use serde_json;
use crate::site_selection::SiteSelectionStats;

/// Clustering outcome for one consequence category
#[derive(Debug, Clone)]
pub struct CategoryResult {
    pub consequence: Consequence,
    /// Number of observed de novos in the category
    pub de_novo_count: usize,
    /// Summed mutation rate of the category's sites
    pub summed_rate: f64,
    /// None when the category has fewer than two de novos
    pub clustering: Option<ClusteringResult>,
}

impl CategoryResult {
    /// Distance and probability as written to the results, "NA" when unscored
    fn scores(&self) -> (serde_json::Value, serde_json::Value, serde_json::Value) {
        match &self.clustering {
            Some(result) => (
                serde_json::json!(result.observed_distance),
                serde_json::json!(result.probability),
                serde_json::json!(result.iterations),
            ),
            None => (serde_json::json!("NA"), serde_json::json!("NA"), serde_json::json!("NA")),
        }
    }
}

/// Outcomes for every consequence category of one gene
pub struct GeneResult {
    pub gene: String,
    pub strand: Strand,
    // Per-category outcomes, in Consequence::ALL order
    pub categories: Vec<CategoryResult>,
    pub site_stats: SiteSelectionStats,
}

impl GeneResult {
    pub fn new(gene: String, strand: Strand) -> Self {
        Self {
            gene,
            strand,
            categories: Vec::new(),
            site_stats: SiteSelectionStats::new(),
        }
    }

    pub fn get(&self, consequence: Consequence) -> Option<&CategoryResult> {
        self.categories.iter().find(|category| category.consequence == consequence)
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "gene": self.gene,
            "strand": self.strand.to_string(),
            "results": self.categories.iter().map(|category| {
                let (distance, probability, simulations) = category.scores();
                serde_json::json!({
                    "consequence": category.consequence.to_string(),
                    "de_novos": category.de_novo_count,
                    "summed_rate": category.summed_rate,
                    "distance": distance,
                    "probability": probability,
                    "simulations": simulations,
                })
            }).collect::<Vec<_>>(),
        })
    }
}

pub struct SimulationResults {
    // Simulation parameters
    pub seed: Option<u64>,
    pub iterations: usize,
    pub iteration_step: usize,
    pub max_iterations: usize,

    // Analysed genes in config order
    pub genes: Vec<GeneResult>,
    // Genes without two de novos in any category
    pub skipped_genes: Vec<String>,

    pub timestamp: String,
}

impl SimulationResults {
    pub fn new(seed: Option<u64>, clustering_config: &ClusteringConfig) -> Self {
        Self {
            seed,
            iterations: clustering_config.iterations,
            iteration_step: clustering_config.iteration_step,
            max_iterations: clustering_config.max_iterations,
            genes: Vec::new(),
            skipped_genes: Vec::new(),
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }

    pub fn get(&self, gene: &str) -> Option<&GeneResult> {
        self.genes.iter().find(|result| result.gene == gene)
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "parameters": {
                "seed": self.seed,
                "iterations": self.iterations,
                "iteration_step": self.iteration_step,
                "max_iterations": self.max_iterations,
            },
            "genes": self.genes.iter().map(GeneResult::to_json).collect::<Vec<_>>(),
            "skipped_genes": self.skipped_genes,
            "timestamp": self.timestamp,
        })
    }

    /// Sampled site counts keyed by gene, then consequence
    pub fn site_selection_json(&self) -> serde_json::Value {
        let mut genes = serde_json::Map::new();
        for result in &self.genes {
            genes.insert(result.gene.clone(), result.site_stats.categories_json());
        }
        serde_json::json!({ "site_selection": genes })
    }

    /// One tab-separated row per gene and category
    pub fn to_tsv(&self) -> String {
        let mut table = String::from("gene_id\tconsequence\tde_novos\tdistance\tprobability\n");
        for result in &self.genes {
            for category in &result.categories {
                let (distance, probability) = match &category.clustering {
                    Some(clustering) => (clustering.observed_distance.to_string(), clustering.probability.to_string()),
                    None => ("NA".to_string(), "NA".to_string()),
                };
                table.push_str(&format!(
                    "{}\t{}\t{}\t{}\t{}\n",
                    result.gene, category.consequence, category.de_novo_count, distance, probability
                ));
            }
        }
        table
    }
}
