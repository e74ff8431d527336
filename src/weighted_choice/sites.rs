use crate::types::AlleleChoice;
use crate::utils::logging;
use super::{ChooserError, WeightedChoice};

/// Chooser over candidate mutation sites
pub type SiteChooser = WeightedChoice<AlleleChoice>;

impl WeightedChoice<AlleleChoice> {
    /// Adds a site, weighted by its mutation rate.
    ///
    /// * `position` - site position (e.g. 100001)
    /// * `rate` - site mutation rate (e.g. 0.000000005)
    /// * `ref_allele` - reference allele for the site, e.g. 'A'
    /// * `alt_allele` - alternate allele for the site, e.g. 'T'
    pub fn add_site(&mut self, position: i64, rate: f64, ref_allele: char, alt_allele: char) -> Result<(), ChooserError> {
        let site = AlleleChoice::new(position, ref_allele, alt_allele, rate);
        self.add_choice(site, rate).map_err(|e| {
            logging::log("CHOOSER", &format!("Rejected site {}: {}", site, e));
            e
        })
    }

    /// Chooses a site, or returns `AlleleChoice::sentinel()` when no sites were added.
    pub fn choice_or_sentinel(&mut self) -> AlleleChoice {
        match self.choice() {
            Ok(site) => *site,
            Err(_) => AlleleChoice::sentinel(),
        }
    }
}
