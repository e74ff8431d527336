//! Consequence-specific site choosers for a single gene.
//!
//! Each candidate base change in a gene is assigned one consequence category by
//! the caller, and lands in that category's chooser weighted by its mutation
//! rate. Nonsense and splice_lof sites are also collected into the derived
//! loss_of_function chooser.
//!
//! Positions inside masked regions (for example, sites already covered by an
//! alternative transcript) are skipped.

use thiserror::Error;
use crate::types::{complement, AlleleChoice, Consequence, Strand};
use crate::utils::logging;
use crate::weighted_choice::{ChooserError, SiteChooser};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SiteRatesError {
    #[error("Invalid base: {0}")]
    InvalidBase(char),
    #[error("Sites can't be added to the derived category {0}")]
    DerivedCategory(Consequence),
    #[error(transparent)]
    Chooser(#[from] ChooserError),
}

/// Site-specific mutation rates for a gene, split by consequence
#[derive(Debug, Clone)]
pub struct SiteRates {
    strand: Strand,
    /// One chooser per category, indexed by `Consequence::index`
    rates: Vec<SiteChooser>,
    /// Inclusive position ranges whose sites are never added
    masked: Vec<(i64, i64)>,
}

impl SiteRates {
    /// Creates empty choosers seeded from the system clock.
    pub fn new(strand: Strand) -> Self {
        Self {
            strand,
            rates: Consequence::ALL.iter().map(|_| SiteChooser::new()).collect(),
            masked: Vec::new(),
        }
    }

    /// Creates empty choosers with reproducible seeds derived from `seed`.
    pub fn with_seed(strand: Strand, seed: u64) -> Self {
        Self {
            strand,
            rates: Consequence::ALL
                .iter()
                .map(|consequence| SiteChooser::with_seed(seed.wrapping_add(consequence.index() as u64)))
                .collect(),
            masked: Vec::new(),
        }
    }

    pub fn strand(&self) -> Strand {
        self.strand
    }

    /// Masks the positions from `start` to `end` inclusive; sites added there
    /// afterwards are skipped.
    pub fn mask_region(&mut self, start: i64, end: i64) {
        self.masked.push((start.min(end), start.max(end)));
    }

    pub fn is_masked(&self, position: i64) -> bool {
        self.masked.iter().any(|&(start, end)| (start..=end).contains(&position))
    }

    /// Adds the rate for a single base change.
    ///
    /// Alleles are given in transcript orientation; on the minus strand they
    /// are stored complemented, so every stored site refers to the plus strand.
    pub fn add_site(
        &mut self,
        consequence: Consequence,
        position: i64,
        rate: f64,
        ref_base: char,
        alt_base: char,
    ) -> Result<(), SiteRatesError> {
        if consequence == Consequence::LossOfFunction {
            return Err(SiteRatesError::DerivedCategory(consequence));
        }

        let ref_allele = self.orient(ref_base)?;
        let alt_allele = self.orient(alt_base)?;

        // loss_of_function must never hold a site its source category rejected
        if !rate.is_finite() || rate < 0.0 {
            return Err(ChooserError::InvalidWeight(rate).into());
        }

        if self.is_masked(position) {
            logging::log("SITE_RATES", &format!("Skipped masked {} site at {}", consequence, position));
            return Ok(());
        }

        self.rates[consequence.index()].add_site(position, rate, ref_allele, alt_allele)?;
        if consequence.is_loss_of_function() {
            self.rates[Consequence::LossOfFunction.index()].add_site(position, rate, ref_allele, alt_allele)?;
        }

        logging::log("SITE_RATES", &format!(
            "Added {} site {}:{}>{} with rate {}",
            consequence, position, ref_allele, alt_allele, rate
        ));
        Ok(())
    }

    /// Gets the chooser for a consequence category.
    pub fn get(&self, consequence: Consequence) -> &SiteChooser {
        &self.rates[consequence.index()]
    }

    pub fn get_mut(&mut self, consequence: Consequence) -> &mut SiteChooser {
        &mut self.rates[consequence.index()]
    }

    /// Draws a site from a category, or the sentinel when it has no sites.
    pub fn choice(&mut self, consequence: Consequence) -> AlleleChoice {
        self.get_mut(consequence).choice_or_sentinel()
    }

    /// Summed rate for every category, in `Consequence::ALL` order
    pub fn summed_rates(&self) -> Vec<(Consequence, f64)> {
        Consequence::ALL
            .iter()
            .map(|&consequence| (consequence, self.get(consequence).get_summed_rate()))
            .collect()
    }

    fn orient(&self, base: char) -> Result<char, SiteRatesError> {
        let upper = base.to_ascii_uppercase();
        let oriented = match self.strand {
            Strand::Plus => complement(upper).map(|_| upper),
            Strand::Minus => complement(upper),
        };
        oriented.ok_or(SiteRatesError::InvalidBase(base))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sites_land_in_their_category() {
        let mut rates = SiteRates::with_seed(Strand::Plus, 1);
        rates.add_site(Consequence::Missense, 100, 1e-8, 'A', 'G').unwrap();
        rates.add_site(Consequence::Synonymous, 101, 2e-8, 'c', 't').unwrap();

        assert_eq!(rates.get(Consequence::Missense).len(), 1);
        assert_eq!(rates.get(Consequence::Synonymous).len(), 1);
        assert!(rates.get(Consequence::Nonsense).is_empty());
        assert!(rates.get(Consequence::LossOfFunction).is_empty());

        let site = rates.choice(Consequence::Synonymous);
        assert_eq!(site, AlleleChoice::new(101, 'C', 'T', 2e-8));
        assert!(rates.choice(Consequence::SpliceRegion).is_sentinel());
    }

    #[test]
    fn test_loss_of_function_collects_nonsense_and_splice_lof() {
        let mut rates = SiteRates::with_seed(Strand::Plus, 2);
        rates.add_site(Consequence::Nonsense, 10, 1.0, 'C', 'T').unwrap();
        rates.add_site(Consequence::SpliceLof, 20, 2.0, 'G', 'A').unwrap();
        rates.add_site(Consequence::Missense, 30, 4.0, 'A', 'C').unwrap();

        let lof = rates.get(Consequence::LossOfFunction);
        assert_eq!(lof.len(), 2);
        assert_eq!(lof.get_summed_rate(), 3.0);
        let positions: Vec<i64> = lof.items().iter().map(|site| site.position).collect();
        assert_eq!(positions, vec![10, 20]);
    }

    #[test]
    fn test_minus_strand_alleles_are_complemented() {
        let mut rates = SiteRates::with_seed(Strand::Minus, 3);
        rates.add_site(Consequence::Missense, 500, 1.0, 'A', 'G').unwrap();

        let site = rates.get(Consequence::Missense).items()[0];
        assert_eq!(site.ref_allele, 'T');
        assert_eq!(site.alt_allele, 'C');
    }

    #[test]
    fn test_rejections_leave_choosers_untouched() {
        let mut rates = SiteRates::with_seed(Strand::Plus, 4);

        assert_eq!(
            rates.add_site(Consequence::LossOfFunction, 1, 1.0, 'A', 'T'),
            Err(SiteRatesError::DerivedCategory(Consequence::LossOfFunction))
        );
        assert_eq!(
            rates.add_site(Consequence::Missense, 1, 1.0, 'A', 'X'),
            Err(SiteRatesError::InvalidBase('X'))
        );
        assert_eq!(
            rates.add_site(Consequence::Nonsense, 1, -1.0, 'A', 'T'),
            Err(SiteRatesError::Chooser(ChooserError::InvalidWeight(-1.0)))
        );

        for (_, total) in rates.summed_rates() {
            assert_eq!(total, 0.0);
        }
        assert!(rates.get(Consequence::LossOfFunction).is_empty());
    }

    #[test]
    fn test_masked_sites_are_skipped() {
        let mut rates = SiteRates::with_seed(Strand::Plus, 6);
        rates.mask_region(120, 100);
        rates.add_site(Consequence::Missense, 99, 1.0, 'A', 'G').unwrap();
        rates.add_site(Consequence::Missense, 100, 1.0, 'A', 'G').unwrap();
        rates.add_site(Consequence::Nonsense, 120, 1.0, 'C', 'T').unwrap();
        rates.add_site(Consequence::Nonsense, 121, 1.0, 'C', 'T').unwrap();

        assert!(rates.is_masked(110));
        assert!(!rates.is_masked(121));
        assert_eq!(rates.get(Consequence::Missense).items()[0].position, 99);
        assert_eq!(rates.get(Consequence::Missense).len(), 1);
        assert_eq!(rates.get(Consequence::Nonsense).len(), 1);
        assert_eq!(rates.get(Consequence::LossOfFunction).len(), 1);

        // masking doesn't hide invalid input
        assert_eq!(
            rates.add_site(Consequence::Missense, 110, 1.0, 'A', 'Z'),
            Err(SiteRatesError::InvalidBase('Z'))
        );
    }

    #[test]
    fn test_strand_is_kept() {
        assert_eq!(SiteRates::new(Strand::Minus).strand(), Strand::Minus);
        assert_eq!(SiteRates::with_seed(Strand::Plus, 1).strand(), Strand::Plus);
    }

    #[test]
    fn test_summed_rates_per_category() {
        let mut rates = SiteRates::with_seed(Strand::Plus, 5);
        rates.add_site(Consequence::Missense, 1, 0.25, 'A', 'C').unwrap();
        rates.add_site(Consequence::Missense, 2, 0.5, 'A', 'G').unwrap();
        rates.add_site(Consequence::SpliceRegion, 3, 0.125, 'G', 'T').unwrap();

        let totals = rates.summed_rates();
        assert_eq!(totals.len(), Consequence::ALL.len());
        assert_eq!(totals[Consequence::Missense.index()], (Consequence::Missense, 0.75));
        assert_eq!(totals[Consequence::SpliceRegion.index()], (Consequence::SpliceRegion, 0.125));
    }

    #[test]
    fn test_seeded_rates_are_reproducible() {
        let build = || {
            let mut rates = SiteRates::with_seed(Strand::Plus, 77);
            for position in 0..20 {
                rates.add_site(Consequence::Missense, position, (position + 1) as f64, 'A', 'G').unwrap();
            }
            rates
        };
        let mut first = build();
        let mut second = build();

        for _ in 0..50 {
            assert_eq!(first.choice(Consequence::Missense), second.choice(Consequence::Missense));
        }
    }
}
