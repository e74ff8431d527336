//! Clustering analysis of de novo mutations within a gene.
//!
//! Observed de novos are scored by the geometric mean of their pairwise
//! distances. A null distribution of the same score is simulated by sampling
//! sites from a chooser weighted by site-specific mutation rates, and the
//! probability of clustering at least as tight as observed is read off it.

use serde::Serialize;
use thiserror::Error;
use crate::types::constants;
use crate::utils::logging;
use crate::weighted_choice::{ChooserError, SiteChooser};


#[derive(Debug, Error, Clone, PartialEq)]
pub enum ClusteringError {
    #[error(transparent)]
    Chooser(#[from] ChooserError),
    #[error("Invalid iteration settings: {0}")]
    InvalidIterations(String),
}

/// Controls how many simulations are run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusteringConfig {
    /// Simulations run before the first probability estimate
    pub iterations: usize,
    /// Simulations added each time the probability sits at its lower bound
    pub iteration_step: usize,
    /// The simulated distribution never grows past this size
    pub max_iterations: usize,
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            iterations: constants::DEFAULT_ITERATIONS,
            iteration_step: constants::DEFAULT_ITERATION_STEP,
            max_iterations: constants::DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl ClusteringConfig {
    pub fn validate(&self) -> Result<(), ClusteringError> {
        if self.iterations == 0 {
            return Err(ClusteringError::InvalidIterations("iterations must be positive".into()));
        }
        if self.iteration_step == 0 {
            return Err(ClusteringError::InvalidIterations("iteration step must be positive".into()));
        }
        if self.max_iterations < self.iterations {
            return Err(ClusteringError::InvalidIterations(format!(
                "max iterations ({}) is below the initial iterations ({})",
                self.max_iterations, self.iterations
            )));
        }
        Ok(())
    }
}

/// Outcome of testing one set of de novos
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClusteringResult {
    /// Geometric mean distance between the observed de novos
    pub observed_distance: f64,
    /// Fraction of simulations at least as clustered as observed
    pub probability: f64,
    /// Size of the simulated distribution the probability came from
    pub iterations: usize,
}

/// Tests de novo clustering against site-specific mutation rates
#[derive(Debug, Clone)]
pub struct ClusteringAnalysis {
    config: ClusteringConfig,
}

impl ClusteringAnalysis {
    pub fn new(config: ClusteringConfig) -> Result<Self, ClusteringError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ClusteringConfig {
        &self.config
    }

    /// Finds the probability of the de novos clustering as tightly as observed.
    ///
    /// Returns `None` when there are fewer than two de novos, since no distance
    /// exists. If no simulation scores at or below the observed value, the
    /// simulated distribution is extended by `iteration_step` until one does or
    /// `max_iterations` is reached.
    pub fn analyse(&self, sites: &mut SiteChooser, de_novos: &[i64]) -> Result<Option<ClusteringResult>, ClusteringError> {
        if de_novos.len() < 2 {
            return Ok(None);
        }

        let observed = clustering_score(de_novos);
        let mut iterations = self.config.iterations;
        let mut dist = Vec::with_capacity(iterations);

        loop {
            simulate_distribution(sites, &mut dist, de_novos.len(), iterations)?;

            // number of simulations scoring <= observed
            let pos = dist.partition_point(|&score| score <= observed);
            let probability = (1 + pos) as f64 / (1 + dist.len()) as f64;

            if pos > 0 || iterations >= self.config.max_iterations {
                logging::log("CLUSTERING", &format!(
                    "{} de novos: observed distance {:.1}, probability {} from {} simulations",
                    de_novos.len(), observed, probability, dist.len()
                ));
                return Ok(Some(ClusteringResult {
                    observed_distance: observed,
                    probability,
                    iterations: dist.len(),
                }));
            }

            iterations = (iterations + self.config.iteration_step).min(self.config.max_iterations);
            logging::log("CLUSTERING", &format!("Probability at its minimum, extending to {} simulations", iterations));
        }
    }
}

/// Extends `dist` to `iterations` simulated scores and sorts it.
///
/// Each score comes from `sample_n` sites drawn from `sites`.
pub fn simulate_distribution(
    sites: &mut SiteChooser,
    dist: &mut Vec<f64>,
    sample_n: usize,
    iterations: usize,
) -> Result<(), ClusteringError> {
    let mut positions = Vec::with_capacity(sample_n);
    while dist.len() < iterations {
        positions.clear();
        for _ in 0..sample_n {
            positions.push(sites.choice()?.position);
        }
        dist.push(clustering_score(&positions));
    }

    dist.sort_by(|a, b| a.total_cmp(b));
    Ok(())
}

/// Geometric mean of the pairwise distances between positions
pub fn clustering_score(positions: &[i64]) -> f64 {
    geomean(&get_distances(positions))
}

/// Absolute distances between every pair of positions
pub fn get_distances(positions: &[i64]) -> Vec<f64> {
    let mut distances = Vec::with_capacity(positions.len() * positions.len().saturating_sub(1) / 2);
    for (i, a) in positions.iter().enumerate() {
        for b in &positions[i + 1..] {
            distances.push(a.abs_diff(*b) as f64);
        }
    }
    distances
}

/// Geometric mean of non-negative values.
///
/// A single zero would collapse the mean, so when any value is zero all
/// values are shifted up by one and the mean is shifted back down.
pub fn geomean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    let shift = if values.iter().any(|&value| value == 0.0) { 1.0 } else { 0.0 };
    let log_sum: f64 = values.iter().map(|value| (value + shift).ln()).sum();

    (log_sum / values.len() as f64).exp() - shift
}
