//! Configuration loader and validator for the clustering simulator.
//! Handles parsing, validation, and access to simulation configuration files.

use denovonear::types::{complement, constants, Consequence, Strand};
use denovonear::ClusteringConfig;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Config file read when no path is given on the command line
pub const DEFAULT_CONFIG_PATH: &str = "simulator/config/config.toml";

// ------------------------------------------------------------------------------------------------
// Main Configuration Structs
// ------------------------------------------------------------------------------------------------

/// Main configuration struct for simulation parameters.
///
/// Describes how many simulations to run and the batch of genes to test, each
/// with its candidate sites and the de novos observed in it.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Iteration counts, seed and output location
    pub simulation_config: SimulationConfig,
    /// Genes analysed in order
    pub genes: Vec<GeneConfig>,
}

/// Configuration for the simulation run itself.
#[derive(Debug, Deserialize, Clone)]
pub struct SimulationConfig {
    /// Simulations run before the first probability estimate
    pub iterations: usize,
    /// Simulations added each time the probability sits at its lower bound
    #[serde(default = "default_iteration_step")]
    pub iteration_step: usize,
    /// Upper limit on the size of the simulated distribution
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
    /// Seed for the site choosers; seeded from the clock when absent
    #[serde(default)]
    pub seed: Option<u64>,
    /// Sites drawn per category to record site selection statistics
    #[serde(default = "default_selection_draws")]
    pub selection_draws: usize,
    /// Directory the JSON results are written to
    #[serde(default = "default_results_dir")]
    pub results_dir: String,
}

/// Configuration for the gene being simulated.
#[derive(Debug, Deserialize, Clone)]
pub struct GeneConfig {
    /// Gene symbol, used to label results
    pub name: String,
    /// Strand the transcript is read from ("+" or "-")
    pub strand: Strand,
    /// Every candidate base change with its mutation rate and consequence
    pub sites: Vec<SiteConfig>,
    /// Inclusive `[start, end]` position ranges whose sites are skipped
    #[serde(default)]
    pub masked_regions: Vec<[i64; 2]>,
    /// Observed de novo positions for each consequence category
    #[serde(default)]
    pub de_novos: DeNovoConfig,
}

/// A single candidate base change, alleles in transcript orientation
#[derive(Debug, Deserialize, Clone)]
pub struct SiteConfig {
    pub position: i64,
    pub ref_allele: char,
    pub alt_allele: char,
    /// Site mutation rate (e.g. 5e-9)
    pub rate: f64,
    pub consequence: Consequence,
}

/// Observed de novo positions per consequence category.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct DeNovoConfig {
    #[serde(default)]
    pub missense: Vec<i64>,
    #[serde(default)]
    pub nonsense: Vec<i64>,
    #[serde(default)]
    pub synonymous: Vec<i64>,
    #[serde(default)]
    pub splice_lof: Vec<i64>,
    #[serde(default)]
    pub splice_region: Vec<i64>,
    #[serde(default)]
    pub loss_of_function: Vec<i64>,
}

fn default_iteration_step() -> usize {
    constants::DEFAULT_ITERATION_STEP
}

fn default_max_iterations() -> usize {
    constants::DEFAULT_MAX_ITERATIONS
}

fn default_selection_draws() -> usize {
    10_000
}

fn default_results_dir() -> String {
    "simulator/results".to_string()
}

impl DeNovoConfig {
    /// De novo positions for a consequence category
    pub fn get(&self, consequence: Consequence) -> &[i64] {
        match consequence {
            Consequence::Missense => &self.missense,
            Consequence::Nonsense => &self.nonsense,
            Consequence::Synonymous => &self.synonymous,
            Consequence::SpliceLof => &self.splice_lof,
            Consequence::SpliceRegion => &self.splice_region,
            Consequence::LossOfFunction => &self.loss_of_function,
        }
    }
}

impl GeneConfig {
    /// Whether any category has the two de novos needed for a distance
    pub fn has_clustering_candidates(&self) -> bool {
        Consequence::ALL.iter().any(|&consequence| self.de_novos.get(consequence).len() >= 2)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.name.is_empty() {
            return Err(ConfigError::ValidationError("Gene name must not be empty".into()));
        }
        if self.sites.is_empty() {
            return Err(ConfigError::ValidationError(format!("Gene {} must have at least one site", self.name)));
        }
        for site in &self.sites {
            if !site.rate.is_finite() || site.rate < 0.0 {
                return Err(ConfigError::ValidationError(format!(
                    "{}: site {} has invalid mutation rate {}", self.name, site.position, site.rate
                )));
            }
            for allele in [site.ref_allele, site.alt_allele] {
                if complement(allele).is_none() {
                    return Err(ConfigError::ValidationError(format!(
                        "{}: site {} has invalid allele '{}'", self.name, site.position, allele
                    )));
                }
            }
            if site.consequence == Consequence::LossOfFunction {
                return Err(ConfigError::ValidationError(format!(
                    "{}: site {} can't be assigned to loss_of_function; use nonsense or splice_lof",
                    self.name, site.position
                )));
            }
        }
        Ok(())
    }
}

impl SimulationConfig {
    pub fn clustering_config(&self) -> ClusteringConfig {
        ClusteringConfig {
            iterations: self.iterations,
            iteration_step: self.iteration_step,
            max_iterations: self.max_iterations,
        }
    }
}

// ------------------------------------------------------------------------------------------------
// Error Types and Validation
// ------------------------------------------------------------------------------------------------

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileReadError(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

// ------------------------------------------------------------------------------------------------
// Configuration Implementation Methods
// ------------------------------------------------------------------------------------------------

impl Config {
    /// Loads and validates a configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let config_str = fs::read_to_string(path)?;
        Self::from_toml(&config_str)
    }

    /// Parses and validates configuration text.
    pub fn from_toml(config_str: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(config_str)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let simulation_config = &self.simulation_config;
        if simulation_config.iterations == 0 {
            return Err(ConfigError::ValidationError("Iterations must be positive".into()));
        }
        if simulation_config.iteration_step == 0 {
            return Err(ConfigError::ValidationError("Iteration step must be positive".into()));
        }
        if simulation_config.max_iterations < simulation_config.iterations {
            return Err(ConfigError::ValidationError("Max iterations must be at least the initial iterations".into()));
        }
        if self.genes.is_empty() {
            return Err(ConfigError::ValidationError("At least one gene must be configured".into()));
        }
        for (index, gene) in self.genes.iter().enumerate() {
            gene.validate()?;
            if self.genes[..index].iter().any(|other| other.name == gene.name) {
                return Err(ConfigError::ValidationError(format!("Gene {} is configured twice", gene.name)));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = r#"
[simulation_config]
iterations = 1000
seed = 42

[[genes]]
name = "GENE1"
strand = "-"
masked_regions = [[150, 160]]

[[genes.sites]]
position = 100
ref_allele = "A"
alt_allele = "T"
rate = 5e-9
consequence = "missense"

[[genes.sites]]
position = 103
ref_allele = "C"
alt_allele = "A"
rate = 1e-9
consequence = "nonsense"

[genes.de_novos]
missense = [100, 100]

[[genes]]
name = "GENE2"
strand = "+"

[[genes.sites]]
position = 7
ref_allele = "G"
alt_allele = "T"
rate = 2e-9
consequence = "synonymous"
"#;

    #[test]
    fn test_parse_config() {
        let config = Config::from_toml(CONFIG).expect("Failed to parse config");

        assert_eq!(config.simulation_config.iterations, 1000);
        assert_eq!(config.simulation_config.iteration_step, constants::DEFAULT_ITERATION_STEP);
        assert_eq!(config.simulation_config.max_iterations, constants::DEFAULT_MAX_ITERATIONS);
        assert_eq!(config.simulation_config.seed, Some(42));
        assert_eq!(config.simulation_config.results_dir, "simulator/results");
        assert_eq!(config.genes.len(), 2);

        let first = &config.genes[0];
        assert_eq!(first.strand, Strand::Minus);
        assert_eq!(first.sites.len(), 2);
        assert_eq!(first.sites[1].consequence, Consequence::Nonsense);
        assert_eq!(first.sites[1].ref_allele, 'C');
        assert_eq!(first.masked_regions, vec![[150, 160]]);
        assert_eq!(first.de_novos.get(Consequence::Missense), &[100, 100]);
        assert!(first.de_novos.get(Consequence::Nonsense).is_empty());
        assert!(first.has_clustering_candidates());

        let second = &config.genes[1];
        assert_eq!(second.name, "GENE2");
        assert!(second.masked_regions.is_empty());
        assert!(!second.has_clustering_candidates());
    }

    #[test]
    fn test_rejects_invalid_values() {
        let bad_rate = CONFIG.replace("rate = 5e-9", "rate = -5e-9");
        assert!(matches!(Config::from_toml(&bad_rate), Err(ConfigError::ValidationError(_))));

        let bad_allele = CONFIG.replace("alt_allele = \"T\"", "alt_allele = \"X\"");
        assert!(matches!(Config::from_toml(&bad_allele), Err(ConfigError::ValidationError(_))));

        let derived = CONFIG.replace("consequence = \"nonsense\"", "consequence = \"loss_of_function\"");
        assert!(matches!(Config::from_toml(&derived), Err(ConfigError::ValidationError(_))));

        let no_iterations = CONFIG.replace("iterations = 1000", "iterations = 0");
        assert!(matches!(Config::from_toml(&no_iterations), Err(ConfigError::ValidationError(_))));

        let duplicate = CONFIG.replace("name = \"GENE2\"", "name = \"GENE1\"");
        assert!(matches!(Config::from_toml(&duplicate), Err(ConfigError::ValidationError(_))));

        let bad_strand = CONFIG.replace("strand = \"-\"", "strand = \"x\"");
        assert!(matches!(Config::from_toml(&bad_strand), Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_rejects_empty_gene_list() {
        let config = "genes = []\n\n[simulation_config]\niterations = 10\n";
        assert!(matches!(Config::from_toml(config), Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(Config::load("does/not/exist.toml"), Err(ConfigError::FileReadError(_))));
    }
}
