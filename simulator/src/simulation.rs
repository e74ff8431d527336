use denovonear::{
    clustering::ClusteringError,
    site_rates::SiteRatesError,
    types::Consequence,
    utils::logging,
    ClusteringAnalysis, SiteRates,
};
use indicatif::{ProgressBar, ProgressStyle};
use thiserror::Error;
use crate::config::{Config, GeneConfig};
use crate::simulation_results::{CategoryResult, GeneResult, SimulationResults};

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("Invalid clustering settings: {0}")]
    Settings(ClusteringError),
    #[error("Failed to build site rates: {0}")]
    SiteRates(#[from] SiteRatesError),
    #[error("Clustering analysis failed for {gene} {consequence}: {source}")]
    Clustering {
        gene: String,
        consequence: Consequence,
        source: ClusteringError,
    },
    #[error("Failed to write results: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to serialize results: {0}")]
    Json(#[from] serde_json::Error),
}

/// Seed for the gene at `index`, spaced so no two genes share a category stream
fn gene_seed(seed: Option<u64>, index: usize) -> Option<u64> {
    seed.map(|seed| seed.wrapping_add((index * Consequence::ALL.len()) as u64))
}

/// Builds the consequence-specific site choosers for a gene.
pub fn build_site_rates(gene: &GeneConfig, seed: Option<u64>) -> Result<SiteRates, SimulationError> {
    let mut rates = match seed {
        Some(seed) => SiteRates::with_seed(gene.strand, seed),
        None => SiteRates::new(gene.strand),
    };
    for &[start, end] in &gene.masked_regions {
        rates.mask_region(start, end);
    }

    for site in &gene.sites {
        rates.add_site(site.consequence, site.position, site.rate, site.ref_allele, site.alt_allele)?;
    }

    logging::log("SIMULATOR", &format!(
        "Loaded {} sites for {} ({} strand)", gene.sites.len(), gene.name, rates.strand()
    ));
    Ok(rates)
}

/// Runs the clustering analysis for every consequence category of one gene.
///
/// Categories with two or more de novos are tested for clustering, which fails
/// when the category has no sites to simulate from. Every category with sites
/// additionally records `selection_draws` sampled sites.
pub fn run_gene(
    analysis: &ClusteringAnalysis,
    gene: &GeneConfig,
    seed: Option<u64>,
    selection_draws: usize,
) -> Result<GeneResult, SimulationError> {
    let mut rates = build_site_rates(gene, seed)?;
    let mut result = GeneResult::new(gene.name.clone(), rates.strand());

    for consequence in Consequence::ALL {
        let de_novos = gene.de_novos.get(consequence);
        let sites = rates.get_mut(consequence);

        let clustering = analysis
            .analyse(sites, de_novos)
            .map_err(|source| SimulationError::Clustering {
                gene: gene.name.clone(),
                consequence,
                source,
            })?;

        if !sites.is_empty() {
            for _ in 0..selection_draws {
                let site = sites.choice_or_sentinel();
                result.site_stats.record_site(consequence, &site);
            }
        }

        if let Some(clustering) = &clustering {
            logging::log("SIMULATOR", &format!(
                "{} {}: distance {:.1}, probability {}", gene.name, consequence,
                clustering.observed_distance, clustering.probability
            ));
        }

        result.categories.push(CategoryResult {
            consequence,
            de_novo_count: de_novos.len(),
            summed_rate: sites.get_summed_rate(),
            clustering,
        });
    }

    Ok(result)
}

/// Runs the clustering analysis for every configured gene.
///
/// Genes without two de novos in any category are skipped and listed in the
/// results.
pub fn run_simulation(config: &Config) -> Result<SimulationResults, SimulationError> {
    let simulation_config = &config.simulation_config;
    let analysis = ClusteringAnalysis::new(simulation_config.clustering_config())
        .map_err(SimulationError::Settings)?;
    let mut results = SimulationResults::new(simulation_config.seed, analysis.config());

    let progress_bar = ProgressBar::new(config.genes.len() as u64);
    progress_bar.set_style(ProgressStyle::default_bar()
        .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("+>-"));

    for (index, gene) in config.genes.iter().enumerate() {
        progress_bar.set_message(gene.name.clone());

        if gene.has_clustering_candidates() {
            let seed = gene_seed(simulation_config.seed, index);
            results.genes.push(run_gene(&analysis, gene, seed, simulation_config.selection_draws)?);
        } else {
            logging::log("SIMULATOR", &format!("Skipping {}: fewer than two de novos in every category", gene.name));
            results.skipped_genes.push(gene.name.clone());
        }

        progress_bar.inc(1);
    }

    progress_bar.finish_with_message("done");
    Ok(results)
}
