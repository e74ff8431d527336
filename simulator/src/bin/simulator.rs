use std::env;
use std::path::Path;
use anyhow::Context;
use denovonear::utils::logging;
use simulator::{
    config::{Config, DEFAULT_CONFIG_PATH},
    run_simulation,
    save_results,
};

// ------------------------------------------------------------------------------------------------
// Main
// ------------------------------------------------------------------------------------------------

/// Loads the configuration, runs the clustering simulation and saves the results
fn main() -> anyhow::Result<()> {
    // Setup logging
    setup_logging()?;

    // Load configuration
    let config_path = env::args().nth(1).unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let config = Config::load(&config_path)
        .with_context(|| format!("Failed to load configuration from {}", config_path))?;

    println!("Running clustering simulation for {} genes", config.genes.len());

    // Run simulation
    let results = run_simulation(&config)?;

    // Save results
    save_results(&results, Path::new(&config.simulation_config.results_dir))?;

    for gene in &results.genes {
        for category in &gene.categories {
            if let Some(result) = &category.clustering {
                println!(
                    "{}\t{}\t{}\t{:.1}\t{}",
                    gene.gene, category.consequence, category.de_novo_count, result.observed_distance, result.probability
                );
            }
        }
    }
    if !results.skipped_genes.is_empty() {
        println!("Skipped {} genes without two de novos in any category", results.skipped_genes.len());
    }

    Ok(())
}

/// Enables logging if the ENABLE_LOGS environment variable is set, otherwise
/// falls back to DENOVONEAR_LOGGING
fn setup_logging() -> anyhow::Result<()> {
    if env::var("ENABLE_LOGS").is_ok() {
        logging::enable_logging();
        return Ok(());
    }
    logging::init_logging()?;
    Ok(())
}
