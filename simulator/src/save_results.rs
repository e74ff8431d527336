use std::fs;
use std::path::Path;
use serde_json;
use denovonear::utils::logging;
use crate::simulation::SimulationError;
use crate::simulation_results::SimulationResults;

/// Saves the simulation results to files
///
/// # Arguments
///
/// * `results` - Clustering outcomes and site selection statistics
/// * `results_dir` - Directory for the result files, created when missing
pub fn save_results(results: &SimulationResults, results_dir: &Path) -> Result<(), SimulationError> {
    // Print final statistics
    logging::log("SIMULATOR", "\n=== Simulation Statistics ===");
    for gene in &results.genes {
        for category in &gene.categories {
            match &category.clustering {
                Some(result) => logging::log("SIMULATOR", &format!(
                    "{} {}: {} de novos, distance {:.1}, probability {}",
                    gene.gene, category.consequence, category.de_novo_count, result.observed_distance, result.probability
                )),
                None => logging::log("SIMULATOR", &format!(
                    "{} {}: {} de novos, NA", gene.gene, category.consequence, category.de_novo_count
                )),
            }
        }
    }
    logging::log("SIMULATOR", &format!("Skipped genes: {}", results.skipped_genes.len()));
    logging::log("SIMULATOR", "===========================");

    fs::create_dir_all(results_dir)?;

    // Save clustering results
    let results_file = results_dir.join("clustering_results.json");
    fs::write(&results_file, serde_json::to_string_pretty(&results.to_json())?)?;
    logging::log("SIMULATOR", &format!("Saved clustering results to {}", results_file.display()));

    // Save the per-gene table
    let table_file = results_dir.join("clustering_results.tsv");
    fs::write(&table_file, results.to_tsv())?;
    logging::log("SIMULATOR", &format!("Saved clustering table to {}", table_file.display()));

    // Save site selection data
    let selection_file = results_dir.join("site_selection.json");
    fs::write(&selection_file, serde_json::to_string_pretty(&results.site_selection_json())?)?;
    logging::log("SIMULATOR", &format!("Saved site selection data to {}", selection_file.display()));

    Ok(())
}
