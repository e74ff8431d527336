pub mod config;
pub mod site_selection;
pub mod simulation;
pub mod simulation_results;
pub mod save_results;

pub use site_selection::SiteSelectionStats;
pub use simulation::{run_gene, run_simulation, SimulationError};
pub use simulation_results::{CategoryResult, GeneResult, SimulationResults};
pub use save_results::save_results;
