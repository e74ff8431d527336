pub mod types;
pub mod weighted_choice;
pub mod site_rates;
pub mod clustering;
pub mod utils;

pub use weighted_choice::{ChooserError, SiteChooser, WeightedChoice};
pub use site_rates::SiteRates;
pub use clustering::{ClusteringAnalysis, ClusteringConfig, ClusteringResult};
