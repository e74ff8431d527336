use thiserror::Error;

pub mod chooser;
pub mod sites;
pub use chooser::WeightedChoice;
pub use sites::SiteChooser;

#[cfg(test)]
mod tests;

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ChooserError {
    #[error("Invalid weight: {0} (weights must be finite and non-negative)")]
    InvalidWeight(f64),
    #[error("No choices available: nothing has been added to the chooser")]
    NoChoicesAvailable,
}
