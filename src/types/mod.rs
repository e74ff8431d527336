pub mod allele;
pub mod consequence;
pub mod constants;

pub use allele::{AlleleChoice, Strand, complement};
pub use consequence::Consequence;
