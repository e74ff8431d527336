use serde::{Deserialize, Serialize};
use std::fmt;
use super::constants;

/// A candidate mutation site: position, reference and alternate allele, and the
/// site's mutation rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlleleChoice {
    /// Site position (e.g. 100001)
    pub position: i64,
    /// Reference allele for the site (e.g. 'A')
    pub ref_allele: char,
    /// Alternate allele for the site (e.g. 'T')
    pub alt_allele: char,
    /// Site mutation rate (e.g. 0.000000005)
    pub weight: f64,
}

impl AlleleChoice {
    pub fn new(position: i64, ref_allele: char, alt_allele: char, weight: f64) -> Self {
        AlleleChoice { position, ref_allele, alt_allele, weight }
    }

    /// The placeholder returned when a site is requested from an empty chooser.
    pub fn sentinel() -> Self {
        AlleleChoice {
            position: constants::SENTINEL_POSITION,
            ref_allele: constants::SENTINEL_ALLELE,
            alt_allele: constants::SENTINEL_ALLELE,
            weight: 0.0,
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.position == constants::SENTINEL_POSITION
    }
}

impl fmt::Display for AlleleChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}>{}", self.position, self.ref_allele, self.alt_allele)
    }
}

/// Strand a transcript is read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strand {
    #[serde(rename = "+")]
    Plus,
    #[serde(rename = "-")]
    Minus,
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strand::Plus => write!(f, "+"),
            Strand::Minus => write!(f, "-"),
        }
    }
}

/// Returns the complementary base, or None for anything outside ACGT.
pub fn complement(base: char) -> Option<char> {
    match base.to_ascii_uppercase() {
        'A' => Some('T'),
        'T' => Some('A'),
        'G' => Some('C'),
        'C' => Some('G'),
        _ => None,
    }
}
