use serde::{Deserialize, Serialize};
use std::fmt;

/// Consequence category of a single-base change.
///
/// `LossOfFunction` is derived: it collects every `Nonsense` and `SpliceLof` site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Consequence {
    Missense,
    Nonsense,
    Synonymous,
    SpliceLof,
    SpliceRegion,
    LossOfFunction,
}

impl Consequence {
    pub const ALL: [Consequence; 6] = [
        Consequence::Missense,
        Consequence::Nonsense,
        Consequence::Synonymous,
        Consequence::SpliceLof,
        Consequence::SpliceRegion,
        Consequence::LossOfFunction,
    ];

    /// Position of this category within `ALL`
    pub fn index(self) -> usize {
        self as usize
    }

    /// Whether sites of this category also count as loss-of-function
    pub fn is_loss_of_function(self) -> bool {
        matches!(self, Consequence::Nonsense | Consequence::SpliceLof)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Consequence::Missense => "missense",
            Consequence::Nonsense => "nonsense",
            Consequence::Synonymous => "synonymous",
            Consequence::SpliceLof => "splice_lof",
            Consequence::SpliceRegion => "splice_region",
            Consequence::LossOfFunction => "loss_of_function",
        }
    }
}

impl fmt::Display for Consequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
