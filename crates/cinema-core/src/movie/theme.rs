//! Rating tiers used to color movie cards and detail headers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Visual tier for a rating on the 0–5 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RatingTheme {
    Premium,
    Good,
    Average,
    Poor,
}

impl RatingTheme {
    /// Maps a rating to its tier. Each lower bound is inclusive.
    pub fn from_rating(rating: f64) -> Self {
        if rating >= 4.5 {
            Self::Premium
        } else if rating >= 3.5 {
            Self::Good
        } else if rating >= 2.5 {
            Self::Average
        } else {
            Self::Poor
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Premium => "premium",
            Self::Good => "good",
            Self::Average => "average",
            Self::Poor => "poor",
        }
    }
}

impl fmt::Display for RatingTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
