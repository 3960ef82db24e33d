// src/sentiment/mod.rs
//! Lexicon-and-rule polarity scoring.
//!
//! `PolarityScorer` is the seam: the pipeline only depends on the trait, so
//! an alternative scoring engine can be swapped in without touching
//! normalization, classification or aggregation. `LexiconScorer` is the
//! default implementation.

pub mod lexicon;
pub mod scorer;

pub use scorer::LexiconScorer;

use serde::{Deserialize, Serialize};

/// Four-dimensional sentiment score for one text.
///
/// `pos + neu + neg` sums to 1.0 (within float tolerance) for every input;
/// `compound` is the saturating-normalized overall polarity in [-1, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentScore {
    pub pos: f64,
    pub neu: f64,
    pub neg: f64,
    pub compound: f64,
}

impl SentimentScore {
    /// Score of a text with no sentiment-bearing signal at all: the whole
    /// mass is neutral and the compound is exactly zero.
    pub fn neutral() -> Self {
        Self {
            pos: 0.0,
            neu: 1.0,
            neg: 0.0,
            compound: 0.0,
        }
    }
}

/// Pluggable polarity engine. Implementations must be deterministic pure
/// functions of the input text.
pub trait PolarityScorer {
    fn score(&self, text: &str) -> SentimentScore;
}
