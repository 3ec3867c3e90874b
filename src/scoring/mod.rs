//! Heuristic answer evaluation: STAR structure, metric scorers, and the
//! feedback aggregator

pub mod aggregator;
pub mod metrics;
pub mod readability;
pub mod star;

pub use aggregator::{Evaluation, Evaluator};
pub use star::{StarAnalysis, StarClassifier};

use serde::{Deserialize, Serialize};

/// Qualitative band attached to every metric score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Band {
    Pass,
    Warn,
    Fail,
}

impl Band {
    pub fn is_pass(self) -> bool {
        self == Band::Pass
    }

    /// Lower sorts first when ordering suggestions.
    pub fn severity(self) -> u8 {
        match self {
            Band::Fail => 0,
            Band::Warn => 1,
            Band::Pass => 2,
        }
    }
}

/// A numeric score with its band. The value range is metric-specific:
/// 0..=1 for conciseness and relevance, 0..=100 for readability, a raw
/// density for filler words.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricScore {
    pub value: f32,
    pub band: Band,
}

impl MetricScore {
    pub fn new(value: f32, band: Band) -> Self {
        Self { value, band }
    }

    /// The deterministic worst-case score used for empty answers.
    pub fn worst(value: f32) -> Self {
        Self {
            value,
            band: Band::Fail,
        }
    }
}
