//! Generated strategy candidates and their categorical verdicts

use super::scores::StrategyScores;
use serde::{Deserialize, Serialize};

/// Oracle-reported confidence in a strategy
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Default for Confidence {
    fn default() -> Self {
        Self::Medium
    }
}

/// Categorical verdict derived from a strategy's scores
///
/// Always recomputed from scores and the active weights; never stored as
/// authoritative.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Judgment {
    Priority,
    Conditional,
    Decline,
}

impl Judgment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Priority => "priority",
            Self::Conditional => "conditional",
            Self::Decline => "decline",
        }
    }
}

impl std::fmt::Display for Judgment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One candidate strategy as generated by the oracle
///
/// Strategies have no standalone identity; they are addressed by the
/// `(exploration_id, name)` composite and are immutable once stored. The
/// oracle's output is duck-typed, so every field the oracle may omit carries
/// a serde default. Strategies without `scores` cannot be ranked and are
/// skipped during collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Strategy {
    pub name: String,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub how_to_obtain: String,
    #[serde(default)]
    pub metrics: String,
    #[serde(default)]
    pub confidence: Confidence,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scores: Option<StrategyScores>,
}
