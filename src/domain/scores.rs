//! Score and weight vectors for the six evaluation axes

use serde::{Deserialize, Serialize};

/// Six-axis score vector attached to a generated strategy
///
/// Each axis is an integer in [1, 5], assigned by the generation oracle and
/// immutable afterwards. Field names follow the oracle's wire shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyScores {
    pub revenue_potential: u8,
    pub time_to_revenue: u8,
    pub competitive_advantage: u8,
    pub execution_feasibility: u8,
    pub hq_contribution: u8,
    pub merger_synergy: u8,
}

impl StrategyScores {
    /// All six axes as an array, in canonical axis order
    pub fn axes(&self) -> [u8; 6] {
        [
            self.revenue_potential,
            self.time_to_revenue,
            self.competitive_advantage,
            self.execution_feasibility,
            self.hq_contribution,
            self.merger_synergy,
        ]
    }

    /// True when every axis lies in [1, 5]
    pub fn is_valid(&self) -> bool {
        self.axes().iter().all(|&v| (1..=5).contains(&v))
    }
}

/// Per-axis weights for the weighted total score
///
/// Weights are non-negative and normalized by their sum at scoring time, so
/// any positive total is acceptable. At the configuration boundary each
/// field is constrained to [0, 100]. One vector per user identity; the
/// default applies when a user has not configured one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightVector {
    pub revenue_potential: u32,
    pub time_to_revenue: u32,
    pub competitive_advantage: u32,
    pub execution_feasibility: u32,
    pub hq_contribution: u32,
    pub merger_synergy: u32,
}

impl WeightVector {
    /// Weights as an array, in the same axis order as [`StrategyScores::axes`]
    pub fn axes(&self) -> [u32; 6] {
        [
            self.revenue_potential,
            self.time_to_revenue,
            self.competitive_advantage,
            self.execution_feasibility,
            self.hq_contribution,
            self.merger_synergy,
        ]
    }

    /// Sum of all six weights
    pub fn sum(&self) -> u32 {
        self.axes().iter().sum()
    }

    /// True when every weight lies in [0, 100]
    pub fn is_valid(&self) -> bool {
        self.axes().iter().all(|&w| w <= 100)
    }
}

impl Default for WeightVector {
    fn default() -> Self {
        Self {
            revenue_potential: 30,
            time_to_revenue: 20,
            competitive_advantage: 20,
            execution_feasibility: 15,
            hq_contribution: 10,
            merger_synergy: 5,
        }
    }
}
