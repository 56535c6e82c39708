//! Weighted total score and gate-then-threshold judgment

use crate::domain::{Judgment, StrategyScores, WeightVector};

/// Weighted total at or above this classifies as Priority
pub const PRIORITY_THRESHOLD: f64 = 4.0;

/// Weighted total at or above this (and below Priority) classifies as
/// Conditional
pub const CONDITIONAL_THRESHOLD: f64 = 3.0;

/// Weighted arithmetic mean of the six axes
///
/// Returns 0.0 when the weight sum is zero; a degenerate configuration, not
/// an error. Pure and deterministic: identical inputs yield bit-identical
/// output.
pub fn compute_total_score(scores: &StrategyScores, weights: &WeightVector) -> f64 {
    let weight_sum = weights.sum();
    if weight_sum == 0 {
        return 0.0;
    }

    let weighted: u32 = scores
        .axes()
        .iter()
        .zip(weights.axes().iter())
        .map(|(&s, &w)| s as u32 * w)
        .sum();

    weighted as f64 / weight_sum as f64
}

/// Classify a strategy's scores into a categorical verdict
///
/// Gates run before the threshold ladder: certain axis values disqualify a
/// strategy no matter how high its weighted total is.
pub fn classify(scores: &StrategyScores, weights: &WeightVector) -> Judgment {
    if scores.revenue_potential <= 2 {
        return Judgment::Decline;
    }
    if scores.competitive_advantage <= 2 {
        return Judgment::Decline;
    }
    if scores.execution_feasibility == 1 {
        return Judgment::Decline;
    }

    let total = compute_total_score(scores, weights);
    if total >= PRIORITY_THRESHOLD {
        Judgment::Priority
    } else if total >= CONDITIONAL_THRESHOLD {
        Judgment::Conditional
    } else {
        Judgment::Decline
    }
}
