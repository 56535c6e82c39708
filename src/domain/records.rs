//! Derived and curated records: enriched/ranked strategies, baselines,
//! archive rows, and curator decisions

use super::scores::StrategyScores;
use super::strategy::{Confidence, Judgment};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A strategy enriched with its computed score, verdict, and provenance
///
/// Produced by the collector from stored explorations; the score and
/// judgment are recomputed on every read under the caller's weight vector.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedStrategy {
    pub exploration_id: Uuid,
    pub name: String,
    pub reason: String,
    pub how_to_obtain: String,
    pub metrics: String,
    pub confidence: Confidence,
    #[serde(default)]
    pub tags: Vec<String>,
    pub scores: StrategyScores,
    pub total_score: f64,
    pub judgment: Judgment,
    pub question: String,
    pub exploration_date: DateTime<Utc>,
}

impl EnrichedStrategy {
    /// Composite key addressing this strategy
    pub fn key(&self) -> (Uuid, String) {
        (self.exploration_id, self.name.clone())
    }
}

/// A strategy with its 1-based rank after a descending stable sort
///
/// Ephemeral: recomputed on every ranking request, never persisted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedStrategy {
    pub rank: u32,
    #[serde(flatten)]
    pub strategy: EnrichedStrategy,
}

/// Dated snapshot of aggregate score statistics
///
/// Append-only; the date is the temporal key. `improvement` is the percent
/// delta of `top_score` versus the immediately preceding baseline, absent
/// when no prior baseline exists or the prior top score is 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBaseline {
    pub date: DateTime<Utc>,
    pub top_score: f64,
    pub avg_score: f64,
    pub total_strategies: usize,
    pub high_score_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub improvement: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_id: Option<String>,
}

/// Durable archive entry for a strategy that cleared the archival threshold
///
/// Unique on `(exploration_id, name)`; the archive pipeline never updates or
/// removes a row, only explicit user action deletes one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopStrategy {
    pub exploration_id: Uuid,
    pub name: String,
    pub reason: String,
    pub how_to_obtain: String,
    pub total_score: f64,
    pub scores: StrategyScores,
    pub question: String,
    pub judgment: Judgment,
    pub archived_at: DateTime<Utc>,
}

impl TopStrategy {
    pub fn key(&self) -> (Uuid, String) {
        (self.exploration_id, self.name.clone())
    }
}

/// Human curator verdict on a strategy
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Adopt,
    Reject,
    Pending,
}

impl Decision {
    /// Parse a decision label, rejecting anything outside the three valid values
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "adopt" => Some(Self::Adopt),
            "reject" => Some(Self::Reject),
            "pending" => Some(Self::Pending),
            _ => None,
        }
    }
}

/// Curator judgment on a specific strategy, independent of its computed score
///
/// Upserted by `(exploration_id, strategy_name)`; `updated_at` refreshes on
/// every upsert so the most recently touched adoption wins seed selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyDecision {
    pub exploration_id: Uuid,
    pub strategy_name: String,
    pub decision: Decision,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feasibility_note: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl StrategyDecision {
    pub fn key(&self) -> (Uuid, String) {
        (self.exploration_id, self.strategy_name.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decision_parse() {
        assert_eq!(Decision::parse("adopt"), Some(Decision::Adopt));
        assert_eq!(Decision::parse("reject"), Some(Decision::Reject));
        assert_eq!(Decision::parse("pending"), Some(Decision::Pending));
        assert_eq!(Decision::parse("maybe"), None);
        assert_eq!(Decision::parse("Adopt"), None);
    }

    #[test]
    fn test_ranked_strategy_flattens() {
        let enriched = EnrichedStrategy {
            exploration_id: Uuid::new_v4(),
            name: "S".to_string(),
            reason: String::new(),
            how_to_obtain: String::new(),
            metrics: String::new(),
            confidence: Confidence::Medium,
            tags: vec![],
            scores: StrategyScores {
                revenue_potential: 3,
                time_to_revenue: 3,
                competitive_advantage: 3,
                execution_feasibility: 3,
                hq_contribution: 3,
                merger_synergy: 3,
            },
            total_score: 3.0,
            judgment: Judgment::Conditional,
            question: "q".to_string(),
            exploration_date: Utc::now(),
        };
        let ranked = RankedStrategy {
            rank: 1,
            strategy: enriched,
        };
        let value = serde_json::to_value(&ranked).unwrap();
        assert_eq!(value["rank"], 1);
        // Flattened: strategy fields sit at the top level.
        assert_eq!(value["name"], "S");
        assert_eq!(value["judgment"], "conditional");
    }
}
