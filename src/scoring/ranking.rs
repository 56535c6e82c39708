//! On-demand ranking over the full strategy population

use super::collector::StrategyCollector;
use crate::domain::{Judgment, RankedStrategy, WeightVector};
use crate::error::Result;
use crate::metrics::METRICS;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Ranking request parameters
#[derive(Debug, Clone, Deserialize)]
pub struct RankingQuery {
    pub limit: usize,
    /// Minimum weighted total, inclusive
    #[serde(default)]
    pub min_score: f64,
    /// Restrict to one judgment category when set
    #[serde(default)]
    pub judgment: Option<Judgment>,
}

impl RankingQuery {
    pub fn top(limit: usize) -> Self {
        Self {
            limit,
            min_score: 0.0,
            judgment: None,
        }
    }
}

/// Aggregate statistics over the post-filter population
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingStats {
    /// Post-filter, pre-truncation count
    pub total_strategies: usize,
    pub priority_count: usize,
    pub conditional_count: usize,
    pub decline_count: usize,
    pub avg_score: f64,
    /// 0 when the filtered population is empty
    pub top_score: f64,
}

/// Ranking response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingPage {
    pub strategies: Vec<RankedStrategy>,
    pub stats: RankingStats,
}

/// Read-side ranking over freshly recomputed scores
///
/// Never mutates persisted state and never reads a cached score: every call
/// recomputes totals and judgments under the weight vector supplied by the
/// caller, so weight changes take effect immediately.
pub struct RankingService {
    collector: Arc<StrategyCollector>,
}

impl RankingService {
    pub fn new(collector: Arc<StrategyCollector>) -> Self {
        Self { collector }
    }

    pub async fn ranking(
        &self,
        query: &RankingQuery,
        weights: &WeightVector,
    ) -> Result<RankingPage> {
        METRICS.ranking_requests.inc();

        let collected = self.collector.collect_all(weights).await?;

        let mut filtered: Vec<_> = collected
            .into_iter()
            .filter(|s| s.total_score >= query.min_score)
            .filter(|s| query.judgment.map_or(true, |j| s.judgment == j))
            .collect();

        let stats = RankingStats {
            total_strategies: filtered.len(),
            priority_count: filtered
                .iter()
                .filter(|s| s.judgment == Judgment::Priority)
                .count(),
            conditional_count: filtered
                .iter()
                .filter(|s| s.judgment == Judgment::Conditional)
                .count(),
            decline_count: filtered
                .iter()
                .filter(|s| s.judgment == Judgment::Decline)
                .count(),
            avg_score: if filtered.is_empty() {
                0.0
            } else {
                filtered.iter().map(|s| s.total_score).sum::<f64>() / filtered.len() as f64
            },
            top_score: filtered
                .iter()
                .map(|s| s.total_score)
                .fold(0.0, f64::max),
        };

        // Stable sort: equal totals keep their collection order.
        filtered.sort_by(|a, b| {
            b.total_score
                .partial_cmp(&a.total_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let strategies: Vec<RankedStrategy> = filtered
            .into_iter()
            .take(query.limit)
            .enumerate()
            .map(|(i, strategy)| RankedStrategy {
                rank: i as u32 + 1,
                strategy,
            })
            .collect();

        debug!(
            "Ranking returned {} of {} strategies",
            strategies.len(),
            stats.total_strategies
        );

        Ok(RankingPage { strategies, stats })
    }
}
