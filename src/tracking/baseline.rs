//! Score baseline recording and history

use crate::domain::{ScoreBaseline, WeightVector};
use crate::error::Result;
use crate::metrics::METRICS;
use crate::scoring::StrategyCollector;
use crate::store::StrategyStore;
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info};

/// Records dated aggregate snapshots over the strategy population
///
/// Baselines are append-only and informational; the read-then-write sequence
/// is not transactional, so concurrent callers can produce a duplicate
/// snapshot. That race is accepted: nothing downstream relies on baselines
/// for correctness.
pub struct BaselineTracker {
    store: Arc<dyn StrategyStore>,
    collector: Arc<StrategyCollector>,
    /// Weighted total counted as a high score; deliberately distinct from
    /// the archive threshold.
    high_score_threshold: f64,
}

impl BaselineTracker {
    pub fn new(
        store: Arc<dyn StrategyStore>,
        collector: Arc<StrategyCollector>,
        high_score_threshold: f64,
    ) -> Self {
        Self {
            store,
            collector,
            high_score_threshold,
        }
    }

    /// Record a new baseline over the current population
    ///
    /// Returns `None` when no strategies exist; nothing to measure, nothing
    /// written.
    pub async fn record_baseline(
        &self,
        run_id: Option<String>,
        weights: &WeightVector,
    ) -> Result<Option<ScoreBaseline>> {
        let strategies = self.collector.collect_all(weights).await?;
        if strategies.is_empty() {
            debug!("No strategies available; baseline not recorded");
            return Ok(None);
        }

        let top_score = strategies
            .iter()
            .map(|s| s.total_score)
            .fold(0.0, f64::max);
        let avg_score =
            strategies.iter().map(|s| s.total_score).sum::<f64>() / strategies.len() as f64;
        let high_score_count = strategies
            .iter()
            .filter(|s| s.total_score >= self.high_score_threshold)
            .count();

        let prior = self.store.latest_baseline().await?;
        let improvement = prior.as_ref().and_then(|p| {
            if p.top_score > 0.0 {
                Some((top_score - p.top_score) / p.top_score * 100.0)
            } else {
                None
            }
        });

        let baseline = ScoreBaseline {
            date: Utc::now(),
            top_score,
            avg_score,
            total_strategies: strategies.len(),
            high_score_count,
            improvement,
            run_id,
        };

        self.store.insert_baseline(baseline.clone()).await?;
        METRICS.baselines_recorded.inc();

        info!(
            "Baseline recorded: top={:.2} avg={:.2} high={} total={} improvement={:?}",
            baseline.top_score,
            baseline.avg_score,
            baseline.high_score_count,
            baseline.total_strategies,
            baseline.improvement
        );

        Ok(Some(baseline))
    }

    /// Most recent baseline by date
    pub async fn current_baseline(&self) -> Result<Option<ScoreBaseline>> {
        self.store.latest_baseline().await
    }

    /// Most recent `limit` baselines, newest first
    pub async fn baseline_history(&self, limit: usize) -> Result<Vec<ScoreBaseline>> {
        self.store.baseline_history(limit).await
    }
}
