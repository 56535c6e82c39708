//! Top-strategy archival with composite-key deduplication

use crate::domain::{Judgment, TopStrategy, WeightVector};
use crate::error::Result;
use crate::metrics::METRICS;
use crate::scoring::StrategyCollector;
use crate::store::StrategyStore;
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info};

/// Outcome of one archival pass
///
/// `total` counts every strategy clearing the filter, including ones already
/// archived; `archived` counts only the rows newly inserted by this pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveOutcome {
    pub archived: usize,
    pub total: usize,
}

/// Persists strategies clearing the archival threshold into the durable
/// top-strategy set
///
/// Membership is monotonic: a `(exploration_id, name)` pair enters the
/// archive once and is never re-archived or removed by the pipeline.
/// Deduplication is by composite key only, never by content, so the pass is
/// idempotent and safe to run repeatedly. Under concurrent callers the
/// store's key uniqueness is the safety net, not an application lock.
pub struct ArchiveCurator {
    store: Arc<dyn StrategyStore>,
    collector: Arc<StrategyCollector>,
}

impl ArchiveCurator {
    pub fn new(store: Arc<dyn StrategyStore>, collector: Arc<StrategyCollector>) -> Self {
        Self { store, collector }
    }

    /// Archive every strategy with `total_score >= min_score` that was not
    /// gated to Decline
    pub async fn archive_top_strategies(
        &self,
        min_score: f64,
        weights: &WeightVector,
    ) -> Result<ArchiveOutcome> {
        let collected = self.collector.collect_all(weights).await?;

        // The judgment gate applies on top of the numeric threshold: a
        // strategy can exceed min_score and still be excluded by a gate.
        let qualifying: Vec<_> = collected
            .into_iter()
            .filter(|s| s.total_score >= min_score && s.judgment != Judgment::Decline)
            .collect();
        let total = qualifying.len();

        let existing = self.store.archived_keys().await?;
        let fresh: Vec<TopStrategy> = qualifying
            .into_iter()
            .filter(|s| !existing.contains(&s.key()))
            .map(|s| TopStrategy {
                exploration_id: s.exploration_id,
                name: s.name,
                reason: s.reason,
                how_to_obtain: s.how_to_obtain,
                total_score: s.total_score,
                scores: s.scores,
                question: s.question,
                judgment: s.judgment,
                archived_at: Utc::now(),
            })
            .collect();

        if fresh.is_empty() {
            debug!("Archive pass found {} qualifying, none new", total);
            return Ok(ArchiveOutcome { archived: 0, total });
        }

        let archived = self.store.insert_top_strategies(fresh).await?;
        METRICS.strategies_archived.inc_by(archived as f64);

        info!(
            "Archived {} new strategies ({} qualifying in total)",
            archived, total
        );

        Ok(ArchiveOutcome { archived, total })
    }
}
