//! Strategy collection across exploration history

use super::calculator::{classify, compute_total_score};
use crate::domain::{EnrichedStrategy, WeightVector};
use crate::error::Result;
use crate::metrics::METRICS;
use crate::store::StrategyStore;
use std::sync::Arc;
use tracing::{debug, warn};

/// Gathers every scored strategy across completed explorations
///
/// Collection is fail-soft: an exploration whose payload does not decode is
/// logged and skipped in full, and strategies without a score vector are
/// skipped silently. One corrupt history record never aborts collection for
/// the rest of history.
pub struct StrategyCollector {
    store: Arc<dyn StrategyStore>,
}

impl StrategyCollector {
    pub fn new(store: Arc<dyn StrategyStore>) -> Self {
        Self { store }
    }

    /// Collect all rankable strategies, enriched with score, judgment, and
    /// provenance, in store iteration order
    pub async fn collect_all(&self, weights: &WeightVector) -> Result<Vec<EnrichedStrategy>> {
        let explorations = self.store.list_completed_explorations().await?;

        let mut collected = Vec::new();
        let mut skipped_payloads = 0usize;

        for exploration in &explorations {
            let result = match exploration.decoded_result() {
                Some(Ok(result)) => result,
                Some(Err(e)) => {
                    warn!(
                        "Skipping exploration {} with unparseable result payload: {}",
                        exploration.id, e
                    );
                    skipped_payloads += 1;
                    continue;
                }
                None => {
                    // Completed without a payload; nothing to collect.
                    continue;
                }
            };

            for strategy in result.strategies {
                let Some(scores) = strategy.scores else {
                    // Unscored strategies cannot be ranked.
                    continue;
                };

                let total_score = compute_total_score(&scores, weights);
                let judgment = classify(&scores, weights);

                collected.push(EnrichedStrategy {
                    exploration_id: exploration.id,
                    name: strategy.name,
                    reason: strategy.reason,
                    how_to_obtain: strategy.how_to_obtain,
                    metrics: strategy.metrics,
                    confidence: strategy.confidence,
                    tags: strategy.tags,
                    scores,
                    total_score,
                    judgment,
                    question: exploration.question.clone(),
                    exploration_date: exploration.created_at,
                });
            }
        }

        debug!(
            "Collected {} strategies from {} explorations ({} payloads skipped)",
            collected.len(),
            explorations.len(),
            skipped_payloads
        );
        METRICS.record_collection(collected.len(), skipped_payloads);

        Ok(collected)
    }
}
