//! Curator decisions on individual strategies

use crate::domain::{Decision, StrategyDecision};
use crate::error::{EngineError, Result};
use crate::metrics::METRICS;
use crate::store::StrategyStore;
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Incoming decision upsert
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionRequest {
    pub exploration_id: Uuid,
    pub strategy_name: String,
    /// Must be one of `adopt`, `reject`, `pending`
    pub decision: String,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub feasibility_note: Option<String>,
}

/// Records adopt/reject/pending verdicts, keyed by `(exploration, name)`
pub struct DecisionService {
    store: Arc<dyn StrategyStore>,
}

impl DecisionService {
    pub fn new(store: Arc<dyn StrategyStore>) -> Self {
        Self { store }
    }

    /// Validate and upsert a decision
    ///
    /// An unknown decision label is a validation error surfaced to the
    /// caller; it never reaches the store.
    pub async fn record(&self, request: DecisionRequest) -> Result<StrategyDecision> {
        let decision = Decision::parse(&request.decision).ok_or_else(|| {
            EngineError::Validation(format!(
                "decision must be adopt, reject, or pending; got '{}'",
                request.decision
            ))
        })?;

        if request.strategy_name.trim().is_empty() {
            return Err(EngineError::Validation(
                "strategy name must not be empty".to_string(),
            ));
        }

        let row = StrategyDecision {
            exploration_id: request.exploration_id,
            strategy_name: request.strategy_name,
            decision,
            reason: request.reason,
            feasibility_note: request.feasibility_note,
            updated_at: Utc::now(),
        };

        self.store.upsert_decision(row.clone()).await?;
        METRICS.record_decision(&request.decision);

        info!(
            "Decision recorded: ({}, {}) -> {:?}",
            row.exploration_id, row.strategy_name, row.decision
        );

        Ok(row)
    }

    /// All decisions matching the filter, most recent first
    pub async fn list(&self, filter: Option<Decision>) -> Result<Vec<StrategyDecision>> {
        self.store.list_decisions(filter).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryStore;

    fn request(name: &str, decision: &str) -> DecisionRequest {
        DecisionRequest {
            exploration_id: Uuid::new_v4(),
            strategy_name: name.to_string(),
            decision: decision.to_string(),
            reason: None,
            feasibility_note: None,
        }
    }

    #[tokio::test]
    async fn test_invalid_label_is_rejected_at_the_boundary() {
        let service = DecisionService::new(Arc::new(InMemoryStore::new()));
        let result = service.record(request("S", "approve")).await;
        assert!(matches!(result, Err(EngineError::Validation(_))));
        assert!(service.list(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_upsert_replaces_by_composite_key() {
        let store = Arc::new(InMemoryStore::new());
        let service = DecisionService::new(store);

        let exploration_id = Uuid::new_v4();
        let mut first = request("S", "pending");
        first.exploration_id = exploration_id;
        service.record(first).await.unwrap();

        let mut second = request("S", "adopt");
        second.exploration_id = exploration_id;
        second.reason = Some("Strong fit".to_string());
        service.record(second).await.unwrap();

        let all = service.list(None).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].decision, Decision::Adopt);
        assert_eq!(all[0].reason.as_deref(), Some("Strong fit"));
    }

    #[tokio::test]
    async fn test_empty_strategy_name_is_rejected() {
        let service = DecisionService::new(Arc::new(InMemoryStore::new()));
        let result = service.record(request("  ", "adopt")).await;
        assert!(matches!(result, Err(EngineError::Validation(_))));
    }
}
