//! Per-user weight configuration

use crate::domain::WeightVector;
use crate::error::{EngineError, Result};
use crate::store::StrategyStore;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

/// Incoming weight configuration, six fields each in [0, 100]
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightConfigRequest {
    pub revenue_potential: u32,
    pub time_to_revenue: u32,
    pub competitive_advantage: u32,
    pub execution_feasibility: u32,
    pub hq_contribution: u32,
    pub merger_synergy: u32,
}

impl From<WeightConfigRequest> for WeightVector {
    fn from(request: WeightConfigRequest) -> Self {
        Self {
            revenue_potential: request.revenue_potential,
            time_to_revenue: request.time_to_revenue,
            competitive_advantage: request.competitive_advantage,
            execution_feasibility: request.execution_feasibility,
            hq_contribution: request.hq_contribution,
            merger_synergy: request.merger_synergy,
        }
    }
}

/// Resolves and stores per-user weight vectors
///
/// Absent configuration means the documented default vector; callers resolve
/// the effective vector here and pass it into the scoring components, which
/// keeps every read reflect the weights at call time.
pub struct WeightService {
    store: Arc<dyn StrategyStore>,
}

impl WeightService {
    pub fn new(store: Arc<dyn StrategyStore>) -> Self {
        Self { store }
    }

    /// The user's configured vector, or the default when unset
    pub async fn weights_for(&self, user_id: &str) -> Result<WeightVector> {
        Ok(self
            .store
            .get_weights(user_id)
            .await?
            .unwrap_or_default())
    }

    /// Validate and store a user's weight vector
    pub async fn set_weights(
        &self,
        user_id: &str,
        request: WeightConfigRequest,
    ) -> Result<WeightVector> {
        let weights: WeightVector = request.into();
        if !weights.is_valid() {
            return Err(EngineError::Validation(
                "each weight must lie in [0, 100]".to_string(),
            ));
        }

        self.store.set_weights(user_id, weights).await?;
        info!("Weights updated for user {}", user_id);
        Ok(weights)
    }
}
