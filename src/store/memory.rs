//! In-memory store implementation
//!
//! Used by tests and as the default backing for local composition roots.
//! Explorations, archive rows, and decisions live in insertion-ordered maps
//! because downstream reads depend on a stable iteration order (ranking tie
//! breaks, archive ordering, decision recency tie breaks).

use super::StrategyStore;
use crate::domain::{
    Decision, Exploration, ExplorationStatus, ScoreBaseline, StrategyDecision, TopStrategy,
    WeightVector,
};
use crate::error::{EngineError, Result};
use async_trait::async_trait;
use dashmap::DashMap;
use indexmap::IndexMap;
use std::collections::HashSet;
use tokio::sync::RwLock;
use tracing::{debug, warn};
use uuid::Uuid;

/// In-memory [`StrategyStore`]
#[derive(Default)]
pub struct InMemoryStore {
    explorations: RwLock<IndexMap<Uuid, Exploration>>,
    baselines: RwLock<Vec<ScoreBaseline>>,
    top_strategies: RwLock<IndexMap<(Uuid, String), TopStrategy>>,
    decisions: RwLock<IndexMap<(Uuid, String), StrategyDecision>>,
    weights: DashMap<String, WeightVector>,
    services: RwLock<Vec<String>>,
    assets: RwLock<Vec<String>>,
    constraints: RwLock<Vec<String>>,
    reference_docs: RwLock<Vec<String>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the company profile used for prompt assembly
    pub async fn seed_profile(
        &self,
        services: Vec<String>,
        assets: Vec<String>,
        constraints: Vec<String>,
    ) {
        *self.services.write().await = services;
        *self.assets.write().await = assets;
        *self.constraints.write().await = constraints;
    }

    /// Seed the reference document corpus
    pub async fn seed_reference_docs(&self, docs: Vec<String>) {
        *self.reference_docs.write().await = docs;
    }

    /// Total number of archive rows (test observability)
    pub async fn top_strategy_count(&self) -> usize {
        self.top_strategies.read().await.len()
    }
}

#[async_trait]
impl StrategyStore for InMemoryStore {
    async fn insert_exploration(&self, exploration: Exploration) -> Result<()> {
        debug!("Inserting exploration {}", exploration.id);
        self.explorations
            .write()
            .await
            .insert(exploration.id, exploration);
        Ok(())
    }

    async fn finish_exploration(
        &self,
        id: Uuid,
        status: ExplorationStatus,
        result: Option<serde_json::Value>,
        error: Option<String>,
    ) -> Result<()> {
        let mut explorations = self.explorations.write().await;
        let exploration = explorations
            .get_mut(&id)
            .ok_or_else(|| EngineError::Store(format!("Unknown exploration: {}", id)))?;

        if exploration.status != ExplorationStatus::Processing {
            return Err(EngineError::Store(format!(
                "Exploration {} already finished as {:?}",
                id, exploration.status
            )));
        }

        exploration.status = status;
        exploration.result = result;
        exploration.error = error;
        Ok(())
    }

    async fn get_exploration(&self, id: Uuid) -> Result<Option<Exploration>> {
        Ok(self.explorations.read().await.get(&id).cloned())
    }

    async fn list_completed_explorations(&self) -> Result<Vec<Exploration>> {
        Ok(self
            .explorations
            .read()
            .await
            .values()
            .filter(|e| e.status == ExplorationStatus::Completed)
            .cloned()
            .collect())
    }

    async fn insert_baseline(&self, baseline: ScoreBaseline) -> Result<()> {
        self.baselines.write().await.push(baseline);
        Ok(())
    }

    async fn latest_baseline(&self) -> Result<Option<ScoreBaseline>> {
        Ok(self
            .baselines
            .read()
            .await
            .iter()
            .max_by_key(|b| b.date)
            .cloned())
    }

    async fn baseline_history(&self, limit: usize) -> Result<Vec<ScoreBaseline>> {
        let mut history: Vec<ScoreBaseline> = self.baselines.read().await.clone();
        history.sort_by(|a, b| b.date.cmp(&a.date));
        history.truncate(limit);
        Ok(history)
    }

    async fn archived_keys(&self) -> Result<HashSet<(Uuid, String)>> {
        Ok(self.top_strategies.read().await.keys().cloned().collect())
    }

    async fn insert_top_strategies(&self, rows: Vec<TopStrategy>) -> Result<usize> {
        let mut archive = self.top_strategies.write().await;
        let mut inserted = 0;

        for row in rows {
            let key = row.key();
            if archive.contains_key(&key) {
                warn!(
                    "Duplicate archive row ignored: ({}, {})",
                    key.0, key.1
                );
                continue;
            }
            archive.insert(key, row);
            inserted += 1;
        }

        Ok(inserted)
    }

    async fn list_top_strategies(&self, limit: usize) -> Result<Vec<TopStrategy>> {
        let mut rows: Vec<TopStrategy> =
            self.top_strategies.read().await.values().cloned().collect();
        rows.sort_by(|a, b| {
            b.total_score
                .partial_cmp(&a.total_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        rows.truncate(limit);
        Ok(rows)
    }

    async fn delete_top_strategy(&self, exploration_id: Uuid, name: &str) -> Result<bool> {
        Ok(self
            .top_strategies
            .write()
            .await
            .shift_remove(&(exploration_id, name.to_string()))
            .is_some())
    }

    async fn upsert_decision(&self, decision: StrategyDecision) -> Result<()> {
        self.decisions
            .write()
            .await
            .insert(decision.key(), decision);
        Ok(())
    }

    async fn list_decisions(&self, filter: Option<Decision>) -> Result<Vec<StrategyDecision>> {
        let decisions = self.decisions.read().await;
        let mut rows: Vec<(usize, StrategyDecision)> = decisions
            .values()
            .enumerate()
            .filter(|(_, d)| filter.map_or(true, |f| d.decision == f))
            .map(|(i, d)| (i, d.clone()))
            .collect();
        // Most recently updated first; later insertion wins ties.
        rows.sort_by(|(ia, a), (ib, b)| b.updated_at.cmp(&a.updated_at).then(ib.cmp(ia)));
        Ok(rows.into_iter().map(|(_, d)| d).collect())
    }

    async fn get_weights(&self, user_id: &str) -> Result<Option<WeightVector>> {
        Ok(self.weights.get(user_id).map(|w| *w))
    }

    async fn set_weights(&self, user_id: &str, weights: WeightVector) -> Result<()> {
        self.weights.insert(user_id.to_string(), weights);
        Ok(())
    }

    async fn list_services(&self) -> Result<Vec<String>> {
        Ok(self.services.read().await.clone())
    }

    async fn list_assets(&self) -> Result<Vec<String>> {
        Ok(self.assets.read().await.clone())
    }

    async fn list_constraints(&self) -> Result<Vec<String>> {
        Ok(self.constraints.read().await.clone())
    }

    async fn search_reference(&self, query: &str, limit: usize) -> Result<Vec<String>> {
        let needles: Vec<String> = query
            .split_whitespace()
            .map(|w| w.to_lowercase())
            .collect();
        let docs = self.reference_docs.read().await;
        let mut matches: Vec<String> = docs
            .iter()
            .filter(|doc| {
                let haystack = doc.to_lowercase();
                needles.iter().any(|n| haystack.contains(n))
            })
            .cloned()
            .collect();
        matches.truncate(limit);
        Ok(matches)
    }
}
