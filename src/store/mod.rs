//! Persistence abstraction for the strategy engine
//!
//! The engine never talks to a concrete database; every component takes a
//! [`StrategyStore`] trait object. The contract is CRUD plus
//! upsert-by-composite-key, append-only inserts, and ordered reads. All
//! mutation tolerates concurrent writers: upserts are last-write-wins and
//! the archive's composite-key uniqueness is enforced by the store itself.

pub mod memory;

use crate::domain::{
    Decision, Exploration, ExplorationStatus, ScoreBaseline, StrategyDecision, TopStrategy,
    WeightVector,
};
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashSet;
use uuid::Uuid;

pub use memory::InMemoryStore;

/// Persistence operations required by the engine
#[async_trait]
pub trait StrategyStore: Send + Sync {
    // --- Explorations ---

    /// Insert a new exploration record
    async fn insert_exploration(&self, exploration: Exploration) -> Result<()>;

    /// Transition an exploration out of Processing, exactly once
    async fn finish_exploration(
        &self,
        id: Uuid,
        status: ExplorationStatus,
        result: Option<serde_json::Value>,
        error: Option<String>,
    ) -> Result<()>;

    async fn get_exploration(&self, id: Uuid) -> Result<Option<Exploration>>;

    /// All completed explorations, in creation order
    async fn list_completed_explorations(&self) -> Result<Vec<Exploration>>;

    // --- Baselines (append-only) ---

    async fn insert_baseline(&self, baseline: ScoreBaseline) -> Result<()>;

    /// Most recent baseline by date
    async fn latest_baseline(&self) -> Result<Option<ScoreBaseline>>;

    /// Most recent `limit` baselines, descending by date
    async fn baseline_history(&self, limit: usize) -> Result<Vec<ScoreBaseline>>;

    // --- Top-strategy archive ---

    /// Composite keys of every archived strategy
    async fn archived_keys(&self) -> Result<HashSet<(Uuid, String)>>;

    /// Bulk-insert archive rows, silently ignoring rows whose composite key
    /// already exists. Returns the number actually inserted.
    async fn insert_top_strategies(&self, rows: Vec<TopStrategy>) -> Result<usize>;

    /// Archive entries ordered by total score descending, capped at `limit`
    async fn list_top_strategies(&self, limit: usize) -> Result<Vec<TopStrategy>>;

    /// Explicit user deletion of one archive entry
    async fn delete_top_strategy(&self, exploration_id: Uuid, name: &str) -> Result<bool>;

    // --- Decisions ---

    /// Upsert keyed on `(exploration_id, strategy_name)`
    async fn upsert_decision(&self, decision: StrategyDecision) -> Result<()>;

    /// Decisions matching `filter` (all when `None`), most recently updated
    /// first
    async fn list_decisions(&self, filter: Option<Decision>) -> Result<Vec<StrategyDecision>>;

    // --- Per-user weight configuration ---

    async fn get_weights(&self, user_id: &str) -> Result<Option<WeightVector>>;

    async fn set_weights(&self, user_id: &str, weights: WeightVector) -> Result<()>;

    // --- Prompt context reads (company profile + RAG) ---

    async fn list_services(&self) -> Result<Vec<String>>;

    async fn list_assets(&self) -> Result<Vec<String>>;

    async fn list_constraints(&self) -> Result<Vec<String>>;

    /// Reference documents relevant to `query`, best match first
    async fn search_reference(&self, query: &str, limit: usize) -> Result<Vec<String>>;
}
