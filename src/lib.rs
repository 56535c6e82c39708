//! Strategy scoring, ranking, and self-improvement feedback loop
//!
//! This crate implements the core of a strategy-brainstorming system:
//! weighted multi-axis scoring with judgment gates, collection and ranking
//! over exploration history, dated baseline snapshots, a deduplicated
//! top-strategy archive, curator decisions and per-user weights, and an
//! evolution engine that breeds next-generation candidates from curated
//! seeds through an injected generation oracle.

pub mod config;
pub mod curation;
pub mod domain;
pub mod error;
pub mod evolution;
pub mod metrics;
pub mod scoring;
pub mod store;
pub mod telemetry;
pub mod tracking;

pub use config::{EngineConfig, OracleConfig, ScoringConfig};
pub use curation::{DecisionService, WeightService};
pub use domain::{
    Decision, EnrichedStrategy, Exploration, ExplorationResult, ExplorationStatus, Judgment,
    RankedStrategy, ScoreBaseline, Strategy, StrategyDecision, StrategyScores, TopStrategy,
    WeightVector,
};
pub use error::{EngineError, Result};
pub use evolution::{
    EvolutionEngine, EvolutionMode, ExplorationRunner, ExploreRequest, GenerationOracle,
    HttpOracleClient, OracleError, SeedStrategy,
};
pub use scoring::{
    classify, compute_total_score, RankingPage, RankingQuery, RankingService, RankingStats,
    StrategyCollector,
};
pub use store::{InMemoryStore, StrategyStore};
pub use tracking::{ArchiveCurator, ArchiveOutcome, BaselineTracker};

use std::sync::Arc;
use tracing::info;

/// Fully wired engine: one instance per process, components share the store
/// and oracle injected here
pub struct StrategyEngine {
    pub collector: Arc<StrategyCollector>,
    pub ranking: RankingService,
    pub baselines: BaselineTracker,
    pub archive: ArchiveCurator,
    pub decisions: DecisionService,
    pub weights: WeightService,
    pub runner: ExplorationRunner,
    pub evolution: EvolutionEngine,
    pub config: EngineConfig,
}

impl StrategyEngine {
    /// Wire all components around an injected store and oracle
    pub fn new(
        store: Arc<dyn StrategyStore>,
        oracle: Arc<dyn GenerationOracle>,
        config: EngineConfig,
    ) -> Self {
        info!("Initializing strategy engine");

        let collector = Arc::new(StrategyCollector::new(store.clone()));
        let runner = ExplorationRunner::new(
            store.clone(),
            oracle,
            evolution::default_estimator(),
            config.oracle.reference_token_budget,
        );

        Self {
            ranking: RankingService::new(collector.clone()),
            baselines: BaselineTracker::new(
                store.clone(),
                collector.clone(),
                config.scoring.high_score_threshold,
            ),
            archive: ArchiveCurator::new(store.clone(), collector.clone()),
            decisions: DecisionService::new(store.clone()),
            weights: WeightService::new(store.clone()),
            evolution: EvolutionEngine::new(store, collector.clone(), runner.clone()),
            collector,
            runner,
            config,
        }
    }
}
