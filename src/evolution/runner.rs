//! Exploration pipeline: context fan-out, oracle call, status transitions

use super::budget::TokenEstimator;
use super::oracle::{parse_strategy_payload, GenerationOracle};
use super::prompt::{build_exploration_prompt, PromptContext};
use crate::domain::{Exploration, ExplorationStatus};
use crate::error::{EngineError, Result};
use crate::metrics::METRICS;
use crate::store::StrategyStore;
use anyhow::Context;
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

/// Reference documents retrieved per exploration before budget capping
const MAX_REFERENCE_DOCS: usize = 10;

/// Request to generate strategies for a question
#[derive(Debug, Clone)]
pub struct ExploreRequest {
    pub question: String,
    pub context: String,
}

/// Drives one exploration from Processing to Completed or Failed
///
/// The exploration record is the unit of durability: whatever happens to the
/// oracle call, the record ends in a well-defined state with either a result
/// payload or an error string. There is no cancellation of an in-flight
/// oracle call; failures are observed on the call itself.
#[derive(Clone)]
pub struct ExplorationRunner {
    store: Arc<dyn StrategyStore>,
    oracle: Arc<dyn GenerationOracle>,
    estimator: Arc<dyn TokenEstimator>,
    reference_token_budget: usize,
}

impl ExplorationRunner {
    pub fn new(
        store: Arc<dyn StrategyStore>,
        oracle: Arc<dyn GenerationOracle>,
        estimator: Arc<dyn TokenEstimator>,
        reference_token_budget: usize,
    ) -> Self {
        Self {
            store,
            oracle,
            estimator,
            reference_token_budget,
        }
    }

    /// Run an exploration to completion and return the finished record
    pub async fn explore(&self, request: ExploreRequest) -> Result<Exploration> {
        let exploration = Exploration::new(request.question, request.context);
        let id = exploration.id;
        info!("Starting exploration {}: {}", id, exploration.question);

        let question = exploration.question.clone();
        let context = exploration.context.clone();
        self.store.insert_exploration(exploration).await?;

        self.drive(id, &question, &context).await;
        self.finished(id).await
    }

    /// Start an exploration detached; the record's status reflects progress
    ///
    /// Returns the id immediately while generation continues on the runtime.
    pub async fn explore_background(&self, request: ExploreRequest) -> Result<Uuid> {
        let exploration = Exploration::new(request.question, request.context);
        let id = exploration.id;
        info!("Starting background exploration {}", id);

        let question = exploration.question.clone();
        let context = exploration.context.clone();
        self.store.insert_exploration(exploration).await?;

        let runner = self.clone();
        tokio::spawn(async move {
            runner.drive(id, &question, &context).await;
        });

        Ok(id)
    }

    /// Run an already-shaped exploration against a prebuilt prompt
    ///
    /// Used by the evolution engine, whose prompt comes from seed strategies
    /// rather than the fan-out context reads.
    pub(crate) async fn run_seeded(
        &self,
        exploration: Exploration,
        prompt: String,
    ) -> Result<Exploration> {
        let id = exploration.id;
        self.store.insert_exploration(exploration).await?;

        let outcome = self.generate_from_prompt(&prompt).await;
        self.record_outcome(id, outcome).await;
        self.finished(id).await
    }

    async fn drive(&self, id: Uuid, question: &str, context: &str) {
        let outcome = self.generate(question, context).await;
        self.record_outcome(id, outcome).await;
    }

    /// Assemble the prompt and call the oracle
    async fn generate(&self, question: &str, context: &str) -> anyhow::Result<serde_json::Value> {
        // The four context reads are mutually independent; dispatch them
        // concurrently and await jointly.
        let (services, assets, constraints, reference_docs) = futures::join!(
            self.store.list_services(),
            self.store.list_assets(),
            self.store.list_constraints(),
            self.store.search_reference(question, MAX_REFERENCE_DOCS),
        );

        let prompt_context = PromptContext {
            services: services.context("failed to load services")?,
            assets: assets.context("failed to load assets")?,
            constraints: constraints.context("failed to load constraints")?,
            reference_docs: reference_docs.context("failed to search reference docs")?,
        };

        let prompt = build_exploration_prompt(
            question,
            context,
            &prompt_context,
            self.reference_token_budget,
            self.estimator.as_ref(),
        );

        self.generate_from_prompt(&prompt).await
    }

    async fn generate_from_prompt(&self, prompt: &str) -> anyhow::Result<serde_json::Value> {
        let content = self
            .oracle
            .generate(prompt)
            .await
            .context("generation oracle call failed")?;

        let result = parse_strategy_payload(&content).context("oracle payload did not parse")?;

        serde_json::to_value(result).context("failed to encode result payload")
    }

    /// Record the outcome on the exploration; the record always ends in a
    /// well-defined state
    async fn record_outcome(&self, id: Uuid, outcome: anyhow::Result<serde_json::Value>) {
        let write = match outcome {
            Ok(payload) => {
                METRICS.record_exploration(true);
                info!("Exploration {} completed", id);
                self.store
                    .finish_exploration(id, ExplorationStatus::Completed, Some(payload), None)
                    .await
            }
            Err(e) => {
                METRICS.record_exploration(false);
                error!("Exploration {} failed: {:#}", id, e);
                self.store
                    .finish_exploration(id, ExplorationStatus::Failed, None, Some(format!("{:#}", e)))
                    .await
            }
        };

        if let Err(e) = write {
            error!("Failed to record exploration {} outcome: {}", id, e);
        }
    }

    async fn finished(&self, id: Uuid) -> Result<Exploration> {
        self.store
            .get_exploration(id)
            .await?
            .ok_or_else(|| EngineError::Internal(format!("exploration {} vanished", id)))
    }
}
