//! Seed selection and strategy evolution

use super::prompt::build_evolution_prompt;
use super::runner::ExplorationRunner;
use crate::domain::{Decision, Exploration, WeightVector};
use crate::error::Result;
use crate::scoring::StrategyCollector;
use crate::store::StrategyStore;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// How the next generation is derived from its seeds
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EvolutionMode {
    Mutate,
    Crossover,
    Refute,
}

impl std::fmt::Display for EvolutionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Mutate => "mutate",
            Self::Crossover => "crossover",
            Self::Refute => "refute",
        })
    }
}

/// Where a seed came from
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SeedSource {
    /// Explicit curator adoption
    Adopted,
    /// Automated high-score archive
    Archived,
}

/// A strategy selected as the basis for the next generation
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedStrategy {
    pub name: String,
    pub reason: String,
    pub how_to_obtain: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_score: Option<f64>,
    pub source: SeedSource,
}

/// Produces next-generation strategy candidates from curated seeds
///
/// Seed selection encodes a trust ordering: explicit human adoption outranks
/// the automated high-score archive whenever both are available.
pub struct EvolutionEngine {
    store: Arc<dyn StrategyStore>,
    collector: Arc<StrategyCollector>,
    runner: ExplorationRunner,
}

impl EvolutionEngine {
    pub fn new(
        store: Arc<dyn StrategyStore>,
        collector: Arc<StrategyCollector>,
        runner: ExplorationRunner,
    ) -> Self {
        Self {
            store,
            collector,
            runner,
        }
    }

    /// Select up to `limit` seed strategies
    ///
    /// Adopted decisions come first, most recently updated first and
    /// deduplicated by strategy name. An adopted decision whose strategy is
    /// no longer collectible is skipped. Only when adoption yields nothing
    /// does selection fall back to the archive, ordered by total score.
    pub async fn select_seed_strategies(
        &self,
        limit: usize,
        weights: &WeightVector,
    ) -> Result<Vec<SeedStrategy>> {
        let adopted = self.store.list_decisions(Some(Decision::Adopt)).await?;

        if !adopted.is_empty() {
            let collected = self.collector.collect_all(weights).await?;
            let by_key: HashMap<(Uuid, String), usize> = collected
                .iter()
                .enumerate()
                .map(|(i, s)| (s.key(), i))
                .collect();

            let mut seeds: IndexMap<String, SeedStrategy> = IndexMap::new();
            for decision in adopted {
                if seeds.len() >= limit {
                    break;
                }
                if seeds.contains_key(&decision.strategy_name) {
                    continue;
                }
                let Some(&idx) = by_key.get(&decision.key()) else {
                    warn!(
                        "Adopted strategy ({}, {}) is no longer collectible; skipping",
                        decision.exploration_id, decision.strategy_name
                    );
                    continue;
                };
                let strategy = &collected[idx];
                seeds.insert(
                    decision.strategy_name.clone(),
                    SeedStrategy {
                        name: strategy.name.clone(),
                        reason: strategy.reason.clone(),
                        how_to_obtain: strategy.how_to_obtain.clone(),
                        total_score: Some(strategy.total_score),
                        source: SeedSource::Adopted,
                    },
                );
            }

            if !seeds.is_empty() {
                return Ok(seeds.into_values().collect());
            }
        }

        let archived = self.store.list_top_strategies(limit).await?;
        Ok(archived
            .into_iter()
            .map(|row| SeedStrategy {
                name: row.name,
                reason: row.reason,
                how_to_obtain: row.how_to_obtain,
                total_score: Some(row.total_score),
                source: SeedSource::Archived,
            })
            .collect())
    }

    /// Evolve the selected seeds into a new exploration
    ///
    /// Returns `None` when no seeds exist; an empty seed pool is a
    /// legitimate outcome, not an error.
    pub async fn evolve(
        &self,
        mode: EvolutionMode,
        seed_limit: usize,
        weights: &WeightVector,
    ) -> Result<Option<Exploration>> {
        let seeds = self.select_seed_strategies(seed_limit, weights).await?;
        if seeds.is_empty() {
            info!("No seed strategies available; evolution skipped");
            return Ok(None);
        }

        info!(
            "Evolving {} seed strategies via {}",
            seeds.len(),
            mode
        );

        let prompt = build_evolution_prompt(&seeds, mode);
        let question = format!("Evolve ({}) {} seed strategies", mode, seeds.len());
        let exploration = Exploration::new(question, String::new());

        let finished = self.runner.run_seeded(exploration, prompt).await?;
        Ok(Some(finished))
    }
}
