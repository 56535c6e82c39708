//! Domain model for strategy exploration, scoring, and curation

pub mod exploration;
pub mod records;
pub mod scores;
pub mod strategy;

pub use exploration::{Exploration, ExplorationResult, ExplorationStatus};
pub use records::{
    Decision, EnrichedStrategy, RankedStrategy, ScoreBaseline, StrategyDecision, TopStrategy,
};
pub use scores::{StrategyScores, WeightVector};
pub use strategy::{Confidence, Judgment, Strategy};
