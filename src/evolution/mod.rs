//! Strategy generation and evolution
//!
//! Everything that touches the generation oracle lives here: the oracle
//! client itself, prompt assembly with its token budget, the exploration
//! pipeline, and the evolution engine that breeds new candidates from
//! curated seeds.

pub mod budget;
pub mod engine;
pub mod oracle;
pub mod prompt;
pub mod runner;

pub use budget::{default_estimator, TokenEstimator};
pub use engine::{EvolutionEngine, EvolutionMode, SeedSource, SeedStrategy};
pub use oracle::{parse_strategy_payload, GenerationOracle, HttpOracleClient, OracleError};
pub use prompt::PromptContext;
pub use runner::{ExplorationRunner, ExploreRequest};
