//! Curator-facing surfaces: decisions and weight configuration
//!
//! Both services validate at the boundary; invalid input never reaches the
//! scoring or ranking logic.

pub mod decisions;
pub mod weights;

pub use decisions::{DecisionRequest, DecisionService};
pub use weights::{WeightConfigRequest, WeightService};
