//! Baseline snapshots and top-strategy archival
//!
//! The write side of the feedback loop: dated aggregate snapshots for
//! measuring improvement over time, and the durable archive of strategies
//! that cleared the score bar.

pub mod archive;
pub mod baseline;

pub use archive::{ArchiveCurator, ArchiveOutcome};
pub use baseline::BaselineTracker;
