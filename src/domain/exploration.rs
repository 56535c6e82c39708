//! Exploration records: one strategic question and its generated candidates

use super::strategy::Strategy;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Exploration lifecycle status
///
/// Transitions exactly once, from Processing to Completed (with a result) or
/// Failed (with an error string); immutable thereafter.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ExplorationStatus {
    Processing,
    Completed,
    Failed,
}

/// One user-submitted question plus its full generation outcome
///
/// `result` holds the raw payload as delivered by the oracle. The typed
/// decode into [`ExplorationResult`] happens at read time in the collector,
/// so one malformed historical payload cannot poison reads across the rest
/// of history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exploration {
    pub id: Uuid,
    pub question: String,
    #[serde(default)]
    pub context: String,
    pub status: ExplorationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Exploration {
    /// Create a new exploration in Processing state
    pub fn new(question: String, context: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            question,
            context,
            status: ExplorationStatus::Processing,
            result: None,
            error: None,
            created_at: Utc::now(),
        }
    }

    /// Decode the stored result payload into its typed shape
    pub fn decoded_result(&self) -> Option<serde_json::Result<ExplorationResult>> {
        self.result
            .as_ref()
            .map(|value| serde_json::from_value(value.clone()))
    }
}

/// Typed shape of a completed exploration's payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplorationResult {
    #[serde(default)]
    pub strategies: Vec<Strategy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thinking_process: Option<String>,
}
