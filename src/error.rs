//! Error types for the strategy engine

use crate::evolution::oracle::OracleError;

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, EngineError>;

/// Engine error taxonomy
///
/// Validation errors surface synchronously at the boundary; store and oracle
/// failures carry the upstream message. Background pipeline failures are
/// recorded on the triggering exploration rather than propagated here.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("store error: {0}")]
    Store(String),

    #[error("oracle error: {0}")]
    Oracle(#[from] OracleError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_message() {
        let err = EngineError::Validation("decision must be adopt, reject, or pending".to_string());
        assert!(err.to_string().contains("validation error"));
    }

    #[test]
    fn test_serde_error_conversion() {
        let parse_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: EngineError = parse_err.into();
        assert!(matches!(err, EngineError::Serialization(_)));
    }
}
