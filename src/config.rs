//! Configuration for the strategy engine

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Top-level engine configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EngineConfig {
    /// Scoring and archival thresholds
    #[serde(default)]
    pub scoring: ScoringConfig,

    /// Generation oracle configuration
    #[serde(default)]
    pub oracle: OracleConfig,
}

/// Scoring, ranking, and archival thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Minimum weighted total for a strategy to enter the archive
    #[serde(default = "default_archive_min_score")]
    pub archive_min_score: f64,

    /// Minimum weighted total counted as a high score in baselines.
    /// Intentionally distinct from the archive threshold.
    #[serde(default = "default_high_score_threshold")]
    pub high_score_threshold: f64,

    /// Default number of ranking rows returned when the caller gives no limit
    #[serde(default = "default_ranking_limit")]
    pub default_ranking_limit: usize,

    /// Maximum seed strategies fed into an evolution prompt
    #[serde(default = "default_max_seed_strategies")]
    pub max_seed_strategies: usize,
}

fn default_archive_min_score() -> f64 {
    4.0
}

fn default_high_score_threshold() -> f64 {
    3.5
}

fn default_ranking_limit() -> usize {
    20
}

fn default_max_seed_strategies() -> usize {
    5
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            archive_min_score: default_archive_min_score(),
            high_score_threshold: default_high_score_threshold(),
            default_ranking_limit: default_ranking_limit(),
            max_seed_strategies: default_max_seed_strategies(),
        }
    }
}

/// Generation oracle configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OracleConfig {
    /// Global enable/disable
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Model name
    #[serde(default = "default_model")]
    pub model: String,

    /// API key environment variable
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Chat completions endpoint
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Max tokens per completion
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Retry attempts after the first failure
    #[serde(default = "default_retry_attempts")]
    pub retry_attempts: usize,

    /// Base backoff between retries in milliseconds
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,

    /// Token budget for retrieved reference text in the prompt
    #[serde(default = "default_reference_token_budget")]
    pub reference_token_budget: usize,
}

fn default_enabled() -> bool {
    true
}

fn default_model() -> String {
    "gpt-4".to_string()
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

fn default_api_url() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}

fn default_max_tokens() -> u32 {
    4096
}

fn default_temperature() -> f32 {
    0.7
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_retry_attempts() -> usize {
    2
}

fn default_retry_backoff_ms() -> u64 {
    500
}

fn default_reference_token_budget() -> usize {
    3000
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            model: default_model(),
            api_key_env: default_api_key_env(),
            api_url: default_api_url(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            timeout_secs: default_timeout_secs(),
            retry_attempts: default_retry_attempts(),
            retry_backoff_ms: default_retry_backoff_ms(),
            reference_token_budget: default_reference_token_budget(),
        }
    }
}

impl OracleConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }
}

impl EngineConfig {
    /// Load defaults, then apply environment overrides
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(val) = std::env::var("STRATEGY_ARCHIVE_MIN_SCORE") {
            if let Ok(num) = val.parse() {
                config.scoring.archive_min_score = num;
            }
        }

        if let Ok(val) = std::env::var("STRATEGY_HIGH_SCORE_THRESHOLD") {
            if let Ok(num) = val.parse() {
                config.scoring.high_score_threshold = num;
            }
        }

        if let Ok(val) = std::env::var("ORACLE_ENABLED") {
            config.oracle.enabled = val.to_lowercase() == "true" || val == "1";
        }

        if let Ok(val) = std::env::var("ORACLE_MODEL") {
            config.oracle.model = val;
        }

        if let Ok(val) = std::env::var("ORACLE_API_URL") {
            config.oracle.api_url = val;
        }

        if let Ok(val) = std::env::var("ORACLE_TIMEOUT_SECS") {
            if let Ok(num) = val.parse() {
                config.oracle.timeout_secs = num;
            }
        }

        config
    }

    /// Load from a TOML file, with environment overrides layered on top
    pub fn from_file(path: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::with_name(path))
            .add_source(config::Environment::with_prefix("STRATEGY").separator("__"))
            .build()?
            .try_deserialize()
    }
}
