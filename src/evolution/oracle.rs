//! Generation oracle: trait, HTTP client, and payload parsing
//!
//! The oracle is a black box that turns an assembled prompt into a strategy
//! list. Its output is non-deterministic: sometimes clean JSON, sometimes
//! JSON buried in prose, so parsing is a two-stage strategy (strict parse,
//! then extract the first balanced object and reparse). The client is
//! explicitly constructed and injected; there is no global singleton.

use crate::config::OracleConfig;
use crate::domain::ExplorationResult;
use crate::metrics::METRICS;
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, error, warn};

/// Oracle error types
#[derive(Debug, thiserror::Error)]
pub enum OracleError {
    #[error("generation oracle is disabled")]
    Disabled,

    #[error("request failed: {0}")]
    RequestFailed(String),

    #[error("timeout: {0}")]
    Timeout(String),

    #[error("upstream error: {0}")]
    Upstream(String),

    #[error("oracle returned no content")]
    Empty,

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Black-box strategy generation
#[async_trait]
pub trait GenerationOracle: Send + Sync {
    /// Produce raw completion text for an assembled prompt
    async fn generate(&self, prompt: &str) -> Result<String, OracleError>;
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Deserialize)]
struct Message {
    content: String,
}

/// Chat-completions oracle client with timeout and retry
pub struct HttpOracleClient {
    http: Client,
    config: OracleConfig,
    api_key: SecretString,
}

impl HttpOracleClient {
    /// Create a client from configuration and an explicit API key
    pub fn new(config: OracleConfig, api_key: SecretString) -> Result<Self, OracleError> {
        let http = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| OracleError::RequestFailed(e.to_string()))?;

        Ok(Self {
            http,
            config,
            api_key,
        })
    }

    /// Create a client reading the API key from the configured environment
    /// variable
    pub fn from_env(config: OracleConfig) -> Result<Self, OracleError> {
        let key = std::env::var(&config.api_key_env).map_err(|_| {
            OracleError::RequestFailed(format!("{} is not set", config.api_key_env))
        })?;
        Self::new(config, SecretString::new(key))
    }

    async fn call_chat_api(&self, prompt: &str) -> Result<String, OracleError> {
        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        debug!("Sending generation request ({} chars)", prompt.len());

        let response = self
            .http
            .post(&self.config.api_url)
            .bearer_auth(self.api_key.expose_secret())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    OracleError::Timeout(e.to_string())
                } else {
                    OracleError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            error!("Oracle API error {}: {}", status, text);
            return Err(OracleError::Upstream(format!("Status {}: {}", status, text)));
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| OracleError::InvalidResponse(e.to_string()))?;

        let content = chat_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or(OracleError::Empty)?;

        if content.trim().is_empty() {
            return Err(OracleError::Empty);
        }

        Ok(content)
    }

    /// Exponential backoff for retry attempt `attempt` (1-based)
    fn calculate_backoff(&self, attempt: usize) -> Duration {
        let base = self.config.retry_backoff();
        let multiplier = 2_u32.pow((attempt - 1) as u32);
        base.saturating_mul(multiplier)
    }

    fn is_retryable(error: &OracleError) -> bool {
        match error {
            OracleError::RequestFailed(_) | OracleError::Timeout(_) => true,
            OracleError::Upstream(msg) => msg.starts_with("Status 5"),
            _ => false,
        }
    }
}

#[async_trait]
impl GenerationOracle for HttpOracleClient {
    async fn generate(&self, prompt: &str) -> Result<String, OracleError> {
        if !self.config.enabled {
            return Err(OracleError::Disabled);
        }

        let start = Instant::now();
        let mut attempt = 0;
        let result = loop {
            attempt += 1;

            match self.call_chat_api(prompt).await {
                Ok(content) => break Ok(content),
                Err(e) => {
                    if attempt > self.config.retry_attempts || !Self::is_retryable(&e) {
                        error!("Generation failed after {} attempts: {}", attempt, e);
                        break Err(e);
                    }
                    let backoff = self.calculate_backoff(attempt);
                    warn!(
                        "Generation attempt {} failed: {}, retrying in {:?}",
                        attempt, e, backoff
                    );
                    tokio::time::sleep(backoff).await;
                }
            }
        };

        METRICS.record_oracle_request(result.is_ok());
        METRICS
            .oracle_request_duration
            .with_label_values(&["generate"])
            .observe(start.elapsed().as_secs_f64());

        result
    }
}

/// Parse oracle completion text into a typed exploration result
///
/// Stage one is a strict parse of the full content; stage two extracts the
/// first balanced `{...}` block from surrounding prose and reparses. The
/// second stage is a resilience requirement, not a convenience: oracle
/// output routinely wraps the payload in commentary.
pub fn parse_strategy_payload(content: &str) -> Result<ExplorationResult, OracleError> {
    match serde_json::from_str(content) {
        Ok(result) => return Ok(result),
        Err(first_err) => {
            debug!("Strict parse failed ({}), trying extraction", first_err);
        }
    }

    let block = extract_first_json_object(content)
        .ok_or_else(|| OracleError::InvalidResponse("no JSON object in content".to_string()))?;

    serde_json::from_str(block)
        .map_err(|e| OracleError::InvalidResponse(format!("extracted block did not parse: {}", e)))
}

/// Find the first balanced `{...}` block, respecting string literals and
/// escapes
fn extract_first_json_object(text: &str) -> Option<&str> {
    let bytes = text.as_bytes();
    let start = text.find('{')?;

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, &byte) in bytes[start..].iter().enumerate() {
        if escaped {
            escaped = false;
            continue;
        }
        match byte {
            b'\\' if in_string => escaped = true,
            b'"' => in_string = !in_string,
            b'{' if !in_string => depth += 1,
            b'}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }

    None
}
