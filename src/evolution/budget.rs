//! Token budgeting for prompt assembly

use std::sync::Arc;
use tiktoken_rs::{cl100k_base, CoreBPE};

/// Token estimation for prompt budgeting
pub trait TokenEstimator: Send + Sync {
    /// Estimate the number of tokens in the given text
    fn estimate(&self, text: &str) -> usize;
}

/// Tiktoken-based estimator using cl100k_base
pub struct TiktokenEstimator {
    bpe: Arc<CoreBPE>,
}

impl TiktokenEstimator {
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let bpe = cl100k_base()?;
        Ok(Self { bpe: Arc::new(bpe) })
    }
}

impl TokenEstimator for TiktokenEstimator {
    fn estimate(&self, text: &str) -> usize {
        self.bpe.encode_with_special_tokens(text).len()
    }
}

/// Word-based estimator (fallback, ~1.3 tokens per word)
pub struct WordBasedEstimator {
    tokens_per_word: f64,
}

impl WordBasedEstimator {
    pub fn new(tokens_per_word: f64) -> Self {
        Self { tokens_per_word }
    }
}

impl Default for WordBasedEstimator {
    fn default() -> Self {
        Self::new(1.3)
    }
}

impl TokenEstimator for WordBasedEstimator {
    fn estimate(&self, text: &str) -> usize {
        let word_count = text.split_whitespace().count();
        (word_count as f64 * self.tokens_per_word).ceil() as usize
    }
}

/// Default estimator: tiktoken when its vocabulary loads, word-count
/// otherwise
pub fn default_estimator() -> Arc<dyn TokenEstimator> {
    match TiktokenEstimator::new() {
        Ok(estimator) => Arc::new(estimator),
        Err(_) => Arc::new(WordBasedEstimator::default()),
    }
}

/// Keep whole documents, in order, until the token budget is exhausted
///
/// A document that would overflow the budget is dropped along with
/// everything after it; truncating mid-document would feed the oracle a
/// cut-off sentence.
pub fn cap_documents(
    docs: Vec<String>,
    budget: usize,
    estimator: &dyn TokenEstimator,
) -> Vec<String> {
    let mut kept = Vec::new();
    let mut used = 0usize;

    for doc in docs {
        let cost = estimator.estimate(&doc);
        if used + cost > budget {
            break;
        }
        used += cost;
        kept.push(doc);
    }

    kept
}
