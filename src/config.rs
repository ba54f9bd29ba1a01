use std::time::Duration;

use crate::implementations::config::{ CheckerConfig, EmbeddingConfig, RetrieverConfig };

/// Per-request options for the claim checker
#[derive(Debug, Clone)]
pub struct CheckOptions {
    pub min_claim_chars: usize,
    pub max_results: usize,
    pub max_sources: usize,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self::from(&CheckerConfig::default())
    }
}

impl From<&CheckerConfig> for CheckOptions {
    fn from(config: &CheckerConfig) -> Self {
        Self {
            min_claim_chars: config.min_claim_chars,
            max_results: config.retriever.max_results,
            max_sources: config.max_sources,
        }
    }
}

/// Transport limits shared by the HTTP-backed sources and embedders
#[derive(Debug, Clone, Copy)]
pub struct HttpOptions {
    pub timeout: Duration,
    pub retries: u32,
    pub retry_delay: Duration,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self::from(&RetrieverConfig::default())
    }
}

impl From<&RetrieverConfig> for HttpOptions {
    fn from(config: &RetrieverConfig) -> Self {
        Self {
            timeout: Duration::from_secs(config.timeout_secs),
            retries: config.retries,
            retry_delay: Duration::from_millis(250),
        }
    }
}

impl From<&EmbeddingConfig> for HttpOptions {
    fn from(config: &EmbeddingConfig) -> Self {
        Self {
            timeout: Duration::from_secs(config.timeout_secs),
            retries: config.retries,
            retry_delay: Duration::from_millis(250),
        }
    }
}
