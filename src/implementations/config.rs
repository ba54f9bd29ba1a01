use std::fs;
use std::path::{ Path, PathBuf };

use log::{ debug, info };
use serde::{ Deserialize, Serialize };
use thiserror::Error;

use crate::implementations::keywords::KeywordConfig;
use crate::implementations::signals::SignalLexicon;
use crate::implementations::verdict::VerdictPolicy;
use crate::models::common::{ EmbeddingMethod, SourceKind };

pub const NEWS_API_KEY_VAR: &str = "NEWS_API_KEY";
pub const EMBEDDING_API_KEY_VARS: &[&str] = &["EMBEDDING_API_KEY", "OPENAI_API_KEY"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] serde_yaml::Error),

    #[error("Missing required API key: {0}")]
    MissingApiKey(String),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

/// Settings for the article source
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct RetrieverConfig {
    /// Which source to query
    pub source: SourceKind,

    /// RSS/Atom search endpoint; the query is appended as `q`
    pub rss_endpoint: String,

    /// Extra query parameters sent to the feed (locale selection)
    pub rss_params: Vec<(String, String)>,

    /// NewsAPI `everything` endpoint
    pub newsapi_endpoint: String,

    /// NewsAPI key; falls back to the NEWS_API_KEY environment variable
    pub api_key: Option<String>,

    /// Article language requested from NewsAPI
    pub language: String,

    /// JSON file with articles for the `file` source
    pub articles_file: Option<PathBuf>,

    /// Maximum number of articles retrieved per claim
    pub max_results: usize,

    /// Per-request timeout
    pub timeout_secs: u64,

    /// Extra attempts after a transient failure
    pub retries: u32,
}

impl Default for RetrieverConfig {
    fn default() -> Self {
        Self {
            source: SourceKind::Rss,
            rss_endpoint: "https://news.google.com/rss/search".to_string(),
            rss_params: vec![
                ("hl".to_string(), "en-US".to_string()),
                ("gl".to_string(), "US".to_string()),
                ("ceid".to_string(), "US:en".to_string())
            ],
            newsapi_endpoint: "https://newsapi.org/v2/everything".to_string(),
            api_key: None,
            language: "en".to_string(),
            articles_file: None,
            max_results: 15,
            timeout_secs: 10,
            retries: 1,
        }
    }
}

impl RetrieverConfig {
    /// Get the NewsAPI key, checking the environment if not in config
    pub fn news_api_key(&self) -> Result<String, ConfigError> {
        if let Some(api_key) = &self.api_key {
            debug!("Using NewsAPI key from config");
            return Ok(api_key.clone());
        }
        match std::env::var(NEWS_API_KEY_VAR) {
            Ok(key) if !key.trim().is_empty() => {
                debug!("Using NewsAPI key from {}", NEWS_API_KEY_VAR);
                Ok(key)
            }
            _ => Err(ConfigError::MissingApiKey(NEWS_API_KEY_VAR.to_string())),
        }
    }
}

/// Settings for the embedding backend
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct EmbeddingConfig {
    pub method: EmbeddingMethod,

    /// OpenAI-compatible embeddings endpoint for the remote backend
    pub endpoint: Option<String>,

    /// Model name sent to the remote backend
    pub model: String,

    /// Bearer token for the remote backend
    pub api_key: Option<String>,

    pub timeout_secs: u64,

    /// Extra attempts after a transient failure
    pub retries: u32,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            method: EmbeddingMethod::TfIdf,
            endpoint: None,
            model: "all-MiniLM-L6-v2".to_string(),
            api_key: None,
            timeout_secs: 30,
            retries: 1,
        }
    }
}

impl EmbeddingConfig {
    /// Bearer token from config or the environment; the remote backend may not need one
    pub fn resolve_api_key(&self) -> Option<String> {
        if let Some(api_key) = &self.api_key {
            return Some(api_key.clone());
        }
        EMBEDDING_API_KEY_VARS.iter().find_map(|var| {
            match std::env::var(var) {
                Ok(key) if !key.trim().is_empty() => {
                    debug!("Using embedding API key from {}", var);
                    Some(key)
                }
                _ => None,
            }
        })
    }
}

/// Complete configuration of the claim checker
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct CheckerConfig {
    pub retriever: RetrieverConfig,
    pub embedding: EmbeddingConfig,
    pub keywords: KeywordConfig,
    pub verdict: VerdictPolicy,
    pub signals: SignalLexicon,

    /// Claims shorter than this (after trimming) are rejected
    pub min_claim_chars: usize,

    /// Number of ranked articles included in a report
    pub max_sources: usize,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            retriever: RetrieverConfig::default(),
            embedding: EmbeddingConfig::default(),
            keywords: KeywordConfig::default(),
            verdict: VerdictPolicy::default(),
            signals: SignalLexicon::default(),
            min_claim_chars: 3,
            max_sources: 10,
        }
    }
}

impl CheckerConfig {
    /// Load configuration from a YAML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config = Self::from_yaml(&contents)?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        let config: CheckerConfig = serde_yaml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` when given, otherwise use the defaults
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                debug!("No config file given, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Render the configuration as YAML
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.retriever.max_results == 0 {
            return Err(ConfigError::InvalidValue("retriever.max_results must be positive".to_string()));
        }
        if self.retriever.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue("retriever.timeout_secs must be positive".to_string()));
        }
        if self.embedding.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue("embedding.timeout_secs must be positive".to_string()));
        }
        if self.keywords.max_keywords == 0 {
            return Err(ConfigError::InvalidValue("keywords.max_keywords must be positive".to_string()));
        }
        if self.retriever.source == SourceKind::File && self.retriever.articles_file.is_none() {
            return Err(
                ConfigError::InvalidValue(
                    "retriever.articles_file is required for the file source".to_string()
                )
            );
        }
        self.verdict.validate().map_err(ConfigError::InvalidValue)
    }
}
