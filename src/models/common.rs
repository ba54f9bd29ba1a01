use std::fmt;
use std::str::FromStr;

use serde::{ Deserialize, Serialize };

/// Where candidate articles are retrieved from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Unauthenticated RSS/Atom search feed
    Rss,
    /// Keyed NewsAPI REST endpoint
    NewsApi,
    /// Local JSON file with pre-collected articles
    File,
}

/// Text embedding backend used by the similarity scorer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingMethod {
    /// TF-IDF fit jointly over the claim and its articles
    TfIdf,
    /// Pretrained sentence embeddings served over HTTP
    Remote,
}

impl FromStr for SourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rss" | "feed" | "google" => Ok(SourceKind::Rss),
            "newsapi" | "news-api" | "api" => Ok(SourceKind::NewsApi),
            "file" | "json" => Ok(SourceKind::File),
            _ => Err(format!("Unsupported article source: {}", s)),
        }
    }
}

impl FromStr for EmbeddingMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tfidf" | "tf-idf" => Ok(EmbeddingMethod::TfIdf),
            "remote" | "sentence" | "bert" => Ok(EmbeddingMethod::Remote),
            _ => Err(format!("Unsupported embedding method: {}", s)),
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::Rss => write!(f, "rss"),
            SourceKind::NewsApi => write!(f, "newsapi"),
            SourceKind::File => write!(f, "file"),
        }
    }
}

impl fmt::Display for EmbeddingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmbeddingMethod::TfIdf => write!(f, "tfidf"),
            EmbeddingMethod::Remote => write!(f, "remote"),
        }
    }
}
