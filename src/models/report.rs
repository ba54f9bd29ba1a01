use chrono::{ DateTime, Utc };
use serde::{ Deserialize, Serialize };

use crate::models::article::{ Article, ScoredArticle };
use crate::models::verdict::Verdict;

/// What an article source produced for one query
#[derive(Debug, Clone, PartialEq)]
pub enum RetrievalOutcome {
    Found(Vec<Article>),
    NoMatches,
    Unavailable { reason: String },
}

impl RetrievalOutcome {
    /// Builds `Found` or `NoMatches` depending on whether anything was returned
    pub fn from_articles(articles: Vec<Article>) -> Self {
        if articles.is_empty() {
            RetrievalOutcome::NoMatches
        } else {
            RetrievalOutcome::Found(articles)
        }
    }

    pub fn status(&self) -> RetrievalStatus {
        match self {
            RetrievalOutcome::Found(articles) => RetrievalStatus::Found { count: articles.len() },
            RetrievalOutcome::NoMatches => RetrievalStatus::NoMatches,
            RetrievalOutcome::Unavailable { reason } => {
                RetrievalStatus::Unavailable { reason: reason.clone() }
            }
        }
    }

    pub fn into_articles(self) -> Vec<Article> {
        match self {
            RetrievalOutcome::Found(articles) => articles,
            _ => Vec::new(),
        }
    }
}

/// Serializable summary of a retrieval outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RetrievalStatus {
    Found { count: usize },
    NoMatches,
    Unavailable { reason: String },
}

/// Ranked articles produced by the similarity scorer
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringOutcome {
    /// Sorted by descending similarity, ties in retrieval order
    pub ranked: Vec<ScoredArticle>,
    /// Set when the embedding backend could not be used and every score is zero
    pub degraded: Option<String>,
}

/// Phrase tallies over the retrieved articles, reported next to the verdict
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceSignals {
    pub support_hits: usize,
    pub refute_hits: usize,
    pub sensational_hits: usize,
    /// Posterior probability that coverage supports the claim
    pub support_posterior: f32,
}

impl Default for EvidenceSignals {
    fn default() -> Self {
        Self {
            support_hits: 0,
            refute_hits: 0,
            sensational_hits: 0,
            support_posterior: 0.5,
        }
    }
}

/// Full result of checking one claim
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckReport {
    pub claim: String,
    pub query: String,
    pub verdict: Verdict,
    pub article_count: usize,
    pub sources: Vec<ScoredArticle>,
    pub retrieval: RetrievalStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scoring_degraded: Option<String>,
    pub signals: EvidenceSignals,
    pub checked_at: DateTime<Utc>,
}
