use std::cmp::Ordering;
use std::sync::Arc;

use log::{ debug, error, warn };

use crate::implementations::normalizer::normalize;
use crate::models::article::{ Article, ScoredArticle };
use crate::models::common::EmbeddingMethod;
use crate::models::report::ScoringOutcome;
use crate::traits::text_embedder::TextEmbedder;

/// Cosine of the angle between `a` and `b`, within [-1, 1].
///
/// Mismatched lengths, zero vectors and non-finite results score 0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (x, y) in a.iter().zip(b) {
        let (x, y) = (*x as f64, *y as f64);
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom <= f64::EPSILON {
        return 0.0;
    }
    let similarity = (dot / denom) as f32;
    if similarity.is_finite() { similarity.clamp(-1.0, 1.0) } else { 0.0 }
}

/// Pair articles with their scores and sort by descending score.
///
/// The sort is stable, so equal scores keep retrieval order.
pub fn rank(articles: Vec<Article>, scores: &[f32]) -> Vec<ScoredArticle> {
    let mut ranked: Vec<ScoredArticle> = articles
        .into_iter()
        .enumerate()
        .map(|(i, article)| ScoredArticle {
            article,
            similarity: scores.get(i).copied().filter(|s| s.is_finite()).unwrap_or(0.0),
            retrieval_rank: i,
        })
        .collect();
    ranked.sort_by(|a, b| b.similarity.partial_cmp(&a.similarity).unwrap_or(Ordering::Equal));
    ranked
}

enum Backend {
    Ready(Arc<dyn TextEmbedder>),
    Unavailable(String),
}

/// Scores articles against a claim with one shared embedding backend
pub struct SimilarityScorer {
    backend: Backend,
}

impl SimilarityScorer {
    pub fn new(embedder: Arc<dyn TextEmbedder>) -> Self {
        Self {
            backend: Backend::Ready(embedder),
        }
    }

    /// A scorer whose backend failed to initialize; every article scores zero
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            backend: Backend::Unavailable(reason.into()),
        }
    }

    pub fn method(&self) -> Option<EmbeddingMethod> {
        match &self.backend {
            Backend::Ready(embedder) => Some(embedder.method()),
            Backend::Unavailable(_) => None,
        }
    }

    /// Embed `normalized_claim` with every article and rank the articles
    pub async fn score(&self, normalized_claim: &str, articles: Vec<Article>) -> ScoringOutcome {
        if articles.is_empty() {
            return ScoringOutcome {
                ranked: Vec::new(),
                degraded: None,
            };
        }

        let embedder = match &self.backend {
            Backend::Ready(embedder) => embedder,
            Backend::Unavailable(reason) => {
                error!("Embedding backend not available: {}", reason);
                return Self::degraded(articles, reason.clone());
            }
        };

        let mut texts = Vec::with_capacity(articles.len() + 1);
        texts.push(normalized_claim.to_string());
        texts.extend(articles.iter().map(|a| normalize(&a.text())));

        let vectors = match embedder.embed(&texts).await {
            Ok(vectors) if vectors.len() == texts.len() => vectors,
            Ok(vectors) => {
                let reason = format!(
                    "embedding backend returned {} vectors for {} texts",
                    vectors.len(),
                    texts.len()
                );
                warn!("{}", reason);
                return Self::degraded(articles, reason);
            }
            Err(e) => {
                error!("Error calculating semantic similarity: {}", e);
                return Self::degraded(articles, e.to_string());
            }
        };

        let (claim_vector, article_vectors) = vectors.split_at(1);
        let scores: Vec<f32> = article_vectors
            .iter()
            .map(|v| cosine_similarity(&claim_vector[0], v))
            .collect();
        debug!("Similarity scores: {:?}", scores);

        ScoringOutcome {
            ranked: rank(articles, &scores),
            degraded: None,
        }
    }

    fn degraded(articles: Vec<Article>, reason: String) -> ScoringOutcome {
        let zeros = vec![0.0; articles.len()];
        ScoringOutcome {
            ranked: rank(articles, &zeros),
            degraded: Some(reason),
        }
    }
}
