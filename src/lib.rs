pub mod models;
pub mod traits;
pub mod errors;
pub mod config;
pub mod implementations;
#[cfg(test)]
pub mod tests;

// Re-export core components
pub use config::{ CheckOptions, HttpOptions };
pub use errors::{ CheckError, CheckResult, RecoverableError };
pub use implementations::{
    config::{ CheckerConfig, ConfigError, EmbeddingConfig, RetrieverConfig },
    keywords::{ KeywordConfig, KeywordExtractor },
    normalizer::normalize,
    pipeline::ClaimChecker,
    similarity::{ cosine_similarity, SimilarityScorer },
    verdict::{ classify, VerdictPolicy },
};
pub use models::{
    common::{ EmbeddingMethod, SourceKind },
    article::{ Article, ScoredArticle },
    verdict::{ Verdict, VerdictLabel },
    report::{ CheckReport, EvidenceSignals, RetrievalOutcome, RetrievalStatus, ScoringOutcome },
};
pub use traits::{ ArticleSource, FactChecker, TextEmbedder };
