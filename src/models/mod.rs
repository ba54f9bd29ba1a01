pub mod common;
pub mod article;
pub mod verdict;
pub mod report;

// Re-export common model types
pub use common::{EmbeddingMethod, SourceKind};
pub use article::{Article, ScoredArticle};
pub use verdict::{Verdict, VerdictLabel};
pub use report::{CheckReport, EvidenceSignals, RetrievalOutcome, RetrievalStatus, ScoringOutcome};
