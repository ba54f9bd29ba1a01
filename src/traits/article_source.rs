use async_trait::async_trait;

use crate::models::common::SourceKind;
use crate::models::report::RetrievalOutcome;

/// A provider of candidate news articles for a search query
#[async_trait]
pub trait ArticleSource: Send + Sync {
    /// Which kind of source this is
    fn kind(&self) -> SourceKind;

    /// Human-readable name used in logs
    fn name(&self) -> &str;

    /// Search for at most `max_results` articles matching `query`.
    ///
    /// Implementations keep the source's own ordering and never fail: transport
    /// and parse problems are reported as [`RetrievalOutcome::Unavailable`].
    async fn search(&self, query: &str, max_results: usize) -> RetrievalOutcome;
}
