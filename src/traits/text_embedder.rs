use async_trait::async_trait;

use crate::errors::CheckResult;
use crate::models::common::EmbeddingMethod;

/// Turns texts into fixed-length vectors in one shared space
#[async_trait]
pub trait TextEmbedder: Send + Sync {
    /// The embedding method implemented by this backend
    fn method(&self) -> EmbeddingMethod;

    /// Embed every text of the batch; the output is parallel to `texts`.
    ///
    /// Batch-fitted methods such as TF-IDF derive their vocabulary from the
    /// whole batch, so callers must embed the claim and its articles together.
    async fn embed(&self, texts: &[String]) -> CheckResult<Vec<Vec<f32>>>;
}
