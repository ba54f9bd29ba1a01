use std::fs;
use std::path::Path;

use async_trait::async_trait;
use log::{ debug, info };

use crate::errors::CheckResult;
use crate::models::article::Article;
use crate::models::common::SourceKind;
use crate::models::report::RetrievalOutcome;
use crate::traits::article_source::ArticleSource;

/// Serves a fixed, pre-collected set of articles regardless of the query.
///
/// Used for offline checks against an evidence file and for reproducible runs.
pub struct StaticSource {
    name: String,
    articles: Vec<Article>,
}

impl StaticSource {
    pub fn new(name: impl Into<String>, articles: Vec<Article>) -> Self {
        Self {
            name: name.into(),
            articles,
        }
    }

    /// Load a JSON array of articles
    pub fn from_file(path: &Path) -> CheckResult<Self> {
        let contents = fs::read_to_string(path)?;
        let articles: Vec<Article> = serde_json::from_str(&contents)?;
        info!("Loaded {} articles from {}", articles.len(), path.display());
        Ok(Self::new(path.display().to_string(), articles))
    }
}

#[async_trait]
impl ArticleSource for StaticSource {
    fn kind(&self) -> SourceKind {
        SourceKind::File
    }

    fn name(&self) -> &str {
        &self.name
    }

    async fn search(&self, query: &str, max_results: usize) -> RetrievalOutcome {
        debug!("Serving stored articles from {} for query '{}'", self.name, query);
        let articles = self.articles.iter().take(max_results).cloned().collect();
        RetrievalOutcome::from_articles(articles)
    }
}
