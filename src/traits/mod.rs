pub mod article_source;
pub mod text_embedder;
pub mod fact_checker;

// Re-export traits
pub use article_source::ArticleSource;
pub use text_embedder::TextEmbedder;
pub use fact_checker::FactChecker;
