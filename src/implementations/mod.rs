pub mod config;
pub mod http;
pub mod keywords;
pub mod normalizer;
pub mod rss_feed;
pub mod news_api;
pub mod static_source;
pub mod tfidf;
pub mod remote_embedder;
pub mod similarity;
pub mod signals;
pub mod verdict;
pub mod pipeline;

pub use config::{ CheckerConfig, ConfigError, EmbeddingConfig, RetrieverConfig };
pub use keywords::{ KeywordConfig, KeywordExtractor };
pub use news_api::NewsApiSource;
pub use pipeline::{ build_scorer, build_source, ClaimChecker };
pub use remote_embedder::RemoteEmbedder;
pub use rss_feed::RssFeedSource;
pub use signals::SignalLexicon;
pub use similarity::{ cosine_similarity, SimilarityScorer };
pub use static_source::StaticSource;
pub use tfidf::TfIdfEmbedder;
pub use verdict::{ classify, VerdictPolicy };
