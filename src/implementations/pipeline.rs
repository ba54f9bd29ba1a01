use std::sync::Arc;

use async_trait::async_trait;
use log::{ debug, error, info, warn };

use crate::config::CheckOptions;
use crate::errors::{ CheckError, CheckResult };
use crate::implementations::config::{ CheckerConfig, ConfigError };
use crate::implementations::keywords::KeywordExtractor;
use crate::implementations::news_api::NewsApiSource;
use crate::implementations::normalizer::normalize;
use crate::implementations::remote_embedder::RemoteEmbedder;
use crate::implementations::rss_feed::RssFeedSource;
use crate::implementations::signals::{ tally, SignalLexicon };
use crate::implementations::similarity::SimilarityScorer;
use crate::implementations::static_source::StaticSource;
use crate::implementations::tfidf::TfIdfEmbedder;
use crate::implementations::verdict::{ classify, VerdictPolicy };
use crate::models::common::{ EmbeddingMethod, SourceKind };
use crate::models::report::{ CheckReport, RetrievalOutcome };
use crate::traits::article_source::ArticleSource;
use crate::traits::fact_checker::FactChecker;
use crate::traits::text_embedder::TextEmbedder;

/// Build the article source selected by the configuration
pub fn build_source(config: &CheckerConfig) -> CheckResult<Arc<dyn ArticleSource>> {
    let retriever = &config.retriever;
    let source: Arc<dyn ArticleSource> = match retriever.source {
        SourceKind::Rss => Arc::new(RssFeedSource::new(retriever)?),
        SourceKind::NewsApi => Arc::new(NewsApiSource::new(retriever)?),
        SourceKind::File => {
            let path = retriever.articles_file
                .as_deref()
                .ok_or_else(|| {
                    ConfigError::InvalidValue(
                        "retriever.articles_file is required for the file source".to_string()
                    )
                })?;
            Arc::new(StaticSource::from_file(path)?)
        }
    };
    info!("Article source: {} ({})", source.name(), source.kind());
    Ok(source)
}

/// Build the similarity scorer; a backend that fails to start degrades to zero scores
pub fn build_scorer(config: &CheckerConfig) -> SimilarityScorer {
    match config.embedding.method {
        EmbeddingMethod::TfIdf => SimilarityScorer::new(Arc::new(TfIdfEmbedder::new())),
        EmbeddingMethod::Remote => {
            match RemoteEmbedder::new(&config.embedding) {
                Ok(embedder) => SimilarityScorer::new(Arc::new(embedder)),
                Err(e) => {
                    error!("Failed to load embedding backend: {}", e);
                    SimilarityScorer::unavailable(e.to_string())
                }
            }
        }
    }
}

/// The claim verification pipeline.
///
/// Stages run in order for every claim: keyword extraction, retrieval,
/// normalization, similarity scoring, verdict classification. The source and
/// the embedding backend are created once and only read afterwards, so one
/// checker can serve concurrent calls.
pub struct ClaimChecker {
    extractor: KeywordExtractor,
    source: Arc<dyn ArticleSource>,
    scorer: SimilarityScorer,
    policy: VerdictPolicy,
    lexicon: SignalLexicon,
    options: CheckOptions,
}

impl ClaimChecker {
    pub fn new(
        extractor: KeywordExtractor,
        source: Arc<dyn ArticleSource>,
        scorer: SimilarityScorer,
        policy: VerdictPolicy,
        options: CheckOptions
    ) -> Self {
        Self {
            extractor,
            source,
            scorer,
            policy,
            lexicon: SignalLexicon::default(),
            options,
        }
    }

    /// Wire every stage from configuration
    pub fn from_config(config: &CheckerConfig) -> CheckResult<Self> {
        let source = build_source(config)?;
        let scorer = build_scorer(config);
        Ok(
            Self::new(
                KeywordExtractor::new(config.keywords.clone()),
                source,
                scorer,
                config.verdict.clone(),
                CheckOptions::from(config)
            ).with_lexicon(config.signals.clone())
        )
    }

    /// Checker with default settings over an explicit source and embedder
    pub fn with_backends(source: Arc<dyn ArticleSource>, embedder: Arc<dyn TextEmbedder>) -> Self {
        Self::new(
            KeywordExtractor::default(),
            source,
            SimilarityScorer::new(embedder),
            VerdictPolicy::default(),
            CheckOptions::default()
        )
    }

    pub fn with_lexicon(mut self, lexicon: SignalLexicon) -> Self {
        self.lexicon = lexicon;
        self
    }

    pub fn options(&self) -> &CheckOptions {
        &self.options
    }

    fn validate_claim<'a>(&self, claim: &'a str) -> CheckResult<&'a str> {
        let trimmed = claim.trim();
        if trimmed.chars().count() < self.options.min_claim_chars {
            return Err(
                CheckError::InvalidInput(
                    format!(
                        "Claim must be at least {} characters long",
                        self.options.min_claim_chars
                    )
                )
            );
        }
        Ok(trimmed)
    }
}

#[async_trait]
impl FactChecker for ClaimChecker {
    async fn verify(&self, claim: &str) -> CheckResult<CheckReport> {
        let claim = self.validate_claim(claim)?;
        info!("Received claim: {}", claim);

        // Step 1: Extract keywords from the claim
        let query = self.extractor.extract_query(claim);
        info!("Extracted keywords: {}", query);

        // Step 2: Fetch candidate articles
        let outcome = self.source.search(&query, self.options.max_results).await;
        let retrieval = outcome.status();
        match &outcome {
            RetrievalOutcome::Found(articles) => debug!("Retrieved {} articles", articles.len()),
            RetrievalOutcome::NoMatches => warn!("No news items found"),
            RetrievalOutcome::Unavailable { reason } => {
                warn!("Article source unavailable: {}", reason)
            }
        }
        let articles = outcome.into_articles();
        let article_count = articles.len();
        let signals = tally(&self.lexicon, &articles);

        // Step 3 and 4: Normalize and score
        let scoring = self.scorer.score(&normalize(claim), articles).await;

        // Step 5: Classify
        let verdict = classify(&self.policy, &scoring.ranked);
        info!(
            "Analysis complete. Verdict: {}, Confidence: {:.2}",
            verdict.label,
            verdict.confidence
        );

        let mut sources = scoring.ranked;
        sources.truncate(self.options.max_sources);

        Ok(CheckReport {
            claim: claim.to_string(),
            query,
            verdict,
            article_count,
            sources,
            retrieval,
            scoring_degraded: scoring.degraded,
            signals,
            checked_at: chrono::Utc::now(),
        })
    }

    fn search_query(&self, claim: &str) -> String {
        self.extractor.extract_query(claim)
    }
}
