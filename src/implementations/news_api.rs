use async_trait::async_trait;
use log::{ debug, info, warn };
use reqwest::Client;
use serde::Deserialize;

use crate::config::HttpOptions;
use crate::errors::{ CheckError, CheckResult };
use crate::implementations::config::RetrieverConfig;
use crate::implementations::http::{ build_client, send_with_retry };
use crate::models::article::Article;
use crate::models::common::SourceKind;
use crate::models::report::RetrievalOutcome;
use crate::traits::article_source::ArticleSource;

/// NewsAPI response types
#[derive(Debug, Deserialize)]
struct NewsApiResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    articles: Vec<NewsApiArticle>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NewsApiArticle {
    #[serde(default)]
    source: Option<NewsApiSourceRef>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    published_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NewsApiSourceRef {
    #[serde(default)]
    name: Option<String>,
}

/// Parse a NewsAPI `everything` response body into articles
pub fn parse_news_api(body: &str) -> CheckResult<Vec<Article>> {
    let response: NewsApiResponse = serde_json::from_str(body).map_err(|e| CheckError::Parse {
        source_name: "NewsAPI".to_string(),
        message: e.to_string(),
    })?;

    if response.status != "ok" {
        return Err(CheckError::Parse {
            source_name: "NewsAPI".to_string(),
            message: response.message.unwrap_or_else(|| format!("status '{}'", response.status)),
        });
    }

    debug!("NewsAPI returned {} articles", response.articles.len());
    Ok(
        response.articles
            .into_iter()
            .filter_map(|a| {
                let title = a.title.filter(|t| !t.trim().is_empty() && t != "[Removed]")?;
                Some(Article {
                    title,
                    description: a.description.filter(|d| !d.trim().is_empty()),
                    link: a.url,
                    source: a.source.and_then(|s| s.name),
                    published: a.published_at,
                })
            })
            .collect()
    )
}

/// Keyed NewsAPI search
pub struct NewsApiSource {
    endpoint: String,
    api_key: Option<String>,
    language: String,
    client: Client,
    http: HttpOptions,
}

impl NewsApiSource {
    /// Create the source; a missing key is tolerated and reported at search time
    pub fn new(config: &RetrieverConfig) -> CheckResult<Self> {
        let http = HttpOptions::from(config);
        let api_key = match config.news_api_key() {
            Ok(key) => Some(key),
            Err(e) => {
                warn!("{}; NewsAPI searches will return no evidence", e);
                None
            }
        };
        Ok(Self {
            endpoint: config.newsapi_endpoint.clone(),
            api_key,
            language: config.language.clone(),
            client: build_client(&http)?,
            http,
        })
    }
}

#[async_trait]
impl ArticleSource for NewsApiSource {
    fn kind(&self) -> SourceKind {
        SourceKind::NewsApi
    }

    fn name(&self) -> &str {
        "NewsAPI"
    }

    async fn search(&self, query: &str, max_results: usize) -> RetrievalOutcome {
        let Some(api_key) = &self.api_key else {
            return RetrievalOutcome::Unavailable {
                reason: "NewsAPI key is not configured".to_string(),
            };
        };

        info!("Querying NewsAPI for '{}'", query);
        // NewsAPI caps pageSize at 100
        let page_size = max_results.clamp(1, 100).to_string();

        let body = match
            send_with_retry(&self.http, &self.endpoint, || {
                self.client
                    .get(&self.endpoint)
                    .query(
                        &[
                            ("q", query),
                            ("language", self.language.as_str()),
                            ("sortBy", "relevancy"),
                            ("pageSize", page_size.as_str()),
                        ]
                    )
                    .header("X-Api-Key", api_key.as_str())
            }).await
        {
            Ok(body) => body,
            Err(e) => {
                warn!("Error fetching news: {}", e);
                return RetrievalOutcome::Unavailable { reason: e.to_string() };
            }
        };

        match parse_news_api(&body) {
            Ok(mut articles) => {
                articles.truncate(max_results);
                info!("Retrieved {} articles for query '{}'", articles.len(), query);
                RetrievalOutcome::from_articles(articles)
            }
            Err(e) => {
                warn!("NewsAPI response rejected: {}", e);
                RetrievalOutcome::Unavailable { reason: e.to_string() }
            }
        }
    }
}
