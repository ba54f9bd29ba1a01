use async_trait::async_trait;
use log::{ debug, info, warn };
use reqwest::Client;
use serde::Deserialize;

use crate::config::HttpOptions;
use crate::errors::{ CheckError, CheckResult };
use crate::implementations::config::RetrieverConfig;
use crate::implementations::http::{ build_client, send_with_retry };
use crate::implementations::normalizer::strip_html;
use crate::models::article::Article;
use crate::models::common::SourceKind;
use crate::models::report::RetrievalOutcome;
use crate::traits::article_source::ArticleSource;

#[derive(Debug, Deserialize)]
struct RssDocument {
    channel: RssChannel,
}

#[derive(Debug, Deserialize)]
struct RssChannel {
    #[serde(rename = "item", default)]
    items: Vec<RssItem>,
}

#[derive(Debug, Deserialize)]
struct RssItem {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    link: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(rename = "pubDate", default)]
    pub_date: Option<String>,
    #[serde(default)]
    source: Option<TextNode>,
}

#[derive(Debug, Deserialize)]
struct AtomFeed {
    #[serde(rename = "entry", default)]
    entries: Vec<AtomEntry>,
}

#[derive(Debug, Deserialize)]
struct AtomEntry {
    #[serde(default)]
    title: Option<TextNode>,
    #[serde(default)]
    summary: Option<TextNode>,
    #[serde(default)]
    content: Option<TextNode>,
    #[serde(rename = "link", default)]
    links: Vec<AtomLink>,
    #[serde(default)]
    published: Option<String>,
    #[serde(default)]
    updated: Option<String>,
    #[serde(default)]
    source: Option<AtomSource>,
}

#[derive(Debug, Deserialize)]
struct AtomLink {
    #[serde(rename = "@href", default)]
    href: Option<String>,
    #[serde(rename = "@rel", default)]
    rel: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AtomSource {
    #[serde(default)]
    title: Option<TextNode>,
}

/// Element whose attributes are irrelevant and whose text is wanted
#[derive(Debug, Deserialize)]
struct TextNode {
    #[serde(rename = "$text", default)]
    value: String,
}

/// Parse an RSS 2.0 or Atom document into articles, keeping feed order.
pub fn parse_feed(body: &str) -> CheckResult<Vec<Article>> {
    match quick_xml::de::from_str::<RssDocument>(body) {
        Ok(document) => {
            debug!("Parsed RSS document with {} items", document.channel.items.len());
            return Ok(document.channel.items.into_iter().filter_map(rss_item_to_article).collect());
        }
        Err(e) => debug!("Not an RSS document ({}), trying Atom", e),
    }

    let feed = quick_xml::de::from_str::<AtomFeed>(body).map_err(|e| CheckError::Parse {
        source_name: "news feed".to_string(),
        message: e.to_string(),
    })?;
    debug!("Parsed Atom feed with {} entries", feed.entries.len());
    Ok(feed.entries.into_iter().filter_map(atom_entry_to_article).collect())
}

fn rss_item_to_article(item: RssItem) -> Option<Article> {
    let raw_title = item.title.filter(|t| !t.trim().is_empty())?;
    let source_name = item.source.map(|s| s.value.trim().to_string()).filter(|s| !s.is_empty());
    let (title, source) = split_title(&raw_title, source_name);

    Some(Article {
        title,
        description: item.description.map(|d| strip_html(&d)).filter(|d| !d.is_empty()),
        link: item.link.map(|l| l.trim().to_string()).filter(|l| !l.is_empty()),
        source,
        published: item.pub_date,
    })
}

fn atom_entry_to_article(entry: AtomEntry) -> Option<Article> {
    let raw_title = entry.title.map(|t| t.value).filter(|t| !t.trim().is_empty())?;
    let source_name = entry.source
        .and_then(|s| s.title)
        .map(|t| t.value.trim().to_string())
        .filter(|s| !s.is_empty());
    let (title, source) = split_title(&raw_title, source_name);

    let link = entry.links
        .iter()
        .find(|l| l.rel.as_deref().map_or(true, |rel| rel == "alternate"))
        .or_else(|| entry.links.first())
        .and_then(|l| l.href.clone());

    Some(Article {
        title,
        description: entry.summary
            .or(entry.content)
            .map(|d| strip_html(&d.value))
            .filter(|d| !d.is_empty()),
        link,
        source,
        published: entry.published.or(entry.updated),
    })
}

/// Split an aggregator headline of the form "Headline - Outlet".
///
/// An explicit source element wins over the suffix; its suffix is still removed
/// from the headline when present.
fn split_title(raw: &str, source: Option<String>) -> (String, Option<String>) {
    let raw = raw.trim();
    if let Some(source) = source {
        let suffix = format!(" - {}", source);
        let title = raw.strip_suffix(suffix.as_str()).unwrap_or(raw).trim().to_string();
        return (title, Some(source));
    }
    match raw.rsplit_once(" - ") {
        Some((title, outlet)) if !title.trim().is_empty() && !outlet.trim().is_empty() => {
            (title.trim().to_string(), Some(outlet.trim().to_string()))
        }
        _ => (raw.to_string(), None),
    }
}

/// Unauthenticated RSS/Atom search feed, Google News by default
pub struct RssFeedSource {
    endpoint: String,
    params: Vec<(String, String)>,
    client: Client,
    http: HttpOptions,
}

impl RssFeedSource {
    pub fn new(config: &RetrieverConfig) -> CheckResult<Self> {
        let http = HttpOptions::from(config);
        Ok(Self {
            endpoint: config.rss_endpoint.clone(),
            params: config.rss_params.clone(),
            client: build_client(&http)?,
            http,
        })
    }
}

#[async_trait]
impl ArticleSource for RssFeedSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Rss
    }

    fn name(&self) -> &str {
        &self.endpoint
    }

    async fn search(&self, query: &str, max_results: usize) -> RetrievalOutcome {
        info!("Fetching news feed from {} for query '{}'", self.endpoint, query);

        let body = match
            send_with_retry(&self.http, &self.endpoint, || {
                self.client.get(&self.endpoint).query(&[("q", query)]).query(&self.params)
            }).await
        {
            Ok(body) => body,
            Err(e) => {
                warn!("Error fetching news feed: {}", e);
                return RetrievalOutcome::Unavailable { reason: e.to_string() };
            }
        };

        match parse_feed(&body) {
            Ok(mut articles) => {
                articles.truncate(max_results);
                info!("Found {} news items", articles.len());
                RetrievalOutcome::from_articles(articles)
            }
            Err(e) => {
                warn!("News feed parsing failed: {}", e);
                RetrievalOutcome::Unavailable { reason: e.to_string() }
            }
        }
    }
}
