use async_trait::async_trait;
use log::{ debug, info, warn };
use reqwest::Client;
use serde::{ Deserialize, Serialize };

use crate::config::HttpOptions;
use crate::errors::{ CheckError, CheckResult };
use crate::implementations::config::EmbeddingConfig;
use crate::implementations::http::{ build_client, send_with_retry };
use crate::models::common::EmbeddingMethod;
use crate::traits::text_embedder::TextEmbedder;

/// OpenAI-compatible embeddings request and response types
#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingDatum>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingDatum {
    #[serde(default)]
    index: usize,
    embedding: Vec<f32>,
}

/// Parse an embeddings response and check it matches a batch of `expected` texts
pub fn parse_embeddings(body: &str, expected: usize) -> CheckResult<Vec<Vec<f32>>> {
    let mut response: EmbeddingResponse = serde_json::from_str(body).map_err(|e| {
        CheckError::Embedding(format!("Failed to parse embeddings response: {}", e))
    })?;

    if response.data.len() != expected {
        return Err(
            CheckError::Embedding(
                format!("Expected {} embeddings, received {}", expected, response.data.len())
            )
        );
    }

    response.data.sort_by_key(|d| d.index);
    let dimension = response.data.first().map(|d| d.embedding.len()).unwrap_or(0);
    if response.data.iter().any(|d| d.embedding.len() != dimension) {
        return Err(CheckError::Embedding("Embeddings have inconsistent dimensions".to_string()));
    }

    Ok(response.data.into_iter().map(|d| d.embedding).collect())
}

/// Sentence embeddings served by an OpenAI-compatible HTTP endpoint.
///
/// Constructed once at startup and shared read-only between checks.
pub struct RemoteEmbedder {
    endpoint: String,
    model: String,
    api_key: Option<String>,
    client: Client,
    http: HttpOptions,
}

impl RemoteEmbedder {
    pub fn new(config: &EmbeddingConfig) -> CheckResult<Self> {
        let endpoint = config.endpoint
            .clone()
            .ok_or_else(|| CheckError::Embedding("No embedding endpoint configured".to_string()))?;
        let http = HttpOptions::from(config);
        info!("Using remote embedding model {} at {}", config.model, endpoint);
        Ok(Self {
            endpoint,
            model: config.model.clone(),
            api_key: config.resolve_api_key(),
            client: build_client(&http)?,
            http,
        })
    }
}

#[async_trait]
impl TextEmbedder for RemoteEmbedder {
    fn method(&self) -> EmbeddingMethod {
        EmbeddingMethod::Remote
    }

    async fn embed(&self, texts: &[String]) -> CheckResult<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        debug!("Requesting {} embeddings from {}", texts.len(), self.endpoint);

        let request = EmbeddingRequest {
            model: &self.model,
            input: texts,
        };

        let body = send_with_retry(&self.http, &self.endpoint, || {
            let builder = self.client.post(&self.endpoint).json(&request);
            match &self.api_key {
                Some(key) => builder.bearer_auth(key),
                None => builder,
            }
        }).await.map_err(|e| {
            warn!("Embedding request failed: {}", e);
            CheckError::Embedding(e.to_string())
        })?;

        parse_embeddings(&body, texts.len())
    }
}
