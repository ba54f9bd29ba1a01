use std::net::SocketAddr;
use std::sync::atomic::{ AtomicUsize, Ordering };
use std::sync::Arc;

use async_trait::async_trait;
use dotenv::dotenv;
use log::{ debug, info, warn };
use tokio::io::{ AsyncReadExt, AsyncWriteExt };
use tokio::net::{ TcpListener, TcpStream };

use crate::errors::{ CheckError, CheckResult };
use crate::models::article::Article;
use crate::models::common::{ EmbeddingMethod, SourceKind };
use crate::models::report::RetrievalOutcome;
use crate::traits::article_source::ArticleSource;
use crate::traits::text_embedder::TextEmbedder;

// Setup function to initialize logging and environment
pub fn setup() {
    // Initialize logger if not already initialized
    match env_logger::builder().is_test(true).try_init() {
        Ok(_) => {
            info!("Logger initialized");
        }
        Err(_) => {
            // Logger already initialized, which is fine
        }
    }

    if dotenv().is_ok() {
        debug!("Loaded environment variables from .env file");
    }
}

/// Article source that replays a fixed outcome and counts how often it is queried
pub struct CountingSource {
    outcome: RetrievalOutcome,
    calls: AtomicUsize,
}

impl CountingSource {
    pub fn with_articles(articles: Vec<Article>) -> Self {
        Self {
            outcome: RetrievalOutcome::from_articles(articles),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn unavailable(reason: &str) -> Self {
        Self {
            outcome: RetrievalOutcome::Unavailable { reason: reason.to_string() },
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ArticleSource for CountingSource {
    fn kind(&self) -> SourceKind {
        SourceKind::File
    }

    fn name(&self) -> &str {
        "counting mock"
    }

    async fn search(&self, _query: &str, max_results: usize) -> RetrievalOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.outcome {
            RetrievalOutcome::Found(articles) => {
                RetrievalOutcome::Found(articles.iter().take(max_results).cloned().collect())
            }
            other => other.clone(),
        }
    }
}

/// Embedder that always fails, standing in for an unreachable model server
pub struct FailingEmbedder;

#[async_trait]
impl TextEmbedder for FailingEmbedder {
    fn method(&self) -> EmbeddingMethod {
        EmbeddingMethod::Remote
    }

    async fn embed(&self, _texts: &[String]) -> CheckResult<Vec<Vec<f32>>> {
        Err(CheckError::Embedding("model server offline".to_string()))
    }
}

/// Embedder that gives every text the same vector, so every article ties
pub struct ConstantEmbedder;

#[async_trait]
impl TextEmbedder for ConstantEmbedder {
    fn method(&self) -> EmbeddingMethod {
        EmbeddingMethod::Remote
    }

    async fn embed(&self, texts: &[String]) -> CheckResult<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|_| vec![1.0, 0.0, 1.0]).collect())
    }
}

/// A canned HTTP response served by [`spawn_stub`]
#[derive(Debug, Clone)]
pub struct StubResponse {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

impl StubResponse {
    pub fn new(status: u16, content_type: &'static str, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type,
            body: body.into(),
        }
    }
}

/// Serve `responses` in order on a local port, repeating the last one.
///
/// Returns the bound address and a counter of requests handled.
pub async fn spawn_stub(responses: Vec<StubResponse>) -> (SocketAddr, Arc<AtomicUsize>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind stub listener");
    let addr = listener.local_addr().expect("stub address");
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&hits);

    tokio::spawn(async move {
        loop {
            let (mut stream, _) = match listener.accept().await {
                Ok(conn) => conn,
                Err(e) => {
                    warn!("Stub accept failed: {}", e);
                    return;
                }
            };
            let index = counter.fetch_add(1, Ordering::SeqCst);
            let response = responses
                .get(index)
                .or_else(|| responses.last())
                .cloned()
                .expect("at least one stub response");
            read_request(&mut stream).await;
            let raw = format!(
                "HTTP/1.1 {} STUB\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                response.status,
                response.content_type,
                response.body.len(),
                response.body
            );
            let _ = stream.write_all(raw.as_bytes()).await;
            let _ = stream.shutdown().await;
        }
    });

    (addr, hits)
}

// Drain the request head and body so closing the socket doesn't reset it
async fn read_request(stream: &mut TcpStream) {
    let mut buffer = Vec::new();
    let mut chunk = [0u8; 4096];
    let header_end = loop {
        match stream.read(&mut chunk).await {
            Ok(0) | Err(_) => return,
            Ok(n) => buffer.extend_from_slice(&chunk[..n]),
        }
        if let Some(pos) = buffer.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buffer[..header_end]).to_lowercase();
    let content_length = head
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|value| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while buffer.len() < header_end + content_length {
        match stream.read(&mut chunk).await {
            Ok(0) | Err(_) => return,
            Ok(n) => buffer.extend_from_slice(&chunk[..n]),
        }
    }
}

pub fn sky_article() -> Article {
    Article::new("The sky is blue").with_source("Science Daily")
}
