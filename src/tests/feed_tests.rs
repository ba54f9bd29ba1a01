#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use log::info;

    use crate::errors::CheckError;
    use crate::implementations::config::{ EmbeddingConfig, RetrieverConfig, NEWS_API_KEY_VAR };
    use crate::implementations::news_api::{ parse_news_api, NewsApiSource };
    use crate::implementations::remote_embedder::{ parse_embeddings, RemoteEmbedder };
    use crate::implementations::rss_feed::{ parse_feed, RssFeedSource };
    use crate::models::article::Article;
    use crate::models::report::RetrievalOutcome;
    use crate::traits::article_source::ArticleSource;
    use crate::traits::text_embedder::TextEmbedder;
    use crate::tests::support::{ setup, spawn_stub, StubResponse };

    const RSS_FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:media="http://search.yahoo.com/mrss/">
  <channel>
    <title>"sky blue" - Google News</title>
    <link>https://news.google.com</link>
    <item>
      <title>Why the sky is blue - Science Daily</title>
      <link>https://example.com/a</link>
      <pubDate>Mon, 06 May 2024 10:00:00 GMT</pubDate>
      <description>&lt;a href="https://example.com/a"&gt;Why the sky is blue&lt;/a&gt;&amp;nbsp;&amp;nbsp;&lt;font color="gray"&gt;Science Daily&lt;/font&gt;</description>
      <source url="https://sciencedaily.com">Science Daily</source>
    </item>
    <item>
      <title>Rayleigh scattering explained - Physics Today</title>
      <link>https://example.com/b</link>
    </item>
    <item>
      <title>Blue skies ahead</title>
    </item>
  </channel>
</rss>"#;

    const ATOM_FEED: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Search results</title>
  <entry>
    <title type="text">Sky remains blue, scientists confirm - Reuters</title>
    <link rel="alternate" href="https://example.com/atom/1"/>
    <published>2024-05-06T10:00:00Z</published>
    <summary type="html">&lt;p&gt;Observations &lt;b&gt;confirm&lt;/b&gt; it.&lt;/p&gt;</summary>
  </entry>
</feed>"#;

    const NEWS_API_BODY: &str =
        r#"{
        "status": "ok",
        "totalResults": 3,
        "articles": [
            {
                "source": { "id": null, "name": "BBC News" },
                "title": "Central bank raises rates",
                "description": "The bank raised rates by a quarter point.",
                "url": "https://example.com/bbc",
                "publishedAt": "2024-05-06T10:00:00Z"
            },
            { "source": { "id": null, "name": "[Removed]" }, "title": "[Removed]" },
            { "source": { "name": "Reuters" }, "title": "Rates rise again", "description": "" }
        ]
    }"#;

    fn stub_retriever(addr: std::net::SocketAddr) -> RetrieverConfig {
        RetrieverConfig {
            rss_endpoint: format!("http://{}/rss/search", addr),
            newsapi_endpoint: format!("http://{}/v2/everything", addr),
            rss_params: Vec::new(),
            timeout_secs: 5,
            retries: 1,
            ..RetrieverConfig::default()
        }
    }

    #[test]
    fn test_parse_rss_feed() {
        setup();
        let articles = parse_feed(RSS_FEED).unwrap();
        info!("Parsed articles: {:?}", articles);
        assert_eq!(articles.len(), 3);

        assert_eq!(articles[0].title, "Why the sky is blue");
        assert_eq!(articles[0].source.as_deref(), Some("Science Daily"));
        assert_eq!(articles[0].link.as_deref(), Some("https://example.com/a"));
        assert_eq!(articles[0].description.as_deref(), Some("Why the sky is blue Science Daily"));
        assert_eq!(articles[0].published.as_deref(), Some("Mon, 06 May 2024 10:00:00 GMT"));

        assert_eq!(articles[1].title, "Rayleigh scattering explained");
        assert_eq!(articles[1].source.as_deref(), Some("Physics Today"));

        assert_eq!(articles[2].title, "Blue skies ahead");
        assert_eq!(articles[2].source, None);
    }

    #[test]
    fn test_parse_atom_feed() {
        setup();
        let articles = parse_feed(ATOM_FEED).unwrap();
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title, "Sky remains blue, scientists confirm");
        assert_eq!(articles[0].source.as_deref(), Some("Reuters"));
        assert_eq!(articles[0].link.as_deref(), Some("https://example.com/atom/1"));
        assert_eq!(articles[0].published.as_deref(), Some("2024-05-06T10:00:00Z"));

        let mut expected = Article::new("Sky remains blue, scientists confirm")
            .with_description("Observations confirm it.")
            .with_source("Reuters")
            .with_link("https://example.com/atom/1");
        expected.published = Some("2024-05-06T10:00:00Z".to_string());
        assert_eq!(articles[0], expected);
    }

    #[test]
    fn test_parse_empty_and_broken_feeds() {
        let empty = parse_feed("<rss><channel><title>Nothing</title></channel></rss>").unwrap();
        assert!(empty.is_empty());

        let broken = parse_feed("<rss><channel><item><title>Broken");
        assert!(matches!(broken, Err(CheckError::Parse { .. })));
    }

    #[test]
    fn test_parse_news_api() {
        let articles = parse_news_api(NEWS_API_BODY).unwrap();
        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].source.as_deref(), Some("BBC News"));
        assert_eq!(articles[0].link.as_deref(), Some("https://example.com/bbc"));
        assert_eq!(articles[1].title, "Rates rise again");
        assert_eq!(articles[1].description, None);

        let rejected = parse_news_api(
            r#"{"status":"error","code":"apiKeyInvalid","message":"Your API key is invalid."}"#
        );
        match rejected {
            Err(CheckError::Parse { message, .. }) => assert!(message.contains("invalid")),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_parse_embeddings_orders_by_index() {
        let body =
            r#"{"data":[{"index":1,"embedding":[0.0,1.0]},{"index":0,"embedding":[1.0,0.0]}]}"#;
        let vectors = parse_embeddings(body, 2).unwrap();
        assert_eq!(vectors, vec![vec![1.0, 0.0], vec![0.0, 1.0]]);

        assert!(matches!(parse_embeddings(body, 3), Err(CheckError::Embedding(_))));
        let ragged = r#"{"data":[{"index":0,"embedding":[1.0]},{"index":1,"embedding":[1.0,2.0]}]}"#;
        assert!(matches!(parse_embeddings(ragged, 2), Err(CheckError::Embedding(_))));
    }

    #[tokio::test]
    async fn test_rss_source_reads_feed() {
        setup();
        let (addr, hits) = spawn_stub(
            vec![StubResponse::new(200, "application/rss+xml", RSS_FEED)]
        ).await;
        let source = RssFeedSource::new(&stub_retriever(addr)).unwrap();

        match source.search("sky blue", 2).await {
            RetrievalOutcome::Found(articles) => {
                assert_eq!(articles.len(), 2);
                assert_eq!(articles[0].title, "Why the sky is blue");
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_rss_source_server_error_is_not_retried() {
        setup();
        let (addr, hits) = spawn_stub(
            vec![StubResponse::new(500, "text/plain", "internal error")]
        ).await;
        let source = RssFeedSource::new(&stub_retriever(addr)).unwrap();

        match source.search("sky blue", 5).await {
            RetrievalOutcome::Unavailable { reason } => assert!(reason.contains("500")),
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_rss_source_retries_transient_failure() {
        setup();
        let (addr, hits) = spawn_stub(
            vec![
                StubResponse::new(503, "text/plain", "busy"),
                StubResponse::new(200, "application/rss+xml", RSS_FEED)
            ]
        ).await;
        let source = RssFeedSource::new(&stub_retriever(addr)).unwrap();

        let outcome = source.search("sky blue", 10).await;
        assert!(matches!(outcome, RetrievalOutcome::Found(ref a) if a.len() == 3));
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_rss_source_gives_up_after_retries() {
        let (addr, hits) = spawn_stub(vec![StubResponse::new(503, "text/plain", "busy")]).await;
        let source = RssFeedSource::new(&stub_retriever(addr)).unwrap();

        let outcome = source.search("sky blue", 10).await;
        assert!(matches!(outcome, RetrievalOutcome::Unavailable { .. }));
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_rss_source_unparseable_body() {
        let (addr, _) = spawn_stub(
            vec![StubResponse::new(200, "text/html", "<rss><channel><item><title>cut")]
        ).await;
        let source = RssFeedSource::new(&stub_retriever(addr)).unwrap();
        assert!(
            matches!(source.search("sky", 5).await, RetrievalOutcome::Unavailable { .. })
        );
    }

    #[tokio::test]
    async fn test_news_api_source() {
        setup();
        let (addr, hits) = spawn_stub(
            vec![StubResponse::new(200, "application/json", NEWS_API_BODY)]
        ).await;
        let config = RetrieverConfig {
            api_key: Some("test-key".to_string()),
            ..stub_retriever(addr)
        };
        let source = NewsApiSource::new(&config).unwrap();

        match source.search("central bank rates", 1).await {
            RetrievalOutcome::Found(articles) => {
                assert_eq!(articles.len(), 1);
                assert_eq!(articles[0].title, "Central bank raises rates");
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_news_api_without_key_is_unavailable() {
        setup();
        if std::env::var(NEWS_API_KEY_VAR).is_ok() {
            info!("{} is set, skipping missing-key test", NEWS_API_KEY_VAR);
            return;
        }
        let source = NewsApiSource::new(&RetrieverConfig::default()).unwrap();
        assert!(
            matches!(source.search("anything", 5).await, RetrievalOutcome::Unavailable { .. })
        );
    }

    #[tokio::test]
    async fn test_remote_embedder() {
        setup();
        let (addr, hits) = spawn_stub(
            vec![
                StubResponse::new(
                    200,
                    "application/json",
                    r#"{"data":[{"index":0,"embedding":[0.6,0.8]},{"index":1,"embedding":[0.8,0.6]}]}"#
                )
            ]
        ).await;
        let config = EmbeddingConfig {
            endpoint: Some(format!("http://{}/v1/embeddings", addr)),
            api_key: Some("test-key".to_string()),
            timeout_secs: 5,
            ..EmbeddingConfig::default()
        };
        let embedder = RemoteEmbedder::new(&config).unwrap();

        let vectors = embedder
            .embed(&["first text".to_string(), "second text".to_string()]).await
            .unwrap();
        assert_eq!(vectors.len(), 2);
        assert_eq!(vectors[0], vec![0.6, 0.8]);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_remote_embedder_uses_configured_retries() {
        setup();
        let body = r#"{"data":[{"index":0,"embedding":[1.0,0.0]}]}"#;
        let (addr, hits) = spawn_stub(
            vec![
                StubResponse::new(503, "text/plain", "busy"),
                StubResponse::new(503, "text/plain", "busy"),
                StubResponse::new(200, "application/json", body)
            ]
        ).await;
        let config = EmbeddingConfig {
            endpoint: Some(format!("http://{}/v1/embeddings", addr)),
            timeout_secs: 5,
            retries: 2,
            ..EmbeddingConfig::default()
        };
        let embedder = RemoteEmbedder::new(&config).unwrap();

        let vectors = embedder.embed(&["only text".to_string()]).await.unwrap();
        assert_eq!(vectors, vec![vec![1.0, 0.0]]);
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_remote_embedder_requires_endpoint() {
        let result = RemoteEmbedder::new(&EmbeddingConfig::default());
        assert!(matches!(result, Err(CheckError::Embedding(_))));
    }
}
