use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use digest_client::controller::GENERIC_FAILURE_MESSAGE;
use digest_client::{ApiClient, ArticleSource, ClientConfig, HttpArticleSource, RefreshController, RefreshOutcome};
use digest_core::{ArticleRecord, Citation, Document, FailureKind, FixtureSet, Timeframe};
use digest_page::MemoryDocument;
use digest_web::AppState;
use scraper::{Html, Selector};
use tokio::sync::oneshot;

fn fixtures() -> FixtureSet {
    FixtureSet::new().with_articles(
        Timeframe::Monthly,
        vec![
            ArticleRecord {
                title: "Summary: rust".to_string(),
                date: "2024-03-05".to_string(),
                url: "#".to_string(),
                source: "2 Articles".to_string(),
                summary: Some("• Rust 1.77 released\n- Async closures land".to_string()),
                sources_used: vec![
                    Citation {
                        title: "Announcing Rust 1.77".to_string(),
                        url: "https://blog.rust-lang.org/1.77".to_string(),
                    },
                    Citation {
                        title: "Async closures RFC".to_string(),
                        url: "https://rust-lang.github.io/rfcs/async-closures".to_string(),
                    },
                ],
            },
            ArticleRecord {
                title: "Summary: cargo".to_string(),
                ..Default::default()
            },
        ],
    )
}

async fn start_backend() -> SocketAddr {
    let (tx, rx) = oneshot::channel();
    let state = AppState::new(fixtures()).with_preference_id("1");
    tokio::spawn(digest_web::serve("127.0.0.1:0".parse().unwrap(), state, move |addr| {
        let _ = tx.send(addr);
    }));
    rx.await.unwrap()
}

fn config_for(addr: SocketAddr) -> ClientConfig {
    ClientConfig::default()
        .with_base_url(&format!("http://{}", addr))
        .with_timeout(Duration::from_secs(5))
}

fn page(config: &ClientConfig) -> Arc<MemoryDocument> {
    Arc::new(MemoryDocument::standard_page(&config.layout, Timeframe::Weekly, Some("1")))
}

#[tokio::test]
async fn test_selection_change_renders_backend_articles() {
    let addr = start_backend().await;
    let config = config_for(addr);
    let doc = page(&config);
    let source = Arc::new(HttpArticleSource::new(&config).unwrap());
    let controller = RefreshController::bind(doc.clone(), source, &config).unwrap();

    doc.set_value(&config.layout.timeframe_select, "monthly");
    assert_eq!(controller.handle_change().await, RefreshOutcome::Rendered(2));

    let html = doc.inner_html(&config.layout.articles_container).unwrap();
    let fragment = Html::parse_fragment(&html);
    let titles: Vec<String> = fragment
        .select(&Selector::parse(".article-card h2").unwrap())
        .map(|el| el.text().collect())
        .collect();
    assert_eq!(titles, vec!["Summary: rust", "Summary: cargo"]);

    let bullets: Vec<String> = fragment
        .select(&Selector::parse(".summary li").unwrap())
        .map(|el| el.text().collect())
        .collect();
    assert_eq!(bullets, vec!["Rust 1.77 released", "Async closures land"]);

    assert_eq!(doc.is_hidden(&config.layout.loading_indicator), Some(true));
    assert!(doc.alerts().is_empty());
}

#[tokio::test]
async fn test_backend_failure_is_alerted() {
    let addr = start_backend().await;
    let config = config_for(addr);
    let doc = page(&config);
    let source = Arc::new(HttpArticleSource::new(&config).unwrap());
    let controller = RefreshController::bind(doc.clone(), source, &config).unwrap();

    doc.set_value(&config.layout.timeframe_select, "daily");
    let outcome = controller.handle_change().await;

    let expected = "Error updating timeframe: No articles found for the updated timeframe".to_string();
    assert_eq!(outcome, RefreshOutcome::Failed(expected.clone()));
    assert_eq!(doc.alerts(), vec![expected]);
    assert_eq!(doc.inner_html(&config.layout.articles_container).as_deref(), Some(""));
    assert_eq!(doc.is_hidden(&config.layout.loading_indicator), Some(true));
}

#[tokio::test]
async fn test_non_success_status_is_transport_failure() {
    let addr = start_backend().await;
    let config = config_for(addr).with_endpoint("/no_such_endpoint");
    let source = HttpArticleSource::new(&config).unwrap();

    let err = source
        .fetch_articles(&[("timeframe".to_string(), "weekly".to_string())])
        .await
        .unwrap_err();
    assert_eq!(err.kind(), FailureKind::Transport);
    assert_eq!(err.to_string(), "Transport error: HTTP error! status: 404");
}

#[tokio::test]
async fn test_html_body_is_malformed_response() {
    let addr = start_backend().await;
    let api = ApiClient::new(&format!("http://{}", addr), Duration::from_secs(5)).unwrap();

    let err = api.get_json::<serde_json::Value>("/").await.unwrap_err();
    assert_eq!(err.kind(), FailureKind::MalformedResponse);
}

#[tokio::test]
async fn test_unreachable_backend_shows_generic_alert() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = config_for(addr);
    let doc = page(&config);
    let source = Arc::new(HttpArticleSource::new(&config).unwrap());
    let controller = RefreshController::bind(doc.clone(), source, &config).unwrap();

    let outcome = controller.handle_change().await;

    assert_eq!(outcome, RefreshOutcome::Failed(GENERIC_FAILURE_MESSAGE.to_string()));
    assert_eq!(doc.alerts(), vec![GENERIC_FAILURE_MESSAGE.to_string()]);
    assert_eq!(doc.is_hidden(&config.layout.loading_indicator), Some(true));
}
