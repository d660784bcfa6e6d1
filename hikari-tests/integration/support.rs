//! Shared helpers: spawn the catalog app on an ephemeral port, spawn stub
//! upstream sources, build catalog documents.

use std::net::SocketAddr;
use std::sync::Arc;

use hikari_core::catalog::load_catalog;
use hikari_core::config::DeliveryConfig;
use hikari_core::delivery;
use hikari_web::{AppState, build_router};

/// Writes `document` to a temp file, loads it and serves the API on an
/// ephemeral port. Returns the bound address.
pub async fn spawn_catalog_app(document: &str, config: DeliveryConfig) -> SocketAddr {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("animes.json");
    std::fs::write(&path, document).unwrap();

    let (index, report) = load_catalog(&[path]);
    let client = delivery::outbound_client(&config).unwrap();
    let state = AppState {
        catalog: Arc::new(index),
        load_report: Arc::new(report),
        delivery: delivery::strategy_for(client, &config),
    };

    let router = build_router(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

/// Serves a stub upstream router on an ephemeral port.
pub async fn spawn_upstream(router: axum::Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

/// The scenario dataset: one anime "demo" with one season of two episodes.
/// Episode "1" is a placeholder without sources; episode "2" points at
/// `source_url`.
pub fn demo_document(source_url: &str) -> String {
    format!(
        r#"[
            {{
                "id": "1",
                "title": "Demo",
                "slug": "demo",
                "release": "2024",
                "imdb_rating": "8.2",
                "time": "24m",
                "genre": "Action",
                "genres": ["Action", "Adventure"],
                "image": "https://img.example/demo.jpg",
                "cover_url": "https://img.example/demo-cover.jpg",
                "details": {{"studio": "Example"}},
                "synopsis": "A demo entry.",
                "seasons": [
                    {{
                        "season_name": "Season 1",
                        "episodes": [
                            {{"episode_number": "1", "title": "Opening", "player_urls": []}},
                            {{"episode_number": "2", "title": "Second", "player_urls": ["{source_url}"]}}
                        ]
                    }}
                ]
            }}
        ]"#
    )
}

/// HTTP client that does not follow redirects, so 307 responses can be
/// asserted directly.
pub fn api_client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap()
}
