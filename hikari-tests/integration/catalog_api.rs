//! End-to-end tests for diagnostics, listing and navigation, plus the
//! redirect delivery contract.

use hikari_core::config::DeliveryConfig;
use serde_json::Value;

use crate::support::{api_client, demo_document, spawn_catalog_app};

fn redirect_config() -> DeliveryConfig {
    // Redirect is the default policy
    DeliveryConfig::default()
}

#[tokio::test]
async fn test_diagnostics_reports_loaded_catalog() {
    let addr = spawn_catalog_app(&demo_document("http://x/video.ts"), redirect_config()).await;

    let body: Value = api_client()
        .get(format!("http://{addr}/"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["status"], "ok");
    assert_eq!(body["entries"], 1);
    assert!(body["detail"].is_null());
}

#[tokio::test]
async fn test_malformed_document_yields_empty_catalog_not_a_crash() {
    let addr = spawn_catalog_app("[{not valid json", redirect_config()).await;
    let client = api_client();

    let diagnostics: Value = client
        .get(format!("http://{addr}/"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(diagnostics["status"], "malformed");
    assert_eq!(diagnostics["entries"], 0);

    // The process keeps serving; the listing is just empty
    let listing: Value = client
        .get(format!("http://{addr}/animes"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listing, serde_json::json!([]));
}

#[tokio::test]
async fn test_listing_returns_summaries() {
    let addr = spawn_catalog_app(&demo_document("http://x/video.ts"), redirect_config()).await;

    let listing: Value = api_client()
        .get(format!("http://{addr}/animes"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let entries = listing.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["slug"], "demo");
    assert_eq!(entries[0]["title"], "Demo");
    // Summaries do not carry the season tree
    assert!(entries[0].get("seasons").is_none());
}

#[tokio::test]
async fn test_anime_details_carries_full_record() {
    let addr = spawn_catalog_app(&demo_document("http://x/video.ts"), redirect_config()).await;
    let client = api_client();

    let anime: Value = client
        .get(format!("http://{addr}/animes/demo"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(anime["slug"], "demo");
    assert_eq!(anime["synopsis"], "A demo entry.");
    assert_eq!(anime["seasons"][0]["season_name"], "Season 1");

    let missing = client
        .get(format!("http://{addr}/animes/unknown"))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status().as_u16(), 404);
}

#[tokio::test]
async fn test_season_detail_and_bounds() {
    let addr = spawn_catalog_app(&demo_document("http://x/video.ts"), redirect_config()).await;
    let client = api_client();

    let season: Value = client
        .get(format!("http://{addr}/animes/demo/seasons/1"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(season["season_name"], "Season 1");
    assert_eq!(season["episodes"].as_array().unwrap().len(), 2);

    // Position is 1-based: 0 and past-the-end are both missing
    for position in ["0", "2"] {
        let response = client
            .get(format!("http://{addr}/animes/demo/seasons/{position}"))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 404);
    }

    let body: Value = client
        .get(format!("http://{addr}/animes/demo/seasons/2"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(
        body["detail"]
            .as_str()
            .unwrap()
            .contains("season 2 not found")
    );
}

#[tokio::test]
async fn test_redirect_points_at_source_link() {
    let addr = spawn_catalog_app(&demo_document("http://x/video.ts"), redirect_config()).await;

    let response = api_client()
        .get(format!("http://{addr}/animes/demo/seasons/1/2"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 307);
    assert_eq!(
        response.headers().get("location").unwrap(),
        "http://x/video.ts"
    );
}

#[tokio::test]
async fn test_episode_without_sources_is_not_found() {
    let addr = spawn_catalog_app(&demo_document("http://x/video.ts"), redirect_config()).await;

    let response = api_client()
        .get(format!("http://{addr}/animes/demo/seasons/1/1"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn test_unknown_episode_is_not_found() {
    let addr = spawn_catalog_app(&demo_document("http://x/video.ts"), redirect_config()).await;

    // "02" does not match episode "2": identifiers are exact strings
    let response = api_client()
        .get(format!("http://{addr}/animes/demo/seasons/1/02"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 404);
}
