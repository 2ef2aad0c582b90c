//! HTTP API tests driven through the router without a socket

mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use catalog_search::api::{build_router, AppState};
use catalog_search::config::ServerConfig;
use catalog_search::search::{SearchConfig, SearchService};
use catalog_search::state::{InMemoryStore, ProductStore};
use common::{populate, sample_catalog};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

async fn create_test_app() -> Router {
    let store = Arc::new(InMemoryStore::new());
    populate(store.as_ref(), sample_catalog()).await;

    let search = Arc::new(SearchService::new(store, SearchConfig::default()));
    build_router(AppState::new(search), &ServerConfig::default()).unwrap()
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn test_health() {
    let (status, body) = get(create_test_app().await, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_search_palindrome() {
    let (status, body) = get(create_test_app().await, "/api/products/search?q=radar").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["query"], "radar");
    assert_eq!(body["isPalindrome"], true);
    assert_eq!(body["totalItems"], 1);
    assert_eq!(body["items"][0]["originalPrice"], 100.0);
    assert_eq!(body["items"][0]["finalPrice"], 50.0);
    assert_eq!(body["items"][0]["discountPercentage"], 50);
}

#[tokio::test]
async fn test_search_term_alias_and_precedence() {
    let (_, alias) = get(
        create_test_app().await,
        "/api/products/search?searchTerm=laptop",
    )
    .await;
    assert_eq!(alias["query"], "laptop");
    assert_eq!(alias["totalItems"], 1);
    assert!(alias["items"][0].get("discountPercentage").is_none());

    let (_, both) = get(
        create_test_app().await,
        "/api/products/search?q=radar&searchTerm=laptop",
    )
    .await;
    assert_eq!(both["query"], "radar");
}

#[tokio::test]
async fn test_search_trims_query() {
    let (status, body) = get(
        create_test_app().await,
        "/api/products/search?q=%20%20radar%20%20",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["query"], "radar");
    assert_eq!(body["totalItems"], 1);
}

#[tokio::test]
async fn test_search_without_term_browses() {
    let (status, body) = get(create_test_app().await, "/api/products/search").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["query"], "");
    assert_eq!(body["isPalindrome"], false);
    assert_eq!(body["totalItems"], 4);
}

#[tokio::test]
async fn test_search_term_too_long() {
    let uri = format!("/api/products/search?q={}", "a".repeat(256));
    let (status, body) = get(create_test_app().await, &uri).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_list_products_pagination() {
    let (status, body) = get(create_test_app().await, "/api/products?limit=3&offset=3").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["products"].as_array().unwrap().len(), 1);
    assert_eq!(body["totalItems"], 4);
    assert_eq!(body["currentPage"], 2);
    assert_eq!(body["totalPages"], 2);
    assert_eq!(body["hasNext"], false);
    assert_eq!(body["hasPrevious"], true);
}

#[tokio::test]
async fn test_list_products_defaults() {
    let (status, body) = get(create_test_app().await, "/api/products").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["products"].as_array().unwrap().len(), 4);
    assert_eq!(body["products"][0]["id"], 1);
    assert_eq!(body["currentPage"], 1);
    assert_eq!(body["totalPages"], 1);
}

#[tokio::test]
async fn test_list_products_rejects_bad_limit() {
    for uri in [
        "/api/products?limit=0",
        "/api/products?limit=-5",
        "/api/products?offset=-1",
        "/api/products?limit=ten",
    ] {
        let (status, body) = get(create_test_app().await, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }
}

#[tokio::test]
async fn test_unknown_route() {
    let (status, _) = get(create_test_app().await, "/api/unknown").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_store_shared_with_search() {
    let store = Arc::new(InMemoryStore::new());
    let search = Arc::new(SearchService::new(store.clone(), SearchConfig::default()));
    let app = build_router(AppState::new(search), &ServerConfig::default()).unwrap();

    populate(store.as_ref(), sample_catalog()).await;
    assert_eq!(store.count_products().await.unwrap(), 4);

    let (_, body) = get(app, "/api/products/search?q=kayak").await;
    assert_eq!(body["items"][0]["finalPrice"], 44.98);
}
