use crate::api::{handlers, AppState};
use crate::config::ServerConfig;
use crate::error::{AppError, Result};
use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Router,
};
use std::time::Duration;
use tower_http::{
    cors::CorsLayer,
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};

/// Build the main API router
pub fn build_router(state: AppState, server: &ServerConfig) -> Result<Router> {
    let router = Router::new()
        // Health endpoints
        .route("/health", get(handlers::health_check))
        // Catalog
        .route("/api/products", get(handlers::list_products))
        .route("/api/products/search", get(handlers::search_products))
        // Add state
        .with_state(state)
        // Add middleware
        .layer(TimeoutLayer::new(Duration::from_secs(
            server.request_timeout_secs,
        )))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().include_headers(true))
                .on_response(DefaultOnResponse::new().include_headers(true)),
        );

    match server.cors_origin.as_deref() {
        Some(origin) => Ok(router.layer(cors_layer(origin)?)),
        None => Ok(router),
    }
}

fn cors_layer(origin: &str) -> Result<CorsLayer> {
    if origin == "*" {
        return Ok(CorsLayer::permissive());
    }

    let origin = origin.parse::<HeaderValue>().map_err(|e| {
        AppError::Configuration(format!("Invalid CORS origin '{}': {}", origin, e))
    })?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET]))
}
