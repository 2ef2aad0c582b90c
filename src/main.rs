use catalog_search::{
    api::{build_router, AppState},
    config::{Config, ObservabilityConfig},
    search::SearchService,
    seed::run_seed,
    state::create_store,
};
use std::sync::Arc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let loaded = Config::load();
    let config = loaded.as_ref().cloned().unwrap_or_default();

    init_tracing(&config.observability);

    if let Err(e) = &loaded {
        tracing::warn!("Failed to load configuration: {}", e);
        tracing::warn!("Using default configuration");
    }

    tracing::info!(
        "Starting {} v{}",
        config.observability.service_name,
        env!("CARGO_PKG_VERSION")
    );

    // Initialize storage backend
    tracing::info!("Storage backend: {:?}", config.storage.backend);
    let store = create_store(&config.storage)?;
    tracing::info!("Storage backend initialized");

    if config.app.auto_seed {
        match run_seed(store.as_ref()).await {
            Ok(count) => tracing::info!(count, "Catalog seeded on startup"),
            Err(e) => tracing::error!("Seeding failed, continuing with existing data: {}", e),
        }
    }

    tracing::info!(strategy = %config.search.strategy, "Search service initialized");
    let search = Arc::new(SearchService::new(store, config.search.clone()));

    let app = build_router(AppState::new(search), &config.server)?;

    // Start HTTP server
    let http_addr = config.http_addr();
    let listener = tokio::net::TcpListener::bind(&http_addr).await?;

    tracing::info!("HTTP API server listening on http://{}", http_addr);
    tracing::info!("   Health check: http://{}/health", http_addr);
    tracing::info!("   Search: http://{}/api/products/search?q=radar", http_addr);
    tracing::info!("Press Ctrl+C to shutdown");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shut down gracefully");
    Ok(())
}

fn init_tracing(observability: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "catalog_search={level},tower_http={level}",
            level = observability.log_level
        )
        .into()
    });

    let json = observability.json_logs;
    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| fmt::layer().json()))
        .with((!json).then(|| fmt::layer()))
        .init();
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
