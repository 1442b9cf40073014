pub mod api;

use crate::services::SharedSeriesStore;
use axum::{routing::get, Router};
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: SharedSeriesStore,
}

/// Start the axum server
pub async fn serve(store: SharedSeriesStore, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let app_state = AppState { store };

    // The chart widget is served from arbitrary static hosts
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([axum::http::Method::GET])
        .allow_headers(Any);

    tracing::info!("Registering routes:");
    tracing::info!("  GET /series/{{symbol}}?range=ytd&mode=percent");
    tracing::info!("  GET /series/{{symbol}}/table");
    tracing::info!("  GET /health");

    let app = Router::new()
        .route("/series/{symbol}", get(api::get_series_handler))
        .route("/series/{symbol}/table", get(api::get_table_handler))
        .route("/health", get(api::health_handler))
        .layer(cors)
        .with_state(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!(%addr, "Server listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
