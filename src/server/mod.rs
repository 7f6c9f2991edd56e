//! Dashboard HTTP server: REST API plus the real-time WebSocket channel

pub mod routes;
pub mod ws;

pub use routes::AppState;

use anyhow::Result;
use axum::Router;
use axum::routing::{get, post};
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

/// Builds the full application router. CORS stays permissive: the dashboard
/// frontend is served separately during development.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health))
        .route("/api/stats", get(routes::get_stats))
        .route("/api/bot-status", get(routes::get_bot_status))
        .route("/api/prices", get(routes::get_prices))
        .route("/api/recent-trades", get(routes::get_recent_trades))
        .route("/api/transactions", get(routes::get_transactions))
        .route("/api/execute-trade", post(routes::execute_trade))
        .route("/api/estimate-returns", post(routes::estimate_returns))
        .route(
            "/api/bot-settings",
            get(routes::get_bot_settings).put(routes::put_bot_settings),
        )
        .route(
            "/api/notifier-settings",
            get(routes::get_notifier_settings).put(routes::put_notifier_settings),
        )
        .route("/api/test-notifier", post(routes::test_notifier))
        .route("/api/bot/pause", post(routes::pause_bot))
        .route("/api/bot/resume", post(routes::resume_bot))
        .route("/api/simulate-price", post(routes::simulate_price))
        .route("/ws", get(ws::websocket_handler))
        .layer(cors)
        .with_state(state)
}

/// Binds and serves until Ctrl+C.
pub async fn serve(state: AppState, port: u16) -> Result<()> {
    let app = build_router(state);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(port, "Dashboard API listening on http://localhost:{port}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("📛 Received shutdown signal (Ctrl+C)...");
}
