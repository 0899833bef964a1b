pub mod core;
pub mod error_handler;
mod middleware_layer;
mod routes;

use std::sync::Arc;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tokio::{net::TcpListener, signal};
use tracing::{error, info};

use crate::{
    core::app_state::AppState,
    error_handler::{AppError, AppResult},
    middleware_layer::request_id::attach_request_id,
    routes::{health_route::health_route, questions::questions_route::ask_question_route},
};

/// Builds the gateway router around already-initialized state.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/v1/questions", post(ask_question_route))
        .route("/health", get(health_route))
        .layer(middleware::from_fn(attach_request_id))
        .with_state(state)
}

/// Loads state from the environment, binds `API_ADDRESS` and serves until Ctrl+C.
pub async fn start() -> AppResult<()> {
    let state = Arc::new(AppState::from_env()?);

    // Bind to address
    let listener = TcpListener::bind(&state.api_address)
        .await
        .map_err(|source| AppError::Bind {
            addr: state.api_address.clone(),
            source,
        })?;

    info!(
        address = %state.api_address,
        upstream = %state.forwarder.config().upstream_url,
        "ask gateway listening"
    );

    serve(listener, state).await
}

/// Serves the router on an existing listener with graceful shutdown on Ctrl+C.
pub async fn serve(listener: TcpListener, state: Arc<AppState>) -> AppResult<()> {
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    info!("ask gateway stopped");
    Ok(())
}

/// Returns a future that resolves when Ctrl+C is pressed
async fn shutdown_signal() {
    if let Err(err) = signal::ctrl_c().await {
        error!(error = %err, "failed to listen for shutdown signal");
        // Never resolve: without a signal handler the server runs until killed.
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
