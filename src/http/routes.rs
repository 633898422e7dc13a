use super::handlers;
use super::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Listening control
        .route("/assistant/listen/start", post(handlers::start_listening))
        .route("/assistant/listen/stop", post(handlers::stop_listening))
        // Speech output control
        .route("/assistant/speech/interrupt", post(handlers::interrupt_speech))
        // Typed commands and status
        .route("/assistant/commands", post(handlers::submit_command))
        .route("/assistant/status", get(handlers::get_status))
        // Browser clients run on another origin
        .layer(CorsLayer::permissive())
        // Add tracing middleware for request logging
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
