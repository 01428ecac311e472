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
        // Recording control
        .route("/capture/start", post(handlers::start_capture))
        .route("/capture/stop", post(handlers::stop_capture))
        .route("/capture/cancel", post(handlers::cancel_capture))
        .route("/capture/status", get(handlers::capture_status))
        // Transcription handoff
        .route("/capture/transcribe", post(handlers::transcribe))
        // Interpretation boundary
        .route("/interpret", post(handlers::interpret_dream))
        .route("/interpret/health", get(handlers::interpreter_health))
        // Browser shells call from another origin during development
        .layer(CorsLayer::permissive())
        // Add tracing middleware for request logging
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
