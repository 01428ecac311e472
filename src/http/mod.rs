//! HTTP control surface for the app shells
//!
//! This module provides a REST API driving the capture core:
//! - POST /capture/start - Start a recording (supersedes any active one)
//! - POST /capture/stop - Stop and return the artifact
//! - POST /capture/cancel - Abandon the recording (never fails)
//! - GET /capture/status - Query session state
//! - POST /capture/transcribe - Hand an artifact to the transcription backend
//! - POST /interpret - Submit dream text for structured interpretation
//! - GET /interpret/health - Readiness of the interpretation backend
//! - GET /health - Health check

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
