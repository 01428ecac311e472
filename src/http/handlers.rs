use super::state::AppState;
use crate::error::{CaptureError, Language};
use crate::format::format_recording_duration;
use crate::interpret::{Interpretation, InterpretationRequest, InterpretError, InterpreterHealth};
use crate::recorder::{ArtifactLocation, AudioArtifact, SessionStatus};
use crate::transcribe::TranscriptionResult;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct CaptureStateResponse {
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct StopCaptureResponse {
    pub status: String,
    pub artifact: AudioArtifact,
    /// Display string for the UI (`m:ss`)
    pub duration_display: String,
}

#[derive(Debug, Deserialize)]
pub struct TranscribeRequest {
    pub location: ArtifactLocation,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Diagnostic detail, for logs and debugging
    pub error: String,
    /// Short localized message for the UI
    pub message: String,
}

fn error_response(err: &CaptureError, language: Language) -> (StatusCode, Json<ErrorResponse>) {
    let status = match err {
        CaptureError::PermissionDenied => StatusCode::FORBIDDEN,
        CaptureError::NoActiveRecording => StatusCode::CONFLICT,
        CaptureError::ArtifactNotFound(_) => StatusCode::NOT_FOUND,
        CaptureError::OsResource(_) => StatusCode::INTERNAL_SERVER_ERROR,
        CaptureError::TranscriptionFailed(_)
        | CaptureError::MalformedResponse(_)
        | CaptureError::Network(_) => StatusCode::BAD_GATEWAY,
    };

    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
            message: err.user_message(language).to_string(),
        }),
    )
}

fn interpret_error_response(
    err: &InterpretError,
    language: Language,
) -> (StatusCode, Json<ErrorResponse>) {
    let status = match err {
        InterpretError::EmptyDream => StatusCode::BAD_REQUEST,
        InterpretError::Failed(_)
        | InterpretError::MalformedResponse(_)
        | InterpretError::Network(_) => StatusCode::BAD_GATEWAY,
    };

    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
            message: err.user_message(language).to_string(),
        }),
    )
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /capture/start
/// Start a recording (supersedes any active one)
pub async fn start_capture(State(state): State<AppState>) -> impl IntoResponse {
    match state.session.start().await {
        Ok(()) => (
            StatusCode::OK,
            Json(CaptureStateResponse {
                status: "recording".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            error!("failed to start capture: {e}");
            error_response(&e, state.language).into_response()
        }
    }
}

/// POST /capture/stop
/// Stop the active recording and return its artifact
pub async fn stop_capture(State(state): State<AppState>) -> impl IntoResponse {
    match state.session.stop().await {
        Ok(artifact) => {
            info!("capture stopped: {}", artifact.location);
            (
                StatusCode::OK,
                Json(StopCaptureResponse {
                    status: "stopped".to_string(),
                    duration_display: format_recording_duration(artifact.duration_ms),
                    artifact,
                }),
            )
                .into_response()
        }
        Err(e) => {
            error!("failed to stop capture: {e}");
            error_response(&e, state.language).into_response()
        }
    }
}

/// POST /capture/cancel
/// Abandon the active recording; never fails
pub async fn cancel_capture(State(state): State<AppState>) -> impl IntoResponse {
    state.session.cancel().await;
    (
        StatusCode::OK,
        Json(CaptureStateResponse {
            status: "idle".to_string(),
        }),
    )
}

/// GET /capture/status
/// Snapshot of the session state
pub async fn capture_status(State(state): State<AppState>) -> Json<SessionStatus> {
    Json(state.session.status().await)
}

/// POST /capture/transcribe
/// Upload a finished artifact and return the recognized text
pub async fn transcribe(
    State(state): State<AppState>,
    Json(req): Json<TranscribeRequest>,
) -> impl IntoResponse {
    match state.transcriber.transcribe_audio(&req.location).await {
        Ok(result) => (StatusCode::OK, Json::<TranscriptionResult>(result)).into_response(),
        Err(e) => {
            error!("transcription failed: {e}");
            error_response(&e, state.language).into_response()
        }
    }
}

/// POST /interpret
/// Submit transcribed dream text for structured interpretation
pub async fn interpret_dream(
    State(state): State<AppState>,
    Json(req): Json<InterpretationRequest>,
) -> impl IntoResponse {
    match state.interpreter.interpret(&req).await {
        Ok(interpretation) => {
            (StatusCode::OK, Json::<Interpretation>(interpretation)).into_response()
        }
        Err(e) => {
            error!("interpretation failed: {e}");
            interpret_error_response(&e, state.language).into_response()
        }
    }
}

/// GET /interpret/health
/// Readiness of the interpretation backend
pub async fn interpreter_health(State(state): State<AppState>) -> impl IntoResponse {
    match state.interpreter.health().await {
        Ok(health) => (StatusCode::OK, Json::<InterpreterHealth>(health)).into_response(),
        Err(e) => {
            error!("interpreter health check failed: {e}");
            interpret_error_response(&e, state.language).into_response()
        }
    }
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
