use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::encoder::EncoderProfile;
use crate::error::CaptureError;
use crate::permission::PermissionGate;

use super::backend::{AudioArtifact, RecorderBackend};

/// Advisory ceiling for a single recording, in milliseconds.
///
/// Exposed for UI countdown timers; the session itself does not enforce it.
pub const MAX_RECORDING_MS: u64 = 5 * 60 * 1000;

/// Lifecycle state of a recording session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    Idle,
    Recording,
    /// A start attempt failed on the OS resource; cleared by the next `start`
    Error,
}

/// Snapshot of the session for status queries
#[derive(Debug, Clone, Serialize)]
pub struct SessionStatus {
    pub state: SessionState,
    pub is_recording: bool,
    pub started_at: Option<DateTime<Utc>>,
    pub elapsed_ms: u64,
}

struct Inner {
    backend: Box<dyn RecorderBackend>,
    gate: Box<dyn PermissionGate>,
    profile: EncoderProfile,
    output_dir: PathBuf,
    state: SessionState,
    started_at: Option<DateTime<Utc>>,
}

/// The recording lifecycle state machine.
///
/// Owns at most one OS recording resource at a time through its backend.
/// `start`, `stop` and `cancel` are serialized by an internal async mutex, so
/// overlapping calls on the same session cannot race on the shared handle;
/// each may suspend for permission prompts, audio-session configuration and
/// resource allocation/teardown.
///
/// Sessions are plain constructed objects: tests build as many isolated ones
/// as they need, nothing is process-global.
pub struct RecordingSession {
    inner: Mutex<Inner>,
    // Mirror of `state == Recording` so `is_recording` never has to lock
    recording_flag: AtomicBool,
}

impl RecordingSession {
    pub fn new(
        backend: Box<dyn RecorderBackend>,
        gate: Box<dyn PermissionGate>,
        profile: EncoderProfile,
        output_dir: impl Into<PathBuf>,
    ) -> Result<Self, CaptureError> {
        let output_dir = output_dir.into();
        std::fs::create_dir_all(&output_dir).map_err(|e| {
            CaptureError::OsResource(format!(
                "failed to create recordings directory {}: {e}",
                output_dir.display()
            ))
        })?;

        Ok(Self {
            inner: Mutex::new(Inner {
                backend,
                gate,
                profile,
                output_dir,
                state: SessionState::Idle,
                started_at: None,
            }),
            recording_flag: AtomicBool::new(false),
        })
    }

    /// Start a new recording.
    ///
    /// Auto-supersede policy: if a recording is already active it is
    /// finalized and discarded first, never rejected. Permission is ensured
    /// with a live check followed by at most one consent prompt; refusal
    /// fails with [`CaptureError::PermissionDenied`]. OS failures during
    /// audio-session configuration or recorder allocation fail with
    /// [`CaptureError::OsResource`] and park the session in
    /// [`SessionState::Error`] with no resource allocated.
    pub async fn start(&self) -> Result<(), CaptureError> {
        let mut guard = self.inner.lock().await;
        let inner = &mut *guard;

        if inner.state == SessionState::Recording {
            info!("start while recording: superseding active recording");
            discard_active(inner).await;
            self.recording_flag.store(false, Ordering::SeqCst);
            inner.state = SessionState::Idle;
            inner.started_at = None;
        }

        // Live permission check; prompt at most once within this call
        if !inner.gate.has_permission().await && !inner.gate.request_permission().await {
            warn!("microphone permission refused");
            return Err(CaptureError::PermissionDenied);
        }

        if let Err(e) = inner.backend.configure_capture().await {
            error!("failed to configure capture audio session: {e}");
            inner.state = SessionState::Error;
            return Err(e);
        }

        let output = inner.output_dir.join(format!(
            "rec-{}.{}",
            uuid::Uuid::new_v4(),
            inner.profile.file_extension()
        ));

        let profile = inner.profile.clone();
        if let Err(e) = inner.backend.begin(&profile, &output).await {
            error!("failed to allocate recorder: {e}");
            if let Err(restore_err) = inner.backend.restore_playback().await {
                warn!("failed to restore playback audio session: {restore_err}");
            }
            inner.state = SessionState::Error;
            return Err(e);
        }

        inner.state = SessionState::Recording;
        inner.started_at = Some(Utc::now());
        self.recording_flag.store(true, Ordering::SeqCst);

        info!(
            "recording started ({} backend): {}",
            inner.backend.name(),
            output.display()
        );

        Ok(())
    }

    /// Stop the active recording and return its artifact.
    ///
    /// Fails with [`CaptureError::NoActiveRecording`] (no state change) when
    /// nothing is recording. Release is best-effort: the handle is cleared
    /// and the state returns to `Idle` even when finalize fails, so the
    /// session is never stuck holding a half-finalized resource.
    pub async fn stop(&self) -> Result<AudioArtifact, CaptureError> {
        let mut guard = self.inner.lock().await;
        let inner = &mut *guard;

        if inner.state != SessionState::Recording {
            return Err(CaptureError::NoActiveRecording);
        }

        let result = inner.backend.finalize().await;
        if let Err(e) = inner.backend.restore_playback().await {
            warn!("failed to restore playback audio session: {e}");
        }

        inner.state = SessionState::Idle;
        inner.started_at = None;
        self.recording_flag.store(false, Ordering::SeqCst);

        match result {
            Ok(artifact) => {
                info!(
                    "recording stopped: {} ({} ms)",
                    artifact.location, artifact.duration_ms
                );
                Ok(artifact)
            }
            Err(e) => {
                error!("failed to finalize recording: {e}");
                Err(e)
            }
        }
    }

    /// Abandon the active recording and delete its artifact.
    ///
    /// Best-effort rollback contract: no-op when nothing is recording, and
    /// every internal error during finalize, deletion or audio-session
    /// restore is logged and swallowed so the session always ends `Idle`.
    /// This deliberately diverges from `stop`'s stricter error surfacing.
    pub async fn cancel(&self) {
        let mut guard = self.inner.lock().await;
        let inner = &mut *guard;

        if inner.state != SessionState::Recording {
            return;
        }

        discard_active(inner).await;

        inner.state = SessionState::Idle;
        inner.started_at = None;
        self.recording_flag.store(false, Ordering::SeqCst);

        info!("recording cancelled");
    }

    /// Whether a recording is active right now. Pure query, no side effects.
    pub fn is_recording(&self) -> bool {
        self.recording_flag.load(Ordering::SeqCst)
    }

    /// Snapshot of the session for status endpoints
    pub async fn status(&self) -> SessionStatus {
        let inner = self.inner.lock().await;
        let elapsed_ms = inner
            .started_at
            .map(|t| Utc::now().signed_duration_since(t).num_milliseconds().max(0) as u64)
            .unwrap_or(0);

        SessionStatus {
            state: inner.state,
            is_recording: inner.state == SessionState::Recording,
            started_at: inner.started_at,
            elapsed_ms,
        }
    }
}

/// Finalize the active recording, delete its artifact and restore the
/// playback audio session, logging and swallowing every failure.
async fn discard_active(inner: &mut Inner) {
    match inner.backend.finalize().await {
        Ok(artifact) => {
            if let Err(e) = inner.backend.discard(&artifact.location).await {
                warn!("failed to delete discarded recording: {e}");
            }
        }
        Err(e) => {
            warn!("failed to finalize recording during discard: {e}");
        }
    }

    if let Err(e) = inner.backend.restore_playback().await {
        warn!("failed to restore playback audio session: {e}");
    }
}
