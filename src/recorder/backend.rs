use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::encoder::{EncoderProfile, Platform};
use crate::error::CaptureError;

use super::wav::WavRecorderBackend;

/// Opaque reference to a finished recording's storage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactLocation(PathBuf);

impl ArtifactLocation {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }
}

impl std::fmt::Display for ArtifactLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// Reference to a completed recording.
///
/// Produced only by a successful `stop`. The underlying storage is owned by
/// the OS/file layer; the artifact is valid until the first transcription or
/// deletion consumes it and is not guaranteed durable afterward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioArtifact {
    pub location: ArtifactLocation,
    pub duration_ms: u64,
    pub created_at: DateTime<Utc>,
}

/// PCM audio pushed into the in-process recorder (i16, interleaved)
#[derive(Debug, Clone)]
pub struct AudioFrame {
    pub samples: Vec<i16>,
    pub sample_rate: u32,
    pub channels: u16,
}

/// The OS recording resource seam.
///
/// A backend owns at most one active recorder handle. The session drives it
/// through the documented order: configure the audio session for capture,
/// allocate the recorder, then on the way out finalize, restore a
/// playback-safe audio session, and (for cancel) delete the artifact. Every
/// method may suspend for an OS round trip.
#[async_trait::async_trait]
pub trait RecorderBackend: Send + Sync {
    /// Put the OS audio session into capture configuration
    /// (distinct from playback; must be undone by `restore_playback`)
    async fn configure_capture(&mut self) -> Result<(), CaptureError>;

    /// Allocate the recording resource and start capturing to `output`
    async fn begin(&mut self, profile: &EncoderProfile, output: &Path)
        -> Result<(), CaptureError>;

    /// Release the recording resource and read back the final location
    /// and elapsed duration
    async fn finalize(&mut self) -> Result<AudioArtifact, CaptureError>;

    /// Restore the playback-safe audio session configuration
    async fn restore_playback(&mut self) -> Result<(), CaptureError>;

    /// Delete a finished artifact's underlying storage
    async fn discard(&mut self, location: &ArtifactLocation) -> Result<(), CaptureError>;

    /// Whether a recording resource is currently allocated
    fn is_capturing(&self) -> bool;

    /// Backend name for logging
    fn name(&self) -> &str;
}

/// Recorder backend factory.
///
/// Production app shells install their own backend over the native recorder
/// (AVAudioRecorder / MediaRecorder); every platform maps to the in-process
/// WAV backend here so the core runs unmodified in dev and CI.
pub struct RecorderBackendFactory;

impl RecorderBackendFactory {
    pub fn create(platform: Platform) -> Box<dyn RecorderBackend> {
        match platform {
            Platform::Ios | Platform::Android | Platform::Browser => {
                Box::new(WavRecorderBackend::new())
            }
        }
    }
}
