use serde::{Deserialize, Serialize};
use thiserror::Error;

/// UI language for user-facing failure messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Fi,
    En,
}

impl Default for Language {
    fn default() -> Self {
        Language::En
    }
}

/// Failure taxonomy for the capture core
///
/// Every variant carries the diagnostic detail kept for logs; the short
/// user-facing string comes from [`CaptureError::user_message`].
#[derive(Debug, Error)]
pub enum CaptureError {
    /// Microphone authorization was refused (after prompting if needed)
    #[error("microphone permission denied")]
    PermissionDenied,

    /// `stop` was called while no recording was active
    #[error("no active recording")]
    NoActiveRecording,

    /// The OS audio session or recorder failed to initialize/finalize
    #[error("audio resource failure: {0}")]
    OsResource(String),

    /// The artifact no longer exists at the given location
    #[error("recording not found: {0}")]
    ArtifactNotFound(String),

    /// The transcription backend rejected the upload
    #[error("transcription failed: {0}")]
    TranscriptionFailed(String),

    /// The transcription backend returned a 2xx body we could not interpret
    #[error("malformed transcription response: {0}")]
    MalformedResponse(String),

    /// Transport-level failure talking to the transcription backend
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl CaptureError {
    /// Short, actionable message for the UI, distinct from the diagnostic
    /// detail in the `Display` impl.
    pub fn user_message(&self, language: Language) -> &'static str {
        match (self, language) {
            (CaptureError::PermissionDenied, Language::En) => "Microphone permission required",
            (CaptureError::PermissionDenied, Language::Fi) => "Mikrofonin käyttölupa vaaditaan",
            (CaptureError::NoActiveRecording, Language::En) => "No recording in progress",
            (CaptureError::NoActiveRecording, Language::Fi) => "Ei äänitystä käynnissä",
            (CaptureError::OsResource(_), Language::En) => "Recording failed, try again",
            (CaptureError::OsResource(_), Language::Fi) => "Äänitys epäonnistui, yritä uudelleen",
            (CaptureError::ArtifactNotFound(_), Language::En) => "Recording no longer available",
            (CaptureError::ArtifactNotFound(_), Language::Fi) => "Äänitystä ei enää löydy",
            (CaptureError::TranscriptionFailed(_), Language::En)
            | (CaptureError::MalformedResponse(_), Language::En) => {
                "Transcription failed, try again"
            }
            (CaptureError::TranscriptionFailed(_), Language::Fi)
            | (CaptureError::MalformedResponse(_), Language::Fi) => {
                "Puheentunnistus epäonnistui, yritä uudelleen"
            }
            (CaptureError::Network(_), Language::En) => "Connection problem, try again",
            (CaptureError::Network(_), Language::Fi) => "Yhteysongelma, yritä uudelleen",
        }
    }
}
