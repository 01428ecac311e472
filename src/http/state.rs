use std::sync::Arc;

use crate::error::Language;
use crate::interpret::InterpretationClient;
use crate::recorder::RecordingSession;
use crate::transcribe::TranscriptionClient;

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// The single recording session driven by this process
    pub session: Arc<RecordingSession>,

    /// Client for the remote transcription backend
    pub transcriber: Arc<TranscriptionClient>,

    /// Client for the dream-interpretation backend
    pub interpreter: Arc<InterpretationClient>,

    /// Language for user-facing error messages
    pub language: Language,
}

impl AppState {
    pub fn new(
        session: Arc<RecordingSession>,
        transcriber: Arc<TranscriptionClient>,
        interpreter: Arc<InterpretationClient>,
        language: Language,
    ) -> Self {
        Self {
            session,
            transcriber,
            interpreter,
            language,
        }
    }
}
