pub mod backend;
pub mod session;
pub mod wav;

pub use backend::{
    ArtifactLocation, AudioArtifact, AudioFrame, RecorderBackend, RecorderBackendFactory,
};
pub use session::{RecordingSession, SessionState, SessionStatus, MAX_RECORDING_MS};
pub use wav::WavRecorderBackend;
