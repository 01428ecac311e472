pub mod config;
pub mod encoder;
pub mod error;
pub mod format;
pub mod http;
pub mod interpret;
pub mod permission;
pub mod recorder;
pub mod transcribe;

pub use config::Config;
pub use encoder::{AudioCodec, ContainerFormat, EncoderProfile, Platform};
pub use error::{CaptureError, Language};
pub use format::format_recording_duration;
pub use http::{create_router, AppState};
pub use interpret::{
    Interpretation, InterpretationClient, InterpretationRequest, InterpretError,
};
pub use permission::{PermissionGate, PermissionState, StaticGate};
pub use recorder::{
    ArtifactLocation, AudioArtifact, AudioFrame, RecorderBackend, RecorderBackendFactory,
    RecordingSession, SessionState, SessionStatus, WavRecorderBackend, MAX_RECORDING_MS,
};
pub use transcribe::{
    upload_strategy_for, BlobUpload, FileUpload, TranscriptionClient, TranscriptionResult,
    UploadStrategy,
};
