pub mod client;
pub mod upload;

pub use client::{TranscriptionClient, TranscriptionResult};
pub use upload::{upload_strategy_for, BlobUpload, FileUpload, UploadStrategy};
