use reqwest::multipart::{Form, Part};
use tokio_util::io::ReaderStream;
use tracing::debug;

use crate::encoder::Platform;
use crate::error::CaptureError;
use crate::recorder::ArtifactLocation;

/// How the audio bytes get attached to the multipart upload.
///
/// Two variants selected at construction, one per runtime family; both must
/// produce an equivalent body from the backend's point of view (same `file`
/// field, same fixed filename, same declared media type, same bytes).
#[async_trait::async_trait]
pub trait UploadStrategy: Send + Sync {
    /// Whether the artifact still exists at the location
    async fn exists(&self, location: &ArtifactLocation) -> bool;

    /// Build the multipart form with the audio under the `file` field
    async fn attach(
        &self,
        location: &ArtifactLocation,
        file_name: &str,
        mime_type: &str,
    ) -> Result<Form, CaptureError>;

    /// Strategy name for logging
    fn name(&self) -> &str;
}

/// Browser-style upload: fetch the local blob into memory and attach the
/// bytes directly.
pub struct BlobUpload;

#[async_trait::async_trait]
impl UploadStrategy for BlobUpload {
    async fn exists(&self, location: &ArtifactLocation) -> bool {
        tokio::fs::try_exists(location.as_path()).await.unwrap_or(false)
    }

    async fn attach(
        &self,
        location: &ArtifactLocation,
        file_name: &str,
        mime_type: &str,
    ) -> Result<Form, CaptureError> {
        let bytes = tokio::fs::read(location.as_path()).await.map_err(|e| {
            CaptureError::OsResource(format!("failed to read {location}: {e}"))
        })?;
        debug!("attaching {} bytes as {file_name} ({mime_type})", bytes.len());

        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(mime_type)?;

        Ok(Form::new().part("file", part))
    }

    fn name(&self) -> &str {
        "blob"
    }
}

/// Native-mobile-style upload: attach a file reference by location, name and
/// type and let the HTTP stack stream it from disk.
pub struct FileUpload;

#[async_trait::async_trait]
impl UploadStrategy for FileUpload {
    async fn exists(&self, location: &ArtifactLocation) -> bool {
        tokio::fs::try_exists(location.as_path()).await.unwrap_or(false)
    }

    async fn attach(
        &self,
        location: &ArtifactLocation,
        file_name: &str,
        mime_type: &str,
    ) -> Result<Form, CaptureError> {
        let file = tokio::fs::File::open(location.as_path()).await.map_err(|e| {
            CaptureError::OsResource(format!("failed to open {location}: {e}"))
        })?;
        let len = file
            .metadata()
            .await
            .map_err(|e| CaptureError::OsResource(format!("failed to stat {location}: {e}")))?
            .len();
        debug!("streaming {len} bytes as {file_name} ({mime_type})");

        let body = reqwest::Body::wrap_stream(ReaderStream::new(file));
        let part = Part::stream_with_length(body, len)
            .file_name(file_name.to_string())
            .mime_str(mime_type)?;

        Ok(Form::new().part("file", part))
    }

    fn name(&self) -> &str {
        "file"
    }
}

/// Strategy for the platform the session runs on
pub fn upload_strategy_for(platform: Platform) -> Box<dyn UploadStrategy> {
    match platform {
        Platform::Browser => Box::new(BlobUpload),
        Platform::Ios | Platform::Android => Box::new(FileUpload),
    }
}
