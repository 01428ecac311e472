// Shared test doubles for the recording session tests
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use somnia_capture::{
    ArtifactLocation, AudioArtifact, CaptureError, EncoderProfile, PermissionGate,
    PermissionState, RecorderBackend, StaticGate,
};

/// Call log shared between a [`MockBackend`] and the test that built it
#[derive(Default)]
pub struct MockCalls {
    pub configure: AtomicUsize,
    pub begin: AtomicUsize,
    pub finalize: AtomicUsize,
    pub restore: AtomicUsize,
    pub discard: AtomicUsize,
    pub begun_paths: Mutex<Vec<PathBuf>>,
    pub discarded: Mutex<Vec<PathBuf>>,
}

impl MockCalls {
    pub fn begun(&self) -> Vec<PathBuf> {
        self.begun_paths.lock().unwrap().clone()
    }

    pub fn discarded_paths(&self) -> Vec<PathBuf> {
        self.discarded.lock().unwrap().clone()
    }
}

/// Scriptable recorder backend standing in for the OS resource
pub struct MockBackend {
    calls: Arc<MockCalls>,
    fail_next_begin: AtomicBool,
    fail_finalize: bool,
    fail_discard: bool,
    current: Mutex<Option<PathBuf>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(MockCalls::default()),
            fail_next_begin: AtomicBool::new(false),
            fail_finalize: false,
            fail_discard: false,
            current: Mutex::new(None),
        }
    }

    pub fn failing_next_begin() -> Self {
        let backend = Self::new();
        backend.fail_next_begin.store(true, Ordering::SeqCst);
        backend
    }

    pub fn failing_finalize() -> Self {
        Self {
            fail_finalize: true,
            ..Self::new()
        }
    }

    pub fn failing_discard() -> Self {
        Self {
            fail_discard: true,
            ..Self::new()
        }
    }

    pub fn calls(&self) -> Arc<MockCalls> {
        Arc::clone(&self.calls)
    }
}

#[async_trait::async_trait]
impl RecorderBackend for MockBackend {
    async fn configure_capture(&mut self) -> Result<(), CaptureError> {
        self.calls.configure.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn begin(
        &mut self,
        _profile: &EncoderProfile,
        output: &Path,
    ) -> Result<(), CaptureError> {
        self.calls.begin.fetch_add(1, Ordering::SeqCst);
        if self.fail_next_begin.swap(false, Ordering::SeqCst) {
            return Err(CaptureError::OsResource("simulated recorder init failure".into()));
        }
        self.calls.begun_paths.lock().unwrap().push(output.to_path_buf());
        *self.current.lock().unwrap() = Some(output.to_path_buf());
        Ok(())
    }

    async fn finalize(&mut self) -> Result<AudioArtifact, CaptureError> {
        self.calls.finalize.fetch_add(1, Ordering::SeqCst);
        let path = self.current.lock().unwrap().take();
        if self.fail_finalize {
            return Err(CaptureError::OsResource("simulated finalize failure".into()));
        }
        let path = path.expect("finalize without begin");
        Ok(AudioArtifact {
            location: ArtifactLocation::new(path),
            duration_ms: 1234,
            created_at: Utc::now(),
        })
    }

    async fn restore_playback(&mut self) -> Result<(), CaptureError> {
        self.calls.restore.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn discard(&mut self, location: &ArtifactLocation) -> Result<(), CaptureError> {
        self.calls.discard.fetch_add(1, Ordering::SeqCst);
        if self.fail_discard {
            return Err(CaptureError::OsResource("simulated deletion failure".into()));
        }
        self.calls
            .discarded
            .lock()
            .unwrap()
            .push(location.as_path().to_path_buf());
        Ok(())
    }

    fn is_capturing(&self) -> bool {
        self.current.lock().unwrap().is_some()
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// Permission gate whose prompt counter outlives the boxed session gate
pub struct SharedGate(pub Arc<StaticGate>);

#[async_trait::async_trait]
impl PermissionGate for SharedGate {
    async fn state(&self) -> PermissionState {
        self.0.state().await
    }

    async fn request_permission(&self) -> bool {
        self.0.request_permission().await
    }
}
