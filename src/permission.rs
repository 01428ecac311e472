use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use tracing::info;

/// Current microphone authorization as reported by the OS
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionState {
    Granted,
    Denied,
    /// The user has not been asked yet
    Undetermined,
}

/// Microphone authorization seam.
///
/// Grant state lives at the OS level, never inside this crate: `state` must
/// re-query on every call rather than trust an in-memory flag. Platform
/// shells implement this over AVAudioSession, the Android runtime-permission
/// API, or `getUserMedia`.
#[async_trait::async_trait]
pub trait PermissionGate: Send + Sync {
    /// Live query of the current grant state
    async fn state(&self) -> PermissionState;

    /// Trigger the system consent prompt if not yet decided.
    ///
    /// May show system-owned UI and suspend until the user answers.
    /// Returns whether the process ended up with access.
    async fn request_permission(&self) -> bool;

    /// Convenience live check
    async fn has_permission(&self) -> bool {
        self.state().await == PermissionState::Granted
    }
}

/// In-process gate for dev builds and tests.
///
/// Behaves like the OS prompt: a request from `Undetermined` settles the
/// state permanently, and repeat requests return the settled answer without
/// "prompting" again. Prompt invocations are counted so tests can assert the
/// session never double-prompts.
pub struct StaticGate {
    state: Mutex<PermissionState>,
    grants_on_prompt: bool,
    prompts: AtomicUsize,
}

impl StaticGate {
    pub fn new(initial: PermissionState, grants_on_prompt: bool) -> Self {
        Self {
            state: Mutex::new(initial),
            grants_on_prompt,
            prompts: AtomicUsize::new(0),
        }
    }

    /// Gate that is already granted (typical dev configuration)
    pub fn granted() -> Self {
        Self::new(PermissionState::Granted, true)
    }

    /// Undecided gate that will grant when prompted
    pub fn undetermined() -> Self {
        Self::new(PermissionState::Undetermined, true)
    }

    /// Undecided gate that will refuse when prompted
    pub fn refusing() -> Self {
        Self::new(PermissionState::Undetermined, false)
    }

    /// How many times the consent prompt was shown
    pub fn prompt_count(&self) -> usize {
        self.prompts.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl PermissionGate for StaticGate {
    async fn state(&self) -> PermissionState {
        *self.state.lock().expect("permission state lock poisoned")
    }

    async fn request_permission(&self) -> bool {
        let mut state = self.state.lock().expect("permission state lock poisoned");
        if *state == PermissionState::Undetermined {
            self.prompts.fetch_add(1, Ordering::SeqCst);
            *state = if self.grants_on_prompt {
                PermissionState::Granted
            } else {
                PermissionState::Denied
            };
            info!("microphone permission prompt answered: {:?}", *state);
        }
        *state == PermissionState::Granted
    }
}
