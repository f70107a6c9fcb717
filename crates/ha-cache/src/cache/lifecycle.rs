//! Cache lifecycle and operating mode
//!
//! State machine: `Uninitialized → Running{Clustered | LocalOnly} → Stopped`.
//! The mode is decided once during `init()` and never changes during
//! steady-state operation, so every cache call can read it without
//! coordination beyond the lock acquisition itself.

use parking_lot::RwLock;

/// Operating mode, decided once at initialization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheMode {
    /// Backend store bound; dialog state is replicated cluster-wide
    Clustered,
    /// Clustering infrastructure unavailable; all operations degrade to
    /// local no-ops and nothing is replicated
    LocalOnly,
}

/// Lifecycle position of the cache
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    /// `init()` has not run yet
    Uninitialized,
    /// `init()` completed; mode is fixed
    Running,
    /// `stop()` was called
    Stopped,
}

/// Owner of the lifecycle state and mode flag
///
/// Mode defaults to [`CacheMode::Clustered`] so that `in_local_mode()` is
/// callable before `init()` and answers false, matching the contract that
/// local mode only exists as an initialization fallback.
#[derive(Debug)]
pub(crate) struct ModeController {
    inner: RwLock<(LifecycleState, CacheMode)>,
}

impl ModeController {
    pub(crate) fn new() -> Self {
        Self {
            inner: RwLock::new((LifecycleState::Uninitialized, CacheMode::Clustered)),
        }
    }

    /// Transition out of `Uninitialized` with the mode `init()` decided
    pub(crate) fn set_running(&self, mode: CacheMode) {
        *self.inner.write() = (LifecycleState::Running, mode);
    }

    /// Transition to `Stopped`, keeping the decided mode readable
    pub(crate) fn set_stopped(&self) {
        self.inner.write().0 = LifecycleState::Stopped;
    }

    pub(crate) fn state(&self) -> LifecycleState {
        self.inner.read().0
    }

    pub(crate) fn mode(&self) -> CacheMode {
        self.inner.read().1
    }

    pub(crate) fn in_local_mode(&self) -> bool {
        self.mode() == CacheMode::LocalOnly
    }
}
