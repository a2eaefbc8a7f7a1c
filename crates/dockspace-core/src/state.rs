//! Frame loop lifecycle states.

/// The frame loop's lifecycle.
///
/// `Running` → `Terminating` → `Terminated`. There is no way back to `Running`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopState {
    #[default]
    Running,
    /// A stop was requested; teardown has not finished yet.
    Terminating,
    /// Renderer and surface have been released.
    Terminated,
}

impl LoopState {
    pub fn is_running(self) -> bool {
        self == Self::Running
    }

    pub fn is_terminated(self) -> bool {
        self == Self::Terminated
    }

    /// State after a stop request. Idempotent once the loop has left `Running`.
    #[must_use]
    pub fn stop(self) -> Self {
        match self {
            Self::Running | Self::Terminating => Self::Terminating,
            Self::Terminated => Self::Terminated,
        }
    }

    /// State after teardown has completed.
    #[must_use]
    pub fn finish(self) -> Self {
        Self::Terminated
    }
}

/// Why the frame loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The surface reported that the window should close.
    WindowClosed,
    /// The user chose the quit action.
    QuitRequested,
    /// A frame failed; the error is returned alongside.
    Failed,
}
