//! dockspace-rs: a Dear ImGui application shell with a full-viewport dockspace.
//!
//! The shell opens a window, composes a font atlas with a merged icon font,
//! and runs a frame loop that renders an always-open docking host every frame
//! before the demo windows.
//!
//! # Quick Start
//!
//! ```no_run
//! use dockspace::*;
//!
//! fn main() -> Result<()> {
//!     let options = Options::load()?;
//!     let outcome = run(&options)?;
//!     println!("ran {} frames", outcome.frames);
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`FrameLoop`] drives any [`FrameBackend`] through `Running → Terminating → Terminated`
//! - [`ImguiBackend`] is the windowed backend (winit + wgpu + dear-imgui)
//! - [`DockspaceHost`] is rendered first in every frame; content windows dock into it

pub mod backend;
pub mod frame_loop;

pub use dockspace_core::{
    error::{DockspaceError, Result},
    options::Options,
    LoopState, StopReason, Vec2, Viewport,
};
pub use dockspace_ui::{DemoWindows, DockUi, DockspaceHost, DockspaceId, FrameAction, FrameContent};

pub use backend::ImguiBackend;
pub use frame_loop::{FrameBackend, FrameLoop, LoopOutcome};

/// Opens the window and runs the demo until it is closed or quit.
pub fn run(options: &Options) -> Result<LoopOutcome> {
    let backend = ImguiBackend::init(options)?;
    let content = DemoWindows::new(options);
    FrameLoop::new(backend, content, options).run()
}

/// Process exit code for a finished run.
///
/// The quit menu action exits with `1`, as do startup and runtime failures;
/// closing the window exits with `0`.
pub fn exit_code(result: &Result<LoopOutcome>) -> u8 {
    match result {
        Ok(LoopOutcome {
            reason: StopReason::WindowClosed,
            ..
        }) => 0,
        Ok(_) | Err(_) => 1,
    }
}
