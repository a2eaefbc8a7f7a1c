//! Surface provider for dockspace-rs.
//!
//! Owns the native window (winit), pumps its event loop without blocking, and
//! drives a wgpu swap chain the UI is drawn into:
//! - [`WindowSurface::init`] opens the window and creates the GPU context
//! - [`WindowSurface::poll_events`] / [`WindowSurface::drain_events`] feed the input bridge
//! - [`WindowSurface::draw`] clears the next image and records UI draw commands
//! - [`WindowSurface::swap_buffers`] presents it
//! - [`WindowSurface::terminate`] releases everything exactly once

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod error;
mod events;
pub mod surface;

pub use error::{RenderError, RenderResult};
pub use surface::WindowSurface;
