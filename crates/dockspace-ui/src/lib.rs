//! UI layer for dockspace-rs using dear-imgui.
//!
//! - [`DockUi`]: the toolkit calls the dockspace host is written against
//! - [`DockspaceHost`]: the always-open, full-viewport docking window
//! - [`UiContext`] / [`ImguiIntegration`]: context, fonts, winit platform and wgpu renderer
//! - [`DemoWindows`]: the demo content drawn over the dockspace

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod demo;
pub mod dock_ui;
pub mod dockspace;
pub mod error;
pub mod integration;
pub mod recording;

pub use demo::DemoWindows;
pub use dock_ui::{DockUi, DockspaceId, FrameAction, FrameContent, StyleOverride};
pub use dockspace::{host_window_flags, DockspaceHost, StyleScope};
pub use error::{UiError, UiResult};
pub use integration::{plan_faces, FacePlan, ImguiIntegration, UiContext};
pub use recording::{RecordedStyle, RecordingUi, UiCall};

// Re-export the toolkit so downstream crates name the same `Ui` type.
pub use dear_imgui_rs::Ui;
