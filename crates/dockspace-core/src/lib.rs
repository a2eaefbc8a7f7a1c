//! Core types for dockspace-rs.
//!
//! This crate holds everything that does not touch the GUI toolkit or the GPU:
//! - [`Options`] and the configuration loaded at startup
//! - the error taxonomy ([`DockspaceError`], [`AssetError`])
//! - [`Viewport`] geometry read each frame
//! - glyph ranges and [`FontAtlasBuilder`] for composing a merged font atlas
//! - the frame loop's [`LoopState`]
//! - an ANSI SGR splitter used by the demo's colored text

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Options structs legitimately have many boolean flags
#![allow(clippy::struct_excessive_bools)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]

pub mod ansi;
pub mod error;
pub mod font;
pub mod glyph;
pub mod options;
pub mod state;
pub mod viewport;

pub use error::{AssetError, DockspaceError, Result};
pub use font::{
    load_atlas, AtlasFace, FaceSource, FontAtlas, FontAtlasBuilder, FontFace, MergeConfig,
};
pub use glyph::{GlyphRange, GlyphRanges};
pub use options::{BackendPreference, FontOptions, GlContextHints, Options};
pub use state::{LoopState, StopReason};
pub use viewport::Viewport;

// Re-export glam types for convenience
pub use glam::Vec2;
