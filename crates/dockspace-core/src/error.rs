//! Error types for dockspace-rs.

use std::path::PathBuf;

use thiserror::Error;

/// The main error type for dockspace-rs operations.
///
/// Every variant is fatal: startup failures abort before the first frame and
/// runtime failures end the frame loop after teardown.
#[derive(Error, Debug)]
pub enum DockspaceError {
    /// The graphics context or the window could not be created.
    #[error("startup failure: {0}")]
    Startup(String),

    /// A required asset (font file) was missing or unusable.
    #[error("asset failure: {0}")]
    Asset(#[from] AssetError),

    /// The toolkit or the surface failed while a frame was being built or presented.
    #[error("runtime failure: {0}")]
    Runtime(String),

    /// The dockspace host was skipped or rendered twice within a frame.
    #[error("dockspace host '{name}' lifecycle violated: {detail}")]
    HostLifecycle { name: String, detail: String },

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON configuration error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Errors raised while loading fonts or composing the font atlas.
#[derive(Error, Debug)]
pub enum AssetError {
    /// A font file could not be read.
    #[error("failed to read font '{}': {source}", path.display())]
    FontUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A font file was read but is not a usable font.
    #[error("failed to parse font '{label}': {reason}")]
    FontInvalid { label: String, reason: String },

    /// A glyph range is malformed.
    #[error("invalid glyph range [{start:#06X}, {end:#06X}]: {reason}")]
    InvalidGlyphRange {
        start: u32,
        end: u32,
        reason: &'static str,
    },

    /// The icon face has no glyph inside the requested ranges.
    #[error("font '{label}' has no glyphs in the requested ranges")]
    EmptyCoverage { label: String },

    /// No glyph ranges were supplied for a merged face.
    #[error("no glyph ranges supplied for merged font '{label}'")]
    NoGlyphRanges { label: String },
}

/// A specialized Result type for dockspace-rs operations.
pub type Result<T> = std::result::Result<T, DockspaceError>;
