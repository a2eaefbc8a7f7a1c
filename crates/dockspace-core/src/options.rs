//! Configuration options for the dockspace demo.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::glyph::GlyphRange;

/// Environment variable naming a JSON file to load [`Options`] from.
pub const CONFIG_ENV_VAR: &str = "DOCKSPACE_CONFIG";

/// Global configuration options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Title of the native window.
    pub window_title: String,

    /// Initial inner size of the window in logical pixels.
    pub window_size: [u32; 2],

    /// Context hints carried over from the OpenGL setup.
    pub gl: GlContextHints,

    /// Which graphics backend family to request.
    pub backend: BackendPreference,

    /// Color the surface is cleared to before the UI is drawn.
    pub clear_color: [f32; 4],

    /// Name of the full-viewport host window. The dockspace id is derived from it.
    pub dockspace_name: String,

    /// Font atlas configuration.
    pub fonts: FontOptions,

    /// Whether the toolkit's demo window is shown.
    pub show_demo_window: bool,

    /// Whether the toolkit's metrics window is shown.
    pub show_metrics_window: bool,

    /// Whether the ANSI text window starts open.
    pub show_custom_window: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            window_title: "minimal ImGui/GLFW3 example".to_string(),
            window_size: [1280, 720],
            gl: GlContextHints::default(),
            backend: BackendPreference::default(),
            clear_color: [1.0, 1.0, 1.0, 1.0],
            dockspace_name: "docking_space".to_string(),
            fonts: FontOptions::default(),
            show_demo_window: true,
            show_metrics_window: true,
            show_custom_window: true,
        }
    }
}

impl Options {
    /// Loads options from the file named by [`CONFIG_ENV_VAR`], or the defaults when unset.
    pub fn load() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::from_json_file(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }

    /// Reads options from a JSON file. Missing fields take their default values.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let options = Self::from_json_str(&text)?;
        log::info!("loaded options from {}", path.display());
        Ok(options)
    }

    /// Parses options from a JSON string.
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

/// OpenGL context hints: version, core profile and forward compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlContextHints {
    pub major: u8,
    pub minor: u8,
    pub core_profile: bool,
    pub forward_compatible: bool,
}

impl Default for GlContextHints {
    fn default() -> Self {
        // macOS only supports forward-compatible core profiles from 3.2 onwards.
        Self {
            major: 3,
            minor: 3,
            core_profile: true,
            forward_compatible: true,
        }
    }
}

/// Graphics backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BackendPreference {
    /// Let the graphics layer pick the primary backend for the platform.
    #[default]
    Auto,
    /// Force the OpenGL backend, honouring [`GlContextHints`].
    Gl,
}

/// Font atlas options: an optional base font plus a merged icon font.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontOptions {
    /// Base font file. `None` uses the toolkit's built-in font.
    pub base_font: Option<PathBuf>,

    /// Pixel size of the base font when loaded from a file.
    pub base_size_pixels: f32,

    /// Icon font merged over the base font.
    pub icon_font: PathBuf,

    /// Pixel size of the icon font.
    pub icon_size_pixels: f32,

    /// Minimum horizontal advance reserved for each icon glyph.
    pub glyph_min_advance_x: f32,

    /// Inclusive codepoint ranges taken from the icon font.
    pub icon_ranges: Vec<GlyphRange>,
}

impl Default for FontOptions {
    fn default() -> Self {
        Self {
            base_font: None,
            base_size_pixels: 13.0,
            // Font Awesome 4.7
            icon_font: PathBuf::from("assets/fontawesome-webfont.ttf"),
            icon_size_pixels: 18.0,
            glyph_min_advance_x: 13.0,
            icon_ranges: vec![GlyphRange::FONT_AWESOME],
        }
    }
}
