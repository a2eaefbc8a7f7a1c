//! Font faces and font atlas composition.
//!
//! A [`FontAtlas`] is composed from a base face plus any number of faces merged
//! over it. Each merged face is restricted to a borrowed list of glyph ranges;
//! the atlas keeps borrowing those ranges until the toolkit has rasterized it.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

use crate::error::AssetError;
use crate::glyph::{GlyphRange, GlyphRanges};
use crate::options::FontOptions;

/// A loaded font file together with the set of codepoints it maps to glyphs.
#[derive(Clone)]
pub struct FontFace {
    label: String,
    data: Arc<[u8]>,
    charset: BTreeSet<u32>,
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontFace")
            .field("label", &self.label)
            .field("bytes", &self.data.len())
            .field("glyphs", &self.charset.len())
            .finish()
    }
}

impl FontFace {
    /// Reads and parses a TrueType/OpenType font file.
    pub fn from_file(path: &Path) -> Result<Self, AssetError> {
        let data = std::fs::read(path).map_err(|source| AssetError::FontUnreadable {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(path.display().to_string(), data)
    }

    /// Parses font data and indexes its character map.
    pub fn from_bytes(label: impl Into<String>, data: Vec<u8>) -> Result<Self, AssetError> {
        let label = label.into();
        let font = fontdue::Font::from_bytes(data.as_slice(), fontdue::FontSettings::default())
            .map_err(|reason| AssetError::FontInvalid {
                label: label.clone(),
                reason: reason.to_string(),
            })?;
        let charset = font.chars().keys().map(|&c| u32::from(c)).collect();

        Ok(Self {
            label,
            data: data.into(),
            charset,
        })
    }

    /// Builds a face from data whose character map is already known.
    pub fn from_parts(
        label: impl Into<String>,
        data: Vec<u8>,
        charset: impl IntoIterator<Item = u32>,
    ) -> Self {
        Self {
            label: label.into(),
            data: data.into(),
            charset: charset.into_iter().collect(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Raw font file contents.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns whether the face maps `codepoint` to a glyph.
    pub fn has_glyph(&self, codepoint: u32) -> bool {
        self.charset.contains(&codepoint)
    }

    /// Number of codepoints the face maps.
    pub fn glyph_count(&self) -> usize {
        self.charset.len()
    }
}

/// Per-face settings for a face merged into the previous one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MergeConfig {
    pub size_pixels: f32,
    /// Minimum horizontal advance, so icons reserve a consistent width.
    pub glyph_min_advance_x: f32,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            size_pixels: 18.0,
            glyph_min_advance_x: 13.0,
        }
    }
}

/// Where the glyphs of an atlas face come from.
#[derive(Debug, Clone)]
pub enum FaceSource {
    /// The toolkit's embedded default font.
    Default,
    /// A font file loaded at startup.
    File(FontFace),
}

/// One face of a composed atlas.
#[derive(Debug, Clone)]
pub struct AtlasFace<'r> {
    pub source: FaceSource,
    /// Pixel size; `None` keeps the toolkit's default size.
    pub size_pixels: Option<f32>,
    /// Whether this face is layered onto the previous face's glyph slots.
    pub merge: bool,
    pub glyph_min_advance_x: f32,
    /// Ranges this face is restricted to. `None` takes the whole face.
    pub ranges: Option<GlyphRanges<'r>>,
    coverage: BTreeSet<u32>,
}

impl AtlasFace<'_> {
    /// Codepoints this face contributes.
    pub fn coverage(&self) -> &BTreeSet<u32> {
        &self.coverage
    }

    pub fn label(&self) -> &str {
        match &self.source {
            FaceSource::Default => "default",
            FaceSource::File(face) => face.label(),
        }
    }
}

enum PendingBase {
    Default,
    File { face: FontFace, size_pixels: f32 },
}

struct PendingMerge<'r> {
    face: FontFace,
    config: MergeConfig,
    ranges: &'r [GlyphRange],
}

/// Composes a [`FontAtlas`].
///
/// `build` consumes the builder, so an atlas description can only be finalized once.
pub struct FontAtlasBuilder<'r> {
    base: Option<PendingBase>,
    merged: Vec<PendingMerge<'r>>,
}

impl Default for FontAtlasBuilder<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'r> FontAtlasBuilder<'r> {
    pub fn new() -> Self {
        Self {
            base: None,
            merged: Vec::new(),
        }
    }

    /// Uses the toolkit's embedded font as the base face.
    #[must_use]
    pub fn base_default(mut self) -> Self {
        self.base = Some(PendingBase::Default);
        self
    }

    /// Uses a font file as the base face.
    #[must_use]
    pub fn base_face(mut self, face: FontFace, size_pixels: f32) -> Self {
        self.base = Some(PendingBase::File { face, size_pixels });
        self
    }

    /// Merges `face` over the faces added so far, restricted to `ranges`.
    #[must_use]
    pub fn merge(mut self, face: FontFace, config: MergeConfig, ranges: &'r [GlyphRange]) -> Self {
        self.merged.push(PendingMerge {
            face,
            config,
            ranges,
        });
        self
    }

    /// Validates the ranges and computes each face's coverage.
    pub fn build(self) -> Result<FontAtlas<'r>, AssetError> {
        let mut faces = Vec::with_capacity(1 + self.merged.len());

        faces.push(match self.base.unwrap_or(PendingBase::Default) {
            PendingBase::Default => AtlasFace {
                source: FaceSource::Default,
                size_pixels: None,
                merge: false,
                glyph_min_advance_x: 0.0,
                ranges: None,
                coverage: (GlyphRange::DEFAULT.start..=GlyphRange::DEFAULT.end).collect(),
            },
            PendingBase::File { face, size_pixels } => {
                let coverage = face.charset.clone();
                AtlasFace {
                    source: FaceSource::File(face),
                    size_pixels: Some(size_pixels),
                    merge: false,
                    glyph_min_advance_x: 0.0,
                    ranges: None,
                    coverage,
                }
            }
        });

        for pending in self.merged {
            if pending.ranges.is_empty() {
                return Err(AssetError::NoGlyphRanges {
                    label: pending.face.label,
                });
            }
            let ranges = GlyphRanges::new(pending.ranges)?;

            let coverage: BTreeSet<u32> = pending
                .face
                .charset
                .iter()
                .copied()
                .filter(|&cp| ranges.contains(cp))
                .collect();
            if coverage.is_empty() {
                return Err(AssetError::EmptyCoverage {
                    label: pending.face.label,
                });
            }

            log::debug!(
                "merging '{}': {} of {} glyphs in range",
                pending.face.label,
                coverage.len(),
                pending.face.glyph_count()
            );

            faces.push(AtlasFace {
                source: FaceSource::File(pending.face),
                size_pixels: Some(pending.config.size_pixels),
                merge: true,
                glyph_min_advance_x: pending.config.glyph_min_advance_x,
                ranges: Some(ranges),
                coverage,
            });
        }

        Ok(FontAtlas { faces })
    }
}

/// A composed atlas description, ready to be rasterized by the toolkit.
#[derive(Debug, Clone)]
pub struct FontAtlas<'r> {
    faces: Vec<AtlasFace<'r>>,
}

impl<'r> FontAtlas<'r> {
    /// Faces in registration order; the first is the base face.
    pub fn faces(&self) -> &[AtlasFace<'r>] {
        &self.faces
    }

    /// Returns whether any face contributes `codepoint`.
    pub fn contains(&self, codepoint: u32) -> bool {
        self.faces.iter().any(|f| f.coverage.contains(&codepoint))
    }

    /// All codepoints in the atlas, ascending.
    pub fn codepoints(&self) -> BTreeSet<u32> {
        self.faces
            .iter()
            .flat_map(|f| f.coverage.iter().copied())
            .collect()
    }

    /// Number of distinct codepoints in the atlas.
    pub fn glyph_count(&self) -> usize {
        self.codepoints().len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.iter().all(|f| f.coverage.is_empty())
    }
}

/// Loads the configured font files and composes the atlas.
///
/// The icon font is mandatory: a missing or unreadable file aborts here rather
/// than producing a base-only atlas.
pub fn load_atlas(options: &FontOptions) -> Result<FontAtlas<'_>, AssetError> {
    let mut builder = FontAtlasBuilder::new();
    builder = match &options.base_font {
        Some(path) => builder.base_face(FontFace::from_file(path)?, options.base_size_pixels),
        None => builder.base_default(),
    };

    let icons = FontFace::from_file(&options.icon_font)?;
    log::info!(
        "loaded icon font '{}' ({} glyphs)",
        icons.label(),
        icons.glyph_count()
    );

    let config = MergeConfig {
        size_pixels: options.icon_size_pixels,
        glyph_min_advance_x: options.glyph_min_advance_x,
    };
    builder.merge(icons, config, &options.icon_ranges).build()
}
