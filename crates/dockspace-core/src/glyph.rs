//! Unicode glyph ranges used to restrict which glyphs a font contributes to the atlas.

use serde::{Deserialize, Serialize};

use crate::error::AssetError;

/// Highest codepoint a range may reach.
///
/// The toolkit stores glyph ranges as 16-bit values, so ranges stop at the
/// end of the Basic Multilingual Plane.
pub const MAX_CODEPOINT: u32 = 0xFFFF;

/// An inclusive pair of codepoints.
///
/// Serialized as a two-element array, `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u32; 2]", into = "[u32; 2]")]
pub struct GlyphRange {
    pub start: u32,
    pub end: u32,
}

impl GlyphRange {
    /// The Font Awesome 4.x private-use block.
    pub const FONT_AWESOME: Self = Self::new(0xF000, 0xF3FF);

    /// Basic Latin plus Latin-1 Supplement, the toolkit's default coverage.
    pub const DEFAULT: Self = Self::new(0x0020, 0x00FF);

    /// Creates a range. Use [`GlyphRange::validate`] before handing it to a font builder.
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Checks the range can be expressed in a zero-terminated range list.
    pub fn validate(&self) -> Result<(), AssetError> {
        let reason = if self.start == 0 {
            Some("codepoint 0 is reserved as the list terminator")
        } else if self.start > self.end {
            Some("start is greater than end")
        } else if self.end > MAX_CODEPOINT {
            Some("end is beyond the 16-bit glyph range")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(AssetError::InvalidGlyphRange {
                start: self.start,
                end: self.end,
                reason,
            }),
            None => Ok(()),
        }
    }

    /// Returns whether `codepoint` lies inside the range.
    pub fn contains(&self, codepoint: u32) -> bool {
        (self.start..=self.end).contains(&codepoint)
    }

    /// Number of codepoints covered.
    ///
    /// Zero for a reversed range; [`GlyphRange::validate`] rejects those.
    pub fn len(&self) -> usize {
        if self.start > self.end {
            return 0;
        }
        let span = u64::from(self.end) - u64::from(self.start) + 1;
        usize::try_from(span).unwrap_or(usize::MAX)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<[u32; 2]> for GlyphRange {
    fn from([start, end]: [u32; 2]) -> Self {
        Self::new(start, end)
    }
}

impl From<GlyphRange> for [u32; 2] {
    fn from(range: GlyphRange) -> Self {
        [range.start, range.end]
    }
}

/// A validated, borrowed list of glyph ranges.
///
/// The font builder never copies the caller's ranges eagerly; the borrow keeps
/// them alive until the atlas is built.
#[derive(Debug, Clone, Copy)]
pub struct GlyphRanges<'a> {
    ranges: &'a [GlyphRange],
}

impl<'a> GlyphRanges<'a> {
    /// Validates every range in `ranges`.
    pub fn new(ranges: &'a [GlyphRange]) -> Result<Self, AssetError> {
        for range in ranges {
            range.validate()?;
        }
        Ok(Self { ranges })
    }

    /// The underlying ranges.
    pub fn as_slice(&self) -> &'a [GlyphRange] {
        self.ranges
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Returns whether any range contains `codepoint`.
    pub fn contains(&self, codepoint: u32) -> bool {
        self.ranges.iter().any(|r| r.contains(codepoint))
    }

    /// Flattens into the 16-bit `[start, end, start, end, ..., 0]` list the toolkit reads.
    pub fn to_zero_terminated(&self) -> Vec<u16> {
        let mut list = Vec::with_capacity(self.ranges.len() * 2 + 1);
        for range in self.ranges {
            // `new` validated every range against MAX_CODEPOINT.
            let (Ok(start), Ok(end)) = (u16::try_from(range.start), u16::try_from(range.end))
            else {
                continue;
            };
            list.push(start);
            list.push(end);
        }
        list.push(0);
        list
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_awesome_range() {
        let range = GlyphRange::FONT_AWESOME;
        assert!(range.contains(0xF000));
        assert!(range.contains(0xF3FF));
        assert!(!range.contains(0xEFFF));
        assert!(!range.contains(0xF400));
        assert_eq!(range.len(), 0x400);
    }

    #[test]
    fn test_zero_terminated_layout() {
        let ranges = [GlyphRange::new(0xF000, 0xF3FF)];
        let view = GlyphRanges::new(&ranges).unwrap();
        assert_eq!(view.to_zero_terminated(), vec![0xF000, 0xF3FF, 0]);
    }

    #[test]
    fn test_multiple_ranges_flatten_in_order() {
        let ranges = [GlyphRange::new(0x20, 0x7E), GlyphRange::new(0xF000, 0xF0FF)];
        let view = GlyphRanges::new(&ranges).unwrap();
        assert_eq!(view.to_zero_terminated(), vec![0x20, 0x7E, 0xF000, 0xF0FF, 0]);
        assert!(view.contains(0x41));
        assert!(view.contains(0xF002));
        assert!(!view.contains(0xF100));
    }

    #[test]
    fn test_rejects_zero_start() {
        let ranges = [GlyphRange::new(0, 0xFF)];
        assert!(matches!(
            GlyphRanges::new(&ranges),
            Err(AssetError::InvalidGlyphRange { start: 0, .. })
        ));
    }

    #[test]
    fn test_rejects_reversed_range() {
        assert!(GlyphRange::new(0xF3FF, 0xF000).validate().is_err());
    }

    #[test]
    fn test_rejects_beyond_16_bit() {
        assert!(GlyphRange::new(0xF000, MAX_CODEPOINT + 1).validate().is_err());
        assert!(GlyphRange::new(0xF000, MAX_CODEPOINT).validate().is_ok());
    }

    #[test]
    fn test_rejects_astral_range() {
        // Emoji would wrap to 0xF600..0xF64F, inside the icon block.
        let ranges = [GlyphRange::new(0x1F600, 0x1F64F)];
        assert!(matches!(
            GlyphRanges::new(&ranges),
            Err(AssetError::InvalidGlyphRange { start: 0x1F600, .. })
        ));
    }

    #[test]
    fn test_len_of_widest_range() {
        let range = GlyphRange::new(0, u32::MAX);
        assert_eq!(range.len(), usize::try_from(1u64 << 32).unwrap_or(usize::MAX));
        assert!(!range.is_empty());
        assert!(range.validate().is_err());
    }

    #[test]
    fn test_len_of_reversed_range() {
        let range = GlyphRange::new(0xF3FF, 0xF000);
        assert_eq!(range.len(), 0);
        assert!(range.is_empty());
    }

    #[test]
    fn test_serde_as_pair() {
        let json = serde_json::to_string(&GlyphRange::FONT_AWESOME).unwrap();
        assert_eq!(json, "[61440,62463]");
        let back: GlyphRange = serde_json::from_str(&json).unwrap();
        assert_eq!(back, GlyphRange::FONT_AWESOME);
    }
}
