//! Viewport geometry.

use glam::Vec2;

/// Position and size of the primary display area, in toolkit coordinates.
///
/// Owned by the toolkit and re-read every frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Viewport {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    /// A viewport at the origin with the given size.
    pub fn from_size(width: f32, height: f32) -> Self {
        Self::new(Vec2::ZERO, Vec2::new(width, height))
    }

    /// Bottom-right corner.
    pub fn max(&self) -> Vec2 {
        self.pos + self.size
    }

    /// Returns whether the viewport has no drawable area, e.g. a minimized window.
    pub fn is_degenerate(&self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_corner() {
        let vp = Viewport::new(Vec2::new(10.0, 20.0), Vec2::new(1280.0, 720.0));
        assert_eq!(vp.max(), Vec2::new(1290.0, 740.0));
    }

    #[test]
    fn test_degenerate() {
        assert!(Viewport::from_size(0.0, 720.0).is_degenerate());
        assert!(!Viewport::from_size(1280.0, 720.0).is_degenerate());
    }
}
