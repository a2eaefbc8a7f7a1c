//! The narrow toolkit contract the dockspace host and frame loop are written against.

use std::ffi::CString;

use dear_imgui_rs::{
    sys, Condition, DockNodeFlags, Id, StyleStackToken, StyleVar, Ui, WindowFlags,
};
use glam::Vec2;

use dockspace_core::Viewport;

/// Identifier of a docking surface, derived from its host window's name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DockspaceId(pub u32);

/// A style variable the host overrides while it opens its window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StyleOverride {
    WindowBorderSize(f32),
    WindowRounding(f32),
    WindowPadding(Vec2),
}

/// What the content asked the frame loop to do after this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrameAction {
    #[default]
    Continue,
    Quit,
}

/// The subset of toolkit calls the dockspace host needs.
///
/// Mirrors the toolkit's stack-style API: every `begin_window` must be matched
/// by `end_window` regardless of its result, and a style override stays pushed
/// until its token is dropped.
pub trait DockUi {
    /// Pops its style override when dropped.
    type StyleToken<'a>
    where
        Self: 'a;

    /// Position and size of the main viewport this frame.
    fn viewport_rect(&self) -> Viewport;

    /// Pins the next window to `rect`.
    fn set_next_window_rect(&self, rect: Viewport);

    fn push_style(&self, style: StyleOverride) -> Self::StyleToken<'_>;

    /// Opens a window. Returns whether its contents are visible.
    fn begin_window(&self, name: &str, flags: WindowFlags) -> bool;

    fn end_window(&self);

    /// Stable identifier derived from `name` in the current id scope.
    fn id_of(&self, name: &str) -> DockspaceId;

    /// Submits a docking surface filling the current window.
    fn submit_dockspace(&self, id: DockspaceId, flags: DockNodeFlags);
}

/// Windows built after the dockspace host, each frame.
pub trait FrameContent<U: ?Sized> {
    fn build(&mut self, ui: &U, dockspace: DockspaceId) -> FrameAction;
}

impl From<DockspaceId> for Id {
    fn from(id: DockspaceId) -> Self {
        Id::from(id.0)
    }
}

impl From<StyleOverride> for StyleVar {
    fn from(style: StyleOverride) -> Self {
        match style {
            StyleOverride::WindowBorderSize(v) => StyleVar::WindowBorderSize(v),
            StyleOverride::WindowRounding(v) => StyleVar::WindowRounding(v),
            StyleOverride::WindowPadding(v) => StyleVar::WindowPadding(v.to_array()),
        }
    }
}

fn without_nuls(name: &str) -> String {
    // Interior NULs would truncate the label anyway.
    name.replace('\0', "")
}

// The window builder ends a window as soon as Begin returns false, but the host
// has to submit its dockspace every frame. So the host window's placement and
// its Begin/End pair go through the raw bindings.
#[allow(unsafe_code)]
impl DockUi for Ui {
    type StyleToken<'a> = StyleStackToken<'a>;

    fn viewport_rect(&self) -> Viewport {
        let viewport = self.main_viewport();
        Viewport::new(Vec2::from(viewport.pos()), Vec2::from(viewport.size()))
    }

    fn set_next_window_rect(&self, rect: Viewport) {
        let cond = Condition::Always as i32;
        let pos = sys::ImVec2 {
            x: rect.pos.x,
            y: rect.pos.y,
        };
        let size = sys::ImVec2 {
            x: rect.size.x,
            y: rect.size.y,
        };
        // SAFETY: plain setters on the current context, which a live `Ui` guarantees.
        unsafe {
            sys::igSetNextWindowPos(pos, cond, sys::ImVec2 { x: 0.0, y: 0.0 });
            sys::igSetNextWindowSize(size, cond);
        }
    }

    fn push_style(&self, style: StyleOverride) -> StyleStackToken<'_> {
        self.push_style_var(style.into())
    }

    fn begin_window(&self, name: &str, flags: WindowFlags) -> bool {
        let name = CString::new(without_nuls(name)).unwrap_or_default();
        // SAFETY: `name` outlives the call; callers pair every Begin with `end_window`.
        unsafe { sys::igBegin(name.as_ptr(), std::ptr::null_mut(), flags.bits() as _) }
    }

    fn end_window(&self) {
        // SAFETY: only called after `begin_window`, whatever it returned.
        unsafe { sys::igEnd() };
    }

    fn id_of(&self, name: &str) -> DockspaceId {
        DockspaceId(self.get_id(&without_nuls(name)).raw())
    }

    fn submit_dockspace(&self, id: DockspaceId, flags: DockNodeFlags) {
        self.dock_space_with_class(id.into(), [0.0, 0.0], flags, None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_overrides_map_to_style_vars() {
        assert_eq!(
            StyleVar::from(StyleOverride::WindowPadding(Vec2::new(4.0, 2.0))),
            StyleVar::WindowPadding([4.0, 2.0])
        );
        assert_eq!(
            StyleVar::from(StyleOverride::WindowRounding(0.0)),
            StyleVar::WindowRounding(0.0)
        );
        assert_eq!(
            StyleVar::from(StyleOverride::WindowBorderSize(1.0)),
            StyleVar::WindowBorderSize(1.0)
        );
    }

    #[test]
    fn test_dockspace_id_keeps_raw_value() {
        assert_eq!(Id::from(DockspaceId(0xBEEF)).raw(), 0xBEEF);
    }

    #[test]
    fn test_names_lose_interior_nuls() {
        assert_eq!(without_nuls("dock\0ing"), "docking");
    }
}
