//! The full-viewport window every other window docks into.

use std::ops::Deref;

use dear_imgui_rs::{DockNodeFlags, WindowFlags};
use glam::Vec2;

use dockspace_core::{DockspaceError, Result};

use crate::dock_ui::{DockUi, DockspaceId, StyleOverride};

/// Style overrides that strip the host's chrome.
const HOST_STYLE: [StyleOverride; 3] = [
    StyleOverride::WindowBorderSize(0.0),
    StyleOverride::WindowRounding(0.0),
    StyleOverride::WindowPadding(Vec2::ZERO),
];

/// Flags for the host window: pinned, invisible chrome, never a dock target itself.
pub fn host_window_flags() -> WindowFlags {
    WindowFlags::MENU_BAR
        | WindowFlags::NO_DOCKING
        | WindowFlags::NO_TITLE_BAR
        | WindowFlags::NO_COLLAPSE
        | WindowFlags::NO_RESIZE
        | WindowFlags::NO_MOVE
        | WindowFlags::NO_BRING_TO_FRONT_ON_FOCUS
        | WindowFlags::NO_NAV_FOCUS
}

/// Holds the tokens of the style overrides it pushed and pops them, newest
/// first, when dropped, so early returns stay balanced.
pub struct StyleScope<'ui, U: DockUi + ?Sized + 'ui> {
    ui: &'ui U,
    tokens: Vec<U::StyleToken<'ui>>,
}

impl<'ui, U: DockUi + ?Sized + 'ui> StyleScope<'ui, U> {
    pub fn new(ui: &'ui U) -> Self {
        Self {
            ui,
            tokens: Vec::new(),
        }
    }

    pub fn push(&mut self, style: StyleOverride) {
        self.tokens.push(self.ui.push_style(style));
    }

    pub fn pushed(&self) -> usize {
        self.tokens.len()
    }

    /// Pops everything pushed so far.
    pub fn pop_all(&mut self) {
        // A Vec drops front to back; the style stack needs back to front.
        while let Some(token) = self.tokens.pop() {
            drop(token);
        }
    }
}

impl<'ui, U: DockUi + ?Sized + 'ui> Deref for StyleScope<'ui, U> {
    type Target = U;

    fn deref(&self) -> &U {
        self.ui
    }
}

impl<'ui, U: DockUi + ?Sized + 'ui> Drop for StyleScope<'ui, U> {
    fn drop(&mut self) {
        self.pop_all();
    }
}

/// The always-open host window and its docking surface.
///
/// Once rendered, it must be rendered in every following frame: a single
/// skipped frame orphans every window docked into it. [`DockspaceHost::render`]
/// reports both a skipped frame and a second render within one frame.
#[derive(Debug, Clone)]
pub struct DockspaceHost {
    name: String,
    last_frame: Option<u64>,
    dockspace_id: Option<DockspaceId>,
}

impl DockspaceHost {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            last_frame: None,
            dockspace_id: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The frame this host was last rendered in.
    pub fn last_frame(&self) -> Option<u64> {
        self.last_frame
    }

    /// Identifier of the docking surface, once the host has been rendered.
    pub fn dockspace_id(&self) -> Option<DockspaceId> {
        self.dockspace_id
    }

    /// Opens the host over the whole viewport and submits its dockspace.
    ///
    /// Must be called exactly once for every `frame`, in order.
    pub fn render<U: DockUi + ?Sized>(&mut self, ui: &U, frame: u64) -> Result<DockspaceId> {
        self.check_frame(frame)?;

        let viewport = ui.viewport_rect();
        ui.set_next_window_rect(viewport);

        let mut style = StyleScope::new(ui);
        for override_ in HOST_STYLE {
            style.push(override_);
        }
        let expanded = style.begin_window(&self.name, host_window_flags());
        style.pop_all();
        log::trace!(
            "dockspace host '{}' frame {frame}: {:?} at {:?}, expanded: {expanded}",
            self.name,
            viewport.size,
            viewport.pos
        );

        // Submitted whether or not the window reported itself expanded.
        let id = ui.id_of(&self.name);
        ui.submit_dockspace(id, DockNodeFlags::PASSTHRU_CENTRAL_NODE);
        ui.end_window();

        self.last_frame = Some(frame);
        self.dockspace_id = Some(id);
        Ok(id)
    }

    fn check_frame(&self, frame: u64) -> Result<()> {
        match self.last_frame {
            Some(last) if frame == last => Err(self.lifecycle(format!(
                "rendered twice in frame {frame}"
            ))),
            Some(last) if frame != last + 1 => Err(self.lifecycle(format!(
                "not rendered between frame {last} and frame {frame}"
            ))),
            _ => Ok(()),
        }
    }

    fn lifecycle(&self, detail: String) -> DockspaceError {
        DockspaceError::HostLifecycle {
            name: self.name.clone(),
            detail,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::{RecordingUi, UiCall};
    use dockspace_core::Viewport;
    use proptest::prelude::*;

    fn ui_1280x720() -> RecordingUi {
        RecordingUi::new(Viewport::from_size(1280.0, 720.0))
    }

    #[test]
    fn test_first_frame_matches_viewport() {
        let ui = ui_1280x720();
        let mut host = DockspaceHost::new("docking_space");
        host.render(&ui, 0).unwrap();

        assert_eq!(
            ui.calls()[0],
            UiCall::SetNextWindowRect(Viewport::from_size(1280.0, 720.0))
        );
    }

    #[test]
    fn test_call_sequence() {
        let ui = ui_1280x720();
        let mut host = DockspaceHost::new("docking_space");
        let id = host.render(&ui, 0).unwrap();

        let calls = ui.calls();
        assert_eq!(calls.len(), 11);
        assert_eq!(calls[1], UiCall::PushStyle(StyleOverride::WindowBorderSize(0.0)));
        assert_eq!(calls[2], UiCall::PushStyle(StyleOverride::WindowRounding(0.0)));
        assert_eq!(calls[3], UiCall::PushStyle(StyleOverride::WindowPadding(Vec2::ZERO)));
        assert_eq!(
            calls[4],
            UiCall::BeginWindow {
                name: "docking_space".into(),
                flags: host_window_flags(),
            }
        );
        assert_eq!(calls[5], UiCall::PopStyle(StyleOverride::WindowPadding(Vec2::ZERO)));
        assert_eq!(calls[6], UiCall::PopStyle(StyleOverride::WindowRounding(0.0)));
        assert_eq!(calls[7], UiCall::PopStyle(StyleOverride::WindowBorderSize(0.0)));
        assert_eq!(calls[8], UiCall::IdOf("docking_space".into()));
        assert_eq!(
            calls[9],
            UiCall::Dockspace {
                id,
                flags: DockNodeFlags::PASSTHRU_CENTRAL_NODE,
            }
        );
        assert_eq!(calls[10], UiCall::EndWindow);
        assert_eq!(host.dockspace_id(), Some(id));
    }

    #[test]
    fn test_host_flags() {
        let flags = host_window_flags();
        assert!(flags.contains(WindowFlags::NO_DOCKING));
        assert!(flags.contains(WindowFlags::MENU_BAR));
        assert!(flags.contains(WindowFlags::NO_BRING_TO_FRONT_ON_FOCUS));
        assert!(!flags.contains(WindowFlags::NO_BACKGROUND));
    }

    #[test]
    fn test_collapsed_frame_still_submits_dockspace() {
        let ui = ui_1280x720();
        ui.set_expanded(false);
        let mut host = DockspaceHost::new("docking_space");
        host.render(&ui, 0).unwrap();

        let calls = ui.calls();
        assert!(calls.iter().any(|c| matches!(c, UiCall::Dockspace { .. })));
        assert_eq!(calls.last(), Some(&UiCall::EndWindow));
        assert_eq!(ui.window_depth(), 0);
        assert_eq!(ui.style_depth(), 0);
    }

    #[test]
    fn test_dockspace_id_is_stable() {
        let ui = ui_1280x720();
        let mut host = DockspaceHost::new("docking_space");
        let first = host.render(&ui, 0).unwrap();
        let second = host.render(&ui, 1).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_rendering_twice_in_a_frame_is_rejected() {
        let ui = ui_1280x720();
        let mut host = DockspaceHost::new("docking_space");
        host.render(&ui, 0).unwrap();
        let err = host.render(&ui, 0).unwrap_err();
        assert!(matches!(err, DockspaceError::HostLifecycle { .. }));
    }

    #[test]
    fn test_skipped_frame_is_rejected() {
        let ui = ui_1280x720();
        let mut host = DockspaceHost::new("docking_space");
        host.render(&ui, 0).unwrap();
        ui.take_calls();

        let err = host.render(&ui, 2).unwrap_err();
        assert!(err.to_string().contains("docking_space"));
        // Nothing is submitted for a rejected frame.
        assert!(ui.calls().is_empty());
    }

    #[test]
    fn test_first_render_may_start_late() {
        let ui = ui_1280x720();
        let mut host = DockspaceHost::new("docking_space");
        assert!(host.render(&ui, 5).is_ok());
        assert_eq!(host.last_frame(), Some(5));
    }

    #[test]
    fn test_style_scope_pops_on_drop() {
        let ui = ui_1280x720();
        {
            let mut scope = StyleScope::new(&ui);
            scope.push(StyleOverride::WindowRounding(0.0));
            scope.push(StyleOverride::WindowBorderSize(0.0));
            assert_eq!(scope.pushed(), 2);
        }
        assert_eq!(ui.style_depth(), 0);
        assert_eq!(
            ui.calls()[2..],
            [
                UiCall::PopStyle(StyleOverride::WindowBorderSize(0.0)),
                UiCall::PopStyle(StyleOverride::WindowRounding(0.0)),
            ]
        );
    }

    #[test]
    fn test_style_scope_pop_all_is_idempotent() {
        let ui = ui_1280x720();
        let mut scope = StyleScope::new(&ui);
        scope.push(StyleOverride::WindowRounding(0.0));
        scope.pop_all();
        assert_eq!(scope.pushed(), 0);
        scope.pop_all();
        drop(scope);
        assert_eq!(ui.calls().len(), 2);
        assert_eq!(ui.style_depth(), 0);
    }

    #[test]
    fn test_style_scope_without_pushes_pops_nothing() {
        let ui = ui_1280x720();
        drop(StyleScope::new(&ui));
        assert!(ui.calls().is_empty());
    }

    proptest! {
        #[test]
        fn prop_host_rect_tracks_viewport(
            frames in prop::collection::vec(
                (-500.0f32..500.0, -500.0f32..500.0, 0.0f32..4096.0, 0.0f32..4096.0, any::<bool>()),
                1..20,
            )
        ) {
            let ui = RecordingUi::default();
            let mut host = DockspaceHost::new("docking_space");

            for (frame, (x, y, w, h, expanded)) in frames.into_iter().enumerate() {
                let viewport = Viewport::new(Vec2::new(x, y), Vec2::new(w, h));
                ui.set_viewport(viewport);
                ui.set_expanded(expanded);
                host.render(&ui, frame as u64).unwrap();
                prop_assert_eq!(ui.style_depth(), 0);
                prop_assert_eq!(ui.window_depth(), 0);

                let calls = ui.take_calls();
                prop_assert_eq!(&calls[0], &UiCall::SetNextWindowRect(viewport));
                prop_assert_eq!(
                    calls.iter().filter(|c| matches!(c, UiCall::BeginWindow { .. })).count(),
                    1
                );
                prop_assert_eq!(
                    calls.iter().filter(|c| matches!(c, UiCall::Dockspace { .. })).count(),
                    1
                );
            }
        }
    }
}
