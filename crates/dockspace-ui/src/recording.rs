//! A [`DockUi`] that records calls instead of drawing, for tests and headless runs.

use std::cell::{Cell, RefCell};

use dear_imgui_rs::{DockNodeFlags, WindowFlags};

use dockspace_core::Viewport;

use crate::dock_ui::{DockUi, DockspaceId, StyleOverride};

/// One recorded toolkit call.
#[derive(Debug, Clone, PartialEq)]
pub enum UiCall {
    SetNextWindowRect(Viewport),
    PushStyle(StyleOverride),
    PopStyle(StyleOverride),
    BeginWindow { name: String, flags: WindowFlags },
    EndWindow,
    IdOf(String),
    Dockspace { id: DockspaceId, flags: DockNodeFlags },
}

/// Records every [`DockUi`] call in order.
///
/// `begin_window` answers with the configured expanded flag so callers can be
/// checked against collapsed frames.
#[derive(Debug)]
pub struct RecordingUi {
    viewport: Cell<Viewport>,
    expanded: Cell<bool>,
    calls: RefCell<Vec<UiCall>>,
}

impl RecordingUi {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport: Cell::new(viewport),
            expanded: Cell::new(true),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn set_viewport(&self, viewport: Viewport) {
        self.viewport.set(viewport);
    }

    /// What `begin_window` returns from now on.
    pub fn set_expanded(&self, expanded: bool) {
        self.expanded.set(expanded);
    }

    pub fn calls(&self) -> Vec<UiCall> {
        self.calls.borrow().clone()
    }

    /// Removes and returns the calls recorded so far.
    pub fn take_calls(&self) -> Vec<UiCall> {
        std::mem::take(&mut *self.calls.borrow_mut())
    }

    /// Pushes minus pops over the recorded calls.
    pub fn style_depth(&self) -> isize {
        self.calls.borrow().iter().fold(0, |depth, call| match call {
            UiCall::PushStyle(_) => depth + 1,
            UiCall::PopStyle(_) => depth - 1,
            _ => depth,
        })
    }

    /// `begin_window` calls minus `end_window` calls.
    pub fn window_depth(&self) -> isize {
        self.calls.borrow().iter().fold(0, |depth, call| match call {
            UiCall::BeginWindow { .. } => depth + 1,
            UiCall::EndWindow => depth - 1,
            _ => depth,
        })
    }

    /// How many times a window called `name` was begun.
    pub fn begin_count(&self, name: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|call| matches!(call, UiCall::BeginWindow { name: n, .. } if n == name))
            .count()
    }

    fn record(&self, call: UiCall) {
        self.calls.borrow_mut().push(call);
    }
}

/// Records the pop of its style override when dropped.
#[derive(Debug)]
pub struct RecordedStyle<'a> {
    ui: &'a RecordingUi,
    style: StyleOverride,
}

impl Drop for RecordedStyle<'_> {
    fn drop(&mut self) {
        self.ui.record(UiCall::PopStyle(self.style));
    }
}

impl Default for RecordingUi {
    fn default() -> Self {
        Self::new(Viewport::default())
    }
}

impl DockUi for RecordingUi {
    type StyleToken<'a> = RecordedStyle<'a>;

    fn viewport_rect(&self) -> Viewport {
        self.viewport.get()
    }

    fn set_next_window_rect(&self, rect: Viewport) {
        self.record(UiCall::SetNextWindowRect(rect));
    }

    fn push_style(&self, style: StyleOverride) -> RecordedStyle<'_> {
        self.record(UiCall::PushStyle(style));
        RecordedStyle { ui: self, style }
    }

    fn begin_window(&self, name: &str, flags: WindowFlags) -> bool {
        self.record(UiCall::BeginWindow {
            name: name.to_owned(),
            flags,
        });
        self.expanded.get()
    }

    fn end_window(&self) {
        self.record(UiCall::EndWindow);
    }

    fn id_of(&self, name: &str) -> DockspaceId {
        self.record(UiCall::IdOf(name.to_owned()));
        // FNV-1a; stable across calls like the toolkit's name hash.
        let hash = name.bytes().fold(0x811c_9dc5_u32, |h, b| {
            (h ^ u32::from(b)).wrapping_mul(0x0100_0193)
        });
        DockspaceId(hash)
    }

    fn submit_dockspace(&self, id: DockspaceId, flags: DockNodeFlags) {
        self.record(UiCall::Dockspace { id, flags });
    }
}
