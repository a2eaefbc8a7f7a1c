//! Collects native window events while the event loop is pumped.

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::ActiveEventLoop,
    window::{Window, WindowAttributes, WindowId},
};

/// Application handler driven by `pump_app_events`.
///
/// Creates the window the first time the loop resumes and queues every window
/// event until the frame loop drains them.
pub(crate) struct SurfaceEvents {
    attributes: WindowAttributes,
    pub(crate) window: Option<Arc<Window>>,
    pub(crate) creation_error: Option<String>,
    pending: Vec<WindowEvent>,
    pub(crate) close_requested: bool,
    pub(crate) resized: Option<(u32, u32)>,
}

impl SurfaceEvents {
    pub(crate) fn new(attributes: WindowAttributes) -> Self {
        Self {
            attributes,
            window: None,
            creation_error: None,
            pending: Vec::new(),
            close_requested: false,
            resized: None,
        }
    }

    /// Takes the queued events in arrival order.
    pub(crate) fn drain(&mut self) -> Vec<WindowEvent> {
        std::mem::take(&mut self.pending)
    }
}

impl ApplicationHandler for SurfaceEvents {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        match event_loop.create_window(self.attributes.clone()) {
            Ok(window) => {
                log::info!("created window '{}'", window.title());
                self.window = Some(Arc::new(window));
            }
            Err(err) => self.creation_error = Some(err.to_string()),
        }
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match &event {
            WindowEvent::CloseRequested => {
                log::debug!("close requested");
                self.close_requested = true;
            }
            WindowEvent::Resized(size) => {
                self.resized = Some((size.width, size.height));
            }
            _ => {}
        }
        self.pending.push(event);
    }
}
