//! The windowed backend: a winit/wgpu surface with a dear-imgui integration on top.

use std::sync::Arc;

use dockspace_core::{load_atlas, Options, Result};
use dockspace_render::WindowSurface;
use dockspace_ui::{FrameAction, ImguiIntegration, Ui, UiContext};

use crate::frame_loop::FrameBackend;

/// Owns the surface and the toolkit integration for the lifetime of the loop.
pub struct ImguiBackend {
    imgui: ImguiIntegration,
    surface: WindowSurface,
}

impl ImguiBackend {
    /// Loads fonts, opens the window and attaches the toolkit to it.
    ///
    /// Fonts are read first so a missing icon font fails before any window appears.
    pub fn init(options: &Options) -> Result<Self> {
        let atlas = load_atlas(&options.fonts)?;
        let surface = WindowSurface::init(options)?;

        let mut ui = UiContext::new();
        ui.install_fonts(&atlas)?;
        let imgui = ui.attach(&surface)?;

        let (width, height) = surface.size()?;
        log::info!("backend ready: {width}x{height}, {} glyphs", atlas.glyph_count());
        Ok(Self { imgui, surface })
    }
}

impl FrameBackend for ImguiBackend {
    type Ui = Ui;

    fn poll_events(&mut self) -> Result<()> {
        self.surface.poll_events()?;
        Ok(())
    }

    fn should_close(&self) -> bool {
        self.surface.should_close()
    }

    fn process_inputs(&mut self) -> Result<()> {
        let window = Arc::clone(self.surface.window()?);
        for event in self.surface.drain_events() {
            self.imgui.handle_event(&window, event);
        }
        self.imgui.prepare_frame(&window);
        Ok(())
    }

    fn new_frame(
        &mut self,
        build: &mut dyn FnMut(&Ui) -> Result<FrameAction>,
    ) -> Result<FrameAction> {
        let window = Arc::clone(self.surface.window()?);
        self.imgui.frame(&window, |ui| build(ui))
    }

    fn render(&mut self, clear_color: [f32; 4]) -> Result<()> {
        if !self.imgui.render(&mut self.surface, clear_color)? {
            log::trace!("no swap chain image this frame");
        }
        Ok(())
    }

    fn swap_buffers(&mut self) -> Result<()> {
        self.surface.swap_buffers()?;
        Ok(())
    }

    fn shutdown_renderer(&mut self) -> bool {
        self.imgui.shutdown()
    }

    fn terminate_surface(&mut self) -> bool {
        self.surface.terminate()
    }
}
