//! dear-imgui integration with wgpu and winit.

use std::ptr::NonNull;

use dear_imgui_rs::{sys, ConfigFlags, Context, FontConfig, Ui};
use dear_imgui_wgpu::{WgpuInitInfo, WgpuRenderer};
use dear_imgui_winit::{HiDpiMode, WinitPlatform};
use winit::event::{Event, WindowEvent};
use winit::window::Window;

use dockspace_core::{AtlasFace, FaceSource, FontAtlas};
use dockspace_render::{RenderError, WindowSurface};

use crate::error::{UiError, UiResult};

/// How one atlas face is handed to the toolkit.
#[derive(Debug, Clone, PartialEq)]
pub struct FacePlan<'a> {
    pub label: &'a str,
    /// Font file contents; `None` for the toolkit's embedded font.
    pub data: Option<&'a [u8]>,
    /// Pixel size; `0.0` keeps the toolkit's default.
    pub size_pixels: f32,
    pub merge: bool,
    pub glyph_min_advance_x: f32,
    /// Zero-terminated range list the toolkit restricts the face to.
    pub glyph_ranges: Option<Box<[sys::ImWchar]>>,
}

impl<'a> FacePlan<'a> {
    pub fn new(face: &'a AtlasFace<'_>) -> Self {
        let data = match &face.source {
            FaceSource::Default => None,
            FaceSource::File(file) => Some(file.data()),
        };
        Self {
            label: face.label(),
            data,
            size_pixels: face.size_pixels.unwrap_or(0.0),
            merge: face.merge,
            glyph_min_advance_x: face.glyph_min_advance_x,
            glyph_ranges: face
                .ranges
                .map(|ranges| ranges.to_zero_terminated().into_boxed_slice()),
        }
    }

    /// The toolkit config for this face. Glyph ranges are passed separately.
    pub fn config(&self) -> FontConfig {
        let config = FontConfig::new()
            .merge_mode(self.merge)
            .glyph_min_advance_x(self.glyph_min_advance_x);
        if self.size_pixels > 0.0 {
            config.size_pixels(self.size_pixels)
        } else {
            config
        }
    }
}

/// Plans every face of `atlas`, base face first.
pub fn plan_faces<'a>(atlas: &'a FontAtlas<'_>) -> Vec<FacePlan<'a>> {
    atlas.faces().iter().map(FacePlan::new).collect()
}

/// Font file bytes copied into memory the toolkit allocated.
///
/// The atlas takes ownership of font data by default and releases it with the
/// toolkit's allocator, so Rust-owned bytes are never handed over directly.
struct ToolkitBytes {
    ptr: NonNull<u8>,
    len: usize,
}

#[allow(unsafe_code)]
impl ToolkitBytes {
    fn copy_from(data: &[u8]) -> Option<Self> {
        if data.is_empty() {
            return None;
        }
        // SAFETY: a fresh allocation of `data.len()` bytes, checked for null
        // before the non-overlapping copy.
        unsafe {
            let ptr = NonNull::new(sys::igMemAlloc(data.len()).cast::<u8>())?;
            std::ptr::copy_nonoverlapping(data.as_ptr(), ptr.as_ptr(), data.len());
            Some(Self {
                ptr,
                len: data.len(),
            })
        }
    }

    fn as_slice(&self) -> &[u8] {
        // SAFETY: `ptr` owns `len` initialized bytes until dropped or handed over.
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    /// Adds the bytes as a face. The atlas owns them afterwards, even on failure.
    fn add_to(
        self,
        atlas: &mut dear_imgui_rs::FontAtlas,
        size_pixels: f32,
        config: &FontConfig,
        glyph_ranges: Option<&[sys::ImWchar]>,
    ) -> bool {
        let added = atlas
            .add_font_from_memory_ttf(self.as_slice(), size_pixels, Some(config), glyph_ranges)
            .is_some();
        std::mem::forget(self);
        added
    }
}

#[allow(unsafe_code)]
impl Drop for ToolkitBytes {
    fn drop(&mut self) {
        // SAFETY: allocated by `igMemAlloc` and not handed to the atlas.
        unsafe { sys::igMemFree(self.ptr.as_ptr().cast()) };
    }
}

/// Fonts handed to the toolkit.
///
/// The toolkit reads glyph range lists lazily while it rasterizes, so they are
/// kept here for the lifetime of the context.
#[derive(Default)]
struct InstalledFonts {
    installed: bool,
    glyph_ranges: Vec<Box<[sys::ImWchar]>>,
}

/// A toolkit context that has not been attached to a window yet.
///
/// Fonts can only be installed in this phase; [`UiContext::attach`] consumes it.
pub struct UiContext {
    context: Context,
    fonts: InstalledFonts,
}

impl UiContext {
    /// Creates the toolkit context with docking enabled.
    #[must_use]
    pub fn new() -> Self {
        let mut context = Context::create();
        let io = context.io_mut();
        io.set_config_flags(io.config_flags() | ConfigFlags::DOCKING_ENABLE);
        Self {
            context,
            fonts: InstalledFonts::default(),
        }
    }

    /// Adds every face of `atlas` to the toolkit's font atlas, merging in order.
    ///
    /// Returns the number of faces added. Fails if fonts were already installed.
    pub fn install_fonts(&mut self, atlas: &FontAtlas<'_>) -> UiResult<usize> {
        if self.fonts.installed {
            return Err(UiError::AtlasAlreadyInstalled);
        }

        let plans = plan_faces(atlas);
        let mut toolkit_atlas = self.context.font_atlas_mut();
        for plan in &plans {
            let config = plan.config();
            let ranges = plan.glyph_ranges.clone().map(|ranges| {
                self.fonts.glyph_ranges.push(ranges);
                self.fonts.glyph_ranges.len() - 1
            });
            let ranges = ranges.map(|index| &*self.fonts.glyph_ranges[index]);

            let added = match plan.data {
                None => {
                    toolkit_atlas.add_font_default(Some(&config));
                    true
                }
                Some(data) => ToolkitBytes::copy_from(data).is_some_and(|bytes| {
                    bytes.add_to(&mut toolkit_atlas, plan.size_pixels, &config, ranges)
                }),
            };
            if !added {
                return Err(UiError::FontRejected {
                    label: plan.label.to_owned(),
                });
            }
            log::debug!(
                "added font face '{}' (merge: {}, {} range values)",
                plan.label,
                plan.merge,
                ranges.map_or(0, <[_]>::len)
            );
        }

        self.fonts.installed = true;
        log::info!(
            "installed font atlas: {} faces, {} codepoints",
            plans.len(),
            atlas.glyph_count()
        );
        Ok(plans.len())
    }

    pub fn fonts_installed(&self) -> bool {
        self.fonts.installed
    }

    /// Binds the context to the surface's window and creates the renderer.
    ///
    /// The renderer builds the font atlas texture here, once, before the first frame.
    pub fn attach(mut self, surface: &WindowSurface) -> UiResult<ImguiIntegration> {
        if !self.fonts.installed {
            return Err(UiError::AtlasMissing);
        }

        let window = surface.window()?;
        let mut platform = WinitPlatform::new(&mut self.context);
        platform.attach_window(window, HiDpiMode::Default, &mut self.context);

        let init_info = WgpuInitInfo::new(
            surface.device()?.clone(),
            surface.queue()?.clone(),
            surface.format()?,
        );
        let renderer = WgpuRenderer::new(init_info, &mut self.context)
            .map_err(|e| UiError::Renderer(e.to_string()))?;
        log::info!("imgui renderer ready ({:?})", surface.format()?);

        Ok(ImguiIntegration {
            context: self.context,
            platform,
            renderer: Some(renderer),
            _fonts: self.fonts,
        })
    }
}

impl Default for UiContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Manages the toolkit context, its winit platform and its wgpu renderer.
pub struct ImguiIntegration {
    context: Context,
    platform: WinitPlatform,
    renderer: Option<WgpuRenderer>,
    _fonts: InstalledFonts,
}

impl ImguiIntegration {
    /// Forwards a window event to the toolkit.
    pub fn handle_event(&mut self, window: &Window, event: WindowEvent) {
        let event: Event<()> = Event::WindowEvent {
            window_id: window.id(),
            event,
        };
        self.platform.handle_event(&mut self.context, window, &event);
    }

    /// Updates display size, scale and timing before a frame is built.
    pub fn prepare_frame(&mut self, window: &Window) {
        self.platform.prepare_frame(window, &mut self.context);
    }

    /// Starts a frame, lets `build` submit widgets, and closes the frame.
    pub fn frame<R>(&mut self, window: &Window, build: impl FnOnce(&Ui) -> R) -> R {
        let ui = self.context.frame();
        let result = build(ui);
        self.platform.prepare_render_with_ui(ui, window);
        result
    }

    /// Finalizes the frame's draw data and renders it over a cleared surface image.
    ///
    /// Returns `Ok(false)` when the surface had no image to draw into.
    pub fn render(&mut self, surface: &mut WindowSurface, clear_color: [f32; 4]) -> UiResult<bool> {
        let renderer = self.renderer.as_mut().ok_or(RenderError::Terminated)?;
        let draw_data = self.context.render();
        let drawn = surface.draw(clear_color, |pass| {
            renderer
                .render_draw_data(draw_data, pass)
                .map_err(|e| RenderError::DrawFailed(e.to_string()))
        })?;
        Ok(drawn)
    }

    /// Releases the renderer's GPU resources. Returns `false` if already released.
    pub fn shutdown(&mut self) -> bool {
        if self.renderer.take().is_none() {
            return false;
        }
        log::info!("imgui renderer shut down");
        true
    }

    pub fn is_shut_down(&self) -> bool {
        self.renderer.is_none()
    }
}
