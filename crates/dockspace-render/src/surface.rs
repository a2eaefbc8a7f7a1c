//! The window surface: native window, GPU device and swap chain.

use std::sync::Arc;
use std::time::Duration;

use winit::{
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::EventLoop,
    platform::pump_events::{EventLoopExtPumpEvents, PumpStatus},
    window::Window,
};

use dockspace_core::{BackendPreference, GlContextHints, Options};

use crate::error::{RenderError, RenderResult};
use crate::events::SurfaceEvents;

/// Upper bound on startup pumps while waiting for the window to appear.
///
/// Windows are created in `resumed`, which some platforms deliver only after a
/// few iterations of the event loop. Each pump is non-blocking, so a platform
/// that never resumes fails startup instead of hanging.
const STARTUP_PUMPS: usize = 16;

/// GPU objects tied to the window's lifetime.
struct GpuContext {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
}

/// Owns the native window, its GPU context and the swap chain.
///
/// Nothing here may be used after [`WindowSurface::terminate`]; every accessor
/// returns [`RenderError::Terminated`] from then on.
pub struct WindowSurface {
    event_loop: EventLoop<()>,
    events: SurfaceEvents,
    window: Option<Arc<Window>>,
    gpu: Option<GpuContext>,
    frame: Option<wgpu::SurfaceTexture>,
}

impl WindowSurface {
    /// Opens the window and creates the GPU context.
    pub fn init(options: &Options) -> RenderResult<Self> {
        check_gl_hints(options.backend, options.gl)?;

        let mut event_loop = EventLoop::new()
            .map_err(|e| RenderError::EventLoopCreationFailed(e.to_string()))?;

        let [width, height] = options.window_size;
        let attributes = Window::default_attributes()
            .with_title(options.window_title.clone())
            .with_inner_size(LogicalSize::new(width, height));
        let mut events = SurfaceEvents::new(attributes);

        for _ in 0..STARTUP_PUMPS {
            if let PumpStatus::Exit(code) =
                event_loop.pump_app_events(Some(Duration::ZERO), &mut events)
            {
                return Err(RenderError::WindowCreationFailed(format!(
                    "event loop exited with code {code} before the window was created"
                )));
            }
            if events.window.is_some() || events.creation_error.is_some() {
                break;
            }
        }

        if let Some(reason) = events.creation_error.take() {
            return Err(RenderError::WindowCreationFailed(reason));
        }
        let window = events
            .window
            .clone()
            .ok_or_else(|| RenderError::WindowCreationFailed("window was never created".into()))?;

        let gpu = pollster::block_on(GpuContext::new(window.clone(), options.backend))?;

        Ok(Self {
            event_loop,
            events,
            window: Some(window),
            gpu: Some(gpu),
            frame: None,
        })
    }

    /// Processes pending native events without blocking.
    ///
    /// A resize is applied to the swap chain here, before the next frame is built.
    pub fn poll_events(&mut self) -> RenderResult<()> {
        if self.gpu.is_none() {
            return Err(RenderError::Terminated);
        }

        if let PumpStatus::Exit(code) = self
            .event_loop
            .pump_app_events(Some(Duration::ZERO), &mut self.events)
        {
            log::debug!("event loop exited with code {code}");
            self.events.close_requested = true;
        }

        if let Some((width, height)) = self.events.resized.take() {
            self.resize(width, height);
        }
        Ok(())
    }

    /// Takes the window events collected by the last [`poll_events`](Self::poll_events).
    pub fn drain_events(&mut self) -> Vec<WindowEvent> {
        self.events.drain()
    }

    /// Whether the window has been asked to close.
    pub fn should_close(&self) -> bool {
        self.events.close_requested
    }

    pub fn window(&self) -> RenderResult<&Arc<Window>> {
        self.window.as_ref().ok_or(RenderError::Terminated)
    }

    pub fn device(&self) -> RenderResult<&wgpu::Device> {
        Ok(&self.gpu()?.device)
    }

    pub fn queue(&self) -> RenderResult<&wgpu::Queue> {
        Ok(&self.gpu()?.queue)
    }

    /// Texture format of the swap chain.
    pub fn format(&self) -> RenderResult<wgpu::TextureFormat> {
        Ok(self.gpu()?.config.format)
    }

    /// Current swap chain size in physical pixels.
    pub fn size(&self) -> RenderResult<(u32, u32)> {
        let config = &self.gpu()?.config;
        Ok((config.width, config.height))
    }

    /// Reconfigures the swap chain. Zero sizes (minimized windows) are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if let Some(gpu) = &mut self.gpu {
            gpu.config.width = width;
            gpu.config.height = height;
            gpu.surface.configure(&gpu.device, &gpu.config);
            log::debug!("surface resized to {width}x{height}");
        }
    }

    /// Clears the next swap chain image to `clear_color` and records draw commands into it.
    ///
    /// The image is held until [`swap_buffers`](Self::swap_buffers). Returns
    /// `Ok(false)` when no image was available this frame.
    pub fn draw<F>(&mut self, clear_color: [f32; 4], record: F) -> RenderResult<bool>
    where
        F: FnOnce(&mut wgpu::RenderPass<'_>) -> RenderResult<()>,
    {
        let Some(frame) = self.acquire()? else {
            return Ok(false);
        };
        let gpu = self.gpu()?;

        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("ui encoder"),
            });

        {
            let [r, g, b, a] = clear_color.map(f64::from);
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("ui render pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    depth_slice: None,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                ..Default::default()
            });
            record(&mut render_pass)?;
        }

        gpu.queue.submit(std::iter::once(encoder.finish()));
        self.frame = Some(frame);
        Ok(true)
    }

    /// Presents the image drawn by the last [`draw`](Self::draw), if any.
    pub fn swap_buffers(&mut self) -> RenderResult<()> {
        if self.gpu.is_none() {
            return Err(RenderError::Terminated);
        }
        if let Some(window) = &self.window {
            window.pre_present_notify();
        }
        if let Some(frame) = self.frame.take() {
            frame.present();
        }
        if let Some(window) = &self.window {
            window.request_redraw();
        }
        Ok(())
    }

    /// Releases the swap chain, the GPU context and the window, in that order.
    ///
    /// Returns `false` if the surface was already terminated.
    pub fn terminate(&mut self) -> bool {
        if self.gpu.is_none() && self.window.is_none() {
            return false;
        }
        self.frame = None;
        self.gpu = None;
        self.window = None;
        log::info!("surface terminated");
        true
    }

    pub fn is_terminated(&self) -> bool {
        self.gpu.is_none()
    }

    fn gpu(&self) -> RenderResult<&GpuContext> {
        self.gpu.as_ref().ok_or(RenderError::Terminated)
    }

    /// Gets the next swap chain image, reconfiguring once if the surface went stale.
    fn acquire(&self) -> RenderResult<Option<wgpu::SurfaceTexture>> {
        let gpu = self.gpu()?;
        match gpu.surface.get_current_texture() {
            Ok(frame) => Ok(Some(frame)),
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("timed out acquiring swap chain image, skipping frame");
                Ok(None)
            }
            Err(err @ (wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated)) => {
                log::warn!("{err}, reconfiguring surface");
                gpu.surface.configure(&gpu.device, &gpu.config);
                match gpu.surface.get_current_texture() {
                    Ok(frame) => Ok(Some(frame)),
                    Err(wgpu::SurfaceError::Lost) => Err(RenderError::SurfaceLost),
                    Err(wgpu::SurfaceError::Outdated) => Err(RenderError::SurfaceOutdated),
                    Err(wgpu::SurfaceError::OutOfMemory) => Err(RenderError::OutOfMemory),
                    Err(err) => Err(RenderError::DrawFailed(err.to_string())),
                }
            }
            Err(wgpu::SurfaceError::OutOfMemory) => Err(RenderError::OutOfMemory),
            Err(err) => Err(RenderError::DrawFailed(err.to_string())),
        }
    }
}

impl Drop for WindowSurface {
    fn drop(&mut self) {
        self.terminate();
    }
}

impl GpuContext {
    async fn new(window: Arc<Window>, backend: BackendPreference) -> RenderResult<Self> {
        let backends = match backend {
            BackendPreference::Auto => wgpu::Backends::PRIMARY,
            BackendPreference::Gl => wgpu::Backends::GL,
        };
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends,
            ..wgpu::InstanceDescriptor::default()
        });

        let surface = instance.create_surface(window.clone())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|err| {
                log::error!("no suitable adapter: {err}");
                RenderError::AdapterCreationFailed
            })?;

        let info = adapter.get_info();
        log::info!("using adapter '{}' ({:?})", info.name, info.backend);

        // The GL backend only guarantees downlevel limits.
        let required_limits = match backend {
            BackendPreference::Auto => wgpu::Limits::default(),
            BackendPreference::Gl => {
                wgpu::Limits::downlevel_webgl2_defaults().using_resolution(adapter.limits())
            }
        };

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("dockspace device"),
                required_features: wgpu::Features::empty(),
                required_limits,
                experimental_features: wgpu::ExperimentalFeatures::default(),
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;

        let size = window.inner_size();
        let width = size.width.max(1);
        let height = size.height.max(1);

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or(RenderError::SurfaceConfigurationFailed)?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width,
            height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        Ok(Self {
            surface,
            device,
            queue,
            config,
        })
    }
}

/// Rejects GL hints the GL backend cannot satisfy. Hints are ignored for other backends.
fn check_gl_hints(backend: BackendPreference, hints: GlContextHints) -> RenderResult<()> {
    if backend != BackendPreference::Gl {
        return Ok(());
    }
    if (hints.major, hints.minor) < (3, 3) {
        return Err(RenderError::UnsupportedGlVersion {
            major: hints.major,
            minor: hints.minor,
        });
    }
    if !hints.core_profile || !hints.forward_compatible {
        log::warn!("compatibility-profile GL context requested; a core profile will be used");
    }
    log::info!("requesting OpenGL {}.{} core context", hints.major, hints.minor);
    Ok(())
}
