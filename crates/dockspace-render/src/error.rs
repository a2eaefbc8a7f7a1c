//! Rendering error types.

use thiserror::Error;

/// Errors that can occur while creating or driving the window surface.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The native event loop could not be created.
    #[error("failed to create event loop: {0}")]
    EventLoopCreationFailed(String),

    /// The native window could not be created.
    #[error("failed to create window: {0}")]
    WindowCreationFailed(String),

    /// The requested OpenGL context version cannot be provided.
    #[error("OpenGL {major}.{minor} requested, 3.3 core or newer is required")]
    UnsupportedGlVersion { major: u8, minor: u8 },

    /// Failed to create wgpu adapter.
    #[error("failed to create graphics adapter")]
    AdapterCreationFailed,

    /// Failed to create wgpu device.
    #[error("failed to create graphics device: {0}")]
    DeviceCreationFailed(#[from] wgpu::RequestDeviceError),

    /// Failed to create surface.
    #[error("failed to create surface: {0}")]
    SurfaceCreationFailed(#[from] wgpu::CreateSurfaceError),

    /// The surface offers no usable texture format.
    #[error("surface configuration failed")]
    SurfaceConfigurationFailed,

    /// Surface lost.
    #[error("surface lost")]
    SurfaceLost,

    /// Surface outdated.
    #[error("surface outdated")]
    SurfaceOutdated,

    /// Out of memory.
    #[error("out of memory")]
    OutOfMemory,

    /// The UI renderer failed while recording draw commands.
    #[error("draw submission failed: {0}")]
    DrawFailed(String),

    /// The surface was used after `terminate`.
    #[error("surface already terminated")]
    Terminated,
}

impl RenderError {
    /// Whether this error happened before the surface was usable.
    pub fn is_startup(&self) -> bool {
        matches!(
            self,
            Self::EventLoopCreationFailed(_)
                | Self::WindowCreationFailed(_)
                | Self::UnsupportedGlVersion { .. }
                | Self::AdapterCreationFailed
                | Self::DeviceCreationFailed(_)
                | Self::SurfaceCreationFailed(_)
                | Self::SurfaceConfigurationFailed
        )
    }
}

impl From<RenderError> for dockspace_core::DockspaceError {
    fn from(err: RenderError) -> Self {
        if err.is_startup() {
            Self::Startup(err.to_string())
        } else {
            Self::Runtime(err.to_string())
        }
    }
}

/// A specialized Result type for rendering operations.
pub type RenderResult<T> = std::result::Result<T, RenderError>;
