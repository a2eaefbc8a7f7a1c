//! UI layer errors.

use thiserror::Error;

/// Errors raised while setting up or driving the toolkit.
#[derive(Error, Debug)]
pub enum UiError {
    /// Fonts were installed into a context that already has them.
    #[error("font atlas already installed; fonts may only be set up once")]
    AtlasAlreadyInstalled,

    /// The renderer was attached before any font was installed.
    #[error("no font atlas installed before the renderer was created")]
    AtlasMissing,

    /// The toolkit could not load a face handed to its atlas.
    #[error("font face '{label}' was rejected by the toolkit atlas")]
    FontRejected { label: String },

    /// The toolkit's wgpu renderer failed.
    #[error("imgui renderer error: {0}")]
    Renderer(String),

    /// The surface failed underneath the UI.
    #[error(transparent)]
    Surface(#[from] dockspace_render::RenderError),
}

impl From<UiError> for dockspace_core::DockspaceError {
    fn from(err: UiError) -> Self {
        match err {
            UiError::Surface(err) => err.into(),
            UiError::AtlasAlreadyInstalled | UiError::AtlasMissing | UiError::FontRejected { .. } => {
                Self::Startup(err.to_string())
            }
            UiError::Renderer(_) => Self::Runtime(err.to_string()),
        }
    }
}

/// A specialized Result type for UI operations.
pub type UiResult<T> = std::result::Result<T, UiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use dockspace_core::DockspaceError;
    use dockspace_render::RenderError;

    #[test]
    fn test_atlas_errors_are_startup_errors() {
        let err: DockspaceError = UiError::AtlasAlreadyInstalled.into();
        assert!(matches!(err, DockspaceError::Startup(_)));
        let err: DockspaceError = UiError::FontRejected {
            label: "icons".into(),
        }
        .into();
        assert!(matches!(err, DockspaceError::Startup(ref msg) if msg.contains("icons")));
    }

    #[test]
    fn test_surface_errors_keep_their_category() {
        let err: DockspaceError = UiError::from(RenderError::AdapterCreationFailed).into();
        assert!(matches!(err, DockspaceError::Startup(_)));
        let err: DockspaceError = UiError::from(RenderError::SurfaceLost).into();
        assert!(matches!(err, DockspaceError::Runtime(_)));
    }
}
