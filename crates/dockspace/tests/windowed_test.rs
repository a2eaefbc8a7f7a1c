//! Startup tests for the windowed backend.
//!
//! Tests that open a window need a display and a GPU adapter and are
//! `#[ignore]`d. Run them with: cargo test -- --ignored

use std::path::PathBuf;

use dockspace::*;
use dockspace_core::AssetError;

#[test]
fn test_missing_icon_font_fails_before_the_window_opens() {
    let mut options = Options::default();
    options.fonts.icon_font = PathBuf::from("does/not/exist.ttf");

    let result = ImguiBackend::init(&options);
    assert!(matches!(
        result,
        Err(DockspaceError::Asset(AssetError::FontUnreadable { .. }))
    ));
}

/// Opens the real window, draws a few frames and quits through the state machine.
/// Needs `assets/fontawesome-webfont.ttf` relative to the working directory.
#[test]
#[ignore]
fn test_windowed_frames() {
    let options = Options::default();
    let backend = ImguiBackend::init(&options).expect("backend init failed");
    let mut frame_loop = FrameLoop::new(backend, DemoWindows::new(&options), &options);

    for _ in 0..3 {
        assert_eq!(frame_loop.step().unwrap(), LoopState::Running);
    }
    assert_eq!(frame_loop.host().last_frame(), Some(2));

    frame_loop.request_quit();
    assert_eq!(frame_loop.step().unwrap(), LoopState::Terminated);
    assert!(!frame_loop.backend_mut().terminate_surface());
}
