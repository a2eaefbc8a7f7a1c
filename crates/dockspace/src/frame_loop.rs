//! The frame loop: poll, build, render, present, until the window closes or quit is chosen.

use dockspace_core::{DockspaceError, LoopState, Options, Result, StopReason};
use dockspace_ui::{DockUi, DockspaceHost, FrameAction, FrameContent};

/// Window, input and rendering services driven by [`FrameLoop`].
pub trait FrameBackend {
    /// The toolkit handle windows are built with during a frame.
    type Ui: DockUi + ?Sized;

    /// Processes pending window events without blocking.
    fn poll_events(&mut self) -> Result<()>;

    /// Whether the window was asked to close.
    fn should_close(&self) -> bool;

    /// Feeds the polled input into the toolkit.
    fn process_inputs(&mut self) -> Result<()>;

    /// Opens a toolkit frame, runs `build` inside it and closes the frame.
    fn new_frame(
        &mut self,
        build: &mut dyn FnMut(&Self::Ui) -> Result<FrameAction>,
    ) -> Result<FrameAction>;

    /// Finalizes the frame's draw data, clears to `clear_color` and submits.
    fn render(&mut self, clear_color: [f32; 4]) -> Result<()>;

    fn swap_buffers(&mut self) -> Result<()>;

    /// Releases the renderer's resources. Returns `false` if already released.
    fn shutdown_renderer(&mut self) -> bool;

    /// Destroys the window and graphics context. Returns `false` if already terminated.
    fn terminate_surface(&mut self) -> bool;
}

/// How a finished loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopOutcome {
    pub reason: StopReason,
    /// Frames fully built, rendered and presented.
    pub frames: u64,
}

/// Drives one [`FrameBackend`] through `Running → Terminating → Terminated`.
///
/// Every iteration renders the [`DockspaceHost`] first, then the content.
/// Teardown releases the renderer, then the surface, exactly once, on every
/// exit path including errors.
pub struct FrameLoop<B: FrameBackend, C> {
    backend: B,
    content: C,
    host: DockspaceHost,
    clear_color: [f32; 4],
    state: LoopState,
    frames: u64,
    reason: Option<StopReason>,
}

impl<B, C> FrameLoop<B, C>
where
    B: FrameBackend,
    C: FrameContent<B::Ui>,
{
    pub fn new(backend: B, content: C, options: &Options) -> Self {
        Self {
            backend,
            content,
            host: DockspaceHost::new(options.dockspace_name.clone()),
            clear_color: options.clear_color,
            state: LoopState::Running,
            frames: 0,
            reason: None,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Frames completed so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Why the loop stopped, once it has.
    pub fn stop_reason(&self) -> Option<StopReason> {
        self.reason
    }

    pub fn host(&self) -> &DockspaceHost {
        &self.host
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn content(&self) -> &C {
        &self.content
    }

    /// Asks the loop to stop; teardown runs on the next [`step`](Self::step).
    pub fn request_quit(&mut self) {
        self.stop(StopReason::QuitRequested);
    }

    /// Runs until the loop is terminated.
    pub fn run(&mut self) -> Result<LoopOutcome> {
        log::info!("entering frame loop");
        while self.step()?.is_running() {}

        let outcome = LoopOutcome {
            reason: self.reason.unwrap_or(StopReason::WindowClosed),
            frames: self.frames,
        };
        log::info!(
            "frame loop finished after {} frames ({:?})",
            outcome.frames,
            outcome.reason
        );
        Ok(outcome)
    }

    /// Runs one iteration, tearing down if it ended the loop.
    ///
    /// An error stops the loop, tears down and is returned. Stepping a
    /// terminated loop does nothing.
    pub fn step(&mut self) -> Result<LoopState> {
        if self.state.is_running() {
            match self.frame() {
                Ok(Some(reason)) => self.stop(reason),
                Ok(None) => {}
                Err(err) => {
                    log::error!("frame {} failed: {err}", self.frames);
                    self.stop(StopReason::Failed);
                    self.teardown();
                    return Err(err);
                }
            }
        }

        if self.state == LoopState::Terminating {
            self.teardown();
        }
        Ok(self.state)
    }

    fn frame(&mut self) -> Result<Option<StopReason>> {
        self.backend.poll_events()?;
        if self.backend.should_close() {
            return Ok(Some(StopReason::WindowClosed));
        }
        self.backend.process_inputs()?;

        let frame = self.frames;
        let host = &mut self.host;
        let content = &mut self.content;
        let action = self.backend.new_frame(&mut |ui: &B::Ui| {
            let dockspace = host.render(ui, frame)?;
            Ok(content.build(ui, dockspace))
        })?;

        if self.host.last_frame() != Some(frame) {
            return Err(DockspaceError::HostLifecycle {
                name: self.host.name().to_owned(),
                detail: format!("not rendered in frame {frame}"),
            });
        }

        self.backend.render(self.clear_color)?;
        self.backend.swap_buffers()?;
        self.frames += 1;
        log::trace!("frame {frame} presented");

        Ok((action == FrameAction::Quit).then_some(StopReason::QuitRequested))
    }

    fn stop(&mut self, reason: StopReason) {
        if !self.state.is_running() {
            return;
        }
        log::info!("stopping frame loop: {reason:?}");
        self.reason = Some(reason);
        self.state = self.state.stop();
    }

    fn teardown(&mut self) {
        if self.state.is_terminated() {
            return;
        }
        self.state = self.state.stop();
        if self.backend.shutdown_renderer() {
            log::debug!("renderer released");
        }
        if self.backend.terminate_surface() {
            log::debug!("surface terminated");
        }
        self.state = self.state.finish();
    }
}
