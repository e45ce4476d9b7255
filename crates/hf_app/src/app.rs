//! The host-facing application object and its winit event handler.
//!
//! One loop iteration maps onto winit's callbacks as follows:
//!
//!   1. `new_events`      -- open the frame, run pre-event hooks
//!   2. `window_event`    -- each input event goes to egui, then to the
//!                           registered callbacks unless egui captured it
//!   3. `RedrawRequested` -- begin the egui pass, run render hooks, end the
//!                           pass, clear + draw + present, run post-render hooks
//!   4. `about_to_wait`   -- close the frame without presenting if no redraw
//!                           arrived, honour a quit request, ask for the next redraw
//!
//! A minimized window or a lost surface skips only the presentation; every
//! hook group still runs once per iteration.
//!
//! Initialization failures stop the loop and surface from `run()`.

use hf_core::input::{
    CharEvent, InputEvent, KeyEvent, Modifiers, MouseButtonEvent, ScrollEvent,
};
use hf_core::{Capture, FrameSequencer, FrameStatsHandle, InputDispatcher, QuitHandle};
use hf_platform::PlatformConfig;
use hf_render::GpuInitError;
use winit::application::ApplicationHandler;
use winit::event::{Ime, StartCause, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::WindowId;

use crate::runtime::Runtime;
use crate::translate;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("Failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("GPU initialization failed: {0}")]
    Gpu(#[from] GpuInitError),
}

pub struct HookApp {
    config: PlatformConfig,
    egui_ctx: egui::Context,
    frames: FrameSequencer,
    input: InputDispatcher,
    quit: QuitHandle,
    modifiers: Modifiers,
    runtime: Option<Runtime>,
    init_error: Option<AppError>,
}

impl HookApp {
    pub fn new(config: PlatformConfig) -> Self {
        Self {
            config,
            egui_ctx: egui::Context::default(),
            frames: FrameSequencer::new(),
            input: InputDispatcher::new(),
            quit: QuitHandle::new(),
            modifiers: Modifiers::default(),
            runtime: None,
            init_error: None,
        }
    }

    pub fn config(&self) -> &PlatformConfig {
        &self.config
    }

    /// The GUI context render hooks draw into. Valid before `run()`.
    pub fn egui_ctx(&self) -> egui::Context {
        self.egui_ctx.clone()
    }

    pub fn quit_handle(&self) -> QuitHandle {
        self.quit.clone()
    }

    pub fn frame_stats(&self) -> FrameStatsHandle {
        self.frames.stats_handle()
    }

    /// Runs the frame loop until quit is requested or the window closes.
    pub fn run(mut self) -> Result<(), AppError> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);
        event_loop.run_app(&mut self)?;
        match self.init_error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    // --- Frame hooks --------------------------------------------------------------

    /// Runs after the frame is opened, before any input of the frame is handled.
    pub fn add_pre_event_hook(&mut self, hook: impl FnMut() + 'static) -> usize {
        self.frames.pre_event.add(hook)
    }

    pub fn remove_pre_event_hook(&mut self, index: usize) -> bool {
        self.frames.pre_event.remove(index)
    }

    /// Runs inside the GUI frame; build UI on `egui_ctx()` here.
    pub fn add_render_hook(&mut self, hook: impl FnMut() + 'static) -> usize {
        self.frames.render.add(hook)
    }

    pub fn remove_render_hook(&mut self, index: usize) -> bool {
        self.frames.render.remove(index)
    }

    /// Runs after the frame has been presented.
    pub fn add_post_render_hook(&mut self, hook: impl FnMut() + 'static) -> usize {
        self.frames.post_render.add(hook)
    }

    pub fn remove_post_render_hook(&mut self, index: usize) -> bool {
        self.frames.post_render.remove(index)
    }

    // --- Input callbacks ------------------------------------------------------------
    //
    // A callback returns true when it consumed the event; later callbacks of the
    // same kind then do not see it. None of them run while the GUI captures the
    // pointer (mouse button, scroll) or the keyboard (key, char).

    pub fn add_mouse_button_callback(
        &mut self,
        callback: impl FnMut(&MouseButtonEvent) -> bool + 'static,
    ) -> usize {
        self.input.mouse_button.add(callback)
    }

    pub fn remove_mouse_button_callback(&mut self, index: usize) -> bool {
        self.input.mouse_button.remove(index)
    }

    pub fn add_scroll_callback(
        &mut self,
        callback: impl FnMut(&ScrollEvent) -> bool + 'static,
    ) -> usize {
        self.input.scroll.add(callback)
    }

    pub fn remove_scroll_callback(&mut self, index: usize) -> bool {
        self.input.scroll.remove(index)
    }

    pub fn add_key_callback(&mut self, callback: impl FnMut(&KeyEvent) -> bool + 'static) -> usize {
        self.input.key.add(callback)
    }

    pub fn remove_key_callback(&mut self, index: usize) -> bool {
        self.input.key.remove(index)
    }

    pub fn add_char_callback(&mut self, callback: impl FnMut(&CharEvent) -> bool + 'static) -> usize {
        self.input.character.add(callback)
    }

    pub fn remove_char_callback(&mut self, index: usize) -> bool {
        self.input.character.remove(index)
    }

    // --- Loop internals ---------------------------------------------------------------

    fn dispatch(&mut self, event: InputEvent, capture: Capture) {
        self.input.dispatch(&event, capture);
    }

    /// Runs the render and post-render hooks of the open frame. With `present`
    /// unset, or when no surface texture is available, nothing is drawn.
    fn render_frame(&mut self, present: bool) {
        let Some(runtime) = self.runtime.as_mut() else {
            return;
        };
        let target = if present && !runtime.gpu.is_zero_sized() {
            runtime.gpu.begin_frame()
        } else {
            None
        };

        runtime.gui.begin_frame(&runtime.window);
        self.frames.render();
        let gui_frame = runtime.gui.end_frame(&runtime.window);

        match target {
            Some((output, view)) => runtime.draw_and_present(output, &view, &gui_frame),
            None => runtime.gui.defer(gui_frame),
        }
        self.frames.finish_frame();
    }
}

impl ApplicationHandler for HookApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.runtime.is_some() {
            return;
        }
        match Runtime::new(event_loop, &self.config, self.egui_ctx.clone()) {
            Ok(runtime) => self.runtime = Some(runtime),
            Err(err) => {
                log::error!("Initialization failed: {err}");
                self.init_error = Some(err);
                event_loop.exit();
            }
        }
    }

    fn new_events(&mut self, _event_loop: &ActiveEventLoop, _cause: StartCause) {
        if self.runtime.is_some() {
            self.frames.open_frame();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // egui always sees the raw event first.
        let capture = {
            let Some(runtime) = self.runtime.as_mut() else {
                return;
            };
            runtime.gui.handle_window_event(&runtime.window, &event);
            runtime.gui.capture()
        };

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting.");
                event_loop.exit();
            }

            WindowEvent::Resized(physical_size) => {
                if let Some(runtime) = self.runtime.as_mut() {
                    runtime.resize(physical_size.width, physical_size.height);
                }
            }

            WindowEvent::ModifiersChanged(modifiers) => {
                self.modifiers = translate::modifiers(modifiers.state());
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let event = MouseButtonEvent {
                    button: translate::mouse_button(button),
                    action: translate::button_action(state),
                    modifiers: self.modifiers,
                };
                self.dispatch(InputEvent::MouseButton(event), capture);
            }

            WindowEvent::MouseWheel { delta, .. } => {
                self.dispatch(InputEvent::Scroll(translate::scroll_event(delta)), capture);
            }

            WindowEvent::KeyboardInput {
                event,
                is_synthetic,
                ..
            } => {
                // Synthetic presses/releases come from focus changes, not the user.
                if is_synthetic {
                    return;
                }
                let key = translate::key_event(&event, self.modifiers);
                self.dispatch(InputEvent::Key(key), capture);
                for ch in translate::key_chars(&event) {
                    self.dispatch(InputEvent::Char(ch), capture);
                }
            }

            WindowEvent::Ime(Ime::Commit(text)) => {
                for ch in hf_core::input::text_to_char_events(&text) {
                    self.dispatch(InputEvent::Char(ch), capture);
                }
            }

            WindowEvent::RedrawRequested => self.render_frame(true),

            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        // Occluded or minimized windows may get no RedrawRequested at all.
        if self.frames.awaiting_render() {
            self.render_frame(false);
        }
        if self.quit.is_requested() {
            log::info!("Quit requested, exiting.");
            event_loop.exit();
            return;
        }
        if let Some(runtime) = &self.runtime {
            runtime.window.request_redraw();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if self.runtime.take().is_some() {
            log::info!("Window and GPU resources released.");
        }
    }
}
