//! Per-frame hook sequencing.
//!
//! A frame walks `Idle -> Events -> Rendered -> Idle`:
//!
//!   1. `open_frame()`   -- pre-event hooks, before platform events are polled
//!   2. `render()`       -- render hooks, between GUI frame begin and end
//!   3. `finish_frame()` -- post-render hooks, after the frame is presented
//!
//! Every opened frame is rendered and finished, whether or not anything
//! reaches the screen. A minimized window or a lost surface only skips the
//! presentation; all three hook groups keep running.

use std::cell::Cell;
use std::rc::Rc;

use crate::hooks::HookList;
use crate::time::{FrameClock, FrameStatsHandle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramePhase {
    Idle,
    Events,
    Rendered,
}

/// Shared quit request. Any clone can ask the loop to stop; the loop checks
/// it once per iteration.
#[derive(Debug, Clone, Default)]
pub struct QuitHandle(Rc<Cell<bool>>);

impl QuitHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&self) {
        self.0.set(true);
    }

    pub fn is_requested(&self) -> bool {
        self.0.get()
    }
}

pub struct FrameSequencer {
    pub pre_event: HookList,
    pub render: HookList,
    pub post_render: HookList,
    phase: FramePhase,
    clock: FrameClock,
}

impl FrameSequencer {
    pub fn new() -> Self {
        Self {
            pre_event: HookList::new(),
            render: HookList::new(),
            post_render: HookList::new(),
            phase: FramePhase::Idle,
            clock: FrameClock::new(),
        }
    }

    pub fn phase(&self) -> FramePhase {
        self.phase
    }

    pub fn stats_handle(&self) -> FrameStatsHandle {
        self.clock.handle()
    }

    /// A frame has been opened and still waits for its render hooks.
    pub fn awaiting_render(&self) -> bool {
        self.phase == FramePhase::Events
    }

    /// Starts a frame if none is open. Returns true when pre-event hooks ran.
    pub fn open_frame(&mut self) -> bool {
        if self.phase != FramePhase::Idle {
            return false;
        }
        self.clock.begin_frame();
        self.pre_event.run_all();
        self.phase = FramePhase::Events;
        true
    }

    /// Runs the render hooks of the open frame, opening one first if needed.
    pub fn render(&mut self) {
        debug_assert_ne!(self.phase, FramePhase::Rendered, "frame rendered twice");
        if self.phase == FramePhase::Idle {
            self.open_frame();
        }
        self.render.run_all();
        self.phase = FramePhase::Rendered;
    }

    /// Closes a rendered frame with the post-render hooks.
    pub fn finish_frame(&mut self) {
        if self.phase != FramePhase::Rendered {
            return;
        }
        self.post_render.run_all();
        self.phase = FramePhase::Idle;
    }
}

impl Default for FrameSequencer {
    fn default() -> Self {
        Self::new()
    }
}
