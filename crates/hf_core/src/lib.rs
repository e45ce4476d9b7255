pub mod dispatch;
pub mod frame;
pub mod hooks;
pub mod input;
pub mod time;

pub use dispatch::{Capture, DispatchOutcome, InputDispatcher};
pub use frame::{FramePhase, FrameSequencer, QuitHandle};
pub use hooks::{CallbackList, HookList};
pub use time::{FrameClock, FrameStats, FrameStatsHandle};
