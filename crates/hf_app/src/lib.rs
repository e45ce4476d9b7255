//! Hookframe -- a winit + egui + wgpu application scaffold.
//!
//! The embedding application registers frame hooks and input callbacks on a
//! [`HookApp`] and hands control to [`HookApp::run`]. The loop itself never
//! changes; everything application-specific lives in the registered closures.

mod app;
mod runtime;
pub mod translate;

pub use app::{AppError, HookApp};
pub use hf_core::input;
pub use hf_core::{FrameStats, FrameStatsHandle, QuitHandle};
pub use hf_platform::PlatformConfig;
