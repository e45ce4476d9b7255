//! Hookframe demo -- registers a handful of hooks and callbacks the way an
//! embedding application would, then hands control to the frame loop.
//!
//! - Escape quits (key callback -> `QuitHandle`).
//! - Clicks and scrolls outside the GUI window are counted by callbacks; while
//!   the pointer is over the window egui captures them and the counters stay put.
//! - Typing into the text field captures the keyboard, so the char callback
//!   only sees characters typed while the field is unfocused.

use std::cell::{Cell, RefCell};
use std::path::PathBuf;
use std::rc::Rc;

use hf_app::input::{ButtonAction, Key, KeyAction};
use hf_app::HookApp;

const CONFIG_ENV_VAR: &str = "HOOKFRAME_CONFIG";
const TYPED_TAIL_LEN: usize = 32;
const STATS_LOG_INTERVAL: u64 = 600;

#[derive(Default)]
struct DemoState {
    clicks: Cell<u32>,
    scroll_y: Cell<f64>,
    typed: RefCell<String>,
    note: RefCell<String>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Hookframe starting...");

    let config_path = std::env::var_os(CONFIG_ENV_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(hf_platform::DEFAULT_CONFIG_PATH));
    let config = hf_platform::resolve_config(&config_path);

    let mut app = HookApp::new(config);
    let state = Rc::new(DemoState::default());

    let quit = app.quit_handle();
    app.add_key_callback(move |event| {
        if event.key == Key::Escape && event.action == KeyAction::Press {
            quit.request();
            return true;
        }
        false
    });

    let s = state.clone();
    app.add_mouse_button_callback(move |event| {
        if event.action == ButtonAction::Press {
            s.clicks.set(s.clicks.get() + 1);
        }
        true
    });

    let s = state.clone();
    app.add_scroll_callback(move |event| {
        s.scroll_y.set(s.scroll_y.get() + event.y);
        true
    });

    let s = state.clone();
    app.add_char_callback(move |event| {
        let mut typed = s.typed.borrow_mut();
        typed.push(event.ch);
        if typed.chars().count() > TYPED_TAIL_LEN {
            let cut = typed.chars().next().map_or(0, char::len_utf8);
            typed.replace_range(..cut, "");
        }
        true
    });

    let ctx = app.egui_ctx();
    let stats = app.frame_stats();
    let s = state.clone();
    app.add_render_hook(move || {
        let frame = stats.get();
        egui::Window::new("Hookframe")
            .default_pos([10.0, 10.0])
            .show(&ctx, |ui| {
                ui.label(format!("FPS: {:.1}", frame.smoothed_fps));
                ui.label(format!("Frame time: {:.2} ms", frame.smoothed_frame_time_ms));
                ui.label(format!("Frame: {}", frame.frame_count));
                ui.separator();
                ui.label(format!("Clicks outside GUI: {}", s.clicks.get()));
                ui.label(format!("Scroll outside GUI: {:.1}", s.scroll_y.get()));
                ui.label(format!("Typed outside GUI: {}", s.typed.borrow()));
                ui.separator();
                ui.label("Focus this field to capture the keyboard:");
                ui.text_edit_singleline(&mut *s.note.borrow_mut());
                ui.label("Press Escape (with the field unfocused) to quit.");
            });
    });

    let stats = app.frame_stats();
    app.add_post_render_hook(move || {
        let frame = stats.get();
        if frame.frame_count % STATS_LOG_INTERVAL == 0 {
            log::debug!(
                "Frame {}: {:.1} fps ({:.2} ms)",
                frame.frame_count,
                frame.smoothed_fps,
                frame.smoothed_frame_time_ms
            );
        }
    });

    if let Err(err) = app.run() {
        log::error!("{err}");
        std::process::exit(1);
    }
}
