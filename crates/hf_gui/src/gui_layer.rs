//! egui bound to the window and the wgpu device.
//!
//! Integration pattern: egui requires a split render because
//! `egui_wgpu::Renderer::render()` needs a `RenderPass<'static>`, while
//! `begin_render_pass` borrows the encoder. Per frame:
//!
//!   1. `begin_frame()` -- take the accumulated input, open an egui pass
//!   2. (render hooks build their UI on the shared `egui::Context`)
//!   3. `end_frame()`   -- close the pass, produce tessellated primitives
//!   4. `upload()`      -- upload textures and update GPU buffers
//!   5. `paint()`       -- render into a pass made with `forget_lifetime()`
//!   6. `cleanup()`     -- free textures egui no longer references
//!
//! A frame that cannot be presented goes to `defer()` instead of 4-6; its
//! texture changes ride along with the next frame that is drawn.
//!
//! Raw window events go through `handle_window_event` before anything else
//! sees them; `capture()` then reports whether egui wants the pointer or the
//! keyboard for itself.

use hf_core::Capture;
use hf_platform::PlatformConfig;
use std::path::Path;
use winit::window::Window;

use crate::fonts;

pub struct GuiFrame {
    pub primitives: Vec<egui::ClippedPrimitive>,
    pub textures_delta: egui::TexturesDelta,
}

pub struct GuiLayer {
    pub egui_ctx: egui::Context,
    pub egui_winit_state: egui_winit::State,
    pub egui_renderer: egui_wgpu::Renderer,
    pass_open: bool,
    deferred_textures: egui::TexturesDelta,
}

/// egui's capture flags as dispatcher categories: pointer for mouse buttons
/// and scroll, keyboard for keys and characters.
pub fn capture_of(ctx: &egui::Context) -> Capture {
    Capture {
        pointer: ctx.wants_pointer_input(),
        keyboard: ctx.wants_keyboard_input(),
    }
}

impl GuiLayer {
    /// `egui_ctx` is created by the application up front so hooks can hold a
    /// clone before the window exists.
    pub fn new(
        egui_ctx: egui::Context,
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        window: &Window,
        platform: &PlatformConfig,
    ) -> Self {
        let egui_winit_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui_ctx.viewport_id(),
            window,
            Some(window.scale_factor() as f32),
            None,
            Some(device.limits().max_texture_dimension_2d as usize),
        );
        let egui_renderer = egui_wgpu::Renderer::new(device, surface_format, None, 1, false);

        fonts::apply_theme(&egui_ctx, platform.theme);
        if let Err(err) = fonts::install_font(
            &egui_ctx,
            Path::new(&platform.font_path),
            platform.font_size,
        ) {
            log::warn!("{err}; keeping default fonts");
            fonts::apply_text_size(&egui_ctx, platform.font_size);
        }

        Self {
            egui_ctx,
            egui_winit_state,
            egui_renderer,
            pass_open: false,
            deferred_textures: egui::TexturesDelta::default(),
        }
    }

    /// Feeds a raw window event to egui. Returns egui's own `consumed` flag,
    /// which is informational; dispatch decisions use `capture()`.
    pub fn handle_window_event(
        &mut self,
        window: &Window,
        event: &winit::event::WindowEvent,
    ) -> bool {
        let response = self.egui_winit_state.on_window_event(window, event);
        response.consumed
    }

    pub fn capture(&self) -> Capture {
        capture_of(&self.egui_ctx)
    }

    pub fn begin_frame(&mut self, window: &Window) {
        if self.pass_open {
            log::warn!("GUI frame already open");
            return;
        }
        let raw_input = self.egui_winit_state.take_egui_input(window);
        self.egui_ctx.begin_pass(raw_input);
        self.pass_open = true;
    }

    pub fn end_frame(&mut self, window: &Window) -> GuiFrame {
        if !self.pass_open {
            log::warn!("GUI frame ended without begin_frame");
            self.begin_frame(window);
        }
        let full_output = self.egui_ctx.end_pass();
        self.pass_open = false;

        self.egui_winit_state
            .handle_platform_output(window, full_output.platform_output);

        let primitives = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        let mut textures_delta = std::mem::take(&mut self.deferred_textures);
        textures_delta.append(full_output.textures_delta);

        GuiFrame {
            primitives,
            textures_delta,
        }
    }

    /// Drops the primitives of a frame that was not presented and keeps its
    /// texture changes for the next `end_frame()`.
    pub fn defer(&mut self, frame: GuiFrame) {
        if !frame.textures_delta.is_empty() {
            log::debug!("Deferring GUI texture changes of an undrawn frame");
        }
        self.deferred_textures.append(frame.textures_delta);
    }

    /// Sends `frame`'s texture changes and vertex data to the GPU, recording
    /// buffer copies into `encoder`. Must precede the pass `paint()` draws into.
    pub fn upload(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        frame: &GuiFrame,
        screen_descriptor: &egui_wgpu::ScreenDescriptor,
    ) {
        for (id, image_delta) in &frame.textures_delta.set {
            self.egui_renderer
                .update_texture(device, queue, *id, image_delta);
        }

        self.egui_renderer.update_buffers(
            device,
            queue,
            encoder,
            &frame.primitives,
            screen_descriptor,
        );
    }

    /// Draws `frame`'s primitives on top of whatever `render_pass` loaded.
    pub fn paint(
        &self,
        render_pass: &mut wgpu::RenderPass<'static>,
        frame: &GuiFrame,
        screen_descriptor: &egui_wgpu::ScreenDescriptor,
    ) {
        self.egui_renderer
            .render(render_pass, &frame.primitives, screen_descriptor);
    }

    /// Releases the textures `frame` marked as freed, once its pass is recorded.
    pub fn cleanup(&mut self, frame: &GuiFrame) {
        for id in &frame.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }
    }
}
