use std::sync::Arc;

use hf_gui::{GuiFrame, GuiLayer};
use hf_platform::PlatformConfig;
use hf_render::GpuContext;
use winit::event_loop::ActiveEventLoop;
use winit::window::Window;

use crate::AppError;

/// Window-bound resources, built once the event loop is resumed.
///
/// Field order is teardown order: the GUI renderer goes first, then the GPU
/// surface and device, then the window they were created for.
pub(crate) struct Runtime {
    pub gui: GuiLayer,
    pub gpu: GpuContext,
    pub window: Arc<Window>,
}

impl Runtime {
    pub fn new(
        event_loop: &ActiveEventLoop,
        config: &PlatformConfig,
        egui_ctx: egui::Context,
    ) -> Result<Self, AppError> {
        let window = hf_platform::create_window(event_loop, config)?;
        log::info!("Window created: {}x{}", config.width, config.height);

        let gpu = GpuContext::new(window.clone(), config)?;
        let gui = GuiLayer::new(egui_ctx, &gpu.device, gpu.surface_format, &window, config);

        Ok(Self { gui, gpu, window })
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.gpu.resize(width, height);
        if width > 0 && height > 0 {
            log::info!("Resized to {}x{}", width, height);
        }
    }

    /// Clears the target, draws the GUI on top and presents.
    pub fn draw_and_present(
        &mut self,
        output: wgpu::SurfaceTexture,
        view: &wgpu::TextureView,
        gui_frame: &GuiFrame,
    ) {
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.gpu.size.0, self.gpu.size.1],
            pixels_per_point: self.window.scale_factor() as f32,
        };

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        self.gpu.clear(&mut encoder, view);

        self.gui.upload(
            &self.gpu.device,
            &self.gpu.queue,
            &mut encoder,
            gui_frame,
            &screen_descriptor,
        );

        {
            let mut egui_pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui Render Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();

            self.gui.paint(&mut egui_pass, gui_frame, &screen_descriptor);
        }

        self.gui.cleanup(gui_frame);

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        self.window.pre_present_notify();
        output.present();
    }
}
