//! winit + wgpu egui integration

use egui::ViewportId;
use egui_wgpu::ScreenDescriptor;
use winit::event::WindowEvent;
use winit::window::Window;

use crate::render::GpuContext;

/// Owns the egui context, its winit input state and its wgpu renderer
pub struct EguiIntegration {
    ctx: egui::Context,
    winit_state: egui_winit::State,
    renderer: egui_wgpu::Renderer,
    /// Cached paint jobs from last frame
    paint_jobs: Vec<egui::ClippedPrimitive>,
    /// Cached textures delta
    textures_delta: egui::TexturesDelta,
}

impl EguiIntegration {
    pub fn new(gpu: &GpuContext, window: &Window) -> Self {
        let ctx = egui::Context::default();

        let winit_state = egui_winit::State::new(
            ctx.clone(),
            ViewportId::ROOT,
            window,
            Some(window.scale_factor() as f32),
            None,
        );

        let renderer = egui_wgpu::Renderer::new(&gpu.device, gpu.surface_format(), None, 1);

        Self {
            ctx,
            winit_state,
            renderer,
            paint_jobs: Vec::new(),
            textures_delta: egui::TexturesDelta::default(),
        }
    }

    /// Handle a winit window event; returns whether egui consumed it
    pub fn on_window_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        self.winit_state.on_window_event(window, event).consumed
    }

    /// Begin a new egui frame
    pub fn begin_frame(&mut self, window: &Window) {
        let raw_input = self.winit_state.take_egui_input(window);
        self.ctx.begin_frame(raw_input);
    }

    /// End the egui frame and tessellate the output
    pub fn end_frame(&mut self, window: &Window) {
        let full_output = self.ctx.end_frame();

        self.winit_state
            .handle_platform_output(window, full_output.platform_output);

        self.paint_jobs = self
            .ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        self.textures_delta = full_output.textures_delta;
    }

    /// Draw the tessellated UI over the given swapchain view
    pub fn render(&mut self, gpu: &GpuContext, view: &wgpu::TextureView) {
        let (width, height) = gpu.surface_size();
        let screen_descriptor = ScreenDescriptor {
            size_in_pixels: [width, height],
            pixels_per_point: self.ctx.pixels_per_point(),
        };

        for (id, image_delta) in &self.textures_delta.set {
            self.renderer
                .update_texture(&gpu.device, &gpu.queue, *id, image_delta);
        }

        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("egui encoder"),
            });
        self.renderer.update_buffers(
            &gpu.device,
            &gpu.queue,
            &mut encoder,
            &self.paint_jobs,
            &screen_descriptor,
        );

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("egui pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });
            self.renderer
                .render(&mut pass, &self.paint_jobs, &screen_descriptor);
        }
        gpu.queue.submit(Some(encoder.finish()));

        for id in &self.textures_delta.free {
            self.renderer.free_texture(id);
        }
        self.textures_delta = egui::TexturesDelta::default();
    }

    pub fn context(&self) -> &egui::Context {
        &self.ctx
    }

    pub fn renderer_mut(&mut self) -> &mut egui_wgpu::Renderer {
        &mut self.renderer
    }
}
