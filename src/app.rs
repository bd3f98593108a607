//! Application shell tying the window, GPU, UI and the current example
//! together

use std::sync::Arc;

use winit::event::WindowEvent;
use winit::window::Window;

use crate::egui_integration::EguiIntegration;
use crate::gallery::{build_example, sidebar_ui, Example, Shell};
use crate::render::{GpuContext, RenderCtx, RenderResult, SceneRenderer, ViewportPool};

pub struct GalleryApp {
    window: Arc<Window>,
    gpu: GpuContext,
    egui: EguiIntegration,
    scene_renderer: SceneRenderer,
    pool: ViewportPool,
    shell: Shell,
    example: Box<dyn Example>,
}

impl GalleryApp {
    pub fn new(window: Arc<Window>) -> RenderResult<Self> {
        let gpu = pollster::block_on(GpuContext::new(window.clone()))?;
        let egui = EguiIntegration::new(&gpu, &window);
        let scene_renderer = SceneRenderer::new(&gpu.device, &gpu.queue, gpu.supports_wireframe);
        let shell = Shell::new();
        let example = build_example(shell.selected());

        Ok(Self {
            window,
            gpu,
            egui,
            scene_renderer,
            pool: ViewportPool::new(),
            shell,
            example,
        })
    }

    /// Forward a window event to egui; returns whether egui consumed it
    pub fn on_window_event(&mut self, event: &WindowEvent) -> bool {
        self.egui.on_window_event(&self.window, event)
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.gpu.resize(width, height);
    }

    /// Build the UI, render every queued viewport, then draw the UI over
    /// the swapchain and present.
    pub fn frame(&mut self) -> RenderResult<()> {
        self.egui.begin_frame(&self.window);
        let ctx = self.egui.context().clone();

        let narrow = Shell::is_narrow(ctx.screen_rect().width());
        let mut clicked = None;
        if narrow {
            egui::TopBottomPanel::top("top_bar").show(&ctx, |ui| {
                ui.horizontal(|ui| {
                    if ui.button("☰").clicked() {
                        self.shell.toggle_menu();
                    }
                    ui.label(self.shell.selected().label());
                });
            });
            if self.shell.menu_open() {
                clicked = egui::Window::new("examples_menu")
                    .title_bar(false)
                    .resizable(false)
                    .anchor(egui::Align2::LEFT_TOP, [8.0, 40.0])
                    .show(&ctx, |ui| sidebar_ui(ui, &self.shell))
                    .and_then(|response| response.inner)
                    .flatten();
            }
        } else {
            // A leftover overlay flag must not reopen the menu after the
            // window widens past the breakpoint
            self.shell.close_menu();
            egui::SidePanel::left("sidebar")
                .default_width(180.0)
                .show(&ctx, |ui| {
                    clicked = sidebar_ui(ui, &self.shell);
                });
        }

        // Remount before the content pass so the new example draws this frame
        if let Some(key) = clicked {
            if self.shell.select(key) {
                log::info!("switching to example: {}", key.label());
                self.pool.clear(self.egui.renderer_mut());
                self.example = build_example(key);
            }
        }

        {
            let mut render_ctx = RenderCtx {
                device: &self.gpu.device,
                queue: &self.gpu.queue,
                egui_renderer: self.egui.renderer_mut(),
                scene_renderer: &mut self.scene_renderer,
            };
            let example = &mut self.example;
            let pool = &mut self.pool;
            egui::CentralPanel::default().show(&ctx, |ui| {
                example.ui(ui, &mut render_ctx, pool);
            });
            pool.render_pending(&mut render_ctx);
        }

        self.egui.end_frame(&self.window);

        let frame = self.gpu.acquire_frame()?;
        let view = frame.texture.create_view(&Default::default());
        self.egui.render(&self.gpu, &view);
        frame.present();
        Ok(())
    }
}
