use std::sync::Arc;

use winit::dpi::LogicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

use graphics_gallery::app::GalleryApp;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let window = Arc::new(
        WindowBuilder::new()
            .with_title("3D Graphics Gallery")
            .with_inner_size(LogicalSize::new(1280.0, 800.0))
            .build(&event_loop)?,
    );

    let mut app = GalleryApp::new(window.clone())?;

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => {
            // Pointer and keyboard input reaches the examples through egui
            app.on_window_event(&event);
            match event {
                WindowEvent::CloseRequested => elwt.exit(),
                WindowEvent::Resized(size) => app.resize(size.width, size.height),
                WindowEvent::RedrawRequested => {
                    if let Err(err) = app.frame() {
                        log::error!("frame failed: {err}");
                    }
                }
                _ => {}
            }
        }
        Event::AboutToWait => window.request_redraw(),
        _ => {}
    })?;

    Ok(())
}
