use std::sync::Arc;
use std::time::Instant;

use glam::Vec3;
use winit::{
    event::*,
    event_loop::EventLoop,
    keyboard::PhysicalKey,
    window::{CursorGrabMode, Window},
};

use fps_camera::{
    logging, ui,
    controller::{input::native, FrameLoopContext, InputEvent, Projection},
    model::Camera,
};

const SCREEN_WIDTH: u32 = 800;
const SCREEN_HEIGHT: u32 = 600;
const TITLE: &str = "FPS Camera";

/// Hide the cursor and keep it inside the window. Locked is not available
/// everywhere, so fall back to confined. Returns whether either grab held.
fn grab_cursor(window: &Window) -> bool {
    let grabbed = window
        .set_cursor_grab(CursorGrabMode::Locked)
        .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined));
    match grabbed {
        Ok(()) => {
            window.set_cursor_visible(false);
            true
        }
        Err(err) => {
            tracing::warn!(%err, "could not grab cursor");
            false
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    let event_loop = EventLoop::new()?;
    let window_attributes = Window::default_attributes()
        .with_title(TITLE)
        .with_inner_size(winit::dpi::LogicalSize::new(SCREEN_WIDTH, SCREEN_HEIGHT));
    let window = Arc::new(event_loop.create_window(window_attributes)?);

    let size = window.inner_size();
    let camera = Camera::new(Vec3::new(0.0, 1.0, 5.0), -90.0, 0.0);
    let mut frame = FrameLoopContext::new(camera, Projection::new(size.width, size.height), Instant::now());
    frame.input_state.process_event(&InputEvent::CursorGrabChanged { grabbed: grab_cursor(&window) });

    let egui_ctx = egui::Context::default();
    let mut egui_state = egui_winit::State::new(
        egui_ctx.clone(),
        egui::ViewportId::ROOT,
        &*window,
        Some(window.scale_factor() as f32),
        None,
        None,
    );

    tracing::info!(
        width = size.width,
        height = size.height,
        "camera ready, WASD to move, F3 for debug info, Esc to quit"
    );

    event_loop.run(move |event, elwt| {
        match event {
            Event::WindowEvent { ref event, window_id } if window_id == window.id() => {
                // egui only gets the pointer while the cursor is free and visible
                let ui_consumed = egui_state.on_window_event(&window, event).consumed
                    && frame.input_state.ui_captures_pointer();

                match event {
                    WindowEvent::CloseRequested => elwt.exit(),
                    WindowEvent::Resized(physical_size) => {
                        frame.resize(physical_size.width, physical_size.height);
                    }
                    WindowEvent::Focused(false) => {
                        frame.input_state.process_event(&InputEvent::FocusLost);
                        frame.input_state.process_event(&InputEvent::CursorGrabChanged { grabbed: false });
                    }
                    WindowEvent::Focused(true) => {
                        let grabbed = grab_cursor(&window);
                        frame.input_state.process_event(&InputEvent::CursorGrabChanged { grabbed });
                    }
                    WindowEvent::KeyboardInput {
                        event: KeyEvent {
                            state,
                            physical_key: PhysicalKey::Code(code),
                            ..
                        },
                        ..
                    } => {
                        if let Some(input) = native::keyboard_to_input(*code, *state) {
                            frame.input_state.process_event(&input);
                        }
                    }
                    WindowEvent::MouseWheel { delta, .. } if !ui_consumed => {
                        frame.input_state.process_event(&native::mouse_wheel_to_input(delta));
                    }
                    WindowEvent::RedrawRequested => {
                        frame.input_state.process_event(&InputEvent::UiPointerCapture {
                            captured: egui_ctx.wants_pointer_input(),
                        });

                        let report = frame.update(Instant::now());
                        if report.quit_requested {
                            tracing::info!("quit requested");
                            elwt.exit();
                            return;
                        }

                        let stats = frame.stats();
                        let raw_input = egui_state.take_egui_input(&window);
                        let output = ui::build_ui(&egui_ctx, raw_input, &frame.debug_overlay, &stats);
                        egui_state.handle_platform_output(&window, output.platform_output);

                        // Telemetry goes to the title bar while the overlay is open
                        if frame.debug_overlay.is_visible() {
                            window.set_title(&format!("{TITLE} | {}", stats.summary()));
                        } else {
                            window.set_title(TITLE);
                        }
                    }
                    _ => {}
                }
            }
            Event::DeviceEvent { event: DeviceEvent::MouseMotion { delta }, .. } => {
                frame.input_state.process_event(&native::mouse_motion_to_input(delta));
            }
            Event::AboutToWait => {
                window.request_redraw();
            }
            _ => {}
        }
    })?;

    Ok(())
}
