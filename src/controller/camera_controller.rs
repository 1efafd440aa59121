use crate::controller::input::{InputProcessor, InputState};
use crate::model::Camera;

/// Non-camera outcomes of a frame's input
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FrameActions {
    pub toggle_debug: bool,
    pub quit: bool,
}

/// Feeds accumulated input into the camera, once per frame
#[derive(Debug, Clone, Default)]
pub struct CameraController {
    pub processor: InputProcessor,
}

impl CameraController {
    pub fn new(processor: InputProcessor) -> Self {
        Self { processor }
    }

    /// Apply movement, then look, then zoom. Must run before the frame's
    /// view matrix is read.
    pub fn update(&mut self, camera: &mut Camera, input: &mut InputState, dt: f32) -> FrameActions {
        for direction in self.processor.movement_directions(input) {
            camera.process_movement(direction, dt);
        }

        let (dx, dy) = input.consume_look();
        if dx != 0.0 || dy != 0.0 {
            camera.process_look(dx, dy);
        }

        let scroll = input.consume_scroll();
        if scroll != 0.0 {
            camera.process_zoom(scroll);
            tracing::debug!(fov = camera.fov(), "zoom");
        }

        tracing::trace!(
            x = camera.position.x,
            y = camera.position.y,
            z = camera.position.z,
            yaw = camera.yaw(),
            pitch = camera.pitch(),
            "camera updated"
        );

        FrameActions {
            toggle_debug: self.processor.poll_debug_toggle(input),
            quit: self.processor.is_quit_requested(input),
        }
    }
}
