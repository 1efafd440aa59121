use std::time::Instant;
use glam::Mat4;

use crate::controller::camera_controller::CameraController;
use crate::controller::input::InputState;
use crate::model::Camera;
use crate::ui::{DebugOverlay, DebugStats};

/// Largest time step handed to the camera after a stall (window drag, breakpoint)
pub const MAX_FRAME_STEP: f32 = 0.1;

/// Measures the time between frames
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    last: Instant,
    max_step: f32,
}

impl FrameClock {
    pub fn new(start: Instant) -> Self {
        Self { last: start, max_step: MAX_FRAME_STEP }
    }

    pub fn with_max_step(mut self, max_step: f32) -> Self {
        self.max_step = max_step;
        self
    }

    /// Seconds since the previous tick, clamped to `[0, max_step]`
    pub fn tick(&mut self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.last);
        self.last = now;
        let dt = elapsed.as_secs_f32();
        if dt > self.max_step {
            tracing::debug!(dt, max_step = self.max_step, "clamping long frame");
        }
        dt.clamp(0.0, self.max_step)
    }
}

/// Projection parameters owned by the render side; the FOV comes from the camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub aspect: f32,
    pub z_near: f32,
    pub z_far: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

impl Projection {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            aspect: width.max(1) as f32 / height.max(1) as f32,
            z_near: 0.1,
            z_far: 100.0,
        }
    }

    /// Minimised windows report a zero size; keep the previous aspect then.
    pub fn set_aspect(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn matrix(&self, fov_degrees: f32) -> Mat4 {
        Mat4::perspective_rh(fov_degrees.to_radians(), self.aspect, self.z_near, self.z_far)
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self { view_proj: Mat4::IDENTITY.to_cols_array_2d() }
    }
}

impl CameraUniform {
    pub fn update(&mut self, camera: &Camera, projection: &Projection) {
        let view_proj = projection.matrix(camera.fov()) * camera.view_matrix();
        self.view_proj = view_proj.to_cols_array_2d();
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

/// What the event loop needs to know after a frame update
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    pub dt: f32,
    pub quit_requested: bool,
}

/// Per-frame state: the single camera plus everything that feeds or reads it
pub struct FrameLoopContext {
    pub camera: Camera,
    pub input_state: InputState,
    pub camera_controller: CameraController,
    pub debug_overlay: DebugOverlay,
    pub projection: Projection,
    pub camera_uniform: CameraUniform,
    clock: FrameClock,
    last_dt: f32,
}

impl FrameLoopContext {
    pub fn new(camera: Camera, projection: Projection, start: Instant) -> Self {
        let mut camera_uniform = CameraUniform::default();
        camera_uniform.update(&camera, &projection);
        Self {
            camera,
            input_state: InputState::new(),
            camera_controller: CameraController::default(),
            debug_overlay: DebugOverlay::new(),
            projection,
            camera_uniform,
            clock: FrameClock::new(start),
            last_dt: 0.0,
        }
    }

    /// Input is applied before the uniform is rebuilt, so the frame shows its own input.
    pub fn update(&mut self, now: Instant) -> FrameReport {
        let dt = self.clock.tick(now);
        self.last_dt = dt;

        let actions = self
            .camera_controller
            .update(&mut self.camera, &mut self.input_state, dt);
        if actions.toggle_debug {
            self.debug_overlay.toggle();
        }
        self.debug_overlay.record_frame(dt);

        self.camera_uniform.update(&self.camera, &self.projection);

        FrameReport { dt, quit_requested: actions.quit }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.projection.set_aspect(width, height);
        self.camera_uniform.update(&self.camera, &self.projection);
    }

    pub fn stats(&self) -> DebugStats {
        DebugStats::capture(&self.camera, self.last_dt)
    }
}
