use glam::{Mat4, Vec3};

/// Fixed world-space up reference used to derive the camera basis.
pub const WORLD_UP: Vec3 = Vec3::Y;

/// Pitch stays strictly inside ±90° so `front` never lines up with `WORLD_UP`.
pub const PITCH_LIMIT: f32 = 89.0;

pub const FOV_MIN: f32 = 1.0;
pub const FOV_MAX: f32 = 90.0;

/// Keyboard movement directions, relative to the current orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Backward,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Forward,
        Direction::Backward,
        Direction::Left,
        Direction::Right,
    ];
}

/// Tunables applied when a camera is constructed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraSettings {
    /// World units per second.
    pub movement_speed: f32,
    /// Scale applied to raw pointer deltas before they become degrees.
    pub mouse_sensitivity: f32,
    /// Vertical field of view in degrees.
    pub fov: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            movement_speed: 5.0,
            mouse_sensitivity: 0.1,
            fov: 45.0,
        }
    }
}

/// First-person camera.
///
/// Orientation is stored as yaw/pitch in degrees. `front`, `right` and `up`
/// are derived from those two angles and are only ever rewritten together, so
/// readers never see a half-updated basis.
///
/// All inputs are expected to be finite. NaN or infinite deltas are not
/// rejected and will propagate into the basis.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vec3,
    pub movement_speed: f32,
    pub mouse_sensitivity: f32,
    yaw: f32,
    pitch: f32,
    fov: f32,
    front: Vec3,
    right: Vec3,
    up: Vec3,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 0.0, 3.0), -90.0, 0.0)
    }
}

impl Camera {
    pub fn new(position: Vec3, yaw: f32, pitch: f32) -> Self {
        Self::with_settings(position, yaw, pitch, CameraSettings::default())
    }

    /// Builds a camera with a valid basis, so the first view matrix is usable
    /// before any input arrives. Out-of-range `pitch` and `settings.fov` are
    /// clamped into their legal ranges.
    pub fn with_settings(position: Vec3, yaw: f32, pitch: f32, settings: CameraSettings) -> Self {
        let pitch = pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        let (front, right, up) = orientation_basis(yaw, pitch);
        Self {
            position,
            movement_speed: settings.movement_speed,
            mouse_sensitivity: settings.mouse_sensitivity,
            yaw,
            pitch,
            fov: settings.fov.clamp(FOV_MIN, FOV_MAX),
            front,
            right,
            up,
        }
    }

    pub fn yaw(&self) -> f32 { self.yaw }

    pub fn pitch(&self) -> f32 { self.pitch }

    /// Vertical field of view in degrees, always within `[FOV_MIN, FOV_MAX]`.
    pub fn fov(&self) -> f32 { self.fov }

    pub fn front(&self) -> Vec3 { self.front }

    pub fn right(&self) -> Vec3 { self.right }

    pub fn up(&self) -> Vec3 { self.up }

    pub fn target(&self) -> Vec3 { self.position + self.front }

    /// Translate along the current basis. `delta_time` is not validated: zero
    /// is a no-op and a negative value moves the other way.
    pub fn process_movement(&mut self, direction: Direction, delta_time: f32) {
        let velocity = self.movement_speed * delta_time;
        match direction {
            Direction::Forward => self.position += self.front * velocity,
            Direction::Backward => self.position -= self.front * velocity,
            Direction::Left => self.position -= self.right * velocity,
            Direction::Right => self.position += self.right * velocity,
        }
    }

    /// Apply a pointer delta. Positive `dy` looks up; callers with top-down
    /// screen coordinates must flip it first.
    pub fn process_look(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * self.mouse_sensitivity;
        self.pitch = (self.pitch + dy * self.mouse_sensitivity).clamp(-PITCH_LIMIT, PITCH_LIMIT);

        let (front, right, up) = orientation_basis(self.yaw, self.pitch);
        self.front = front;
        self.right = right;
        self.up = up;
    }

    /// Positive scroll narrows the field of view (zoom in).
    pub fn process_zoom(&mut self, scroll_delta: f32) {
        self.fov = (self.fov - scroll_delta).clamp(FOV_MIN, FOV_MAX);
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target(), self.up)
    }
}

/// Derives `(front, right, up)` from yaw/pitch in degrees.
fn orientation_basis(yaw: f32, pitch: f32) -> (Vec3, Vec3, Vec3) {
    let (yaw, pitch) = (yaw.to_radians(), pitch.to_radians());
    let front = Vec3::new(
        yaw.cos() * pitch.cos(),
        pitch.sin(),
        yaw.sin() * pitch.cos(),
    )
    .normalize();
    let right = front.cross(WORLD_UP).normalize();
    let up = right.cross(front).normalize();
    (front, right, up)
}
