// MODEL: Camera state
pub mod camera;

pub use camera::{Camera, CameraSettings, Direction};
