//! First-person camera controller with its input layer, frame loop glue and
//! debug overlay.
pub mod logging;
pub mod ui;

// MVC Architecture
pub mod model;
pub mod controller;

pub use controller::{CameraController, FrameLoopContext, InputEvent, InputState};
pub use model::{Camera, CameraSettings, Direction};
