// CONTROLLER: Input and per-frame update
pub mod input;
pub mod camera_controller;
pub mod frame_loop;

pub use input::{EdgeDetector, InputEvent, InputProcessor, InputState, KeyBindings};
pub use camera_controller::{CameraController, FrameActions};
pub use frame_loop::{CameraUniform, FrameClock, FrameLoopContext, FrameReport, Projection};
