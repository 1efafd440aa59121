/// Platform-agnostic input handling
use std::collections::HashSet;
use crate::model::Direction;

/// Platform-independent input events
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    // Keyboard events
    KeyDown(String),
    KeyUp(String),

    // Pointer events, screen coordinates with y growing downwards
    CursorMoved { x: f32, y: f32 },
    MouseMotion { dx: f32, dy: f32 },
    MouseWheel { delta_y: f32 },

    // Window events
    FocusLost,
    /// An overlay UI has (or no longer has) claimed the pointer
    UiPointerCapture { captured: bool },
    /// The window grabbed (hid) or released the cursor
    CursorGrabChanged { grabbed: bool },
}

/// Input accumulated between two frames
#[derive(Debug, Default)]
pub struct InputState {
    pub pressed_keys: HashSet<String>,
    look_delta: (f32, f32),
    scroll_delta: f32,
    last_cursor: Option<(f32, f32)>,
    ui_wants_pointer: bool,
    cursor_grabbed: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process an input event and update state
    pub fn process_event(&mut self, event: &InputEvent) {
        match event {
            InputEvent::KeyDown(key) => {
                self.pressed_keys.insert(key.clone());
            }
            InputEvent::KeyUp(key) => {
                self.pressed_keys.remove(key.as_str());
            }
            InputEvent::CursorMoved { x, y } => {
                // First sample only establishes the reference point
                if let Some((lx, ly)) = self.last_cursor {
                    if !self.ui_captures_pointer() {
                        self.look_delta.0 += x - lx;
                        self.look_delta.1 += ly - y;
                    }
                }
                self.last_cursor = Some((*x, *y));
            }
            InputEvent::MouseMotion { dx, dy } => {
                if !self.ui_captures_pointer() {
                    self.look_delta.0 += dx;
                    self.look_delta.1 -= dy;
                }
            }
            InputEvent::MouseWheel { delta_y } => {
                self.scroll_delta += delta_y;
            }
            InputEvent::FocusLost => {
                self.clear_keys();
                self.last_cursor = None;
            }
            InputEvent::UiPointerCapture { captured } => {
                let was_captured = self.ui_captures_pointer();
                self.ui_wants_pointer = *captured;
                self.drop_look_if_newly_captured(was_captured);
            }
            InputEvent::CursorGrabChanged { grabbed } => {
                let was_captured = self.ui_captures_pointer();
                self.cursor_grabbed = *grabbed;
                self.drop_look_if_newly_captured(was_captured);
            }
        }
    }

    pub fn is_key_pressed(&self, key: &str) -> bool {
        self.pressed_keys.contains(key)
    }

    pub fn clear_keys(&mut self) {
        self.pressed_keys.clear();
    }

    /// The overlay only owns the pointer while the cursor is free. A grabbed,
    /// hidden cursor always drives the camera.
    pub fn ui_captures_pointer(&self) -> bool {
        self.ui_wants_pointer && !self.cursor_grabbed
    }

    pub fn cursor_grabbed(&self) -> bool {
        self.cursor_grabbed
    }

    fn drop_look_if_newly_captured(&mut self, was_captured: bool) {
        if self.ui_captures_pointer() && !was_captured {
            tracing::debug!("pointer captured by overlay, dropping pending look");
            self.look_delta = (0.0, 0.0);
        }
    }

    /// Look delta since the last call, with positive y meaning "up"
    pub fn consume_look(&mut self) -> (f32, f32) {
        std::mem::take(&mut self.look_delta)
    }

    pub fn consume_scroll(&mut self) -> f32 {
        std::mem::take(&mut self.scroll_delta)
    }
}

/// Key mapping configuration
#[derive(Debug, Clone)]
pub struct KeyBindings {
    pub forward: String,
    pub backward: String,
    pub left: String,
    pub right: String,
    pub toggle_debug: String,
    pub quit: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            forward: "w".to_string(),
            backward: "s".to_string(),
            left: "a".to_string(),
            right: "d".to_string(),
            toggle_debug: "F3".to_string(),
            quit: "Escape".to_string(),
        }
    }
}

/// One-bit press detector: reports a key only on the frame it goes down.
#[derive(Debug, Default, Clone, Copy)]
pub struct EdgeDetector {
    was_pressed: bool,
}

impl EdgeDetector {
    pub fn rising(&mut self, is_pressed: bool) -> bool {
        let fired = is_pressed && !self.was_pressed;
        self.was_pressed = is_pressed;
        fired
    }
}

/// High-level input processor
#[derive(Debug, Clone)]
pub struct InputProcessor {
    bindings: KeyBindings,
    debug_toggle: EdgeDetector,
}

impl Default for InputProcessor {
    fn default() -> Self {
        Self::new(KeyBindings::default())
    }
}

impl InputProcessor {
    pub fn new(bindings: KeyBindings) -> Self {
        Self { bindings, debug_toggle: EdgeDetector::default() }
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    pub fn is_moving(&self, input: &InputState, direction: Direction) -> bool {
        let (bound, arrow) = match direction {
            Direction::Forward => (&self.bindings.forward, "ArrowUp"),
            Direction::Backward => (&self.bindings.backward, "ArrowDown"),
            Direction::Left => (&self.bindings.left, "ArrowLeft"),
            Direction::Right => (&self.bindings.right, "ArrowRight"),
        };
        input.is_key_pressed(bound) || input.is_key_pressed(arrow)
    }

    /// Directions whose keys are currently held
    pub fn movement_directions(&self, input: &InputState) -> Vec<Direction> {
        Direction::ALL
            .into_iter()
            .filter(|&d| self.is_moving(input, d))
            .collect()
    }

    /// True once per press of the debug toggle key. Call once per frame.
    pub fn poll_debug_toggle(&mut self, input: &InputState) -> bool {
        let held = input.is_key_pressed(&self.bindings.toggle_debug);
        self.debug_toggle.rising(held)
    }

    pub fn is_quit_requested(&self, input: &InputState) -> bool {
        input.is_key_pressed(&self.bindings.quit)
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub mod native {
    use super::*;
    use winit::event::{ElementState, MouseScrollDelta};
    use winit::keyboard::KeyCode;

    /// Pixel-precise scroll (touchpads) is converted to wheel lines at this rate
    pub const PIXELS_PER_LINE: f32 = 20.0;

    /// Names match the strings used by `KeyBindings`
    pub fn key_name(code: KeyCode) -> Option<&'static str> {
        let name = match code {
            KeyCode::KeyW => "w",
            KeyCode::KeyA => "a",
            KeyCode::KeyS => "s",
            KeyCode::KeyD => "d",
            KeyCode::ArrowUp => "ArrowUp",
            KeyCode::ArrowDown => "ArrowDown",
            KeyCode::ArrowLeft => "ArrowLeft",
            KeyCode::ArrowRight => "ArrowRight",
            KeyCode::F3 => "F3",
            KeyCode::Escape => "Escape",
            _ => return None,
        };
        Some(name)
    }

    pub fn keyboard_to_input(code: KeyCode, state: ElementState) -> Option<InputEvent> {
        let key = key_name(code)?.to_string();
        Some(match state {
            ElementState::Pressed => InputEvent::KeyDown(key),
            ElementState::Released => InputEvent::KeyUp(key),
        })
    }

    pub fn mouse_motion_to_input(delta: (f64, f64)) -> InputEvent {
        InputEvent::MouseMotion { dx: delta.0 as f32, dy: delta.1 as f32 }
    }

    pub fn mouse_wheel_to_input(delta: &MouseScrollDelta) -> InputEvent {
        let delta_y = match delta {
            MouseScrollDelta::LineDelta(_, y) => *y,
            MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / PIXELS_PER_LINE,
        };
        InputEvent::MouseWheel { delta_y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key_down(k: &str) -> InputEvent {
        InputEvent::KeyDown(k.to_string())
    }

    #[test]
    fn test_first_cursor_sample_is_reference_only() {
        let mut input = InputState::new();
        input.process_event(&InputEvent::CursorMoved { x: 400.0, y: 300.0 });
        assert_eq!(input.consume_look(), (0.0, 0.0));

        input.process_event(&InputEvent::CursorMoved { x: 410.0, y: 290.0 });
        // moving the cursor up the screen is a positive look delta
        assert_eq!(input.consume_look(), (10.0, 10.0));
        assert_eq!(input.consume_look(), (0.0, 0.0), "consume must reset");
    }

    #[test]
    fn test_focus_loss_resets_reference_and_keys() {
        let mut input = InputState::new();
        input.process_event(&key_down("w"));
        input.process_event(&InputEvent::CursorMoved { x: 0.0, y: 0.0 });
        input.process_event(&InputEvent::FocusLost);
        assert!(input.pressed_keys.is_empty());

        input.process_event(&InputEvent::CursorMoved { x: 500.0, y: 500.0 });
        assert_eq!(input.consume_look(), (0.0, 0.0), "no jump after refocus");
    }

    #[test]
    fn test_raw_motion_flips_y() {
        let mut input = InputState::new();
        input.process_event(&InputEvent::MouseMotion { dx: 3.0, dy: 4.0 });
        input.process_event(&InputEvent::MouseMotion { dx: 1.0, dy: -1.0 });
        assert_eq!(input.consume_look(), (4.0, -3.0));
    }

    #[test]
    fn test_ui_capture_blocks_look() {
        let mut input = InputState::new();
        input.process_event(&InputEvent::MouseMotion { dx: 5.0, dy: 0.0 });
        input.process_event(&InputEvent::UiPointerCapture { captured: true });
        input.process_event(&InputEvent::MouseMotion { dx: 5.0, dy: 5.0 });
        input.process_event(&InputEvent::CursorMoved { x: 1.0, y: 1.0 });
        input.process_event(&InputEvent::CursorMoved { x: 9.0, y: 9.0 });
        assert!(input.ui_captures_pointer());
        assert_eq!(input.consume_look(), (0.0, 0.0));

        input.process_event(&InputEvent::UiPointerCapture { captured: false });
        input.process_event(&InputEvent::CursorMoved { x: 10.0, y: 9.0 });
        assert_eq!(input.consume_look(), (1.0, 0.0));
    }

    #[test]
    fn test_grabbed_cursor_ignores_ui_capture() {
        let mut input = InputState::new();
        input.process_event(&InputEvent::CursorGrabChanged { grabbed: true });
        input.process_event(&InputEvent::UiPointerCapture { captured: true });
        assert!(!input.ui_captures_pointer());

        input.process_event(&InputEvent::MouseMotion { dx: 50.0, dy: 0.0 });
        assert_eq!(input.consume_look(), (50.0, 0.0));

        // releasing the cursor hands the pointer back to the overlay
        input.process_event(&InputEvent::MouseMotion { dx: 5.0, dy: 0.0 });
        input.process_event(&InputEvent::CursorGrabChanged { grabbed: false });
        assert!(input.ui_captures_pointer());
        input.process_event(&InputEvent::MouseMotion { dx: 5.0, dy: 0.0 });
        assert_eq!(input.consume_look(), (0.0, 0.0));
    }

    #[test]
    fn test_scroll_accumulates() {
        let mut input = InputState::new();
        input.process_event(&InputEvent::MouseWheel { delta_y: 1.0 });
        input.process_event(&InputEvent::MouseWheel { delta_y: 2.5 });
        assert_eq!(input.consume_scroll(), 3.5);
        assert_eq!(input.consume_scroll(), 0.0);
    }

    #[test]
    fn test_edge_detector_fires_once_per_press() {
        let mut edge = EdgeDetector::default();
        assert!(!edge.rising(false));
        assert!(edge.rising(true));
        assert!(!edge.rising(true), "holding must not retrigger");
        assert!(!edge.rising(false));
        assert!(edge.rising(true));
    }

    #[test]
    fn test_movement_directions() {
        let processor = InputProcessor::default();
        let mut input = InputState::new();
        assert!(processor.movement_directions(&input).is_empty());

        input.process_event(&key_down("w"));
        input.process_event(&key_down("ArrowLeft"));
        assert_eq!(
            processor.movement_directions(&input),
            vec![Direction::Forward, Direction::Left]
        );

        input.process_event(&InputEvent::KeyUp("w".to_string()));
        assert_eq!(processor.movement_directions(&input), vec![Direction::Left]);
    }

    #[test]
    fn test_debug_toggle_and_quit() {
        let mut processor = InputProcessor::default();
        let mut input = InputState::new();
        input.process_event(&key_down("F3"));
        assert!(processor.poll_debug_toggle(&input));
        assert!(!processor.poll_debug_toggle(&input));
        input.process_event(&InputEvent::KeyUp("F3".to_string()));
        assert!(!processor.poll_debug_toggle(&input));

        assert!(!processor.is_quit_requested(&input));
        input.process_event(&key_down("Escape"));
        assert!(processor.is_quit_requested(&input));
    }

    #[test]
    fn test_custom_bindings() {
        let bindings = KeyBindings { forward: "z".to_string(), ..KeyBindings::default() };
        let processor = InputProcessor::new(bindings);
        let mut input = InputState::new();
        input.process_event(&key_down("w"));
        assert!(!processor.is_moving(&input, Direction::Forward));
        input.process_event(&key_down("z"));
        assert!(processor.is_moving(&input, Direction::Forward));
    }

    #[cfg(not(target_arch = "wasm32"))]
    mod native_mapping {
        use super::super::native::*;
        use super::super::InputEvent;
        use winit::dpi::PhysicalPosition;
        use winit::event::{ElementState, MouseScrollDelta};
        use winit::keyboard::KeyCode;

        #[test]
        fn test_keyboard_mapping() {
            assert_eq!(
                keyboard_to_input(KeyCode::KeyW, ElementState::Pressed),
                Some(InputEvent::KeyDown("w".to_string()))
            );
            assert_eq!(
                keyboard_to_input(KeyCode::F3, ElementState::Released),
                Some(InputEvent::KeyUp("F3".to_string()))
            );
            assert_eq!(keyboard_to_input(KeyCode::KeyQ, ElementState::Pressed), None);
        }

        #[test]
        fn test_wheel_mapping() {
            assert_eq!(
                mouse_wheel_to_input(&MouseScrollDelta::LineDelta(0.0, -1.0)),
                InputEvent::MouseWheel { delta_y: -1.0 }
            );
            assert_eq!(
                mouse_wheel_to_input(&MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, 40.0))),
                InputEvent::MouseWheel { delta_y: 2.0 }
            );
        }
    }
}
