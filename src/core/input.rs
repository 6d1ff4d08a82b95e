//! Input state tracking

use std::collections::HashSet;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};

/// Tracks mouse input state for the orbit controls
pub struct InputState {
    /// Mouse movement delta since last frame
    mouse_delta: (f32, f32),
    /// Current mouse position
    mouse_position: (f32, f32),
    /// Currently pressed mouse buttons
    mouse_buttons: HashSet<MouseButton>,
    /// Scroll wheel delta since last frame (positive = away from user)
    scroll_delta: f32,
}

impl InputState {
    /// Create new input state
    pub fn new() -> Self {
        Self {
            mouse_delta: (0.0, 0.0),
            mouse_position: (0.0, 0.0),
            mouse_buttons: HashSet::new(),
            scroll_delta: 0.0,
        }
    }

    /// Process a window event
    pub fn process_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                let new_pos = (position.x as f32, position.y as f32);
                self.mouse_delta.0 += new_pos.0 - self.mouse_position.0;
                self.mouse_delta.1 += new_pos.1 - self.mouse_position.1;
                self.mouse_position = new_pos;
            }
            WindowEvent::MouseInput { state, button, .. } => {
                match state {
                    ElementState::Pressed => {
                        self.mouse_buttons.insert(*button);
                    }
                    ElementState::Released => {
                        self.mouse_buttons.remove(button);
                    }
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.scroll_delta += match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 40.0,
                };
            }
            _ => {}
        }
    }

    /// Call at end of frame to reset per-frame state
    pub fn end_frame(&mut self) {
        self.mouse_delta = (0.0, 0.0);
        self.scroll_delta = 0.0;
    }

    /// Get mouse delta since last frame
    pub fn mouse_delta(&self) -> (f32, f32) {
        self.mouse_delta
    }

    /// Get current mouse position
    pub fn mouse_position(&self) -> (f32, f32) {
        self.mouse_position
    }

    /// Check if mouse button is pressed
    pub fn is_mouse_button_pressed(&self, button: MouseButton) -> bool {
        self.mouse_buttons.contains(&button)
    }

    /// Get scroll delta since last frame
    pub fn scroll_delta(&self) -> f32 {
        self.scroll_delta
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_press() {
        let mut input = InputState::new();

        assert!(!input.is_mouse_button_pressed(MouseButton::Left));

        input.mouse_buttons.insert(MouseButton::Left);
        assert!(input.is_mouse_button_pressed(MouseButton::Left));

        input.end_frame();
        // Buttons stay held across frames; only deltas reset
        assert!(input.is_mouse_button_pressed(MouseButton::Left));
    }

    #[test]
    fn test_deltas_reset_each_frame() {
        let mut input = InputState::new();
        input.mouse_delta = (4.0, -2.0);
        input.scroll_delta = 1.5;

        input.end_frame();
        assert_eq!(input.mouse_delta(), (0.0, 0.0));
        assert_eq!(input.scroll_delta(), 0.0);
    }
}
