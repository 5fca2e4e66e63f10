//! Input Module
//!
//! Provides platform-agnostic input handling for keyboard and mouse.
//! This module is decoupled from any specific windowing system (like winit);
//! the host converts its events into [`KeyCode`]s and pointer motion, then
//! takes one [`FrameInput`] snapshot per frame.
//!
//! # Example
//!
//! ```rust,ignore
//! use lagoon_engine::input::{InputState, KeyCode, InputAction};
//!
//! let mut input = InputState::new();
//! input.handle_key(KeyCode::W, true);
//! input.pointer.accumulate_delta(4.0, 0.0);
//!
//! let frame = input.take_frame();
//! assert_eq!(frame.move_input.y, 1.0);
//! ```

pub mod bindings;
pub mod keyboard;
pub mod mouse_state;

use glam::Vec2;

pub use bindings::{InputAction, KeyBindings};
pub use keyboard::{KeyCode, KeyboardState};
pub use mouse_state::PointerState;

/// Everything the game reads from input during one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameInput {
    /// Move vector: x = strafe right, y = forward. Length ≤ 1.
    pub move_input: Vec2,
    /// Look delta in device units (pixels).
    pub look_delta: Vec2,
    /// Non-movement actions pressed this frame, in press order.
    pub actions: Vec<InputAction>,
    /// Left clicks this frame, in window pixels.
    pub clicks: Vec<Vec2>,
}

impl FrameInput {
    /// Whether an action was pressed this frame.
    pub fn triggered(&self, action: InputAction) -> bool {
        self.actions.contains(&action)
    }
}

/// Combined input state for both keyboard and mouse.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub keyboard: KeyboardState,
    pub pointer: PointerState,
    pub bindings: KeyBindings,
}

impl InputState {
    /// Create a new input state with default bindings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Forward a key event. Returns the bound action for fresh presses.
    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) -> Option<InputAction> {
        let fresh = self.keyboard.handle_key(key, pressed);
        if fresh {
            self.bindings.get_action(key)
        } else {
            None
        }
    }

    /// Current move vector from held movement keys.
    ///
    /// Diagonals are normalized so strafing forward is not faster.
    pub fn move_vector(&self) -> Vec2 {
        let held = self.keyboard.held_keys();
        let axis = |positive: InputAction, negative: InputAction| -> f32 {
            let p = self.bindings.is_action_pressed(positive, held) as i32;
            let n = self.bindings.is_action_pressed(negative, held) as i32;
            (p - n) as f32
        };
        let v = Vec2::new(
            axis(InputAction::MoveRight, InputAction::MoveLeft),
            axis(InputAction::MoveForward, InputAction::MoveBack),
        );
        if v.length_squared() > 1.0 { v.normalize() } else { v }
    }

    /// Build this frame's snapshot and consume accumulated edges and deltas.
    pub fn take_frame(&mut self) -> FrameInput {
        let actions = self
            .keyboard
            .drain_pressed()
            .into_iter()
            .filter_map(|key| self.bindings.get_action(key))
            .filter(|action| !action.is_movement())
            .collect();

        FrameInput {
            move_input: self.move_vector(),
            look_delta: self.pointer.consume_delta(),
            actions,
            clicks: self.pointer.drain_clicks(),
        }
    }

    /// Reset all input state to defaults (bindings are kept).
    pub fn reset(&mut self) {
        self.keyboard.reset();
        self.pointer.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_state_default() {
        let mut input = InputState::new();
        let frame = input.take_frame();
        assert_eq!(frame, FrameInput::default());
    }

    #[test]
    fn test_forward_movement() {
        let mut input = InputState::new();
        input.handle_key(KeyCode::W, true);
        assert_eq!(input.move_vector(), Vec2::new(0.0, 1.0));
    }

    #[test]
    fn test_diagonal_is_normalized() {
        let mut input = InputState::new();
        input.handle_key(KeyCode::W, true);
        input.handle_key(KeyCode::D, true);
        let v = input.move_vector();
        assert!((v.length() - 1.0).abs() < 1e-5);
        assert!(v.x > 0.0 && v.y > 0.0);
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let mut input = InputState::new();
        input.handle_key(KeyCode::A, true);
        input.handle_key(KeyCode::D, true);
        assert_eq!(input.move_vector(), Vec2::ZERO);
    }

    #[test]
    fn test_actions_are_edge_triggered() {
        let mut input = InputState::new();
        assert_eq!(input.handle_key(KeyCode::Space, true), Some(InputAction::Jump));
        assert_eq!(input.handle_key(KeyCode::Space, true), None);

        let frame = input.take_frame();
        assert!(frame.triggered(InputAction::Jump));

        let next = input.take_frame();
        assert!(!next.triggered(InputAction::Jump));
    }

    #[test]
    fn test_movement_keys_not_reported_as_actions() {
        let mut input = InputState::new();
        input.handle_key(KeyCode::W, true);
        let frame = input.take_frame();
        assert!(frame.actions.is_empty());
        assert_eq!(frame.move_input, Vec2::new(0.0, 1.0));
    }
}
