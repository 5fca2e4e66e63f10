//! Input Bindings Module
//!
//! Maps physical keys to logical actions, allowing for key remapping.

use std::collections::{HashMap, HashSet};

use super::KeyCode;

/// Logical input actions that can be bound to physical keys.
///
/// These actions represent high-level game inputs independent of their physical key mappings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    /// Move forward (default: W)
    MoveForward,
    /// Move backward (default: S)
    MoveBack,
    /// Strafe left (default: A)
    MoveLeft,
    /// Strafe right (default: D)
    MoveRight,
    /// Jump (default: Space)
    Jump,
    /// Advance a dialogue line that has no choices (default: Enter)
    AdvanceDialogue,
    /// Open the dialogue tree (default: Q)
    BeginDialogue,
    /// Restart after the game ended (default: R)
    Restart,
    /// Pick dialogue response 0..=3 (default: 1-4)
    Choose(u8),
    /// Quit (default: Escape)
    Escape,
}

impl InputAction {
    /// Movement actions are read as held state, everything else as presses.
    pub fn is_movement(&self) -> bool {
        matches!(
            self,
            InputAction::MoveForward
                | InputAction::MoveBack
                | InputAction::MoveLeft
                | InputAction::MoveRight
        )
    }
}

/// Maps physical keys to logical actions, supporting customizable key bindings.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    /// Map from physical key to logical action
    key_to_action: HashMap<KeyCode, InputAction>,
    /// Map from logical action to physical key (for reverse lookup and display)
    action_to_key: HashMap<InputAction, KeyCode>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyBindings {
    /// Create a new KeyBindings instance with default key mappings.
    ///
    /// Default bindings:
    /// - W/S/A/D = movement
    /// - Space = Jump
    /// - Enter = AdvanceDialogue
    /// - Q = BeginDialogue
    /// - R = Restart
    /// - 1-4 = Choose(0..=3)
    /// - Escape = Escape
    pub fn new() -> Self {
        let mut bindings = Self {
            key_to_action: HashMap::new(),
            action_to_key: HashMap::new(),
        };

        bindings.bind(KeyCode::W, InputAction::MoveForward);
        bindings.bind(KeyCode::S, InputAction::MoveBack);
        bindings.bind(KeyCode::A, InputAction::MoveLeft);
        bindings.bind(KeyCode::D, InputAction::MoveRight);
        bindings.bind(KeyCode::Space, InputAction::Jump);
        bindings.bind(KeyCode::Enter, InputAction::AdvanceDialogue);
        bindings.bind(KeyCode::Q, InputAction::BeginDialogue);
        bindings.bind(KeyCode::R, InputAction::Restart);
        bindings.bind(KeyCode::Digit1, InputAction::Choose(0));
        bindings.bind(KeyCode::Digit2, InputAction::Choose(1));
        bindings.bind(KeyCode::Digit3, InputAction::Choose(2));
        bindings.bind(KeyCode::Digit4, InputAction::Choose(3));
        bindings.bind(KeyCode::Escape, InputAction::Escape);

        bindings
    }

    /// Bind a physical key to a logical action.
    ///
    /// If the key was previously bound to another action, that binding is removed.
    /// If the action was previously bound to another key, that binding is also removed.
    pub fn bind(&mut self, key: KeyCode, action: InputAction) {
        if let Some(old_action) = self.key_to_action.remove(&key) {
            self.action_to_key.remove(&old_action);
        }

        if let Some(old_key) = self.action_to_key.remove(&action) {
            self.key_to_action.remove(&old_key);
        }

        self.key_to_action.insert(key, action);
        self.action_to_key.insert(action, key);
    }

    /// Remove the binding for a specific action.
    pub fn unbind_action(&mut self, action: InputAction) {
        if let Some(key) = self.action_to_key.remove(&action) {
            self.key_to_action.remove(&key);
        }
    }

    /// Get the action bound to a physical key, if any.
    pub fn get_action(&self, key: KeyCode) -> Option<InputAction> {
        self.key_to_action.get(&key).copied()
    }

    /// Get the key bound to a logical action, if any.
    pub fn get_key(&self, action: InputAction) -> Option<KeyCode> {
        self.action_to_key.get(&action).copied()
    }

    /// Check if a specific action is currently pressed, given a set of pressed keys.
    pub fn is_action_pressed(&self, action: InputAction, pressed_keys: &HashSet<KeyCode>) -> bool {
        if let Some(key) = self.action_to_key.get(&action) {
            pressed_keys.contains(key)
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings() {
        let bindings = KeyBindings::new();

        assert_eq!(bindings.get_action(KeyCode::W), Some(InputAction::MoveForward));
        assert_eq!(bindings.get_action(KeyCode::Space), Some(InputAction::Jump));
        assert_eq!(bindings.get_action(KeyCode::Enter), Some(InputAction::AdvanceDialogue));
        assert_eq!(bindings.get_action(KeyCode::Q), Some(InputAction::BeginDialogue));
        assert_eq!(bindings.get_action(KeyCode::Digit3), Some(InputAction::Choose(2)));
    }

    #[test]
    fn test_rebind_key() {
        let mut bindings = KeyBindings::new();

        bindings.bind(KeyCode::ArrowUp, InputAction::MoveForward);

        assert_eq!(bindings.get_action(KeyCode::W), None);
        assert_eq!(bindings.get_action(KeyCode::ArrowUp), Some(InputAction::MoveForward));
        assert_eq!(bindings.get_key(InputAction::MoveForward), Some(KeyCode::ArrowUp));
    }

    #[test]
    fn test_is_action_pressed() {
        let bindings = KeyBindings::new();

        let mut pressed = HashSet::new();
        pressed.insert(KeyCode::W);

        assert!(bindings.is_action_pressed(InputAction::MoveForward, &pressed));
        assert!(!bindings.is_action_pressed(InputAction::MoveBack, &pressed));
    }

    #[test]
    fn test_unbound_action_not_pressed() {
        let mut bindings = KeyBindings::new();
        bindings.unbind_action(InputAction::MoveForward);

        let mut pressed = HashSet::new();
        pressed.insert(KeyCode::W);

        assert!(!bindings.is_action_pressed(InputAction::MoveForward, &pressed));
    }

    #[test]
    fn test_movement_classification() {
        assert!(InputAction::MoveLeft.is_movement());
        assert!(!InputAction::Jump.is_movement());
        assert!(!InputAction::Choose(0).is_movement());
    }
}
