//! Keyboard Input Module
//!
//! Contains keyboard state tracking for held keys and fresh presses.
//! Decoupled from winit to use generic key codes.

use std::collections::HashSet;

/// Generic key codes, independent of windowing system.
///
/// These map to standard keyboard keys but are not tied to winit::keyboard::KeyCode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    // Movement keys
    W,
    A,
    S,
    D,
    Space,
    ShiftLeft,
    ShiftRight,

    // Arrow keys
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    // Number keys (dialogue choices)
    Digit1,
    Digit2,
    Digit3,
    Digit4,

    // Control keys
    Escape,
    Enter,
    NumpadEnter,
    Tab,

    // Letter keys (for various bindings)
    E,
    Q,
    R,

    /// Catch-all for unhandled keys
    Unknown,
}

/// Tracks which keys are held and which were pressed since the last frame.
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    held: HashSet<KeyCode>,
    pressed_this_frame: Vec<KeyCode>,
}

impl KeyboardState {
    /// Create a new keyboard state with all keys released.
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a key press or release event.
    ///
    /// Returns `true` if this was a fresh press (not an OS key repeat).
    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) -> bool {
        if key == KeyCode::Unknown {
            return false;
        }
        if pressed {
            let fresh = self.held.insert(key);
            if fresh {
                self.pressed_this_frame.push(key);
            }
            fresh
        } else {
            self.held.remove(&key);
            false
        }
    }

    /// Whether a key is currently held down.
    pub fn is_held(&self, key: KeyCode) -> bool {
        self.held.contains(&key)
    }

    /// Set of currently held keys.
    pub fn held_keys(&self) -> &HashSet<KeyCode> {
        &self.held
    }

    /// Take the keys pressed since the last call, in press order.
    pub fn drain_pressed(&mut self) -> Vec<KeyCode> {
        std::mem::take(&mut self.pressed_this_frame)
    }

    /// Release everything (focus lost).
    pub fn reset(&mut self) {
        self.held.clear();
        self.pressed_this_frame.clear();
    }
}
