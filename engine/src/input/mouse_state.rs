//! Pointer State Tracker
//!
//! Tracks the two ways the mouse is used in game: raw look deltas while the
//! cursor is captured, and cursor clicks on UI widgets while it is free.
//! Deltas and clicks accumulate between frames and are consumed atomically.

use glam::Vec2;

/// Mouse state with look-delta accumulation and click queueing.
///
/// ```rust,ignore
/// let mut pointer = PointerState::new();
///
/// // In event loop: accumulate raw mouse motion
/// pointer.accumulate_delta(10.0, -5.0);
/// pointer.accumulate_delta(3.0, 2.0);
///
/// // In update loop: consume accumulated delta
/// let look = pointer.consume_delta(); // (13.0, -3.0)
/// ```
#[derive(Debug, Clone, Default)]
pub struct PointerState {
    /// Accumulated look delta since last consume.
    delta: Vec2,
    /// Whether the cursor is currently captured (hidden and locked).
    cursor_captured: bool,
    /// Last known cursor position in window pixels.
    cursor_position: Vec2,
    /// Left clicks since last consume, in window pixels.
    clicks: Vec<Vec2>,
}

impl PointerState {
    /// Create a new pointer state with zero deltas and cursor not captured.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulate raw mouse motion delta.
    ///
    /// Motion is ignored while the cursor is free, so UI pointing never turns
    /// the camera.
    #[inline]
    pub fn accumulate_delta(&mut self, dx: f32, dy: f32) {
        if self.cursor_captured {
            self.delta += Vec2::new(dx, dy);
        }
    }

    /// Consume the accumulated delta, returning it and resetting to zero.
    #[inline]
    pub fn consume_delta(&mut self) -> Vec2 {
        std::mem::take(&mut self.delta)
    }

    /// Set whether the cursor is captured.
    #[inline]
    pub fn set_captured(&mut self, captured: bool) {
        self.cursor_captured = captured;
        // Clear accumulated deltas when capture state changes to prevent jumps
        if !captured {
            self.delta = Vec2::ZERO;
        }
    }

    /// Check if the cursor is currently captured.
    #[inline]
    pub fn is_captured(&self) -> bool {
        self.cursor_captured
    }

    /// Record the cursor position (window pixels).
    #[inline]
    pub fn set_cursor_position(&mut self, x: f32, y: f32) {
        self.cursor_position = Vec2::new(x, y);
    }

    #[inline]
    pub fn cursor_position(&self) -> Vec2 {
        self.cursor_position
    }

    /// Queue a left click at the current cursor position.
    pub fn click(&mut self) {
        self.clicks.push(self.cursor_position);
    }

    /// Take the clicks queued since the last call.
    pub fn drain_clicks(&mut self) -> Vec<Vec2> {
        std::mem::take(&mut self.clicks)
    }

    /// Get the current accumulated delta without consuming it.
    #[inline]
    pub fn peek_delta(&self) -> Vec2 {
        self.delta
    }

    /// Reset all state to defaults.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
