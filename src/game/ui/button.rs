//! Buttons
//!
//! Clickable labelled rectangles in window pixels.

use glam::Vec2;

use super::text::{Screen, draw_rect, draw_text_centered, GLYPH_HEIGHT};
use crate::game::types::Mesh;

pub const BUTTON_COLOR: [f32; 4] = [0.2, 0.2, 0.2, 0.9];
pub const BUTTON_TEXT_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// Axis-aligned rectangle, origin top-left
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.w
            && point.y >= self.y
            && point.y <= self.y + self.h
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.w / 2.0
    }
}

/// A clickable button
#[derive(Debug, Clone, PartialEq)]
pub struct Button {
    pub rect: Rect,
    pub label: String,
}

impl Button {
    pub fn new(rect: Rect, label: impl Into<String>) -> Self {
        Self {
            rect,
            label: label.into(),
        }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        self.rect.contains(point)
    }

    pub fn draw(&self, mesh: &mut Mesh, screen: Screen, text_scale: f32) {
        let r = self.rect;
        draw_rect(mesh, screen, r.x, r.y, r.w, r.h, BUTTON_COLOR);
        let text_y = r.y + (r.h - GLYPH_HEIGHT * text_scale) / 2.0;
        draw_text_centered(mesh, screen, &self.label, r.center_x(), text_y, text_scale, BUTTON_TEXT_COLOR);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_contains_edges() {
        let r = Rect::new(10.0, 10.0, 20.0, 5.0);
        assert!(r.contains(Vec2::new(10.0, 10.0)));
        assert!(r.contains(Vec2::new(30.0, 15.0)));
        assert!(!r.contains(Vec2::new(30.1, 12.0)));
    }
}
