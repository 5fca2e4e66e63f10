//! End-of-Game Panel
//!
//! Win/lose text over a dimmed screen, with a restart button.

use glam::Vec2;

use super::button::{Button, Rect};
use super::text::{Screen, draw_rect, draw_text_centered};
use crate::game::types::Mesh;

const OVERLAY_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 0.6];
const PANEL_COLOR: [f32; 4] = [0.08, 0.12, 0.18, 0.9];
const TEXT_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
const TEXT_SCALE: f32 = 4.0;

const PANEL_W: f32 = 560.0;
const PANEL_H: f32 = 260.0;
const BUTTON_W: f32 = 220.0;
const BUTTON_H: f32 = 50.0;

fn panel_rect(screen: Screen) -> Rect {
    Rect::new(
        (screen.width - PANEL_W) / 2.0,
        (screen.height - PANEL_H) / 2.0,
        PANEL_W,
        PANEL_H,
    )
}

/// The restart button for the current window size
pub fn restart_button(screen: Screen) -> Button {
    let panel = panel_rect(screen);
    Button::new(
        Rect::new(
            panel.center_x() - BUTTON_W / 2.0,
            panel.y + panel.h - BUTTON_H - 24.0,
            BUTTON_W,
            BUTTON_H,
        ),
        "Restart (R)",
    )
}

/// Whether a click lands on the restart button
pub fn restart_clicked(screen: Screen, click: Vec2) -> bool {
    restart_button(screen).contains(click)
}

pub fn draw_end_panel(mesh: &mut Mesh, screen: Screen, text: &str) {
    draw_rect(mesh, screen, 0.0, 0.0, screen.width, screen.height, OVERLAY_COLOR);
    let panel = panel_rect(screen);
    draw_rect(mesh, screen, panel.x, panel.y, panel.w, panel.h, PANEL_COLOR);
    draw_text_centered(mesh, screen, text, panel.center_x(), panel.y + 40.0, TEXT_SCALE, TEXT_COLOR);
    restart_button(screen).draw(mesh, screen, 2.5);
}
