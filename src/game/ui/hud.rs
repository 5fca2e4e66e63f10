//! HUD
//!
//! Score in the top-left corner, countdown in the top-right.

use super::text::{Screen, draw_text, text_width};
use crate::game::types::Mesh;

const HUD_SCALE: f32 = 3.0;
const HUD_MARGIN: f32 = 16.0;
const HUD_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

pub fn draw_hud(mesh: &mut Mesh, screen: Screen, score_text: &str, timer_text: &str) {
    draw_text(mesh, screen, score_text, HUD_MARGIN, HUD_MARGIN, HUD_SCALE, HUD_COLOR);

    let timer_x = screen.width - HUD_MARGIN - text_width(timer_text, HUD_SCALE);
    draw_text(mesh, screen, timer_text, timer_x, HUD_MARGIN, HUD_SCALE, HUD_COLOR);
}
