//! Dialogue Panel
//!
//! Bottom-of-screen box with the current line, up to four choice buttons
//! and, for lines without choices, a continue prompt.

use glam::Vec2;

use super::button::{Button, Rect};
use super::text::{GLYPH_ADVANCE, LINE_ADVANCE, Screen, draw_rect, draw_text, draw_text_centered, wrap_text};
use crate::game::dialogue::MAX_CHOICES;
use crate::game::types::Mesh;

const PANEL_COLOR: [f32; 4] = [0.05, 0.05, 0.08, 0.85];
const TEXT_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
const PROMPT_COLOR: [f32; 4] = [0.8, 0.8, 0.8, 1.0];
const TEXT_SCALE: f32 = 3.0;
const BUTTON_TEXT_SCALE: f32 = 2.0;
const MARGIN: f32 = 24.0;
const BUTTON_H: f32 = 40.0;
const BUTTON_GAP: f32 = 8.0;

fn panel_rect(screen: Screen) -> Rect {
    let h = screen.height * 0.4;
    Rect::new(MARGIN, screen.height - h - MARGIN, screen.width - MARGIN * 2.0, h)
}

/// Buttons for the given choices, one row each under the text
pub fn choice_buttons(screen: Screen, choices: &[String]) -> Vec<Button> {
    let panel = panel_rect(screen);
    let count = choices.len().min(MAX_CHOICES);
    let first_y = panel.y + panel.h - MARGIN - count as f32 * (BUTTON_H + BUTTON_GAP) + BUTTON_GAP;
    choices
        .iter()
        .take(MAX_CHOICES)
        .enumerate()
        .map(|(i, label)| {
            Button::new(
                Rect::new(
                    panel.x + MARGIN,
                    first_y + i as f32 * (BUTTON_H + BUTTON_GAP),
                    panel.w - MARGIN * 2.0,
                    BUTTON_H,
                ),
                format!("{}. {}", i + 1, label),
            )
        })
        .collect()
}

/// Index of the choice button under a click
pub fn hit_choice(screen: Screen, choices: &[String], click: Vec2) -> Option<usize> {
    choice_buttons(screen, choices)
        .iter()
        .position(|b| b.contains(click))
}

pub fn draw_dialogue_panel(
    mesh: &mut Mesh,
    screen: Screen,
    text: &str,
    choices: &[String],
    prompt: Option<&str>,
) {
    let panel = panel_rect(screen);
    draw_rect(mesh, screen, panel.x, panel.y, panel.w, panel.h, PANEL_COLOR);

    let max_chars = ((panel.w - MARGIN * 2.0) / (GLYPH_ADVANCE * TEXT_SCALE)).max(1.0) as usize;
    for (i, line) in wrap_text(text, max_chars).iter().enumerate() {
        let y = panel.y + MARGIN + i as f32 * LINE_ADVANCE * TEXT_SCALE;
        draw_text(mesh, screen, line, panel.x + MARGIN, y, TEXT_SCALE, TEXT_COLOR);
    }

    for button in choice_buttons(screen, choices) {
        button.draw(mesh, screen, BUTTON_TEXT_SCALE);
    }

    if choices.is_empty() {
        if let Some(prompt) = prompt {
            let y = panel.y + panel.h - MARGIN - LINE_ADVANCE * BUTTON_TEXT_SCALE;
            draw_text_centered(mesh, screen, prompt, panel.center_x(), y, BUTTON_TEXT_SCALE, PROMPT_COLOR);
        }
    }
}
