//! UI Module
//!
//! Screen-space UI built as quads each frame: HUD, end-of-game panel and
//! dialogue panel.

pub mod button;
pub mod dialogue_panel;
pub mod end_panel;
pub mod hud;
pub mod text;

pub use button::{Button, Rect};
pub use dialogue_panel::{choice_buttons, draw_dialogue_panel, hit_choice};
pub use end_panel::{draw_end_panel, restart_button, restart_clicked};
pub use hud::draw_hud;
pub use text::{Screen, draw_rect, draw_text, draw_text_centered, text_width, wrap_text};
