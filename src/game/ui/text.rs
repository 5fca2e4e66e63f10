//! Text Rendering
//!
//! Simple pixel-font text and rectangles built as screen-space quads. All
//! layout is in window pixels (origin top-left); vertices come out in NDC.

use crate::game::types::{Mesh, Vertex};

/// Glyph cell width in font pixels (5 wide + 1 spacing)
pub const GLYPH_ADVANCE: f32 = 6.0;
/// Glyph height in font pixels
pub const GLYPH_HEIGHT: f32 = 7.0;
/// Line pitch in font pixels
pub const LINE_ADVANCE: f32 = 10.0;

/// Window size used to map pixels to NDC
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Screen {
    pub width: f32,
    pub height: f32,
}

impl Screen {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }

    pub fn to_ndc(&self, x: f32, y: f32) -> [f32; 3] {
        [
            (x / self.width) * 2.0 - 1.0,
            1.0 - (y / self.height) * 2.0,
            0.0,
        ]
    }
}

/// Helper to add a quad to the mesh
pub fn add_quad(
    mesh: &mut Mesh,
    tl: [f32; 3],
    tr: [f32; 3],
    br: [f32; 3],
    bl: [f32; 3],
    color: [f32; 4],
) {
    let base = mesh.vertices.len() as u32;
    let normal = [0.0, 0.0, 1.0];

    for position in [tl, tr, br, bl] {
        mesh.vertices.push(Vertex {
            position,
            normal,
            color,
        });
    }
    mesh.indices
        .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
}

/// Filled rectangle in window pixels
pub fn draw_rect(mesh: &mut Mesh, screen: Screen, x: f32, y: f32, w: f32, h: f32, color: [f32; 4]) {
    add_quad(
        mesh,
        screen.to_ndc(x, y),
        screen.to_ndc(x + w, y),
        screen.to_ndc(x + w, y + h),
        screen.to_ndc(x, y + h),
        color,
    );
}

// ============================================================================
// SIMPLE PIXEL FONT FOR UI TEXT
// ============================================================================
// Each character is 5x7 pixels, stored as a bitmask array
// 1 = pixel on, 0 = pixel off

pub fn get_char_bitmap(c: char) -> [u8; 7] {
    match c.to_ascii_uppercase() {
        'A' => [
            0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001,
        ],
        'B' => [
            0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110,
        ],
        'C' => [
            0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110,
        ],
        'D' => [
            0b11110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11110,
        ],
        'E' => [
            0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111,
        ],
        'F' => [
            0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000,
        ],
        'G' => [
            0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01110,
        ],
        'H' => [
            0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001,
        ],
        'I' => [
            0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110,
        ],
        'J' => [
            0b00111, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100,
        ],
        'K' => [
            0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001,
        ],
        'L' => [
            0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111,
        ],
        'M' => [
            0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001,
        ],
        'N' => [
            0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001, 0b10001,
        ],
        'O' => [
            0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110,
        ],
        'P' => [
            0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000,
        ],
        'Q' => [
            0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101,
        ],
        'R' => [
            0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001,
        ],
        'S' => [
            0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110,
        ],
        'T' => [
            0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100,
        ],
        'U' => [
            0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110,
        ],
        'V' => [
            0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100,
        ],
        'W' => [
            0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b11011, 0b10001,
        ],
        'X' => [
            0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001,
        ],
        'Y' => [
            0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100, 0b00100,
        ],
        'Z' => [
            0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111,
        ],
        '0' => [
            0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110,
        ],
        '1' => [
            0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110,
        ],
        '2' => [
            0b01110, 0b10001, 0b00001, 0b00110, 0b01000, 0b10000, 0b11111,
        ],
        '3' => [
            0b01110, 0b10001, 0b00001, 0b00110, 0b00001, 0b10001, 0b01110,
        ],
        '4' => [
            0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010,
        ],
        '5' => [
            0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110,
        ],
        '6' => [
            0b01110, 0b10000, 0b11110, 0b10001, 0b10001, 0b10001, 0b01110,
        ],
        '7' => [
            0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000,
        ],
        '8' => [
            0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110,
        ],
        '9' => [
            0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00001, 0b01110,
        ],
        ' ' => [
            0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000,
        ],
        '.' => [
            0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00100,
        ],
        '-' => [
            0b00000, 0b00000, 0b00000, 0b11111, 0b00000, 0b00000, 0b00000,
        ],
        '+' => [
            0b00000, 0b00100, 0b00100, 0b11111, 0b00100, 0b00100, 0b00000,
        ],
        ':' => [
            0b00000, 0b00100, 0b00100, 0b00000, 0b00100, 0b00100, 0b00000,
        ],
        '/' => [
            0b00001, 0b00010, 0b00010, 0b00100, 0b01000, 0b01000, 0b10000,
        ],
        '!' => [
            0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00000, 0b00100,
        ],
        '?' => [
            0b01110, 0b10001, 0b00001, 0b00110, 0b00100, 0b00000, 0b00100,
        ],
        '\'' => [
            0b00100, 0b00100, 0b01000, 0b00000, 0b00000, 0b00000, 0b00000,
        ],
        ',' => [
            0b00000, 0b00000, 0b00000, 0b00000, 0b00110, 0b00100, 0b01000,
        ],
        '(' => [
            0b00010, 0b00100, 0b01000, 0b01000, 0b01000, 0b00100, 0b00010,
        ],
        ')' => [
            0b01000, 0b00100, 0b00010, 0b00010, 0b00010, 0b00100, 0b01000,
        ],
        '>' => [
            0b01000, 0b00100, 0b00010, 0b00001, 0b00010, 0b00100, 0b01000,
        ],
        _ => [
            0b11111, 0b11111, 0b11111, 0b11111, 0b11111, 0b11111, 0b11111,
        ], // Unknown = filled box
    }
}

/// Pixel width of the longest line
pub fn text_width(text: &str, scale: f32) -> f32 {
    let longest = text.lines().map(|l| l.chars().count()).max().unwrap_or(0);
    longest as f32 * GLYPH_ADVANCE * scale
}

/// Draw text at a window position using the pixel font; `\n` starts a new line
pub fn draw_text(
    mesh: &mut Mesh,
    screen: Screen,
    text: &str,
    x: f32,
    y: f32,
    scale: f32,
    color: [f32; 4],
) {
    let pixel_size = scale;
    let char_width = GLYPH_ADVANCE * scale;

    for (line_idx, line) in text.lines().enumerate() {
        let line_y = y + line_idx as f32 * LINE_ADVANCE * scale;
        for (char_idx, c) in line.chars().enumerate() {
            let bitmap = get_char_bitmap(c);
            let char_x = x + (char_idx as f32) * char_width;

            for (row, &row_bits) in bitmap.iter().enumerate() {
                for col in 0..5 {
                    if (row_bits >> (4 - col)) & 1 == 1 {
                        let px = char_x + (col as f32) * pixel_size;
                        let py = line_y + (row as f32) * pixel_size;
                        draw_rect(mesh, screen, px, py, pixel_size, pixel_size, color);
                    }
                }
            }
        }
    }
}

/// Draw each line centered on `center_x`
pub fn draw_text_centered(
    mesh: &mut Mesh,
    screen: Screen,
    text: &str,
    center_x: f32,
    y: f32,
    scale: f32,
    color: [f32; 4],
) {
    for (line_idx, line) in text.lines().enumerate() {
        let x = center_x - text_width(line, scale) / 2.0;
        let line_y = y + line_idx as f32 * LINE_ADVANCE * scale;
        draw_text(mesh, screen, line, x, line_y, scale, color);
    }
}

/// Greedy word wrap to at most `max_chars` per line. Words longer than a
/// line are split.
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();
            while word.len() > max_chars {
                if !line.is_empty() {
                    lines.push(std::mem::take(&mut line));
                }
                lines.push(word.drain(..max_chars).collect());
            }
            let word: String = word.into_iter().collect();
            if word.is_empty() {
                continue;
            }
            let word_len = word.chars().count();
            let needed = if line.is_empty() {
                word_len
            } else {
                line.chars().count() + 1 + word_len
            };
            if needed > max_chars {
                lines.push(std::mem::take(&mut line));
            }
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(&word);
        }
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_to_ndc() {
        let screen = Screen::new(800.0, 600.0);
        assert_eq!(screen.to_ndc(0.0, 0.0), [-1.0, 1.0, 0.0]);
        assert_eq!(screen.to_ndc(400.0, 300.0), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_text_width_uses_longest_line() {
        assert_eq!(text_width("ab\nabcd", 2.0), 4.0 * GLYPH_ADVANCE * 2.0);
    }

    #[test]
    fn test_space_draws_nothing() {
        let mut mesh = Mesh::new();
        draw_text(&mut mesh, Screen::new(100.0, 100.0), "  ", 0.0, 0.0, 1.0, [1.0; 4]);
        assert!(mesh.is_empty());
    }

    #[test]
    fn test_colon_has_four_pixels() {
        let mut mesh = Mesh::new();
        draw_text(&mut mesh, Screen::new(100.0, 100.0), ":", 0.0, 0.0, 1.0, [1.0; 4]);
        assert_eq!(mesh.vertices.len(), 4 * 4);
    }

    #[test]
    fn test_wrap_text() {
        let lines = wrap_text("the quick brown fox", 10);
        assert_eq!(lines, vec!["the quick", "brown fox"]);
        let long = wrap_text("abcdefghijkl", 5);
        assert_eq!(long, vec!["abcde", "fghij", "kl"]);
    }
}
