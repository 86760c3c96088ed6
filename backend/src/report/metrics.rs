// src/report/metrics.rs

//! Advance widths of the two standard fonts the report uses, enough to align
//! and wrap text without loading a font file.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FontWeight {
    Regular,
    Bold,
}

/// Line height as a multiple of the font size (ascender to descender plus gap).
pub const LINE_HEIGHT: f32 = 1.156;

/// Distance from the top of a line box to the baseline, per unit of font size.
pub const ASCENT: f32 = 0.718;

// Widths in 1/1000 em for ASCII 0x20..=0x7E.
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0'..'?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P'..'_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`'..'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 'p'..'~'
];

const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

fn char_width(c: char, weight: FontWeight) -> u16 {
    let table = match weight {
        FontWeight::Regular => &HELVETICA,
        FontWeight::Bold => &HELVETICA_BOLD,
    };
    match c as u32 {
        code @ 0x20..=0x7E => table[(code - 0x20) as usize],
        // Outside ASCII the builtin encoding has no glyph; measure as 'n'.
        _ => table[('n' as u32 - 0x20) as usize],
    }
}

/// Width of `text` in points at `size`.
pub fn text_width(text: &str, weight: FontWeight, size: f32) -> f32 {
    let units: u32 = text.chars().map(|c| char_width(c, weight) as u32).sum();
    units as f32 * size / 1000.0
}

pub fn line_height(size: f32) -> f32 {
    size * LINE_HEIGHT
}

/// Greedy word wrap to `width`. Explicit newlines start a new line; a word
/// wider than the box is broken between characters.
pub fn wrap(text: &str, weight: FontWeight, size: f32, width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{current} {word}")
            };
            if text_width(&candidate, weight, size) <= width {
                current = candidate;
                continue;
            }
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if text_width(word, weight, size) <= width {
                current = word.to_string();
            } else {
                let mut pieces = break_word(word, weight, size, width);
                current = pieces.pop().unwrap_or_default();
                lines.extend(pieces);
            }
        }
        lines.push(current);
    }
    lines
}

fn break_word(word: &str, weight: FontWeight, size: f32, width: f32) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut current = String::new();
    for c in word.chars() {
        current.push(c);
        if current.chars().count() > 1 && text_width(&current, weight, size) > width {
            current.pop();
            pieces.push(std::mem::take(&mut current));
            current.push(c);
        }
    }
    pieces.push(current);
    pieces
}

/// Height of `text` wrapped at `width`.
pub fn text_height(text: &str, weight: FontWeight, size: f32, width: f32) -> f32 {
    wrap(text, weight, size, width).len() as f32 * line_height(size)
}
