//! Caption text: measurement, auto-fit, and glyph drawing.
//!
//! Uses the Spleen 12×24 bitmap font, resampled nearest-neighbor to the
//! working size. The monospace cell makes measurement exact: a glyph cell
//! at size `s` is `round(s/2) × s` pixels and the line height equals the
//! cell height, so a caption block is `chars × cell_width` wide and
//! `lines × cell_height` tall.

use image::{Rgba, RgbaImage};
use spleen_font::{FONT_12X24, PSF2Font};

use super::canvas::put;

/// Source glyph dimensions of the embedded Spleen face.
const SRC_W: usize = 12;
const SRC_H: usize = 24;

/// Width/height ratio of the glyph cell.
const CELL_ASPECT: f32 = SRC_W as f32 / SRC_H as f32;

/// Glyph cell dimensions at a given font size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextMetrics {
    pub char_width: u32,
    pub line_height: u32,
}

impl TextMetrics {
    pub fn for_size(size: u32) -> Self {
        let size = size.max(1);
        Self {
            char_width: ((size as f32 * CELL_ASPECT).round() as u32).max(1),
            line_height: size,
        }
    }
}

/// Width in pixels of a single line at the given size.
pub fn measure_line(line: &str, size: u32) -> u32 {
    let metrics = TextMetrics::for_size(size);
    line.chars().count() as u32 * metrics.char_width
}

/// Bounding box of a block of lines at the given size.
pub fn measure_block(lines: &[&str], size: u32) -> (u32, u32) {
    let metrics = TextMetrics::for_size(size);
    let width = lines
        .iter()
        .map(|line| measure_line(line, size))
        .max()
        .unwrap_or(0);
    (width, lines.len() as u32 * metrics.line_height)
}

/// Compute the font size that fits every face into the reserved area.
///
/// Width is taken over all lines of all faces, height over the tallest
/// face, so multi-face labels share one size. The uniform factor
/// `min(max_w/text_w, max_h/text_h)` is applied to the nominal size
/// whenever it differs from 1: long captions shrink, short ones grow.
/// The scaled size truncates rather than rounds: line height equals the
/// size, so truncation keeps the fitted block inside the height bound.
pub fn fit_size(faces: &[Vec<&str>], nominal: f32, max_w: f32, max_h: f32) -> u32 {
    let nominal_px = (nominal.round() as u32).max(1);
    let text_w = faces
        .iter()
        .flat_map(|lines| lines.iter().map(|line| measure_line(line, nominal_px)))
        .max()
        .unwrap_or(0)
        .max(1) as f32;
    let text_h = faces
        .iter()
        .map(|lines| measure_block(lines, nominal_px).1)
        .max()
        .unwrap_or(0)
        .max(1) as f32;

    let factor = (max_w / text_w).min(max_h / text_h);
    if (factor - 1.0).abs() < f32::EPSILON {
        return nominal_px;
    }
    ((nominal * factor) as u32).max(1)
}

/// Fetch the 12×24 source bitmap for a character, row-major, 1 = on.
/// Returns None for glyphs the face does not cover.
fn source_glyph(ch: char) -> Option<Vec<u8>> {
    let mut face = PSF2Font::new(FONT_12X24).ok()?;
    let utf8 = ch.to_string();
    let glyph = face.glyph_for_utf8(utf8.as_bytes())?;

    let mut bitmap = vec![0u8; SRC_W * SRC_H];
    for (y, row) in glyph.enumerate() {
        for (x, on) in row.enumerate() {
            if y < SRC_H && x < SRC_W && on {
                bitmap[y * SRC_W + x] = 1;
            }
        }
    }
    Some(bitmap)
}

/// Draw one character into its cell at (x, y) by nearest-neighbor
/// resampling of the source bitmap. Unknown glyphs draw a box outline.
fn draw_char(img: &mut RgbaImage, x: i64, y: i64, ch: char, size: u32, color: Rgba<u8>) {
    let metrics = TextMetrics::for_size(size);
    let (cw, chh) = (metrics.char_width as usize, metrics.line_height as usize);

    match source_glyph(ch) {
        Some(bitmap) => {
            for dy in 0..chh {
                for dx in 0..cw {
                    let sx = dx * SRC_W / cw;
                    let sy = dy * SRC_H / chh;
                    if bitmap[sy * SRC_W + sx] != 0 {
                        put(img, x + dx as i64, y + dy as i64, color);
                    }
                }
            }
        }
        None => {
            // Box outline for characters the face is missing
            for dx in 0..cw {
                put(img, x + dx as i64, y, color);
                put(img, x + dx as i64, y + chh as i64 - 1, color);
            }
            for dy in 0..chh {
                put(img, x, y + dy as i64, color);
                put(img, x + cw as i64 - 1, y + dy as i64, color);
            }
        }
    }
}

/// Draw a single line of text starting at (x, y) (top-left of the cell).
pub fn draw_text(img: &mut RgbaImage, x: i64, y: i64, text: &str, size: u32, color: Rgba<u8>) {
    let metrics = TextMetrics::for_size(size);
    let mut cursor = x;
    for ch in text.chars() {
        draw_char(img, cursor, y, ch, size, color);
        cursor += metrics.char_width as i64;
    }
}

/// Draw a block of lines, advancing one line height per line.
pub fn draw_lines(
    img: &mut RgbaImage,
    x: i64,
    y: i64,
    lines: &[&str],
    size: u32,
    color: Rgba<u8>,
) {
    let metrics = TextMetrics::for_size(size);
    for (i, line) in lines.iter().enumerate() {
        draw_text(img, x, y + i as i64 * metrics.line_height as i64, line, size, color);
    }
}
