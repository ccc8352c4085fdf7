//! Drawing primitives over RGBA image buffers.
//!
//! Lines, arcs, rounded rectangles, polygons, and dashed cut/fold lines.
//! All coordinates are pixels; callers convert from millimeters first.
//! Everything draws with plain pixel writes, clipped at the buffer edge.

use image::{Rgba, RgbaImage};

/// Bounds-checked pixel write.
#[inline]
pub fn put(img: &mut RgbaImage, x: i64, y: i64, color: Rgba<u8>) {
    if x >= 0 && y >= 0 && (x as u32) < img.width() && (y as u32) < img.height() {
        img.put_pixel(x as u32, y as u32, color);
    }
}

/// Draw a straight line between two points.
///
/// `width` thickens the line by stamping a `width`×`width` square at each
/// sampled point, centered on the ideal path.
pub fn draw_line(
    img: &mut RgbaImage,
    x0: f32,
    y0: f32,
    x1: f32,
    y1: f32,
    color: Rgba<u8>,
    width: u32,
) {
    let dx = x1 - x0;
    let dy = y1 - y0;
    let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as i64;
    let half = (width / 2) as i64;

    for i in 0..=steps {
        let t = i as f32 / steps as f32;
        let px = (x0 + dx * t).round() as i64;
        let py = (y0 + dy * t).round() as i64;
        for oy in 0..width as i64 {
            for ox in 0..width as i64 {
                put(img, px + ox - half, py + oy - half, color);
            }
        }
    }
}

/// Draw a dashed line between two points.
///
/// The line is parameterized by Euclidean arc length so dash spacing is
/// uniform regardless of angle: `floor(length / (dash + gap))` dashes are
/// placed, each `dash` long followed by a `gap`.
pub fn draw_dashed_line(
    img: &mut RgbaImage,
    start: (f32, f32),
    end: (f32, f32),
    dash_length: f32,
    gap_length: f32,
    color: Rgba<u8>,
) {
    let (x0, y0) = start;
    let (x1, y1) = end;
    let total = ((x1 - x0).powi(2) + (y1 - y0).powi(2)).sqrt();
    let period = dash_length + gap_length;
    if total <= 0.0 || period <= 0.0 {
        return;
    }

    let dashes = (total / period).floor() as i64;
    for i in 0..dashes {
        let s = i as f32 * period;
        let e = s + dash_length;
        let sx = x0 + (x1 - x0) * (s / total);
        let sy = y0 + (y1 - y0) * (s / total);
        let ex = x0 + (x1 - x0) * (e / total);
        let ey = y0 + (y1 - y0) * (e / total);
        draw_line(img, sx, sy, ex, ey, color, 1);
    }
}

/// Points of a circular arc as a polyline.
///
/// Angles are degrees, measured clockwise from the positive x axis in
/// image coordinates (y grows downward).
pub fn arc_points(
    cx: f32,
    cy: f32,
    radius: f32,
    start_angle: f32,
    end_angle: f32,
) -> Vec<(f32, f32)> {
    const SEGMENTS: usize = 16;
    let mut points = Vec::with_capacity(SEGMENTS + 1);
    for i in 0..=SEGMENTS {
        let angle = start_angle + (end_angle - start_angle) * i as f32 / SEGMENTS as f32;
        let rad = angle.to_radians();
        points.push((cx + radius * rad.cos(), cy + radius * rad.sin()));
    }
    points
}

/// Stroke a circular arc.
pub fn draw_arc(
    img: &mut RgbaImage,
    cx: f32,
    cy: f32,
    radius: f32,
    start_angle: f32,
    end_angle: f32,
    color: Rgba<u8>,
    width: u32,
) {
    let points = arc_points(cx, cy, radius, start_angle, end_angle);
    for pair in points.windows(2) {
        draw_line(img, pair[0].0, pair[0].1, pair[1].0, pair[1].1, color, width);
    }
}

/// Stroke a rounded rectangle outline: four edges plus four corner arcs.
pub fn draw_rounded_rect(
    img: &mut RgbaImage,
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
    radius: f32,
    color: Rgba<u8>,
    width: u32,
) {
    let r = radius;
    draw_line(img, x1 + r, y1, x2 - r, y1, color, width);
    draw_line(img, x1 + r, y2, x2 - r, y2, color, width);
    draw_line(img, x1, y1 + r, x1, y2 - r, color, width);
    draw_line(img, x2, y1 + r, x2, y2 - r, color, width);
    draw_arc(img, x1 + r, y1 + r, r, 180.0, 270.0, color, width);
    draw_arc(img, x2 - r, y1 + r, r, 270.0, 360.0, color, width);
    draw_arc(img, x1 + r, y2 - r, r, 90.0, 180.0, color, width);
    draw_arc(img, x2 - r, y2 - r, r, 0.0, 90.0, color, width);
}

/// Fill a rounded rectangle: a central cross of two rectangles plus four
/// quarter discs in the corners.
pub fn fill_rounded_rect(
    img: &mut RgbaImage,
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
    radius: f32,
    fill: Rgba<u8>,
) {
    let r = radius;
    fill_rect(img, x1 + r, y1, x2 - r, y2, fill);
    fill_rect(img, x1, y1 + r, x2, y2 - r, fill);
    fill_quarter_disc(img, x1 + r, y1 + r, r, fill);
    fill_quarter_disc(img, x2 - r, y1 + r, r, fill);
    fill_quarter_disc(img, x1 + r, y2 - r, r, fill);
    fill_quarter_disc(img, x2 - r, y2 - r, r, fill);
}

/// Fill an axis-aligned rectangle (inclusive corners).
pub fn fill_rect(img: &mut RgbaImage, x1: f32, y1: f32, x2: f32, y2: f32, fill: Rgba<u8>) {
    let xa = x1.round() as i64;
    let xb = x2.round() as i64;
    let ya = y1.round() as i64;
    let yb = y2.round() as i64;
    for y in ya..=yb {
        for x in xa..=xb {
            put(img, x, y, fill);
        }
    }
}

/// Fill the full disc around a corner center; the parts outside the body
/// are overdrawn by the rectangle fills, so a plain disc suffices.
fn fill_quarter_disc(img: &mut RgbaImage, cx: f32, cy: f32, radius: f32, fill: Rgba<u8>) {
    let r = radius.ceil() as i64;
    let r2 = radius * radius;
    let cxi = cx.round() as i64;
    let cyi = cy.round() as i64;
    for dy in -r..=r {
        for dx in -r..=r {
            if (dx * dx + dy * dy) as f32 <= r2 {
                put(img, cxi + dx, cyi + dy, fill);
            }
        }
    }
}

/// Fill a closed polygon with even-odd scanline rules.
pub fn fill_polygon(img: &mut RgbaImage, points: &[(f32, f32)], fill: Rgba<u8>) {
    if points.len() < 3 {
        return;
    }

    let min_y = points.iter().map(|p| p.1).fold(f32::INFINITY, f32::min);
    let max_y = points.iter().map(|p| p.1).fold(f32::NEG_INFINITY, f32::max);

    for y in min_y.floor() as i64..=max_y.ceil() as i64 {
        let yc = y as f32 + 0.5;
        let mut crossings = Vec::new();
        for i in 0..points.len() {
            let (px, py) = points[i];
            let (qx, qy) = points[(i + 1) % points.len()];
            if (py <= yc && qy > yc) || (qy <= yc && py > yc) {
                let t = (yc - py) / (qy - py);
                crossings.push(px + t * (qx - px));
            }
        }
        crossings.sort_by(|a, b| a.total_cmp(b));
        for span in crossings.chunks_exact(2) {
            let xa = span[0].round() as i64;
            let xb = span[1].round() as i64;
            for x in xa..=xb {
                put(img, x, y, fill);
            }
        }
    }
}

/// Stroke a closed polygon outline.
pub fn draw_polygon(img: &mut RgbaImage, points: &[(f32, f32)], color: Rgba<u8>, width: u32) {
    if points.len() < 2 {
        return;
    }
    for i in 0..points.len() {
        let (px, py) = points[i];
        let (qx, qy) = points[(i + 1) % points.len()];
        draw_line(img, px, py, qx, qy, color, width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

    fn blank(w: u32, h: u32) -> RgbaImage {
        RgbaImage::from_pixel(w, h, WHITE)
    }

    fn black_pixels(img: &RgbaImage) -> usize {
        img.pixels().filter(|p| **p == BLACK).count()
    }

    #[test]
    fn test_put_clips_out_of_bounds() {
        let mut img = blank(4, 4);
        put(&mut img, -1, 2, BLACK);
        put(&mut img, 2, 99, BLACK);
        assert_eq!(black_pixels(&img), 0);
    }

    #[test]
    fn test_horizontal_line() {
        let mut img = blank(10, 3);
        draw_line(&mut img, 0.0, 1.0, 9.0, 1.0, BLACK, 1);
        assert_eq!(black_pixels(&img), 10);
        assert_eq!(*img.get_pixel(5, 1), BLACK);
    }

    #[test]
    fn test_diagonal_line_hits_endpoints() {
        let mut img = blank(10, 10);
        draw_line(&mut img, 0.0, 0.0, 9.0, 9.0, BLACK, 1);
        assert_eq!(*img.get_pixel(0, 0), BLACK);
        assert_eq!(*img.get_pixel(9, 9), BLACK);
    }

    #[test]
    fn test_dashed_line_leaves_gaps() {
        let mut img = blank(100, 1);
        draw_dashed_line(&mut img, (0.0, 0.0), (99.0, 0.0), 5.0, 5.0, BLACK);
        let on = black_pixels(&img);
        // 9 full periods fit in 99px: roughly half the length is dashes
        assert!(on > 30 && on < 70, "unexpected dash coverage: {}", on);
        // The first dash is drawn, a pixel deep inside the first gap is not
        assert_eq!(*img.get_pixel(0, 0), BLACK);
        assert_eq!(*img.get_pixel(8, 0), WHITE);
    }

    #[test]
    fn test_dashed_line_diagonal_dash_count_matches_arc_length() {
        // A 30-40-50 triangle hypotenuse: 50px long, period 10 → 5 dashes
        let mut img = blank(60, 60);
        draw_dashed_line(&mut img, (0.0, 0.0), (30.0, 40.0), 5.0, 5.0, BLACK);
        assert!(black_pixels(&img) > 0);
        // End of the final gap stays empty
        assert_eq!(*img.get_pixel(30, 40), WHITE);
    }

    #[test]
    fn test_degenerate_dashed_line_is_noop() {
        let mut img = blank(10, 10);
        draw_dashed_line(&mut img, (3.0, 3.0), (3.0, 3.0), 5.0, 5.0, BLACK);
        assert_eq!(black_pixels(&img), 0);
    }

    #[test]
    fn test_arc_points_quarter_circle() {
        let points = arc_points(10.0, 10.0, 10.0, 180.0, 270.0);
        assert_eq!(points.len(), 17);
        // Starts at the leftmost point, ends at the topmost
        assert!((points[0].0 - 0.0).abs() < 0.001);
        assert!((points[0].1 - 10.0).abs() < 0.001);
        let last = points[points.len() - 1];
        assert!((last.0 - 10.0).abs() < 0.001);
        assert!((last.1 - 0.0).abs() < 0.001);
    }

    #[test]
    fn test_fill_rect() {
        let mut img = blank(10, 10);
        fill_rect(&mut img, 2.0, 2.0, 5.0, 4.0, BLACK);
        assert_eq!(black_pixels(&img), 4 * 3);
    }

    #[test]
    fn test_fill_rounded_rect_covers_center_not_corner() {
        let mut img = blank(40, 40);
        fill_rounded_rect(&mut img, 0.0, 0.0, 39.0, 39.0, 8.0, BLACK);
        assert_eq!(*img.get_pixel(20, 20), BLACK);
        // The extreme corner pixel lies outside the rounding
        assert_eq!(*img.get_pixel(0, 0), WHITE);
    }

    #[test]
    fn test_rounded_rect_outline_edges() {
        let mut img = blank(40, 20);
        draw_rounded_rect(&mut img, 0.0, 0.0, 39.0, 19.0, 5.0, BLACK, 1);
        // Straight edge segments present
        assert_eq!(*img.get_pixel(20, 0), BLACK);
        assert_eq!(*img.get_pixel(20, 19), BLACK);
        assert_eq!(*img.get_pixel(0, 10), BLACK);
        assert_eq!(*img.get_pixel(39, 10), BLACK);
        // Interior stays empty
        assert_eq!(*img.get_pixel(20, 10), WHITE);
    }

    #[test]
    fn test_fill_polygon_triangle() {
        let mut img = blank(20, 20);
        fill_polygon(
            &mut img,
            &[(1.0, 1.0), (18.0, 1.0), (1.0, 18.0)],
            BLACK,
        );
        assert_eq!(*img.get_pixel(3, 3), BLACK);
        assert_eq!(*img.get_pixel(17, 17), WHITE);
    }

    #[test]
    fn test_fill_polygon_ignores_degenerate_input() {
        let mut img = blank(10, 10);
        fill_polygon(&mut img, &[(1.0, 1.0), (5.0, 5.0)], BLACK);
        assert_eq!(black_pixels(&img), 0);
    }
}
