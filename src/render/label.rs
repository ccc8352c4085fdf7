//! Per-variant label drawing.
//!
//! Each routine renders one label onto a canvas of exactly the profile's
//! target pixel size; captions shrink (or grow) to fit, never the canvas.

use image::imageops::{overlay, rotate180};
use image::{Rgba, RgbaImage};

use super::canvas::{
    arc_points, draw_dashed_line, draw_line, draw_polygon, draw_rounded_rect, fill_polygon,
    fill_rounded_rect,
};
use super::qr::render_qr;
use super::text::{draw_lines, fit_size};
use crate::compose::LabelSpec;
use crate::error::EtiquetaError;
use crate::page::PageFormat;
use crate::profile::{LabelLayout, LabelProfile, Rgb};

/// Border stroke width in pixels.
const LINE_WIDTH: u32 = 1;

/// Ink color for outlines and captions.
const INK: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Dash and gap length of the fold line, in millimeters.
const FOLD_DASH_MM: f32 = 0.25;

fn rgba(c: Rgb) -> Rgba<u8> {
    Rgba([c[0], c[1], c[2], 255])
}

/// Target pixel dimensions of every label rendered under this profile.
pub fn label_size(profile: &LabelProfile, page: &PageFormat) -> (u32, u32) {
    (
        page.mm_to_px(profile.width_mm),
        page.mm_to_px(profile.height_mm),
    )
}

/// Render one label. The output dimensions equal [`label_size`] for every
/// input, regardless of caption length.
pub fn render_label(
    profile: &LabelProfile,
    page: &PageFormat,
    spec: &LabelSpec,
) -> Result<RgbaImage, EtiquetaError> {
    match &profile.layout {
        LabelLayout::Badge | LabelLayout::Hardware => draw_single(profile, page, spec),
        LabelLayout::Cable { cell_width_mm } => draw_cable(profile, page, spec, *cell_width_mm),
        LabelLayout::Flag {
            body_width_mm,
            tail_width_mm,
            tail_shift_mm,
        } => draw_flag(profile, page, spec, *body_width_mm, *tail_width_mm, *tail_shift_mm),
    }
}

/// Single-QR layout: rounded body, QR on the left, caption to its right.
fn draw_single(
    profile: &LabelProfile,
    page: &PageFormat,
    spec: &LabelSpec,
) -> Result<RgbaImage, EtiquetaError> {
    let (w, h) = label_size(profile, page);
    let fill = rgba(profile.fill);
    let mut img = RgbaImage::from_pixel(w, h, rgba(profile.ground));

    let radius = page.mm_to_px(profile.corner_radius_mm) as f32;
    fill_rounded_rect(&mut img, 0.0, 0.0, (w - 1) as f32, (h - 1) as f32, radius, fill);
    draw_rounded_rect(
        &mut img,
        0.0,
        0.0,
        (w - 1) as f32,
        (h - 1) as f32,
        radius,
        INK,
        LINE_WIDTH,
    );

    let qr = render_qr(&spec.front.payload, &profile.qr, fill)?;
    let (qr_w, qr_h) = qr.dimensions();
    let qr_x = page.mm_to_px(1.0) as i64;
    let qr_y = (h as i64 - qr_h as i64) / 2;
    overlay(&mut img, &qr, qr_x, qr_y);

    let quiet_px = profile.qr.quiet_zone * profile.qr.scale;
    let w_margin = page.mm_to_px(6.0);
    let h_margin = page.mm_to_px(4.0);
    let lines: Vec<&str> = spec.front.caption.split('\n').collect();

    let avail_w = (w as f32 - (qr_w + quiet_px + w_margin) as f32).max(1.0);
    let avail_h = (h as f32 - h_margin as f32).max(1.0);
    let size = fit_size(&[lines.clone()], profile.font_size, avail_w, avail_h);

    let text_x = (qr_w + quiet_px + w_margin / 2) as i64;
    let text_y = (h_margin / 2) as i64;
    draw_lines(&mut img, text_x, text_y, &lines, size, INK);

    Ok(img)
}

/// Double-ended layout: one rounded sub-cell per cable end, divided by a
/// solid center line along which the printed label is cut in two.
fn draw_cable(
    profile: &LabelProfile,
    page: &PageFormat,
    spec: &LabelSpec,
    cell_width_mm: f32,
) -> Result<RgbaImage, EtiquetaError> {
    let (w, h) = label_size(profile, page);
    let fill = rgba(profile.fill);
    let ground = rgba(profile.ground);
    let mut img = RgbaImage::from_pixel(w, h, ground);

    let cell_w = page.mm_to_px(cell_width_mm);
    let cell_h = h;
    let radius = page.mm_to_px(profile.corner_radius_mm) as f32;
    let pad = page.mm_to_px(1.0);

    let back = spec.back.as_ref().unwrap_or(&spec.front);

    // One shared font size across both cells
    let front_lines: Vec<&str> = spec.front.caption.split('\n').collect();
    let back_lines: Vec<&str> = back.caption.split('\n').collect();

    // Both faces share QR options, so both rasters have the same size.
    let qr_front = render_qr(&spec.front.payload, &profile.qr, fill)?;
    let qr_back = render_qr(&back.payload, &profile.qr, fill)?;
    let (qr_w, _) = qr_front.dimensions();

    let avail_w = (cell_w as f32 - (qr_w + page.mm_to_px(3.0)) as f32).max(1.0);
    let avail_h = (cell_h as f32 - page.mm_to_px(2.0) as f32).max(1.0);
    let size = fit_size(
        &[front_lines.clone(), back_lines.clone()],
        profile.font_size,
        avail_w,
        avail_h,
    );

    let cell_origins = [pad as i64, (w - pad - cell_w) as i64];
    let rasters = [qr_front, qr_back];
    let line_sets = [front_lines, back_lines];

    for i in 0..2 {
        let origin_x = cell_origins[i];
        let qr = &rasters[i];
        let lines = &line_sets[i];
        let mut cell = RgbaImage::from_pixel(cell_w, cell_h, ground);
        fill_rounded_rect(
            &mut cell,
            0.0,
            0.0,
            (cell_w - 1) as f32,
            (cell_h - 1) as f32,
            radius,
            fill,
        );
        draw_rounded_rect(
            &mut cell,
            0.0,
            0.0,
            (cell_w - 1) as f32,
            (cell_h - 1) as f32,
            radius,
            INK,
            LINE_WIDTH,
        );
        overlay(&mut cell, qr, pad as i64, pad as i64);
        draw_lines(
            &mut cell,
            (qr_w + pad) as i64,
            pad as i64,
            lines,
            size,
            INK,
        );
        overlay(&mut img, &cell, origin_x, 0);
    }

    // Center divider along which the two halves are cut apart
    let mid_x = (w / 2) as f32;
    draw_line(&mut img, mid_x, 0.0, mid_x, (cell_h - 1) as f32, INK, LINE_WIDTH);

    Ok(img)
}

/// Fold-flag layout: flag body with a tail strip that wraps the cable;
/// the lower half carries the far-end text rotated 180° so both reads are
/// upright once the label is folded back-to-back.
fn draw_flag(
    profile: &LabelProfile,
    page: &PageFormat,
    spec: &LabelSpec,
    body_width_mm: f32,
    tail_width_mm: f32,
    tail_shift_mm: f32,
) -> Result<RgbaImage, EtiquetaError> {
    let (w, h) = label_size(profile, page);
    let fill = rgba(profile.fill);
    let mut img = RgbaImage::from_pixel(w, h, rgba(profile.ground));

    let mm = |v: f32| v * page.px_per_mm();
    let wf = (w - 1) as f32;
    let hf = (h - 1) as f32;
    let split_x = mm(body_width_mm);
    let split_y1 = mm(tail_shift_mm);
    let split_y2 = mm(tail_shift_mm + tail_width_mm);
    let r = mm(profile.corner_radius_mm);

    // Outline path: flag body with rounded outer corners and the tail
    // strip reaching the right edge.
    let mut path: Vec<(f32, f32)> = Vec::new();
    path.extend(arc_points(r, r, r, 180.0, 270.0));
    path.push((split_x, 0.0));
    path.push((split_x, split_y1));
    path.push((wf - r, split_y1));
    path.extend(arc_points(wf - r, split_y1 + r, r, 270.0, 360.0));
    path.push((wf, split_y2 - r));
    path.extend(arc_points(wf - r, split_y2 - r, r, 0.0, 90.0));
    path.push((split_x, split_y2));
    path.push((split_x, hf));
    path.push((r, hf));
    path.extend(arc_points(r, hf - r, r, 90.0, 180.0));
    path.push((0.0, r));

    fill_polygon(&mut img, &path, fill);
    draw_polygon(&mut img, &path, INK, LINE_WIDTH);

    // Fold line across the flag body at half height
    let half_y = mm(profile.height_mm / 2.0);
    let fold_dash = mm(FOLD_DASH_MM);
    draw_dashed_line(
        &mut img,
        (0.0, half_y),
        (split_x, half_y),
        fold_dash,
        fold_dash,
        INK,
    );

    let back = spec.back.as_ref().unwrap_or(&spec.front);
    let qr_a = render_qr(&spec.front.payload, &profile.qr, fill)?;
    let qr_b = render_qr(&back.payload, &profile.qr, fill)?;
    let (qr_w, _) = qr_a.dimensions();

    let pad = page.mm_to_px(1.0);
    overlay(&mut img, &qr_a, pad as i64, pad as i64);

    let a_lines: Vec<&str> = spec.front.caption.split('\n').collect();
    let b_lines: Vec<&str> = back.caption.split('\n').collect();

    let half_h = page.mm_to_px(profile.height_mm / 2.0);
    let avail_w = (mm(body_width_mm - 4.0) - qr_w as f32).max(1.0);
    let avail_h = (half_h as f32 - page.mm_to_px(2.0) as f32).max(1.0);
    let size = fit_size(
        &[a_lines.clone(), b_lines.clone()],
        profile.font_size,
        avail_w,
        avail_h,
    );

    draw_lines(
        &mut img,
        (page.mm_to_px(2.0) + qr_w) as i64,
        pad as i64,
        &a_lines,
        size,
        INK,
    );

    // Far-end half: drawn into a transparent buffer, rotated 180°, then
    // composited into the lower half so it reads upright after folding.
    let buf_w = (avail_w as u32 + qr_w + page.mm_to_px(2.0)).max(1);
    let buf_h = (avail_h as u32).max(1);
    let mut flipped = RgbaImage::from_pixel(buf_w, buf_h, Rgba([255, 255, 255, 0]));
    overlay(&mut flipped, &qr_b, 0, 0);
    draw_lines(&mut flipped, (pad + qr_w) as i64, 0, &b_lines, size, INK);
    let flipped = rotate180(&flipped);
    overlay(
        &mut img,
        &flipped,
        pad as i64,
        page.mm_to_px(profile.height_mm / 2.0 + 1.0) as i64,
    );

    Ok(img)
}
