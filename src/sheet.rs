//! # Sheet Compositor
//!
//! Tiles rendered labels into a fixed rows×cols grid on page-sized
//! canvases, draws dashed cut guides centered in the gaps between cells,
//! and paginates exactly when a page fills. At most one page canvas is
//! live at a time; finished pages are handed back to the caller.

use image::{Rgba, RgbaImage};
use image::imageops::overlay;

use crate::page::PageFormat;
use crate::profile::LabelProfile;
use crate::render::canvas::draw_dashed_line;

/// Guide line ink.
const GUIDE_COLOR: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Grid slot of a label index: `(page, row, col)`.
///
/// Pure function of the index: `page = i div (R·C)`,
/// `row = (i div C) mod R`, `col = i mod C`.
pub fn slot_for(index: usize, rows: u32, cols: u32) -> (usize, u32, u32) {
    let capacity = (rows * cols) as usize;
    let page = index / capacity;
    let row = ((index / cols as usize) % rows as usize) as u32;
    let col = (index % cols as usize) as u32;
    (page, row, col)
}

/// Grid geometry computed once per run.
///
/// Horizontal pitch divides each column cell's leftover space evenly
/// around the label; vertical pitch divides the page leftover evenly
/// among the `rows + 1` gaps. Integer pixel arithmetic throughout, so a
/// re-run over the same input is byte-identical.
#[derive(Debug, Clone)]
pub struct SheetLayout {
    page_w: u32,
    page_h: u32,
    rows: u32,
    cols: u32,
    label_w: i64,
    label_h: i64,
    side_px: i64,
    spacing_x: i64,
    spacing_y: i64,
    dash_px: f32,
    gap_px: f32,
    ground: Rgba<u8>,
}

impl SheetLayout {
    pub fn new(profile: &LabelProfile, page: &PageFormat, label_w: u32, label_h: u32) -> Self {
        let page_w = page.width_px();
        let page_h = page.height_px();
        let side_px = page.mm_to_px(profile.side_margin_mm) as i64;
        let cell_w = (page_w as i64 - side_px) / profile.grid_cols as i64;
        let spacing_x = (cell_w - label_w as i64) / 2;
        let spacing_y =
            (page_h as i64 - profile.grid_rows as i64 * label_h as i64) / (profile.grid_rows as i64 + 1);

        Self {
            page_w,
            page_h,
            rows: profile.grid_rows,
            cols: profile.grid_cols,
            label_w: label_w as i64,
            label_h: label_h as i64,
            side_px,
            spacing_x,
            spacing_y,
            dash_px: (page.mm_to_px(profile.guide_dash_mm) as f32).max(1.0),
            gap_px: (page.mm_to_px(profile.guide_gap_mm) as f32).max(1.0),
            ground: Rgba([profile.ground[0], profile.ground[1], profile.ground[2], 255]),
        }
    }

    /// Labels per page.
    pub fn capacity(&self) -> u32 {
        self.rows * self.cols
    }

    /// Top-left pixel of the label at (row, col).
    pub fn origin(&self, row: u32, col: u32) -> (i64, i64) {
        let x = self.side_px / 2
            + self.spacing_x
            + col as i64 * (self.label_w + 2 * self.spacing_x);
        let y = self.spacing_y + row as i64 * (self.label_h + self.spacing_y);
        (x, y)
    }

    fn fresh_page(&self) -> RgbaImage {
        RgbaImage::from_pixel(self.page_w, self.page_h, self.ground)
    }

    /// Dashed cut guides at every row and column boundary, centered in
    /// the gaps between cells.
    fn draw_guides(&self, page: &mut RgbaImage) {
        for i in 0..=self.rows as i64 {
            let y = (self.spacing_y + i * (self.label_h + self.spacing_y) - self.spacing_y / 2)
                as f32;
            draw_dashed_line(
                page,
                (0.0, y),
                (self.page_w as f32, y),
                self.dash_px,
                self.gap_px,
                GUIDE_COLOR,
            );
        }
        for i in 0..=self.cols as i64 {
            let x = (self.side_px / 2 + self.spacing_x + i * (self.label_w + 2 * self.spacing_x)
                - self.spacing_x) as f32;
            draw_dashed_line(
                page,
                (x, 0.0),
                (x, self.page_h as f32),
                self.dash_px,
                self.gap_px,
                GUIDE_COLOR,
            );
        }
    }
}

/// Accumulates labels onto the current page, emitting each page as soon
/// as it fills. The final partial page comes out of [`Compositor::finish`].
pub struct Compositor {
    layout: SheetLayout,
    page: RgbaImage,
    placed: u32,
}

impl Compositor {
    pub fn new(layout: SheetLayout) -> Self {
        let page = layout.fresh_page();
        Self {
            layout,
            page,
            placed: 0,
        }
    }

    /// Place the next label. Returns the finished page when this label
    /// completes the grid.
    pub fn place(&mut self, label: &RgbaImage) -> Option<RgbaImage> {
        let row = (self.placed / self.layout.cols) % self.layout.rows;
        let col = self.placed % self.layout.cols;
        let (x, y) = self.layout.origin(row, col);
        overlay(&mut self.page, label, x, y);
        self.placed += 1;

        if self.placed == self.layout.capacity() {
            let mut done = std::mem::replace(&mut self.page, self.layout.fresh_page());
            self.layout.draw_guides(&mut done);
            self.placed = 0;
            Some(done)
        } else {
            None
        }
    }

    /// Finalize the trailing partial page, if any labels were placed on it.
    pub fn finish(mut self) -> Option<RgbaImage> {
        if self.placed == 0 {
            return None;
        }
        self.layout.draw_guides(&mut self.page);
        Some(self.page)
    }
}
