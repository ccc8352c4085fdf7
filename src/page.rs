//! # Page Format
//!
//! Physical page geometry and the single mm↔px conversion used everywhere.
//!
//! Every size drawn anywhere in the pipeline is declared in millimeters and
//! converted through one scale factor so printed sheets come out at the
//! intended physical dimensions:
//!
//! ```text
//! px_per_mm = dpi / 25.4
//!
//! For A4 at 300 DPI:
//!   px_per_mm = 300 / 25.4 ≈ 11.81
//!   210mm × 297mm → 2480 × 3508 px
//! ```

use serde::{Deserialize, Serialize};

/// Physical output page: dimensions in millimeters plus print resolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageFormat {
    /// Page width in millimeters
    pub width_mm: f32,

    /// Page height in millimeters
    pub height_mm: f32,

    /// Print resolution in dots per inch
    pub dpi: u16,
}

impl PageFormat {
    /// A4 portrait at 300 DPI (2480 × 3508 px).
    pub const A4_300: Self = Self {
        width_mm: 210.0,
        height_mm: 297.0,
        dpi: 300,
    };

    /// Pixels per millimeter at this resolution.
    #[inline]
    pub fn px_per_mm(&self) -> f32 {
        self.dpi as f32 / 25.4
    }

    /// Convert millimeters to pixels, rounded to the nearest integer.
    #[inline]
    pub fn mm_to_px(&self, mm: f32) -> u32 {
        (mm * self.px_per_mm()).round() as u32
    }

    /// Page width in pixels.
    #[inline]
    pub fn width_px(&self) -> u32 {
        self.mm_to_px(self.width_mm)
    }

    /// Page height in pixels.
    #[inline]
    pub fn height_px(&self) -> u32 {
        self.mm_to_px(self.height_mm)
    }
}

impl Default for PageFormat {
    fn default() -> Self {
        Self::A4_300
    }
}
