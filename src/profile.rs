//! # Label Profiles
//!
//! A [`LabelProfile`] is an immutable configuration value selecting one of
//! the closed set of label layouts plus all geometry, colors, QR options,
//! sheet grid, and record ordering for a run. The four built-in profiles
//! correspond to the label stock this tool was written for:
//!
//! | Profile | Layout | Label (mm) | Grid |
//! |----------|--------|------------|------|
//! | badge | single QR, outline border | 100 × 20 | 2 × 12 |
//! | hardware | single QR, filled body | 100 × 20 | 2 × 12 |
//! | cable | two sub-cells, one per cable end | 102 × 17 | 2 × 15 |
//! | flag | fold-around flag with tail | 104 × 26 | 2 × 11 |

use serde::{Deserialize, Serialize};

/// RGB color triple. Alpha is always opaque in profile colors.
pub type Rgb = [u8; 3];

/// QR error correction level.
///
/// L recovers ~7% of data, M ~15%, Q ~25%, H ~30%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QrLevel {
    L,
    M,
    Q,
    H,
}

/// QR symbol options for one label profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QrOptions {
    /// Fixed symbol version (1-40). Payloads that do not fit abort the run.
    pub version: i16,

    /// Pixels per module.
    pub scale: u32,

    /// Quiet zone width in modules, applied on all four sides.
    pub quiet_zone: u32,

    /// Error correction level.
    pub level: QrLevel,
}

/// Label layout variant with its variant-specific geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LabelLayout {
    /// Single QR with caption to the right, outline-only rounded border.
    Badge,

    /// Single QR with caption, filled rounded body on a light ground.
    Hardware,

    /// Two congruent rounded sub-cells, one per end of a cable run,
    /// joined by a background strip with a center divider line.
    Cable {
        /// Width of each sub-cell in millimeters.
        cell_width_mm: f32,
    },

    /// Fold-around flag: a body carrying both texts (lower half printed
    /// upside down) plus a narrow tail strip that wraps the cable.
    Flag {
        /// Width of the flag body in millimeters.
        body_width_mm: f32,
        /// Height of the tail strip in millimeters.
        tail_width_mm: f32,
        /// Vertical offset of the tail strip from the top edge.
        tail_shift_mm: f32,
    },
}

/// Immutable configuration for one label run.
///
/// All physical sizes are millimeters; they are converted to pixels only
/// through [`PageFormat::mm_to_px`](crate::page::PageFormat::mm_to_px).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelProfile {
    /// Profile name as accepted on the command line.
    pub name: String,

    /// Layout variant and its geometry.
    pub layout: LabelLayout,

    /// Full label canvas width in millimeters.
    pub width_mm: f32,

    /// Full label canvas height in millimeters.
    pub height_mm: f32,

    /// Rounded border corner radius in millimeters.
    pub corner_radius_mm: f32,

    /// Label body fill color, also used as the QR background so the
    /// symbol blends into the surrounding fill.
    pub fill: Rgb,

    /// Canvas and sheet background color.
    pub ground: Rgb,

    /// QR symbol options.
    pub qr: QrOptions,

    /// Nominal caption font size in pixels (cell height); auto-fit
    /// rescales from here.
    pub font_size: f32,

    /// Sheet grid columns.
    pub grid_cols: u32,

    /// Sheet grid rows.
    pub grid_rows: u32,

    /// Combined left+right sheet margin in millimeters.
    pub side_margin_mm: f32,

    /// Cut guide dash length in millimeters.
    pub guide_dash_mm: f32,

    /// Cut guide gap length in millimeters.
    pub guide_gap_mm: f32,

    /// Composite sort key: column names, ascending, lexicographic.
    /// Empty means file order.
    pub sort_columns: Vec<String>,
}

impl LabelProfile {
    /// Plain single-QR label on white stock.
    pub fn badge() -> Self {
        Self {
            name: "badge".into(),
            layout: LabelLayout::Badge,
            width_mm: 100.0,
            height_mm: 20.0,
            corner_radius_mm: 1.7,
            fill: [255, 255, 255],
            ground: [255, 255, 255],
            qr: QrOptions {
                version: 8,
                scale: 4,
                quiet_zone: 5,
                level: QrLevel::H,
            },
            font_size: 29.0,
            grid_cols: 2,
            grid_rows: 12,
            side_margin_mm: 0.0,
            guide_dash_mm: 0.42,
            guide_gap_mm: 0.85,
            sort_columns: vec!["Division".into(), "City".into(), "Name".into()],
        }
    }

    /// Hardware inventory label: filled yellow body on a gray ground.
    pub fn hardware() -> Self {
        Self {
            name: "hardware".into(),
            layout: LabelLayout::Hardware,
            width_mm: 100.0,
            height_mm: 20.0,
            corner_radius_mm: 1.7,
            fill: [255, 255, 0],
            ground: [240, 240, 240],
            qr: QrOptions {
                version: 8,
                scale: 3,
                quiet_zone: 5,
                level: QrLevel::H,
            },
            font_size: 29.0,
            grid_cols: 2,
            grid_rows: 12,
            side_margin_mm: 4.0,
            guide_dash_mm: 0.42,
            guide_gap_mm: 0.85,
            sort_columns: vec!["Division".into(), "City".into(), "Name".into()],
        }
    }

    /// Double-ended cable label: source cell on the left, destination on
    /// the right, cut apart along the center divider.
    pub fn cable() -> Self {
        Self {
            name: "cable".into(),
            layout: LabelLayout::Cable { cell_width_mm: 45.0 },
            width_mm: 102.0,
            height_mm: 17.0,
            corner_radius_mm: 1.7,
            fill: [255, 255, 0],
            ground: [230, 230, 230],
            qr: QrOptions {
                version: 8,
                scale: 3,
                quiet_zone: 5,
                level: QrLevel::M,
            },
            font_size: 29.0,
            grid_cols: 2,
            grid_rows: 15,
            side_margin_mm: 4.0,
            guide_dash_mm: 0.42,
            guide_gap_mm: 0.42,
            sort_columns: vec!["SrcPort".into()],
        }
    }

    /// Fold-around flag label for cables: both texts read upright after
    /// the label is folded back-to-back around the cable.
    pub fn flag() -> Self {
        Self {
            name: "flag".into(),
            layout: LabelLayout::Flag {
                body_width_mm: 57.0,
                tail_width_mm: 10.0,
                tail_shift_mm: 2.0,
            },
            width_mm: 104.0,
            height_mm: 26.0,
            corner_radius_mm: 0.5,
            fill: [255, 255, 186],
            ground: [255, 255, 255],
            qr: QrOptions {
                version: 8,
                scale: 2,
                quiet_zone: 4,
                level: QrLevel::M,
            },
            font_size: 29.0,
            grid_cols: 2,
            grid_rows: 11,
            side_margin_mm: 0.0,
            guide_dash_mm: 0.42,
            guide_gap_mm: 0.42,
            sort_columns: vec!["SrcPort".into()],
        }
    }

    /// List all built-in profiles.
    pub fn built_in() -> Vec<Self> {
        vec![Self::badge(), Self::hardware(), Self::cable(), Self::flag()]
    }

    /// Resolve a profile name from the command line.
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "badge" => Ok(Self::badge()),
            "hardware" => Ok(Self::hardware()),
            "cable" => Ok(Self::cable()),
            "flag" => Ok(Self::flag()),
            other => Err(format!(
                "Unknown profile '{}'. Use one of: badge, hardware, cable, flag",
                other
            )),
        }
    }

    /// Labels per sheet.
    pub fn sheet_capacity(&self) -> u32 {
        self.grid_rows * self.grid_cols
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_names() {
        for name in ["badge", "hardware", "cable", "flag", "CABLE"] {
            let profile = LabelProfile::parse(name).unwrap();
            assert_eq!(profile.name, name.to_lowercase());
        }
    }

    #[test]
    fn test_parse_unknown_name() {
        let err = LabelProfile::parse("postcard").unwrap_err();
        assert!(err.contains("postcard"));
    }

    #[test]
    fn test_built_in_names_are_unique() {
        let profiles = LabelProfile::built_in();
        let mut names: Vec<_> = profiles.iter().map(|p| p.name.clone()).collect();
        names.dedup();
        assert_eq!(names.len(), profiles.len());
    }

    #[test]
    fn test_cable_geometry_adds_up() {
        // Two cells plus 1mm outer padding each side plus the middle strip
        // span the full canvas width.
        let profile = LabelProfile::cable();
        let LabelLayout::Cable { cell_width_mm } = profile.layout else {
            panic!("cable profile must use the cable layout");
        };
        let middle = profile.width_mm - 2.0 * (cell_width_mm + 1.0);
        assert!(middle > 0.0);
    }

    #[test]
    fn test_profiles_serialize() {
        let json = serde_json::to_string(&LabelProfile::flag()).unwrap();
        let back: LabelProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(back, LabelProfile::flag());
    }
}
