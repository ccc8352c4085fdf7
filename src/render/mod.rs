//! # Label Rendering
//!
//! Rasterizes one label per record: QR symbol(s), boundary shape, and
//! auto-fit caption text, composed onto a canvas of the profile's exact
//! target pixel size.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`canvas`] | Pixel drawing primitives (lines, arcs, polygons, dashes) |
//! | [`qr`] | QR symbol encoding and rasterization |
//! | [`text`] | Caption measurement, auto-fit, and glyph drawing |
//! | `label` | Per-variant label composition |

pub mod canvas;
pub mod qr;
pub mod text;

mod label;

pub use label::{label_size, render_label};
