//! QR symbol rasterization.
//!
//! Encodes a payload string (UTF-8 bytes) at a fixed symbol version and
//! renders it at an integer module scale with a quiet zone, using the
//! label fill color as the background so the symbol blends into the
//! surrounding body.

use image::{Rgba, RgbaImage};
use qrcode::{EcLevel, QrCode, Version};

use crate::error::EtiquetaError;
use crate::profile::{QrLevel, QrOptions};

fn ec_level(level: QrLevel) -> EcLevel {
    match level {
        QrLevel::L => EcLevel::L,
        QrLevel::M => EcLevel::M,
        QrLevel::Q => EcLevel::Q,
        QrLevel::H => EcLevel::H,
    }
}

/// Pixel side length of the rendered symbol for a given module count.
pub fn raster_side(modules: u32, opts: &QrOptions) -> u32 {
    (modules + 2 * opts.quiet_zone) * opts.scale
}

/// Encode and rasterize one payload.
///
/// The payload must fit the fixed symbol version; oversized payloads are
/// an [`EtiquetaError::Qr`] and abort the run.
pub fn render_qr(
    payload: &str,
    opts: &QrOptions,
    background: Rgba<u8>,
) -> Result<RgbaImage, EtiquetaError> {
    let code = QrCode::with_version(
        payload.as_bytes(),
        Version::Normal(opts.version),
        ec_level(opts.level),
    )
    .map_err(|e| EtiquetaError::Qr(format!("payload does not fit symbol version {}: {}", opts.version, e)))?;

    let modules = code.width() as u32;
    let side = raster_side(modules, opts);
    let mut img = RgbaImage::from_pixel(side, side, background);
    let dark = Rgba([0, 0, 0, 255]);

    for qy in 0..modules {
        for qx in 0..modules {
            if code[(qx as usize, qy as usize)] != qrcode::Color::Dark {
                continue;
            }
            let base_x = (opts.quiet_zone + qx) * opts.scale;
            let base_y = (opts.quiet_zone + qy) * opts.scale;
            for cy in 0..opts.scale {
                for cx in 0..opts.scale {
                    img.put_pixel(base_x + cx, base_y + cy, dark);
                }
            }
        }
    }

    Ok(img)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts() -> QrOptions {
        QrOptions {
            version: 8,
            scale: 3,
            quiet_zone: 5,
            level: QrLevel::M,
        }
    }

    #[test]
    fn test_version_8_raster_side() {
        // Version 8 is a 49-module symbol
        let img = render_qr("hello", &opts(), Rgba([255, 255, 0, 255])).unwrap();
        assert_eq!(img.dimensions(), ((49 + 10) * 3, (49 + 10) * 3));
    }

    #[test]
    fn test_quiet_zone_is_background() {
        let bg = Rgba([255, 255, 186, 255]);
        let img = render_qr("hello", &opts(), bg).unwrap();
        // Entire quiet zone band keeps the background color
        let quiet = opts().quiet_zone * opts().scale;
        for x in 0..img.width() {
            for y in 0..quiet {
                assert_eq!(*img.get_pixel(x, y), bg);
            }
        }
    }

    #[test]
    fn test_symbol_has_dark_modules() {
        let img = render_qr("hello", &opts(), Rgba([255, 255, 255, 255])).unwrap();
        let dark = img
            .pixels()
            .filter(|p| **p == Rgba([0, 0, 0, 255]))
            .count();
        assert!(dark > 0);
    }

    #[test]
    fn test_deterministic_output() {
        let a = render_qr("Name: x\r\nIP: 10.0.0.1", &opts(), Rgba([255, 255, 255, 255])).unwrap();
        let b = render_qr("Name: x\r\nIP: 10.0.0.1", &opts(), Rgba([255, 255, 255, 255])).unwrap();
        assert_eq!(a.as_raw(), b.as_raw());
    }

    #[test]
    fn test_oversized_payload_is_error() {
        // Version 8 at level M holds far less than 2000 bytes
        let big = "x".repeat(2000);
        let err = render_qr(&big, &opts(), Rgba([255, 255, 255, 255])).unwrap_err();
        assert!(matches!(err, EtiquetaError::Qr(_)));
    }

    #[test]
    fn test_utf8_payload_accepted() {
        let img = render_qr("Підрозділ: Київ", &opts(), Rgba([255, 255, 255, 255]));
        assert!(img.is_ok());
    }
}
