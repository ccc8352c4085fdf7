//! # Page Writer
//!
//! Persists finished page canvases as sequentially numbered PNG files.

use std::fs;
use std::path::PathBuf;

use image::{DynamicImage, RgbaImage};

use crate::error::EtiquetaError;

/// Writes pages as `<dir>/<base>_<index>.png`, index 1-based.
#[derive(Debug, Clone)]
pub struct PageWriter {
    dir: PathBuf,
    base: String,
}

impl PageWriter {
    /// Create a writer, creating the output directory if absent.
    pub fn new(dir: impl Into<PathBuf>, base: &str) -> Result<Self, EtiquetaError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            base: base.to_string(),
        })
    }

    /// Path the given page index will be written to.
    pub fn path_for(&self, index: usize) -> PathBuf {
        self.dir.join(format!("{}_{}.png", self.base, index))
    }

    /// Persist one finished page as 8-bit RGB PNG.
    pub fn write(&self, page: RgbaImage, index: usize) -> Result<PathBuf, EtiquetaError> {
        let path = self.path_for(index);
        let rgb = DynamicImage::ImageRgba8(page).into_rgb8();
        rgb.save(&path)?;
        tracing::debug!(path = %path.display(), "wrote page");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_write_creates_dir_and_file() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("labels").join("out");
        let writer = PageWriter::new(&nested, "sheet").unwrap();

        let page = RgbaImage::from_pixel(10, 10, Rgba([255, 255, 255, 255]));
        let path = writer.write(page, 1).unwrap();

        assert_eq!(path, nested.join("sheet_1.png"));
        assert!(path.exists());
        // Written file decodes back to the same dimensions
        let read = image::open(&path).unwrap();
        assert_eq!(read.width(), 10);
        assert_eq!(read.height(), 10);
    }

    #[test]
    fn test_sequential_naming() {
        let root = tempfile::tempdir().unwrap();
        let writer = PageWriter::new(root.path(), "labels_a4_sheet").unwrap();
        assert_eq!(
            writer.path_for(3).file_name().unwrap(),
            "labels_a4_sheet_3.png"
        );
    }

    #[test]
    fn test_unwritable_path_is_error() {
        let root = tempfile::tempdir().unwrap();
        // A file where the directory should be
        let blocker = root.path().join("blocked");
        fs::write(&blocker, b"x").unwrap();
        let result = PageWriter::new(blocker.join("sub"), "sheet");
        assert!(result.is_err());
    }
}
