//! # Error Types
//!
//! This module defines error types used throughout the etiqueta library.

use thiserror::Error;

/// Main error type for etiqueta operations
#[derive(Debug, Error)]
pub enum EtiquetaError {
    /// A required column is absent from a data row
    #[error("missing column '{column}' in row {row}")]
    MissingColumn { column: String, row: usize },

    /// Malformed delimited input (ragged row, bad quoting)
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// QR payload does not fit the fixed symbol version
    #[error("QR error: {0}")]
    Qr(String),

    /// Unknown label profile name
    #[error("{0}")]
    Profile(String),

    /// Image encoding error
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
