//! Error types for Morpho Core

use thiserror::Error;

/// Result type alias using ConvertError
pub type Result<T> = std::result::Result<T, ConvertError>;

/// Errors that occur while running a conversion
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Image codec error: {0}")]
    Image(#[from] image::ImageError),

    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("Office transcoder error: {0}")]
    Office(String),

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
