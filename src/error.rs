use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpliceError {
    #[error("Failed to load image {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error(
        "Forged and original images must have the same dimensions (forged: {forged:?}, original: {original:?})"
    )]
    DimensionMismatch {
        forged: (u32, u32),
        original: (u32, u32),
    },

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Report serialization error: {0}")]
    Report(#[from] serde_json::Error),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

pub type Result<T> = std::result::Result<T, SpliceError>;
