use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("Invalid Windows path, no drive letter found: {0:?}")]
    InvalidPath(String),

    #[error("Geometry {index} is a {kind}, only Polygon geometries can be rasterized")]
    NonPolygonGeometry { index: usize, kind: &'static str },

    #[error("No name for channel {index}: only {available} channel names given")]
    MissingChannelName { index: usize, available: usize },

    #[error("Invalid image dimensions: width={0}, height={1}")]
    InvalidDimensions(usize, usize),

    #[error("Image stack is empty")]
    EmptyStack,

    #[error("Quantile must be within [0, 1], got {0}")]
    InvalidQuantile(f64),

    #[error("Shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch { expected: (usize, usize), actual: (usize, usize) },

    #[error("Failed to encode TIFF image: {0}")]
    EncodeError(String),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ProcessingError>;
