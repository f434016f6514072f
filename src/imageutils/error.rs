//! Error types for image resampling and embedding.

/// Errors that can occur in the image helpers.
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("shape {shape:?} needs {expected} samples, got {actual}")]
    ShapeMismatch {
        shape: Vec<usize>,
        expected: usize,
        actual: usize,
    },

    #[error("only HxW and HxWxC arrays are supported, got a rank-{0} array")]
    UnsupportedRank(usize),

    #[error("cannot build an image with {0} channels (expected 1, 2, 3 or 4)")]
    UnsupportedChannels(usize),

    #[error("unknown resampling method '{0}' (expected nearest, bilinear, bicubic or lanczos)")]
    UnknownMethod(String),

    #[error("unknown image format '{0}'")]
    UnknownFormat(String),

    #[error("cannot resample an empty {height}x{width} image")]
    EmptySource { height: usize, width: usize },

    #[error("target size {height}x{width} must be non-zero")]
    EmptyTarget { height: u32, width: u32 },

    #[error("image codec error: {0}")]
    Codec(#[from] image::ImageError),
}
