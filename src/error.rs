//! Crate-level error type.
//!
//! Every failure is recoverable by the caller: each operation allocates
//! fresh outputs, so an error never corrupts a previously produced image.

use crate::layout::LayoutError;

/// Errors from decoding, layout planning, or encoding.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Input bytes were malformed or in a format the decoder rejects.
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    /// The canvas could not be serialized to the requested format.
    #[error("failed to encode image: {0}")]
    Encode(#[source] image::ImageError),

    /// The declared mime type is not a supported input format.
    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// Layout planning rejected the input.
    #[error(transparent)]
    Layout(#[from] LayoutError),
}
