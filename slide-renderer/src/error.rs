//! Renderer error types.

use thiserror::Error;

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur while exporting a page.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The generated SVG could not be parsed.
    #[error("SVG parsing failed: {0}")]
    Svg(String),

    /// Rasterization failed.
    #[error("Rasterization failed: {0}")]
    Raster(String),

    /// Encoding the raster to an image format failed.
    #[error("Encoding failed: {0}")]
    Encode(String),

    /// Writing the export to disk failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
