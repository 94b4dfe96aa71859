use thiserror::Error;

/// Errors that can occur while configuring the editor or exporting the canvas.
///
/// Drawing, undo and redo never fail: out-of-range requests are no-ops.
#[derive(Error, Debug)]
pub enum PaintError {
    #[error("unsupported export format: {0:?}")]
    UnsupportedFormat(String),
    #[error("failed to encode image: {0}")]
    Image(#[from] image::ImageError),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),
    #[error("download failed: {0}")]
    Download(String),
}

pub type PaintResult<T> = Result<T, PaintError>;
