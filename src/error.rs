//! Error types for the unmarklm crate.

/// Errors that can occur during watermark removal and file processing.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An I/O error occurred while reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An error occurred during image processing (load, save, encode).
    #[error("image processing error: {0}")]
    Image(#[from] image::ImageError),

    /// The file format is not supported.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The input file exceeds the maximum accepted size.
    #[error("file too large ({size} bytes, limit {limit} bytes)")]
    FileTooLarge {
        /// Actual file size in bytes.
        size: u64,
        /// Maximum accepted size in bytes.
        limit: u64,
    },

    /// The removal method name is not recognized.
    #[error("unknown removal method: {0} (expected \"smartfill\" or \"crop\")")]
    UnknownMethod(String),
}

/// A specialized `Result` type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
