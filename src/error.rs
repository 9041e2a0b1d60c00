//! Error types for the outpdf library.

use std::io;
use thiserror::Error;

/// Result type alias for outpdf operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during outline extraction.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file format is not recognized as PDF.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// The extractor could not open or parse the document.
    #[error("Extraction failure: {0}")]
    Extraction(String),

    /// The PDF document is encrypted and cannot be read.
    #[error("Document is encrypted")]
    Encrypted,

    /// Error serializing the outline document.
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// The batch input directory is missing or unreadable.
    #[error("Input directory not readable: {0}")]
    InputDir(String),

    /// The batch output directory cannot be created or written.
    #[error("Output directory not writable: {0}")]
    OutputDir(String),
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::Extraction(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialize(err.to_string())
    }
}
