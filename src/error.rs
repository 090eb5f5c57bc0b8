//! Error types for the tail stream library.

use thiserror::Error;

/// The main error type for tail stream operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O errors when reading or sizing the tracked file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// No usable location was supplied at construction.
    #[error("Invalid file path: {message}")]
    InvalidPath { message: String },

    /// The location did not exist at construction time.
    #[error("File does not exist: {path}")]
    NotFound { path: String },

    /// The tracked file existed at construction but vanished mid-session.
    #[error("File cannot be found anymore: {path}")]
    FileDisappeared { path: String },
}

/// A convenient Result type for tail stream operations.
pub type Result<T> = std::result::Result<T, Error>;
