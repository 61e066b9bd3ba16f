//! Error types for the bytelift library.

use thiserror::Error;

use crate::codec::CodecError;

/// Errors that can occur during transfer operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The server does not know the requested file.
    #[error("file not found: {name}")]
    NotFound {
        /// Name the size query was issued for.
        name: String,
    },

    /// The server refused to open an upload session.
    #[error("upload reservation rejected (status {status})")]
    ReservationFailed {
        /// Status code of the reservation response.
        status: u16,
    },

    /// The server rejected an uploaded part.
    #[error("part {index} rejected (status {status})")]
    PartRejected {
        /// Index of the rejected part.
        index: u64,
        /// Status code of the rejecting response.
        status: u16,
    },

    /// A download part request came back with an unexpected status.
    #[error("part {index} fetch failed (status {status})")]
    PartUnavailable {
        /// Index of the part that could not be fetched.
        index: u64,
        /// Status code of the failing response.
        status: u16,
    },

    /// A response was missing a required header or carried an unparsable body.
    #[error("malformed server response: {0}")]
    MalformedResponse(String),

    /// The assembled download does not match the size the server declared.
    #[error("assembled {actual} bytes but server declared {declared}")]
    SizeMismatch {
        /// Byte count learned from the size query.
        declared: u64,
        /// Byte count actually assembled when the sentinel arrived.
        actual: u64,
    },

    /// Download destination already exists and force overwrite is disabled.
    #[error("file already exists: {path}")]
    FileExists {
        /// Path to the existing file.
        path: String,
    },

    /// A part payload could not be decoded.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// HTTP request error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized `Result` type for bytelift operations.
pub type Result<T> = std::result::Result<T, Error>;
