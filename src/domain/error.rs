//! Error types for pixgrid.
//!
//! This module defines the centralized error type [`PixgridError`] and a type alias
//! [`Result`] used throughout the crate. All errors are implemented using the
//! `thiserror` crate for automatic `Error` trait implementation.
//!
//! Errors never cross the fetcher or platform boundaries: the search client turns
//! them into [`FetchOutcome::Failure`](crate::api::FetchOutcome) and the transfer
//! runner turns them into alert notices.

use thiserror::Error;

/// The main error type for pixgrid operations.
///
/// # Examples
///
/// ```
/// use pixgrid::PixgridError;
///
/// fn validate() -> Result<(), PixgridError> {
///     Err(PixgridError::Config("api_key is required".to_string()))
/// }
/// assert!(validate().is_err());
/// ```
#[derive(Debug, Error)]
pub enum PixgridError {
    /// HTTP transport failed (connect, timeout, body read).
    ///
    /// Wraps errors from `reqwest`. Automatically converts using `#[from]`.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The image API answered with a non-success status.
    #[error("API error ({status}): {body}")]
    Api {
        /// HTTP status code returned by the endpoint.
        status: u16,
        /// Response body, possibly empty.
        body: String,
    },

    /// A response body could not be decoded into the expected shape.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A download, save, or share operation failed.
    #[error("Platform error: {0}")]
    Platform(String),

    /// A typed terminal command could not be parsed.
    #[error("Command error: {0}")]
    Command(String),
}

/// A specialized `Result` type for pixgrid operations.
pub type Result<T> = std::result::Result<T, PixgridError>;
