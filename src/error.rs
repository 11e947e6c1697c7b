//! Server error type
//!
//! Errors that can cross the per-request dispatch boundary. Anything arriving
//! at `handle_request` as an `Err` becomes a plain 500 response; the full
//! detail stays in the server log.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    /// I/O error while reading an asset from disk.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Response construction rejected a header or status value.
    #[error("Failed to build response: {0}")]
    Http(#[from] hyper::http::Error),
}
