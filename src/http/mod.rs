//! HTTP protocol layer module
//!
//! Response construction and MIME lookup, decoupled from routing logic.

pub mod mime;
pub mod response;

// Re-export commonly used builders
pub use response::{file_response, forbidden, internal_error, mock_response, not_found};
