//! Transport error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransportError {
    /// Response arrived with a status outside the success window.
    #[error("HTTP status {0}")]
    Status(u16),

    /// The request could not be sent or the connection failed.
    #[error("Network error: {0}")]
    Network(String),

    /// The deadline elapsed; the request was aborted.
    #[error("Request timed out")]
    Timeout,

    /// No usable HTTP client in this environment. Surfaced explicitly
    /// rather than degrading to a silent no-op.
    #[error("HTTP client unavailable: {0}")]
    Unsupported(String),
}
