//! Link scanning error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LinkError {
    /// A configured class name produced an unparsable selector.
    #[error("Invalid link selector: {0}")]
    InvalidSelector(String),
}
