//! Options error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum OptionsError {
    /// A navigation cannot start without a target.
    #[error("A target url must be provided")]
    MissingUrl,

    /// A navigation cannot start without a mount point.
    #[error("A container must be provided")]
    MissingContainer,

    /// The logical container id resolved to nothing.
    #[error("Could not find container with id: {0}")]
    ContainerNotFound(String),

    /// The target url could not be parsed, even relative to the
    /// document location.
    #[error("Invalid url {url}: {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },
}
