//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Options error: {0}")]
    Options(#[from] glide_options::OptionsError),

    #[error("Link error: {0}")]
    Link(#[from] glide_links::LinkError),

    #[error("Invalid url: {0}")]
    Url(#[from] url::ParseError),

    #[error("Invalid navigation transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },
}
