//! Glide Options
//!
//! The single boundary where a raw navigation request becomes a fully
//! resolved one: required fields checked, every default applied exactly
//! once, the logical container reference resolved to a live handle, and
//! lifecycle callbacks attached as listeners.

mod error;
mod request;
mod resolver;

pub use error::OptionsError;
pub use request::{
    default_headers, default_ignore_extensions, ContainerRef, NavigationRequest, UpdateContent,
    DEFAULT_IGNORE_EXTENSIONS,
};
pub use resolver::{resolve, NavigationOptions};

pub type Result<T> = std::result::Result<T, OptionsError>;
