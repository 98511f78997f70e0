//! Glide Transport
//!
//! One asynchronous HTTP request per navigation: GET, or a
//! form-urlencoded POST when data is supplied. Each send resolves exactly
//! once — a response body, or a transport error. There are no retries, no
//! streaming and no caching; a navigation is a single request/response
//! pair.

mod error;
mod http;

pub use error::TransportError;
pub use http::{HttpTransport, RequestParams, Transport, REQUESTED_WITH_HEADER, REQUESTED_WITH_VALUE};

pub type Result<T> = std::result::Result<T, TransportError>;
