//! Glide Page Model
//!
//! Rust owns the navigation-relevant state of the host page; the rendering
//! surface is a stateless collaborator. This crate models that state:
//! the document (location, title, scroll, load state), the mount-point
//! containers content is swapped into, and the lifecycle events dispatched
//! on them.

mod container;
mod document;
mod event;

pub use container::{Container, Listener};
pub use document::Document;
pub use event::{EventData, LifecycleEvent};
