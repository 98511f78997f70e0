//! Glide Core
//!
//! Partial-page navigation for a host page: intercept eligible link
//! clicks, fetch the destination, let the application swap the content,
//! and keep the session history in sync so back/forward replays
//! correctly. Rust owns all navigation state; the rendering surface is a
//! stateless collaborator kept in sync through the page model.

mod analytics;
mod error;
mod navigator;
mod phase;
mod session;

pub use analytics::Analytics;
pub use error::CoreError;
pub use navigator::{AttachedLink, ClickOutcome, Navigator};
pub use phase::{Navigation, NavigationPhase};
pub use session::SessionState;

// Re-export the building blocks
pub use glide_history::{HistoryEntry, HistoryStack, HistoryState, PopEvent};
pub use glide_links::{
    CandidateLink, Click, ClickDisposition, LinkError, MouseButton, ScanSettings, SkipReason,
};
pub use glide_options::{
    ContainerRef, NavigationOptions, NavigationRequest, OptionsError, UpdateContent,
};
pub use glide_page::{Container, Document, EventData, LifecycleEvent, Listener};
pub use glide_transport::{HttpTransport, RequestParams, Transport, TransportError};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
