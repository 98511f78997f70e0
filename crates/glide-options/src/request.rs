//! Raw navigation requests
//!
//! Every field is optional; the resolver fills in the blanks. Requests
//! are cheap to clone so a single scan-level request can fan out into
//! per-link variants.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use glide_page::{Container, Listener};

use crate::resolver::NavigationOptions;

/// Path extensions never fetched as navigable content.
pub const DEFAULT_IGNORE_EXTENSIONS: &[&str] = &[
    "pdf", "doc", "docx", "zip", "rar", "7z", "gif", "jpeg", "jpg", "png",
];

pub fn default_ignore_extensions() -> Vec<String> {
    DEFAULT_IGNORE_EXTENSIONS
        .iter()
        .map(|s| s.to_string())
        .collect()
}

pub fn default_headers() -> HashMap<String, String> {
    let mut headers = HashMap::new();
    headers.insert("Accept".to_string(), "application/json".to_string());
    headers
}

/// The application seam: turn a response body into page changes and hand
/// back the (possibly adjusted) options for the rest of the pipeline.
pub type UpdateContent = Arc<dyn Fn(&str, NavigationOptions) -> NavigationOptions + Send + Sync>;

/// A mount-point reference: a logical id still to be resolved, or an
/// already-resolved container handle.
#[derive(Debug, Clone)]
pub enum ContainerRef {
    Id(String),
    Handle(Container),
}

impl From<&str> for ContainerRef {
    fn from(id: &str) -> Self {
        ContainerRef::Id(id.to_string())
    }
}

impl From<Container> for ContainerRef {
    fn from(container: Container) -> Self {
        ContainerRef::Handle(container)
    }
}

/// One navigation as the caller describes it.
#[derive(Clone, Default)]
pub struct NavigationRequest {
    /// Target resource; required.
    pub url: Option<String>,
    /// Mount point; required.
    pub container: Option<ContainerRef>,
    /// Title applied to the document after a successful load.
    pub title: Option<String>,
    /// Push a history entry for this navigation. Only an explicit `false`
    /// opts out.
    pub record_history: Option<bool>,
    /// Re-scan swapped-in content for interceptable links.
    pub parse_links_on_load: Option<bool>,
    /// Emit a page-view signal when an analytics integration is present.
    pub auto_analytics: Option<bool>,
    /// Reset scroll position after load.
    pub return_to_top: Option<bool>,
    /// Request headers overlaid on the defaults.
    pub headers: Option<HashMap<String, String>>,
    /// Flat form body; presence switches the request to POST.
    pub data: Option<HashMap<String, String>>,
    /// Send the request with the cookie-bearing client.
    pub credentials: Option<bool>,
    /// Abort the request when the deadline elapses.
    pub timeout: Option<Duration>,
    /// Restrict link scans to anchors bearing this class.
    pub use_class: Option<String>,
    /// Drop anchors bearing this class from link scans.
    pub exclude_class: Option<String>,
    /// Path extensions left to native navigation.
    pub ignore_extensions: Option<Vec<String>>,
    /// The mandatory application seam; the default stub only warns.
    pub update_content: Option<UpdateContent>,
    pub on_ready: Option<Listener>,
    pub on_before_send: Option<Listener>,
    pub on_complete: Option<Listener>,
    pub on_error: Option<Listener>,
    pub on_success: Option<Listener>,
}

impl std::fmt::Debug for NavigationRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationRequest")
            .field("url", &self.url)
            .field("container", &self.container)
            .field("title", &self.title)
            .field("record_history", &self.record_history)
            .field("parse_links_on_load", &self.parse_links_on_load)
            .field("auto_analytics", &self.auto_analytics)
            .field("return_to_top", &self.return_to_top)
            .field("use_class", &self.use_class)
            .field("exclude_class", &self.exclude_class)
            .finish_non_exhaustive()
    }
}
