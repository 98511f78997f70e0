//! Host document state
//!
//! The single source of truth for the page's visible location, title and
//! scroll position, plus the registry resolving logical container ids to
//! live containers.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use url::Url;

use crate::container::Container;

#[derive(Debug)]
struct DocumentInner {
    location: RwLock<Url>,
    title: RwLock<String>,
    scroll: RwLock<(f64, f64)>,
    loaded: RwLock<bool>,
    body: RwLock<String>,
    containers: RwLock<HashMap<String, Container>>,
}

/// Shared handle to the host document. Cloning shares state.
#[derive(Debug, Clone)]
pub struct Document {
    inner: Arc<DocumentInner>,
}

impl Document {
    pub fn new(location: Url) -> Self {
        Self {
            inner: Arc::new(DocumentInner {
                location: RwLock::new(location),
                title: RwLock::new(String::new()),
                scroll: RwLock::new((0.0, 0.0)),
                loaded: RwLock::new(false),
                body: RwLock::new(String::new()),
                containers: RwLock::new(HashMap::new()),
            }),
        }
    }

    pub fn location(&self) -> Url {
        self.inner.location.read().clone()
    }

    /// Update the visible address. Called when a history entry is pushed
    /// or a back/forward traversal lands on an entry.
    pub fn set_location(&self, location: Url) {
        tracing::debug!(url = %location, "Document location changed");
        *self.inner.location.write() = location;
    }

    pub fn title(&self) -> String {
        self.inner.title.read().clone()
    }

    pub fn set_title(&self, title: impl Into<String>) {
        *self.inner.title.write() = title.into();
    }

    pub fn scroll(&self) -> (f64, f64) {
        *self.inner.scroll.read()
    }

    pub fn scroll_to(&self, x: f64, y: f64) {
        *self.inner.scroll.write() = (x, y);
    }

    /// Whether the page has finished its initial load. Link scanning at
    /// connect time is deferred until this flips.
    pub fn is_loaded(&self) -> bool {
        *self.inner.loaded.read()
    }

    pub fn mark_loaded(&self) {
        *self.inner.loaded.write() = true;
    }

    /// Markup of the whole page body, the source for the initial scan.
    pub fn body(&self) -> String {
        self.inner.body.read().clone()
    }

    pub fn set_body(&self, body: impl Into<String>) {
        *self.inner.body.write() = body.into();
    }

    /// Make a container resolvable by its logical id. The embedder owns
    /// container lifecycles; registration only shares the handle.
    pub fn register_container(&self, container: Container) {
        self.inner
            .containers
            .write()
            .insert(container.id().to_string(), container);
    }

    /// Resolve a logical container id to a live container.
    pub fn container(&self, id: &str) -> Option<Container> {
        self.inner.containers.read().get(id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> Document {
        Document::new(Url::parse("https://example.com/start").unwrap())
    }

    #[test]
    fn test_container_resolution() {
        let document = doc();
        document.register_container(Container::new("main", ""));

        assert!(document.container("main").is_some());
        assert!(document.container("sidebar").is_none());
    }

    #[test]
    fn test_location_and_title() {
        let document = doc();
        document.set_title("Start");
        document.set_location(Url::parse("https://example.com/page2").unwrap());

        assert_eq!(document.title(), "Start");
        assert_eq!(document.location().path(), "/page2");
    }

    #[test]
    fn test_load_state() {
        let document = doc();
        assert!(!document.is_loaded());
        document.mark_loaded();
        assert!(document.is_loaded());
    }

    #[test]
    fn test_scroll() {
        let document = doc();
        document.scroll_to(0.0, 640.0);
        assert_eq!(document.scroll(), (0.0, 640.0));
        document.scroll_to(0.0, 0.0);
        assert_eq!(document.scroll(), (0.0, 0.0));
    }

    #[test]
    fn test_clone_shares_state() {
        let document = doc();
        let other = document.clone();
        other.set_title("Shared");
        assert_eq!(document.title(), "Shared");
    }
}
