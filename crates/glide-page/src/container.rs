//! Mount-point containers
//!
//! A container is the page subtree that receives fetched content and on
//! which lifecycle events are dispatched. The embedder creates and
//! registers containers; the navigation core only reads them, swaps their
//! contents through the application callback, and emits events on them.

use parking_lot::{Mutex, RwLock};
use std::sync::Arc;

use crate::event::{EventData, LifecycleEvent};

/// Callback registered on a container for one lifecycle event.
pub type Listener = Arc<dyn Fn(&EventData) + Send + Sync>;

struct ContainerInner {
    id: String,
    html: RwLock<String>,
    listeners: Mutex<Vec<(LifecycleEvent, Listener)>>,
}

/// Shared handle to a mount point. Cloning shares state.
#[derive(Clone)]
pub struct Container {
    inner: Arc<ContainerInner>,
}

impl Container {
    pub fn new(id: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(ContainerInner {
                id: id.into(),
                html: RwLock::new(html.into()),
                listeners: Mutex::new(Vec::new()),
            }),
        }
    }

    pub fn id(&self) -> &str {
        &self.inner.id
    }

    pub fn html(&self) -> String {
        self.inner.html.read().clone()
    }

    /// Replace the container contents. Called from the application's
    /// content-update callback, never from the navigation core itself.
    pub fn set_html(&self, html: impl Into<String>) {
        *self.inner.html.write() = html.into();
    }

    /// Register a listener for one lifecycle event.
    ///
    /// Registration follows DOM `addEventListener` semantics: the same
    /// callback instance is registered at most once per event, while a
    /// distinct callback for the same event registers alongside the
    /// existing ones.
    pub fn add_listener(&self, event: LifecycleEvent, listener: Listener) {
        let mut listeners = self.inner.listeners.lock();
        let already = listeners
            .iter()
            .any(|(ev, l)| *ev == event && Arc::ptr_eq(l, &listener));
        if already {
            return;
        }
        listeners.push((event, listener));
    }

    /// Dispatch an event to every listener registered for it.
    pub fn emit(&self, event: LifecycleEvent, data: &EventData) {
        // Snapshot outside the lock so a listener may register or emit.
        let matching: Vec<Listener> = self
            .inner
            .listeners
            .lock()
            .iter()
            .filter(|(ev, _)| *ev == event)
            .map(|(_, l)| Arc::clone(l))
            .collect();

        tracing::trace!(
            container_id = %self.inner.id,
            event = %event,
            listeners = matching.len(),
            "Dispatching lifecycle event"
        );

        for listener in matching {
            listener(data);
        }
    }

    /// Number of listeners registered for an event.
    pub fn listener_count(&self, event: LifecycleEvent) -> usize {
        self.inner
            .listeners
            .lock()
            .iter()
            .filter(|(ev, _)| *ev == event)
            .count()
    }
}

impl PartialEq for Container {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Container {}

impl std::fmt::Debug for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Container")
            .field("id", &self.inner.id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    fn data(container: &Container) -> EventData {
        EventData {
            url: Some("https://example.com/page".to_string()),
            container_id: container.id().to_string(),
            title: None,
        }
    }

    #[test]
    fn test_set_html() {
        let container = Container::new("main", "<p>old</p>");
        container.set_html("<p>new</p>");
        assert_eq!(container.html(), "<p>new</p>");
    }

    #[test]
    fn test_emit_reaches_listeners() {
        let container = Container::new("main", "");
        let seen = Arc::new(Mutex::new(Vec::new()));

        let seen_clone = Arc::clone(&seen);
        container.add_listener(
            LifecycleEvent::Success,
            Arc::new(move |data: &EventData| {
                seen_clone.lock().push(data.container_id.clone());
            }),
        );

        container.emit(LifecycleEvent::Success, &data(&container));
        container.emit(LifecycleEvent::Error, &data(&container));

        assert_eq!(seen.lock().as_slice(), ["main"]);
    }

    #[test]
    fn test_same_listener_registers_once() {
        let container = Container::new("main", "");
        let count = Arc::new(Mutex::new(0));

        let count_clone = Arc::clone(&count);
        let listener: Listener = Arc::new(move |_: &EventData| {
            *count_clone.lock() += 1;
        });

        container.add_listener(LifecycleEvent::Complete, Arc::clone(&listener));
        container.add_listener(LifecycleEvent::Complete, listener);
        assert_eq!(container.listener_count(LifecycleEvent::Complete), 1);

        container.emit(LifecycleEvent::Complete, &data(&container));
        assert_eq!(*count.lock(), 1);
    }

    #[test]
    fn test_distinct_listeners_both_register() {
        let container = Container::new("main", "");

        container.add_listener(LifecycleEvent::Complete, Arc::new(|_: &EventData| {}));
        container.add_listener(LifecycleEvent::Complete, Arc::new(|_: &EventData| {}));

        assert_eq!(container.listener_count(LifecycleEvent::Complete), 2);
    }

    #[test]
    fn test_clone_shares_state() {
        let container = Container::new("main", "<p>a</p>");
        let other = container.clone();
        other.set_html("<p>b</p>");
        assert_eq!(container.html(), "<p>b</p>");
        assert_eq!(container, other);
    }
}
