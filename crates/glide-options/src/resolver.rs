//! Request resolution
//!
//! Validation happens here, synchronously, before any request is sent.
//! Resolution has one deliberate side effect: supplied lifecycle
//! callbacks are attached as listeners on the resolved container.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use glide_page::{Container, Document, EventData, LifecycleEvent};

use crate::error::OptionsError;
use crate::request::{
    default_headers, default_ignore_extensions, ContainerRef, NavigationRequest, UpdateContent,
};
use crate::Result;

/// A fully resolved navigation: every default applied, the container a
/// live handle, the url absolute. Owned exclusively by one in-flight
/// navigation.
#[derive(Clone)]
pub struct NavigationOptions {
    pub url: Url,
    pub container: Container,
    pub title: Option<String>,
    pub record_history: bool,
    pub parse_links_on_load: bool,
    pub auto_analytics: bool,
    pub return_to_top: bool,
    pub headers: HashMap<String, String>,
    pub data: Option<HashMap<String, String>>,
    pub credentials: bool,
    pub timeout: Option<Duration>,
    pub use_class: Option<String>,
    pub exclude_class: Option<String>,
    pub ignore_extensions: Vec<String>,
    pub update_content: UpdateContent,
}

impl NavigationOptions {
    /// Payload handed to lifecycle listeners.
    pub fn event_data(&self) -> EventData {
        EventData {
            url: Some(self.url.to_string()),
            container_id: self.container.id().to_string(),
            title: self.title.clone(),
        }
    }

    /// Turn the resolved options back into a request, with every field
    /// set. Re-resolving such a request changes no value: defaults only
    /// apply to fields still unset.
    pub fn to_request(&self) -> NavigationRequest {
        NavigationRequest {
            url: Some(self.url.to_string()),
            container: Some(ContainerRef::Handle(self.container.clone())),
            title: self.title.clone(),
            record_history: Some(self.record_history),
            parse_links_on_load: Some(self.parse_links_on_load),
            auto_analytics: Some(self.auto_analytics),
            return_to_top: Some(self.return_to_top),
            headers: Some(self.headers.clone()),
            data: self.data.clone(),
            credentials: Some(self.credentials),
            timeout: self.timeout,
            use_class: self.use_class.clone(),
            exclude_class: self.exclude_class.clone(),
            ignore_extensions: Some(self.ignore_extensions.clone()),
            update_content: Some(Arc::clone(&self.update_content)),
            on_ready: None,
            on_before_send: None,
            on_complete: None,
            on_error: None,
            on_success: None,
        }
    }
}

impl std::fmt::Debug for NavigationOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationOptions")
            .field("url", &self.url.as_str())
            .field("container", &self.container)
            .field("title", &self.title)
            .field("record_history", &self.record_history)
            .field("parse_links_on_load", &self.parse_links_on_load)
            .field("auto_analytics", &self.auto_analytics)
            .field("return_to_top", &self.return_to_top)
            .finish_non_exhaustive()
    }
}

/// Validate a request and apply defaults, resolving the container against
/// the document. Fails before any request is sent; a failure leaves the
/// page and history untouched.
pub fn resolve(document: &Document, request: NavigationRequest) -> Result<NavigationOptions> {
    let raw_url = request.url.ok_or(OptionsError::MissingUrl)?;
    let container_ref = request.container.ok_or(OptionsError::MissingContainer)?;

    // Relative targets resolve against the visible location.
    let url = document
        .location()
        .join(&raw_url)
        .map_err(|source| OptionsError::InvalidUrl {
            url: raw_url.clone(),
            source,
        })?;

    let container = match container_ref {
        ContainerRef::Handle(handle) => handle,
        ContainerRef::Id(id) => match document.container(&id) {
            Some(handle) => handle,
            None => {
                tracing::warn!(container_id = %id, "Could not resolve container");
                return Err(OptionsError::ContainerNotFound(id));
            }
        },
    };

    // Only the explicit opt-out disables history recording; every other
    // value, including absence, records.
    let record_history = !matches!(request.record_history, Some(false));

    let callbacks = [
        (LifecycleEvent::Ready, request.on_ready),
        (LifecycleEvent::BeforeSend, request.on_before_send),
        (LifecycleEvent::Complete, request.on_complete),
        (LifecycleEvent::Error, request.on_error),
        (LifecycleEvent::Success, request.on_success),
    ];
    for (event, callback) in callbacks {
        if let Some(callback) = callback {
            container.add_listener(event, callback);
        }
    }

    Ok(NavigationOptions {
        url,
        container,
        title: request.title,
        record_history,
        parse_links_on_load: request.parse_links_on_load.unwrap_or(true),
        auto_analytics: request.auto_analytics.unwrap_or(true),
        return_to_top: request.return_to_top.unwrap_or(true),
        headers: request.headers.unwrap_or_else(default_headers),
        data: request.data,
        credentials: request.credentials.unwrap_or(false),
        timeout: request.timeout,
        use_class: request.use_class,
        exclude_class: request.exclude_class,
        ignore_extensions: request
            .ignore_extensions
            .unwrap_or_else(default_ignore_extensions),
        update_content: request.update_content.unwrap_or_else(stub_update_content),
    })
}

/// Placeholder for the application seam. Calling it unmodified is a sign
/// of misconfiguration, not a fatal error, so it warns and passes the
/// options through.
fn stub_update_content() -> UpdateContent {
    Arc::new(|body: &str, options: NavigationOptions| {
        tracing::warn!(
            body_len = body.len(),
            url = %options.url,
            "update_content is not configured; content was fetched but nothing was swapped"
        );
        options
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    fn document() -> Document {
        let document = Document::new(Url::parse("https://example.com/start").unwrap());
        document.register_container(Container::new("main", ""));
        document
    }

    fn request(url: &str, container: &str) -> NavigationRequest {
        NavigationRequest {
            url: Some(url.to_string()),
            container: Some(ContainerRef::Id(container.to_string())),
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_url_rejected() {
        let req = NavigationRequest {
            container: Some(ContainerRef::Id("main".to_string())),
            ..Default::default()
        };
        assert!(matches!(
            resolve(&document(), req),
            Err(OptionsError::MissingUrl)
        ));
    }

    #[test]
    fn test_missing_container_rejected() {
        let req = NavigationRequest {
            url: Some("/page".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            resolve(&document(), req),
            Err(OptionsError::MissingContainer)
        ));
    }

    #[test]
    fn test_unknown_container_rejected() {
        let err = resolve(&document(), request("/page", "missing")).unwrap_err();
        assert!(matches!(err, OptionsError::ContainerNotFound(id) if id == "missing"));
    }

    #[test]
    fn test_defaults_applied() {
        let options = resolve(&document(), request("/page", "main")).unwrap();

        assert!(options.record_history);
        assert!(options.parse_links_on_load);
        assert!(options.auto_analytics);
        assert!(options.return_to_top);
        assert_eq!(
            options.headers.get("Accept").map(String::as_str),
            Some("application/json")
        );
        assert!(options.ignore_extensions.iter().any(|e| e == "pdf"));
    }

    #[test]
    fn test_relative_url_resolves_against_location() {
        let options = resolve(&document(), request("/page?x=1", "main")).unwrap();
        assert_eq!(options.url.as_str(), "https://example.com/page?x=1");
    }

    #[test]
    fn test_record_history_coercion() {
        let options = resolve(&document(), request("/page", "main")).unwrap();
        assert!(options.record_history);

        let mut req = request("/page", "main");
        req.record_history = Some(true);
        assert!(resolve(&document(), req).unwrap().record_history);

        let mut req = request("/page", "main");
        req.record_history = Some(false);
        assert!(!resolve(&document(), req).unwrap().record_history);
    }

    #[test]
    fn test_callbacks_attach_on_resolution() {
        let document = document();
        let container = document.container("main").unwrap();
        let fired = Arc::new(Mutex::new(0));

        let fired_clone = Arc::clone(&fired);
        let mut req = request("/page", "main");
        req.on_success = Some(Arc::new(move |_: &EventData| {
            *fired_clone.lock() += 1;
        }));

        // Identical callbacks dedupe; a fresh closure registers alongside.
        let _ = resolve(&document, req.clone()).unwrap();
        let _ = resolve(&document, req).unwrap();
        assert_eq!(container.listener_count(LifecycleEvent::Success), 1);

        let mut other = request("/page", "main");
        other.on_success = Some(Arc::new(|_: &EventData| {}));
        let _ = resolve(&document, other).unwrap();
        assert_eq!(container.listener_count(LifecycleEvent::Success), 2);
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let document = document();
        let mut req = request("/page", "main");
        req.record_history = Some(false);
        req.timeout = Some(Duration::from_secs(3));

        let first = resolve(&document, req).unwrap();
        let second = resolve(&document, first.to_request()).unwrap();

        assert_eq!(second.url, first.url);
        assert_eq!(second.container, first.container);
        assert_eq!(second.record_history, first.record_history);
        assert_eq!(second.parse_links_on_load, first.parse_links_on_load);
        assert_eq!(second.headers, first.headers);
        assert_eq!(second.timeout, first.timeout);
        assert_eq!(second.ignore_extensions, first.ignore_extensions);
    }

    #[test]
    fn test_stub_update_content_passes_through() {
        let options = resolve(&document(), request("/page", "main")).unwrap();
        let updated = (options.update_content.clone())("body", options.clone());
        assert_eq!(updated.url, options.url);
        assert_eq!(updated.record_history, options.record_history);
    }
}
