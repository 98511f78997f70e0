//! The navigation controller
//!
//! Orchestrates one navigation end to end: lifecycle events, the
//! transport request, the application content swap, history recording,
//! the link rescan, and the title/scroll updates. Also hosts the history
//! bridge that replays back/forward traversals as non-recording
//! navigations.

use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use url::Url;

use glide_history::{HistoryEntry, HistoryStack, HistoryState, PopEvent};
use glide_links::{disposition, eligibility, scan, Click, ClickDisposition, ScanSettings};
use glide_options::{
    default_ignore_extensions, resolve, ContainerRef, NavigationOptions, NavigationRequest,
};
use glide_page::{Container, Document, EventData, LifecycleEvent};
use glide_transport::{RequestParams, Transport};

use crate::analytics::Analytics;
use crate::phase::{Navigation, NavigationPhase};
use crate::session::SessionState;
use crate::Result;

/// A link that passed eligibility and validation; clicking it feeds the
/// resolved options into the navigation pipeline.
#[derive(Debug, Clone)]
pub struct AttachedLink {
    pub options: NavigationOptions,
}

impl AttachedLink {
    pub fn url(&self) -> &Url {
        &self.options.url
    }
}

/// What a click on an attached link ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Middle or modifier click, handed back to the browser
    Native,
    /// Target equals the current location; nothing happened
    AlreadyHere,
    /// The pipeline ran to a terminal phase
    Completed(NavigationPhase),
}

/// The engine instance for one page session.
///
/// Owns the page model, the session history stack and the session flags.
/// Overlapping navigations are not serialized: if a second navigation
/// starts before the first resolves, whichever response arrives last wins
/// the content/title/history race. Navigation ids in the logs make the
/// interleaving visible.
pub struct Navigator<T: Transport> {
    document: Document,
    history: Arc<RwLock<HistoryStack>>,
    transport: T,
    analytics: Option<Arc<dyn Analytics>>,
    session: Mutex<SessionState>,
    pending_scan: Mutex<Option<NavigationRequest>>,
    links: Mutex<Vec<AttachedLink>>,
}

impl<T: Transport> Navigator<T> {
    pub fn new(document: Document, transport: T) -> Self {
        let history = HistoryStack::new(document.location().to_string(), document.title());

        Self {
            document,
            history: Arc::new(RwLock::new(history)),
            transport,
            analytics: None,
            session: Mutex::new(SessionState::new()),
            pending_scan: Mutex::new(None),
            links: Mutex::new(Vec::new()),
        }
    }

    pub fn with_analytics(mut self, analytics: Arc<dyn Analytics>) -> Self {
        self.analytics = Some(analytics);
        self
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Every link attached so far, latest scan last.
    pub fn links(&self) -> Vec<AttachedLink> {
        self.links.lock().clone()
    }

    pub fn history_len(&self) -> usize {
        self.history.read().len()
    }

    pub fn current_entry(&self) -> HistoryEntry {
        self.history.read().current().clone()
    }

    pub fn can_go_back(&self) -> bool {
        self.history.read().can_go_back()
    }

    pub fn can_go_forward(&self) -> bool {
        self.history.read().can_go_forward()
    }

    // === Connect: wire the page's links into the pipeline ===

    /// Attribute-driven connect: no scan-level container, so only links
    /// carrying their own container override attach.
    pub fn connect(&self) -> Result<Vec<AttachedLink>> {
        self.connect_with(NavigationRequest::default())
    }

    /// Attach every link in the document, targeting one container.
    pub fn connect_container(&self, container_id: &str) -> Result<Vec<AttachedLink>> {
        self.connect_with(NavigationRequest {
            container: Some(ContainerRef::Id(container_id.to_string())),
            ..Default::default()
        })
    }

    /// Attach only links bearing a class, targeting one container.
    pub fn connect_filtered(&self, container_id: &str, use_class: &str) -> Result<Vec<AttachedLink>> {
        self.connect_with(NavigationRequest {
            container: Some(ContainerRef::Id(container_id.to_string())),
            use_class: Some(use_class.to_string()),
            ..Default::default()
        })
    }

    /// Connect with full options. The options (minus title and the
    /// history toggle, which belong to `invoke`) are remembered for
    /// history replays. Scanning runs now if the document is loaded,
    /// otherwise when `document_loaded` fires.
    pub fn connect_with(&self, mut request: NavigationRequest) -> Result<Vec<AttachedLink>> {
        request.title = None;
        request.record_history = None;

        self.session.lock().remember(request.clone());

        if self.document.is_loaded() {
            self.connect_scan(request)
        } else {
            tracing::debug!("Document not loaded; deferring initial link scan");
            *self.pending_scan.lock() = Some(request);
            Ok(Vec::new())
        }
    }

    /// Mark the document loaded and run a deferred connect scan, if any.
    pub fn document_loaded(&self) -> Result<Vec<AttachedLink>> {
        self.document.mark_loaded();

        let pending = self.pending_scan.lock().take();
        match pending {
            Some(request) => self.connect_scan(request),
            None => Ok(Vec::new()),
        }
    }

    /// A connect-driven scan of the document body. The first one in the
    /// page's lifetime emits `ready` on the scan-level container once
    /// attachment completes.
    fn connect_scan(&self, request: NavigationRequest) -> Result<Vec<AttachedLink>> {
        let attached = self.parse_links(&self.document.body(), request.clone())?;

        if self.session.lock().take_first_scan() {
            if let Some(container) = self.scan_container(&request) {
                container.emit(
                    LifecycleEvent::Ready,
                    &EventData {
                        url: None,
                        container_id: container.id().to_string(),
                        title: None,
                    },
                );
            }
        }

        Ok(attached)
    }

    // === Link scanning ===

    /// Scan a markup subtree and attach every eligible, valid link. A
    /// link that fails eligibility or validation is left native. After
    /// the first scan of the page's lifetime the scan-level container
    /// emits `ready`.
    pub fn parse_links(
        &self,
        source: &str,
        request: NavigationRequest,
    ) -> Result<Vec<AttachedLink>> {
        let current = self.document.location();
        let settings = ScanSettings {
            use_class: request.use_class.clone(),
            exclude_class: request.exclude_class.clone(),
        };
        let ignore = request
            .ignore_extensions
            .clone()
            .unwrap_or_else(default_ignore_extensions);

        let mut attached = Vec::new();

        for candidate in scan(source, &current, &settings)? {
            if let Some(reason) = eligibility(&candidate.href, &current, &ignore) {
                tracing::debug!(url = %candidate.href, %reason, "Link left native");
                continue;
            }

            let mut link_request = request.clone();
            link_request.url = Some(candidate.href.to_string());
            if let Some(container) = candidate.container {
                link_request.container = Some(ContainerRef::Id(container));
            }
            if let Some(title) = candidate.title {
                link_request.title = Some(title);
            }
            // Link navigations always record history; only replays must
            // not, and those never come through a scan.
            link_request.record_history = Some(true);

            match resolve(&self.document, link_request) {
                Ok(options) => attached.push(AttachedLink { options }),
                Err(error) => {
                    tracing::debug!(url = %candidate.href, %error, "Link failed validation; left native");
                }
            }
        }

        tracing::debug!(attached = attached.len(), "Link scan finished");
        self.links.lock().extend(attached.iter().cloned());

        Ok(attached)
    }

    fn scan_container(&self, request: &NavigationRequest) -> Option<Container> {
        match &request.container {
            Some(ContainerRef::Handle(handle)) => Some(handle.clone()),
            Some(ContainerRef::Id(id)) => self.document.container(id),
            None => None,
        }
    }

    // === Invoke: one navigation, bypassing link scanning ===

    pub async fn invoke(&self, url: &str, container_id: &str) -> Result<NavigationPhase> {
        self.invoke_with(NavigationRequest {
            url: Some(url.to_string()),
            container: Some(ContainerRef::Id(container_id.to_string())),
            ..Default::default()
        })
        .await
    }

    pub async fn invoke_with(&self, request: NavigationRequest) -> Result<NavigationPhase> {
        let options = resolve(&self.document, request)?;
        self.navigate(options).await
    }

    // === Clicks ===

    /// Route a pointer activation on an attached link.
    pub async fn click(&self, link: &AttachedLink, click: Click) -> Result<ClickOutcome> {
        match disposition(&click, &link.options.url, &self.document.location()) {
            ClickDisposition::Native => Ok(ClickOutcome::Native),
            ClickDisposition::AlreadyHere => Ok(ClickOutcome::AlreadyHere),
            ClickDisposition::Navigate => {
                let phase = self.navigate(link.options.clone()).await?;
                Ok(ClickOutcome::Completed(phase))
            }
        }
    }

    // === The pipeline ===

    /// Run one navigation to a terminal phase. Transport failures are
    /// reported through the `complete`/`error` events and the returned
    /// phase, never as an `Err`.
    pub async fn navigate(&self, options: NavigationOptions) -> Result<NavigationPhase> {
        let mut navigation = Navigation::new();
        navigation.transition_to(NavigationPhase::Sending)?;

        options
            .container
            .emit(LifecycleEvent::BeforeSend, &options.event_data());

        let params = RequestParams {
            data: options.data.clone(),
            headers: options.headers.clone(),
            credentials: options.credentials,
            timeout: options.timeout,
        };

        let body = match self.transport.send(&options.url, params).await {
            Ok(body) => body,
            Err(error) => {
                tracing::warn!(
                    navigation_id = %navigation.id,
                    url = %options.url,
                    %error,
                    "Navigation failed"
                );
                navigation.transition_to(NavigationPhase::Failed)?;

                let data = options.event_data();
                options.container.emit(LifecycleEvent::Complete, &data);
                options.container.emit(LifecycleEvent::Error, &data);

                return Ok(NavigationPhase::Failed);
            }
        };

        // The application turns the body into page changes and hands back
        // the options the rest of the pipeline runs with.
        let options = (options.update_content.clone())(&body, options);

        if options.record_history {
            let mut history = self.history.write();

            if self.session.lock().take_first_navigation() {
                // The browser never created an entry describing the page
                // the session started on; capture it before leaving, so
                // backing out of the destination lands somewhere valid.
                history.replace_state(
                    HistoryState {
                        url: self.document.location().to_string(),
                        container_id: options.container.id().to_string(),
                        title: self.document.title(),
                    },
                    self.document.title(),
                );
            }

            let title = options.title.clone().unwrap_or_default();
            history.push_state(
                HistoryState {
                    url: options.url.to_string(),
                    container_id: options.container.id().to_string(),
                    title: title.clone(),
                },
                title,
                options.url.to_string(),
            );
            drop(history);

            // Pushing moves the visible address without a reload.
            self.document.set_location(options.url.clone());
        }

        if options.parse_links_on_load {
            // Swapped-in content becomes navigable too. A scan failure is
            // not a navigation failure; the content is already in place.
            if let Err(error) = self.parse_links(&options.container.html(), options.to_request()) {
                tracing::warn!(%error, "Rescan of swapped content failed");
            }
        }

        navigation.transition_to(NavigationPhase::Succeeded)?;

        let data = options.event_data();
        options.container.emit(LifecycleEvent::Complete, &data);
        options.container.emit(LifecycleEvent::Success, &data);

        if options.auto_analytics && options.record_history {
            if let Some(analytics) = &self.analytics {
                analytics.page_view(options.url.as_str(), options.title.as_deref());
            }
        }

        if let Some(title) = &options.title {
            self.document.set_title(title.clone());
        }

        if options.return_to_top {
            self.document.scroll_to(0.0, 0.0);
        }

        Ok(NavigationPhase::Succeeded)
    }

    // === The history bridge ===

    /// Replay a back/forward notification. An entry without state
    /// predates the engine: native behavior applies and nothing runs.
    /// Everything else becomes a fresh navigation with history recording
    /// forced off.
    pub async fn handle_pop(&self, event: PopEvent) -> Result<Option<NavigationPhase>> {
        let Some(state) = event.state else {
            tracing::debug!(url = %event.url, "History entry carries no state; leaving it native");
            return Ok(None);
        };

        // Remembered connect options fill the gaps; state-derived fields
        // win wherever they overlap.
        let mut request = self.session.lock().remembered().unwrap_or_default();
        request.url = Some(state.url);
        request.container = Some(ContainerRef::Id(state.container_id));
        request.title = Some(state.title);
        // Replaying must never re-push history.
        request.record_history = Some(false);

        let options = match resolve(&self.document, request) {
            Ok(options) => options,
            Err(error) => {
                tracing::warn!(%error, "Discarding unreplayable history state");
                return Ok(None);
            }
        };

        Ok(Some(self.navigate(options).await?))
    }

    /// Traverse one entry back and replay it.
    pub async fn back(&self) -> Result<Option<NavigationPhase>> {
        let pop = self.history.write().back();
        self.traverse(pop).await
    }

    /// Traverse one entry forward and replay it.
    pub async fn forward(&self) -> Result<Option<NavigationPhase>> {
        let pop = self.history.write().forward();
        self.traverse(pop).await
    }

    async fn traverse(&self, pop: Option<PopEvent>) -> Result<Option<NavigationPhase>> {
        let Some(pop) = pop else {
            return Ok(None);
        };

        // The traversal itself moves the visible address, exactly as a
        // browser does before announcing the pop.
        self.document.set_location(Url::parse(&pop.url)?);
        self.handle_pop(pop).await
    }
}
