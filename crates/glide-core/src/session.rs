//! Session-scoped state
//!
//! The page-lifetime flags and the remembered connect options, held in
//! one explicit object instead of module globals. Everything here resets
//! only with a full page reload (a fresh navigator).

use glide_options::NavigationRequest;

#[derive(Debug)]
pub struct SessionState {
    first_scan: bool,
    first_navigation: bool,
    remembered: Option<NavigationRequest>,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            first_scan: true,
            first_navigation: true,
            remembered: None,
        }
    }

    /// True exactly once: gates the one-time `ready` event after the
    /// initial link scan.
    pub fn take_first_scan(&mut self) -> bool {
        std::mem::replace(&mut self.first_scan, false)
    }

    /// True exactly once: gates the retroactive history capture of the
    /// page the session started on.
    pub fn take_first_navigation(&mut self) -> bool {
        std::mem::replace(&mut self.first_navigation, false)
    }

    /// Remember connect-time options for merging into history replays.
    /// Title and the history toggle belong to individual navigations and
    /// are stripped.
    pub fn remember(&mut self, mut request: NavigationRequest) {
        request.title = None;
        request.record_history = None;
        self.remembered = Some(request);
    }

    pub fn remembered(&self) -> Option<NavigationRequest> {
        self.remembered.clone()
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
