//! Analytics seam
//!
//! An injected integration replaces the original's sniffing for global
//! tracker objects. Absent integration means the ping is skipped; it is
//! never required and never fails a navigation.

/// A page-view sink. Called after a successful, history-recorded
/// navigation when `auto_analytics` is on.
pub trait Analytics: Send + Sync {
    fn page_view(&self, url: &str, title: Option<&str>);
}
