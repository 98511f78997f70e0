//! Lifecycle events dispatched on containers

use serde::{Deserialize, Serialize};

/// Events a container can emit over the course of a navigation.
///
/// Ordering guarantees are enforced by the navigator, not here:
/// `BeforeSend` precedes the request, `Complete` precedes exactly one of
/// `Success`/`Error`, and `Ready` fires once per page lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LifecycleEvent {
    /// Initial link scan finished
    Ready,
    /// About to issue the request
    BeforeSend,
    /// Navigation finished, outcome not yet known to listeners
    Complete,
    /// Navigation failed
    Error,
    /// Navigation succeeded
    Success,
}

impl LifecycleEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            LifecycleEvent::Ready => "ready",
            LifecycleEvent::BeforeSend => "beforeSend",
            LifecycleEvent::Complete => "complete",
            LifecycleEvent::Error => "error",
            LifecycleEvent::Success => "success",
        }
    }
}

impl std::fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for LifecycleEvent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ready" => Ok(LifecycleEvent::Ready),
            "beforeSend" => Ok(LifecycleEvent::BeforeSend),
            "complete" => Ok(LifecycleEvent::Complete),
            "error" => Ok(LifecycleEvent::Error),
            "success" => Ok(LifecycleEvent::Success),
            _ => Err(format!("Unknown lifecycle event: {}", s)),
        }
    }
}

/// Payload carried to listeners: the navigation the event belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventData {
    /// Target url, absent for `Ready` (no navigation in flight)
    pub url: Option<String>,
    /// Container the event was dispatched on
    pub container_id: String,
    /// Display title of the navigation, when one was set
    pub title: Option<String>,
}
