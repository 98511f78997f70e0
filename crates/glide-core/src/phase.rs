//! Navigation state machine
//!
//! ```text
//! Idle
//!   ↓ beforeSend + request
//! Sending
//!   ↓ response            ↓ transport error / unusable body
//! Succeeded              Failed
//! ```
//!
//! Both end states are terminal: no retry, no backward transition.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;
use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavigationPhase {
    /// Created, nothing sent yet
    Idle,
    /// Request in flight
    Sending,
    /// Content swapped, events fired
    Succeeded,
    /// Transport failed; page and history untouched
    Failed,
}

impl NavigationPhase {
    /// Check if transition to another phase is valid
    pub fn can_transition_to(&self, target: NavigationPhase) -> bool {
        matches!(
            (self, target),
            (NavigationPhase::Idle, NavigationPhase::Sending)
                | (NavigationPhase::Sending, NavigationPhase::Succeeded)
                | (NavigationPhase::Sending, NavigationPhase::Failed)
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, NavigationPhase::Succeeded | NavigationPhase::Failed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NavigationPhase::Idle => "idle",
            NavigationPhase::Sending => "sending",
            NavigationPhase::Succeeded => "succeeded",
            NavigationPhase::Failed => "failed",
        }
    }
}

impl std::fmt::Display for NavigationPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One in-flight navigation. Options are owned exclusively by it; nothing
/// is shared with a concurrently running navigation.
#[derive(Debug)]
pub struct Navigation {
    /// Correlates the log lines of one navigation
    pub id: String,
    pub phase: NavigationPhase,
}

impl Navigation {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            phase: NavigationPhase::Idle,
        }
    }

    /// Attempt to transition to a new phase
    pub fn transition_to(&mut self, next: NavigationPhase) -> Result<()> {
        if !self.phase.can_transition_to(next) {
            return Err(CoreError::InvalidTransition {
                from: self.phase.to_string(),
                to: next.to_string(),
            });
        }

        tracing::debug!(
            navigation_id = %self.id,
            from = %self.phase,
            to = %next,
            "Navigation phase transition"
        );

        self.phase = next;
        Ok(())
    }
}

impl Default for Navigation {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_transitions() {
        assert!(NavigationPhase::Idle.can_transition_to(NavigationPhase::Sending));
        assert!(NavigationPhase::Sending.can_transition_to(NavigationPhase::Succeeded));
        assert!(NavigationPhase::Sending.can_transition_to(NavigationPhase::Failed));
    }

    #[test]
    fn test_terminal_states_have_no_exit() {
        for terminal in [NavigationPhase::Succeeded, NavigationPhase::Failed] {
            assert!(terminal.is_terminal());
            for target in [
                NavigationPhase::Idle,
                NavigationPhase::Sending,
                NavigationPhase::Succeeded,
                NavigationPhase::Failed,
            ] {
                assert!(!terminal.can_transition_to(target));
            }
        }
    }

    #[test]
    fn test_no_retry_from_failed() {
        let mut navigation = Navigation::new();
        navigation.transition_to(NavigationPhase::Sending).unwrap();
        navigation.transition_to(NavigationPhase::Failed).unwrap();
        assert!(navigation.transition_to(NavigationPhase::Sending).is_err());
    }
}
