//! History stack
//!
//! Mirrors browser semantics: a linear list of entries with a cursor,
//! pushes truncate the forward branch, replace rewrites the current entry
//! in place, and traversal never mutates entry contents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// State object attached to an entry. Every state pushed by the engine
/// must replay into a valid navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryState {
    pub url: String,
    pub container_id: String,
    pub title: String,
}

/// One record in the session history.
///
/// The very first page the user lands on is seeded with `state: None`;
/// it gains a state retroactively when the first recorded navigation
/// replaces it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub url: String,
    pub title: String,
    pub state: Option<HistoryState>,
    pub visited_at: DateTime<Utc>,
}

/// What a back/forward traversal yields. `state: None` means the entry
/// predates the engine and native behavior applies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopEvent {
    pub url: String,
    pub state: Option<HistoryState>,
}

#[derive(Debug, Clone)]
pub struct HistoryStack {
    entries: Vec<HistoryEntry>,
    current: usize,
}

impl HistoryStack {
    /// Seed the stack with the page the session started on. That entry
    /// carries no state until the engine retroactively replaces it.
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            entries: vec![HistoryEntry {
                url: url.into(),
                title: title.into(),
                state: None,
                visited_at: Utc::now(),
            }],
            current: 0,
        }
    }

    /// Append an entry after the cursor, dropping any forward branch,
    /// and move the cursor onto it.
    pub fn push_state(
        &mut self,
        state: HistoryState,
        title: impl Into<String>,
        url: impl Into<String>,
    ) {
        let url = url.into();
        self.entries.truncate(self.current + 1);
        self.entries.push(HistoryEntry {
            url: url.clone(),
            title: title.into(),
            state: Some(state),
            visited_at: Utc::now(),
        });
        self.current = self.entries.len() - 1;

        tracing::debug!(url = %url, depth = self.entries.len(), "Pushed history entry");
    }

    /// Rewrite the current entry's state and title in place. The stack
    /// length and the entry's url are unchanged.
    pub fn replace_state(&mut self, state: HistoryState, title: impl Into<String>) {
        let entry = &mut self.entries[self.current];
        entry.state = Some(state);
        entry.title = title.into();

        tracing::debug!(url = %entry.url, "Replaced history entry state");
    }

    pub fn back(&mut self) -> Option<PopEvent> {
        if self.current == 0 {
            return None;
        }
        self.current -= 1;
        Some(self.pop_event())
    }

    pub fn forward(&mut self) -> Option<PopEvent> {
        if self.current + 1 >= self.entries.len() {
            return None;
        }
        self.current += 1;
        Some(self.pop_event())
    }

    pub fn current(&self) -> &HistoryEntry {
        &self.entries[self.current]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn can_go_back(&self) -> bool {
        self.current > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.current + 1 < self.entries.len()
    }

    fn pop_event(&self) -> PopEvent {
        let entry = &self.entries[self.current];
        PopEvent {
            url: entry.url.clone(),
            state: entry.state.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(url: &str) -> HistoryState {
        HistoryState {
            url: url.to_string(),
            container_id: "main".to_string(),
            title: format!("Title of {}", url),
        }
    }

    #[test]
    fn test_seed_entry_has_no_state() {
        let stack = HistoryStack::new("https://example.com/", "Home");
        assert_eq!(stack.len(), 1);
        assert!(stack.current().state.is_none());
        assert!(!stack.can_go_back());
    }

    #[test]
    fn test_first_navigation_replaces_then_pushes() {
        let mut stack = HistoryStack::new("https://example.com/", "Home");

        // Retroactive capture of the current page, then the destination.
        stack.replace_state(state("https://example.com/"), "Home");
        stack.push_state(state("https://example.com/page2"), "Page 2", "https://example.com/page2");

        assert_eq!(stack.len(), 2);
        assert_eq!(stack.current().url, "https://example.com/page2");

        let pop = stack.back().unwrap();
        assert_eq!(pop.url, "https://example.com/");
        assert_eq!(pop.state.unwrap().url, "https://example.com/");
    }

    #[test]
    fn test_replace_keeps_length_and_url() {
        let mut stack = HistoryStack::new("https://example.com/", "Home");
        stack.replace_state(state("https://example.com/"), "Home again");

        assert_eq!(stack.len(), 1);
        assert_eq!(stack.current().url, "https://example.com/");
        assert_eq!(stack.current().title, "Home again");
    }

    #[test]
    fn test_push_truncates_forward_branch() {
        let mut stack = HistoryStack::new("https://example.com/", "Home");
        stack.push_state(state("https://example.com/a"), "A", "https://example.com/a");
        stack.push_state(state("https://example.com/b"), "B", "https://example.com/b");

        stack.back().unwrap();
        assert!(stack.can_go_forward());

        stack.push_state(state("https://example.com/c"), "C", "https://example.com/c");
        assert_eq!(stack.len(), 3);
        assert!(!stack.can_go_forward());
        assert_eq!(stack.current().url, "https://example.com/c");
    }

    #[test]
    fn test_traversal_at_boundaries() {
        let mut stack = HistoryStack::new("https://example.com/", "Home");
        assert!(stack.back().is_none());
        assert!(stack.forward().is_none());

        stack.push_state(state("https://example.com/a"), "A", "https://example.com/a");
        assert!(stack.back().is_some());
        assert!(stack.back().is_none());
        assert!(stack.forward().is_some());
        assert!(stack.forward().is_none());
    }

    #[test]
    fn test_state_serde_round_trip() {
        let original = state("https://example.com/page");
        let json = serde_json::to_string(&original).unwrap();
        let restored: HistoryState = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, original);

        // Field names match what a browser would serialise.
        assert!(json.contains("\"containerId\""));
    }
}
