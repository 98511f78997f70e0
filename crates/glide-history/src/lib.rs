//! Glide History
//!
//! An in-memory model of the browser session history: entries carrying
//! optional state objects, push/replace primitives, and back/forward
//! traversal yielding pop events for the history bridge to replay.

mod stack;

pub use stack::{HistoryEntry, HistoryStack, HistoryState, PopEvent};
