use crate::state::PageState;
use crate::WikinetError;
use std::collections::HashMap;

/// Tracks every title a crawl has enqueued, together with its state
///
/// A title present in the set has been seen: it is either pending in the
/// frontier or its fetch was attempted. Entries are never removed, so a title
/// can be admitted to the frontier at most once per crawl.
#[derive(Debug, Clone, Default)]
pub struct VisitedSet {
    states: HashMap<String, PageState>,
}

impl VisitedSet {
    /// Creates an empty visited set
    pub fn new() -> Self {
        Self {
            states: HashMap::new(),
        }
    }

    /// Marks a title as seen
    ///
    /// Returns `true` if the title was new and is now `Pending`, `false` if it
    /// had already been seen (the caller must not enqueue it again).
    pub fn mark_seen(&mut self, title: &str) -> bool {
        if self.states.contains_key(title) {
            return false;
        }
        self.states.insert(title.to_string(), PageState::Pending);
        true
    }

    /// Returns true if the title was ever enqueued
    pub fn contains(&self, title: &str) -> bool {
        self.states.contains_key(title)
    }

    /// Returns the current state of a title, if seen
    pub fn state(&self, title: &str) -> Option<PageState> {
        self.states.get(title).copied()
    }

    /// Moves a seen title to its next state
    pub fn transition(&mut self, title: &str, next: PageState) -> Result<(), WikinetError> {
        let current = self
            .states
            .get_mut(title)
            .ok_or_else(|| WikinetError::InvalidTransition {
                title: title.to_string(),
                from: PageState::Pending,
                to: next,
            })?;

        if !current.can_transition_to(next) {
            return Err(WikinetError::InvalidTransition {
                title: title.to_string(),
                from: *current,
                to: next,
            });
        }

        *current = next;
        Ok(())
    }

    /// Number of titles in the given state
    pub fn count(&self, state: PageState) -> usize {
        self.states.values().filter(|s| **s == state).count()
    }

    /// Total number of titles ever seen
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}
