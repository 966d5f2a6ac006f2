//! Breadth-first crawl frontier
//!
//! Entries are served strictly first-in first-out. Because every child is
//! enqueued one level below its parent, all entries of depth `d` leave the
//! queue before any entry of depth `d + 1`.

use std::collections::VecDeque;
use std::fmt;

/// A title waiting to be fetched, tagged with its discovery depth
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierEntry {
    /// Number of expansion hops from the seed
    pub depth: u32,

    /// Page title
    pub title: String,
}

impl FrontierEntry {
    pub fn new(depth: u32, title: impl Into<String>) -> Self {
        Self {
            depth,
            title: title.into(),
        }
    }
}

impl fmt::Display for FrontierEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.depth, self.title)
    }
}

/// FIFO queue of pages awaiting expansion
#[derive(Debug, Default)]
pub struct Frontier {
    queue: VecDeque<FrontierEntry>,
    enqueued: usize,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry at the back of the queue
    pub fn push(&mut self, entry: FrontierEntry) {
        self.enqueued += 1;
        self.queue.push_back(entry);
    }

    /// The entry that will be served next
    pub fn head(&self) -> Option<&FrontierEntry> {
        self.queue.front()
    }

    /// Pops the head if its depth is below `max_depth`
    ///
    /// Returns `None` when the queue is empty or the head has reached the
    /// depth bound. Only the head is inspected: deeper entries are left in
    /// the queue unexpanded.
    pub fn pop_expandable(&mut self, max_depth: u32) -> Option<FrontierEntry> {
        match self.queue.front() {
            Some(head) if head.depth < max_depth => self.queue.pop_front(),
            _ => None,
        }
    }

    /// Entries still waiting
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Total number of entries ever pushed
    pub fn total_enqueued(&self) -> usize {
        self.enqueued
    }

    /// Consumes the frontier, returning the entries never expanded
    pub fn into_remaining(self) -> Vec<FrontierEntry> {
        self.queue.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_order() {
        let mut frontier = Frontier::new();
        frontier.push(FrontierEntry::new(0, "Seed"));
        frontier.push(FrontierEntry::new(1, "A"));
        frontier.push(FrontierEntry::new(1, "B"));

        assert_eq!(frontier.pop_expandable(2).unwrap().title, "Seed");
        assert_eq!(frontier.pop_expandable(2).unwrap().title, "A");
        assert_eq!(frontier.pop_expandable(2).unwrap().title, "B");
        assert!(frontier.pop_expandable(2).is_none());
    }

    #[test]
    fn test_stops_at_depth_bound_without_draining() {
        let mut frontier = Frontier::new();
        frontier.push(FrontierEntry::new(1, "A"));
        frontier.push(FrontierEntry::new(2, "C"));
        frontier.push(FrontierEntry::new(2, "D"));

        assert_eq!(frontier.pop_expandable(2).unwrap().title, "A");
        assert!(frontier.pop_expandable(2).is_none());
        assert_eq!(frontier.len(), 2);
        assert_eq!(frontier.head().unwrap().title, "C");
    }

    #[test]
    fn test_total_enqueued_counts_pushes() {
        let mut frontier = Frontier::new();
        frontier.push(FrontierEntry::new(0, "Seed"));
        frontier.pop_expandable(1);
        frontier.push(FrontierEntry::new(1, "A"));

        assert_eq!(frontier.total_enqueued(), 2);
        assert_eq!(frontier.into_remaining(), vec![FrontierEntry::new(1, "A")]);
    }

    #[test]
    fn test_display() {
        assert_eq!(FrontierEntry::new(1, "Data Lake").to_string(), "1 Data Lake");
    }
}
