/// Page state definitions for tracking crawl progress
///
/// A title moves `Pending → Fetching → Done | Failed` exactly once.
use std::fmt;

/// Represents the current state of a title in the crawl process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageState {
    /// Title is in the frontier and has not been fetched yet
    Pending,

    /// Title's links are being requested from the provider
    Fetching,

    /// Links were fetched, edges recorded and children enqueued
    Done,

    /// The provider could not produce the page; never retried
    Failed,
}

impl PageState {
    /// Checks whether moving to `next` is a legal transition
    pub fn can_transition_to(&self, next: PageState) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Fetching)
                | (Self::Fetching, Self::Done)
                | (Self::Fetching, Self::Failed)
        )
    }

    /// Short lowercase label used in logs and reports
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Fetching => "fetching",
            Self::Done => "done",
            Self::Failed => "failed",
        }
    }

    /// Returns all possible page states
    pub fn all_states() -> [Self; 4] {
        [Self::Pending, Self::Fetching, Self::Done, Self::Failed]
    }
}

impl fmt::Display for PageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
