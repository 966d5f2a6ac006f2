//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `PageState`: lifecycle of one title (pending, fetching, done, failed)
//! - `VisitedSet`: per-title states for a single crawl; decides what may be enqueued

mod page_state;
mod visited;

pub use page_state::PageState;
pub use visited::VisitedSet;
