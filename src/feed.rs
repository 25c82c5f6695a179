//! The activity feed: where events and reviews come from.
//!
//! [`ActivityFeed`] is the seam between the digest and GitHub. The
//! production implementation shells out to `gh`; tests use in-memory feeds.

#[cfg(test)]
pub mod fake;
mod github;

pub use github::{GhFeed, authenticated_login};

use std::collections::HashMap;
use std::io;

use tracing::debug;

use crate::model::{Event, Review};

/// Errors from fetching or decoding feed data.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("failed to run gh: {0}")]
    Spawn(#[from] io::Error),

    #[error("gh {args} failed: {stderr}")]
    Command { args: String, stderr: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unexpected {kind} payload: {source}")]
    Payload {
        kind: String,
        source: serde_json::Error,
    },
}

pub type Result<T> = core::result::Result<T, FeedError>;

/// A reverse-chronological, paginated event stream plus review lookups.
///
/// Implementations must yield events most-recent-first, within and across
/// pages. The window gate's stop rule depends on it.
pub trait ActivityFeed {
    /// The next page of events, or `None` once the feed is exhausted.
    fn next_page(&mut self) -> Result<Option<Vec<Event>>>;

    /// All reviews on a pull request. `repo` is the full `owner/name`.
    fn reviews(&mut self, repo: &str, number: u64) -> Result<Vec<Review>>;
}

/// Memoizes review lookups per `(repo, number)`.
///
/// Several review events on one pull request cost a single fetch.
pub struct CachedReviews<F> {
    inner: F,
    cache: HashMap<(String, u64), Vec<Review>>,
}

impl<F: ActivityFeed> CachedReviews<F> {
    pub fn new(inner: F) -> Self {
        Self {
            inner,
            cache: HashMap::new(),
        }
    }
}

impl<F> CachedReviews<F> {
    #[cfg(test)]
    pub fn get_ref(&self) -> &F {
        &self.inner
    }
}

impl<F: ActivityFeed> ActivityFeed for CachedReviews<F> {
    fn next_page(&mut self) -> Result<Option<Vec<Event>>> {
        self.inner.next_page()
    }

    fn reviews(&mut self, repo: &str, number: u64) -> Result<Vec<Review>> {
        let key = (repo.to_string(), number);
        if let Some(reviews) = self.cache.get(&key) {
            debug!(repo, number, "review list cache hit");
            return Ok(reviews.clone());
        }
        let reviews = self.inner.reviews(repo, number)?;
        self.cache.insert(key, reviews.clone());
        Ok(reviews)
    }
}
