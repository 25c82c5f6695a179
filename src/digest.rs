//! The digest pass: scan the feed page by page, gate each event on the
//! window, and classify what is admitted.
//!
//! Strictly sequential. The next page is fetched only after the current one
//! is fully classified, and the first event older than the window ends the
//! scan without fetching anything further.

use tracing::{debug, info};

use crate::classify::{Classifier, Outcome};
use crate::feed::{ActivityFeed, FeedError};
use crate::gate::{self, Verdict};
use crate::store::StatusStore;

/// Reduce the feed to status items for the classifier's window.
pub fn collect<F: ActivityFeed + ?Sized>(
    feed: &mut F,
    classifier: &Classifier<'_>,
) -> Result<StatusStore, FeedError> {
    let mut store = StatusStore::new();
    let mut pages = 0;
    let mut admitted = 0;

    'pages: while let Some(events) = feed.next_page()? {
        pages += 1;
        for event in &events {
            match gate::verdict(event.created_at, classifier.window()) {
                Verdict::Skip => {}
                Verdict::Stop => {
                    debug!(
                        page = pages,
                        created_at = %event.created_at,
                        "reached events before the window"
                    );
                    break 'pages;
                }
                Verdict::Admit => {
                    admitted += 1;
                    if classifier.classify(event, feed, &mut store)? == Outcome::Ignored {
                        debug!(repo = %event.repo, "event ignored");
                    }
                }
            }
        }
    }

    info!(pages, admitted, items = store.len(), "scanned activity feed");
    Ok(store)
}
