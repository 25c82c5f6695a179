//! Event classification: turning admitted feed events into status items.
//!
//! Each reportable event kind has a handler that applies at most one
//! mutation to the store. The handlers cooperate through the store:
//!
//! - a push is a ship, unless something already covers its commit;
//! - a closed PR is a ship, and supersedes the push of its merge commit;
//! - an opened PR is reported unless it already shipped;
//! - a review is reported once per pull request text.
//!
//! The feed is newest-first, so a merge usually arrives before its push.
//! Both arrival orders end with a single ship carrying the PR number.

use tracing::debug;

use crate::feed::{ActivityFeed, FeedError};
use crate::model::{
    APPROVED, CHANGES_REQUESTED, Event, EventKind, EventPayload, PullRequest, Push, Review,
    StatusAction, StatusItem, Window,
};
use crate::store::StatusStore;

/// Allow-lists deciding which events are worth reporting.
#[derive(Debug, Clone, Default)]
pub struct Rules {
    repos: Vec<String>,
    branches: Vec<String>,
    repo_prefixes: Vec<String>,
}

impl Rules {
    pub fn new(repos: Vec<String>, branches: Vec<String>, repo_prefixes: Vec<String>) -> Self {
        Self {
            repos,
            branches,
            repo_prefixes,
        }
    }

    /// Whether any repo pattern occurs in the full `owner/name`.
    pub fn includes_repo(&self, full_name: &str) -> bool {
        self.repos.iter().any(|p| full_name.contains(p.as_str()))
    }

    pub fn tracks_branch(&self, branch: &str) -> bool {
        self.branches.iter().any(|b| b == branch)
    }

    /// Repository name for display, with the first matching prefix stripped.
    pub fn display_name<'a>(&self, name: &'a str) -> &'a str {
        self.repo_prefixes
            .iter()
            .find_map(|p| name.strip_prefix(p.as_str()))
            .filter(|rest| !rest.is_empty())
            .unwrap_or(name)
    }
}

/// What classifying one event did to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Not reportable: wrong kind, repo, branch, or no qualifying review.
    Ignored,
    Added,
    /// Added, after removing the push item it supersedes.
    Replaced,
    /// Reportable, but already covered by an existing item.
    Suppressed,
}

/// Classifies events for one user and window.
pub struct Classifier<'a> {
    rules: &'a Rules,
    username: &'a str,
    window: &'a Window,
}

impl<'a> Classifier<'a> {
    pub fn new(rules: &'a Rules, username: &'a str, window: &'a Window) -> Self {
        Self {
            rules,
            username,
            window,
        }
    }

    pub fn window(&self) -> &Window {
        self.window
    }

    /// Classify one admitted event into the store.
    ///
    /// Review events look up the pull request's reviews through `feed`;
    /// a failed lookup is the only error.
    pub fn classify<F: ActivityFeed + ?Sized>(
        &self,
        event: &Event,
        feed: &mut F,
        store: &mut StatusStore,
    ) -> Result<Outcome, FeedError> {
        let Some(kind) = event.kind() else {
            return Ok(Outcome::Ignored);
        };
        if !self.rules.includes_repo(&event.repo) {
            debug!(repo = %event.repo, "repository not in status-repos");
            return Ok(Outcome::Ignored);
        }

        let repo = self.rules.display_name(event.repo_name());
        let outcome = match &event.payload {
            EventPayload::Push(push) => self.push(repo, push, store),
            EventPayload::PullRequestOpened(pr) => self.opened(repo, pr, store),
            EventPayload::PullRequestClosed(pr) => self.closed(repo, pr, store),
            EventPayload::ReviewSubmitted(pr) => self.reviewed(event, repo, pr, feed, store)?,
            EventPayload::Other(_) => Outcome::Ignored,
        };

        debug!(?kind, repo = %event.repo, ?outcome, "classified event");
        Ok(outcome)
    }

    fn push(&self, repo: &str, push: &Push, store: &mut StatusStore) -> Outcome {
        // Multi-commit pushes are merges (reported by their PR) or rebases.
        if !self.rules.tracks_branch(&push.branch) || push.commit_count != 1 {
            return Outcome::Ignored;
        }
        if store.references_revision(&push.head) {
            return Outcome::Suppressed;
        }

        let item = StatusItem {
            action: StatusAction::Ship,
            repo: repo.to_string(),
            text: format!("[{repo}] {}", push.message),
            revision: Some(push.head.clone()),
            number: None,
            event_kind: EventKind::Push,
        };
        added(store.insert(item))
    }

    fn opened(&self, repo: &str, pr: &PullRequest, store: &mut StatusStore) -> Outcome {
        let text = pull_request_text(repo, pr);
        if store.has_ship_with_text(&text) {
            return Outcome::Suppressed;
        }

        let item = StatusItem {
            action: StatusAction::OpenPullRequest,
            repo: repo.to_string(),
            text,
            revision: None,
            number: Some(pr.number),
            event_kind: EventKind::PullRequestOpened,
        };
        added(store.insert(item))
    }

    fn closed(&self, repo: &str, pr: &PullRequest, store: &mut StatusStore) -> Outcome {
        let removed = pr
            .merge_commit_sha
            .as_deref()
            .map_or(0, |sha| store.remove_ships_for_revision(sha));

        let item = StatusItem {
            action: StatusAction::Ship,
            repo: repo.to_string(),
            text: pull_request_text(repo, pr),
            revision: pr.merge_commit_sha.clone(),
            number: Some(pr.number),
            event_kind: EventKind::PullRequestClosed,
        };
        match (store.insert(item), removed) {
            (false, _) => Outcome::Suppressed,
            (true, 0) => Outcome::Added,
            (true, _) => Outcome::Replaced,
        }
    }

    fn reviewed<F: ActivityFeed + ?Sized>(
        &self,
        event: &Event,
        repo: &str,
        pr: &PullRequest,
        feed: &mut F,
        store: &mut StatusStore,
    ) -> Result<Outcome, FeedError> {
        let day = self.window.day_of(event.created_at);
        let own: Vec<Review> = feed
            .reviews(&event.repo, pr.number)?
            .into_iter()
            .filter(|r| {
                r.login.eq_ignore_ascii_case(self.username)
                    && r.submitted_at.is_some_and(|at| self.window.day_of(at) == day)
                    && r.is_verdict()
            })
            .collect();

        let Some(review) = pick_review(own) else {
            return Ok(Outcome::Ignored);
        };
        let action = match review.state.as_str() {
            APPROVED => StatusAction::ReviewApproved,
            CHANGES_REQUESTED => StatusAction::ReviewChangesRequested,
            state => {
                debug!(
                    repo = %event.repo,
                    number = pr.number,
                    state,
                    "review state not reported"
                );
                return Ok(Outcome::Ignored);
            }
        };

        let item = StatusItem {
            action,
            repo: repo.to_string(),
            text: pull_request_text(repo, pr),
            revision: None,
            number: Some(pr.number),
            event_kind: EventKind::ReviewSubmitted,
        };
        Ok(added(store.insert(item)))
    }
}

/// Choose the one review to report: reverse, then stable-sort by state.
///
/// The composition has no deeper meaning than "some deterministic single
/// review"; keep it as is.
fn pick_review(mut reviews: Vec<Review>) -> Option<Review> {
    reviews.reverse();
    reviews.sort_by(|a, b| a.state.cmp(&b.state));
    reviews.into_iter().next()
}

fn pull_request_text(repo: &str, pr: &PullRequest) -> String {
    format!("[{repo}] {} <{}| #{}>", pr.title, pr.url, pr.number)
}

fn added(inserted: bool) -> Outcome {
    if inserted {
        Outcome::Added
    } else {
        Outcome::Suppressed
    }
}
