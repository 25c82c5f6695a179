//! Activity events: one entry of the user's feed, decoded into the kinds
//! the digest knows how to report on.

use jiff::Timestamp;

/// A single entry from the activity feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub created_at: Timestamp,

    /// Full repository name, `owner/name`.
    pub repo: String,

    pub payload: EventPayload,
}

/// The event kinds the digest reports on.
///
/// Also recorded on every status item, since dedup matches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Push,
    PullRequestOpened,
    PullRequestClosed,
    ReviewSubmitted,
}

/// Kind-specific event data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventPayload {
    Push(Push),
    PullRequestOpened(PullRequest),
    PullRequestClosed(PullRequest),

    /// A review (or review comment) on a pull request.
    /// Carries the pull request it was left on.
    ReviewSubmitted(PullRequest),

    /// Anything else in the feed, by its wire type name.
    Other(String),
}

/// Commits pushed to a branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Push {
    /// Sha of the branch head after the push.
    pub head: String,

    /// Last path segment of the pushed ref (`refs/heads/master` → `master`).
    pub branch: String,

    pub commit_count: u64,

    /// First line of the first commit's message.
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequest {
    pub number: u64,
    pub title: String,
    pub url: String,

    /// Only meaningful on close events. GitHub sends `null` for some closes.
    pub merge_commit_sha: Option<String>,
}

impl Event {
    /// The reportable kind of this event, or `None` for ignored kinds.
    pub fn kind(&self) -> Option<EventKind> {
        match self.payload {
            EventPayload::Push(_) => Some(EventKind::Push),
            EventPayload::PullRequestOpened(_) => Some(EventKind::PullRequestOpened),
            EventPayload::PullRequestClosed(_) => Some(EventKind::PullRequestClosed),
            EventPayload::ReviewSubmitted(_) => Some(EventKind::ReviewSubmitted),
            EventPayload::Other(_) => None,
        }
    }

    /// Repository name without the owner.
    pub fn repo_name(&self) -> &str {
        self.repo
            .split_once('/')
            .map_or(self.repo.as_str(), |(_, name)| name)
    }
}
