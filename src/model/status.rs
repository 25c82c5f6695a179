//! Status items: the deduplicated lines of the final report.

use super::EventKind;

/// What a status line says happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StatusAction {
    /// A commit landed on a tracked branch, directly or through a merged PR.
    Ship,
    OpenPullRequest,
    ReviewApproved,
    ReviewChangesRequested,
}

impl StatusAction {
    pub fn is_review(self) -> bool {
        matches!(self, Self::ReviewApproved | Self::ReviewChangesRequested)
    }
}

/// One user-facing line in the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusItem {
    pub action: StatusAction,

    /// Display name of the repository (owner dropped, prefixes stripped).
    pub repo: String,

    /// Pre-rendered line text, without glyphs.
    pub text: String,

    /// Commit this item stands for: a push head or a PR merge commit.
    pub revision: Option<String>,

    /// Pull request number, when the item came from a PR.
    pub number: Option<u64>,

    /// The event kind that produced this item.
    pub event_kind: EventKind,
}
