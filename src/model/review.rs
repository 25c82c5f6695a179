//! Pull request reviews, as returned by the review lookup.

use jiff::Timestamp;

pub const APPROVED: &str = "APPROVED";
pub const CHANGES_REQUESTED: &str = "CHANGES_REQUESTED";
pub const COMMENTED: &str = "COMMENTED";
pub const DISMISSED: &str = "DISMISSED";

/// A review left on a pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    /// Login of the reviewer.
    pub login: String,

    /// Raw review state (`APPROVED`, `CHANGES_REQUESTED`, `COMMENTED`, ...).
    /// Kept as a string: review selection orders by it lexicographically.
    pub state: String,

    /// `None` for pending reviews.
    pub submitted_at: Option<Timestamp>,
}

impl Review {
    /// Whether this review carries a ship/request signal.
    pub fn is_verdict(&self) -> bool {
        self.state != COMMENTED && self.state != DISMISSED
    }
}
