//! Core data model for standup.
//!
//! Events come in from the activity feed, status items go out to the
//! report. The window decides which events count.

mod event;
mod review;
mod status;
mod window;

pub use event::{Event, EventKind, EventPayload, PullRequest, Push};
pub use review::{APPROVED, CHANGES_REQUESTED, Review};
pub use status::{StatusAction, StatusItem};
pub use window::Window;
