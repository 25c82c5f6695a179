//! Window gating for feed events.
//!
//! The activity feed is reverse-chronological, within and across pages.
//! That ordering is what makes [`Verdict::Stop`] sound: once one event falls
//! before the window, nothing later in the stream can fall inside it. A source
//! without that guarantee must treat `Stop` as `Skip` and scan to exhaustion.
//!
//! Events newer than the window only `Skip`. Fetch-time skew can interleave
//! them with in-window events, so they must not end the scan.

use jiff::Timestamp;

use crate::model::Window;

/// What to do with one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Inside the window: classify it.
    Admit,
    /// After the window: ignore it, keep scanning.
    Skip,
    /// Before the window: abandon this page and all later pages.
    Stop,
}

pub fn verdict(created_at: Timestamp, window: &Window) -> Verdict {
    let day = window.day_of(created_at);
    if day > window.until() {
        Verdict::Skip
    } else if day < window.from() {
        Verdict::Stop
    } else {
        Verdict::Admit
    }
}
