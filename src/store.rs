//! The status store: status items in arrival order, with the dedup rules.
//!
//! No two items share `(event_kind, text)`. The same logical event can
//! surface more than once in the feed, so [`StatusStore::insert`] drops
//! duplicates instead of failing.

use crate::model::{EventKind, StatusAction, StatusItem};

#[derive(Debug, Default)]
pub struct StatusStore {
    items: Vec<StatusItem>,
}

impl StatusStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an item unless one with the same `(event_kind, text)` exists.
    ///
    /// Returns whether the item was added.
    pub fn insert(&mut self, item: StatusItem) -> bool {
        if self.contains(item.event_kind, &item.text) {
            return false;
        }
        self.items.push(item);
        true
    }

    pub fn contains(&self, event_kind: EventKind, text: &str) -> bool {
        self.items
            .iter()
            .any(|i| i.event_kind == event_kind && i.text == text)
    }

    /// Whether any item stands for the given commit.
    pub fn references_revision(&self, revision: &str) -> bool {
        self.items
            .iter()
            .any(|i| i.revision.as_deref() == Some(revision))
    }

    /// Whether a ship item with exactly this text exists.
    pub fn has_ship_with_text(&self, text: &str) -> bool {
        self.items
            .iter()
            .any(|i| i.action == StatusAction::Ship && i.text == text)
    }

    /// Removes every ship item for the given commit, returning how many went.
    pub fn remove_ships_for_revision(&mut self, revision: &str) -> usize {
        let before = self.items.len();
        self.items.retain(|i| {
            !(i.action == StatusAction::Ship && i.revision.as_deref() == Some(revision))
        });
        before - self.items.len()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[cfg(test)]
    pub fn items(&self) -> &[StatusItem] {
        &self.items
    }

    /// Finalize the store for rendering.
    pub fn freeze(self) -> Vec<StatusItem> {
        self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ship(text: &str, revision: &str, kind: EventKind) -> StatusItem {
        StatusItem {
            action: StatusAction::Ship,
            repo: "widgets".to_string(),
            text: text.to_string(),
            revision: Some(revision.to_string()),
            number: None,
            event_kind: kind,
        }
    }

    #[test]
    fn insert_drops_same_kind_and_text() {
        let mut store = StatusStore::new();
        assert!(store.insert(ship("[widgets] a", "aaa", EventKind::Push)));
        assert!(!store.insert(ship("[widgets] a", "bbb", EventKind::Push)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn same_text_from_different_kinds_is_kept() {
        let mut store = StatusStore::new();
        assert!(store.insert(ship("[widgets] a", "aaa", EventKind::Push)));
        assert!(store.insert(ship("[widgets] a", "aaa", EventKind::PullRequestClosed)));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn removes_only_ships_for_revision() {
        let mut store = StatusStore::new();
        store.insert(ship("[widgets] a", "aaa", EventKind::Push));
        store.insert(ship("[widgets] b", "bbb", EventKind::Push));

        assert_eq!(store.remove_ships_for_revision("aaa"), 1);
        assert_eq!(store.remove_ships_for_revision("zzz"), 0);
        assert_eq!(store.items().len(), 1);
        assert_eq!(store.items()[0].text, "[widgets] b");
    }

    #[test]
    fn revision_and_text_lookups() {
        let mut store = StatusStore::new();
        store.insert(ship("[widgets] a", "aaa", EventKind::Push));

        assert!(store.references_revision("aaa"));
        assert!(!store.references_revision("bbb"));
        assert!(store.has_ship_with_text("[widgets] a"));
        assert!(!store.has_ship_with_text("[widgets] b"));
        assert!(!store.is_empty());
    }
}
