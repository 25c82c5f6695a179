//! The emoji table: candidate glyphs per status action and commit type.
//!
//! Resolved once at startup (defaults plus any `[glyphs]` overrides from the
//! config file) and passed by reference to the renderer.

use std::collections::BTreeMap;

use crate::model::StatusAction;

#[derive(Debug, thiserror::Error)]
pub enum GlyphError {
    #[error("unknown glyph key '{0}'")]
    UnknownKey(String),

    #[error("glyph list for '{0}' is empty")]
    Empty(String),

    #[error("'review' takes exactly one glyph, got {0}")]
    Review(usize),
}

/// Conventional commit types recognized in status text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CommitType {
    Chore,
    Docs,
    Feat,
    Fix,
    Perf,
    Refactor,
    Test,
}

impl CommitType {
    pub const ALL: [Self; 7] = [
        Self::Chore,
        Self::Docs,
        Self::Feat,
        Self::Fix,
        Self::Perf,
        Self::Refactor,
        Self::Test,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Chore => "chore",
            Self::Docs => "docs",
            Self::Feat => "feat",
            Self::Fix => "fix",
            Self::Perf => "perf",
            Self::Refactor => "refactor",
            Self::Test => "test",
        }
    }

    /// The leftmost tag in `text` written as `[type]` or `(type)`.
    ///
    /// Either bracket style may open or close the tag.
    pub fn find_in(text: &str) -> Option<Self> {
        text.char_indices()
            .filter(|&(_, c)| c == '[' || c == '(')
            .find_map(|(i, _)| {
                let rest = &text[i + 1..];
                Self::ALL.into_iter().find(|ty| {
                    rest.strip_prefix(ty.as_str())
                        .is_some_and(|after| after.starts_with(')') || after.starts_with(']'))
                })
            })
    }
}

/// Candidate glyphs for every decorated thing. Every list is non-empty.
#[derive(Debug, Clone)]
pub struct EmojiTable {
    review: String,
    actions: BTreeMap<StatusAction, Vec<String>>,
    tags: BTreeMap<CommitType, Vec<String>>,
}

impl Default for EmojiTable {
    fn default() -> Self {
        let list = |glyphs: &[&str]| -> Vec<String> {
            glyphs.iter().map(|g| (*g).to_string()).collect()
        };
        Self {
            review: ":eyes:".to_string(),
            actions: BTreeMap::from([
                (StatusAction::Ship, list(&[":ship:", ":shipit:"])),
                (StatusAction::OpenPullRequest, list(&[":pr:"])),
                (StatusAction::ReviewApproved, list(&[":github_approved:"])),
                (StatusAction::ReviewChangesRequested, list(&[":github_denied:"])),
            ]),
            tags: BTreeMap::from([
                (CommitType::Chore, list(&[":wrench:"])),
                (CommitType::Docs, list(&[":pencil:"])),
                (CommitType::Feat, list(&[":sparkles:"])),
                (CommitType::Fix, list(&[":bug:"])),
                (CommitType::Perf, list(&[":zap:"])),
                (CommitType::Refactor, list(&[":recycle:"])),
                (CommitType::Test, list(&[":white_check_mark:"])),
            ]),
        }
    }
}

impl EmojiTable {
    /// The default table with entries replaced by `overrides`.
    ///
    /// Keys: `review`, `ship`, `pr`, `approved`, `changes-requested`, or a
    /// commit type (`chore`, `docs`, `feat`, `fix`, `perf`, `refactor`, `test`).
    pub fn with_overrides(overrides: &BTreeMap<String, Vec<String>>) -> Result<Self, GlyphError> {
        let mut table = Self::default();

        for (key, glyphs) in overrides {
            if glyphs.is_empty() {
                return Err(GlyphError::Empty(key.clone()));
            }
            let action = match key.as_str() {
                "review" => {
                    let [glyph] = glyphs.as_slice() else {
                        return Err(GlyphError::Review(glyphs.len()));
                    };
                    table.review.clone_from(glyph);
                    continue;
                }
                "ship" => Some(StatusAction::Ship),
                "pr" => Some(StatusAction::OpenPullRequest),
                "approved" => Some(StatusAction::ReviewApproved),
                "changes-requested" => Some(StatusAction::ReviewChangesRequested),
                _ => None,
            };
            if let Some(action) = action {
                table.actions.insert(action, glyphs.clone());
                continue;
            }
            let ty = CommitType::ALL
                .into_iter()
                .find(|ty| ty.as_str() == key)
                .ok_or_else(|| GlyphError::UnknownKey(key.clone()))?;
            table.tags.insert(ty, glyphs.clone());
        }

        Ok(table)
    }

    /// The fixed glyph that opens every review line.
    pub fn review(&self) -> &str {
        &self.review
    }

    pub fn action(&self, action: StatusAction) -> &[String] {
        self.actions.get(&action).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn tag(&self, ty: CommitType) -> &[String] {
        self.tags.get(&ty).map(Vec::as_slice).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_bracketed_and_parenthesized_tags() {
        assert_eq!(CommitType::find_in("[widgets] (fix) nulls"), Some(CommitType::Fix));
        assert_eq!(CommitType::find_in("[feat] gears"), Some(CommitType::Feat));
        assert_eq!(CommitType::find_in("docs (refactor] odd"), Some(CommitType::Refactor));
    }

    #[test]
    fn leftmost_tag_wins() {
        assert_eq!(
            CommitType::find_in("[widgets] [test] then (perf)"),
            Some(CommitType::Test)
        );
    }

    #[test]
    fn bare_or_scoped_prefixes_are_not_tags() {
        assert_eq!(CommitType::find_in("fix(api): handle nulls"), None);
        assert_eq!(CommitType::find_in("[fixes] typo"), None);
        assert_eq!(CommitType::find_in("plain text"), None);
    }

    #[test]
    fn every_default_list_is_non_empty() {
        let table = EmojiTable::default();
        for action in [
            StatusAction::Ship,
            StatusAction::OpenPullRequest,
            StatusAction::ReviewApproved,
            StatusAction::ReviewChangesRequested,
        ] {
            assert!(!table.action(action).is_empty());
        }
        for ty in CommitType::ALL {
            assert!(!table.tag(ty).is_empty());
        }
    }

    #[test]
    fn overrides_replace_entries() {
        let overrides = BTreeMap::from([
            ("ship".to_string(), vec![":rocket:".to_string()]),
            ("fix".to_string(), vec![":adhesive_bandage:".to_string()]),
            ("review".to_string(), vec![":mag:".to_string()]),
        ]);
        let table = EmojiTable::with_overrides(&overrides).unwrap();

        assert_eq!(table.action(StatusAction::Ship), [":rocket:".to_string()]);
        assert_eq!(table.tag(CommitType::Fix), [":adhesive_bandage:".to_string()]);
        assert_eq!(table.review(), ":mag:");
        assert_eq!(table.action(StatusAction::OpenPullRequest), [":pr:".to_string()]);
    }

    #[test]
    fn rejects_bad_overrides() {
        let unknown = BTreeMap::from([("party".to_string(), vec![":tada:".to_string()])]);
        assert!(matches!(
            EmojiTable::with_overrides(&unknown),
            Err(GlyphError::UnknownKey(_))
        ));

        let empty = BTreeMap::from([("ship".to_string(), vec![])]);
        assert!(matches!(
            EmojiTable::with_overrides(&empty),
            Err(GlyphError::Empty(_))
        ));

        let two_reviews = BTreeMap::from([(
            "review".to_string(),
            vec![":eyes:".to_string(), ":mag:".to_string()],
        )]);
        assert!(matches!(
            EmojiTable::with_overrides(&two_reviews),
            Err(GlyphError::Review(2))
        ));
    }
}
