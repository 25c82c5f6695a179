//! Rendering the finalized status items into report lines.
//!
//! Order is deterministic; glyphs are not. Each render draws glyphs afresh
//! through a [`ChooseGlyph`], so two renders of the same items can differ in
//! decoration but never in count, order, or text.

use rand::seq::SliceRandom;

use crate::glyphs::{CommitType, EmojiTable};
use crate::model::{StatusAction, StatusItem};

/// Picks one glyph from a list of candidates.
pub trait ChooseGlyph {
    /// Returns `""` when there are no candidates.
    fn choose<'a>(&mut self, candidates: &'a [String]) -> &'a str;
}

/// Uniformly random choice.
pub struct RandomGlyph;

impl ChooseGlyph for RandomGlyph {
    fn choose<'a>(&mut self, candidates: &'a [String]) -> &'a str {
        candidates
            .choose(&mut rand::thread_rng())
            .map_or("", String::as_str)
    }
}

/// Always the first candidate.
#[cfg(test)]
pub struct FirstGlyph;

#[cfg(test)]
impl ChooseGlyph for FirstGlyph {
    fn choose<'a>(&mut self, candidates: &'a [String]) -> &'a str {
        candidates.first().map_or("", String::as_str)
    }
}

/// Sort by repo, ships first within a repo, then by PR number.
///
/// Items without a number sort before numbered ones. The sort is stable, so
/// full ties keep arrival order.
pub fn sort_items(items: &mut [StatusItem]) {
    items.sort_by(|a, b| {
        a.repo
            .cmp(&b.repo)
            .then_with(|| {
                (a.action != StatusAction::Ship).cmp(&(b.action != StatusAction::Ship))
            })
            .then_with(|| a.number.cmp(&b.number))
    });
}

/// The decoration for one item.
pub fn glyph(item: &StatusItem, table: &EmojiTable, chooser: &mut impl ChooseGlyph) -> String {
    let action = chooser.choose(table.action(item.action));

    if item.action.is_review() {
        return format!("{}{action}", table.review());
    }

    match CommitType::find_in(&item.text) {
        Some(ty) => format!("{action}{}", chooser.choose(table.tag(ty))),
        None => action.to_string(),
    }
}

/// Sort the items and render one `<glyph> <text>` line per item.
pub fn render(
    mut items: Vec<StatusItem>,
    table: &EmojiTable,
    chooser: &mut impl ChooseGlyph,
) -> String {
    sort_items(&mut items);
    let mut lines = Vec::with_capacity(items.len());
    for item in &items {
        lines.push(format!("{} {}", glyph(item, table, chooser), item.text));
    }
    lines.join("\n")
}
