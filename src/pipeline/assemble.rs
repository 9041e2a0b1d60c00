//! Final outline assembly.

use std::cmp::Ordering;

use crate::model::{Block, OutlineEntry};

use super::HeadingCandidate;

/// Order accepted headings into the final outline.
///
/// Entries come out in reading order, `(page, y)` ascending, preserving the
/// classifier's levels untouched. The title block is excluded: a document
/// has exactly one title and it is distinct from the heading hierarchy,
/// even when its size would qualify it as an H1.
pub fn assemble_outline(
    blocks: &[Block],
    candidates: &[HeadingCandidate],
    title: Option<usize>,
) -> Vec<OutlineEntry> {
    let mut ordered: Vec<&HeadingCandidate> = candidates
        .iter()
        .filter(|c| Some(c.block) != title)
        .collect();

    ordered.sort_by(|a, b| {
        let left = &blocks[a.block];
        let right = &blocks[b.block];
        left.page
            .cmp(&right.page)
            .then(left.y.partial_cmp(&right.y).unwrap_or(Ordering::Equal))
    });

    ordered
        .into_iter()
        .map(|c| {
            let block = &blocks[c.block];
            OutlineEntry {
                level: c.level,
                text: block.text.clone(),
                page: block.page,
            }
        })
        .collect()
}
