//! Title selection from page-1 blocks.

use crate::model::Block;

/// Select the title block: the largest-sized block on page 1, topmost on a
/// size tie.
///
/// Titles are chosen before pattern filtering, since the noise rules target
/// heading detection, not title text. Returns `None` when page 1 has no
/// blocks (empty document or extraction failure), in which case the title
/// is the empty string.
pub fn select_title(blocks: &[Block]) -> Option<usize> {
    let mut best: Option<usize> = None;

    for (i, block) in blocks.iter().enumerate() {
        if block.page != 1 {
            continue;
        }
        match best {
            None => best = Some(i),
            Some(j) => {
                let current = &blocks[j];
                if block.size > current.size
                    || (block.size == current.size && block.y < current.y)
                {
                    best = Some(i);
                }
            }
        }
    }

    best
}
