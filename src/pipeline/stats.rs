//! Per-document font statistics.

use std::collections::BTreeMap;

use crate::model::Block;

use super::OutlineConfig;

/// Font size statistics for one document.
///
/// Constructed once from all blocks, immutable afterward. Sizes are keyed at
/// 0.1pt resolution so font-hinting noise cannot split the histogram, and
/// the map is ordered so iteration never depends on hash order.
#[derive(Debug, Clone)]
pub struct FontProfile {
    /// The dominant body-text size: the size accounting for the largest
    /// total character count across the document
    pub body_size: f32,
    /// Total non-whitespace characters observed per size key
    pub size_histogram: BTreeMap<i32, usize>,
}

impl FontProfile {
    /// Compute the profile for a document's blocks.
    ///
    /// The mode is character-weighted, not block-weighted: a single large
    /// title cannot distort the baseline, and a heading size repeated across
    /// many short blocks cannot masquerade as the body either. A document
    /// with no blocks falls back to the configured default body size; a
    /// single-block document uses that block's size.
    pub fn from_blocks(blocks: &[Block], config: &OutlineConfig) -> Self {
        let mut size_histogram: BTreeMap<i32, usize> = BTreeMap::new();
        for block in blocks {
            let chars = block.text.chars().filter(|c| !c.is_whitespace()).count();
            *size_histogram.entry(size_key(block.size)).or_insert(0) += chars;
        }

        let mut body_size = config.default_body_size;
        let mut best_chars = 0usize;
        for (&key, &chars) in &size_histogram {
            // Strict > keeps the smallest size on ties, deterministically
            if chars > best_chars {
                best_chars = chars;
                body_size = key_size(key);
            }
        }

        Self {
            body_size,
            size_histogram,
        }
    }
}

/// Quantize a size to the 0.1pt histogram key.
pub(crate) fn size_key(size: f32) -> i32 {
    (size * 10.0).round() as i32
}

fn key_size(key: i32) -> f32 {
    key as f32 / 10.0
}
