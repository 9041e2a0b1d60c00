//! Heading classification and level assignment.

use std::collections::BTreeMap;

use crate::model::{Block, HeadingLevel};

use super::stats::size_key;
use super::{FontProfile, OutlineConfig, PatternFilter};

/// A block accepted as a heading, with its assigned level.
///
/// `block` indexes into the aggregated block sequence; consumed only by the
/// outline assembler.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadingCandidate {
    /// Index of the accepted block
    pub block: usize,
    /// Assigned nesting level
    pub level: HeadingLevel,
}

/// Decide which blocks are headings and assign each a level.
///
/// Acceptance is driven by the size ratio against the body baseline:
/// blocks above the H1 ratio are accepted outright; blocks in the moderate
/// band need whitespace below them; body-sized blocks qualify only as bold,
/// short, gap-isolated section labels. Long blocks are never headings, no
/// matter their style. The title block is not a heading candidate at all,
/// so its size does not consume a level. Levels are corpus-relative: the
/// distinct accepted sizes are clustered and the largest cluster becomes H1.
pub fn classify_headings(
    blocks: &[Block],
    profile: &FontProfile,
    filter: &PatternFilter,
    title: Option<usize>,
    config: &OutlineConfig,
) -> Vec<HeadingCandidate> {
    // A lone block has no body baseline to compare against
    if blocks.len() < 2 {
        return Vec::new();
    }

    let median_gaps = median_gap_by_page(blocks);
    let mut accepted: Vec<usize> = Vec::new();

    for (i, block) in blocks.iter().enumerate() {
        if Some(i) == title {
            continue;
        }
        if filter.is_noise(&block.text) {
            continue;
        }
        if block.word_count >= config.max_heading_words
            || block.text.chars().count() >= config.max_heading_chars
        {
            continue;
        }

        let ratio = block.size / profile.body_size;
        let leading_below = blocks
            .get(i + 1)
            .filter(|next| next.page == block.page)
            .map(|next| next.y - block.y);

        let is_heading = if ratio > config.h1_ratio {
            true
        } else if ratio > config.heading_ratio {
            // Moderately large text buried inside a paragraph flow is body
            // text that merely happens to be big; a real heading has
            // breathing room below it
            match leading_below {
                Some(leading) => leading - block.size >= block.size * config.gap_factor,
                None => true,
            }
        } else if block.bold {
            // Bold section labels at body size must stand apart from the
            // text they introduce
            match leading_below {
                Some(leading) => {
                    let median = median_gaps.get(&block.page).copied().unwrap_or(0.0);
                    median > 0.0 && leading > median
                }
                None => true,
            }
        } else {
            false
        };

        if is_heading {
            accepted.push(i);
        }
    }

    if accepted.is_empty() {
        return Vec::new();
    }

    let sizes: Vec<f32> = accepted.iter().map(|&i| blocks[i].size).collect();
    let clusters = cluster_sizes(&sizes, config.cluster_tolerance);
    log::debug!(
        "{} headings in {} size clusters: {:?}",
        accepted.len(),
        clusters.len(),
        clusters
    );

    accepted
        .into_iter()
        .map(|i| HeadingCandidate {
            block: i,
            level: HeadingLevel::from_cluster_index(nearest_cluster(&clusters, blocks[i].size)),
        })
        .collect()
}

/// Merge a set of font sizes into ordered cluster representatives.
///
/// Sizes are deduplicated, sorted descending, and folded into clusters by a
/// running average: a size within `tolerance` of the current cluster average
/// joins it, anything further starts a new cluster. Returns representatives
/// in descending order, so index 0 corresponds to H1.
pub fn cluster_sizes(sizes: &[f32], tolerance: f32) -> Vec<f32> {
    let mut distinct: Vec<f32> = Vec::new();
    for &size in sizes {
        if !distinct.iter().any(|&s| size_key(s) == size_key(size)) {
            distinct.push(size);
        }
    }
    distinct.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));

    let mut clusters = Vec::new();
    let mut iter = distinct.into_iter();
    let Some(first) = iter.next() else {
        return clusters;
    };

    let mut avg = first;
    let mut count = 1usize;
    for size in iter {
        if avg - size < tolerance {
            avg = (avg * count as f32 + size) / (count as f32 + 1.0);
            count += 1;
        } else {
            clusters.push(avg);
            avg = size;
            count = 1;
        }
    }
    clusters.push(avg);
    clusters
}

/// Index of the cluster representative nearest to a size.
fn nearest_cluster(clusters: &[f32], size: f32) -> usize {
    let mut best = 0usize;
    let mut best_dist = f32::MAX;
    for (i, &rep) in clusters.iter().enumerate() {
        let dist = (rep - size).abs();
        if dist < best_dist {
            best_dist = dist;
            best = i;
        }
    }
    best
}

/// Median baseline-to-baseline gap between successive blocks, per page.
fn median_gap_by_page(blocks: &[Block]) -> BTreeMap<u32, f32> {
    let mut gaps: BTreeMap<u32, Vec<f32>> = BTreeMap::new();
    for pair in blocks.windows(2) {
        if pair[0].page == pair[1].page {
            let gap = pair[1].y - pair[0].y;
            if gap > 0.0 {
                gaps.entry(pair[0].page).or_default().push(gap);
            }
        }
    }

    gaps.into_iter()
        .map(|(page, mut values)| {
            values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
            (page, values[values.len() / 2])
        })
        .collect()
}
