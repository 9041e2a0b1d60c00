//! Block aggregation: merging adjacent spans into semantic blocks.

use crate::model::{Block, Span};

use super::OutlineConfig;

/// Merge adjacent spans with compatible style and small positional gaps into
/// logical text blocks.
///
/// A span joins the current block when its size is within the merge
/// tolerance of the block's representative size, its bold flag matches, and
/// its baseline advance keeps it on the same visual line or a tight wrap.
/// Anything ambiguous splits: a missed merge costs one fragmented heading,
/// while a wrong merge folds a heading into body text.
pub fn aggregate_blocks(spans: &[Span], config: &OutlineConfig) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut current: Vec<&Span> = Vec::new();

    for span in spans {
        if span.text.trim().is_empty() {
            continue;
        }

        let joins = match current.last() {
            Some(prev) => {
                let dy = span.y - prev.y;
                span.page == prev.page
                    && span.bold == prev.bold
                    && (span.size - dominant_size(&current)).abs() < config.merge_tolerance
                    && dy >= 0.0
                    && dy - prev.size < prev.size * config.line_merge_factor
            }
            None => true,
        };

        if !joins {
            if let Some(block) = flush(&current) {
                blocks.push(block);
            }
            current.clear();
        }
        current.push(span);
    }

    if let Some(block) = flush(&current) {
        blocks.push(block);
    }

    blocks
}

/// Representative size of a span group: the size of the span contributing
/// the most characters. A short bold fragment inside a long normal line must
/// not skew the block's size.
fn dominant_size(spans: &[&Span]) -> f32 {
    let mut best_size = spans.first().map(|s| s.size).unwrap_or(0.0);
    let mut best_chars = 0usize;
    for span in spans {
        let chars = span.char_weight();
        if chars > best_chars {
            best_chars = chars;
            best_size = span.size;
        }
    }
    best_size
}

fn flush(spans: &[&Span]) -> Option<Block> {
    let first = spans.first()?;

    let text = spans
        .iter()
        .map(|s| s.text.trim())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    if text.is_empty() {
        return None;
    }

    let total_chars: usize = spans.iter().map(|s| s.char_weight()).sum();
    let bold_chars: usize = spans
        .iter()
        .filter(|s| s.bold)
        .map(|s| s.char_weight())
        .sum();
    let bold = total_chars > 0 && bold_chars * 2 > total_chars;

    Some(Block::new(
        text,
        dominant_size(spans),
        bold,
        first.page,
        first.y,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> OutlineConfig {
        OutlineConfig::default()
    }

    #[test]
    fn test_same_line_spans_merge() {
        let spans = vec![
            Span::new("Chapter", 14.0, true, 72.0, 100.0, 1),
            Span::new("One", 14.0, true, 130.0, 100.0, 1),
        ];
        let blocks = aggregate_blocks(&spans, &config());
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].text, "Chapter One");
        assert_eq!(blocks[0].word_count, 2);
    }

    #[test]
    fn test_tight_wrap_merges() {
        // Second line one leading below, same style
        let spans = vec![
            Span::new("A heading that wraps", 14.0, true, 72.0, 100.0, 1),
            Span::new("onto a second line", 14.0, true, 72.0, 116.0, 1),
        ];
        let blocks = aggregate_blocks(&spans, &config());
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].text, "A heading that wraps onto a second line");
    }

    #[test]
    fn test_size_change_splits() {
        let spans = vec![
            Span::new("Introduction", 18.0, true, 72.0, 100.0, 1),
            Span::new("Body text follows here.", 11.0, false, 72.0, 120.0, 1),
        ];
        let blocks = aggregate_blocks(&spans, &config());
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].size, 18.0);
        assert_eq!(blocks[1].size, 11.0);
    }

    #[test]
    fn test_bold_mismatch_splits() {
        let spans = vec![
            Span::new("Summary", 11.0, true, 72.0, 100.0, 1),
            Span::new("The findings were", 11.0, false, 72.0, 100.0, 1),
        ];
        let blocks = aggregate_blocks(&spans, &config());
        assert_eq!(blocks.len(), 2);
    }

    #[test]
    fn test_large_gap_splits() {
        let spans = vec![
            Span::new("First paragraph end.", 11.0, false, 72.0, 100.0, 1),
            Span::new("Next section start.", 11.0, false, 72.0, 160.0, 1),
        ];
        let blocks = aggregate_blocks(&spans, &config());
        assert_eq!(blocks.len(), 2);
    }

    #[test]
    fn test_blocks_never_cross_pages() {
        let spans = vec![
            Span::new("End of page one", 11.0, false, 72.0, 700.0, 1),
            Span::new("Top of page two", 11.0, false, 72.0, 700.5, 2),
        ];
        let blocks = aggregate_blocks(&spans, &config());
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].page, 1);
        assert_eq!(blocks[1].page, 2);
    }

    #[test]
    fn test_upward_movement_splits() {
        // A span above the previous baseline belongs to a different region
        let spans = vec![
            Span::new("Footer", 9.0, false, 72.0, 750.0, 1),
            Span::new("Sidebar", 9.0, false, 400.0, 300.0, 1),
        ];
        let blocks = aggregate_blocks(&spans, &config());
        assert_eq!(blocks.len(), 2);
    }

    #[test]
    fn test_dominant_size_is_char_weighted() {
        // A short large fragment must not set the block size
        let spans = vec![
            Span::new("NB", 14.5, false, 72.0, 100.0, 1),
            Span::new("a much longer run of normal text", 14.0, false, 90.0, 100.0, 1),
        ];
        let blocks = aggregate_blocks(&spans, &config());
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].size, 14.0);
    }

    #[test]
    fn test_whitespace_spans_skipped() {
        let spans = vec![
            Span::new("   ", 11.0, false, 72.0, 100.0, 1),
            Span::new("Real text", 11.0, false, 72.0, 100.0, 1),
        ];
        let blocks = aggregate_blocks(&spans, &config());
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].text, "Real text");
    }
}
