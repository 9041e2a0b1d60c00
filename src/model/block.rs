//! Semantic text blocks built from merged spans.

/// A semantic line or tightly-wrapped phrase, built by the block aggregator
/// from one or more adjacent spans.
///
/// Blocks are read-only after aggregation. A block's text is non-empty after
/// trimming and a block never spans multiple pages.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    /// Concatenated text of the constituent spans
    pub text: String,
    /// Representative font size: the size of the span contributing the most
    /// characters, not an average
    pub size: f32,
    /// True if the majority of characters come from bold spans
    pub bold: bool,
    /// Page number (1-indexed)
    pub page: u32,
    /// Top position of the block (top-down)
    pub y: f32,
    /// Whitespace-separated word count
    pub word_count: usize,
}

impl Block {
    /// Create a block from already-merged parts.
    pub fn new(text: impl Into<String>, size: f32, bold: bool, page: u32, y: f32) -> Self {
        let text = text.into();
        let word_count = text.split_whitespace().count();
        Self {
            text,
            size,
            bold,
            page,
            y,
            word_count,
        }
    }
}
