//! The heading-detection and outline-assembly pipeline.
//!
//! Stages run strictly left-to-right: spans are aggregated into blocks,
//! a per-document font profile establishes the body-text baseline, noise
//! blocks are filtered out, survivors are classified into leveled headings,
//! a title is selected from page 1, and the assembler emits the final
//! reading-order outline.

mod aggregate;
mod assemble;
mod classify;
mod filter;
mod stats;
mod title;

pub use aggregate::aggregate_blocks;
pub use assemble::assemble_outline;
pub use classify::{classify_headings, cluster_sizes, HeadingCandidate};
pub use filter::PatternFilter;
pub use stats::FontProfile;
pub use title::select_title;

use crate::model::{DocumentOutline, Span};

/// Heuristic constants for heading detection.
///
/// The defaults were tuned empirically against a validation corpus; they are
/// exposed here so callers can retune them for unusual document sets.
#[derive(Debug, Clone)]
pub struct OutlineConfig {
    /// Span size difference (points) below which spans merge into one block
    pub merge_tolerance: f32,

    /// Wrap gap allowance as a fraction of font size when merging lines
    pub line_merge_factor: f32,

    /// Size ratio above which a block is an H1-band heading
    pub h1_ratio: f32,

    /// Size ratio above which a short block is a heading candidate
    pub heading_ratio: f32,

    /// Word count at or above which a block is never a heading
    pub max_heading_words: usize,

    /// Character count at or above which a block is never a heading
    pub max_heading_chars: usize,

    /// Required whitespace below a moderately-large heading, as a fraction
    /// of its font size
    pub gap_factor: f32,

    /// Size difference (points) below which heading sizes share a level
    pub cluster_tolerance: f32,

    /// Body size assumed when a document has no measurable text
    pub default_body_size: f32,

    /// Replacement size for spans with missing or zero font metadata
    pub default_span_size: f32,
}

impl OutlineConfig {
    /// Create a config with the default thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the span merge tolerance in points.
    pub fn with_merge_tolerance(mut self, tolerance: f32) -> Self {
        self.merge_tolerance = tolerance;
        self
    }

    /// Set the H1 size ratio.
    pub fn with_h1_ratio(mut self, ratio: f32) -> Self {
        self.h1_ratio = ratio;
        self
    }

    /// Set the general heading size ratio.
    pub fn with_heading_ratio(mut self, ratio: f32) -> Self {
        self.heading_ratio = ratio;
        self
    }

    /// Set the word-count cutoff for headings.
    pub fn with_max_heading_words(mut self, words: usize) -> Self {
        self.max_heading_words = words;
        self
    }

    /// Set the level clustering tolerance in points.
    pub fn with_cluster_tolerance(mut self, tolerance: f32) -> Self {
        self.cluster_tolerance = tolerance;
        self
    }
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self {
            merge_tolerance: 1.0,
            line_merge_factor: 0.5,
            h1_ratio: 1.8,
            heading_ratio: 1.15,
            max_heading_words: 20,
            max_heading_chars: 200,
            gap_factor: 0.3,
            cluster_tolerance: 1.5,
            default_body_size: 12.0,
            default_span_size: 12.0,
        }
    }
}

/// The outline extraction pipeline for a single document.
///
/// Holds the configuration and the precompiled [`PatternFilter`]; both are
/// immutable, so one pipeline can be shared by reference across a batch.
/// All per-document state ([`FontProfile`], size clusters) is constructed
/// fresh inside [`run`](Self::run), never cached between documents.
pub struct OutlinePipeline {
    config: OutlineConfig,
    filter: PatternFilter,
}

impl OutlinePipeline {
    /// Create a pipeline with the default configuration.
    pub fn new() -> Self {
        Self::with_config(OutlineConfig::default())
    }

    /// Create a pipeline with a custom configuration.
    pub fn with_config(config: OutlineConfig) -> Self {
        Self {
            config,
            filter: PatternFilter::new(),
        }
    }

    /// Get the active configuration.
    pub fn config(&self) -> &OutlineConfig {
        &self.config
    }

    /// Run the full pipeline over the spans of one document.
    ///
    /// Spans must arrive in extraction order: pages ascending, and within a
    /// page top-to-bottom. Returns the title plus the reading-order outline;
    /// a document where nothing clears the heading threshold yields an empty
    /// outline, not an error.
    pub fn run(&self, spans: &[Span]) -> DocumentOutline {
        let blocks = aggregate_blocks(spans, &self.config);
        if blocks.is_empty() {
            return DocumentOutline::empty();
        }

        let profile = FontProfile::from_blocks(&blocks, &self.config);
        log::debug!(
            "document body size {:.1}pt over {} blocks",
            profile.body_size,
            blocks.len()
        );

        let title_idx = select_title(&blocks);
        let candidates = classify_headings(&blocks, &profile, &self.filter, title_idx, &self.config);
        let outline = assemble_outline(&blocks, &candidates, title_idx);

        let title = title_idx
            .map(|i| blocks[i].text.clone())
            .unwrap_or_default();

        DocumentOutline { title, outline }
    }
}

impl Default for OutlinePipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = OutlineConfig::new()
            .with_h1_ratio(2.0)
            .with_max_heading_words(15);
        assert_eq!(config.h1_ratio, 2.0);
        assert_eq!(config.max_heading_words, 15);
        assert_eq!(config.heading_ratio, 1.15);
    }

    #[test]
    fn test_empty_document() {
        let pipeline = OutlinePipeline::new();
        let result = pipeline.run(&[]);
        assert_eq!(result, DocumentOutline::empty());
    }

    #[test]
    fn test_single_block_document_has_no_headings() {
        let pipeline = OutlinePipeline::new();
        let spans = vec![Span::new("Lone Cover Page", 28.0, true, 72.0, 100.0, 1)];
        let result = pipeline.run(&spans);
        assert_eq!(result.title, "Lone Cover Page");
        assert!(result.outline.is_empty());
    }
}
