//! # outpdf
//!
//! Structured outline extraction from digitally-authored PDFs.
//!
//! This library turns a PDF into a document title plus an ordered, leveled
//! (H1-H5) sequence of headings with page numbers. Detection is statistical:
//! text spans are merged into semantic blocks, a character-weighted font
//! profile establishes the body-text baseline, and blocks are classified as
//! headings by their size ratio, boldness and surrounding whitespace.
//!
//! ## Quick Start
//!
//! ```no_run
//! use outpdf::{extract_outline, render, JsonFormat};
//!
//! fn main() -> outpdf::Result<()> {
//!     let outline = extract_outline("report.pdf")?;
//!     println!("{}", render::to_json(&outline, JsonFormat::Pretty)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Corpus-relative levels**: heading sizes are clustered per document,
//!   so 9pt-body and 12pt-body documents both get a consistent hierarchy
//! - **Noise filtering**: dates, URLs, page numbers, captions and contact
//!   lines never reach classification
//! - **Batch processing**: one JSON per input file, processed in parallel
//!   with Rayon, with per-file failures isolated from the rest of the run
//! - **Deterministic output**: identical input bytes produce identical JSON

pub mod batch;
pub mod error;
pub mod model;
pub mod parser;
pub mod pipeline;
pub mod render;

// Re-export commonly used types
pub use batch::{process_dir, process_file, BatchOptions, BatchSummary};
pub use error::{Error, Result};
pub use model::{Block, DocumentOutline, HeadingLevel, OutlineEntry, Span};
pub use parser::PdfSpanExtractor;
pub use pipeline::{OutlineConfig, OutlinePipeline, PatternFilter};
pub use render::{to_json, JsonFormat};

use std::path::Path;

/// Extract the outline of a PDF file with the default configuration.
///
/// # Example
///
/// ```no_run
/// use outpdf::extract_outline;
///
/// let outline = extract_outline("report.pdf").unwrap();
/// println!("{} headings under '{}'", outline.outline.len(), outline.title);
/// ```
pub fn extract_outline<P: AsRef<Path>>(path: P) -> Result<DocumentOutline> {
    let pipeline = OutlinePipeline::new();
    batch::process_file(path.as_ref(), &pipeline)
}

/// Extract the outline of a PDF file with a custom configuration.
///
/// # Example
///
/// ```no_run
/// use outpdf::{extract_outline_with_config, OutlineConfig};
///
/// let config = OutlineConfig::new().with_max_heading_words(12);
/// let outline = extract_outline_with_config("report.pdf", config).unwrap();
/// ```
pub fn extract_outline_with_config<P: AsRef<Path>>(
    path: P,
    config: OutlineConfig,
) -> Result<DocumentOutline> {
    let pipeline = OutlinePipeline::with_config(config);
    batch::process_file(path.as_ref(), &pipeline)
}

/// Extract an outline from PDF bytes.
///
/// # Example
///
/// ```no_run
/// use outpdf::extract_outline_from_bytes;
///
/// let data = std::fs::read("report.pdf").unwrap();
/// let outline = extract_outline_from_bytes(&data).unwrap();
/// ```
pub fn extract_outline_from_bytes(data: &[u8]) -> Result<DocumentOutline> {
    let pipeline = OutlinePipeline::new();
    let spans = PdfSpanExtractor::from_bytes(data)?.extract_spans()?;
    Ok(pipeline.run(&spans))
}
