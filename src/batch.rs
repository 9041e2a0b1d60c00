//! Batch processing: one JSON outline per input PDF.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::model::DocumentOutline;
use crate::parser::PdfSpanExtractor;
use crate::pipeline::{OutlineConfig, OutlinePipeline};
use crate::render::{to_json, JsonFormat};

/// Options for a batch run.
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    /// JSON output format
    pub format: JsonFormat,
    /// Pipeline configuration
    pub config: OutlineConfig,
}

impl BatchOptions {
    /// Create batch options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the JSON output format.
    pub fn with_format(mut self, format: JsonFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the pipeline configuration.
    pub fn with_config(mut self, config: OutlineConfig) -> Self {
        self.config = config;
        self
    }
}

/// Outcome of a batch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    /// Files successfully written
    pub processed: usize,
    /// Files skipped due to recoverable failures
    pub skipped: usize,
    /// PDF files found in the input directory
    pub total: usize,
}

/// Extract the outline of a single PDF file.
pub fn process_file(path: &Path, pipeline: &OutlinePipeline) -> Result<DocumentOutline> {
    let extractor = PdfSpanExtractor::open(path)?
        .with_default_span_size(pipeline.config().default_span_size);
    let spans = extractor.extract_spans()?;
    Ok(pipeline.run(&spans))
}

/// Process every PDF in `input`, writing `<stem>.json` files into `output`.
///
/// Documents are independent, so files are processed in parallel; the
/// pipeline and its compiled patterns are shared by reference while all
/// per-document statistics stay local to each worker. Recoverable per-file
/// failures (unreadable PDF, encrypted document) are logged and skipped
/// with no output written for that file; only an unreadable input directory
/// or an unwritable output directory aborts the run.
pub fn process_dir(input: &Path, output: &Path, options: &BatchOptions) -> Result<BatchSummary> {
    let entries =
        fs::read_dir(input).map_err(|e| Error::InputDir(format!("{}: {}", input.display(), e)))?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension()
                .map(|ext| ext.eq_ignore_ascii_case("pdf"))
                .unwrap_or(false)
        })
        .collect();
    files.sort();

    fs::create_dir_all(output)
        .map_err(|e| Error::OutputDir(format!("{}: {}", output.display(), e)))?;

    let pipeline = OutlinePipeline::with_config(options.config.clone());
    let processed = AtomicUsize::new(0);

    files.par_iter().for_each(|path| {
        match write_outline(path, output, &pipeline, options.format) {
            Ok(()) => {
                processed.fetch_add(1, Ordering::Relaxed);
            }
            Err(e) => {
                log::warn!("skipping {}: {}", path.display(), e);
            }
        }
    });

    let processed = processed.into_inner();
    Ok(BatchSummary {
        processed,
        skipped: files.len() - processed,
        total: files.len(),
    })
}

fn write_outline(
    path: &Path,
    output: &Path,
    pipeline: &OutlinePipeline,
    format: JsonFormat,
) -> Result<()> {
    let doc = process_file(path, pipeline)?;
    let json = to_json(&doc, format)?;

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "outline".to_string());
    let target = output.join(format!("{}.json", stem));

    fs::write(&target, json)?;
    log::debug!(
        "{} -> {} ({} headings)",
        path.display(),
        target.display(),
        doc.outline.len()
    );
    Ok(())
}
