//! PDF span extraction using lopdf.
//!
//! This is the pipeline's input boundary: it turns a digital PDF into an
//! ordered, per-page sequence of [`Span`] values carrying text, font size,
//! boldness and position. Pages are delivered ascending and spans within a
//! page in visual top-to-bottom order.

mod content;

use std::fs::File;
use std::io::Read;
use std::path::Path;

use lopdf::{Document as LopdfDocument, Object, ObjectId};

use crate::error::{Error, Result};
use crate::model::Span;

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";

/// MediaBox fallback when a page declares no usable geometry (US Letter).
const DEFAULT_PAGE_HEIGHT: f32 = 792.0;

/// Span extractor over one loaded PDF document.
pub struct PdfSpanExtractor {
    doc: LopdfDocument,
    default_span_size: f32,
}

impl PdfSpanExtractor {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let mut header = [0u8; 8];
        File::open(path)?.read_exact(&mut header)?;
        if !header.starts_with(PDF_MAGIC) {
            return Err(Error::UnknownFormat);
        }

        let doc = LopdfDocument::load(path)?;
        Self::from_document(doc)
    }

    /// Open a PDF from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if !data.starts_with(PDF_MAGIC) {
            return Err(Error::UnknownFormat);
        }
        let doc = LopdfDocument::load_mem(data)?;
        Self::from_document(doc)
    }

    fn from_document(doc: LopdfDocument) -> Result<Self> {
        // Password-protected documents are an extraction failure, not a
        // document to guess at
        if doc.is_encrypted() {
            return Err(Error::Encrypted);
        }
        Ok(Self {
            doc,
            default_span_size: 12.0,
        })
    }

    /// Set the replacement size for spans with missing or zero font metadata.
    pub fn with_default_span_size(mut self, size: f32) -> Self {
        self.default_span_size = size;
        self
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    /// Extract all spans of the document in reading order.
    ///
    /// A page that fails to decode is logged and skipped; the remaining
    /// pages still produce spans. Per-page buffers are released as each
    /// page completes, bounding peak memory on large documents.
    pub fn extract_spans(&self) -> Result<Vec<Span>> {
        let mut all = Vec::new();
        for (page_num, page_id) in self.doc.get_pages() {
            match self.extract_page_spans(page_num, page_id) {
                Ok(mut spans) => all.append(&mut spans),
                Err(e) => log::warn!("skipping page {}: {}", page_num, e),
            }
        }
        Ok(all)
    }

    /// Extract the spans of one page, normalized to top-down coordinates.
    fn extract_page_spans(&self, page_num: u32, page_id: ObjectId) -> Result<Vec<Span>> {
        let fonts = self
            .doc
            .get_page_fonts(page_id)
            .map_err(|e| Error::Extraction(e.to_string()))?;
        let stream = self.page_content(page_id)?;
        let raw = content::parse_page_content(&self.doc, &stream, &fonts)?;

        let height = self.page_height(page_id);
        let mut spans: Vec<Span> = raw
            .into_iter()
            .map(|r| Span {
                text: r.text,
                size: if r.size > 0.0 {
                    r.size
                } else {
                    self.default_span_size
                },
                bold: r.bold,
                x: r.x,
                y: height - r.y,
                page: page_num,
            })
            .collect();

        spans.sort_by(|a, b| {
            a.y.partial_cmp(&b.y)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal))
        });

        Ok(spans)
    }

    /// Concatenated, decompressed content streams of a page.
    fn page_content(&self, page_id: ObjectId) -> Result<Vec<u8>> {
        let page_dict = self
            .doc
            .get_dictionary(page_id)
            .map_err(|e| Error::Extraction(e.to_string()))?;

        let contents = page_dict
            .get(b"Contents")
            .map_err(|e| Error::Extraction(e.to_string()))?;

        match contents {
            Object::Reference(r) => {
                if let Ok(Object::Stream(s)) = self.doc.get_object(*r) {
                    return s
                        .decompressed_content()
                        .map_err(|e| Error::Extraction(e.to_string()));
                }
                Err(Error::Extraction("invalid content stream".to_string()))
            }
            Object::Stream(s) => s
                .decompressed_content()
                .map_err(|e| Error::Extraction(e.to_string())),
            Object::Array(arr) => {
                let mut buffer = Vec::new();
                for obj in arr {
                    if let Object::Reference(r) = obj {
                        if let Ok(Object::Stream(s)) = self.doc.get_object(*r) {
                            if let Ok(data) = s.decompressed_content() {
                                buffer.extend_from_slice(&data);
                                buffer.push(b' ');
                            }
                        }
                    }
                }
                Ok(buffer)
            }
            _ => Err(Error::Extraction("invalid content stream".to_string())),
        }
    }

    /// Page height from the MediaBox, walking up the page tree when the
    /// page inherits its geometry.
    fn page_height(&self, page_id: ObjectId) -> f32 {
        let mut current = page_id;
        for _ in 0..8 {
            let Ok(dict) = self.doc.get_dictionary(current) else {
                break;
            };
            if let Ok(media_box) = dict.get(b"MediaBox") {
                if let Some(height) = self.rect_height(media_box) {
                    return height;
                }
            }
            match dict.get(b"Parent") {
                Ok(Object::Reference(r)) => current = *r,
                _ => break,
            }
        }
        DEFAULT_PAGE_HEIGHT
    }

    fn rect_height(&self, obj: &Object) -> Option<f32> {
        let obj = match obj {
            Object::Reference(r) => self.doc.get_object(*r).ok()?,
            other => other,
        };
        let rect = obj.as_array().ok()?;
        if rect.len() != 4 {
            return None;
        }
        let y0 = content::number(&rect[1])?;
        let y1 = content::number(&rect[3])?;
        Some((y1 - y0).abs())
    }
}
