//! Final outline types, serialized once per document.

use serde::{Deserialize, Serialize};

/// Heading nesting level, H1 (top) through H5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
    H4,
    H5,
}

impl HeadingLevel {
    /// Map a 0-based size-cluster index to a level, capping at H5.
    pub fn from_cluster_index(index: usize) -> Self {
        match index {
            0 => HeadingLevel::H1,
            1 => HeadingLevel::H2,
            2 => HeadingLevel::H3,
            3 => HeadingLevel::H4,
            _ => HeadingLevel::H5,
        }
    }
}

impl std::fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            HeadingLevel::H1 => "H1",
            HeadingLevel::H2 => "H2",
            HeadingLevel::H3 => "H3",
            HeadingLevel::H4 => "H4",
            HeadingLevel::H5 => "H5",
        };
        write!(f, "{}", s)
    }
}

/// A single heading in the final outline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlineEntry {
    /// Heading level
    pub level: HeadingLevel,
    /// Heading text
    pub text: String,
    /// Page number (1-indexed)
    pub page: u32,
}

/// The result of processing one document: a title plus the ordered outline.
///
/// Entries are in reading order, `(page, y)` ascending. `title` is always
/// present but may be empty; `outline` may be empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentOutline {
    /// Document title, possibly empty
    pub title: String,
    /// Ordered headings
    pub outline: Vec<OutlineEntry>,
}

impl DocumentOutline {
    /// An outline with no title and no headings, emitted for documents with
    /// zero extractable text.
    pub fn empty() -> Self {
        Self {
            title: String::new(),
            outline: Vec::new(),
        }
    }
}
