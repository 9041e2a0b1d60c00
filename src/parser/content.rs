//! Content-stream interpretation: text show operators to positioned spans.

use std::collections::BTreeMap;

use lopdf::{content::Content, Dictionary, Document as LopdfDocument, Object};

use crate::error::{Error, Result};

/// A text span in raw PDF coordinates (bottom-up y), before page
/// normalization.
#[derive(Debug, Clone)]
pub(crate) struct RawSpan {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub bold: bool,
}

/// Kerning adjustments beyond this (in 1/1000 text-space units) are treated
/// as word spaces when rebuilding TJ arrays.
const TJ_SPACE_THRESHOLD: f32 = 200.0;

/// Walk a decoded content stream and collect the text spans it paints.
pub(crate) fn parse_page_content(
    doc: &LopdfDocument,
    content: &[u8],
    fonts: &BTreeMap<Vec<u8>, &Dictionary>,
) -> Result<Vec<RawSpan>> {
    let content = Content::decode(content).map_err(|e| Error::Extraction(e.to_string()))?;

    let font_bold: BTreeMap<&[u8], bool> = fonts
        .iter()
        .map(|(name, font)| {
            let base = font
                .get(b"BaseFont")
                .ok()
                .and_then(|o| o.as_name().ok())
                .map(|n| String::from_utf8_lossy(n).to_string())
                .unwrap_or_default();
            (name.as_slice(), is_bold_font(&base))
        })
        .collect();

    let mut spans = Vec::new();
    let mut current_font: Vec<u8> = Vec::new();
    let mut current_size: f32 = 0.0;
    let mut matrix = TextMatrix::default();
    let mut in_text = false;

    for op in content.operations {
        match op.operator.as_str() {
            "BT" => {
                in_text = true;
                matrix = TextMatrix::default();
            }
            "ET" => {
                in_text = false;
            }
            "Tf" => {
                if op.operands.len() >= 2 {
                    if let Object::Name(name) = &op.operands[0] {
                        current_font = name.clone();
                    }
                    current_size = number(&op.operands[1]).unwrap_or(0.0);
                }
            }
            "Td" | "TD" => {
                if op.operands.len() >= 2 {
                    let tx = number(&op.operands[0]).unwrap_or(0.0);
                    let ty = number(&op.operands[1]).unwrap_or(0.0);
                    matrix.translate(tx, ty);
                }
            }
            "Tm" => {
                if op.operands.len() >= 6 {
                    matrix.set(
                        number(&op.operands[0]).unwrap_or(1.0),
                        number(&op.operands[1]).unwrap_or(0.0),
                        number(&op.operands[2]).unwrap_or(0.0),
                        number(&op.operands[3]).unwrap_or(1.0),
                        number(&op.operands[4]).unwrap_or(0.0),
                        number(&op.operands[5]).unwrap_or(0.0),
                    );
                }
            }
            "T*" => {
                matrix.next_line();
            }
            "Tj" | "TJ" => {
                if in_text {
                    let text = show_text(doc, fonts, &current_font, &op.operands, &op.operator);
                    push_span(&mut spans, text, &matrix, current_size, &current_font, &font_bold);
                }
            }
            "'" | "\"" => {
                matrix.next_line();
                if in_text {
                    let idx = if op.operator == "\"" { 2 } else { 0 };
                    let text = op
                        .operands
                        .get(idx)
                        .map(|operand| decode_string(doc, fonts, &current_font, operand))
                        .unwrap_or_default();
                    push_span(&mut spans, text, &matrix, current_size, &current_font, &font_bold);
                }
            }
            _ => {}
        }
    }

    Ok(spans)
}

fn push_span(
    spans: &mut Vec<RawSpan>,
    text: String,
    matrix: &TextMatrix,
    size: f32,
    font: &[u8],
    font_bold: &BTreeMap<&[u8], bool>,
) {
    if text.trim().is_empty() {
        return;
    }
    let (x, y) = matrix.position();
    spans.push(RawSpan {
        text,
        x,
        y,
        size: size * matrix.scale(),
        bold: font_bold.get(font).copied().unwrap_or(false),
    });
}

/// Decode the string payload of a Tj or TJ operator, rebuilding word spaces
/// from large negative kerning adjustments.
fn show_text(
    doc: &LopdfDocument,
    fonts: &BTreeMap<Vec<u8>, &Dictionary>,
    font: &[u8],
    operands: &[Object],
    operator: &str,
) -> String {
    if operator == "Tj" {
        return operands
            .first()
            .map(|operand| decode_string(doc, fonts, font, operand))
            .unwrap_or_default();
    }

    let Some(Object::Array(items)) = operands.first() else {
        return String::new();
    };

    let mut combined = String::new();
    for item in items {
        match item {
            Object::String(_, _) => {
                combined.push_str(&decode_string(doc, fonts, font, item));
            }
            Object::Integer(n) => {
                maybe_push_space(&mut combined, -(*n as f32));
            }
            Object::Real(n) => {
                maybe_push_space(&mut combined, -n);
            }
            _ => {}
        }
    }
    combined
}

fn maybe_push_space(text: &mut String, adjustment: f32) {
    if adjustment > TJ_SPACE_THRESHOLD && !text.is_empty() && !text.ends_with(' ') {
        text.push(' ');
    }
}

/// Decode one PDF string through the current font's encoding, falling back
/// to byte-level heuristics when the font carries none.
fn decode_string(
    doc: &LopdfDocument,
    fonts: &BTreeMap<Vec<u8>, &Dictionary>,
    font: &[u8],
    operand: &Object,
) -> String {
    let Object::String(bytes, _) = operand else {
        return String::new();
    };

    if let Some(encoding) = fonts.get(font).and_then(|f| f.get_font_encoding(doc).ok()) {
        if let Ok(decoded) = LopdfDocument::decode_text(&encoding, bytes) {
            return decoded;
        }
    }
    decode_bytes_fallback(bytes)
}

/// UTF-16BE (BOM-marked), then UTF-8, then Latin-1.
fn decode_bytes_fallback(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks(2)
            .filter(|c| c.len() == 2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&utf16);
    }

    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

/// Bold detection from the base font name.
fn is_bold_font(name: &str) -> bool {
    let name = name.to_lowercase();
    ["bold", "black", "heavy", "condb"]
        .iter()
        .any(|marker| name.contains(marker))
}

/// Extract a number from a PDF object.
pub(crate) fn number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

/// Text matrix tracking the current show position in the content stream.
#[derive(Debug, Clone)]
struct TextMatrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
}

impl Default for TextMatrix {
    fn default() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }
}

impl TextMatrix {
    fn set(&mut self, a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) {
        self.a = a;
        self.b = b;
        self.c = c;
        self.d = d;
        self.e = e;
        self.f = f;
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        self.e += tx * self.a + ty * self.c;
        self.f += tx * self.b + ty * self.d;
    }

    fn next_line(&mut self) {
        // Default leading when no TL was set
        self.f -= 12.0 * self.d;
    }

    fn position(&self) -> (f32, f32) {
        (self.e, self.f)
    }

    fn scale(&self) -> f32 {
        (self.a * self.a + self.c * self.c).sqrt()
    }
}
