// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! First-page text and layout extraction
//!
//! Turns a PDF file into the flat list of positioned words the matching
//! engine consumes. Only page one is read; the document handle lives for
//! the duration of [`extract_first_page`] and is released before any
//! matching begins.
//!
//! The extractor walks the page content stream with a simplified text
//! state machine (BT/ET, Tf, Tm, Td/TD/T*/TL, Tc/Tw/Tz, Tj/TJ/'/").
//! Glyph metrics are not resolved; each character advances the cursor by
//! half the font size, which is accurate enough for the coarse spatial
//! thresholds downstream.

use lopdf::content::Content;
use lopdf::{Document, Object};

use crate::error::{Error, Result};
use crate::types::PositionedWord;

/// Horizontal/vertical tolerance (page units) when merging adjacent
/// token fragments into one word.
const MERGE_TOLERANCE: f64 = 2.0;

/// Approximate character advance as a fraction of font size, used when
/// glyph widths are unavailable.
const APPROX_CHAR_WIDTH_RATIO: f64 = 0.5;

/// Default page height (US Letter, points) when no MediaBox is found.
const DEFAULT_PAGE_HEIGHT: f64 = 792.0;

/// One page worth of extracted layout, as consumed by the engine.
pub trait PageSource {
    /// Positioned words on the page, in extraction order.
    fn page_words(&self) -> &[PositionedWord];
    /// Full page text (consumed lowercased for keyword search).
    fn page_text(&self) -> &str;
}

/// Materialized first-page extraction result.
#[derive(Debug, Clone)]
pub struct ExtractedPage {
    words: Vec<PositionedWord>,
    text: String,
}

impl ExtractedPage {
    /// Build a page from an already-positioned word list. The page text
    /// is reconstructed by joining words in reading order, which keeps
    /// word search and text search consistent. Used by tests and by
    /// callers that source layout elsewhere.
    pub fn from_words(words: Vec<PositionedWord>) -> Self {
        let text = join_reading_order(&words);
        Self { words, text }
    }
}

impl PageSource for ExtractedPage {
    fn page_words(&self) -> &[PositionedWord] {
        &self.words
    }

    fn page_text(&self) -> &str {
        &self.text
    }
}

/// Extract positioned words and page text from the first page of a PDF.
pub fn extract_first_page(path: &str) -> Result<ExtractedPage> {
    let doc = Document::load(path)?;

    let pages = doc.get_pages();
    let (_, &page_id) = pages
        .iter()
        .next()
        .ok_or_else(|| Error::Extraction("document has no pages".to_string()))?;

    let page_height = resolve_page_height(&doc, page_id);
    let content_data = doc.get_page_content(page_id)?;
    let content = Content::decode(&content_data)
        .map_err(|e| Error::Extraction(format!("content stream: {e}")))?;

    let spans = walk_content(&content);
    let words = merge_fragments(spans_to_words(&spans, page_height));

    tracing::debug!(
        words = words.len(),
        page_height,
        "Extracted first page layout"
    );

    Ok(ExtractedPage {
        text: join_reading_order(&words),
        words,
    })
}

/// Resolve the page height from the MediaBox, walking up the page tree
/// for inherited attributes.
fn resolve_page_height(doc: &Document, page_id: (u32, u16)) -> f64 {
    let mut node_id = page_id;
    for _ in 0..8 {
        let Ok(dict) = doc.get_dictionary(node_id) else {
            break;
        };
        if let Ok(media_box) = dict.get(b"MediaBox") {
            if let Ok(values) = media_box.as_array() {
                if values.len() == 4 {
                    let y0 = object_as_f64(&values[1]).unwrap_or(0.0);
                    let y1 = object_as_f64(&values[3]).unwrap_or(DEFAULT_PAGE_HEIGHT);
                    return y1 - y0;
                }
            }
        }
        match dict.get(b"Parent").and_then(Object::as_reference) {
            Ok(parent) => node_id = parent,
            Err(_) => break,
        }
    }
    DEFAULT_PAGE_HEIGHT
}

/// A run of shown text at a baseline position (PDF bottom-left coords).
#[derive(Debug, Clone)]
struct TextSpan {
    text: String,
    x: f64,
    y: f64,
    font_size: f64,
}

/// The identity 2x3 text matrix: [a, b, c, d, tx, ty].
const IDENTITY_MATRIX: [f64; 6] = [1.0, 0.0, 0.0, 1.0, 0.0, 0.0];

/// Mutable state tracked while walking the content stream.
struct TextState {
    font_size: f64,
    text_matrix: [f64; 6],
    line_matrix: [f64; 6],
    leading: f64,
    char_spacing: f64,
    word_spacing: f64,
    horiz_scale: f64,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            font_size: 0.0,
            text_matrix: IDENTITY_MATRIX,
            line_matrix: IDENTITY_MATRIX,
            leading: 0.0,
            char_spacing: 0.0,
            word_spacing: 0.0,
            horiz_scale: 1.0,
        }
    }
}

impl TextState {
    fn x(&self) -> f64 {
        self.text_matrix[4]
    }

    fn y(&self) -> f64 {
        self.text_matrix[5]
    }

    /// Effective font size accounting for the text matrix vertical scale.
    fn effective_font_size(&self) -> f64 {
        let scale = (self.text_matrix[1].powi(2) + self.text_matrix[3].powi(2)).sqrt();
        (self.font_size * scale).abs()
    }

    fn advance_x(&mut self, dx: f64) {
        self.text_matrix[4] += dx * self.text_matrix[0];
        self.text_matrix[5] += dx * self.text_matrix[1];
    }

    /// Translate the line matrix and restart the text matrix from it
    /// (Td / TD / T* semantics).
    fn translate_line(&mut self, tx: f64, ty: f64) {
        let new_tx = self.line_matrix[0] * tx + self.line_matrix[2] * ty + self.line_matrix[4];
        let new_ty = self.line_matrix[1] * tx + self.line_matrix[3] * ty + self.line_matrix[5];
        self.line_matrix[4] = new_tx;
        self.line_matrix[5] = new_ty;
        self.text_matrix = self.line_matrix;
    }

    /// Advance past `text` and return the displacement applied.
    fn advance_after_show(&mut self, text: &str) {
        let mut dx = 0.0;
        for ch in text.chars() {
            dx += self.font_size * APPROX_CHAR_WIDTH_RATIO * self.horiz_scale + self.char_spacing;
            if ch == ' ' {
                dx += self.word_spacing;
            }
        }
        self.advance_x(dx);
    }
}

fn object_as_f64(obj: &Object) -> Option<f64> {
    match obj {
        Object::Integer(i) => Some(*i as f64),
        Object::Real(r) => Some(*r as f64),
        _ => None,
    }
}

/// Decode a PDF string operand byte-per-byte as Latin-1. Room codes,
/// labels, and dimension annotations on drawings are plain WinAnsi text;
/// CID-keyed fonts are out of scope here.
fn decode_string(obj: &Object) -> String {
    match obj {
        Object::String(bytes, _) => bytes.iter().map(|&b| b as char).collect(),
        _ => String::new(),
    }
}

/// Walk the content stream operators and collect text spans.
fn walk_content(content: &Content) -> Vec<TextSpan> {
    let mut state = TextState::default();
    let mut spans = Vec::new();

    for op in &content.operations {
        let operands = &op.operands;
        match op.operator.as_str() {
            "BT" => {
                state.text_matrix = IDENTITY_MATRIX;
                state.line_matrix = IDENTITY_MATRIX;
            }
            "Tf" => {
                if let Some(size) = operands.get(1).and_then(object_as_f64) {
                    state.font_size = size;
                }
            }
            "Tm" => {
                let vals: Vec<f64> = operands.iter().filter_map(object_as_f64).collect();
                if vals.len() == 6 {
                    state.text_matrix = [vals[0], vals[1], vals[2], vals[3], vals[4], vals[5]];
                    state.line_matrix = state.text_matrix;
                }
            }
            "Td" => {
                if let (Some(tx), Some(ty)) = (
                    operands.first().and_then(object_as_f64),
                    operands.get(1).and_then(object_as_f64),
                ) {
                    state.translate_line(tx, ty);
                }
            }
            "TD" => {
                if let (Some(tx), Some(ty)) = (
                    operands.first().and_then(object_as_f64),
                    operands.get(1).and_then(object_as_f64),
                ) {
                    state.leading = -ty;
                    state.translate_line(tx, ty);
                }
            }
            "T*" => {
                state.translate_line(0.0, -state.leading);
            }
            "TL" => {
                if let Some(v) = operands.first().and_then(object_as_f64) {
                    state.leading = v;
                }
            }
            "Tc" => {
                if let Some(v) = operands.first().and_then(object_as_f64) {
                    state.char_spacing = v;
                }
            }
            "Tw" => {
                if let Some(v) = operands.first().and_then(object_as_f64) {
                    state.word_spacing = v;
                }
            }
            "Tz" => {
                if let Some(v) = operands.first().and_then(object_as_f64) {
                    state.horiz_scale = v / 100.0;
                }
            }
            "Tj" => {
                if let Some(obj) = operands.first() {
                    show_string(obj, &mut state, &mut spans);
                }
            }
            "TJ" => {
                if let Some(Object::Array(elements)) = operands.first() {
                    show_tj_array(elements, &mut state, &mut spans);
                }
            }
            "'" => {
                state.translate_line(0.0, -state.leading);
                if let Some(obj) = operands.first() {
                    show_string(obj, &mut state, &mut spans);
                }
            }
            "\"" => {
                if operands.len() >= 3 {
                    if let Some(aw) = object_as_f64(&operands[0]) {
                        state.word_spacing = aw;
                    }
                    if let Some(ac) = object_as_f64(&operands[1]) {
                        state.char_spacing = ac;
                    }
                    state.translate_line(0.0, -state.leading);
                    show_string(&operands[2], &mut state, &mut spans);
                }
            }
            _ => {}
        }
    }

    spans
}

/// Emit a span for a shown string and advance the cursor.
fn show_string(obj: &Object, state: &mut TextState, spans: &mut Vec<TextSpan>) {
    let text = decode_string(obj);
    if text.is_empty() {
        return;
    }
    spans.push(TextSpan {
        text: text.clone(),
        x: state.x(),
        y: state.y(),
        font_size: state.effective_font_size(),
    });
    state.advance_after_show(&text);
}

/// Process a TJ array: strings interleaved with kerning adjustments in
/// thousandths of a text-space unit.
fn show_tj_array(elements: &[Object], state: &mut TextState, spans: &mut Vec<TextSpan>) {
    for elem in elements {
        match elem {
            Object::String(..) => show_string(elem, state, spans),
            other => {
                if let Some(adj) = object_as_f64(other) {
                    state.advance_x(-adj / 1000.0 * state.font_size * state.horiz_scale);
                }
            }
        }
    }
}

/// Split spans on whitespace into words with top-referenced bounding
/// boxes.
fn spans_to_words(spans: &[TextSpan], page_height: f64) -> Vec<PositionedWord> {
    let mut words = Vec::new();

    for span in spans {
        let char_w = span.font_size * APPROX_CHAR_WIDTH_RATIO;
        let top = page_height - span.y - span.font_size;
        let bottom = page_height - span.y;

        let mut offset = 0.0;
        let mut token = String::new();
        let mut token_x0 = span.x;

        for ch in span.text.chars() {
            if ch.is_whitespace() {
                if !token.is_empty() {
                    let x0 = token_x0;
                    let x1 = span.x + offset;
                    words.push(PositionedWord::new(std::mem::take(&mut token), x0, x1, top, bottom));
                }
                offset += char_w;
                token_x0 = span.x + offset;
            } else {
                if token.is_empty() {
                    token_x0 = span.x + offset;
                }
                token.push(ch);
                offset += char_w;
            }
        }
        if !token.is_empty() {
            words.push(PositionedWord::new(token, token_x0, span.x + offset, top, bottom));
        }
    }

    words
}

/// Merge adjacent fragments of the same word.
///
/// Annotations like `12'-6"` often arrive as several show operations;
/// fragments on the same line whose horizontal gap is within the merge
/// tolerance are glued back together.
fn merge_fragments(mut words: Vec<PositionedWord>) -> Vec<PositionedWord> {
    words.sort_by(|a, b| {
        a.top
            .partial_cmp(&b.top)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.x0.partial_cmp(&b.x0).unwrap_or(std::cmp::Ordering::Equal))
    });

    let mut merged: Vec<PositionedWord> = Vec::with_capacity(words.len());
    for word in words {
        if let Some(last) = merged.last_mut() {
            let same_line = (word.top - last.top).abs() <= MERGE_TOLERANCE;
            let adjacent = word.x0 - last.x1 <= MERGE_TOLERANCE && word.x0 >= last.x0;
            if same_line && adjacent {
                last.text.push_str(&word.text);
                last.x1 = last.x1.max(word.x1);
                last.bottom = last.bottom.max(word.bottom);
                continue;
            }
        }
        merged.push(word);
    }

    merged
}

/// Join words in reading order (top-to-bottom, left-to-right) into the
/// page text, one line per row of words.
fn join_reading_order(words: &[PositionedWord]) -> String {
    let mut ordered: Vec<&PositionedWord> = words.iter().collect();
    ordered.sort_by(|a, b| {
        a.top
            .partial_cmp(&b.top)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.x0.partial_cmp(&b.x0).unwrap_or(std::cmp::Ordering::Equal))
    });

    let mut text = String::new();
    let mut line_top = f64::NEG_INFINITY;
    for word in ordered {
        if text.is_empty() {
            line_top = word.top;
        } else if (word.top - line_top).abs() > MERGE_TOLERANCE {
            text.push('\n');
            line_top = word.top;
        } else {
            text.push(' ');
        }
        text.push_str(&word.text);
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(text: &str, x: f64, y: f64, size: f64) -> TextSpan {
        TextSpan {
            text: text.to_string(),
            x,
            y,
            font_size: size,
        }
    }

    #[test]
    fn spans_split_into_words_with_boxes() {
        let words = spans_to_words(&[span("Office 101", 10.0, 700.0, 10.0)], 792.0);
        assert_eq!(words.len(), 2);
        assert_eq!(words[0].text, "Office");
        assert_eq!(words[0].x0, 10.0);
        assert_eq!(words[0].x1, 40.0); // 6 chars at 5.0 units each
        assert_eq!(words[1].text, "101");
        assert_eq!(words[1].x0, 45.0);
        assert_eq!(words[0].top, 82.0);
        assert_eq!(words[0].bottom, 92.0);
    }

    #[test]
    fn fragments_within_tolerance_merge() {
        let words = vec![
            PositionedWord::new("12'", 10.0, 25.0, 50.0, 60.0),
            PositionedWord::new("-6\"", 26.0, 41.0, 50.5, 60.0),
        ];
        let merged = merge_fragments(words);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].text, "12'-6\"");
        assert_eq!(merged[0].x1, 41.0);
    }

    #[test]
    fn distant_fragments_stay_separate() {
        let words = vec![
            PositionedWord::new("12'", 10.0, 25.0, 50.0, 60.0),
            PositionedWord::new("Office", 100.0, 130.0, 50.0, 60.0),
        ];
        assert_eq!(merge_fragments(words).len(), 2);
    }

    #[test]
    fn reading_order_text_with_line_breaks() {
        let page = ExtractedPage::from_words(vec![
            PositionedWord::new("Main", 10.0, 30.0, 10.0, 20.0),
            PositionedWord::new("Lobby", 35.0, 60.0, 10.0, 20.0),
            PositionedWord::new("101", 10.0, 25.0, 40.0, 50.0),
        ]);
        assert_eq!(page.page_text(), "Main Lobby\n101");
    }

    #[test]
    fn tj_kerning_advances_between_fragments() {
        let content = Content {
            operations: vec![
                lopdf::content::Operation::new("BT", vec![]),
                lopdf::content::Operation::new(
                    "Tf",
                    vec![Object::Name(b"F1".to_vec()), Object::Integer(10)],
                ),
                lopdf::content::Operation::new(
                    "Td",
                    vec![Object::Integer(100), Object::Integer(700)],
                ),
                lopdf::content::Operation::new(
                    "TJ",
                    vec![Object::Array(vec![
                        Object::String(b"12'".to_vec(), lopdf::StringFormat::Literal),
                        Object::Integer(-120),
                        Object::String(b"-6\"".to_vec(), lopdf::StringFormat::Literal),
                    ])],
                ),
                lopdf::content::Operation::new("ET", vec![]),
            ],
        };
        let spans = walk_content(&content);
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].text, "12'");
        assert_eq!(spans[1].text, "-6\"");
        // 3 chars at 5.0 units plus the kerning displacement.
        assert!(spans[1].x > spans[0].x + 15.0);
    }

    #[test]
    fn td_moves_the_baseline() {
        let content = Content {
            operations: vec![
                lopdf::content::Operation::new("BT", vec![]),
                lopdf::content::Operation::new(
                    "Tf",
                    vec![Object::Name(b"F1".to_vec()), Object::Integer(12)],
                ),
                lopdf::content::Operation::new(
                    "Td",
                    vec![Object::Integer(50), Object::Integer(600)],
                ),
                lopdf::content::Operation::new(
                    "Tj",
                    vec![Object::String(b"101".to_vec(), lopdf::StringFormat::Literal)],
                ),
                lopdf::content::Operation::new("ET", vec![]),
            ],
        };
        let spans = walk_content(&content);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].x, 50.0);
        assert_eq!(spans[0].y, 600.0);
        assert_eq!(spans[0].font_size, 12.0);
    }

    #[test]
    fn missing_file_is_an_extraction_error() {
        let err = extract_first_page("/nonexistent/plan.pdf").unwrap_err();
        assert!(matches!(err, Error::Extraction(_)));
    }
}
