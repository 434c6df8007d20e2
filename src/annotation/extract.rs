//! `{base:annotation}` span extraction.
//!
//! Braces are matched on the tag-free text so tag contents can never be mistaken for
//! annotation syntax, while the display text is produced from the raw input so every tag
//! survives in place. The first malformed token stops extraction: spans parsed before it are
//! kept and the rest of the message is left exactly as written.

use std::ops::Range;

use crate::foundation::error::RevealError;
use crate::markup::tokenizer::{logical_chars, logical_offsets};

/// One annotated span of the message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnnotationSpan {
    /// Text the annotation sits above.
    pub base: String,
    /// Annotation (ruby) text.
    pub annotation: String,
    /// First shaped character covered, once the layout pass has run.
    pub top_char_index: Option<usize>,
    /// Last shaped character covered, once the layout pass has run. Never below `top_char_index`.
    pub bottom_char_index: Option<usize>,
}

impl AnnotationSpan {
    /// Unplaced span.
    pub fn new(base: impl Into<String>, annotation: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            annotation: annotation.into(),
            top_char_index: None,
            bottom_char_index: None,
        }
    }

    /// Drop layout results.
    pub fn clear_placement(&mut self) {
        self.top_char_index = None;
        self.bottom_char_index = None;
    }
}

/// Byte offset into the display text of every logical character.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PositionIndexTable(Vec<usize>);

impl PositionIndexTable {
    /// Build the table for a display string, skipping tags as atomic units.
    pub fn build(display_text: &str) -> Self {
        Self(logical_offsets(display_text))
    }

    /// Number of logical characters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for an empty message.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Byte offset of logical character `position`.
    pub fn get(&self, position: usize) -> Option<usize> {
        self.0.get(position).copied()
    }

    /// All offsets in order.
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }
}

/// Output of [`extract`].
#[derive(Debug, Default)]
pub struct Extraction {
    /// Text handed to the geometry provider: tags intact, accepted tokens collapsed to base.
    pub display_text: String,
    /// Accepted spans in source order.
    pub spans: Vec<AnnotationSpan>,
    /// Logical character offsets into `display_text`.
    pub position_index: PositionIndexTable,
    /// The malformed token that stopped extraction, if any.
    pub error: Option<RevealError>,
}

/// Parse annotation spans out of `raw`.
#[tracing::instrument(skip(raw), fields(len = raw.len()))]
pub fn extract(raw: &str) -> Extraction {
    let chars: Vec<(usize, char)> = logical_chars(raw).collect();
    let scratch = |r: Range<usize>| -> String { chars[r].iter().map(|&(_, c)| c).collect() };

    let mut spans = Vec::new();
    let mut deletions: Vec<Range<usize>> = Vec::new();
    let mut error = None;
    let mut i = 0;

    while let Some(rel) = chars[i..].iter().position(|&(_, c)| c == '{' || c == '}') {
        let open = i + rel;

        if chars[open].1 == '}' {
            if chars[open + 1..].iter().any(|&(_, c)| c == '{') {
                error = Some(RevealError::malformed(scratch(open..open + 1)));
            }
            break;
        }

        let Some(close_rel) = chars[open + 1..].iter().position(|&(_, c)| c == '}') else {
            error = Some(RevealError::malformed(scratch(open..chars.len())));
            break;
        };
        let close = open + 1 + close_rel;
        let payload = &chars[open + 1..close];

        let colons: Vec<usize> = payload
            .iter()
            .enumerate()
            .filter(|(_, (_, c))| *c == ':')
            .map(|(k, _)| open + 1 + k)
            .collect();
        let nested = payload.iter().any(|&(_, c)| c == '{');
        let well_formed = !nested
            && colons.len() == 1
            && colons[0] > open + 1
            && colons[0] + 1 < close;
        if !well_formed {
            error = Some(RevealError::malformed(scratch(open..close + 1)));
            break;
        }

        let colon = colons[0];
        spans.push(AnnotationSpan::new(
            scratch(open + 1..colon),
            scratch(colon + 1..close),
        ));

        let (open_at, _) = chars[open];
        let (colon_at, _) = chars[colon];
        let (close_at, _) = chars[close];
        deletions.push(open_at..open_at + 1);
        deletions.push(colon_at..close_at + 1);

        i = close + 1;
    }

    let mut display_text = String::with_capacity(raw.len());
    let mut cursor = 0;
    for d in &deletions {
        display_text.push_str(&raw[cursor..d.start]);
        cursor = d.end;
    }
    display_text.push_str(&raw[cursor..]);

    if let Some(err) = &error {
        tracing::error!(error = %err, parsed = spans.len(), "annotation extraction stopped");
    }

    let position_index = PositionIndexTable::build(&display_text);
    Extraction {
        display_text,
        spans,
        position_index,
        error,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/annotation/extract.rs"]
mod tests;
