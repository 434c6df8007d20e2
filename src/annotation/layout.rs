//! Placement of annotation slots over shaped base text.

use std::collections::BTreeMap;

use crate::annotation::extract::AnnotationSpan;
use crate::annotation::slot::{SlotAlign, SlotPool};
use crate::foundation::core::{Point, Size, TextStyle};
use crate::foundation::error::RevealResult;
use crate::geometry::provider::{GeometryProvider, ShapedChar, ShapedText};

/// Annotation font size relative to the base font size.
pub const ANNOTATION_FONT_SCALE: f32 = 0.45;

/// Box width, relative to the base, for two-glyph annotations over two-glyph bases.
const PAIR_WIDTH_RATIO: f64 = 0.7;

/// Minimum box width relative to the base.
const MIN_WIDTH_RATIO: f64 = 0.9;

/// Per-font vertical offset of annotations, in pixels. Positive values raise the annotation.
///
/// Fonts without an entry use `0`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FontAdjustments {
    offsets: BTreeMap<String, f64>,
}

impl FontAdjustments {
    /// Empty table; every font uses `0`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the offset for `font`.
    pub fn set(&mut self, font: impl Into<String>, offset: f64) {
        self.offsets.insert(font.into(), offset);
    }

    /// Offset for `font`.
    pub fn get(&self, font: &str) -> f64 {
        self.offsets.get(font).copied().unwrap_or(0.0)
    }
}

impl FromIterator<(String, f64)> for FontAdjustments {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self {
            offsets: iter.into_iter().collect(),
        }
    }
}

fn find_base(chars: &[ShapedChar], base: &[char], from: usize) -> Option<usize> {
    if base.is_empty() || from >= chars.len() {
        return None;
    }
    chars[from..]
        .windows(base.len())
        .position(|w| w.iter().zip(base).all(|(c, b)| c.ch == *b))
        .map(|i| from + i)
}

/// Last index of the span starting at `top` that stays on `top`'s visual line.
fn clip_to_line(chars: &[ShapedChar], top: usize, bottom: usize) -> usize {
    let line = chars[top].line;
    (top + 1..=bottom)
        .find(|&k| chars[k].is_line_break() || chars[k].line != line)
        .map_or(bottom, |k| k - 1)
}

/// Match every span against the shaped stream and place its slot.
///
/// Each search starts right after the previous match, so repeated bases bind to successive
/// occurrences. Unmatched spans keep no indices and their slot is hidden. Returns the number of
/// placed slots; every placed slot starts transparent.
#[tracing::instrument(skip_all, fields(spans = spans.len(), chars = shaped.len()))]
pub fn layout_annotations<G: GeometryProvider + ?Sized>(
    shaped: &ShapedText,
    spans: &mut [AnnotationSpan],
    slots: &mut SlotPool,
    provider: &mut G,
    style: &TextStyle,
    adjust: &FontAdjustments,
) -> RevealResult<usize> {
    slots.prepare(spans.len());
    let font_size = style.font_size_max() * ANNOTATION_FONT_SCALE;
    let offset = adjust.get(&style.font);
    let chars = &shaped.chars;

    let mut from = 0;
    let mut placed = 0;
    for (index, span) in spans.iter_mut().enumerate() {
        span.clear_placement();
        let base: Vec<char> = span.base.chars().collect();
        let Some(top) = find_base(chars, &base, from) else {
            tracing::warn!(base = %span.base, annotation = %span.annotation, "annotation base not found");
            continue;
        };
        let end = top + base.len() - 1;
        from = end + 1;
        let bottom = clip_to_line(chars, top, end);
        span.top_char_index = Some(top);
        span.bottom_char_index = Some(bottom);

        let first = &chars[top];
        let last = &chars[bottom];
        let base_width = last.bounds.x1 - first.bounds.x0;
        let natural = provider.measure(&span.annotation, style, font_size)?;
        let annotation_len = span.annotation.chars().count();
        let width = if base.len() == 2 && annotation_len == 2 {
            base_width * PAIR_WIDTH_RATIO
        } else if natural.width < base_width * MIN_WIDTH_RATIO {
            base_width * MIN_WIDTH_RATIO
        } else {
            natural.width
        };

        let Some(slot) = slots.get_mut(index) else {
            continue;
        };
        slot.text.clone_from(&span.annotation);
        slot.target = Some(top..=bottom);
        slot.anchor = Point::new((first.bounds.x0 + last.bounds.x1) * 0.5, first.ascender - offset);
        slot.size = Size::new(width, natural.height);
        slot.color = last.color.with_alpha(255);
        slot.alpha = 0.0;
        slot.font_size = font_size;
        slot.align = if annotation_len == 1 {
            SlotAlign::Center
        } else {
            SlotAlign::Flush
        };
        slot.visible = true;
        placed += 1;
    }

    tracing::debug!(placed, "annotation layout done");
    Ok(placed)
}

#[cfg(test)]
#[path = "../../tests/unit/annotation/layout.rs"]
mod tests;
