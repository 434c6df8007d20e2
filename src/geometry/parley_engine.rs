use std::collections::HashMap;

use crate::foundation::core::{Rect, Rgba8, Size, TextAlign, TextFrame, TextStyle};
use crate::foundation::error::{RevealError, RevealResult};
use crate::geometry::provider::{GeometryProvider, ShapedChar, ShapedText};
use crate::markup::style::{StyledText, resolve_styles};

/// Text engine backed by Parley shaping and line breaking.
///
/// Fonts are registered from raw bytes under a font identity (the `TextStyle::font` value).
/// `present` is a no-op: drawing belongs to the host renderer, which can re-shape the presented
/// markup with [`GeometryProvider::shape`] when it needs glyph positions.
pub struct ParleyGeometry {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<Rgba8>,
    families: HashMap<String, String>,
}

impl Default for ParleyGeometry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ParleyGeometry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParleyGeometry")
            .field("families", &self.families)
            .finish()
    }
}

#[derive(Clone, Copy)]
struct ClusterBox {
    x0: f32,
    x1: f32,
    top: f32,
    bottom: f32,
    line: usize,
}

impl ParleyGeometry {
    /// Construct a new engine with fresh Parley contexts and no fonts.
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            families: HashMap::new(),
        }
    }

    /// Register font bytes under `font` and return the detected family name.
    pub fn register_font(&mut self, font: &str, font_bytes: &[u8]) -> RevealResult<String> {
        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.to_vec()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            RevealError::validation("no font families registered from font bytes")
        })?;

        let family_name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| RevealError::validation("registered font family has no name"))?
            .to_string();
        tracing::debug!(font, family = %family_name, "registered font");
        self.families.insert(font.to_string(), family_name.clone());
        Ok(family_name)
    }

    /// Family name registered for `font`, if any.
    pub fn family_name(&self, font: &str) -> Option<&str> {
        self.families.get(font).map(String::as_str)
    }

    fn family_for(&self, font: &str) -> RevealResult<String> {
        self.families
            .get(font)
            .cloned()
            .ok_or_else(|| RevealError::geometry(format!("font '{font}' is not registered")))
    }

    fn build(
        &mut self,
        styled: &StyledText,
        family: String,
        size_px: f32,
        style: &TextStyle,
        max_width_px: Option<f32>,
    ) -> parley::Layout<Rgba8> {
        let text = styled.text.as_str();
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(style.color));
        builder.push_default(parley::style::StyleProperty::LetterSpacing(
            style.character_spacing,
        ));
        for run in &styled.runs {
            builder.push(
                parley::style::StyleProperty::Brush(run.color),
                run.range.clone(),
            );
        }

        let mut layout: parley::Layout<Rgba8> = builder.build(text);
        layout.break_all_lines(max_width_px);
        if let Some(w) = max_width_px {
            layout.align(
                Some(w),
                parley_alignment(style.alignment),
                parley::AlignmentOptions::default(),
            );
        }
        layout
    }

    fn shape_at(
        &mut self,
        styled: &StyledText,
        style: &TextStyle,
        frame: &TextFrame,
        size_px: f32,
    ) -> RevealResult<(parley::Layout<Rgba8>, f64)> {
        let family = self.family_for(&style.font)?;
        let max_width = style.wrap.is_wrapping().then_some(frame.width as f32);
        let layout = self.build(styled, family, size_px, style, max_width);
        let lines = layout.lines().count();
        let extra = style.line_spacing * lines.saturating_sub(1) as f32;
        let height = f64::from(layout.height() + extra);
        Ok((layout, height))
    }
}

fn parley_alignment(align: TextAlign) -> parley::Alignment {
    match align {
        TextAlign::Start => parley::Alignment::Start,
        TextAlign::Center => parley::Alignment::Center,
        TextAlign::End => parley::Alignment::End,
        TextAlign::Justified => parley::Alignment::Justify,
    }
}

fn cluster_boxes(
    layout: &parley::Layout<Rgba8>,
    text_len: usize,
    line_gap: f32,
) -> Vec<Option<ClusterBox>> {
    let mut boxes = vec![None; text_len];
    for (line_index, line) in layout.lines().enumerate() {
        let m = line.metrics();
        let shift = line_gap * line_index as f32;
        let top = m.baseline - m.ascent + shift;
        let bottom = m.baseline + m.descent + shift;
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };
            let mut x = run.offset();
            for cluster in run.run().visual_clusters() {
                let advance = cluster.advance();
                let b = ClusterBox {
                    x0: x,
                    x1: x + advance,
                    top,
                    bottom,
                    line: line_index,
                };
                let range = cluster.text_range();
                for slot in boxes
                    .iter_mut()
                    .take(range.end.min(text_len))
                    .skip(range.start)
                {
                    *slot = Some(b);
                }
                x += advance;
            }
        }
    }
    boxes
}

impl GeometryProvider for ParleyGeometry {
    #[tracing::instrument(skip(self, style, frame), fields(font = %style.font))]
    fn shape(
        &mut self,
        markup: &str,
        style: &TextStyle,
        frame: &TextFrame,
    ) -> RevealResult<ShapedText> {
        style.validate()?;
        let styled = resolve_styles(markup, style.color);

        let mut size = style.effective_font_size();
        let (mut layout, mut height) = self.shape_at(&styled, style, frame, size)?;
        if let Some(auto) = style.auto_size {
            while height > frame.height && size - 1.0 >= auto.min {
                size -= 1.0;
                (layout, height) = self.shape_at(&styled, style, frame, size)?;
            }
        }

        let boxes = cluster_boxes(&layout, styled.text.len(), style.line_spacing);
        let colors = styled.char_colors();
        let mut chars = Vec::with_capacity(colors.len());
        let mut prev: Option<ClusterBox> = None;
        for ((at, ch), color) in styled.text.char_indices().zip(colors) {
            let b = match boxes[at] {
                Some(b) => b,
                // Hard breaks may have no cluster; park them at the end of the previous char.
                None => {
                    let p = prev.unwrap_or(ClusterBox {
                        x0: 0.0,
                        x1: 0.0,
                        top: 0.0,
                        bottom: size,
                        line: 0,
                    });
                    ClusterBox { x0: p.x1, ..p }
                }
            };
            chars.push(ShapedChar {
                ch,
                bounds: Rect::new(
                    f64::from(b.x0),
                    f64::from(b.top),
                    f64::from(b.x1),
                    f64::from(b.bottom),
                ),
                ascender: f64::from(b.top),
                line: b.line,
                color,
            });
            prev = Some(b);
        }

        Ok(ShapedText {
            chars,
            line_count: layout.lines().count().max(1),
            size: Size::new(f64::from(layout.width()), height),
        })
    }

    fn measure(&mut self, text: &str, style: &TextStyle, font_size: f32) -> RevealResult<Size> {
        if !font_size.is_finite() || font_size <= 0.0 {
            return Err(RevealError::validation(
                "annotation font size must be finite and > 0",
            ));
        }
        let family = self.family_for(&style.font)?;
        let styled = resolve_styles(text, style.color);
        let plain = TextStyle {
            character_spacing: 0.0,
            ..style.clone()
        };
        let layout = self.build(&styled, family, font_size, &plain, None);
        Ok(Size::new(
            f64::from(layout.width()),
            f64::from(layout.height()),
        ))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/parley_engine.rs"]
mod tests;
