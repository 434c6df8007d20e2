use crate::foundation::core::{Rect, Size, TextAlign, TextFrame, TextStyle, Vec2};
use crate::foundation::error::{RevealError, RevealResult};
use crate::geometry::provider::{GeometryProvider, ShapedChar, ShapedText};
use crate::markup::style::resolve_styles;

/// Deterministic fixed-advance text engine.
///
/// Every character advances by `advance_em * font_size`; lines are `line_height_em *
/// font_size` tall. Useful for headless hosts (terminals, tests, tooling) where glyph shapes do
/// not matter but line breaking, alignment and markup colors do. Only the most recently presented
/// string is kept, together with a count of presents.
#[derive(Clone, Debug)]
pub struct MonospaceGeometry {
    /// Horizontal advance per character, in ems.
    pub advance_em: f64,
    /// Line box height, in ems.
    pub line_height_em: f64,
    last_presented: Option<String>,
    present_calls: usize,
    shape_calls: usize,
}

impl Default for MonospaceGeometry {
    fn default() -> Self {
        Self::new()
    }
}

impl MonospaceGeometry {
    /// Full-width cells (1em advance) with 1.2em lines.
    pub fn new() -> Self {
        Self::with_metrics(1.0, 1.2)
    }

    /// Custom metrics.
    pub fn with_metrics(advance_em: f64, line_height_em: f64) -> Self {
        Self {
            advance_em,
            line_height_em,
            last_presented: None,
            present_calls: 0,
            shape_calls: 0,
        }
    }

    /// Most recently presented string.
    pub fn last_presented(&self) -> Option<&str> {
        self.last_presented.as_deref()
    }

    /// Number of [`GeometryProvider::present`] calls so far.
    pub fn present_calls(&self) -> usize {
        self.present_calls
    }

    /// Number of shaping passes performed.
    pub fn shape_calls(&self) -> usize {
        self.shape_calls
    }

    fn layout_at(
        &self,
        markup: &str,
        style: &TextStyle,
        frame: &TextFrame,
        font_size: f64,
    ) -> ShapedText {
        let styled = resolve_styles(markup, style.color);
        let colors = styled.char_colors();
        let advance = font_size * self.advance_em;
        let line_h = font_size * self.line_height_em;
        let spacing = f64::from(style.character_spacing);
        let line_gap = f64::from(style.line_spacing);
        let wrap = style.wrap.is_wrapping();

        let mut chars = Vec::with_capacity(colors.len());
        let mut line = 0usize;
        let mut x = 0.0f64;

        for (ch, color) in styled.text.chars().zip(colors) {
            let is_break = matches!(ch, '\n' | '\r');
            if !is_break && wrap && x > 0.0 && x + advance > frame.width {
                line += 1;
                x = 0.0;
            }
            let top = line as f64 * (line_h + line_gap);
            let w = if is_break { 0.0 } else { advance };
            chars.push(ShapedChar {
                ch,
                bounds: Rect::new(x, top, x + w, top + line_h),
                ascender: top,
                line,
                color,
            });
            if ch == '\n' {
                line += 1;
                x = 0.0;
            } else if !is_break {
                x += advance + spacing;
            }
        }

        let line_count = line + 1;
        let mut widths = vec![0.0f64; line_count];
        for c in &chars {
            widths[c.line] = widths[c.line].max(c.bounds.x1);
        }
        if style.alignment != TextAlign::Start && style.alignment != TextAlign::Justified {
            for c in &mut chars {
                let rem = (frame.width - widths[c.line]).max(0.0);
                let dx = match style.alignment {
                    TextAlign::Center => rem * 0.5,
                    TextAlign::End => rem,
                    TextAlign::Start | TextAlign::Justified => 0.0,
                };
                c.bounds = c.bounds + Vec2::new(dx, 0.0);
            }
        }

        let width = widths.iter().copied().fold(0.0, f64::max);
        let height = line_count as f64 * line_h + (line_count - 1) as f64 * line_gap;
        ShapedText {
            chars,
            line_count,
            size: Size::new(width, height),
        }
    }
}

impl GeometryProvider for MonospaceGeometry {
    fn shape(
        &mut self,
        markup: &str,
        style: &TextStyle,
        frame: &TextFrame,
    ) -> RevealResult<ShapedText> {
        style.validate()?;
        if !(self.advance_em > 0.0 && self.line_height_em > 0.0) {
            return Err(RevealError::geometry("monospace metrics must be > 0"));
        }
        self.shape_calls += 1;

        let mut size = f64::from(style.effective_font_size());
        let mut shaped = self.layout_at(markup, style, frame, size);
        if let Some(auto) = style.auto_size {
            let min = f64::from(auto.min);
            while shaped.size.height > frame.height && size - 1.0 >= min {
                size -= 1.0;
                shaped = self.layout_at(markup, style, frame, size);
            }
        }
        Ok(shaped)
    }

    fn measure(&mut self, text: &str, _style: &TextStyle, font_size: f32) -> RevealResult<Size> {
        let size = f64::from(font_size);
        let n = text.chars().count() as f64;
        Ok(Size::new(
            n * size * self.advance_em,
            size * self.line_height_em,
        ))
    }

    fn present(&mut self, markup: &str) -> RevealResult<()> {
        match self.last_presented.as_mut() {
            Some(last) => {
                last.clear();
                last.push_str(markup);
            }
            None => self.last_presented = Some(markup.to_string()),
        }
        self.present_calls += 1;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/monospace.rs"]
mod tests;
