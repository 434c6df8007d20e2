use crate::foundation::core::{Rect, Rgba8, Size, TextFrame, TextStyle};
use crate::foundation::error::RevealResult;

/// Geometry of one laid out logical character.
///
/// Coordinates are relative to the container origin, y growing downwards.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapedChar {
    /// The character. Newlines are reported too, with zero width.
    pub ch: char,
    /// Advance box: `x0` is the left edge, `x1` the right edge, `y0`/`y1` the line box.
    pub bounds: Rect,
    /// Y coordinate of the line's ascender (the top of the tallest glyphs).
    pub ascender: f64,
    /// Zero-based visual line index.
    pub line: usize,
    /// Color the character is drawn with after markup resolution.
    pub color: Rgba8,
}

impl ShapedChar {
    /// True for `\n` and `\r`.
    pub fn is_line_break(&self) -> bool {
        matches!(self.ch, '\n' | '\r')
    }
}

/// Result of a shaping pass: exactly one entry per logical (tag-free) character of the input.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ShapedText {
    /// Per-character geometry in logical order.
    pub chars: Vec<ShapedChar>,
    /// Number of visual lines.
    pub line_count: usize,
    /// Bounding size of the laid out text.
    pub size: Size,
}

impl ShapedText {
    /// Number of shaped characters.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// True when nothing was shaped.
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }
}

/// Host text engine seam.
///
/// The reveal controller never lays text out itself: it asks the provider for geometry of the
/// fully revealed message once per measure pass, for the natural size of annotation strings, and
/// hands it every changed frame of presented markup. Errors are the provider's own and are
/// propagated untouched.
pub trait GeometryProvider {
    /// Lay out `markup` (tags interpreted, not drawn) inside `frame` using `style`.
    fn shape(
        &mut self,
        markup: &str,
        style: &TextStyle,
        frame: &TextFrame,
    ) -> RevealResult<ShapedText>;

    /// Natural (preferred) size of a single-line annotation string at `font_size`.
    fn measure(&mut self, text: &str, style: &TextStyle, font_size: f32) -> RevealResult<Size>;

    /// Display `markup` as the current visible text.
    fn present(&mut self, markup: &str) -> RevealResult<()> {
        let _ = markup;
        Ok(())
    }
}

impl<G: GeometryProvider + ?Sized> GeometryProvider for Box<G> {
    fn shape(
        &mut self,
        markup: &str,
        style: &TextStyle,
        frame: &TextFrame,
    ) -> RevealResult<ShapedText> {
        (**self).shape(markup, style, frame)
    }

    fn measure(&mut self, text: &str, style: &TextStyle, font_size: f32) -> RevealResult<Size> {
        (**self).measure(text, style, font_size)
    }

    fn present(&mut self, markup: &str) -> RevealResult<()> {
        (**self).present(markup)
    }
}
