use std::ops::Range;

use crate::foundation::core::Rgba8;
use crate::markup::alpha::parse_alpha_tag;
use crate::markup::tokenizer::{Token, tokenize};

/// Tag-free text with the color every character ends up drawn in.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StyledText {
    /// Text with all tags removed.
    pub text: String,
    /// Maximal runs of identical color, as byte ranges into `text`.
    pub runs: Vec<StyleRun>,
}

/// Byte range of `StyledText::text` drawn in one color.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyleRun {
    /// Byte range.
    pub range: Range<usize>,
    /// Resolved color.
    pub color: Rgba8,
}

impl StyledText {
    /// Color of the character starting at byte `at`, if any.
    pub fn color_at(&self, at: usize) -> Option<Rgba8> {
        self.runs
            .iter()
            .find(|r| r.range.contains(&at))
            .map(|r| r.color)
    }

    /// Per-character colors in order.
    pub fn char_colors(&self) -> Vec<Rgba8> {
        let mut out = Vec::with_capacity(self.text.len());
        for run in &self.runs {
            let n = self.text[run.range.clone()].chars().count();
            out.extend(std::iter::repeat_n(run.color, n));
        }
        out
    }
}

/// Resolve `<color>`/`<alpha>` tags the way the host engine applies them.
///
/// `<color=...>` sets a color (its own alpha included) and opens a scope, `</color>` restores the
/// color the enclosing scope was opened with, `<alpha=#HH>` replaces the alpha of whatever
/// follows. Entering or leaving a color scope therefore drops any alpha set before it, which is
/// why faded text repeats its alpha tag after every scope change. Unknown tags are ignored.
pub fn resolve_styles(markup: &str, base: Rgba8) -> StyledText {
    let mut scopes: Vec<Rgba8> = vec![base];
    let mut current = base;
    let mut out = StyledText::default();

    for (_, tok) in tokenize(markup) {
        match tok {
            Token::Text(t) => {
                let start = out.text.len();
                out.text.push_str(t);
                let end = out.text.len();
                match out.runs.last_mut() {
                    Some(last) if last.color == current && last.range.end == start => {
                        last.range.end = end;
                    }
                    _ => out.runs.push(StyleRun {
                        range: start..end,
                        color: current,
                    }),
                }
            }
            Token::Tag(tag) => {
                if let Some(a) = parse_alpha_tag(&tag) {
                    current = current.with_alpha(a);
                } else if tag.is("color") {
                    if tag.is_closing() {
                        if scopes.len() > 1 {
                            scopes.pop();
                        }
                        current = scopes.last().copied().unwrap_or(base);
                    } else if let Some(c) = tag.value().and_then(|v| Rgba8::parse(v).ok()) {
                        scopes.push(c);
                        current = c;
                    }
                }
            }
        }
    }

    out
}

#[cfg(test)]
#[path = "../../tests/unit/markup/style.rs"]
mod tests;
