//! Builds the markup actually presented for a given reveal cursor.
//!
//! Every string produced here remembers where its cursor-tracking alpha tags live, so a frame
//! in which only the fractional alpha moved can patch two hex digits per tag instead of
//! rebuilding the whole string.

use crate::markup::alpha::{
    ALPHA_TAG_LEN, HIDDEN_TAG, alpha_tag, is_color_scope_tag, rewrite_alpha_digits,
};
use crate::markup::tokenizer::{Token, tokenize};

/// How characters after the reveal boundary are represented.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VisibleRange {
    /// Future characters stay in the string, fully transparent, so lines never reflow.
    FixedPosition,
    /// The string is cut after the boundary and padded with blank lines to keep its height.
    Growing,
}

/// Presented markup plus the offsets of the alpha tags that follow the cursor alpha.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ComposedMarkup {
    text: String,
    boundary_tags: Vec<usize>,
}

impl ComposedMarkup {
    /// Nothing presented.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Markup text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Byte offsets of the cursor-tracking alpha tags.
    pub fn boundary_tags(&self) -> &[usize] {
        &self.boundary_tags
    }

    /// Whole message fading as one: an alpha tag in front, repeated after every color scope
    /// boundary so colored spans fade with the rest.
    pub fn all_at_once(message: &str, alpha: f32) -> Self {
        let tag = alpha_tag(alpha);
        let mut text = String::with_capacity(message.len() + ALPHA_TAG_LEN * 4);
        let mut boundary_tags = vec![0];
        text.push_str(&tag);

        for (_, tok) in tokenize(message) {
            match tok {
                Token::Text(t) => text.push_str(t),
                Token::Tag(t) => {
                    text.push_str(t.raw);
                    if is_color_scope_tag(&t) {
                        boundary_tags.push(text.len());
                        text.push_str(&tag);
                    }
                }
            }
        }

        Self {
            text,
            boundary_tags,
        }
    }

    /// Character-by-character reveal with the boundary character at byte `boundary` of
    /// `message` fading at `alpha`.
    ///
    /// `newline_count` is the number of `\n` in the whole message; the growing strategy pads
    /// up to it.
    pub fn partial(
        message: &str,
        boundary: usize,
        alpha: f32,
        range: VisibleRange,
        newline_count: usize,
    ) -> Self {
        let boundary_len = message[boundary..]
            .chars()
            .next()
            .map_or(0, char::len_utf8);
        let cut = boundary + boundary_len;
        let (shown, after) = message.split_at(cut);

        let mut text = String::with_capacity(message.len() + ALPHA_TAG_LEN * 2);
        text.push_str(&shown[..boundary]);
        let boundary_tags = vec![text.len()];
        text.push_str(&alpha_tag(alpha));
        text.push_str(&shown[boundary..]);

        match range {
            VisibleRange::FixedPosition => {
                text.push_str(HIDDEN_TAG);
                for (_, tok) in tokenize(after) {
                    match tok {
                        Token::Text(t) => text.push_str(t),
                        Token::Tag(t) => {
                            text.push_str(t.raw);
                            if is_color_scope_tag(&t) {
                                text.push_str(HIDDEN_TAG);
                            }
                        }
                    }
                }
            }
            VisibleRange::Growing => {
                let shown_lines = shown.matches('\n').count();
                for _ in shown_lines..newline_count {
                    text.push('\n');
                }
                if text.ends_with('\n') {
                    text.push('\u{3000}');
                }
            }
        }

        Self {
            text,
            boundary_tags,
        }
    }

    /// Rewrite every boundary tag to `alpha` without touching anything else.
    pub fn set_alpha(&mut self, alpha: f32) {
        for &at in &self.boundary_tags {
            rewrite_alpha_digits(&mut self.text, at, alpha);
        }
    }

    /// Remove the boundary tags (the reveal is complete).
    pub fn strip_boundary_tags(&mut self) {
        for &at in self.boundary_tags.iter().rev() {
            self.text.replace_range(at..at + ALPHA_TAG_LEN, "");
        }
        self.boundary_tags.clear();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/markup/compose.rs"]
mod tests;
