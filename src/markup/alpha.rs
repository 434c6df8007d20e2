use crate::foundation::core::alpha_to_u8;
use crate::markup::tokenizer::Tag;

/// Byte length of every `<alpha=#HH>` tag.
pub const ALPHA_TAG_LEN: usize = "<alpha=#00>".len();

/// Byte offset of the two hex digits inside an alpha tag.
const DIGITS_AT: usize = "<alpha=#".len();

/// Tag that hides everything after it.
pub const HIDDEN_TAG: &str = "<alpha=#00>";

/// Format the alpha tag for a unit alpha.
pub fn alpha_tag(alpha: f32) -> String {
    format!("<alpha=#{:02x}>", alpha_to_u8(alpha))
}

/// Overwrite the hex digits of the alpha tag starting at `tag_start` in place.
///
/// The tag keeps its length, so offsets of any other tag recorded in `buf` stay valid.
pub fn rewrite_alpha_digits(buf: &mut String, tag_start: usize, alpha: f32) {
    let digits = format!("{:02x}", alpha_to_u8(alpha));
    let at = tag_start + DIGITS_AT;
    buf.replace_range(at..at + 2, &digits);
}

/// Parse the byte value of an `<alpha=#HH>` tag.
pub fn parse_alpha_tag(tag: &Tag<'_>) -> Option<u8> {
    if !tag.is("alpha") || tag.is_closing() {
        return None;
    }
    let hex = tag.value()?.trim_matches('"').strip_prefix('#')?;
    if hex.len() != 2 {
        return None;
    }
    u8::from_str_radix(hex, 16).ok()
}

/// True for `<color=...>` and `</color>`, the tags whose scope resets alpha.
pub fn is_color_scope_tag(tag: &Tag<'_>) -> bool {
    tag.is("color")
}
