//! Character-class queries used by hosts to drive speaker animation.

/// Characters during which a speaker is considered silent.
pub const PAUSE_CHARS: &[char] = &[
    '「', '」', '（', '）', '…', '、', '。', '！', '？', '!', '?', ',', '.', '(', ')',
];

/// True for characters in [`PAUSE_CHARS`].
pub fn is_pause_char(c: char) -> bool {
    PAUSE_CHARS.contains(&c)
}

/// ASCII or full-width opening parenthesis.
pub fn is_open_bracket(c: char) -> bool {
    matches!(c, '(' | '（')
}

/// ASCII or full-width closing parenthesis.
pub fn is_close_bracket(c: char) -> bool {
    matches!(c, ')' | '）')
}

/// True when the character at `position` is spoken (not punctuation or a bracket).
pub fn is_speaking(chars: &[char], position: usize) -> bool {
    chars.get(position).is_some_and(|&c| !is_pause_char(c))
}

/// True while the reveal at `position` is inside a bracketed aside.
///
/// An opening bracket opens the aside; a closing bracket closes it unless it is the last
/// character of the message, so a message that ends on its closing bracket stays an aside.
pub fn is_bracket_open(chars: &[char], position: usize) -> bool {
    let last = chars.len().saturating_sub(1);
    let mut open = false;
    for (i, &c) in chars.iter().enumerate().take(position.saturating_add(1)) {
        if is_open_bracket(c) {
            open = true;
        } else if is_close_bracket(c) && i < last {
            open = false;
        }
    }
    open
}

/// True when the message opens with a bracket.
pub fn starts_with_bracket(chars: &[char]) -> bool {
    chars.first().is_some_and(|&c| is_open_bracket(c))
}

#[cfg(test)]
#[path = "../../tests/unit/reveal/speech.rs"]
mod tests;
