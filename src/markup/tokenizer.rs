//! Explicit tokenizer for inline markup.
//!
//! A string is a sequence of opaque tags and text runs. A tag starts at `<` and ends at the
//! next `>`, provided at least one character sits between them and no other `<` comes first.
//! Any `<` that does not open a tag is ordinary text. Everything that needs to skip markup
//! (tag stripping, logical character indexing, alpha splicing, style resolution) goes through
//! this one classifier so they can never disagree about where a tag ends.

/// One opaque `<...>` tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tag<'a> {
    /// Full tag text including the angle brackets.
    pub raw: &'a str,
}

impl<'a> Tag<'a> {
    fn inner(&self) -> &'a str {
        &self.raw[1..self.raw.len() - 1]
    }

    /// True for `</name>` tags.
    pub fn is_closing(&self) -> bool {
        self.inner().starts_with('/')
    }

    /// Tag name without the closing slash.
    pub fn name(&self) -> &'a str {
        let inner = self.inner().trim_start_matches('/');
        match inner.find('=') {
            Some(eq) => inner[..eq].trim(),
            None => inner.trim(),
        }
    }

    /// Value after `=`, if any.
    pub fn value(&self) -> Option<&'a str> {
        let inner = self.inner();
        inner.find('=').map(|eq| inner[eq + 1..].trim())
    }

    /// True for `<name...>` or `</name>` with the given name (ASCII case-insensitive).
    pub fn is(&self, name: &str) -> bool {
        self.name().eq_ignore_ascii_case(name)
    }
}

/// Classified run of markup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Token<'a> {
    /// Plain text, never containing a tag.
    Text(&'a str),
    /// Opaque tag.
    Tag(Tag<'a>),
}

/// Iterator over `(byte_offset, token)` pairs of a markup string.
#[derive(Clone, Debug)]
pub struct Tokenizer<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    /// Start tokenizing `src`.
    pub fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = (usize, Token<'a>);

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.pos;
        let rest = &self.src[start..];
        if rest.is_empty() {
            return None;
        }

        if let Some(len) = tag_len(rest) {
            self.pos += len;
            return Some((
                start,
                Token::Tag(Tag {
                    raw: &rest[..len],
                }),
            ));
        }

        // Text run: up to the next `<` that actually opens a tag. The first char is always
        // consumed so a literal `<` makes progress.
        let mut end = rest.len();
        for (i, c) in rest.char_indices().skip(1) {
            if c == '<' && tag_len(&rest[i..]).is_some() {
                end = i;
                break;
            }
        }
        self.pos += end;
        Some((start, Token::Text(&rest[..end])))
    }
}

/// Length in bytes of the tag at the start of `s`, if `s` starts with one.
pub fn tag_len(s: &str) -> Option<usize> {
    if !s.starts_with('<') {
        return None;
    }
    for (i, c) in s.char_indices().skip(1) {
        match c {
            '>' => return (i > 1).then_some(i + 1),
            '<' => return None,
            _ => {}
        }
    }
    None
}

/// Iterate `(byte_offset, token)` pairs of `src`.
pub fn tokenize(src: &str) -> Tokenizer<'_> {
    Tokenizer::new(src)
}

/// Remove every tag, keeping text runs verbatim.
pub fn strip_tags(src: &str) -> String {
    let mut out = String::with_capacity(src.len());
    for (_, tok) in tokenize(src) {
        if let Token::Text(t) = tok {
            out.push_str(t);
        }
    }
    out
}

/// Byte offset of every logical (non-tag) character, in order.
pub fn logical_offsets(src: &str) -> Vec<usize> {
    let mut out = Vec::new();
    for (start, tok) in tokenize(src) {
        if let Token::Text(t) = tok {
            out.extend(t.char_indices().map(|(i, _)| start + i));
        }
    }
    out
}

/// Characters of `src` outside tags, each paired with its byte offset.
pub fn logical_chars(src: &str) -> impl Iterator<Item = (usize, char)> + '_ {
    tokenize(src).flat_map(|(start, tok)| {
        let text = match tok {
            Token::Text(t) => t,
            Token::Tag(_) => "",
        };
        text.char_indices().map(move |(i, c)| (start + i, c))
    })
}

#[cfg(test)]
#[path = "../../tests/unit/markup/tokenizer.rs"]
mod tests;
