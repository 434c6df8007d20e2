/// Fixed-width alpha tags.
pub mod alpha;
/// Visible markup for a reveal cursor.
pub mod compose;
/// Color scope resolution.
pub mod style;
/// Tag and text tokens.
pub mod tokenizer;
