use super::*;

fn chars(s: &str) -> Vec<char> {
    s.chars().collect()
}

#[test]
fn punctuation_is_silent() {
    let c = chars("あ、い。");
    assert!(is_speaking(&c, 0));
    assert!(!is_speaking(&c, 1));
    assert!(is_speaking(&c, 2));
    assert!(!is_speaking(&c, 3));
    assert!(!is_speaking(&c, 4));
}

#[test]
fn brackets_open_and_close() {
    let c = chars("a(bc)d");
    assert!(!is_bracket_open(&c, 0));
    assert!(is_bracket_open(&c, 1));
    assert!(is_bracket_open(&c, 3));
    assert!(!is_bracket_open(&c, 4));
    assert!(!is_bracket_open(&c, 5));
}

#[test]
fn final_closing_bracket_keeps_aside_open() {
    let c = chars("（ねむい）");
    assert!(starts_with_bracket(&c));
    assert!(is_bracket_open(&c, 4));
    assert!(!starts_with_bracket(&chars("ねむい")));
    assert!(!starts_with_bracket(&[]));
}
