use super::*;

#[test]
fn all_at_once_duplicates_alpha_into_color_scopes() {
    let m = ComposedMarkup::all_at_once("a<color=red>b</color>c", 0.5);
    assert_eq!(
        m.as_str(),
        "<alpha=#7f>a<color=red><alpha=#7f>b</color><alpha=#7f>c"
    );
    assert_eq!(m.boundary_tags().len(), 3);
}

#[test]
fn set_alpha_patches_digits_in_place() {
    let mut m = ComposedMarkup::all_at_once("a<color=red>b</color>c", 0.0);
    let before = m.as_str().len();
    m.set_alpha(1.0);
    assert_eq!(m.as_str().len(), before);
    assert_eq!(
        m.as_str(),
        "<alpha=#ff>a<color=red><alpha=#ff>b</color><alpha=#ff>c"
    );
}

#[test]
fn strip_removes_only_boundary_tags() {
    let mut m = ComposedMarkup::all_at_once("a<color=red>b</color>", 1.0);
    m.strip_boundary_tags();
    assert_eq!(m.as_str(), "a<color=red>b</color>");
    assert!(m.boundary_tags().is_empty());
}

#[test]
fn partial_fixed_keeps_hidden_tail() {
    let msg = "abc";
    let m = ComposedMarkup::partial(msg, 1, 0.25, VisibleRange::FixedPosition, 0);
    assert_eq!(m.as_str(), "a<alpha=#3f>b<alpha=#00>c");
    assert_eq!(m.boundary_tags(), &[1]);
}

#[test]
fn partial_fixed_rehides_after_color_scopes() {
    let msg = "a<color=red>bc</color>d";
    let m = ComposedMarkup::partial(msg, 0, 1.0, VisibleRange::FixedPosition, 0);
    assert_eq!(
        m.as_str(),
        "<alpha=#ff>a<alpha=#00><color=red><alpha=#00>bc</color><alpha=#00>d"
    );
}

#[test]
fn partial_alpha_update_leaves_hidden_tail_alone() {
    let mut m = ComposedMarkup::partial("abc", 1, 0.0, VisibleRange::FixedPosition, 0);
    m.set_alpha(0.5);
    assert_eq!(m.as_str(), "a<alpha=#7f>b<alpha=#00>c");
}

#[test]
fn partial_growing_pads_newlines() {
    let msg = "ab\ncd\nef";
    let m = ComposedMarkup::partial(msg, 1, 1.0, VisibleRange::Growing, 2);
    assert_eq!(m.as_str(), "a<alpha=#ff>b\n\n\u{3000}");
}

#[test]
fn partial_growing_without_padding_at_end() {
    let msg = "ab\ncd";
    let m = ComposedMarkup::partial(msg, 4, 1.0, VisibleRange::Growing, 1);
    assert_eq!(m.as_str(), "ab\nc<alpha=#ff>d");
}

#[test]
fn partial_handles_multibyte_boundary() {
    let msg = "数です";
    let m = ComposedMarkup::partial(msg, 3, 0.0, VisibleRange::Growing, 0);
    assert_eq!(m.as_str(), "数<alpha=#00>で");
}
