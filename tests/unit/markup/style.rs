use super::*;

const RED: Rgba8 = Rgba8::new(255, 0, 0, 255);

#[test]
fn plain_text_is_one_base_run() {
    let s = resolve_styles("abc", Rgba8::WHITE);
    assert_eq!(s.text, "abc");
    assert_eq!(s.runs.len(), 1);
    assert_eq!(s.char_colors(), vec![Rgba8::WHITE; 3]);
}

#[test]
fn color_scope_resets_alpha_on_entry_and_exit() {
    let s = resolve_styles("<alpha=#7f>a<color=red>b</color>c", Rgba8::WHITE);
    assert_eq!(s.text, "abc");
    assert_eq!(
        s.char_colors(),
        vec![Rgba8::WHITE.with_alpha(0x7f), RED, Rgba8::WHITE]
    );
}

#[test]
fn duplicated_alpha_tags_fade_colored_spans() {
    let s = resolve_styles(
        "<alpha=#40>a<color=red><alpha=#40>b</color><alpha=#40>c",
        Rgba8::WHITE,
    );
    assert!(s.char_colors().iter().all(|c| c.a == 0x40));
    assert_eq!(s.color_at(1), Some(RED.with_alpha(0x40)));
}

#[test]
fn unknown_tags_and_stray_closers_are_ignored() {
    let s = resolve_styles("</color><b>x</b>", Rgba8::BLACK);
    assert_eq!(s.text, "x");
    assert_eq!(s.char_colors(), vec![Rgba8::BLACK]);
}

#[test]
fn runs_merge_when_color_does_not_change() {
    let s = resolve_styles("ab<b>cd</b>", Rgba8::WHITE);
    assert_eq!(s.runs.len(), 1);
    assert_eq!(s.runs[0].range, 0..4);
}
