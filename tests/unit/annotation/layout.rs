use super::*;
use crate::foundation::core::{Rgba8, TextFrame};
use crate::geometry::monospace::MonospaceGeometry;

fn style() -> TextStyle {
    TextStyle {
        font_size: 10.0,
        ..TextStyle::default()
    }
}

fn frame(width: f64) -> TextFrame {
    TextFrame {
        width,
        ..TextFrame::default()
    }
}

fn run(
    display: &str,
    spans: &mut [AnnotationSpan],
    width: f64,
    adjust: &FontAdjustments,
) -> (SlotPool, usize) {
    let mut g = MonospaceGeometry::new();
    let shaped = g.shape(display, &style(), &frame(width)).unwrap();
    let mut pool = SlotPool::new();
    let placed = layout_annotations(&shaped, spans, &mut pool, &mut g, &style(), adjust).unwrap();
    (pool, placed)
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-4
}

#[test]
fn places_single_char_annotation() {
    let mut spans = vec![AnnotationSpan::new("数", "か")];
    let (pool, placed) = run("数です", &mut spans, 900.0, &FontAdjustments::new());
    assert_eq!(placed, 1);
    assert_eq!(spans[0].top_char_index, Some(0));
    assert_eq!(spans[0].bottom_char_index, Some(0));

    let slot = pool.get(0).unwrap();
    assert!(slot.visible);
    assert_eq!(slot.alpha, 0.0);
    assert_eq!(slot.align, SlotAlign::Center);
    assert!(approx(slot.anchor.x, 5.0));
    assert!(approx(slot.anchor.y, 0.0));
    assert!(approx(slot.size.width, 9.0));
    assert!((slot.font_size - 4.5).abs() < 1e-4);
}

#[test]
fn two_by_two_uses_pair_ratio() {
    let mut spans = vec![AnnotationSpan::new("今日", "きょ")];
    let (pool, _) = run("今日は", &mut spans, 900.0, &FontAdjustments::new());
    let slot = pool.get(0).unwrap();
    assert!(approx(slot.size.width, 14.0));
    assert!(approx(slot.anchor.x, 10.0));
    assert_eq!(slot.align, SlotAlign::Flush);
}

#[test]
fn wide_annotation_keeps_natural_width() {
    let mut spans = vec![AnnotationSpan::new("a", "abcdefgh")];
    let (pool, _) = run("a", &mut spans, 900.0, &FontAdjustments::new());
    assert!(approx(pool.get(0).unwrap().size.width, 36.0));
}

#[test]
fn repeated_bases_bind_to_successive_occurrences() {
    let mut spans = vec![AnnotationSpan::new("日", "ひ"), AnnotationSpan::new("日", "にち")];
    let (_, placed) = run("日日", &mut spans, 900.0, &FontAdjustments::new());
    assert_eq!(placed, 2);
    assert_eq!(spans[0].top_char_index, Some(0));
    assert_eq!(spans[1].top_char_index, Some(1));
}

#[test]
fn span_is_clipped_at_line_breaks() {
    let mut spans = vec![AnnotationSpan::new("a\nb", "x")];
    run("a\nb", &mut spans, 900.0, &FontAdjustments::new());
    assert_eq!(spans[0].top_char_index, Some(0));
    assert_eq!(spans[0].bottom_char_index, Some(0));

    let mut spans = vec![AnnotationSpan::new("abcd", "x")];
    run("abcd", &mut spans, 30.0, &FontAdjustments::new());
    assert_eq!(spans[0].bottom_char_index, Some(2));
}

#[test]
fn unmatched_span_is_hidden() {
    let mut spans = vec![AnnotationSpan::new("z", "x"), AnnotationSpan::new("a", "y")];
    let (pool, placed) = run("ab", &mut spans, 900.0, &FontAdjustments::new());
    assert_eq!(placed, 1);
    assert_eq!(spans[0].top_char_index, None);
    assert!(!pool.get(0).unwrap().visible);
    assert!(pool.get(1).unwrap().visible);
}

#[test]
fn font_adjustment_raises_anchor() {
    let mut adjust = FontAdjustments::new();
    adjust.set("default", 3.0);
    let mut spans = vec![AnnotationSpan::new("b", "x")];
    let (pool, _) = run("a\nb", &mut spans, 900.0, &adjust);
    assert!(approx(pool.get(0).unwrap().anchor.y, 12.0 - 3.0));
    assert_eq!(adjust.get("other"), 0.0);
}

#[test]
fn slot_takes_bottom_char_color() {
    let mut spans = vec![AnnotationSpan::new("ab", "x")];
    let (pool, _) = run("a<color=#ff000080>b</color>", &mut spans, 900.0, &FontAdjustments::new());
    assert_eq!(pool.get(0).unwrap().color, Rgba8::new(255, 0, 0, 255));
}
