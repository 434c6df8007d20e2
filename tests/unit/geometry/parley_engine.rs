use super::*;
use crate::foundation::core::AutoSize;

#[test]
fn garbage_font_bytes_are_rejected() {
    let mut engine = ParleyGeometry::new();
    let err = engine.register_font("broken", b"not a font").unwrap_err();
    assert!(err.to_string().contains("no font families registered"));
    assert_eq!(engine.family_name("broken"), None);
}

#[test]
fn shaping_with_unregistered_font_fails() {
    let mut engine = ParleyGeometry::new();
    let style = TextStyle {
        font: "missing".to_string(),
        ..TextStyle::default()
    };
    let err = engine
        .shape("abc", &style, &TextFrame::default())
        .unwrap_err();
    assert!(err.to_string().contains("font 'missing' is not registered"));
}

#[test]
fn measure_rejects_bad_font_size() {
    let mut engine = ParleyGeometry::new();
    let err = engine
        .measure("かず", &TextStyle::default(), 0.0)
        .unwrap_err();
    assert!(err.to_string().contains("validation error"));
}

#[test]
fn alignment_mapping_is_total() {
    assert!(matches!(
        parley_alignment(TextAlign::Start),
        parley::Alignment::Start
    ));
    assert!(matches!(
        parley_alignment(TextAlign::Center),
        parley::Alignment::Center
    ));
    assert!(matches!(
        parley_alignment(TextAlign::End),
        parley::Alignment::End
    ));
}

const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSerif.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Engine with the first available system font registered as `body`.
fn engine_with_system_font() -> Option<ParleyGeometry> {
    let bytes = FONT_CANDIDATES.iter().find_map(|p| std::fs::read(p).ok());
    let Some(bytes) = bytes else {
        eprintln!("skipping: no system font found");
        return None;
    };
    let mut engine = ParleyGeometry::new();
    let family = engine.register_font("body", &bytes).unwrap();
    assert_eq!(engine.family_name("body"), Some(family.as_str()));
    Some(engine)
}

fn body_style(size: f32) -> TextStyle {
    TextStyle {
        font: "body".to_string(),
        font_size: size,
        ..TextStyle::default()
    }
}

fn frame(width: f64, height: f64) -> TextFrame {
    TextFrame {
        x: 0.0,
        y: 0.0,
        width,
        height,
    }
}

#[test]
fn shapes_one_char_per_logical_char_with_lines_and_colors() {
    let Some(mut engine) = engine_with_system_font() else {
        return;
    };
    let markup = "ab<color=red>cd</color>\nefgh ijkl";
    let shaped = engine
        .shape(markup, &body_style(20.0), &frame(60.0, 300.0))
        .unwrap();

    let text: String = shaped.chars.iter().map(|c| c.ch).collect();
    assert_eq!(text, "abcd\nefgh ijkl");
    assert_eq!(shaped.len(), crate::markup::tokenizer::strip_tags(markup).chars().count());

    let line_of = |ch: char| shaped.chars.iter().find(|c| c.ch == ch).unwrap().line;
    assert_eq!(line_of('a'), 0);
    assert_eq!(line_of('d'), 0);
    assert_eq!(line_of('e'), 1);
    assert_eq!(line_of('i'), 2);
    assert_eq!(shaped.line_count, 3);
    assert!(shaped.chars.windows(2).all(|w| w[0].line <= w[1].line));
    assert!(shaped.chars[4].is_line_break());

    let red = Rgba8::new(255, 0, 0, 255);
    let colors: Vec<Rgba8> = shaped.chars.iter().map(|c| c.color).collect();
    assert_eq!(colors[..4], [Rgba8::WHITE, Rgba8::WHITE, red, red]);
    assert!(colors[5..].iter().all(|&c| c == Rgba8::WHITE));

    let a = &shaped.chars[0];
    let b = &shaped.chars[1];
    assert!(a.bounds.x1 > a.bounds.x0);
    assert!(b.bounds.x0 >= a.bounds.x0);
    let e = &shaped.chars[5];
    assert!(e.ascender > a.ascender);
}

#[test]
fn auto_size_shrinks_until_text_fits() {
    let Some(mut engine) = engine_with_system_font() else {
        return;
    };
    let markup = "efgh ijkl mnop\nqrst";
    let fixed = engine
        .shape(markup, &body_style(40.0), &frame(200.0, 50.0))
        .unwrap();
    assert!(fixed.size.height > 50.0);

    let auto = TextStyle {
        auto_size: Some(AutoSize {
            min: 4.0,
            max: 40.0,
        }),
        ..body_style(40.0)
    };
    let shrunk = engine.shape(markup, &auto, &frame(200.0, 50.0)).unwrap();
    assert!(shrunk.size.height <= 50.0);
    assert!(shrunk.size.height < fixed.size.height);
    assert_eq!(shrunk.len(), fixed.len());
}

#[test]
fn measure_grows_with_font_size() {
    let Some(mut engine) = engine_with_system_font() else {
        return;
    };
    let style = body_style(20.0);
    let small = engine.measure("kana", &style, 9.0).unwrap();
    let large = engine.measure("kana", &style, 18.0).unwrap();
    assert!(small.width > 0.0 && small.height > 0.0);
    assert!(large.width > small.width);
    assert!(large.height > small.height);
}
