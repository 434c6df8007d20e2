use super::*;

#[test]
fn hex_colors_parse_all_widths() {
    assert_eq!(Rgba8::from_hex("#f00"), Some(Rgba8::new(255, 0, 0, 255)));
    assert_eq!(
        Rgba8::from_hex("#102030"),
        Some(Rgba8::new(0x10, 0x20, 0x30, 255))
    );
    assert_eq!(
        Rgba8::from_hex("#10203040"),
        Some(Rgba8::new(0x10, 0x20, 0x30, 0x40))
    );
    assert_eq!(Rgba8::from_hex("102030"), None);
    assert_eq!(Rgba8::from_hex("#12345"), None);
    assert_eq!(Rgba8::from_hex("#zzzzzz"), None);
}

#[test]
fn parse_accepts_names_and_quotes() {
    assert_eq!(Rgba8::parse("red").unwrap(), Rgba8::new(255, 0, 0, 255));
    assert_eq!(Rgba8::parse("\"#00ff00\"").unwrap(), Rgba8::new(0, 255, 0, 255));
    assert!(Rgba8::parse("chartreuse-ish").is_err());
}

#[test]
fn alpha_bytes_truncate_and_clamp() {
    assert_eq!(alpha_to_u8(0.0), 0);
    assert_eq!(alpha_to_u8(0.5), 127);
    assert_eq!(alpha_to_u8(1.0), 255);
    assert_eq!(alpha_to_u8(3.0), 255);
    assert_eq!(alpha_to_u8(-1.0), 0);
    assert_eq!(alpha_to_u8(f32::NAN), 0);
}

#[test]
fn effective_font_size_prefers_auto_max() {
    let mut style = TextStyle {
        font_size: 40.0,
        font_size_ex: 2.0,
        ..TextStyle::default()
    };
    assert_eq!(style.effective_font_size(), 42.0);
    style.auto_size = Some(AutoSize {
        min: 10.0,
        max: 30.0,
    });
    assert_eq!(style.effective_font_size(), 32.0);
}

#[test]
fn style_validation_rejects_bad_sizes() {
    assert!(TextStyle::default().validate().is_ok());
    let bad = TextStyle {
        font_size: 0.0,
        ..TextStyle::default()
    };
    assert!(bad.validate().is_err());
    let inverted = TextStyle {
        auto_size: Some(AutoSize {
            min: 20.0,
            max: 10.0,
        }),
        ..TextStyle::default()
    };
    assert!(inverted.validate().is_err());
}

#[test]
fn frame_size_ignores_position() {
    let f = TextFrame {
        x: 10.0,
        y: 20.0,
        width: 100.0,
        height: 50.0,
    };
    assert_eq!(f.size(), Size::new(100.0, 50.0));
}

#[test]
fn font_size_max_ignores_extra_size() {
    let mut style = TextStyle {
        font_size: 24.0,
        font_size_ex: 6.0,
        ..TextStyle::default()
    };
    assert_eq!(style.font_size_max(), 24.0);
    style.auto_size = Some(AutoSize { min: 8.0, max: 20.0 });
    assert_eq!(style.font_size_max(), 20.0);
}
