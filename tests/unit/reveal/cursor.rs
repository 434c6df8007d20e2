use super::*;

#[test]
fn seek_clamps_both_ends() {
    assert_eq!(RevealCursor::seek(-5.0, 4), RevealCursor::START);
    assert_eq!(RevealCursor::seek(9.0, 4), RevealCursor::complete(4));
    assert_eq!(RevealCursor::seek(4.0, 4), RevealCursor::complete(4));
    assert_eq!(RevealCursor::seek(f64::NAN, 4), RevealCursor::START);
}

#[test]
fn seek_splits_whole_and_fraction() {
    let c = RevealCursor::seek(2.25, 4);
    assert_eq!(c.position, 2);
    assert_eq!(c.alpha, 0.25);
    assert!(!c.is_complete(4));
}

#[test]
fn draw_at_once_seek_pins_last_char() {
    let c = RevealCursor::seek_all_at_once(0.5, 3);
    assert_eq!(c.position, 2);
    assert_eq!(c.alpha, 0.5);
    assert!(RevealCursor::seek_all_at_once(7.0, 3).is_complete(3));
    assert_eq!(RevealCursor::seek_all_at_once(-1.0, 3).alpha, 0.0);
}

#[test]
fn completion_needs_a_message() {
    assert!(!RevealCursor::complete(0).is_complete(0));
    assert!(RevealCursor::complete(1).is_complete(1));
}

#[test]
fn auto_forward_waits_one_tick() {
    let mut af = AutoForward::start();
    assert_eq!(af.advance(0.1, 0.05), 0.0);
    assert!((af.advance(0.1, 0.05) - 2.0).abs() < 1e-9);
    assert!((af.advance(0.025, 0.05) - 2.5).abs() < 1e-9);
    assert!((af.advance(1.0, 0.0) - 2.5).abs() < 1e-9);
}
