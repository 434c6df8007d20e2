use super::*;

fn placed(bottom: usize) -> AnnotationSlot {
    AnnotationSlot {
        target: Some(0..=bottom),
        visible: true,
        ..AnnotationSlot::default()
    }
}

#[test]
fn alpha_follows_cursor_around_bottom_char() {
    let mut slot = placed(2);
    slot.update_alpha_at(1, 0.7);
    assert_eq!(slot.alpha, 0.0);
    slot.update_alpha_at(2, 0.25);
    assert_eq!(slot.alpha, 0.25);
    slot.update_alpha_at(3, 0.0);
    assert_eq!(slot.alpha, 1.0);
}

#[test]
fn unplaced_slot_stays_transparent() {
    let mut slot = AnnotationSlot::default();
    slot.update_alpha_at(10, 1.0);
    assert_eq!(slot.alpha, 0.0);
    slot.update_alpha(3.0);
    assert_eq!(slot.alpha, 1.0);
}

#[test]
fn pool_grows_and_hides_surplus() {
    let mut pool = SlotPool::new();
    pool.prepare(3);
    assert_eq!(pool.len(), 3);
    assert_eq!(pool.capacity(), 3);

    pool.get_mut(2).unwrap().visible = true;
    pool.prepare(1);
    assert_eq!(pool.len(), 1);
    assert_eq!(pool.capacity(), 3);
    assert!(pool.get(2).is_none());

    pool.prepare(3);
    assert!(pool.active().iter().all(|s| !s.visible && s.alpha == 0.0));
}

#[test]
fn pool_wide_alpha_updates() {
    let mut pool = SlotPool::new();
    pool.prepare(2);
    pool.get_mut(0).unwrap().target = Some(0..=0);
    pool.get_mut(1).unwrap().target = Some(1..=3);

    pool.follow_cursor(1, 0.5);
    let alphas: Vec<f32> = pool.active().iter().map(|s| s.alpha).collect();
    assert_eq!(alphas, vec![1.0, 0.0]);

    pool.set_alpha(0.4);
    assert!(pool.active().iter().all(|s| s.alpha == 0.4));

    pool.hide_all();
    assert!(pool.is_empty());
}
