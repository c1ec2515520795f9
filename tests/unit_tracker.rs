use cmdpal::domain::tracker::{clamp_index, ActiveItem};

#[test]
fn starts_at_first_row() {
    assert_eq!(ActiveItem::default().index(), 0);
}

#[test]
fn navigation_is_clamped_without_wraparound() {
    let mut active = ActiveItem::default();
    active = active.previous(3);
    assert_eq!(active.index(), 0);

    active = active.next(3).next(3).next(3).next(3);
    assert_eq!(active.index(), 2);

    active = active.previous(3);
    assert_eq!(active.index(), 1);
}

#[test]
fn shrinking_list_pulls_index_to_last_row() {
    let active = ActiveItem::new(7, 10);
    assert_eq!(active.clamp(4).index(), 3);
    assert_eq!(active.clamp(0).index(), 0);
    assert_eq!(active.clamp(20).index(), 7);
}

#[test]
fn navigation_on_empty_list_stays_at_zero() {
    let active = ActiveItem::default();
    assert_eq!(active.next(0).index(), 0);
    assert_eq!(active.previous(0).index(), 0);
}

#[test]
fn index_always_lands_in_range() {
    for len in 1..8 {
        for start in 0..12 {
            let active = ActiveItem::new(start, len);
            for candidate in [active, active.next(len), active.previous(len), active.clamp(len)] {
                assert!(candidate.index() < len);
            }
            assert_eq!(clamp_index(start, len), start.min(len - 1));
        }
    }
}
