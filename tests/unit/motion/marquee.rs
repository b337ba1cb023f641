use super::*;

#[test]
fn offset_wraps_every_period() {
    let m = Marquee::new(1000.0, 0.5).unwrap();
    assert_eq!(m.period(), 2000.0);
    for t in [0u64, 250, 999, 1500, 1999] {
        let a = m.offset_at(Millis(t));
        let b = m.offset_at(Millis(t + 2000));
        let c = m.offset_at(Millis(t + 6000));
        assert!((a - b).abs() < 1e-9 && (a - c).abs() < 1e-9, "t={t}");
    }
    assert_eq!(m.offset_at(Millis(500)), -250.0);
    assert_eq!(m.offset_at(Millis(2000)), 0.0);
}

#[test]
fn distance_is_monotonic_and_offset_bounded() {
    let m = Marquee::new(300.0, 0.07).unwrap();
    let mut last = -1.0;
    for t in (0..20_000).step_by(137) {
        let d = m.distance_at(Millis(t));
        assert!(d >= last);
        last = d;
        let off = m.offset_at(Millis(t));
        assert!(off <= 0.0 && off > -300.0);
    }
}

#[test]
fn track_of_two_copies_loops_in_the_given_duration() {
    let m = Marquee::from_track(4800.0, 2, TECH_MARQUEE_LOOP).unwrap();
    assert_eq!(m.width(), 2400.0);
    assert!((m.period() - 60_000.0).abs() < 1e-6);
}

#[test]
fn degenerate_tracks_are_rejected() {
    assert!(Marquee::from_track(4800.0, 1, TECH_MARQUEE_LOOP).is_err());
    assert!(Marquee::from_track(4800.0, 2, Millis(0)).is_err());
    assert!(Marquee::new(0.0, 1.0).is_err());
    assert!(Marquee::new(10.0, 0.0).is_err());
}
