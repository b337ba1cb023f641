use super::*;
use crate::schedule::clock::VirtualClock;

fn tick_until(stream: &mut CodeStream, clock: &mut VirtualClock, t: u64) -> usize {
    let mut n = 0;
    while let Some(fired) = clock.pop_due(Millis(t)) {
        if stream.on_timer(fired.id, clock) {
            n += 1;
        }
    }
    clock.settle(Millis(t)).unwrap();
    n
}

#[test]
fn rows_shift_down_every_interval() {
    let mut clock = VirtualClock::new();
    let mut s = CodeStream::new(OwnerId(1), 9, 3, 16, Millis(200)).unwrap();
    s.start(&mut clock).unwrap();
    assert!(s.rows().all(str::is_empty));

    assert_eq!(tick_until(&mut s, &mut clock, 200), 1);
    let first: String = s.rows().next().unwrap().to_string();
    assert_eq!(first.len(), 16);
    assert!(first.chars().all(|c| c == '0' || c == '1'));

    assert_eq!(tick_until(&mut s, &mut clock, 400), 1);
    let rows: Vec<&str> = s.rows().collect();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[1], first);
}

#[test]
fn same_seed_same_rows() {
    let mut clock_a = VirtualClock::new();
    let mut clock_b = VirtualClock::new();
    let mut a = CodeStream::new(OwnerId(1), 5, 3, 8, Millis(200)).unwrap();
    let mut b = CodeStream::new(OwnerId(1), 5, 3, 8, Millis(200)).unwrap();
    a.start(&mut clock_a).unwrap();
    b.start(&mut clock_b).unwrap();
    tick_until(&mut a, &mut clock_a, 1000);
    tick_until(&mut b, &mut clock_b, 1000);
    assert!(a.rows().eq(b.rows()));
}

#[test]
fn teardown_cancels_the_interval() {
    let mut clock = VirtualClock::new();
    let mut s = CodeStream::new(OwnerId(1), 1, 3, 16, Millis(200)).unwrap();
    s.start(&mut clock).unwrap();
    tick_until(&mut s, &mut clock, 300);
    s.teardown(&mut clock);
    assert_eq!(clock.pending(), 0);
    assert_eq!(tick_until(&mut s, &mut clock, 5000), 0);
    assert!(s.start(&mut clock).is_err());
}

#[test]
fn invalid_shapes_are_rejected() {
    assert!(CodeStream::new(OwnerId(1), 0, 0, 16, Millis(200)).is_err());
    assert!(CodeStream::new(OwnerId(1), 0, 3, 0, Millis(200)).is_err());
    assert!(CodeStream::new(OwnerId(1), 0, 3, 16, Millis(0)).is_err());
}
