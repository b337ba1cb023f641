use super::*;
use crate::schedule::clock::VirtualClock;

const OWNER: OwnerId = OwnerId(7);

#[derive(Debug, PartialEq)]
enum Seen {
    Stage(u64, &'static str),
    Complete(u64),
}

fn script() -> SequenceScript<&'static str> {
    SequenceScript::new(
        vec![
            SequenceStage::new(Millis(400), "dial-45"),
            SequenceStage::new(Millis(1200), "dial-12"),
            SequenceStage::new(Millis(2000), "dial-38"),
            SequenceStage::new(Millis(2700), "unlocked"),
            SequenceStage::new(Millis(3800), "fade"),
        ],
        Millis(3800),
    )
    .unwrap()
}

fn run_until(
    engine: &mut SequenceEngine<&'static str>,
    clock: &mut VirtualClock,
    t: u64,
    seen: &mut Vec<Seen>,
) {
    while let Some(fired) = clock.pop_due(Millis(t)) {
        assert_eq!(fired.owner, OWNER);
        let now = clock.now().0;
        engine.on_timer(fired.id, clock, |e| match e {
            SequenceEvent::Stage { action, .. } => seen.push(Seen::Stage(now, action)),
            SequenceEvent::Complete => seen.push(Seen::Complete(now)),
        });
    }
    clock.settle(Millis(t)).unwrap();
}

#[test]
fn stages_run_in_order_at_absolute_offsets() {
    let mut clock = VirtualClock::new();
    let mut engine = SequenceEngine::new(OWNER, script());
    engine.start(&mut clock).unwrap();

    let mut seen = Vec::new();
    run_until(&mut engine, &mut clock, 10_000, &mut seen);
    assert_eq!(
        seen,
        vec![
            Seen::Stage(400, "dial-45"),
            Seen::Stage(1200, "dial-12"),
            Seen::Stage(2000, "dial-38"),
            Seen::Stage(2700, "unlocked"),
            Seen::Stage(3800, "fade"),
            Seen::Complete(3800),
        ]
    );
    assert!(engine.is_complete());
    assert_eq!(clock.pending(), 0);
}

#[test]
fn engine_keeps_one_timer_pending() {
    let mut clock = VirtualClock::new();
    let mut engine = SequenceEngine::new(OWNER, script());
    engine.start(&mut clock).unwrap();
    let mut seen = Vec::new();
    for t in [0, 500, 1300, 2100, 2800] {
        run_until(&mut engine, &mut clock, t, &mut seen);
        assert_eq!(clock.pending_for(OWNER), 1, "at {t}");
    }
}

#[test]
fn offsets_are_measured_from_start_not_chained() {
    let mut clock = VirtualClock::starting_at(Millis(1000));
    let mut engine = SequenceEngine::new(OWNER, script());
    engine.start(&mut clock).unwrap();

    // A host that only gets to run at 2500 fires both overdue stages at once,
    // and the next stage is still due at start + 2000.
    clock.settle(Millis(2500)).unwrap();
    let fired = clock.pop_due(Millis(2500)).unwrap();
    let mut seen = Vec::new();
    engine.on_timer(fired.id, &mut clock, |e| {
        if let SequenceEvent::Stage { action, .. } = e {
            seen.push(*action);
        }
    });
    assert_eq!(seen, vec!["dial-45", "dial-12"]);
    assert_eq!(clock.next_due(), Some(Millis(3000)));
}

#[test]
fn teardown_before_completion_cancels_remaining_stages() {
    let mut clock = VirtualClock::new();
    let mut engine = SequenceEngine::new(OWNER, script());
    engine.start(&mut clock).unwrap();

    let mut seen = Vec::new();
    run_until(&mut engine, &mut clock, 1500, &mut seen);
    engine.teardown(&mut clock);
    assert_eq!(clock.pending(), 0);
    run_until(&mut engine, &mut clock, 10_000, &mut seen);

    assert_eq!(
        seen,
        vec![Seen::Stage(400, "dial-45"), Seen::Stage(1200, "dial-12")]
    );
    assert_eq!(engine.state(), SequenceState::Cancelled);
    assert!(!engine.is_live());
}

#[test]
fn stale_timer_ids_are_ignored() {
    let mut clock = VirtualClock::new();
    let mut engine = SequenceEngine::new(OWNER, script());
    engine.start(&mut clock).unwrap();
    let stale = engine.pending_timer().unwrap();
    engine.teardown(&mut clock);

    let mut events = 0;
    engine.on_timer(stale, &mut clock, |_| events += 1);
    assert_eq!(events, 0);
}

#[test]
fn starting_twice_is_an_error() {
    let mut clock = VirtualClock::new();
    let mut engine = SequenceEngine::new(OWNER, script());
    engine.start(&mut clock).unwrap();
    assert!(engine.start(&mut clock).is_err());
}

#[test]
fn equal_offsets_keep_declared_order() {
    let script = SequenceScript::new(
        vec![
            SequenceStage::new(Millis(100), "a"),
            SequenceStage::new(Millis(100), "b"),
        ],
        Millis(150),
    )
    .unwrap();
    let mut clock = VirtualClock::new();
    let mut engine = SequenceEngine::new(OWNER, script);
    engine.start(&mut clock).unwrap();
    let mut seen = Vec::new();
    run_until(&mut engine, &mut clock, 1000, &mut seen);
    assert_eq!(
        seen,
        vec![Seen::Stage(100, "a"), Seen::Stage(100, "b"), Seen::Complete(150)]
    );
}

#[test]
fn invalid_scripts_are_rejected() {
    assert!(SequenceScript::<()>::new(vec![], Millis(10)).is_err());
    assert!(
        SequenceScript::new(
            vec![
                SequenceStage::new(Millis(200), ()),
                SequenceStage::new(Millis(100), ()),
            ],
            Millis(300),
        )
        .is_err()
    );
    assert!(SequenceScript::new(vec![SequenceStage::new(Millis(200), ())], Millis(100)).is_err());
}
