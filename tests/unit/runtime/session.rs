use super::*;
use crate::config::page::PageConfig;

#[test]
fn parses_tagged_steps() {
    let script = SessionScript::from_json(
        r#"{
            "steps": [
                { "at": 0, "kind": "pointer_move", "x": 10, "y": 20 },
                { "at": 4000, "kind": "scroll", "y": 900 },
                { "at": 4000, "kind": "select", "rotator": "projects", "index": 1 },
                { "at": 4500, "kind": "frame" }
            ],
            "until": 9000
        }"#,
    )
    .unwrap();
    assert_eq!(script.steps.len(), 4);
    assert_eq!(script.steps[1].action, SessionAction::Scroll { y: 900.0 });
    assert_eq!(script.until, Some(Millis(9000)));
}

#[test]
fn unsorted_steps_are_rejected() {
    let err = SessionScript::from_json(
        r#"{ "steps": [ { "at": 10, "kind": "frame" }, { "at": 5, "kind": "frame" } ] }"#,
    );
    assert!(err.is_err());
    let early_until =
        SessionScript::from_json(r#"{ "steps": [ { "at": 10, "kind": "frame" } ], "until": 5 }"#);
    assert!(early_until.is_err());
}

#[test]
fn run_replays_against_the_director() {
    let script = SessionScript::from_json(
        r#"{
            "steps": [
                { "at": 4000, "kind": "select", "rotator": "testimonials", "index": 2 },
                { "at": 4000, "kind": "frame" },
                { "at": 5000, "kind": "teardown" }
            ],
            "until": 20000
        }"#,
    )
    .unwrap();
    let mut d = PageDirector::mount(PageConfig::default()).unwrap();
    d.start().unwrap();
    let frames = script.run(&mut d).unwrap();
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].at, Millis(4000));
    assert_eq!(frames[0].rotators[0].active, 2);
    assert_eq!(d.now(), Millis(20_000));
    assert_eq!(d.pending_timers(), 0);
}

#[test]
fn stepping_actions_move_the_named_rotator() {
    let script = SessionScript::from_json(
        r#"{
            "steps": [
                { "at": 1000, "kind": "select_prev", "rotator": "testimonials" },
                { "at": 1000, "kind": "frame" },
                { "at": 2000, "kind": "select_next", "rotator": "testimonials" },
                { "at": 2000, "kind": "frame" }
            ]
        }"#,
    )
    .unwrap();
    let mut d = PageDirector::mount(PageConfig::default()).unwrap();
    d.start().unwrap();
    let frames = script.run(&mut d).unwrap();
    assert_eq!(frames[0].rotators[0].active, 2);
    assert_eq!(frames[1].rotators[0].active, 0);
}

#[test]
fn bad_selection_aborts_the_replay() {
    let script = SessionScript::from_json(
        r#"{ "steps": [ { "at": 0, "kind": "select", "rotator": "projects", "index": 9 } ] }"#,
    )
    .unwrap();
    let mut d = PageDirector::mount(PageConfig::default()).unwrap();
    d.start().unwrap();
    assert!(script.run(&mut d).is_err());
}

#[test]
fn missing_script_keeps_the_io_error_as_source() {
    match SessionScript::from_path("/definitely/not/here/session.json") {
        Err(MotionError::Other(inner)) => {
            assert!(inner.to_string().contains("read session script"));
            assert!(inner.root_cause().downcast_ref::<std::io::Error>().is_some());
        }
        other => panic!("expected an IO error, got {other:?}"),
    }
}
