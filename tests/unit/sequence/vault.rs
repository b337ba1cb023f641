use super::*;
use crate::schedule::clock::VirtualClock;
use crate::schedule::lifecycle::Lifecycle;
use crate::schedule::timer::{OwnerId, Scheduler};
use crate::sequence::engine::{SequenceEngine, SequenceEvent};

#[test]
fn script_has_the_fixed_dial_offsets() {
    let script = vault_script().unwrap();
    let dials: Vec<(u64, String)> = script
        .stages()
        .iter()
        .filter_map(|s| match &s.action {
            VaultAction::Dial { label, .. } => Some((s.offset.0, label.clone())),
            VaultAction::Unlocked => Some((s.offset.0, "UNLOCKED".to_string())),
            _ => None,
        })
        .collect();
    assert_eq!(
        dials,
        vec![
            (400, "45".to_string()),
            (1200, "45 • 12".to_string()),
            (2000, "45 • 12 • 38".to_string()),
            (2700, "UNLOCKED".to_string()),
        ]
    );
    assert_eq!(script.complete_at(), VAULT_COMPLETE_AT);
}

#[test]
fn every_tween_in_the_script_is_valid() {
    for stage in vault_script().unwrap().stages() {
        let tweens: Vec<&Tween<f64>> = match &stage.action {
            VaultAction::DialJiggle { rotation } => vec![rotation],
            VaultAction::Vibrate { dx, dy } => vec![dx, dy],
            VaultAction::RetractLockBar { scale_x } => vec![scale_x],
            VaultAction::OpenPanels { percent } => vec![percent],
            VaultAction::FadeMechanism { opacity, scale } => vec![opacity, scale],
            VaultAction::FadeLoader { opacity } => vec![opacity],
            VaultAction::Dial { .. } | VaultAction::Unlocked => vec![],
        };
        for tw in tweens {
            tw.validate().unwrap();
        }
    }
}

#[test]
fn presentation_follows_the_engine() {
    let mut clock = VirtualClock::new();
    let mut engine = SequenceEngine::new(OwnerId(1), vault_script().unwrap());
    let mut view = VaultPresentation::new();
    engine.start(&mut clock).unwrap();
    assert_eq!(view.label(), LOCKED_LABEL);

    let mut completed_at = None;
    while let Some(fired) = clock.pop_due(Millis(5000)) {
        let now = clock.now();
        engine.on_timer(fired.id, &mut clock, |e| match e {
            SequenceEvent::Stage { action, .. } => view.apply(action, now),
            SequenceEvent::Complete => completed_at = Some(now),
        });
        if now == Millis(1200) {
            assert_eq!(view.label(), "45 • 12");
            assert_eq!(view.sample(now).dial_angle_deg, -35.0);
        }
    }
    assert_eq!(completed_at, Some(Millis(4100)));
    assert_eq!(view.label(), "UNLOCKED");
    assert_eq!(view.phase(), VaultPhase::Fading);

    let end = view.sample(Millis(5000));
    assert_eq!(end.lock_bar_scale_x, 0.0);
    assert_eq!(end.panel_percent, 101.0);
    assert_eq!(end.loader_opacity, 0.0);
    assert_eq!(end.mechanism_opacity, 0.0);
    assert!((end.mechanism_scale - 0.8).abs() < 1e-12);
}

#[test]
fn micro_animations_are_relative_to_the_dial() {
    let mut view = VaultPresentation::new();
    view.apply(&dial("45", 45.0), Millis(400));
    view.apply(&jiggle(5.0, 4), Millis(400));
    // Half-way through the first pass of the jiggle.
    let f = view.sample(Millis(500));
    assert!((f.dial_angle_deg - 47.5).abs() < 1e-9, "{}", f.dial_angle_deg);
    // Before the effect starts nothing is added.
    assert_eq!(view.sample(Millis(399)).dial_angle_deg, 45.0);
}
