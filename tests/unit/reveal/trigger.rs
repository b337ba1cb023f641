use super::*;
use crate::schedule::clock::VirtualClock;

fn entry(id: u32, ratio: f64) -> IntersectionEntry {
    IntersectionEntry {
        element: ElementId(id),
        ratio,
    }
}

fn collect(trigger: &mut VisibilityTrigger, batch: &[IntersectionEntry]) -> Vec<ElementId> {
    let mut out = Vec::new();
    trigger.deliver(batch, |id| out.push(id));
    out
}

#[test]
fn reveals_once_at_threshold_and_never_again() {
    let mut t = VisibilityTrigger::new(TriggerOptions::default()).unwrap();
    assert!(t.observe(ElementId(1)));

    assert!(collect(&mut t, &[entry(1, 0.05)]).is_empty());
    assert_eq!(collect(&mut t, &[entry(1, 0.15)]), vec![ElementId(1)]);
    assert!(t.is_revealed(ElementId(1)));
    assert!(!t.is_observed(ElementId(1)));

    // Leaves the viewport, then comes back fully visible.
    assert!(collect(&mut t, &[entry(1, 0.0)]).is_empty());
    assert!(collect(&mut t, &[entry(1, 1.0)]).is_empty());
}

#[test]
fn revealed_elements_cannot_be_observed_again() {
    let mut t = VisibilityTrigger::new(TriggerOptions::default()).unwrap();
    t.observe(ElementId(4));
    collect(&mut t, &[entry(4, 0.5)]);
    assert!(!t.observe(ElementId(4)));
    assert_eq!(
        t.element(ElementId(4)),
        Some(ObservedElement {
            id: ElementId(4),
            revealed: true
        })
    );
}

#[test]
fn batch_order_is_delivery_order() {
    let mut t = VisibilityTrigger::new(TriggerOptions::default()).unwrap();
    for id in [1, 2, 3] {
        t.observe(ElementId(id));
    }
    let got = collect(&mut t, &[entry(3, 0.9), entry(1, 0.2), entry(2, 0.01)]);
    assert_eq!(got, vec![ElementId(3), ElementId(1)]);
    assert_eq!(t.observed_count(), 1);
}

#[test]
fn zero_threshold_still_requires_visibility() {
    let opts = TriggerOptions {
        threshold: 0.0,
        ..TriggerOptions::default()
    };
    let mut t = VisibilityTrigger::new(opts).unwrap();
    t.observe(ElementId(1));
    assert!(collect(&mut t, &[entry(1, 0.0)]).is_empty());
    assert_eq!(collect(&mut t, &[entry(1, 0.001)]).len(), 1);
}

#[test]
fn unknown_and_unobserved_entries_are_ignored() {
    let mut t = VisibilityTrigger::new(TriggerOptions::default()).unwrap();
    t.observe(ElementId(1));
    assert!(t.unobserve(ElementId(1)));
    assert!(collect(&mut t, &[entry(1, 1.0), entry(9, 1.0)]).is_empty());
    assert!(!t.is_revealed(ElementId(1)));
}

#[test]
fn disarmed_trigger_holds_elements_until_armed() {
    let mut t = VisibilityTrigger::disarmed(TriggerOptions::default()).unwrap();
    t.observe(ElementId(1));
    assert!(collect(&mut t, &[entry(1, 1.0)]).is_empty());
    assert!(t.is_observed(ElementId(1)));
    t.arm();
    assert_eq!(collect(&mut t, &[entry(1, 1.0)]), vec![ElementId(1)]);
}

#[test]
fn teardown_drops_everything_and_silences_callbacks() {
    let mut clock = VirtualClock::new();
    let mut t = VisibilityTrigger::new(TriggerOptions::default()).unwrap();
    t.observe(ElementId(1));
    t.observe(ElementId(2));
    t.teardown(&mut clock);
    assert_eq!(t.observed_count(), 0);
    assert!(!t.is_live());
    assert!(collect(&mut t, &[entry(1, 1.0)]).is_empty());
    assert!(!t.observe(ElementId(3)));
    assert!(t.start(&mut clock).is_err());
}

#[test]
fn invalid_thresholds_are_rejected() {
    for threshold in [-0.1, 1.5, f64::NAN] {
        let opts = TriggerOptions {
            threshold,
            ..TriggerOptions::default()
        };
        assert!(VisibilityTrigger::new(opts).is_err(), "{threshold}");
    }
}

#[test]
fn nan_ratio_never_reveals() {
    let mut t = VisibilityTrigger::new(TriggerOptions::default()).unwrap();
    t.observe(ElementId(1));
    assert!(collect(&mut t, &[entry(1, f64::NAN)]).is_empty());
    assert!(t.is_observed(ElementId(1)));
    assert_eq!(collect(&mut t, &[entry(1, 0.5)]), vec![ElementId(1)]);
}
