use super::*;
use crate::reveal::style::RevealKind;

fn card_page() -> PageConfig {
    PageConfig::from_json(
        r#"{
            "typewriter": { "strings": ["hi"], "loop_forever": false },
            "elements": [
                { "id": 1, "rect": { "x0": 0, "y0": 1000, "x1": 100, "y1": 1100 },
                  "classes": "reveal-on-scroll" },
                { "id": 2, "rect": { "x0": 0, "y0": 3000, "x1": 100, "y1": 3100 },
                  "classes": "reveal-zoom reveal-delay-200" },
                { "id": 3, "rect": { "x0": 0, "y0": 200, "x1": 100, "y1": 300 },
                  "classes": "reveal-from-left" }
            ],
            "counters": [ { "element": 2, "target": 40, "duration": 1000 } ],
            "cursor": { "interactive": [7] }
        }"#,
    )
    .unwrap()
}

fn events(d: &PageDirector) -> Vec<&PageEvent> {
    d.trace().entries().iter().map(|e| &e.event).collect()
}

fn at_of(d: &PageDirector, pred: impl Fn(&PageEvent) -> bool) -> Vec<Millis> {
    d.trace().filter(pred).map(|e| e.at).collect()
}

#[test]
fn intro_completes_then_trigger_then_hero() {
    let mut d = PageDirector::mount(PageConfig::default()).unwrap();
    d.start().unwrap();
    d.advance_to(Millis(4099)).unwrap();
    assert!(!d.is_intro_complete());
    assert!(!d.trigger().is_armed());

    d.advance_to(Millis(4100)).unwrap();
    assert!(d.is_intro_complete());
    assert!(d.trigger().is_armed());
    assert!(!d.is_hero_started());
    assert_eq!(at_of(&d, |e| *e == PageEvent::IntroComplete), vec![Millis(4100)]);

    d.advance_to(Millis(4200)).unwrap();
    assert!(d.is_hero_started());
    assert_eq!(at_of(&d, |e| *e == PageEvent::HeroStarted), vec![Millis(4200)]);
}

#[test]
fn hero_entrance_plays_before_the_typewriter() {
    let mut d = PageDirector::mount(PageConfig::default()).unwrap();
    d.start().unwrap();
    d.advance_to(Millis(4200)).unwrap();
    let f = d.frame();
    assert_eq!(f.hero.len(), 6);
    assert_eq!(f.typewriter, None);

    d.advance_to(Millis(6549)).unwrap();
    assert!(!d.is_hero_settled());
    assert_eq!(d.frame().typewriter, None);
    let parts: Vec<Millis> = at_of(&d, |e| matches!(e, PageEvent::HeroStage { .. }));
    assert_eq!(
        parts,
        [4200, 4400, 4700, 4850, 5050, 5950].map(Millis).to_vec()
    );

    d.advance_to(Millis(6550)).unwrap();
    assert!(d.is_hero_settled());
    assert_eq!(at_of(&d, |e| *e == PageEvent::HeroSettled), vec![Millis(6550)]);
    assert!(d.frame().hero.iter().all(|p| p.style == StyleState::VISIBLE));
    assert!(d.frame().typewriter.is_some());

    // typed.js default speed: first step 30 ms after the start
    d.advance_to(Millis(6580)).unwrap();
    assert_eq!(d.typewriter().map(Typewriter::text), Some("S".to_string()));
}

#[test]
fn intro_stages_are_recorded_in_order() {
    let mut d = PageDirector::mount(PageConfig::default()).unwrap();
    d.start().unwrap();
    d.advance_to(Millis(5000)).unwrap();
    let stages: Vec<usize> = d
        .trace()
        .entries()
        .iter()
        .filter_map(|e| match e.event {
            PageEvent::IntroStage { index, .. } => Some(index),
            _ => None,
        })
        .collect();
    let expected: Vec<usize> = (0..stages.len()).collect();
    assert_eq!(stages, expected);
    assert!(!stages.is_empty());
    assert_eq!(
        d.trace().filter(|e| *e == PageEvent::IntroComplete).count(),
        1
    );
}

#[test]
fn code_streams_run_only_while_the_loader_is_up() {
    let mut d = PageDirector::mount(PageConfig::default()).unwrap();
    d.start().unwrap();
    d.advance_to(Millis(1000)).unwrap();
    let frame = d.frame();
    assert_eq!(frame.code_streams.len(), 2);
    assert!(frame.code_streams[0].iter().all(|row| row.len() == 16));
    assert!(frame.intro.is_some());

    d.advance_to(Millis(5000)).unwrap();
    let frame = d.frame();
    assert!(frame.code_streams.is_empty());
    assert!(frame.intro.is_none());
    assert_eq!(at_of(&d, |e| *e == PageEvent::CodeStreamsStopped), vec![Millis(4100)]);
}

#[test]
fn teardown_mid_intro_cancels_everything() {
    let mut d = PageDirector::mount(PageConfig::default()).unwrap();
    d.start().unwrap();
    d.advance_to(Millis(1500)).unwrap();
    d.teardown();
    assert_eq!(d.pending_timers(), 0);
    let recorded = d.trace().len();

    d.advance_to(Millis(60_000)).unwrap();
    assert_eq!(d.trace().len(), recorded);
    assert!(!d.is_intro_complete());
    assert!(matches!(events(&d).last(), Some(PageEvent::TornDown)));
    // nothing past the 1400 ms stage ran
    let last_stage_at = d
        .trace()
        .filter(|e| matches!(e, PageEvent::IntroStage { .. }))
        .map(|e| e.at)
        .max();
    assert_eq!(last_stage_at, Some(Millis(1400)));
}

#[test]
fn reveals_wait_for_the_intro_and_fire_once() {
    let mut d = PageDirector::mount(card_page()).unwrap();
    d.start().unwrap();
    // 15 % of element 1 visible, but the trigger is not armed yet
    assert_eq!(d.scroll_to(115.0).unwrap(), 0);
    assert!(!d.is_revealed(ElementId(1)));

    d.advance_to(Millis(4100)).unwrap();
    // arming delivers the current viewport: 1 and 3 are in view
    assert!(d.is_revealed(ElementId(1)));
    assert!(d.is_revealed(ElementId(3)));
    assert!(!d.is_revealed(ElementId(2)));

    assert_eq!(d.scroll_to(0.0).unwrap(), 0);
    assert_eq!(d.scroll_to(115.0).unwrap(), 0);
    let reveals = d
        .trace()
        .filter(|e| *e == PageEvent::Revealed { element: ElementId(1) })
        .count();
    assert_eq!(reveals, 1);
}

#[test]
fn below_threshold_never_reveals() {
    let mut d = PageDirector::mount(card_page()).unwrap();
    d.start().unwrap();
    d.advance_to(Millis(4100)).unwrap();
    assert_eq!(d.scroll_to(1000.0).unwrap(), 1);
    // element 2 spans 3000..3100; viewport bottom at 3005 shows 5 %
    assert_eq!(d.scroll_to(2105.0).unwrap(), 0);
    assert!(!d.is_revealed(ElementId(2)));
    assert_eq!(d.scroll_to(2115.0).unwrap(), 1);
    assert!(d.is_revealed(ElementId(2)));
}

#[test]
fn reveal_styles_and_counters_follow_the_reveal_time() {
    let mut d = PageDirector::mount(card_page()).unwrap();
    d.start().unwrap();
    d.advance_to(Millis(4200)).unwrap();
    d.scroll_to(2500.0).unwrap();

    let style_of = |f: &PageFrame, id: u32| {
        f.reveals
            .iter()
            .find(|s| s.element == ElementId(id))
            .map(|s| s.style)
    };

    // reveal-delay-200 holds the initial state
    let f = d.frame();
    assert_eq!(style_of(&f, 2), Some(RevealKind::Zoom.initial()));
    assert_eq!(f.counters, vec![CounterValue { element: ElementId(2), value: 0 }]);

    d.advance_to(Millis(4700)).unwrap();
    assert_eq!(d.frame().counters[0].value, 20);

    d.advance_to(Millis(5200)).unwrap();
    let f = d.frame();
    assert_eq!(style_of(&f, 2), Some(StyleState::VISIBLE));
    assert_eq!(f.counters[0].value, 40);
    assert_eq!(
        at_of(&d, |e| matches!(e, PageEvent::CounterStarted { .. })),
        vec![Millis(4200)]
    );
}

#[test]
fn removed_elements_are_skipped_silently() {
    let mut d = PageDirector::mount(card_page()).unwrap();
    d.start().unwrap();
    d.advance_to(Millis(4100)).unwrap();
    d.set_layout(Box::new(BTreeMap::<ElementId, Rect>::new()));
    assert_eq!(d.scroll_to(2500.0).unwrap(), 0);
    assert!(d.trigger().is_observed(ElementId(2)));
}

#[test]
fn typewriter_starts_when_the_hero_settles() {
    let mut d = PageDirector::mount(card_page()).unwrap();
    d.start().unwrap();
    d.advance_to(Millis(6550)).unwrap();
    assert_eq!(d.frame().typewriter.as_deref(), Some("_"));

    d.advance_to(Millis(6610)).unwrap();
    assert_eq!(d.frame().typewriter.as_deref(), Some("hi_"));
    let typed: Vec<_> = d
        .trace()
        .filter(|e| matches!(e, PageEvent::StringTyped { .. }))
        .map(|e| (e.at, e.event.clone()))
        .collect();
    assert_eq!(
        typed,
        vec![(
            Millis(6610),
            PageEvent::StringTyped {
                string_index: 0,
                text: "hi".to_string()
            }
        )]
    );
    assert_eq!(
        at_of(&d, |e| *e == PageEvent::TypewriterFinished),
        vec![Millis(6610)]
    );
}

#[test]
fn testimonials_cycle_back_after_three_periods() {
    let mut d = PageDirector::mount(PageConfig::default()).unwrap();
    d.start().unwrap();
    d.advance_to(Millis(24_000)).unwrap();
    let ticks = at_of(&d, |e| {
        matches!(e, PageEvent::Rotated { rotator, manual: false, .. } if rotator == "testimonials")
    });
    assert_eq!(ticks, vec![Millis(8000), Millis(16_000), Millis(24_000)]);
    assert_eq!(d.rotator_index("testimonials"), Some(0));
}

#[test]
fn manual_selection_restarts_the_window() {
    let mut d = PageDirector::mount(PageConfig::default()).unwrap();
    d.start().unwrap();
    d.advance_to(Millis(6000)).unwrap();
    d.select("testimonials", 2).unwrap();
    assert_eq!(d.rotator_index("testimonials"), Some(2));

    d.advance_to(Millis(13_999)).unwrap();
    assert_eq!(d.rotator_index("testimonials"), Some(2));
    d.advance_to(Millis(14_000)).unwrap();
    assert_eq!(d.rotator_index("testimonials"), Some(0));

    assert!(d.select("testimonials", 3).is_err());
    assert!(d.select("nope", 0).is_err());
}

#[test]
fn stepping_a_rotator_wraps_and_is_traced() {
    let mut d = PageDirector::mount(PageConfig::default()).unwrap();
    d.start().unwrap();
    d.advance_to(Millis(1000)).unwrap();
    assert_eq!(d.select_prev("testimonials").unwrap(), 2);
    assert_eq!(d.select_next("testimonials").unwrap(), 0);
    assert_eq!(d.select_next("testimonials").unwrap(), 1);
    assert_eq!(d.rotator_index("testimonials"), Some(1));

    let manual: Vec<usize> = d
        .trace()
        .filter(|e| matches!(e, PageEvent::Rotated { manual: true, .. }))
        .filter_map(|e| match &e.event {
            PageEvent::Rotated { index, .. } => Some(*index),
            _ => None,
        })
        .collect();
    assert_eq!(manual, vec![2, 0, 1]);

    // the last manual step restarts the 8 s window
    d.advance_to(Millis(8999)).unwrap();
    assert_eq!(d.rotator_index("testimonials"), Some(1));
    d.advance_to(Millis(9000)).unwrap();
    assert_eq!(d.rotator_index("testimonials"), Some(2));

    assert!(d.select_next("nope").is_err());
    d.teardown();
    assert!(d.select_prev("testimonials").is_err());
}

#[test]
fn continuous_drivers_sample_from_inputs() {
    let mut d = PageDirector::mount(card_page()).unwrap();
    d.start().unwrap();
    d.scroll_to(100.0).unwrap();
    d.pointer_move(Point::new(820.0, 450.0));
    d.advance_to(Millis(30_000)).unwrap();

    let f = d.frame();
    let beams: Vec<f64> = f.parallax.iter().map(|l| l.y).collect();
    assert_eq!(beams.len(), 4);
    assert!((beams[0] + 5.0).abs() < 1e-9);
    assert!((beams[3] + 20.0).abs() < 1e-9);
    assert!((f.grid_offset.x - 3.0).abs() < 1e-9);
    assert!(f.grid_offset.y.abs() < 1e-9);
    assert!((f.scroll_hint.opacity - (1.0 - 2.0 * 100.0 / 450.0)).abs() < 1e-9);
    // half of the 60 s loop over a 2400 px copy
    assert!((f.marquee_offset.unwrap() + 1200.0).abs() < 1e-6);
    assert_eq!(f.cursor.position, Point::new(820.0, 450.0));
}

#[test]
fn hover_is_recorded_for_interactive_elements_only() {
    let mut d = PageDirector::mount(card_page()).unwrap();
    d.start().unwrap();
    assert!(!d.pointer_enter(ElementId(99)));
    assert!(d.pointer_enter(ElementId(7)));
    assert!(d.pointer_leave(ElementId(7)));
    let hovers = d
        .trace()
        .filter(|e| matches!(e, PageEvent::HoverChanged { .. }))
        .count();
    assert_eq!(hovers, 2);

    d.set_cursor_visible(false);
    assert_eq!(d.frame().cursor.look.opacity, 0.0);
}

#[test]
fn without_intro_the_page_opens_immediately() {
    let cfg = PageConfig::from_json(r#"{ "intro": { "enabled": false } }"#).unwrap();
    let mut d = PageDirector::mount(cfg).unwrap();
    d.start().unwrap();
    assert!(d.trigger().is_armed());
    assert!(d.frame().intro.is_none());
    assert!(d.frame().code_streams.iter().all(|rows| rows.iter().all(String::is_empty)));
    d.advance_to(Millis(100)).unwrap();
    assert!(d.is_hero_started());
}

#[test]
fn lifecycle_misuse_is_rejected() {
    let mut d = PageDirector::mount(PageConfig::default()).unwrap();
    d.start().unwrap();
    assert!(d.start().is_err());
    d.advance_to(Millis(500)).unwrap();
    assert!(d.advance_to(Millis(499)).is_err());
    assert!(d.scroll_to(f64::NAN).is_err());

    d.teardown();
    d.teardown();
    assert_eq!(d.state(), DirectorState::TornDown);
    assert_eq!(d.scroll_to(10.0).unwrap(), 0);
    assert!(d.select("testimonials", 1).is_err());
}
