//! Hero content timeline.
//!
//! Plays once, `HERO_SETTLE_DELAY` after the vault intro has faded: the
//! content container fades in, then the badge, the two heading lines
//! (staggered), the portrait with a springy scale and finally the scroll
//! hint. The typewriter starts when the timeline completes.

use crate::{
    animation::anim::Tween,
    animation::ease::Ease,
    animation::style::StyleState,
    foundation::core::{Millis, Vec2},
    foundation::error::MotionResult,
    sequence::engine::{SequenceScript, SequenceStage},
};

/// Offset from the hero start at which the typewriter begins.
pub const HERO_TYPEWRITER_AT: Millis = Millis(2350);

/// Number of heading lines revealed one after another.
pub const HERO_HEADING_LINES: usize = 2;

/// Animated piece of the hero section.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, serde::Serialize)]
#[serde(tag = "part", content = "line", rename_all = "snake_case")]
pub enum HeroPart {
    /// Container holding the text column.
    Content,
    /// Availability badge above the heading.
    Badge,
    /// One line of the heading, top first.
    HeadingLine(usize),
    /// Portrait.
    Image,
    /// Scroll hint at the bottom of the hero.
    ScrollIcon,
}

/// Brings one hero part from its hidden style to [`StyleState::VISIBLE`].
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct HeroAction {
    /// Part to animate.
    pub part: HeroPart,
    /// Entrance from hidden to visible.
    pub style: Tween<StyleState>,
}

fn show(part: HeroPart, from: StyleState, ms: u64, ease: Ease) -> HeroAction {
    HeroAction {
        part,
        style: Tween::new(from, StyleState::VISIBLE, Millis(ms), ease),
    }
}

fn faded(dy: f64, scale: f64) -> StyleState {
    StyleState {
        opacity: 0.0,
        translate: Vec2::new(0.0, dy),
        scale,
    }
}

/// The hero script. Offsets follow the overlapping entrance beats of the
/// page; the call-to-action row shares the portrait's beat and has no
/// element of its own.
pub fn hero_script() -> MotionResult<SequenceScript<HeroAction>> {
    let at = |ms: u64, action: HeroAction| SequenceStage::new(Millis(ms), action);
    let mut stages = vec![
        at(0, show(HeroPart::Content, faded(0.0, 1.0), 300, Ease::OutQuart)),
        at(200, show(HeroPart::Badge, faded(20.0, 0.8), 500, Ease::OutQuart)),
    ];
    for line in 0..HERO_HEADING_LINES {
        let offset = 500 + 150 * line as u64;
        stages.push(at(
            offset,
            show(
                HeroPart::HeadingLine(line),
                faded(40.0, 1.0),
                600,
                Ease::OutQuart,
            ),
        ));
    }
    stages.push(at(
        850,
        show(HeroPart::Image, faded(0.0, 0.5), 1200, Ease::OutElastic),
    ));
    stages.push(at(
        1750,
        show(HeroPart::ScrollIcon, faded(-20.0, 1.0), 500, Ease::OutQuart),
    ));
    SequenceScript::new(stages, HERO_TYPEWRITER_AT)
}

/// Sampled style of one hero part.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct HeroPartStyle {
    /// Sampled part.
    pub part: HeroPart,
    /// Current style.
    pub style: StyleState,
}

/// Folds fired [`HeroAction`]s into per-part styles. Parts whose stage has
/// not fired yet sit at their hidden style.
#[derive(Clone, Debug)]
pub struct HeroPresentation {
    parts: Vec<(HeroAction, Option<Millis>)>,
}

impl HeroPresentation {
    /// All parts of `script`, hidden.
    pub fn new(script: &SequenceScript<HeroAction>) -> Self {
        Self {
            parts: script
                .stages()
                .iter()
                .map(|s| (s.action.clone(), None))
                .collect(),
        }
    }

    /// Start the entrance of the action's part at `at`. Later repeats are ignored.
    pub fn apply(&mut self, action: &HeroAction, at: Millis) {
        let part = self.parts.iter_mut().find(|(a, _)| a.part == action.part);
        if let Some((_, started)) = part {
            started.get_or_insert(at);
        }
    }

    /// Style of every part at `now`, in script order.
    pub fn sample(&self, now: Millis) -> Vec<HeroPartStyle> {
        self.parts
            .iter()
            .map(|(action, started)| HeroPartStyle {
                part: action.part,
                style: match started {
                    Some(at) if now >= *at => action.style.sample(now.saturating_sub(*at)),
                    _ => action.style.from,
                },
            })
            .collect()
    }

    /// Every part has finished its entrance.
    pub fn is_settled(&self, now: Millis) -> bool {
        self.parts.iter().all(|(action, started)| {
            started.is_some_and(|at| {
                now >= at && action.style.is_finished(now.saturating_sub(at))
            })
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/hero.rs"]
mod tests;
