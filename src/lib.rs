//! folio-motion drives the animation layer of a single-page portfolio: one-shot
//! scroll reveals, the timed vault-unlock intro, a typewriter, auto-rotating
//! carousels and a handful of continuous motion drivers.
//!
//! Everything runs on an injected [`VirtualClock`], so a whole page session is
//! a deterministic function of its configuration and input script.
//!
//! # Layers
//!
//! 1. **Scheduling**: [`Scheduler`], [`VirtualClock`], [`TimerSlot`] and the
//!    [`Lifecycle`] contract every timed component implements.
//! 2. **Components**: [`VisibilityTrigger`] + [`RevealBoard`],
//!    [`SequenceEngine`] (used by the vault intro and the hero entrance),
//!    [`Typewriter`],
//!    [`CodeStream`], [`AutoRotator`], and the pure drivers in `motion`
//!    ([`Parallax`], [`Marquee`], [`CursorFollower`], [`Counter`]).
//! 3. **Page**: [`PageDirector`] wires the components from a [`PageConfig`],
//!    routes timer firings, and records a [`Trace`].
//!
//! Teardown is the central correctness concern: after
//! [`PageDirector::teardown`] no timer is pending and nothing else is
//! recorded.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod config;
mod foundation;
mod motion;
mod reveal;
mod rotation;
mod runtime;
mod schedule;
mod sequence;

pub use animation::anim::{Lerp, Tween};
pub use animation::ease::Ease;
pub use animation::style::StyleState;
pub use config::page::{
    CodeStreamConfig, CounterConfig, CursorConfig, ElementConfig, IntroConfig, MarqueeConfig,
    PageConfig, ParallaxConfig, ParallaxLayerConfig, RotatorConfig,
};
pub use foundation::core::{ElementId, Millis, Point, Rect, Rgba8, Vec2};
pub use foundation::error::{MotionError, MotionResult};
pub use motion::counter::{Counter, DEFAULT_COUNTER_DURATION};
pub use motion::cursor::{
    CURSOR_ACCENT, CURSOR_EASE_DURATION, CursorFollower, CursorFrame, CursorLook,
};
pub use motion::marquee::{Marquee, TECH_MARQUEE_LOOP};
pub use motion::parallax::{
    DEFAULT_PARALLAX_SPEED, FadeSample, HERO_GRID_FACTOR, Parallax, ParallaxField, PointerParallax,
    ScrollFade,
};
pub use reveal::geometry::{
    IntersectionEntry, LayoutSource, RootMargin, intersection_ratio, measure,
};
pub use reveal::style::{RevealBoard, RevealKind, RevealSpec};
pub use reveal::trigger::{ObservedElement, TriggerOptions, VisibilityTrigger};
pub use rotation::selector::{AutoRotator, PROJECT_PERIOD, TESTIMONIAL_COUNT, TESTIMONIAL_PERIOD};
pub use runtime::director::{
    CounterValue, DirectorState, ElementStyle, LayerOffset, PageDirector, PageFrame, RotatorFrame,
};
pub use runtime::session::{SessionAction, SessionScript, SessionStep};
pub use runtime::trace::{PageEvent, Trace, TraceEntry};
pub use schedule::clock::VirtualClock;
pub use schedule::lifecycle::Lifecycle;
pub use schedule::timer::{FiredTimer, OwnerId, Scheduler, TimerId, TimerSlot};
pub use sequence::engine::{
    SequenceEngine, SequenceEvent, SequenceScript, SequenceStage, SequenceState,
};
pub use sequence::hero::{
    HERO_HEADING_LINES, HERO_TYPEWRITER_AT, HeroAction, HeroPart, HeroPartStyle, HeroPresentation,
    hero_script,
};
pub use sequence::stream::CodeStream;
pub use sequence::typewriter::{
    Typewriter, TypewriterEvent, TypewriterOptions, TypewriterPhase, tokenize,
};
pub use sequence::vault::{
    HERO_SETTLE_DELAY, LOCKED_LABEL, VAULT_COMPLETE_AT, VaultAction, VaultFrame, VaultPhase,
    VaultPresentation, vault_script,
};
