//! Whole-page orchestration.
//!
//! [`PageDirector`] owns every component of the page together with the
//! virtual clock they schedule on. Each component gets its own [`OwnerId`]
//! at mount time and firings are routed back to it by owner, so components
//! never see each other's timers.
//!
//! Control flow follows the page: the vault intro runs once and completes
//! when the loader has faded. Completion arms the reveal trigger and, after a
//! short settle delay, plays the hero entrance timeline; the typewriter
//! starts when that timeline completes. Carousels and continuous drivers run
//! for the whole session until [`PageDirector::teardown`].

use std::collections::BTreeMap;

use crate::{
    animation::style::StyleState,
    config::page::PageConfig,
    foundation::core::{ElementId, Millis, Point, Rect, Vec2},
    foundation::error::{MotionError, MotionResult},
    foundation::math::stable_hash64,
    motion::counter::Counter,
    motion::cursor::{CursorFollower, CursorFrame},
    motion::marquee::Marquee,
    motion::parallax::{FadeSample, ParallaxField, PointerParallax, ScrollFade},
    reveal::geometry::{LayoutSource, measure},
    reveal::style::RevealBoard,
    reveal::trigger::VisibilityTrigger,
    rotation::selector::AutoRotator,
    runtime::trace::{PageEvent, Trace},
    schedule::clock::VirtualClock,
    schedule::lifecycle::Lifecycle,
    schedule::timer::{FiredTimer, OwnerId, Scheduler, TimerSlot},
    sequence::engine::{SequenceEngine, SequenceEvent},
    sequence::hero::{HeroAction, HeroPartStyle, HeroPresentation, hero_script},
    sequence::stream::CodeStream,
    sequence::typewriter::{Typewriter, TypewriterEvent, TypewriterPhase},
    sequence::vault::{VaultAction, VaultFrame, VaultPresentation, vault_script},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Route {
    Intro,
    Hero,
    HeroTimeline,
    Typewriter,
    Rotator(usize),
    Stream(usize),
}

/// Lifecycle of a [`PageDirector`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum DirectorState {
    /// Built but not started.
    Mounted,
    /// Started and reacting to time and input.
    Running,
    /// Torn down; nothing is scheduled.
    TornDown,
}

/// Active item of one carousel.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RotatorFrame {
    /// Carousel name.
    pub name: String,
    /// Index of the item on screen.
    pub active: usize,
}

/// Sampled reveal style of one element.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ElementStyle {
    /// Revealable element.
    pub element: ElementId,
    /// Current style.
    pub style: StyleState,
}

/// Scroll-parallax offset of one layer.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct LayerOffset {
    /// Layer element.
    pub element: ElementId,
    /// Vertical offset in pixels.
    pub y: f64,
}

/// Displayed value of one counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct CounterValue {
    /// Counter element.
    pub element: ElementId,
    /// Number on screen.
    pub value: u64,
}

/// Snapshot of every continuously animated value at one instant.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PageFrame {
    /// Clock time of the snapshot.
    pub at: Millis,
    /// Loader state until it has faded out.
    pub intro: Option<VaultFrame>,
    /// Hero parts in entrance order.
    pub hero: Vec<HeroPartStyle>,
    /// Typewriter text with cursor, once the hero has settled.
    pub typewriter: Option<String>,
    /// Active item of every carousel.
    pub rotators: Vec<RotatorFrame>,
    /// Rows of every intro code stream.
    pub code_streams: Vec<Vec<String>>,
    /// Style of every revealable element.
    pub reveals: Vec<ElementStyle>,
    /// Scroll-parallax layer offsets.
    pub parallax: Vec<LayerOffset>,
    /// Pointer-parallax offset of the hero grid.
    pub grid_offset: Vec2,
    /// Scroll hint fade.
    pub scroll_hint: FadeSample,
    /// Marquee track offset, when a marquee is configured.
    pub marquee_offset: Option<f64>,
    /// Cursor follower.
    pub cursor: CursorFrame,
    /// Displayed value of every counter.
    pub counters: Vec<CounterValue>,
}

/// Owns and drives every motion component of one page.
pub struct PageDirector {
    config: PageConfig,
    clock: VirtualClock,
    routes: BTreeMap<OwnerId, Route>,
    layout: Box<dyn LayoutSource>,
    intro: Option<SequenceEngine<VaultAction>>,
    vault: VaultPresentation,
    intro_done: bool,
    hero: TimerSlot,
    hero_started: bool,
    hero_timeline: SequenceEngine<HeroAction>,
    hero_view: HeroPresentation,
    trigger: VisibilityTrigger,
    board: RevealBoard,
    typewriter: Option<Typewriter>,
    rotators: Vec<(String, AutoRotator)>,
    streams: Vec<CodeStream>,
    marquee: Option<Marquee>,
    marquee_origin: Millis,
    parallax: ParallaxField,
    pointer_parallax: PointerParallax,
    scroll_fade: ScrollFade,
    cursor: CursorFollower,
    counters: BTreeMap<ElementId, (Counter, Option<Millis>)>,
    scroll_y: f64,
    pointer: Option<Point>,
    trace: Trace,
    state: DirectorState,
}

impl PageDirector {
    /// Build every component from `config`, using the element rectangles it
    /// declares as the layout.
    #[tracing::instrument(skip_all, fields(elements = config.elements.len()))]
    pub fn mount(config: PageConfig) -> MotionResult<Self> {
        let layout = Box::new(config.layout());
        Self::mount_with_layout(config, layout)
    }

    /// Like [`PageDirector::mount`], with element bounds supplied by `layout`.
    pub fn mount_with_layout(
        config: PageConfig,
        layout: Box<dyn LayoutSource>,
    ) -> MotionResult<Self> {
        config.validate()?;

        let mut routes = BTreeMap::new();
        let mut next_owner = 0u32;
        let mut owner = |route: Route| {
            next_owner += 1;
            let id = OwnerId(next_owner);
            routes.insert(id, route);
            id
        };

        let intro = if config.intro.enabled {
            Some(SequenceEngine::new(owner(Route::Intro), vault_script()?))
        } else {
            None
        };
        let hero = TimerSlot::new(owner(Route::Hero));
        let hero_script = hero_script()?;
        let hero_view = HeroPresentation::new(&hero_script);
        let hero_timeline = SequenceEngine::new(owner(Route::HeroTimeline), hero_script);
        let typewriter = match &config.typewriter {
            Some(options) => Some(Typewriter::new(owner(Route::Typewriter), options.clone())?),
            None => None,
        };

        let mut rotators = Vec::with_capacity(config.rotators.len());
        for (i, rc) in config.rotators.iter().enumerate() {
            let rot = AutoRotator::new(owner(Route::Rotator(i)), rc.len, rc.period)?;
            rotators.push((rc.name.clone(), rot));
        }

        let mut streams = Vec::with_capacity(config.code_streams.len());
        for (i, sc) in config.code_streams.iter().enumerate() {
            let seed = stable_hash64(config.seed, &format!("code-stream-{i}"));
            streams.push(CodeStream::new(
                owner(Route::Stream(i)),
                seed,
                sc.rows,
                sc.width,
                sc.interval,
            )?);
        }

        let mut trigger = VisibilityTrigger::disarmed(config.reveal)?;
        let mut board = RevealBoard::new();
        for el in &config.elements {
            if let Some(spec) = el.reveal_spec()? {
                board.register(el.id, spec)?;
                trigger.observe(el.id);
            }
        }
        let mut counters = BTreeMap::new();
        for c in &config.counters {
            counters.insert(c.element, (c.counter, None));
            trigger.observe(c.element);
        }

        let marquee = config.marquee.as_ref().map(|m| m.build()).transpose()?;

        let mut parallax = ParallaxField::beams(config.parallax.first_beam, config.parallax.beams)?;
        for layer in &config.parallax.layers {
            parallax.register(layer.id, layer.layer)?;
        }
        let pointer_parallax = PointerParallax {
            factor: config.parallax.pointer_factor,
        };
        let scroll_fade = ScrollFade::new(config.hero_height())?;

        let mut cursor = CursorFollower::new();
        for id in &config.cursor.interactive {
            cursor.register_interactive(*id);
        }

        tracing::debug!(
            owners = routes.len(),
            observed = trigger.observed_count(),
            "page mounted"
        );

        Ok(Self {
            config,
            clock: VirtualClock::new(),
            routes,
            layout,
            intro,
            vault: VaultPresentation::new(),
            intro_done: false,
            hero,
            hero_started: false,
            hero_timeline,
            hero_view,
            trigger,
            board,
            typewriter,
            rotators,
            streams,
            marquee,
            marquee_origin: Millis::ZERO,
            parallax,
            pointer_parallax,
            scroll_fade,
            cursor,
            counters,
            scroll_y: 0.0,
            pointer: None,
            trace: Trace::new(),
            state: DirectorState::Mounted,
        })
    }

    /// Configuration the page was mounted with.
    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    /// Current page clock time.
    pub fn now(&self) -> Millis {
        self.clock.now()
    }

    /// Lifecycle state.
    pub fn state(&self) -> DirectorState {
        self.state
    }

    /// Events recorded so far.
    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    /// Timers still scheduled on the page clock.
    pub fn pending_timers(&self) -> usize {
        self.clock.pending()
    }

    /// Vault intro has finished, or there was none.
    pub fn is_intro_complete(&self) -> bool {
        self.intro_done
    }

    /// Hero entrance timeline has begun.
    pub fn is_hero_started(&self) -> bool {
        self.hero_started
    }

    /// The hero entrance timeline has completed.
    pub fn is_hero_settled(&self) -> bool {
        self.hero_timeline.is_complete()
    }

    /// Scroll-reveal trigger.
    pub fn trigger(&self) -> &VisibilityTrigger {
        &self.trigger
    }

    /// `id` has been revealed.
    pub fn is_revealed(&self, id: ElementId) -> bool {
        self.trigger.is_revealed(id)
    }

    /// Hero typewriter, when configured.
    pub fn typewriter(&self) -> Option<&Typewriter> {
        self.typewriter.as_ref()
    }

    /// Active item of the named carousel.
    pub fn rotator_index(&self, name: &str) -> Option<usize> {
        self.rotators
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, r)| r.active_index())
    }

    /// Replace the layout; later scrolls measure against it.
    pub fn set_layout(&mut self, layout: Box<dyn LayoutSource>) {
        self.layout = layout;
    }

    /// Start carousels and either the intro or, without one, the page itself.
    #[tracing::instrument(skip(self))]
    pub fn start(&mut self) -> MotionResult<()> {
        if self.state != DirectorState::Mounted {
            return Err(MotionError::animation("page already started"));
        }
        self.state = DirectorState::Running;
        let now = self.clock.now();
        self.trace.push(now, PageEvent::Started);
        self.marquee_origin = now;

        for (_, rot) in &mut self.rotators {
            rot.start(&mut self.clock)?;
        }
        match self.intro.as_mut() {
            Some(intro) => {
                intro.start(&mut self.clock)?;
                for stream in &mut self.streams {
                    stream.start(&mut self.clock)?;
                }
            }
            None => self.open_page(now),
        }
        Ok(())
    }

    /// Move the clock to `t`, dispatching every timer due by then. Returns
    /// the number of firings.
    #[tracing::instrument(skip(self))]
    pub fn advance_to(&mut self, t: Millis) -> MotionResult<usize> {
        if t < self.clock.now() {
            return Err(MotionError::schedule(format!(
                "cannot advance to {t}, clock is already at {}",
                self.clock.now()
            )));
        }
        let mut fired = 0;
        while let Some(timer) = self.clock.pop_due(t) {
            self.dispatch(timer)?;
            fired += 1;
        }
        self.clock.settle(t)?;
        Ok(fired)
    }

    /// [`PageDirector::advance_to`] relative to the current time.
    pub fn advance_by(&mut self, delta: Millis) -> MotionResult<usize> {
        let t = self.clock.now().saturating_add(delta);
        self.advance_to(t)
    }

    fn dispatch(&mut self, timer: FiredTimer) -> MotionResult<()> {
        let now = timer.due;
        let Some(route) = self.routes.get(&timer.owner).copied() else {
            tracing::debug!(owner = timer.owner.0, "timer without a route ignored");
            return Ok(());
        };
        match route {
            Route::Intro => {
                let Some(intro) = self.intro.as_mut() else {
                    return Ok(());
                };
                let vault = &mut self.vault;
                let trace = &mut self.trace;
                let mut completed = false;
                intro.on_timer(timer.id, &mut self.clock, |event| match event {
                    SequenceEvent::Stage { index, action, .. } => {
                        vault.apply(action, now);
                        trace.push(
                            now,
                            PageEvent::IntroStage {
                                index,
                                action: action.clone(),
                            },
                        );
                    }
                    SequenceEvent::Complete => completed = true,
                });
                if completed {
                    self.finish_intro(now);
                }
            }
            Route::Hero => {
                if self.hero.take(timer.id) {
                    self.start_hero(now)?;
                }
            }
            Route::HeroTimeline => {
                let view = &mut self.hero_view;
                let trace = &mut self.trace;
                let mut settled = false;
                let timeline = &mut self.hero_timeline;
                timeline.on_timer(timer.id, &mut self.clock, |event| match event {
                    SequenceEvent::Stage { action, .. } => {
                        view.apply(action, now);
                        trace.push(now, PageEvent::HeroStage { part: action.part });
                    }
                    SequenceEvent::Complete => settled = true,
                });
                if settled {
                    self.finish_hero(now)?;
                }
            }
            Route::Typewriter => {
                let Some(tw) = self.typewriter.as_mut() else {
                    return Ok(());
                };
                let mut events = Vec::new();
                tw.on_timer(timer.id, &mut self.clock, |e| events.push(e));
                for event in events {
                    match event {
                        TypewriterEvent::StringComplete { string_index } => self.trace.push(
                            now,
                            PageEvent::StringTyped {
                                string_index,
                                text: tw.text(),
                            },
                        ),
                        TypewriterEvent::Finished => {
                            self.trace.push(now, PageEvent::TypewriterFinished);
                        }
                        TypewriterEvent::Typed { .. } | TypewriterEvent::Erased { .. } => {}
                    }
                }
            }
            Route::Rotator(i) => {
                if let Some((name, rot)) = self.rotators.get_mut(i)
                    && let Some(index) = rot.on_timer(timer.id, &mut self.clock)
                {
                    self.trace.push(
                        now,
                        PageEvent::Rotated {
                            rotator: name.clone(),
                            index,
                            manual: false,
                        },
                    );
                }
            }
            Route::Stream(i) => {
                if let Some(stream) = self.streams.get_mut(i) {
                    stream.on_timer(timer.id, &mut self.clock);
                }
            }
        }
        Ok(())
    }

    fn finish_intro(&mut self, now: Millis) {
        self.intro_done = true;
        self.trace.push(now, PageEvent::IntroComplete);
        if !self.streams.is_empty() {
            for stream in &mut self.streams {
                stream.teardown(&mut self.clock);
            }
            self.trace.push(now, PageEvent::CodeStreamsStopped);
        }
        self.open_page(now);
    }

    fn open_page(&mut self, now: Millis) {
        self.trigger.arm();
        self.trace.push(now, PageEvent::TriggerArmed);
        self.deliver_intersections(now);
        self.hero
            .arm_after(&mut self.clock, self.config.intro.hero_settle_delay);
    }

    fn start_hero(&mut self, now: Millis) -> MotionResult<()> {
        self.hero_started = true;
        self.trace.push(now, PageEvent::HeroStarted);
        self.hero_timeline.start(&mut self.clock)
    }

    fn finish_hero(&mut self, now: Millis) -> MotionResult<()> {
        self.trace.push(now, PageEvent::HeroSettled);
        if let Some(tw) = self.typewriter.as_mut() {
            tw.start(&mut self.clock)?;
        }
        Ok(())
    }

    fn viewport_rect(&self) -> Rect {
        let size = self.config.viewport;
        Rect::new(0.0, self.scroll_y, size.x, self.scroll_y + size.y)
    }

    fn deliver_intersections(&mut self, now: Millis) -> usize {
        if !self.trigger.is_armed() {
            return 0;
        }
        let entries = measure(
            self.trigger.observed(),
            self.layout.as_ref(),
            self.viewport_rect(),
            self.trigger.options().root_margin,
        );
        let board = &mut self.board;
        let counters = &mut self.counters;
        let trace = &mut self.trace;
        self.trigger.deliver(&entries, |id| {
            board.apply(id, now);
            trace.push(now, PageEvent::Revealed { element: id });
            if let Some((counter, started)) = counters.get_mut(&id)
                && started.is_none()
            {
                *started = Some(now);
                trace.push(
                    now,
                    PageEvent::CounterStarted {
                        element: id,
                        target: counter.target,
                    },
                );
            }
        })
    }

    /// Scroll the viewport to `y` (page coordinates). Returns the number of
    /// elements revealed by this scroll.
    pub fn scroll_to(&mut self, y: f64) -> MotionResult<usize> {
        if !y.is_finite() {
            return Err(MotionError::validation("scroll offset must be finite"));
        }
        if self.state == DirectorState::TornDown {
            return Ok(0);
        }
        let now = self.clock.now();
        self.scroll_y = y;
        self.trace.push(now, PageEvent::Scrolled { y });
        Ok(self.deliver_intersections(now))
    }

    /// Last scroll position.
    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    /// Move the pointer; drives the cursor follower and pointer parallax.
    pub fn pointer_move(&mut self, to: Point) {
        if self.state == DirectorState::TornDown {
            return;
        }
        self.pointer = Some(to);
        self.cursor.pointer_move(self.clock.now(), to);
    }

    /// Pointer entered `id`. Returns false for non-interactive elements.
    pub fn pointer_enter(&mut self, id: ElementId) -> bool {
        if self.state == DirectorState::TornDown {
            return false;
        }
        let was = self.cursor.is_hovering();
        let entered = self.cursor.pointer_enter(self.clock.now(), id);
        if entered && !was {
            self.trace.push(
                self.clock.now(),
                PageEvent::HoverChanged {
                    element: id,
                    hovering: true,
                },
            );
        }
        entered
    }

    /// Pointer left `id`. Returns whether the hover look was dropped.
    pub fn pointer_leave(&mut self, id: ElementId) -> bool {
        if self.state == DirectorState::TornDown {
            return false;
        }
        let left = self.cursor.pointer_leave(self.clock.now(), id);
        if left {
            self.trace.push(
                self.clock.now(),
                PageEvent::HoverChanged {
                    element: id,
                    hovering: false,
                },
            );
        }
        left
    }

    /// Hide the cursor follower, e.g. while the pointer is over navigation.
    pub fn set_cursor_visible(&mut self, visible: bool) {
        self.cursor.set_visible(visible);
    }

    /// Manually select item `index` of the named rotator.
    pub fn select(&mut self, rotator: &str, index: usize) -> MotionResult<()> {
        self.select_with(rotator, |rot, clock| {
            rot.select(index, clock)?;
            Ok(index)
        })
        .map(|_| ())
    }

    /// Manually step the named rotator forward, wrapping to the first item.
    pub fn select_next(&mut self, rotator: &str) -> MotionResult<usize> {
        self.select_with(rotator, |rot, clock| rot.select_next(clock))
    }

    /// Manually step the named rotator back, wrapping to the last item.
    pub fn select_prev(&mut self, rotator: &str) -> MotionResult<usize> {
        self.select_with(rotator, |rot, clock| rot.select_prev(clock))
    }

    fn select_with(
        &mut self,
        rotator: &str,
        step: impl FnOnce(&mut AutoRotator, &mut VirtualClock) -> MotionResult<usize>,
    ) -> MotionResult<usize> {
        let Some((name, rot)) = self.rotators.iter_mut().find(|(n, _)| n == rotator) else {
            return Err(MotionError::validation(format!("unknown rotator '{rotator}'")));
        };
        let index = step(rot, &mut self.clock)?;
        self.trace.push(
            self.clock.now(),
            PageEvent::Rotated {
                rotator: name.clone(),
                index,
                manual: true,
            },
        );
        Ok(index)
    }

    /// Sample every continuous driver at the current clock time.
    pub fn frame(&self) -> PageFrame {
        let now = self.clock.now();

        let intro = if self.intro.is_some() {
            let f = self.vault.sample(now);
            (!self.intro_done || f.loader_opacity > 0.0).then_some(f)
        } else {
            None
        };

        let typewriter = self
            .typewriter
            .as_ref()
            .filter(|tw| tw.phase() != TypewriterPhase::Idle)
            .map(Typewriter::display);

        let marquee_offset = match (self.state, &self.marquee) {
            (DirectorState::Running, Some(m)) => {
                Some(m.offset_at(now.saturating_sub(self.marquee_origin)))
            }
            _ => None,
        };

        let grid_offset = self.pointer.map_or(Vec2::ZERO, |p| {
            self.pointer_parallax.offset(p, self.config.viewport)
        });

        PageFrame {
            at: now,
            intro,
            hero: self.hero_view.sample(now),
            typewriter,
            rotators: self
                .rotators
                .iter()
                .map(|(name, rot)| RotatorFrame {
                    name: name.clone(),
                    active: rot.active_index(),
                })
                .collect(),
            code_streams: self
                .streams
                .iter()
                .filter(|s| s.is_live())
                .map(|s| s.rows().map(str::to_string).collect())
                .collect(),
            reveals: self
                .board
                .ids()
                .filter_map(|&id| {
                    self.board
                        .style_at(id, now)
                        .map(|style| ElementStyle { element: id, style })
                })
                .collect(),
            parallax: self
                .parallax
                .offsets(self.scroll_y)
                .into_iter()
                .map(|(element, y)| LayerOffset { element, y })
                .collect(),
            grid_offset,
            scroll_hint: self.scroll_fade.sample(self.scroll_y),
            marquee_offset,
            cursor: self.cursor.frame(now),
            counters: self
                .counters
                .iter()
                .map(|(&element, (counter, started))| CounterValue {
                    element,
                    value: started.map_or(0, |at| counter.value_at(now.saturating_sub(at))),
                })
                .collect(),
        }
    }

    /// Cancel every timer and observer. Idempotent.
    #[tracing::instrument(skip(self))]
    pub fn teardown(&mut self) {
        if self.state == DirectorState::TornDown {
            return;
        }
        if let Some(intro) = self.intro.as_mut() {
            intro.teardown(&mut self.clock);
        }
        self.hero.cancel(&mut self.clock);
        self.hero_timeline.teardown(&mut self.clock);
        if let Some(tw) = self.typewriter.as_mut() {
            tw.teardown(&mut self.clock);
        }
        for (_, rot) in &mut self.rotators {
            rot.teardown(&mut self.clock);
        }
        for stream in &mut self.streams {
            stream.teardown(&mut self.clock);
        }
        self.trigger.teardown(&mut self.clock);
        self.state = DirectorState::TornDown;
        self.trace.push(self.clock.now(), PageEvent::TornDown);
        tracing::debug!(pending = self.clock.pending(), "page torn down");
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/director.rs"]
mod tests;
