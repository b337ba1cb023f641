use crate::{
    foundation::core::{ElementId, Millis},
    foundation::error::MotionResult,
    sequence::hero::HeroPart,
    sequence::vault::VaultAction,
};

/// Observable transition of the page.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageEvent {
    /// [`PageDirector::start`](crate::PageDirector::start) ran.
    Started,
    /// One vault intro stage fired.
    IntroStage {
        /// Position of the stage in the intro script.
        index: usize,
        /// Visual change the stage applies.
        action: VaultAction,
    },
    /// The loader has faded out.
    IntroComplete,
    /// Intro code streams were torn down.
    CodeStreamsStopped,
    /// Scroll reveals started reacting to the viewport.
    TriggerArmed,
    /// Hero entrance timeline began.
    HeroStarted,
    /// One hero part began its entrance.
    HeroStage {
        /// Part that started animating.
        part: HeroPart,
    },
    /// Hero entrance finished; the typewriter starts here.
    HeroSettled,
    /// An element crossed the reveal threshold.
    Revealed {
        /// Revealed element.
        element: ElementId,
    },
    /// A counter began counting after its element was revealed.
    CounterStarted {
        /// Counter element.
        element: ElementId,
        /// Value the counter ends on.
        target: u64,
    },
    /// The typewriter finished typing a string.
    StringTyped {
        /// Index into the typewriter strings.
        string_index: usize,
        /// Full text of the string.
        text: String,
    },
    /// The typewriter typed its last string and stopped.
    TypewriterFinished,
    /// A carousel changed its active item.
    Rotated {
        /// Carousel name.
        rotator: String,
        /// New active item.
        index: usize,
        /// Selected by the visitor rather than the period timer.
        manual: bool,
    },
    /// Scroll position changed.
    Scrolled {
        /// New scroll offset in pixels.
        y: f64,
    },
    /// Pointer entered or left an interactive element.
    HoverChanged {
        /// Interactive element.
        element: ElementId,
        /// Pointer is now over the element.
        hovering: bool,
    },
    /// The page was torn down.
    TornDown,
}

/// One timestamped [`PageEvent`].
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TraceEntry {
    /// Clock time of the event.
    pub at: Millis,
    /// What happened.
    #[serde(flatten)]
    pub event: PageEvent,
}

/// Append-only record of everything a session did.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
#[serde(transparent)]
pub struct Trace {
    entries: Vec<TraceEntry>,
}

impl Trace {
    /// Empty trace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `event` at `at`.
    pub fn push(&mut self, at: Millis, event: PageEvent) {
        self.entries.push(TraceEntry { at, event });
    }

    /// Entries in recording order.
    pub fn entries(&self) -> &[TraceEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Nothing recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Events matching `pred`, with their timestamps.
    pub fn filter<'a>(
        &'a self,
        mut pred: impl FnMut(&PageEvent) -> bool + 'a,
    ) -> impl Iterator<Item = &'a TraceEntry> + 'a {
        self.entries.iter().filter(move |e| pred(&e.event))
    }

    /// Pretty JSON array of entries.
    pub fn to_json_pretty(&self) -> MotionResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
