//! Page configuration.
//!
//! Every field has a default matching the portfolio page, so `{}` is a valid
//! configuration that mounts the full intro, both carousels, the code streams
//! and the hero effects with an empty reveal layout.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use anyhow::Context as _;

use crate::{
    foundation::core::{ElementId, Millis, Rect, Vec2},
    foundation::error::{MotionError, MotionResult},
    motion::counter::Counter,
    motion::marquee::{Marquee, TECH_MARQUEE_LOOP},
    motion::parallax::{HERO_GRID_FACTOR, Parallax},
    reveal::geometry::rect_is_finite,
    reveal::style::RevealSpec,
    reveal::trigger::TriggerOptions,
    rotation::selector::{PROJECT_PERIOD, TESTIMONIAL_COUNT, TESTIMONIAL_PERIOD},
    sequence::typewriter::TypewriterOptions,
    sequence::vault::HERO_SETTLE_DELAY,
};

/// Everything needed to mount a [`PageDirector`](crate::PageDirector).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PageConfig {
    /// Seeds the decorative code streams.
    #[serde(default)]
    pub seed: u64,
    /// Viewport size in pixels.
    #[serde(default = "default_viewport")]
    pub viewport: Vec2,
    /// Scroll reveal threshold and margin.
    #[serde(default)]
    pub reveal: TriggerOptions,
    /// Elements the page knows about.
    #[serde(default)]
    pub elements: Vec<ElementConfig>,
    /// Vault intro settings.
    #[serde(default)]
    pub intro: IntroConfig,
    /// Hero typewriter; `None` disables it.
    #[serde(default = "default_typewriter")]
    pub typewriter: Option<TypewriterOptions>,
    /// Auto-rotating carousels.
    #[serde(default = "default_rotators")]
    pub rotators: Vec<RotatorConfig>,
    /// Intro code streams.
    #[serde(default = "default_code_streams")]
    pub code_streams: Vec<CodeStreamConfig>,
    /// Technology marquee; `None` disables it.
    #[serde(default = "default_marquee")]
    pub marquee: Option<MarqueeConfig>,
    /// Parallax and scroll hint settings.
    #[serde(default)]
    pub parallax: ParallaxConfig,
    /// Cursor follower settings.
    #[serde(default)]
    pub cursor: CursorConfig,
    /// Count-up numbers.
    #[serde(default)]
    pub counters: Vec<CounterConfig>,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            viewport: default_viewport(),
            reveal: TriggerOptions::default(),
            elements: Vec::new(),
            intro: IntroConfig::default(),
            typewriter: default_typewriter(),
            rotators: default_rotators(),
            code_streams: default_code_streams(),
            marquee: default_marquee(),
            parallax: ParallaxConfig::default(),
            cursor: CursorConfig::default(),
            counters: Vec::new(),
        }
    }
}

fn default_viewport() -> Vec2 {
    Vec2::new(1440.0, 900.0)
}

fn default_typewriter() -> Option<TypewriterOptions> {
    let lines = [
        "Soy <span class=\"text-gradient-orange-no-stroke font-semibold\">Marco Espín</span>, desarrollador fullstack especializado en backend con Java Spring Boot, Node.js, React, Next.js, Python y Go.",
        "Apasionado por crear arquitecturas de software escalables y soluciones backend robustas con tecnologías modernas.",
        "Explorando el potencial de la IA generativa, LLMs, RAG y arquitecturas modulares para soluciones innovadoras.",
        "Experiencia en DevOps, CI/CD, Docker, AWS, Terraform y bases de datos relacionales y no relacionales.",
    ];
    Some(TypewriterOptions::new(lines.into_iter().map(str::to_string).collect()))
}

fn default_rotators() -> Vec<RotatorConfig> {
    vec![
        RotatorConfig {
            name: "testimonials".to_string(),
            len: TESTIMONIAL_COUNT,
            period: TESTIMONIAL_PERIOD,
        },
        RotatorConfig {
            name: "projects".to_string(),
            len: 2,
            period: PROJECT_PERIOD,
        },
    ]
}

fn default_code_streams() -> Vec<CodeStreamConfig> {
    vec![CodeStreamConfig::default(), CodeStreamConfig::default()]
}

fn default_marquee() -> Option<MarqueeConfig> {
    Some(MarqueeConfig::default())
}

/// A page element: where it is, and how it enters when revealed.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ElementConfig {
    /// Host element id.
    pub id: ElementId,
    /// Page coordinates (y grows down the document).
    pub rect: Rect,
    /// Explicit reveal; takes precedence over `classes`.
    #[serde(default)]
    pub reveal: Option<RevealSpec>,
    /// Marker classes such as `"reveal-from-left reveal-delay-200"`.
    #[serde(default)]
    pub classes: Option<String>,
}

impl ElementConfig {
    /// The explicit reveal, else one parsed from `classes`.
    pub fn reveal_spec(&self) -> MotionResult<Option<RevealSpec>> {
        if let Some(spec) = self.reveal {
            return Ok(Some(spec));
        }
        match &self.classes {
            Some(classes) => RevealSpec::from_classes(classes),
            None => Ok(None),
        }
    }
}

/// Vault intro switch and the pause before the hero plays.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct IntroConfig {
    /// Without the vault intro the hero and the reveal trigger start at once.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Pause between the intro completing and the hero starting.
    #[serde(default = "default_settle_delay")]
    pub hero_settle_delay: Millis,
}

impl Default for IntroConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            hero_settle_delay: HERO_SETTLE_DELAY,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_settle_delay() -> Millis {
    HERO_SETTLE_DELAY
}

/// One auto-rotating carousel, addressed by `name`.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RotatorConfig {
    /// Name used by `select` and in the trace.
    pub name: String,
    /// Number of items.
    pub len: usize,
    /// Time each item stays active.
    pub period: Millis,
}

/// One decorative binary stream shown during the intro.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CodeStreamConfig {
    /// Rows of digits.
    #[serde(default = "default_stream_rows")]
    pub rows: usize,
    /// Digits per row.
    #[serde(default = "default_stream_width")]
    pub width: usize,
    /// Time between refreshes.
    #[serde(default = "default_stream_interval")]
    pub interval: Millis,
}

impl Default for CodeStreamConfig {
    fn default() -> Self {
        Self {
            rows: default_stream_rows(),
            width: default_stream_width(),
            interval: default_stream_interval(),
        }
    }
}

fn default_stream_rows() -> usize {
    3
}

fn default_stream_width() -> usize {
    16
}

fn default_stream_interval() -> Millis {
    Millis(200)
}

/// Technology marquee track.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MarqueeConfig {
    /// Width of the whole track including every copy.
    #[serde(default = "default_track_width")]
    pub track_width: f64,
    /// Identical copies laid end to end; at least two.
    #[serde(default = "default_copies")]
    pub copies: u32,
    /// Time for one copy to scroll past.
    #[serde(default = "default_loop_duration")]
    pub loop_duration: Millis,
}

impl Default for MarqueeConfig {
    fn default() -> Self {
        Self {
            track_width: default_track_width(),
            copies: default_copies(),
            loop_duration: default_loop_duration(),
        }
    }
}

impl MarqueeConfig {
    /// Validated marquee driver for this track.
    pub fn build(&self) -> MotionResult<Marquee> {
        Marquee::from_track(self.track_width, self.copies, self.loop_duration)
    }
}

fn default_track_width() -> f64 {
    4800.0
}

fn default_copies() -> u32 {
    2
}

fn default_loop_duration() -> Millis {
    TECH_MARQUEE_LOOP
}

/// Scroll parallax layers, pointer parallax and the hero fade.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ParallaxConfig {
    /// Number of hero beams; speeds are `(i + 1) * 0.05`.
    #[serde(default = "default_beams")]
    pub beams: u32,
    /// Element id of the first beam, the rest follow consecutively.
    #[serde(default = "default_first_beam")]
    pub first_beam: ElementId,
    /// Layers beyond the hero beams.
    #[serde(default)]
    pub layers: Vec<ParallaxLayerConfig>,
    /// Hero grid offset per pixel of pointer distance from the centre.
    #[serde(default = "default_pointer_factor")]
    pub pointer_factor: f64,
    /// Height of the hero section; defaults to the viewport height.
    #[serde(default)]
    pub hero_height: Option<f64>,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self {
            beams: default_beams(),
            first_beam: default_first_beam(),
            layers: Vec::new(),
            pointer_factor: default_pointer_factor(),
            hero_height: None,
        }
    }
}

fn default_beams() -> u32 {
    4
}

fn default_first_beam() -> ElementId {
    ElementId(9000)
}

fn default_pointer_factor() -> f64 {
    HERO_GRID_FACTOR
}

/// Extra scroll-parallax layer on a declared element.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ParallaxLayerConfig {
    /// Layer element.
    pub id: ElementId,
    /// Layer speed.
    #[serde(default)]
    pub layer: Parallax,
}

/// Elements that switch the cursor follower into its hover look.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CursorConfig {
    /// Elements that trigger the hover look.
    #[serde(default)]
    pub interactive: Vec<ElementId>,
}

/// A count-up number that starts when its element is revealed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CounterConfig {
    /// Element whose reveal starts the count.
    pub element: ElementId,
    /// Target and duration.
    #[serde(flatten)]
    pub counter: Counter,
}

impl PageConfig {
    /// Parse and validate a JSON page configuration.
    pub fn from_json(s: &str) -> MotionResult<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a JSON page configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> MotionResult<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read page config '{}'", path.display()))?;
        Self::from_json(&s)
    }

    /// Hero height used by the scroll fade; defaults to the viewport height.
    pub fn hero_height(&self) -> f64 {
        self.parallax.hero_height.unwrap_or(self.viewport.y)
    }

    /// Check every section; the first problem is returned as a validation error.
    pub fn validate(&self) -> MotionResult<()> {
        if !(self.viewport.x > 0.0 && self.viewport.y > 0.0)
            || !self.viewport.x.is_finite()
            || !self.viewport.y.is_finite()
        {
            return Err(MotionError::validation("viewport width/height must be > 0"));
        }
        self.reveal.validate()?;

        let mut ids = BTreeSet::new();
        for el in &self.elements {
            if !ids.insert(el.id) {
                return Err(MotionError::validation(format!(
                    "element {} is declared twice",
                    el.id
                )));
            }
            if !rect_is_finite(el.rect) {
                return Err(MotionError::validation(format!(
                    "element {} has non-finite bounds",
                    el.id
                )));
            }
            if el.rect.width() < 0.0 || el.rect.height() < 0.0 {
                return Err(MotionError::validation(format!(
                    "element {} has a negative size",
                    el.id
                )));
            }
            if let Some(spec) = el.reveal_spec()? {
                spec.validate()?;
            }
        }

        if let Some(tw) = &self.typewriter {
            tw.validate()?;
        }

        let mut names = BTreeSet::new();
        for rot in &self.rotators {
            if rot.name.trim().is_empty() {
                return Err(MotionError::validation("rotator name must be non-empty"));
            }
            if !names.insert(rot.name.as_str()) {
                return Err(MotionError::validation(format!(
                    "rotator '{}' is declared twice",
                    rot.name
                )));
            }
            if rot.len == 0 || rot.period.is_zero() {
                return Err(MotionError::validation(format!(
                    "rotator '{}' needs len > 0 and period > 0",
                    rot.name
                )));
            }
        }

        for stream in &self.code_streams {
            if stream.rows == 0 || stream.width == 0 || stream.interval.is_zero() {
                return Err(MotionError::validation(
                    "code stream rows, width and interval must be > 0",
                ));
            }
        }

        if let Some(m) = &self.marquee {
            m.build()?;
        }

        for layer in &self.parallax.layers {
            layer.layer.validate()?;
        }
        if !self.parallax.pointer_factor.is_finite() {
            return Err(MotionError::validation("pointer factor must be finite"));
        }
        if self.hero_height() <= 0.0 || !self.hero_height().is_finite() {
            return Err(MotionError::validation("hero height must be > 0"));
        }

        for c in &self.counters {
            if !ids.contains(&c.element) {
                return Err(MotionError::validation(format!(
                    "counter references undeclared element {}",
                    c.element
                )));
            }
            c.counter.validate()?;
        }

        Ok(())
    }

    /// Layout of every declared element.
    pub fn layout(&self) -> BTreeMap<ElementId, Rect> {
        self.elements.iter().map(|el| (el.id, el.rect)).collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/page.rs"]
mod tests;
