//! The "vault unlock" intro played once when the page mounts.
//!
//! A dial turns through three combinations, the lock reports `UNLOCKED`, the
//! lock bar retracts, both panels slide away and the loader fades out. The
//! offsets are fixed; completion is signalled once the loader has faded out,
//! after which the hero content timeline may begin.

use crate::{
    animation::anim::Tween,
    animation::ease::Ease,
    foundation::core::{Millis, Vec2},
    foundation::error::MotionResult,
    sequence::engine::{SequenceScript, SequenceStage},
};

/// Delay between intro completion and the start of the hero timeline.
pub const HERO_SETTLE_DELAY: Millis = Millis(100);

/// Offset at which the intro reports completion: the end of the 300 ms
/// loader fade that starts at 3800 ms.
pub const VAULT_COMPLETE_AT: Millis = Millis(4100);

/// Label shown on the dial before the first turn.
pub const LOCKED_LABEL: &str = "LOCKED";

/// Discrete visual change applied by one intro stage.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VaultAction {
    /// Turn the dial to a combination and update its label.
    Dial {
        /// Combination shown under the dial.
        label: String,
        /// Absolute dial rotation in degrees.
        angle_deg: f64,
    },
    /// The lock reports it is open.
    Unlocked,
    /// Small back-and-forth of the dial (degrees, relative).
    DialJiggle {
        /// Rotation added to the dial.
        rotation: Tween<f64>,
    },
    /// Shake of the central mechanism (pixels, relative).
    Vibrate {
        /// Horizontal shake.
        dx: Tween<f64>,
        /// Vertical shake.
        dy: Tween<f64>,
    },
    /// Horizontal scale of the lock bar.
    RetractLockBar {
        /// Horizontal scale of the bar.
        scale_x: Tween<f64>,
    },
    /// Panel slide distance in percent of panel width.
    OpenPanels {
        /// Slide distance of each panel.
        percent: Tween<f64>,
    },
    /// Fade and grow the central mechanism.
    FadeMechanism {
        /// Mechanism opacity.
        opacity: Tween<f64>,
        /// Mechanism scale.
        scale: Tween<f64>,
    },
    /// Fade out the whole loader.
    FadeLoader {
        /// Loader opacity.
        opacity: Tween<f64>,
    },
}

fn jiggle(delta: f64, repeat: u32) -> VaultAction {
    VaultAction::DialJiggle {
        rotation: Tween::new(0.0, delta, Millis(200), Ease::InOutQuad).repeat(repeat, true),
    }
}

fn vibrate(dx: f64, dy: f64, repeat: u32) -> VaultAction {
    let shake = |d: f64| Tween::new(0.0, d, Millis(100), Ease::InOutQuad).repeat(repeat, true);
    VaultAction::Vibrate {
        dx: shake(dx),
        dy: shake(dy),
    }
}

fn dial(label: &str, angle_deg: f64) -> VaultAction {
    VaultAction::Dial {
        label: label.to_string(),
        angle_deg,
    }
}

/// The intro script.
pub fn vault_script() -> MotionResult<SequenceScript<VaultAction>> {
    let at = |ms: u64, action: VaultAction| SequenceStage::new(Millis(ms), action);
    SequenceScript::new(
        vec![
            at(400, dial("45", 45.0)),
            at(400, jiggle(5.0, 4)),
            at(1000, vibrate(-3.0, 0.0, 2)),
            at(1200, dial("45 • 12", -35.0)),
            at(1400, jiggle(-5.0, 4)),
            at(2000, dial("45 • 12 • 38", 38.0)),
            at(2000, vibrate(3.0, 0.0, 2)),
            at(2300, jiggle(5.0, 2)),
            at(2700, VaultAction::Unlocked),
            at(2800, vibrate(-2.0, -2.0, 3)),
            at(
                3000,
                VaultAction::RetractLockBar {
                    scale_x: Tween::new(1.0, 0.0, Millis(500), Ease::OutCubic),
                },
            ),
            at(
                3300,
                VaultAction::OpenPanels {
                    percent: Tween::new(0.0, 101.0, Millis(800), Ease::InOutCubic),
                },
            ),
            at(
                3500,
                VaultAction::FadeMechanism {
                    opacity: Tween::new(1.0, 0.0, Millis(400), Ease::OutQuad),
                    scale: Tween::new(1.0, 0.8, Millis(400), Ease::OutQuad),
                },
            ),
            at(
                3800,
                VaultAction::FadeLoader {
                    opacity: Tween::new(1.0, 0.0, Millis(300), Ease::OutQuad),
                },
            ),
        ],
        VAULT_COMPLETE_AT,
    )
}

/// Coarse progress of the intro, derived from the stages seen so far.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub enum VaultPhase {
    /// Before the first dial turn.
    #[default]
    Locked,
    /// Dial is turning through the combination.
    Dialing,
    /// Lock reported open; the mechanism shakes.
    Unlocked,
    /// Lock bar retracts and the panels slide apart.
    Opening,
    /// Mechanism and loader fade out.
    Fading,
}

/// Everything a renderer needs to draw the loader at one instant.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct VaultFrame {
    /// Coarse intro progress.
    pub phase: VaultPhase,
    /// Text under the dial.
    pub label: String,
    /// Dial rotation in degrees, jiggle included.
    pub dial_angle_deg: f64,
    /// Shake offset of the mechanism in pixels.
    pub mechanism_offset: Vec2,
    /// Opacity of the mechanism.
    pub mechanism_opacity: f64,
    /// Scale of the mechanism.
    pub mechanism_scale: f64,
    /// Horizontal scale of the lock bar.
    pub lock_bar_scale_x: f64,
    /// Left panel moves by `-panel_percent`, right panel by `+panel_percent`.
    pub panel_percent: f64,
    /// Opacity of the whole loader.
    pub loader_opacity: f64,
}

/// Folds fired [`VaultAction`]s into a sampleable loader state.
#[derive(Clone, Debug, Default)]
pub struct VaultPresentation {
    phase: VaultPhase,
    label: Option<String>,
    dial_angle_deg: f64,
    effects: Vec<(Millis, VaultAction)>,
}

impl VaultPresentation {
    /// Locked loader, fully visible.
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest phase applied.
    pub fn phase(&self) -> VaultPhase {
        self.phase
    }

    /// Status label shown under the lock.
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(LOCKED_LABEL)
    }

    /// Fold a stage fired at `at` into the loader state.
    pub fn apply(&mut self, action: &VaultAction, at: Millis) {
        match action {
            VaultAction::Dial { label, angle_deg } => {
                self.label = Some(label.clone());
                self.dial_angle_deg = *angle_deg;
                self.phase = VaultPhase::Dialing;
            }
            VaultAction::Unlocked => {
                self.label = Some("UNLOCKED".to_string());
                self.phase = VaultPhase::Unlocked;
            }
            VaultAction::OpenPanels { .. } => {
                self.phase = VaultPhase::Opening;
                self.effects.push((at, action.clone()));
            }
            VaultAction::FadeLoader { .. } => {
                self.phase = VaultPhase::Fading;
                self.effects.push((at, action.clone()));
            }
            _ => self.effects.push((at, action.clone())),
        }
    }

    /// Loader state at `now`.
    pub fn sample(&self, now: Millis) -> VaultFrame {
        let mut frame = VaultFrame {
            phase: self.phase,
            label: self.label().to_string(),
            dial_angle_deg: self.dial_angle_deg,
            mechanism_offset: Vec2::ZERO,
            mechanism_opacity: 1.0,
            mechanism_scale: 1.0,
            lock_bar_scale_x: 1.0,
            panel_percent: 0.0,
            loader_opacity: 1.0,
        };
        for (at, action) in &self.effects {
            if now < *at {
                continue;
            }
            let t = now.saturating_sub(*at);
            match action {
                VaultAction::DialJiggle { rotation } => frame.dial_angle_deg += rotation.sample(t),
                VaultAction::Vibrate { dx, dy } => {
                    frame.mechanism_offset += Vec2::new(dx.sample(t), dy.sample(t));
                }
                VaultAction::RetractLockBar { scale_x } => {
                    frame.lock_bar_scale_x = scale_x.sample(t);
                }
                VaultAction::OpenPanels { percent } => frame.panel_percent = percent.sample(t),
                VaultAction::FadeMechanism { opacity, scale } => {
                    frame.mechanism_opacity = opacity.sample(t);
                    frame.mechanism_scale = scale.sample(t);
                }
                VaultAction::FadeLoader { opacity } => frame.loader_opacity = opacity.sample(t),
                VaultAction::Dial { .. } | VaultAction::Unlocked => {}
            }
        }
        frame
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/vault.rs"]
mod tests;
