// SPDX-License-Identifier: MPL-2.0
//! Enter and exit transitions for the notice element.
//!
//! Two strategies honour the same contract: `enter` marks the element with
//! the notice's severity and the visible class, `exit` removes the visible
//! class and resolves once the element is hidden.
//!
//! - [`Strategy::Native`] only swaps classes and leaves interpolation to the
//!   host; it completes at once.
//! - [`Strategy::Manual`] steps opacity on a timer for hosts without
//!   transitions.

use super::notice::Severity;
use crate::config::{AnimationMode, Config};
use crate::surface::{class, Surface};
use std::time::Duration;
use tokio::time::{self, Instant, Interval, MissedTickBehavior};

/// Access to the element for an animation in flight.
///
/// `with_surface` returns `false` once the animation has been superseded;
/// the animation then stops without touching the element again.
pub(crate) trait Stage {
    fn with_surface(&self, f: &mut dyn FnMut(&mut dyn Surface)) -> bool;
}

/// Opacity stepping parameters of the manual strategy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fade {
    pub step: f32,
    pub interval: Duration,
}

impl Fade {
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            step: config.fade_step(),
            interval: config.fade_interval(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Native,
    Manual,
}

impl Strategy {
    /// Picks the strategy for a freshly attached surface.
    #[must_use]
    pub fn select(mode: AnimationMode, surface: &dyn Surface) -> Self {
        match mode {
            AnimationMode::Native => Strategy::Native,
            AnimationMode::Manual => Strategy::Manual,
            AnimationMode::Auto if surface.supports_transitions() => Strategy::Native,
            AnimationMode::Auto => Strategy::Manual,
        }
    }

    /// Shows the element for `severity`.
    ///
    /// With `resume` the manual fade starts from the element's current
    /// opacity instead of zero.
    pub(crate) async fn enter(
        self,
        stage: &impl Stage,
        severity: &Severity,
        resume: bool,
        fade: Fade,
    ) -> bool {
        let class_name = class::shown(severity);
        match self {
            Strategy::Native => stage.with_surface(&mut |surface: &mut dyn Surface| {
                surface.set_class_name(&class_name);
            }),
            Strategy::Manual => {
                let mut opacity = 0.0_f32;
                let started = stage.with_surface(&mut |surface: &mut dyn Surface| {
                    surface.set_class_name(&class_name);
                    if resume {
                        opacity = surface.opacity().clamp(0.0, 1.0);
                    }
                    surface.set_opacity(opacity);
                });
                if !started {
                    return false;
                }

                let mut ticker = ticker(fade.interval);
                while opacity < 1.0 {
                    ticker.tick().await;
                    opacity = (opacity + fade.step).min(1.0);
                    if !apply_opacity(stage, opacity) {
                        return false;
                    }
                }
                true
            }
        }
    }

    /// Hides the element. Resolves when it is fully hidden.
    pub(crate) async fn exit(self, stage: &impl Stage, fade: Fade) -> bool {
        match self {
            Strategy::Native => stage.with_surface(&mut strip_shown),
            Strategy::Manual => {
                let mut opacity = 1.0_f32;
                if !stage.with_surface(&mut |surface: &mut dyn Surface| {
                    opacity = surface.opacity().clamp(0.0, 1.0);
                }) {
                    return false;
                }

                let mut ticker = ticker(fade.interval);
                loop {
                    ticker.tick().await;
                    if opacity > 0.0 {
                        opacity = (opacity - fade.step).max(0.0);
                        if !apply_opacity(stage, opacity) {
                            return false;
                        }
                    } else {
                        return stage.with_surface(&mut strip_shown);
                    }
                }
            }
        }
    }
}

fn apply_opacity(stage: &impl Stage, opacity: f32) -> bool {
    stage.with_surface(&mut |surface: &mut dyn Surface| surface.set_opacity(opacity))
}

fn strip_shown(surface: &mut dyn Surface) {
    let class_name = class::hidden(&surface.class_name());
    surface.set_class_name(&class_name);
}

/// Interval whose first tick is one period away.
fn ticker(period: Duration) -> Interval {
    let mut interval = time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}
