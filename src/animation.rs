//! Time-driven transitions.
//!
//! Everything here is pure state: the host supplies `now_ms` on every call and
//! advances transitions with `tick`. Nothing owns a clock or a timer.

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Default transition length for selection, toggle and fade changes.
pub const DEFAULT_DURATION_MS: f64 = 300.0;

/// Fully opaque 8-bit alpha.
pub const OPAQUE: f64 = 255.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Easing {
    Linear,
    /// Slow start and end, fast middle: `cos((t + 1) * PI) / 2 + 0.5`.
    #[default]
    AccelerateDecelerate,
}

impl Easing {
    #[must_use]
    pub fn apply(self, progress: f64) -> f64 {
        let t = progress.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::AccelerateDecelerate => ((t + 1.0) * std::f64::consts::PI).cos() / 2.0 + 0.5,
        }
    }
}

fn default_duration_ms() -> f64 {
    DEFAULT_DURATION_MS
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimationConfig {
    #[serde(default = "default_duration_ms")]
    pub duration_ms: f64,
    #[serde(default)]
    pub easing: Easing,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            duration_ms: DEFAULT_DURATION_MS,
            easing: Easing::default(),
        }
    }
}

impl AnimationConfig {
    #[must_use]
    pub fn with_duration_ms(mut self, duration_ms: f64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    #[must_use]
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn validate(self) -> ChartResult<Self> {
        if !self.duration_ms.is_finite() || self.duration_ms < 0.0 {
            return Err(ChartError::InvalidData(
                "animation duration must be finite and >= 0".to_owned(),
            ));
        }
        Ok(self)
    }

    /// Duration scaled by how much of a full 0..=255 alpha swing remains.
    #[must_use]
    pub fn alpha_duration(self, alpha_delta: f64) -> f64 {
        alpha_delta.abs().min(OPAQUE) * self.duration_ms / OPAQUE
    }
}

/// One eased interpolation between two values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub start_value: f64,
    pub end_value: f64,
    pub start_time: f64,
    pub duration: f64,
    pub easing: Easing,
}

impl Transition {
    #[must_use]
    pub fn finished(self, now_ms: f64) -> bool {
        now_ms >= self.start_time + self.duration
    }

    #[must_use]
    pub fn value_at(self, now_ms: f64) -> f64 {
        if self.duration <= 0.0 || self.finished(now_ms) {
            return self.end_value;
        }
        let progress = (now_ms - self.start_time) / self.duration;
        let eased = self.easing.apply(progress);
        self.start_value + (self.end_value - self.start_value) * eased
    }
}

/// A value that may be in flight toward a target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimatedValue {
    value: f64,
    target: f64,
    transition: Option<Transition>,
}

impl AnimatedValue {
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Self {
            value,
            target: value,
            transition: None,
        }
    }

    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    #[must_use]
    pub fn target(&self) -> f64 {
        self.target
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    /// Current value as an 8-bit alpha.
    #[must_use]
    pub fn alpha(&self) -> u8 {
        to_alpha(self.value)
    }

    /// Snaps to `value` and drops any transition in flight.
    pub fn set(&mut self, value: f64) {
        self.value = value;
        self.target = value;
        self.transition = None;
    }

    /// Starts a transition from the current value. A non-positive duration snaps.
    ///
    /// A transition already in flight is replaced, continuing from its value at `now_ms`.
    pub fn animate_to(&mut self, target: f64, now_ms: f64, duration_ms: f64, easing: Easing) {
        if let Some(active) = self.transition {
            self.value = active.value_at(now_ms);
        }
        if duration_ms <= 0.0 || !duration_ms.is_finite() {
            self.set(target);
            return;
        }
        self.target = target;
        self.transition = Some(Transition {
            start_value: self.value,
            end_value: target,
            start_time: now_ms,
            duration: duration_ms,
            easing,
        });
    }

    /// Advances to `now_ms`; returns `true` while still in flight.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        let Some(transition) = self.transition else {
            return false;
        };
        self.value = transition.value_at(now_ms);
        if transition.finished(now_ms) {
            self.transition = None;
            return false;
        }
        true
    }

    /// Completes any transition at its target.
    pub fn finish(&mut self) {
        self.set(self.target);
    }
}

impl Default for AnimatedValue {
    fn default() -> Self {
        Self::new(0.0)
    }
}

#[must_use]
pub fn to_alpha(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, OPAQUE) as u8
}
