//! Scalar tweens built on Bevy's easing curves.

use std::time::Duration;

use bevy::math::curve::{Curve, EaseFunction, EasingCurve};
use bevy::time::{Timer, TimerMode};

/// Interpolates a single `f32` from a start value to a target over a fixed
/// duration.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use bevy::math::curve::EaseFunction;
/// use redlight::tween::Tween;
///
/// let mut tween = Tween::new(1.0, 0.0, Duration::from_millis(100), EaseFunction::Linear);
/// let halfway = tween.advance(Duration::from_millis(50));
/// assert!((halfway - 0.5).abs() < 1e-6);
/// assert!(!tween.is_finished());
/// ```
#[derive(Debug, Clone)]
pub struct Tween {
    start: f32,
    end: f32,
    ease: EaseFunction,
    timer: Timer,
}

impl Tween {
    /// Starts a tween from `start` to `end`.
    #[must_use]
    pub fn new(start: f32, end: f32, duration: Duration, ease: EaseFunction) -> Self {
        Self {
            start,
            end,
            ease,
            timer: Timer::new(duration, TimerMode::Once),
        }
    }

    /// Advances the tween and returns the value at the new position.
    pub fn advance(&mut self, delta: Duration) -> f32 {
        self.timer.tick(delta);
        self.value()
    }

    /// Current value without advancing.
    #[must_use]
    pub fn value(&self) -> f32 {
        EasingCurve::new(self.start, self.end, self.ease).sample_clamped(self.timer.fraction())
    }

    /// Value the tween settles on.
    #[must_use]
    pub const fn target(&self) -> f32 {
        self.end
    }

    /// Whether the tween has reached its target.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.timer.fraction() >= 1.0
    }
}
