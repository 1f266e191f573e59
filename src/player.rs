//! The player's sphere and its movement along the track.

use std::time::Duration;

use bevy::math::curve::EaseFunction;
use bevy::prelude::*;

use crate::doll::LookDirection;
use crate::game::Outcome;
use crate::tween::Tween;

/// Marker for the player's sphere entity.
#[derive(Component, Reflect, Default, Debug, Clone, Copy, PartialEq, Eq)]
#[reflect(Component, Default)]
pub struct Player;

/// Position and velocity of the player along the track.
///
/// The track runs along the X axis; the player starts at a positive offset
/// and moves toward negative X. Velocity is measured in world units per
/// simulation tick and is never negative.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use redlight::doll::LookDirection;
/// use redlight::player::PlayerInfo;
///
/// let mut player = PlayerInfo::new(3.0);
/// player.run(0.03);
/// let outcome = player.update(Duration::from_millis(16), LookDirection::Away, -2.6);
/// assert!(outcome.is_none());
/// assert!((player.position_x() - 2.97).abs() < 1e-6);
/// ```
#[derive(Component, Debug, Clone)]
pub struct PlayerInfo {
    position_x: f32,
    velocity: f32,
    easing: Option<Tween>,
}

impl PlayerInfo {
    /// Creates a stationary player at `position_x`.
    #[must_use]
    pub const fn new(position_x: f32) -> Self {
        Self {
            position_x,
            velocity: 0.0,
            easing: None,
        }
    }

    /// Current position along the track.
    #[must_use]
    pub const fn position_x(&self) -> f32 {
        self.position_x
    }

    /// Current velocity in world units per tick.
    #[must_use]
    pub const fn velocity(&self) -> f32 {
        self.velocity
    }

    /// Whether the player is coasting to a halt after [`PlayerInfo::stop`].
    #[must_use]
    pub const fn is_stopping(&self) -> bool {
        self.easing.is_some()
    }

    /// Sets the velocity immediately, cancelling any coast to a halt.
    pub fn run(&mut self, velocity: f32) {
        self.easing = None;
        self.velocity = velocity.max(0.0);
    }

    /// Starts easing the velocity to zero over `ease`.
    ///
    /// The player keeps moving, ever slower, until the easing completes, so
    /// releasing the key a moment before the doll turns can still lose. A
    /// stop already in progress is left to finish.
    pub fn stop(&mut self, ease: Duration) {
        if self.velocity <= 0.0 || self.easing.is_some() {
            return;
        }
        self.easing = Some(Tween::new(
            self.velocity,
            0.0,
            ease,
            EaseFunction::QuadraticOut,
        ));
    }

    /// Decides whether this tick ends the match.
    ///
    /// Moving while watched loses; otherwise reaching `goal` wins. The loss
    /// check runs first, so it takes precedence when both hold.
    #[must_use]
    pub fn check_outcome(&self, look: LookDirection, goal: f32) -> Option<Outcome> {
        if self.velocity > 0.0 && look.is_watching() {
            Some(Outcome::Loss)
        } else if self.position_x <= goal {
            Some(Outcome::Win)
        } else {
            None
        }
    }

    /// Runs one simulation tick: ease, check, then move.
    ///
    /// On a loss the velocity is forced to zero before moving, so the player
    /// freezes where they were caught. On a win the final move still applies.
    pub fn update(&mut self, delta: Duration, look: LookDirection, goal: f32) -> Option<Outcome> {
        if let Some(easing) = &mut self.easing {
            self.velocity = easing.advance(delta).max(0.0);
            if easing.is_finished() {
                self.easing = None;
            }
        }

        let outcome = self.check_outcome(look, goal);
        if outcome == Some(Outcome::Loss) {
            self.halt();
        }

        self.position_x -= self.velocity;
        outcome
    }

    /// Stops dead, discarding any easing.
    pub fn halt(&mut self) {
        self.easing = None;
        self.velocity = 0.0;
    }
}
