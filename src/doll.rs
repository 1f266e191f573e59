//! The doll and its look cycle.
//!
//! [`DollCycle`] alternates between facing away from the player and turning
//! back to watch, with a randomised dwell in each orientation. It is plain
//! data advanced by the simulation delta: the match owns it while the race is
//! running and drops it when the race ends, which cancels every pending
//! phase change with it.

use std::time::Duration;

use bevy::math::curve::EaseFunction;
use bevy::prelude::*;
use log::debug;
use rand::Rng;
use thiserror::Error;

use crate::clock::Delay;
use crate::config::DollTiming;
use crate::tween::Tween;

/// Whether the doll is currently able to catch the player moving.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
pub enum LookDirection {
    /// Facing away from the track; moving is safe.
    #[default]
    Away,
    /// Facing the player; any movement loses the match.
    Watching,
}

impl LookDirection {
    /// Whether movement is currently punished.
    #[must_use]
    pub const fn is_watching(self) -> bool {
        matches!(self, Self::Watching)
    }
}

/// Which half of the cycle the doll is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DollPhase {
    /// Turned (or turning) away; waiting out the away dwell.
    LookingAway,
    /// Turned (or turning) back; waiting out the watch dwell.
    LookingBack,
}

/// Marker for the entity carrying the doll's model.
#[derive(Component, Reflect, Default, Debug, Clone, Copy, PartialEq, Eq)]
#[reflect(Component, Default)]
pub struct Doll;

/// Raised when the doll's model fails to load.
///
/// The look cycle does not depend on the model, so the match carries on with
/// an invisible doll.
#[derive(Event, Debug, Clone, Error)]
#[error("failed to load doll model {path}: {detail}")]
pub struct DollModelError {
    /// Asset-server path that was requested.
    pub path: String,
    /// Loader error description.
    pub detail: String,
}

/// The doll's alternating look-away/look-back behaviour.
#[derive(Debug, Clone)]
pub struct DollCycle {
    timing: DollTiming,
    look: LookDirection,
    phase: DollPhase,
    yaw: f32,
    turn: Option<Tween>,
    pending_look: Option<(Delay, LookDirection)>,
    dwell: Delay,
}

impl DollCycle {
    /// Starts a cycle by turning away, as the match does on "Go".
    ///
    /// `look` and `yaw` carry over whatever the doll was showing before the
    /// cycle began.
    pub fn start<R: Rng>(timing: DollTiming, look: LookDirection, yaw: f32, rng: &mut R) -> Self {
        let dwell = Delay::new(timing.away_dwell_ms.sample(rng));
        let mut cycle = Self {
            timing,
            look,
            phase: DollPhase::LookingAway,
            yaw,
            turn: None,
            pending_look: None,
            dwell,
        };
        cycle.look_away();
        cycle
    }

    /// Begins turning away; the doll stops watching after the away delay.
    ///
    /// The flag flips before the turn finishes, giving the player a head
    /// start on the animation.
    pub fn look_away(&mut self) {
        self.begin_turn(self.timing.away_yaw);
        self.pending_look = Some((
            Delay::new(Duration::from_millis(self.timing.away_flag_ms)),
            LookDirection::Away,
        ));
        self.phase = DollPhase::LookingAway;
        debug!("doll turning away");
    }

    /// Begins turning back; the doll is watching once the back delay elapses.
    pub fn look_back(&mut self) {
        self.begin_turn(0.0);
        self.pending_look = Some((
            Delay::new(Duration::from_millis(self.timing.back_flag_ms)),
            LookDirection::Watching,
        ));
        self.phase = DollPhase::LookingBack;
        debug!("doll turning back");
    }

    /// Advances the turn animation, the pending flag flip and the dwell.
    ///
    /// When the dwell runs out the doll switches to the other phase and draws
    /// a fresh dwell for it.
    pub fn advance<R: Rng>(&mut self, delta: Duration, rng: &mut R) {
        if let Some((delay, look)) = &mut self.pending_look {
            if delay.tick(delta) {
                self.look = *look;
                self.pending_look = None;
                debug!("doll now {:?}", self.look);
            }
        }

        if let Some(turn) = &mut self.turn {
            self.yaw = turn.advance(delta);
            if turn.is_finished() {
                self.turn = None;
            }
        }

        if self.dwell.tick(delta) {
            let range = match self.phase {
                DollPhase::LookingAway => {
                    self.look_back();
                    self.timing.watch_dwell_ms
                }
                DollPhase::LookingBack => {
                    self.look_away();
                    self.timing.away_dwell_ms
                }
            };
            self.dwell = Delay::new(range.sample(rng));
        }
    }

    /// Current look direction.
    #[must_use]
    pub const fn look(&self) -> LookDirection {
        self.look
    }

    /// Current phase of the cycle.
    #[must_use]
    pub const fn phase(&self) -> DollPhase {
        self.phase
    }

    /// Current model yaw in radians.
    #[must_use]
    pub const fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Time until the next phase change.
    #[must_use]
    pub fn next_turn_in(&self) -> Duration {
        self.dwell.remaining()
    }

    fn begin_turn(&mut self, target: f32) {
        self.turn = Some(Tween::new(
            self.yaw,
            target,
            self.timing.turn(),
            EaseFunction::QuadraticOut,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DwellRange;
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use rstest::{fixture, rstest};

    const STEP: Duration = Duration::from_millis(10);

    /// Timing with single-valued dwell ranges: away for 1000 ms, watching for 750 ms.
    fn fixed_timing() -> DollTiming {
        DollTiming {
            away_dwell_ms: DwellRange {
                min_ms: 1000,
                max_ms: 1001,
            },
            watch_dwell_ms: DwellRange {
                min_ms: 750,
                max_ms: 751,
            },
            ..DollTiming::default()
        }
    }

    #[fixture]
    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(7)
    }

    fn run_for(cycle: &mut DollCycle, rng: &mut ChaCha8Rng, millis: u64) {
        for _ in 0..millis / 10 {
            cycle.advance(STEP, rng);
        }
    }

    #[rstest]
    fn starts_by_turning_away(mut rng: ChaCha8Rng) {
        let cycle = DollCycle::start(fixed_timing(), LookDirection::Away, 0.0, &mut rng);
        assert_eq!(cycle.phase(), DollPhase::LookingAway);
        assert_eq!(cycle.look(), LookDirection::Away);
        assert_eq!(cycle.next_turn_in(), Duration::from_millis(1000));
    }

    #[rstest]
    fn away_flag_flips_before_turn_completes(mut rng: ChaCha8Rng) {
        let mut cycle = DollCycle::start(fixed_timing(), LookDirection::Watching, 0.0, &mut rng);
        run_for(&mut cycle, &mut rng, 140);
        assert_eq!(cycle.look(), LookDirection::Watching);
        run_for(&mut cycle, &mut rng, 10);
        assert_eq!(cycle.look(), LookDirection::Away);
        assert!(cycle.yaw() > -3.15, "turn should still be in progress");
        run_for(&mut cycle, &mut rng, 300);
        assert_relative_eq!(cycle.yaw(), -3.15);
    }

    #[rstest]
    fn watching_begins_when_turn_back_completes(mut rng: ChaCha8Rng) {
        let mut cycle = DollCycle::start(fixed_timing(), LookDirection::Away, 0.0, &mut rng);
        run_for(&mut cycle, &mut rng, 1000);
        assert_eq!(cycle.phase(), DollPhase::LookingBack);
        run_for(&mut cycle, &mut rng, 440);
        assert_eq!(cycle.look(), LookDirection::Away);
        run_for(&mut cycle, &mut rng, 10);
        assert_eq!(cycle.look(), LookDirection::Watching);
        assert_relative_eq!(cycle.yaw(), 0.0);
    }

    #[rstest]
    fn cycle_repeats(mut rng: ChaCha8Rng) {
        let mut cycle = DollCycle::start(fixed_timing(), LookDirection::Away, 0.0, &mut rng);
        run_for(&mut cycle, &mut rng, 1750);
        assert_eq!(cycle.phase(), DollPhase::LookingAway);
        run_for(&mut cycle, &mut rng, 140);
        assert_eq!(cycle.look(), LookDirection::Watching);
        run_for(&mut cycle, &mut rng, 10);
        assert_eq!(cycle.look(), LookDirection::Away);
        run_for(&mut cycle, &mut rng, 850);
        assert_eq!(cycle.phase(), DollPhase::LookingBack);
    }

    #[rstest]
    fn default_dwells_stay_within_ranges(mut rng: ChaCha8Rng) {
        let mut cycle = DollCycle::start(DollTiming::default(), LookDirection::Away, 0.0, &mut rng);
        let mut phase = cycle.phase();
        let mut since_switch = Duration::ZERO;
        for _ in 0..6000 {
            cycle.advance(STEP, &mut rng);
            since_switch += STEP;
            if cycle.phase() != phase {
                let (low, high) = match phase {
                    DollPhase::LookingAway => (1000, 2000),
                    DollPhase::LookingBack => (750, 1500),
                };
                assert!(since_switch >= Duration::from_millis(low));
                assert!(since_switch < Duration::from_millis(high + 10));
                phase = cycle.phase();
                since_switch = Duration::ZERO;
            }
        }
    }
}
