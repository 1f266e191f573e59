//! Match lifecycle: countdown, race and result.
//!
//! [`Match`] is the single owner of everything the race's timers touch: the
//! lifecycle state, the countdown, the authoritative time limit, the doll's
//! look cycle and the status text. Systems read it through queries and
//! change it only through [`Match::advance`], [`Match::start`] and
//! [`Match::finish`].

use std::fmt;
use std::time::Duration;

use bevy::prelude::*;
use log::{debug, info};
use rand::Rng;
use thiserror::Error;

use crate::clock::{Countdown, Delay};
use crate::config::{DollTiming, GameSettings};
use crate::doll::{DollCycle, LookDirection};

/// Lifecycle of a match. Transitions only ever move forward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Reflect)]
pub enum GameState {
    /// Counting down; input is ignored.
    #[default]
    Loading,
    /// Racing; the doll cycles and the clock runs.
    Started,
    /// Finished; nothing changes any more.
    Over,
}

/// Why a match ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum Outcome {
    /// The player reached the goal unseen.
    Win,
    /// The doll saw the player move.
    Loss,
    /// The time limit ran out.
    Timeout,
}

impl Outcome {
    /// Status text announcing the outcome.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Win => "You win!",
            Self::Loss => "You lost!",
            Self::Timeout => "Time's up!",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// A lifecycle transition that is not allowed from the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot move match from {from:?} to {to:?}")]
pub struct TransitionError {
    /// State the match was in.
    pub from: GameState,
    /// State that was requested.
    pub to: GameState,
}

/// Triggered once when a match ends.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchFinished {
    /// Why the match ended.
    pub outcome: Outcome,
}

/// The running match.
#[derive(Resource, Debug)]
pub struct Match {
    state: GameState,
    outcome: Option<Outcome>,
    status: String,
    countdown: Countdown,
    time_limit: Duration,
    timeout: Option<Delay>,
    remaining_fraction: f32,
    doll_timing: DollTiming,
    doll: Option<DollCycle>,
    look: LookDirection,
    doll_yaw: f32,
}

impl Match {
    /// Prepares a match in [`GameState::Loading`] with its countdown armed.
    #[must_use]
    pub fn new(settings: &GameSettings) -> Self {
        Self {
            state: GameState::Loading,
            outcome: None,
            status: String::new(),
            countdown: Countdown::new(settings.countdown_steps()),
            time_limit: settings.time_limit(),
            timeout: None,
            remaining_fraction: 1.0,
            doll_timing: settings.doll.clone(),
            doll: None,
            look: LookDirection::default(),
            doll_yaw: 0.0,
        }
    }

    /// Advances every timer the match owns by `delta`.
    ///
    /// While loading this runs the countdown and starts the race when it
    /// completes. While started it runs the doll and the time limit; when the
    /// limit expires the match ends and [`Outcome::Timeout`] is returned.
    /// Once over it does nothing.
    pub fn advance<R: Rng>(&mut self, delta: Duration, rng: &mut R) -> Option<Outcome> {
        match self.state {
            GameState::Loading => {
                if let Some(message) = self.countdown.tick(delta) {
                    self.status = message.to_owned();
                }
                if self.countdown.is_finished() {
                    // Only fails if already started, which the match arm rules out.
                    self.start(rng).ok();
                }
                None
            }
            GameState::Started => {
                if let Some(doll) = &mut self.doll {
                    doll.advance(delta, rng);
                    self.look = doll.look();
                    self.doll_yaw = doll.yaw();
                }
                let expired = self.timeout.as_mut().is_some_and(|timeout| {
                    let fired = timeout.tick(delta);
                    self.remaining_fraction = timeout.fraction_remaining();
                    fired
                });
                if expired && self.finish(Outcome::Timeout).is_ok() {
                    Some(Outcome::Timeout)
                } else {
                    None
                }
            }
            GameState::Over => None,
        }
    }

    /// Moves from [`GameState::Loading`] to [`GameState::Started`].
    ///
    /// Starts the doll cycle and arms the time limit.
    ///
    /// # Errors
    ///
    /// Returns [`TransitionError`] unless the match is loading.
    pub fn start<R: Rng>(&mut self, rng: &mut R) -> Result<(), TransitionError> {
        self.transition(GameState::Started)?;
        self.doll = Some(DollCycle::start(
            self.doll_timing.clone(),
            self.look,
            self.doll_yaw,
            rng,
        ));
        self.timeout = Some(Delay::new(self.time_limit));
        self.remaining_fraction = 1.0;
        info!("match started; {:?} on the clock", self.time_limit);
        Ok(())
    }

    /// Ends a started match with `outcome`.
    ///
    /// Tears down the doll cycle and the time limit, freezing the doll where
    /// it stands, and shows the outcome's message.
    ///
    /// # Errors
    ///
    /// Returns [`TransitionError`] unless the match is started, so an outcome
    /// is recorded at most once.
    pub fn finish(&mut self, outcome: Outcome) -> Result<(), TransitionError> {
        self.transition(GameState::Over)?;
        self.outcome = Some(outcome);
        self.status = outcome.message().to_owned();
        self.doll = None;
        self.timeout = None;
        info!("match over: {outcome}");
        Ok(())
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> GameState {
        self.state
    }

    /// Outcome, once the match is over.
    #[must_use]
    pub const fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Text for the status line.
    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Whether the doll can currently see movement.
    #[must_use]
    pub const fn look_direction(&self) -> LookDirection {
        self.look
    }

    /// Yaw of the doll model in radians.
    #[must_use]
    pub const fn doll_yaw(&self) -> f32 {
        self.doll_yaw
    }

    /// Whether the doll's look cycle is running.
    #[must_use]
    pub const fn is_doll_cycling(&self) -> bool {
        self.doll.is_some()
    }

    /// Share of the time limit still left, from `1.0` to `0.0`.
    ///
    /// This drives the progress bar, so the bar and the timeout can never
    /// disagree. It stays at `1.0` before the race and freezes when it ends.
    #[must_use]
    pub const fn time_remaining_fraction(&self) -> f32 {
        self.remaining_fraction
    }

    /// Whether player input should be acted on.
    #[must_use]
    pub fn accepts_input(&self) -> bool {
        self.state == GameState::Started
    }

    fn transition(&mut self, to: GameState) -> Result<(), TransitionError> {
        let allowed = matches!(
            (self.state, to),
            (GameState::Loading, GameState::Started) | (GameState::Started, GameState::Over)
        );
        if !allowed {
            debug!("rejected transition {:?} -> {to:?}", self.state);
            return Err(TransitionError {
                from: self.state,
                to,
            });
        }
        self.state = to;
        Ok(())
    }
}
