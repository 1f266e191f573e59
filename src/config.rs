//! Match tuning loaded from JSON.
//!
//! Every field has a default taken from [`crate::constants`], so a settings
//! file only needs the values it changes:
//!
//! ```json
//! { "time_limit_secs": 15, "doll": { "watch_dwell_ms": { "min_ms": 500, "max_ms": 900 } } }
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use bevy::prelude::Resource;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{
    COUNTDOWN_STEPS, DOLL_AWAY_DWELL_MS, DOLL_AWAY_FLAG_MS, DOLL_AWAY_YAW, DOLL_BACK_FLAG_MS,
    DOLL_MODEL_PATH, DOLL_TURN_MS, DOLL_WATCH_DWELL_MS, GOAL_MARGIN, RUN_VELOCITY,
    START_POSITION, STOP_EASE_MS, TIME_LIMIT_SECS,
};

/// Errors raised while loading or validating [`GameSettings`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The settings file could not be read.
    #[error("failed to read settings from {path}")]
    Read {
        /// File that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The settings file is not valid JSON for [`GameSettings`].
    #[error("malformed settings: {0}")]
    Parse(#[from] serde_json::Error),
    /// A dwell range has no values to draw from.
    #[error("dwell range `{name}` is empty: [{min_ms}, {max_ms})")]
    EmptyDwellRange {
        /// Which range was rejected.
        name: &'static str,
        /// Inclusive lower bound in milliseconds.
        min_ms: u64,
        /// Exclusive upper bound in milliseconds.
        max_ms: u64,
    },
    /// A quantity that must be strictly positive was not.
    #[error("`{field}` must be positive, got {value}")]
    NonPositive {
        /// Name of the offending field.
        field: &'static str,
        /// Value found in the settings.
        value: f64,
    },
    /// The goal margin places the goal behind the start line.
    #[error("goal margin {margin} leaves no track between start and goal")]
    GoalBehindStart {
        /// Configured margin.
        margin: f32,
    },
    /// The countdown has no steps, so the match could never be announced.
    #[error("countdown must contain at least one step")]
    EmptyCountdown,
}

/// One status message of the pre-match countdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountdownStep {
    /// Gap after the previous step (or the start of the match).
    pub after_ms: u64,
    /// Status text shown once the gap has elapsed.
    pub message: String,
}

/// Half-open range `[min_ms, max_ms)` a dwell duration is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DwellRange {
    /// Inclusive lower bound.
    pub min_ms: u64,
    /// Exclusive upper bound.
    pub max_ms: u64,
}

impl DwellRange {
    /// Draws a dwell duration uniformly from the range.
    ///
    /// An empty range yields its lower bound rather than panicking.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Duration {
        if self.min_ms >= self.max_ms {
            return Duration::from_millis(self.min_ms);
        }
        Duration::from_millis(rng.random_range(self.min_ms..self.max_ms))
    }

    const fn from_pair((min_ms, max_ms): (u64, u64)) -> Self {
        Self { min_ms, max_ms }
    }

    fn check(&self, name: &'static str) -> Result<(), ConfigError> {
        if self.min_ms < self.max_ms {
            Ok(())
        } else {
            Err(ConfigError::EmptyDwellRange {
                name,
                min_ms: self.min_ms,
                max_ms: self.max_ms,
            })
        }
    }
}

/// Timing of the doll's look cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DollTiming {
    /// Duration of the turn animation in either direction.
    pub turn_ms: u64,
    /// Delay after turning away before the doll stops watching.
    pub away_flag_ms: u64,
    /// Delay after turning back before the doll is watching again.
    pub back_flag_ms: u64,
    /// Yaw of the model while facing away, in radians.
    pub away_yaw: f32,
    /// How long the doll keeps facing away.
    pub away_dwell_ms: DwellRange,
    /// How long the doll keeps watching.
    pub watch_dwell_ms: DwellRange,
}

impl Default for DollTiming {
    fn default() -> Self {
        Self {
            turn_ms: DOLL_TURN_MS,
            away_flag_ms: DOLL_AWAY_FLAG_MS,
            back_flag_ms: DOLL_BACK_FLAG_MS,
            away_yaw: DOLL_AWAY_YAW,
            away_dwell_ms: DwellRange::from_pair(DOLL_AWAY_DWELL_MS),
            watch_dwell_ms: DwellRange::from_pair(DOLL_WATCH_DWELL_MS),
        }
    }
}

impl DollTiming {
    /// Duration of a single turn.
    #[must_use]
    pub const fn turn(&self) -> Duration {
        Duration::from_millis(self.turn_ms)
    }
}

/// Runtime configuration for a match.
///
/// # Examples
///
/// ```
/// use redlight::config::GameSettings;
///
/// let settings = GameSettings::from_json_str(r#"{ "time_limit_secs": 20 }"#)?;
/// assert_eq!(settings.time_limit_secs, 20);
/// assert_eq!(settings.start_position, 3.0);
/// # Ok::<(), redlight::config::ConfigError>(())
/// ```
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameSettings {
    /// Track position the player starts at; the end marker sits at its negation.
    pub start_position: f32,
    /// Distance short of the end marker that already counts as a win.
    pub goal_margin: f32,
    /// Velocity set by `run`, in world units per tick.
    pub run_velocity: f32,
    /// Time taken to coast to a halt after `stop`.
    pub stop_ease_ms: u64,
    /// Length of the race once started.
    pub time_limit_secs: u64,
    /// Pre-match status messages.
    pub countdown: Vec<CountdownStep>,
    /// Doll look cycle timing.
    pub doll: DollTiming,
    /// Asset-server path of the doll model.
    pub doll_model: String,
    /// Seed for the doll's dwell times; random when absent.
    pub seed: Option<u64>,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            start_position: START_POSITION,
            goal_margin: GOAL_MARGIN,
            run_velocity: RUN_VELOCITY,
            stop_ease_ms: STOP_EASE_MS,
            time_limit_secs: TIME_LIMIT_SECS,
            countdown: COUNTDOWN_STEPS
                .iter()
                .map(|(after_ms, message)| CountdownStep {
                    after_ms: *after_ms,
                    message: (*message).to_owned(),
                })
                .collect(),
            doll: DollTiming::default(),
            doll_model: DOLL_MODEL_PATH.to_owned(),
            seed: None,
        }
    }
}

impl GameSettings {
    /// Parses and validates settings from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and any error from
    /// [`GameSettings::validate`].
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reads, parses and validates a JSON settings file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] when the file cannot be read, otherwise
    /// as [`GameSettings::from_json_str`].
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Checks the settings describe a playable match.
    ///
    /// # Errors
    ///
    /// Returns the first constraint violated.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("start_position", f64::from(self.start_position))?;
        positive("run_velocity", f64::from(self.run_velocity))?;
        if self.time_limit_secs == 0 {
            return Err(ConfigError::NonPositive {
                field: "time_limit_secs",
                value: 0.0,
            });
        }
        if self.goal_margin < 0.0 || self.goal_margin >= 2.0 * self.start_position {
            return Err(ConfigError::GoalBehindStart {
                margin: self.goal_margin,
            });
        }
        if self.countdown.is_empty() {
            return Err(ConfigError::EmptyCountdown);
        }
        self.doll.away_dwell_ms.check("doll.away_dwell_ms")?;
        self.doll.watch_dwell_ms.check("doll.watch_dwell_ms")?;
        Ok(())
    }

    /// Track position of the end marker.
    #[must_use]
    pub fn end_position(&self) -> f32 {
        -self.start_position
    }

    /// Position at or past which the player has won.
    #[must_use]
    pub fn goal_threshold(&self) -> f32 {
        self.end_position() + self.goal_margin
    }

    /// Coasting time after `stop`.
    #[must_use]
    pub const fn stop_ease(&self) -> Duration {
        Duration::from_millis(self.stop_ease_ms)
    }

    /// Length of the race once started.
    #[must_use]
    pub const fn time_limit(&self) -> Duration {
        Duration::from_secs(self.time_limit_secs)
    }

    /// Countdown steps as `(gap, message)` pairs.
    pub fn countdown_steps(&self) -> impl Iterator<Item = (Duration, &str)> + '_ {
        self.countdown
            .iter()
            .map(|step| (Duration::from_millis(step.after_ms), step.message.as_str()))
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}
