//! Tuning constants for the match.
//!
//! These are the defaults behind [`crate::config::GameSettings`]; a settings
//! file may override any of them.

/// Track position the player starts from.
pub const START_POSITION: f32 = 3.0;
/// Distance before the end marker at which the player counts as home.
pub const GOAL_MARGIN: f32 = 0.4;
/// Velocity applied by `run`, in world units per tick.
pub const RUN_VELOCITY: f32 = 0.03;
/// Time taken for the player to coast to a halt after `stop`.
pub const STOP_EASE_MS: u64 = 100;
/// Length of the race once started.
pub const TIME_LIMIT_SECS: u64 = 10;
/// Status messages and the offset (from the previous step) at which each appears.
pub const COUNTDOWN_STEPS: [(u64, &str); 4] = [
    (500, "Starting in 3"),
    (1000, "Starting in 2"),
    (1000, "Starting in 1"),
    (1000, "Go"),
];
/// Time the doll takes to turn in either direction.
pub const DOLL_TURN_MS: u64 = 450;
/// Delay after starting to turn away before it is safe to move.
pub const DOLL_AWAY_FLAG_MS: u64 = 150;
/// Delay after starting to turn back before the doll is watching.
pub const DOLL_BACK_FLAG_MS: u64 = 450;
/// Yaw of the doll while facing away from the player, in radians.
pub const DOLL_AWAY_YAW: f32 = -3.15;
/// Dwell range while facing away, in milliseconds (half-open).
pub const DOLL_AWAY_DWELL_MS: (u64, u64) = (1000, 2000);
/// Dwell range while watching, in milliseconds (half-open).
pub const DOLL_WATCH_DWELL_MS: (u64, u64) = (750, 1500);
/// Simulation rate of the fixed timestep.
pub const TICKS_PER_SECOND: f64 = 60.0;
/// Asset-server path of the doll model.
pub const DOLL_MODEL_PATH: &str = "models/doll/scene.gltf";
