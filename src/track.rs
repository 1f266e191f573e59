//! Static layout of the race track.
//!
//! The track runs along the X axis from the start marker at
//! `start_position` to the end marker at its negation, with the ground lane
//! set back behind both. Everything here is plain data so the layout can be
//! checked without a renderer; the presentation layer turns it into meshes.

use bevy::prelude::*;

use crate::config::GameSettings;

/// Colour of the start/end markers and the progress bar.
pub const MARKER_COLOR: [u8; 3] = [0xfb, 0xc8, 0x51];
/// Colour of the ground lane.
pub const LANE_COLOR: [u8; 3] = [0xe5, 0xa7, 0x16];
/// Colour of the player's sphere.
pub const PLAYER_COLOR: [u8; 3] = [0xff, 0xff, 0xff];
/// Background colour behind the scene.
pub const SKY_COLOR: [u8; 3] = [0xb7, 0xc3, 0xf3];
/// Radius of the player's sphere.
pub const PLAYER_RADIUS: f32 = 0.3;
/// Depth at which the player runs, in front of the lane.
pub const PLAYER_DEPTH: f32 = 1.0;
/// Where the doll stands, behind the finish.
pub const DOLL_TRANSLATION: Vec3 = Vec3::new(0.0, -1.0, 0.0);
/// Uniform scale applied to the doll model.
pub const DOLL_SCALE: f32 = 0.4;
/// Height at which the progress bar hangs above the track.
pub const PROGRESS_BAR_HEIGHT: f32 = 3.35;
/// Width of the progress bar at full time.
pub const PROGRESS_BAR_WIDTH: f32 = 5.0;

const MARKER_WIDTH: f32 = 0.2;
const MARKER_HEIGHT: f32 = 1.5;
const MARKER_YAW: f32 = 0.35;

/// Marker for the bar that shrinks as the time limit runs down.
#[derive(Component, Reflect, Default, Debug, Clone, Copy, PartialEq, Eq)]
#[reflect(Component, Default)]
pub struct ProgressBar;

/// Marker for static track geometry.
#[derive(Component, Reflect, Default, Debug, Clone, Copy, PartialEq, Eq)]
#[reflect(Component, Default)]
pub struct TrackPiece;

/// An axis-aligned box placed in the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubeSpec {
    /// Width, height and depth.
    pub size: Vec3,
    /// Centre of the box.
    pub translation: Vec3,
    /// Rotation about the vertical axis in radians.
    pub yaw: f32,
    /// sRGB colour.
    pub color: [u8; 3],
}

impl CubeSpec {
    /// Transform placing the box in the world.
    #[must_use]
    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.translation).with_rotation(Quat::from_rotation_y(self.yaw))
    }
}

/// Ground lane plus the start and end markers, angled toward the camera.
#[must_use]
pub fn track_layout(settings: &GameSettings) -> [CubeSpec; 3] {
    let start = settings.start_position;
    let end = settings.end_position();
    [
        CubeSpec {
            size: Vec3::new(start * 2.0 + MARKER_WIDTH, MARKER_HEIGHT, 1.0),
            translation: Vec3::new(0.0, 0.0, -1.0),
            yaw: 0.0,
            color: LANE_COLOR,
        },
        CubeSpec {
            size: Vec3::new(MARKER_WIDTH, MARKER_HEIGHT, 1.0),
            translation: Vec3::new(start, 0.0, 0.0),
            yaw: -MARKER_YAW,
            color: MARKER_COLOR,
        },
        CubeSpec {
            size: Vec3::new(MARKER_WIDTH, MARKER_HEIGHT, 1.0),
            translation: Vec3::new(end, 0.0, 0.0),
            yaw: MARKER_YAW,
            color: MARKER_COLOR,
        },
    ]
}

/// The time-limit bar at full width.
#[must_use]
pub fn progress_bar() -> CubeSpec {
    CubeSpec {
        size: Vec3::new(PROGRESS_BAR_WIDTH, 0.1, 1.0),
        translation: Vec3::new(0.0, PROGRESS_BAR_HEIGHT, 0.0),
        yaw: 0.0,
        color: MARKER_COLOR,
    }
}

/// Where the player's sphere starts.
#[must_use]
pub fn player_start(settings: &GameSettings) -> Transform {
    Transform::from_xyz(settings.start_position, 0.0, PLAYER_DEPTH)
}

/// Placement of the doll model.
#[must_use]
pub fn doll_placement() -> Transform {
    Transform::from_translation(DOLL_TRANSLATION).with_scale(Vec3::splat(DOLL_SCALE))
}
