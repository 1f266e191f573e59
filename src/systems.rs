//! Systems driving the match from the Bevy schedule.
//!
//! Simulation systems run on the fixed timestep so per-tick velocities mean
//! the same thing at any frame rate. The sync systems mirror simulation state
//! onto transforms and never write back.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::GameSettings;
use crate::doll::Doll;
use crate::game::{Match, MatchFinished};
use crate::player::{Player, PlayerInfo};
use crate::track::{doll_placement, player_start, progress_bar, ProgressBar};

/// Smallest scale the progress bar shrinks to, keeping its transform invertible.
const MIN_BAR_SCALE: f32 = 1e-4;

/// Random source for the doll's dwell times.
#[derive(Resource, Debug)]
pub struct MatchRng(pub ChaCha8Rng);

impl MatchRng {
    /// Seeds from `seed`, or from the operating system when absent.
    #[must_use]
    pub fn new(seed: Option<u64>) -> Self {
        Self(seed.map_or_else(ChaCha8Rng::from_os_rng, ChaCha8Rng::seed_from_u64))
    }
}

/// Run condition: the race is on.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy run conditions take `Res<T>` by value."
)]
#[must_use]
pub fn match_started(game: Res<Match>) -> bool {
    game.accepts_input()
}

/// Spawns the player and the doll.
///
/// Only simulation-facing components are added here; the presentation layer
/// dresses these entities with meshes when rendering is enabled.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn spawn_actors_system(mut commands: Commands, settings: Res<GameSettings>) {
    commands.spawn((
        Name::new("Player"),
        Player,
        PlayerInfo::new(settings.start_position),
        player_start(&settings),
    ));
    commands.spawn((Name::new("Doll"), Doll, doll_placement()));
}

/// Puts up the time-limit bar once the race starts.
pub fn spawn_progress_bar_system(mut commands: Commands, bars: Query<(), With<ProgressBar>>) {
    if !bars.is_empty() {
        return;
    }
    commands.spawn((
        Name::new("ProgressBar"),
        ProgressBar,
        progress_bar().transform(),
    ));
}

/// Runs the countdown, the doll cycle and the time limit.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn advance_match_system(
    mut commands: Commands,
    time: Res<Time>,
    mut game: ResMut<Match>,
    mut rng: ResMut<MatchRng>,
) {
    if let Some(outcome) = game.advance(time.delta(), &mut rng.0) {
        commands.trigger(MatchFinished { outcome });
    }
}

/// Moves the player one tick and ends the match on a win or loss.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn update_player_system(
    mut commands: Commands,
    time: Res<Time>,
    settings: Res<GameSettings>,
    mut game: ResMut<Match>,
    mut players: Query<&mut PlayerInfo>,
) {
    let goal = settings.goal_threshold();
    for mut player in &mut players {
        let Some(outcome) = player.update(time.delta(), game.look_direction(), goal) else {
            continue;
        };
        if game.finish(outcome).is_ok() {
            commands.trigger(MatchFinished { outcome });
        }
        break;
    }
}

/// Places the player's sphere at its track position.
pub fn sync_player_transform(
    mut players: Query<(&PlayerInfo, &mut Transform), (With<Player>, Changed<PlayerInfo>)>,
) {
    for (info, mut transform) in &mut players {
        transform.translation.x = info.position_x();
    }
}

/// Turns the doll model to the match's current yaw.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn sync_doll_transform(game: Res<Match>, mut dolls: Query<&mut Transform, With<Doll>>) {
    if !game.is_changed() {
        return;
    }
    for mut transform in &mut dolls {
        transform.rotation = Quat::from_rotation_y(game.doll_yaw());
    }
}

/// Shrinks the progress bar with the time left.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn sync_progress_bar(game: Res<Match>, mut bars: Query<&mut Transform, With<ProgressBar>>) {
    if !game.is_changed() {
        return;
    }
    let scale = game.time_remaining_fraction().max(MIN_BAR_SCALE);
    for mut transform in &mut bars {
        transform.scale.x = scale;
    }
}
