//! Bevy plugin wiring the match into the schedule.

use bevy::ecs::prelude::On;
use bevy::prelude::*;
use log::{error, info};

use crate::config::GameSettings;
use crate::constants::TICKS_PER_SECOND;
use crate::doll::{Doll, DollModelError};
use crate::game::{Match, MatchFinished};
use crate::input::player_input_system;
use crate::player::Player;
use crate::systems::{
    advance_match_system, match_started, spawn_actors_system, spawn_progress_bar_system,
    sync_doll_transform, sync_player_transform, sync_progress_bar, update_player_system,
    MatchRng,
};
use crate::track::{ProgressBar, TrackPiece};

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value for Events V2."
)]
fn log_match_finished(event: On<MatchFinished>) {
    let MatchFinished { outcome } = event.event();
    info!("{outcome}");
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value for Events V2."
)]
fn log_doll_model_error(event: On<DollModelError>) {
    error!("{}", event.event());
}

/// Bevy plugin running a single match.
///
/// # Responsibilities
///
/// - Uses the [`GameSettings`] resource if one was inserted beforehand,
///   otherwise the defaults.
/// - Inserts the [`Match`] and a [`MatchRng`] seeded from the settings.
/// - Runs the simulation on a 60 Hz fixed timestep and player input in
///   `Update`.
/// - Mirrors simulation state onto the player, doll and progress bar
///   transforms.
///
/// Rendering is left to `PresentationPlugin`, so this plugin runs headless
/// under `MinimalPlugins`. It reads `ButtonInput<KeyCode>`, which
/// `DefaultPlugins` provides.
///
/// # Examples
///
/// ```no_run
/// use bevy::prelude::*;
/// use redlight::RedLightPlugin;
///
/// App::new()
///     .add_plugins(MinimalPlugins)
///     .init_resource::<ButtonInput<KeyCode>>()
///     .add_plugins(RedLightPlugin)
///     .run();
/// ```
#[derive(Debug, Default)]
pub struct RedLightPlugin;

impl Plugin for RedLightPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<Player>()
            .register_type::<Doll>()
            .register_type::<ProgressBar>()
            .register_type::<TrackPiece>();
        app.add_observer(log_match_finished);
        app.add_observer(log_doll_model_error);

        app.init_resource::<GameSettings>();
        let settings = app.world().resource::<GameSettings>().clone();
        app.insert_resource(Match::new(&settings));
        if !app.world().contains_resource::<MatchRng>() {
            app.insert_resource(MatchRng::new(settings.seed));
        }
        app.insert_resource(Time::<Fixed>::from_hz(TICKS_PER_SECOND));

        app.add_systems(Startup, spawn_actors_system);
        app.add_systems(Update, player_input_system);
        app.add_systems(
            FixedUpdate,
            (
                advance_match_system,
                update_player_system.run_if(match_started),
            )
                .chain(),
        );
        app.add_systems(
            Update,
            (
                sync_player_transform,
                sync_doll_transform,
                (
                    spawn_progress_bar_system.run_if(match_started),
                    sync_progress_bar,
                )
                    .chain(),
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameState;
    use rstest::rstest;

    #[rstest]
    fn plugin_initialises_resources() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.init_resource::<ButtonInput<KeyCode>>();
        app.add_plugins(RedLightPlugin);
        assert!(app.world().contains_resource::<GameSettings>());
        assert!(app.world().contains_resource::<MatchRng>());
        assert_eq!(app.world().resource::<Match>().state(), GameState::Loading);
        app.update();
        let world = app.world_mut();
        let mut players = world.query::<&Player>();
        assert_eq!(players.iter(world).count(), 1);
        let mut bars = world.query::<&ProgressBar>();
        assert_eq!(bars.iter(world).count(), 0, "no bar before the race starts");
    }

    #[rstest]
    fn plugin_respects_preinserted_settings() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.init_resource::<ButtonInput<KeyCode>>();
        app.insert_resource(GameSettings {
            time_limit_secs: 3,
            ..GameSettings::default()
        });
        app.add_plugins(RedLightPlugin);
        assert_eq!(app.world().resource::<GameSettings>().time_limit_secs, 3);
    }
}
