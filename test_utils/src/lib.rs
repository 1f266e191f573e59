//! Utility helpers for tests.
//!
//! Shared by the unit-level and behavioural suites: seeded randomness,
//! settings with predictable doll timing, and stepping helpers for both the
//! bare [`Match`] and a headless Bevy [`App`].
use std::time::Duration;

use bevy::input::ButtonInput;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use redlight::config::DwellRange;
use redlight::{GameSettings, Match, MatchRng, Outcome, RedLightPlugin};

/// Seed used when a test does not care which one.
pub const DEFAULT_SEED: u64 = 0x5eed;

/// Frame length fed to headless apps.
pub const FRAME: Duration = Duration::from_millis(50);

/// A deterministic random source.
#[must_use]
pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Settings whose doll dwells exactly `away_ms` facing away and `watch_ms`
/// watching.
#[must_use]
pub fn fixed_dwell_settings(away_ms: u64, watch_ms: u64) -> GameSettings {
    let mut settings = GameSettings {
        seed: Some(DEFAULT_SEED),
        ..GameSettings::default()
    };
    settings.doll.away_dwell_ms = DwellRange {
        min_ms: away_ms,
        max_ms: away_ms + 1,
    };
    settings.doll.watch_dwell_ms = DwellRange {
        min_ms: watch_ms,
        max_ms: watch_ms + 1,
    };
    settings
}

/// Advances `game` for `total` in increments of `step`, collecting outcomes.
pub fn advance_for(
    game: &mut Match,
    rng: &mut ChaCha8Rng,
    total: Duration,
    step: Duration,
) -> Vec<Outcome> {
    let mut elapsed = Duration::ZERO;
    let mut outcomes = Vec::new();
    while elapsed < total {
        outcomes.extend(game.advance(step, rng));
        elapsed += step;
    }
    outcomes
}

/// Builds a headless app running a match with `settings`.
///
/// Time advances by [`FRAME`] per update regardless of wall-clock time, and
/// keyboard state is a bare resource the test drives directly.
#[must_use]
pub fn headless_app(settings: GameSettings) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.insert_resource(TimeUpdateStrategy::ManualDuration(FRAME));
    app.init_resource::<ButtonInput<KeyCode>>();
    app.insert_resource(MatchRng::new(Some(settings.seed.unwrap_or(DEFAULT_SEED))));
    app.insert_resource(settings);
    app.add_plugins(RedLightPlugin);
    app
}

/// Runs `frames` updates.
pub fn run_frames(app: &mut App, frames: usize) {
    for _ in 0..frames {
        app.update();
    }
}

/// Runs updates until `predicate` holds, giving up after `max_frames`.
///
/// Returns whether the predicate was satisfied.
pub fn run_until(app: &mut App, max_frames: usize, predicate: impl Fn(&App) -> bool) -> bool {
    for _ in 0..max_frames {
        if predicate(&*app) {
            return true;
        }
        app.update();
    }
    predicate(&*app)
}

/// Presses `key` for one frame's worth of edges; it stays held afterwards.
pub fn press_key(app: &mut App, key: KeyCode) {
    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .press(key);
    app.update();
    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .clear();
}

/// Releases `key`, delivering the release edge for one frame.
pub fn release_key(app: &mut App, key: KeyCode) {
    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .release(key);
    app.update();
    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .clear();
}

/// Presses and releases `key` within a single frame.
pub fn tap_key(app: &mut App, key: KeyCode) {
    {
        let mut keyboard = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
        keyboard.press(key);
        keyboard.release(key);
    }
    app.update();
    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .clear();
}

/// Releases and re-presses a held `key` within a single frame.
pub fn repress_key(app: &mut App, key: KeyCode) {
    {
        let mut keyboard = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
        keyboard.release(key);
        keyboard.press(key);
    }
    app.update();
    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .clear();
}
