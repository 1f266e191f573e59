//! Shared fixture for behavioural tests that drive a headless match.
//!
//! Hooks that advance the app are written as "run until" conditions so that
//! rspec may re-run them before every example without overshooting.

use std::sync::MutexGuard;

use bevy::prelude::*;
use redlight::{GameSettings, GameState, Match, Outcome, PlayerInfo};

use crate::outcome_capture::{install_outcome_observer, CapturedOutcomes};
use crate::thread_safe_app::{lock_app, share, SharedApp, ThreadSafeApp};

/// Generous frame budget for any single phase of a match.
pub const MAX_FRAMES: usize = 400;

/// A headless match behind a mutex.
#[derive(Debug, Clone)]
pub struct MatchFixture {
    app: SharedApp,
}

impl MatchFixture {
    /// Builds a fixture for a match with `settings`.
    pub fn bootstrap(settings: GameSettings) -> Self {
        let mut app = test_utils::headless_app(settings);
        install_outcome_observer(&mut app);
        Self { app: share(app) }
    }

    /// Locks the underlying `App` for direct inspection or mutation.
    pub fn app_guard(&self) -> MutexGuard<'_, ThreadSafeApp> {
        lock_app(&self.app)
    }

    /// Runs frames until the match reaches `state` (or a later one).
    pub fn run_until_state(&self, state: GameState) {
        let mut app = self.app_guard();
        let reached = test_utils::run_until(&mut app, MAX_FRAMES, |app| {
            let current = app.world().resource::<Match>().state();
            rank(current) >= rank(state)
        });
        assert!(reached, "match never reached {state:?}");
    }

    /// Runs a fixed number of frames.
    pub fn run_frames(&self, frames: usize) {
        test_utils::run_frames(&mut self.app_guard(), frames);
    }

    /// Presses the advance key and keeps it held.
    pub fn press_advance(&self) {
        test_utils::press_key(&mut self.app_guard(), redlight::input::ADVANCE_KEY);
    }

    /// Releases the advance key.
    pub fn release_advance(&self) {
        test_utils::release_key(&mut self.app_guard(), redlight::input::ADVANCE_KEY);
    }

    /// Taps the advance key within one frame.
    pub fn tap_advance(&self) {
        test_utils::tap_key(&mut self.app_guard(), redlight::input::ADVANCE_KEY);
    }

    /// Releases and re-presses the held advance key within one frame.
    pub fn repress_advance(&self) {
        test_utils::repress_key(&mut self.app_guard(), redlight::input::ADVANCE_KEY);
    }

    /// Whether the advance key is down.
    pub fn advance_held(&self) -> bool {
        self.app_guard()
            .world()
            .resource::<ButtonInput<KeyCode>>()
            .pressed(redlight::input::ADVANCE_KEY)
    }

    /// Current match state.
    pub fn state(&self) -> GameState {
        self.app_guard().world().resource::<Match>().state()
    }

    /// Current status text.
    pub fn status(&self) -> String {
        self.app_guard()
            .world()
            .resource::<Match>()
            .status()
            .to_owned()
    }

    /// Recorded outcome.
    pub fn outcome(&self) -> Option<Outcome> {
        self.app_guard().world().resource::<Match>().outcome()
    }

    /// Every `MatchFinished` event seen so far.
    pub fn announced(&self) -> Vec<Outcome> {
        self.app_guard()
            .world()
            .resource::<CapturedOutcomes>()
            .0
            .clone()
    }

    /// Snapshot of the single player.
    pub fn player(&self) -> PlayerInfo {
        let mut app = self.app_guard();
        let world = app.world_mut();
        let mut query = world.query::<&PlayerInfo>();
        query
            .single(world)
            .unwrap_or_else(|e| panic!("expected exactly one player: {e}"))
            .clone()
    }

    /// X translation of the player's transform.
    pub fn player_translation_x(&self) -> f32 {
        let mut app = self.app_guard();
        let world = app.world_mut();
        let mut query = world.query_filtered::<&Transform, With<redlight::Player>>();
        query
            .single(world)
            .unwrap_or_else(|e| panic!("expected exactly one player: {e}"))
            .translation
            .x
    }
}

const fn rank(state: GameState) -> u8 {
    match state {
        GameState::Loading => 0,
        GameState::Started => 1,
        GameState::Over => 2,
    }
}
