//! Keyboard control of the player.

use bevy::prelude::*;

use crate::config::GameSettings;
use crate::game::Match;
use crate::player::PlayerInfo;

/// Key that moves the player forward while held.
pub const ADVANCE_KEY: KeyCode = KeyCode::ArrowUp;

/// What a key edge asks the player to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAction {
    /// Start moving at full speed.
    Run,
    /// Coast to a halt.
    Stop,
}

/// Edges and final state of the advance key for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyFrame {
    /// The key went down at least once this frame.
    pub just_pressed: bool,
    /// The key came up at least once this frame.
    pub just_released: bool,
    /// The key is down at the end of the frame.
    pub held: bool,
}

impl KeyFrame {
    /// Samples `key` from `keyboard`.
    #[must_use]
    pub fn sample(keyboard: &ButtonInput<KeyCode>, key: KeyCode) -> Self {
        Self {
            just_pressed: keyboard.just_pressed(key),
            just_released: keyboard.just_released(key),
            held: keyboard.pressed(key),
        }
    }
}

/// Maps one frame of the advance key to the actions to apply, in order.
///
/// Several edges can land in a single frame. The key's final state decides:
///
/// - down at the end after any edge: run, even if it was briefly released;
/// - tapped (pressed then released): run then stop, so the player coasts
///   from full speed;
/// - released only: stop.
///
/// # Examples
///
/// ```
/// use redlight::input::{player_actions, KeyFrame, PlayerAction};
///
/// let tap = KeyFrame { just_pressed: true, just_released: true, held: false };
/// assert_eq!(player_actions(tap), &[PlayerAction::Run, PlayerAction::Stop]);
///
/// let release = KeyFrame { just_released: true, ..KeyFrame::default() };
/// assert_eq!(player_actions(release), &[PlayerAction::Stop]);
/// assert!(player_actions(KeyFrame::default()).is_empty());
/// ```
#[must_use]
pub const fn player_actions(frame: KeyFrame) -> &'static [PlayerAction] {
    match frame {
        KeyFrame {
            held: true,
            just_pressed,
            just_released,
        } if just_pressed || just_released => &[PlayerAction::Run],
        KeyFrame {
            held: false,
            just_pressed: true,
            ..
        } => &[PlayerAction::Run, PlayerAction::Stop],
        KeyFrame {
            held: false,
            just_released: true,
            ..
        } => &[PlayerAction::Stop],
        _ => &[],
    }
}

/// Applies `action` to the player using the match's tuning.
pub fn apply_action(player: &mut PlayerInfo, action: PlayerAction, settings: &GameSettings) {
    match action {
        PlayerAction::Run => player.run(settings.run_velocity),
        PlayerAction::Stop => player.stop(settings.stop_ease()),
    }
}

/// Reads the advance key and drives the player, but only mid-race.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn player_input_system(
    keyboard: Res<ButtonInput<KeyCode>>,
    game: Res<Match>,
    settings: Res<GameSettings>,
    mut players: Query<&mut PlayerInfo>,
) {
    if !game.accepts_input() {
        return;
    }

    let actions = player_actions(KeyFrame::sample(&keyboard, ADVANCE_KEY));
    if actions.is_empty() {
        return;
    }

    for mut player in &mut players {
        for action in actions {
            apply_action(&mut player, *action, &settings);
        }
    }
}
