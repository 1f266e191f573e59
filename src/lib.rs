#![cfg_attr(docsrs, feature(doc_cfg))]
//! Library crate providing the red light, green light minigame.
//!
//! The match logic ([`game`], [`doll`], [`player`], [`input`]) is plain Rust
//! advanced by explicit time deltas. [`RedLightPlugin`] drives it from the
//! Bevy schedule; with the `render` feature, [`PresentationPlugin`] draws it.
pub mod clock;
pub mod config;
pub mod constants;
pub mod doll;
pub mod game;
pub mod input;
pub mod logging;
pub mod player;
pub mod plugin;
#[cfg(feature = "render")]
#[cfg_attr(docsrs, doc(cfg(feature = "render")))]
pub mod presentation;
pub mod systems;
pub mod track;
pub mod tween;

pub use config::{ConfigError, GameSettings};
pub use doll::{Doll, DollCycle, DollModelError, LookDirection};
pub use game::{GameState, Match, MatchFinished, Outcome, TransitionError};
pub use input::{player_actions, KeyFrame, PlayerAction};
pub use logging::init as init_logging;
pub use player::{Player, PlayerInfo};
pub use plugin::RedLightPlugin;
#[cfg(feature = "render")]
#[cfg_attr(docsrs, doc(cfg(feature = "render")))]
pub use presentation::{DollModelPlugin, PresentationPlugin};
pub use systems::MatchRng;

pub mod prelude {
    //! Prelude exports used in documentation examples.
    //!
    //! ```rust,no_run
    //! use redlight::prelude::*;
    //! ```

    pub use crate::GameSettings;
    pub use crate::GameState;
    pub use crate::LookDirection;
    pub use crate::Match;
    pub use crate::Outcome;
    pub use crate::PlayerInfo;
    pub use crate::RedLightPlugin;
}
