//! Core engine types: players, RNG, configuration, moves, state, errors.

pub mod action;
pub mod config;
pub mod error;
pub mod player;
pub mod rng;
pub mod state;

pub use action::{Move, MoveKind, MoveRecord};
pub use config::{GameConfig, ThrowIn};
pub use error::{CheckpointError, InsufficientCards, MoveError, SetupError};
pub use player::{PlayerId, PlayerMap};
pub use rng::{GameRng, GameRngState};
pub use state::GameState;
