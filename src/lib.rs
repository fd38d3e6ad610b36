//! # durak-engine
//!
//! Rule engine for Durak, the shedding card game played with a 36-card
//! deck by two to six players.
//!
//! ## Design Principles
//!
//! 1. **N-Player First**: Turn order, roles and refills work for any table
//!    size the deck can deal. No convenience methods that assume 2 players.
//!
//! 2. **Atomic Moves**: A move is either applied in full or rejected with a
//!    `MoveError`; the state is never left half-updated.
//!
//! 3. **Deterministic**: The same seed deals the same game.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: O(1) cloning via `im-rs`. Moves run on
//!   a clone that replaces the state only when the move is accepted.
//!
//! - **Phase as a Tagged Enum**: `Attacking → Defending → Settling` is a
//!   single `Phase` value on the round, never a set of flags.
//!
//! ## Modules
//!
//! - `core`: Players, RNG, configuration, moves, state, errors
//! - `cards`: Cards, the beat relation, and the deck
//! - `zones`: Hands and the battlefield
//! - `rules`: RulesEngine trait
//! - `games`: The Durak controller, setup, sessions and player views
//!
//! ```
//! use durak_engine::{Durak, DurakBuilder, Move, RulesEngine};
//!
//! let (rules, mut state) = DurakBuilder::new().player_count(2).build(7).unwrap();
//! let attacker = state.round().primary_attacker();
//! let mv = rules.legal_moves(&state, attacker)[0];
//! rules.apply_move(&mut state, &mv).unwrap();
//! assert!(matches!(mv, Move::Attack { .. }));
//! assert_eq!(state.round().slots().len(), 1);
//! # let _: Durak = rules;
//! ```

pub mod cards;
pub mod core;
pub mod games;
pub mod rules;
pub mod zones;

// Re-export commonly used types
pub use crate::core::{
    CheckpointError, GameConfig, GameRng, GameRngState, GameState, Move, MoveError, MoveKind,
    MoveRecord, PlayerId, PlayerMap, SetupError, ThrowIn,
};

pub use crate::cards::{Card, Deck, Rank, Suit};

pub use crate::zones::{Hand, Phase, Round, Slot, TurnOutcome};

pub use crate::rules::{GameResult, MoveEffect, RulesEngine};

pub use crate::games::durak::{
    apply_move, Arrangement, Durak, DurakBuilder, GameRecord, PlayerView, Role, SeatView, Session,
};
