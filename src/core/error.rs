//! Error types.
//!
//! Every rejected move is reported as a [`MoveError`] and leaves the game
//! state untouched. Setup problems are [`SetupError`]s.

use thiserror::Error;

use super::player::PlayerId;
use crate::cards::Card;

/// Returned when more cards are dealt than the deck holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("cannot deal {requested} cards, only {remaining} left in the deck")]
pub struct InsufficientCards {
    pub requested: usize,
    pub remaining: usize,
}

/// Why a move was rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error(transparent)]
    InsufficientCards(#[from] InsufficientCards),

    #[error("{player} does not hold {card}")]
    CardNotHeld { player: PlayerId, card: Card },

    #[error("no room for another attack card")]
    SlotsFull,

    #[error("{player} is not attacking this turn")]
    NotAnAttacker { player: PlayerId },

    #[error("rank of {card} is not on the table")]
    IllegalValue { card: Card },

    #[error("{defence} does not beat {attack}")]
    DoesNotBeat { attack: Card, defence: Card },

    #[error("{next} holds {held} cards, needs more than {required}")]
    InsufficientDefenderCards {
        next: PlayerId,
        held: usize,
        required: usize,
    },

    #[error("{player} is not the defender")]
    NotTheDefender { player: PlayerId },

    #[error("move not allowed in the current phase")]
    WrongPhase,

    #[error("slot {index} does not hold an open attack")]
    SlotNotOpen { index: usize },

    #[error("{player} is not seated in this game")]
    UnknownPlayer { player: PlayerId },
}

/// Why a game could not be set up.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("player count must be 2..=6, got {0}")]
    InvalidPlayerCount(usize),

    #[error("hand size must be 1..=6, got {0}")]
    InvalidHandSize(usize),

    #[error("{players} hands of {hand_size} cards do not fit in the deck")]
    NotEnoughCards { players: usize, hand_size: usize },

    #[error("at most {max} attackers allowed, got {got}")]
    InvalidAttackerLimit { got: usize, max: usize },

    #[error("{0} appears more than once in the arranged deal")]
    DuplicateCard(Card),

    #[error("arranged deal has {got} hands for {expected} players")]
    HandCountMismatch { got: usize, expected: usize },

    #[error("starting player {0} is not seated")]
    UnknownStartingPlayer(PlayerId),

    #[error("the current game has not finished")]
    GameInProgress,

    #[error(transparent)]
    Deck(#[from] InsufficientCards),
}

/// Failure to encode, decode or accept a state checkpoint.
#[derive(Debug, Error)]
pub enum CheckpointError {
    #[error("checkpoint codec: {0}")]
    Codec(#[from] bincode::Error),

    /// The bytes decoded to a state no game could reach.
    #[error("inconsistent checkpoint: {0}")]
    Inconsistent(&'static str),
}
