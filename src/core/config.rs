//! Game configuration.
//!
//! A `GameConfig` is fixed for the lifetime of one game and travels inside
//! the game state, so a checkpoint is self-describing.

use serde::{Deserialize, Serialize};

use super::error::SetupError;
use crate::cards::DECK_SIZE;

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 6;
pub const MAX_HAND_SIZE: usize = 6;
/// Attackers allowed on one defender at the same time.
pub const MAX_ATTACKERS: usize = 2;

/// Which ranks may be thrown in once a turn has started.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThrowIn {
    /// Only ranks of attack cards already on the table.
    #[default]
    AttackRanks,
    /// Ranks of any card on the table, attack or defence.
    TableRanks,
}

/// Configuration for one game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of seats (2..=6).
    pub player_count: usize,

    /// Cards dealt to each player, refill target, and slot limit per turn.
    pub hand_size: usize,

    /// Attackers allowed at once (1 or 2). Only matters with 3+ players.
    pub max_attackers: usize,

    /// Throw-in rule for adding cards to a running turn.
    pub throw_in: ThrowIn,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_count: MIN_PLAYERS,
            hand_size: MAX_HAND_SIZE,
            max_attackers: MAX_ATTACKERS,
            throw_in: ThrowIn::AttackRanks,
        }
    }
}

impl GameConfig {
    /// Default configuration for `player_count` players.
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        Self {
            player_count,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_hand_size(mut self, hand_size: usize) -> Self {
        self.hand_size = hand_size;
        self
    }

    #[must_use]
    pub fn with_max_attackers(mut self, max_attackers: usize) -> Self {
        self.max_attackers = max_attackers;
        self
    }

    #[must_use]
    pub fn with_throw_in(mut self, throw_in: ThrowIn) -> Self {
        self.throw_in = throw_in;
        self
    }

    /// Check that a game with this configuration can be dealt.
    pub fn validate(&self) -> Result<(), SetupError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.player_count) {
            return Err(SetupError::InvalidPlayerCount(self.player_count));
        }
        if !(1..=MAX_HAND_SIZE).contains(&self.hand_size) {
            return Err(SetupError::InvalidHandSize(self.hand_size));
        }
        // One card is turned up as trump and goes back under the deck, so it
        // never reduces what can be dealt.
        if self.player_count * self.hand_size > DECK_SIZE {
            return Err(SetupError::NotEnoughCards {
                players: self.player_count,
                hand_size: self.hand_size,
            });
        }
        if !(1..=MAX_ATTACKERS).contains(&self.max_attackers) {
            return Err(SetupError::InvalidAttackerLimit {
                got: self.max_attackers,
                max: MAX_ATTACKERS,
            });
        }
        Ok(())
    }
}
