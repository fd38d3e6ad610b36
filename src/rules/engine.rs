//! Rules engine trait.
//!
//! The controller implements `RulesEngine` to define:
//! - Which moves a player may make
//! - How a move modifies state
//! - When the game is over

use serde::{Deserialize, Serialize};

use crate::core::action::Move;
use crate::core::error::MoveError;
use crate::core::player::PlayerId;
use crate::core::state::GameState;
use crate::zones::TurnOutcome;

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    /// The only player left holding cards. Everybody else won.
    Durak(PlayerId),
    /// Everybody ran out of cards at the same time.
    Draw,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            GameResult::Durak(loser) => *loser != player,
            GameResult::Draw => false,
        }
    }

    #[must_use]
    pub fn loser(&self) -> Option<PlayerId> {
        match self {
            GameResult::Durak(loser) => Some(*loser),
            GameResult::Draw => None,
        }
    }
}

/// What an accepted move did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveEffect {
    /// The turn goes on.
    Played,
    /// The turn ended and the next one has started.
    TurnSettled {
        outcome: TurnOutcome,
        next_attacker: PlayerId,
    },
    /// The turn ended and so did the game.
    GameOver {
        outcome: TurnOutcome,
        result: GameResult,
    },
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `candidate_moves`: may over-approximate; `legal_moves` filters it
/// - `apply_move`: must be atomic, a rejected move leaves `state` untouched
/// - `is_terminal`: return `None` while the game continues
pub trait RulesEngine {
    /// Every move `player` could conceivably submit right now.
    fn candidate_moves(&self, state: &GameState, player: PlayerId) -> Vec<Move>;

    /// Apply a move, or reject it and leave the state as it was.
    fn apply_move(&self, state: &mut GameState, mv: &Move) -> Result<MoveEffect, MoveError>;

    /// Check if the game is over.
    fn is_terminal(&self, state: &GameState) -> Option<GameResult>;

    // === Convenience Methods ===

    /// Whether `mv` would be accepted.
    fn is_legal(&self, state: &GameState, mv: &Move) -> bool {
        self.apply_move(&mut state.clone(), mv).is_ok()
    }

    /// The moves `player` may make right now.
    fn legal_moves(&self, state: &GameState, player: PlayerId) -> Vec<Move> {
        self.candidate_moves(state, player)
            .into_iter()
            .filter(|mv| self.is_legal(state, mv))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_result_is_winner() {
        let result = GameResult::Durak(PlayerId::new(1));
        assert!(result.is_winner(PlayerId::new(0)));
        assert!(!result.is_winner(PlayerId::new(1)));
        assert!(result.is_winner(PlayerId::new(2)));
        assert_eq!(result.loser(), Some(PlayerId::new(1)));

        let draw = GameResult::Draw;
        assert!(!draw.is_winner(PlayerId::new(0)));
        assert_eq!(draw.loser(), None);
    }
}
