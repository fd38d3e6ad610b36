//! A session: games played back to back by the same table.
//!
//! The loser of a game becomes the dealer, and the player after the dealer
//! attacks first in the next game. The first game's attacker is drawn from
//! the session RNG.

use serde::{Deserialize, Serialize};
use tracing::info;

use super::controller::Durak;
use super::setup::DurakBuilder;
use super::view::PlayerView;
use crate::core::{
    CheckpointError, GameConfig, GameRng, GameRngState, GameState, Move, MoveError, PlayerId,
    SetupError,
};
use crate::rules::{GameResult, MoveEffect, RulesEngine};

/// Summary of a finished game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    /// 1-based.
    pub game_number: u32,
    /// Seed the game was dealt from.
    pub seed: u64,
    pub starting_attacker: PlayerId,
    pub result: GameResult,
    /// Turn the game ended on.
    pub turns: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
struct CurrentGame {
    seed: u64,
    starting_attacker: PlayerId,
    state: GameState,
}

/// Games in sequence with dealer rotation.
#[derive(Clone, Debug)]
pub struct Session {
    config: GameConfig,
    rng: GameRng,
    dealer: Option<PlayerId>,
    records: Vec<GameRecord>,
    current: Option<CurrentGame>,
}

#[derive(Serialize, Deserialize)]
struct SessionCheckpoint {
    config: GameConfig,
    rng: GameRngState,
    dealer: Option<PlayerId>,
    records: Vec<GameRecord>,
    current: Option<CurrentGame>,
}

impl Session {
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, SetupError> {
        config.validate()?;
        Ok(Self {
            config,
            rng: GameRng::new(seed),
            dealer: None,
            records: Vec::new(),
            current: None,
        })
    }

    /// Deal the next game. Fails while the current game is still running.
    pub fn start_game(&mut self) -> Result<&GameState, SetupError> {
        if self
            .current
            .as_ref()
            .is_some_and(|game| Durak.is_terminal(&game.state).is_none())
        {
            return Err(SetupError::GameInProgress);
        }

        let count = self.config.player_count;
        let seed = self.rng.next_seed();
        let starting_attacker = match self.dealer {
            Some(dealer) => dealer.next(count),
            None => {
                let seats: Vec<PlayerId> = PlayerId::all(count).collect();
                self.rng.choose(&seats).copied().unwrap_or(PlayerId::new(0))
            }
        };

        let (_, state) = DurakBuilder::new()
            .config(self.config)
            .starting_attacker(starting_attacker)
            .dealer(self.dealer)
            .build(seed)?;
        info!(
            game = self.records.len() + 1,
            seed,
            %starting_attacker,
            dealer = ?self.dealer,
            "game started"
        );

        let game = self.current.insert(CurrentGame {
            seed,
            starting_attacker,
            state,
        });
        Ok(&game.state)
    }

    /// Apply a move to the current game. A move that ends the game records
    /// it and passes the deal to the loser.
    pub fn apply_move(&mut self, mv: &Move) -> Result<MoveEffect, MoveError> {
        let game = self.current.as_mut().ok_or(MoveError::WrongPhase)?;
        let effect = Durak.apply_move(&mut game.state, mv)?;

        if let MoveEffect::GameOver { result, .. } = effect {
            let record = GameRecord {
                game_number: self.records.len() as u32 + 1,
                seed: game.seed,
                starting_attacker: game.starting_attacker,
                result,
                turns: game.state.turn_number(),
            };
            if let Some(loser) = result.loser() {
                self.dealer = Some(loser);
            }
            info!(
                game = record.game_number,
                ?result,
                turns = record.turns,
                dealer = ?self.dealer,
                "game finished"
            );
            self.records.push(record);
        }
        Ok(effect)
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The current game, finished or not.
    #[must_use]
    pub fn state(&self) -> Option<&GameState> {
        self.current.as_ref().map(|game| &game.state)
    }

    #[must_use]
    pub fn view(&self, player: PlayerId) -> Option<PlayerView> {
        self.state().map(|state| state.view(player))
    }

    /// Loser of the most recent game that had one.
    #[must_use]
    pub fn dealer(&self) -> Option<PlayerId> {
        self.dealer
    }

    #[must_use]
    pub fn records(&self) -> &[GameRecord] {
        &self.records
    }

    // === Checkpoints ===

    pub fn to_bytes(&self) -> Result<Vec<u8>, CheckpointError> {
        let checkpoint = SessionCheckpoint {
            config: self.config,
            rng: self.rng.state(),
            dealer: self.dealer,
            records: self.records.clone(),
            current: self.current.clone(),
        };
        Ok(bincode::serialize(&checkpoint)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CheckpointError> {
        let checkpoint: SessionCheckpoint = bincode::deserialize(bytes)?;
        if checkpoint.config.validate().is_err() {
            return Err(CheckpointError::Inconsistent("invalid config"));
        }
        if let Some(game) = &checkpoint.current {
            if game.state.config != checkpoint.config {
                return Err(CheckpointError::Inconsistent("game config differs from session"));
            }
            game.state.check_consistent()?;
        }
        Ok(Self {
            config: checkpoint.config,
            rng: GameRng::from_state(&checkpoint.rng),
            dealer: checkpoint.dealer,
            records: checkpoint.records,
            current: checkpoint.current,
        })
    }
}
