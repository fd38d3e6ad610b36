//! Game state.
//!
//! `GameState` is the single owned aggregate for one game: deck, trump,
//! hands, the live round, and the move history. It is built on `im`
//! persistent structures, so `clone()` is cheap; the controller relies on
//! that to apply a move to a copy and commit it only when the move succeeds.
//!
//! Outside code reads the state through accessors or a
//! [`PlayerView`](crate::games::durak::PlayerView); only the controller and
//! setup mutate it.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::action::MoveRecord;
use super::config::GameConfig;
use super::error::CheckpointError;
use super::player::{PlayerId, PlayerMap};
use crate::cards::{Card, Deck, Suit};
use crate::zones::{Hand, Phase, Round};

/// Complete state of one game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub(crate) config: GameConfig,
    pub(crate) deck: Deck,
    pub(crate) trump: Card,
    pub(crate) hands: PlayerMap<Hand>,
    pub(crate) round: Round,
    /// Loser of the previous game of the session, if any.
    pub(crate) dealer: Option<PlayerId>,
    /// Turn number (starts at 1).
    pub(crate) turn_number: u32,
    /// Move sequence within the turn.
    pub(crate) sequence: u32,
    pub(crate) history: Vector<MoveRecord>,
    /// Cards in play when the game was set up; conserved by every move.
    pub(crate) card_count: usize,
}

impl GameState {
    /// Assemble a state and seat the first attacker.
    pub(crate) fn new(
        config: GameConfig,
        deck: Deck,
        trump: Card,
        hands: PlayerMap<Hand>,
        attacker: PlayerId,
        dealer: Option<PlayerId>,
    ) -> Self {
        let mut state = Self {
            config,
            deck,
            trump,
            hands,
            round: Round::new([attacker], attacker.next(config.player_count)),
            dealer,
            turn_number: 1,
            sequence: 0,
            history: Vector::new(),
            card_count: 0,
        };
        state.round = state.round_for(attacker);
        state.card_count = state.total_cards();
        state
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.hands.player_count()
    }

    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// The card turned up at setup.
    #[must_use]
    pub fn trump(&self) -> Card {
        self.trump
    }

    #[must_use]
    pub fn trump_suit(&self) -> Suit {
        self.trump.suit
    }

    #[must_use]
    pub fn hand(&self, player: PlayerId) -> &Hand {
        &self.hands[player]
    }

    #[must_use]
    pub fn hands(&self) -> &PlayerMap<Hand> {
        &self.hands
    }

    #[must_use]
    pub fn round(&self) -> &Round {
        &self.round
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.round.phase()
    }

    #[must_use]
    pub fn dealer(&self) -> Option<PlayerId> {
        self.dealer
    }

    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    /// Accepted moves, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &MoveRecord> {
        self.history.iter()
    }

    // === Turn order ===

    /// A player is out once the deck is empty and their hand is empty.
    #[must_use]
    pub fn is_out(&self, player: PlayerId) -> bool {
        self.deck.is_empty() && self.hands[player].is_empty()
    }

    /// Players still in the game, in seat order.
    pub fn players_in(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.hands.player_ids().filter(|&p| !self.is_out(p))
    }

    /// The first player after `player` in turn order who is still in the
    /// game. Never returns `player` itself.
    #[must_use]
    pub fn next_in_play(&self, player: PlayerId) -> Option<PlayerId> {
        let count = self.player_count();
        std::iter::successors(Some(player.next(count)), |p| Some(p.next(count)))
            .take(count - 1)
            .find(|&p| !self.is_out(p))
    }

    /// Roles for a turn led by `attacker`: the defender is the next player
    /// still in, and with three or more players in, the player after the
    /// defender joins the attack.
    pub(crate) fn round_for(&self, attacker: PlayerId) -> Round {
        let count = self.player_count();
        let defender = self
            .next_in_play(attacker)
            .unwrap_or_else(|| attacker.next(count));
        let mut attackers = vec![attacker];
        if self.config.max_attackers > 1 {
            if let Some(second) = self.next_in_play(defender) {
                if second != attacker && second != defender {
                    attackers.push(second);
                }
            }
        }
        Round::new(attackers, defender)
    }

    // === Invariants ===

    /// Cards across the deck, all hands, all beaten piles, and the table.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        let held: usize = self
            .hands
            .values()
            .map(|h| h.len() + h.beaten_len())
            .sum();
        self.deck.len() + held + self.round.card_count()
    }

    /// Whether no card has been created or lost since setup.
    #[must_use]
    pub fn cards_conserved(&self) -> bool {
        self.total_cards() == self.card_count
    }

    // === Checkpoints ===

    /// Encode the full state, e.g. for the persistence layer.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CheckpointError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode a checkpoint, rejecting states whose seats or card count do
    /// not fit together.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CheckpointError> {
        let state: Self = bincode::deserialize(bytes)?;
        state.check_consistent()?;
        Ok(state)
    }

    pub(crate) fn check_consistent(&self) -> Result<(), CheckpointError> {
        let inconsistent = |reason| Err(CheckpointError::Inconsistent(reason));
        let seated = |player: PlayerId| self.hands.contains(player);

        if self.config.validate().is_err() {
            return inconsistent("invalid config");
        }
        if self.hands.player_count() != self.config.player_count {
            return inconsistent("hand count does not match player count");
        }
        let round = &self.round;
        if round.attackers().is_empty() {
            return inconsistent("no attacker");
        }
        if !seated(round.defender()) || !round.attackers().iter().all(|&p| seated(p)) {
            return inconsistent("role seat out of range");
        }
        if round.is_attacker(round.defender()) {
            return inconsistent("defender is also attacking");
        }
        if !round.acknowledged().iter().all(|&p| round.is_attacker(p)) {
            return inconsistent("acknowledgment from a non-attacker");
        }
        if !round.slots().iter().all(|slot| seated(slot.attacker)) {
            return inconsistent("slot attacker out of range");
        }
        if self.dealer.is_some_and(|dealer| !seated(dealer)) {
            return inconsistent("dealer out of range");
        }
        if !self.cards_conserved() {
            return inconsistent("cards not conserved");
        }
        Ok(())
    }
}
