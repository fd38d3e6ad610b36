//! Per-player snapshots.
//!
//! A [`PlayerView`] shows one player what they are allowed to know: their
//! own hand, everybody's hand sizes, and the table.

use serde::{Deserialize, Serialize};

use super::controller::Durak;
use crate::cards::Card;
use crate::core::{GameState, PlayerId};
use crate::rules::{GameResult, RulesEngine};
use crate::zones::{Phase, Slot};

/// What a seat is doing this turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Attacker,
    Defender,
    Idle,
    /// No cards left and nothing to draw.
    Out,
}

/// Public information about one seat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatView {
    pub player: PlayerId,
    pub hand_size: usize,
    pub beaten: usize,
    pub role: Role,
}

/// Read-only snapshot of a game as seen by `viewer`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub viewer: PlayerId,
    pub hand: Vec<Card>,
    pub seats: Vec<SeatView>,
    pub slots: Vec<Slot>,
    pub trump: Card,
    pub deck_size: usize,
    pub phase: Phase,
    pub defender: PlayerId,
    pub attackers: Vec<PlayerId>,
    pub acknowledged: Vec<PlayerId>,
    /// Players the game is waiting on.
    pub to_act: Vec<PlayerId>,
    pub turn_number: u32,
    pub deflections: u8,
    pub dealer: Option<PlayerId>,
    pub result: Option<GameResult>,
}

impl GameState {
    /// The game as `viewer` sees it.
    #[must_use]
    pub fn view(&self, viewer: PlayerId) -> PlayerView {
        let round = self.round();
        let seats = self
            .hands()
            .iter()
            .map(|(player, hand)| SeatView {
                player,
                hand_size: hand.len(),
                beaten: hand.beaten_len(),
                role: self.role(player),
            })
            .collect();
        let hand = if self.hands().contains(viewer) {
            self.hand(viewer).cards().collect()
        } else {
            Vec::new()
        };

        PlayerView {
            viewer,
            hand,
            seats,
            slots: round.slots().to_vec(),
            trump: self.trump(),
            deck_size: self.deck().len(),
            phase: round.phase(),
            defender: round.defender(),
            attackers: round.attackers().to_vec(),
            acknowledged: round.acknowledged().to_vec(),
            to_act: self.to_act(),
            turn_number: self.turn_number(),
            deflections: round.deflections(),
            dealer: self.dealer(),
            result: Durak.is_terminal(self),
        }
    }

    fn role(&self, player: PlayerId) -> Role {
        let round = self.round();
        if round.defender() == player {
            Role::Defender
        } else if round.is_attacker(player) {
            Role::Attacker
        } else if self.is_out(player) {
            Role::Out
        } else {
            Role::Idle
        }
    }

    /// Players who can move right now.
    fn to_act(&self) -> Vec<PlayerId> {
        let round = self.round();
        match round.phase() {
            Phase::Attacking => round.attackers().to_vec(),
            Phase::Defending if round.open_count() > 0 => vec![round.defender()],
            Phase::Defending => round
                .attackers()
                .iter()
                .copied()
                .filter(|a| !round.acknowledged().contains(a))
                .collect(),
            Phase::Settling(_) => Vec::new(),
        }
    }
}
