//! Moves submitted by players.
//!
//! A move names the submitting player and whatever card or slot it needs.
//! Moves serialize externally tagged by their snake_case kind, so the
//! transport layer can forward them as-is:
//!
//! ```
//! use durak_engine::{card, core::{Move, PlayerId}};
//!
//! let mv = Move::Defend { player: PlayerId::new(1), slot: 0, card: card!("J♦") };
//! let json = serde_json::to_string(&mv).unwrap();
//! assert_eq!(json, r#"{"defend":{"player":1,"slot":0,"card":{"suit":"♦","rank":"J"}}}"#);
//! ```

use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use crate::cards::Card;

/// A move request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Move {
    /// Open a slot, or throw another card into a running turn.
    Attack { player: PlayerId, card: Card },
    /// Beat the attack in `slot`.
    Defend {
        player: PlayerId,
        slot: usize,
        card: Card,
    },
    /// Pass the attack on with a card of the same rank.
    Deflect { player: PlayerId, card: Card },
    /// Attacker agrees the turn is over.
    Acknowledge { player: PlayerId },
    /// Defender picks up everything on the table.
    Surrender { player: PlayerId },
}

/// The kind of a [`Move`], without its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveKind {
    Attack,
    Defend,
    Deflect,
    Acknowledge,
    Surrender,
}

impl Move {
    /// The submitting player.
    #[must_use]
    pub fn player(&self) -> PlayerId {
        match *self {
            Move::Attack { player, .. }
            | Move::Defend { player, .. }
            | Move::Deflect { player, .. }
            | Move::Acknowledge { player }
            | Move::Surrender { player } => player,
        }
    }

    #[must_use]
    pub fn kind(&self) -> MoveKind {
        match self {
            Move::Attack { .. } => MoveKind::Attack,
            Move::Defend { .. } => MoveKind::Defend,
            Move::Deflect { .. } => MoveKind::Deflect,
            Move::Acknowledge { .. } => MoveKind::Acknowledge,
            Move::Surrender { .. } => MoveKind::Surrender,
        }
    }

    /// The card played, if the move plays one.
    #[must_use]
    pub fn card(&self) -> Option<Card> {
        match *self {
            Move::Attack { card, .. } | Move::Defend { card, .. } | Move::Deflect { card, .. } => {
                Some(card)
            }
            Move::Acknowledge { .. } | Move::Surrender { .. } => None,
        }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Move::Attack { player, card } => write!(f, "{player} attacks with {card}"),
            Move::Defend { player, slot, card } => {
                write!(f, "{player} defends slot {slot} with {card}")
            }
            Move::Deflect { player, card } => write!(f, "{player} deflects with {card}"),
            Move::Acknowledge { player } => write!(f, "{player} acknowledges"),
            Move::Surrender { player } => write!(f, "{player} surrenders"),
        }
    }
}

/// An accepted move with its position in the game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// The move taken.
    pub mv: Move,

    /// Turn number when the move was taken.
    pub turn: u32,

    /// Sequence number within the turn (for ordering).
    pub sequence: u32,
}

impl MoveRecord {
    #[must_use]
    pub fn new(mv: Move, turn: u32, sequence: u32) -> Self {
        Self { mv, turn, sequence }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card;

    #[test]
    fn test_player_and_kind() {
        let p = PlayerId::new(2);
        let moves = [
            (Move::Attack { player: p, card: card!("6♠") }, MoveKind::Attack),
            (Move::Defend { player: p, slot: 1, card: card!("7♠") }, MoveKind::Defend),
            (Move::Deflect { player: p, card: card!("6♥") }, MoveKind::Deflect),
            (Move::Acknowledge { player: p }, MoveKind::Acknowledge),
            (Move::Surrender { player: p }, MoveKind::Surrender),
        ];

        for (mv, kind) in moves {
            assert_eq!(mv.player(), p);
            assert_eq!(mv.kind(), kind);
        }
    }

    #[test]
    fn test_card_payload() {
        let p = PlayerId::new(0);
        assert_eq!(Move::Attack { player: p, card: card!("A♣") }.card(), Some(card!("A♣")));
        assert_eq!(Move::Surrender { player: p }.card(), None);
    }

    #[test]
    fn test_display() {
        let mv = Move::Deflect { player: PlayerId::new(1), card: card!("10♥") };
        assert_eq!(mv.to_string(), "Player 1 deflects with 10♥");
    }

    #[test]
    fn test_move_serialization() {
        let mv = Move::Defend { player: PlayerId::new(1), slot: 2, card: card!("Q♣") };
        let json = serde_json::to_string(&mv).unwrap();
        let deserialized: Move = serde_json::from_str(&json).unwrap();
        assert_eq!(mv, deserialized);

        let json = serde_json::to_string(&Move::Acknowledge { player: PlayerId::new(0) }).unwrap();
        assert_eq!(json, r#"{"acknowledge":{"player":0}}"#);
    }

    #[test]
    fn test_move_record_serialization() {
        let record = MoveRecord::new(Move::Surrender { player: PlayerId::new(1) }, 4, 2);
        let json = serde_json::to_string(&record).unwrap();
        let deserialized: MoveRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, deserialized);
    }
}
