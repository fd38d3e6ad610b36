//! The battlefield: attack/defence slots and the roles of the current turn.
//!
//! A [`Round`] lives for exactly one turn. It moves through
//! `Attacking → Defending → Settling` and is then replaced by a fresh round
//! for the next attacker. Players are referenced by [`PlayerId`] only; the
//! cards they hold live in [`Hand`](super::Hand)s owned by the game state.
//!
//! The `check_*` methods validate a move against the round alone and never
//! mutate. The controller runs them before touching any hand or the deck.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{Card, Rank, Suit};
use crate::core::config::ThrowIn;
use crate::core::error::MoveError;
use crate::core::player::PlayerId;

/// How a turn ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnOutcome {
    /// Every attack was beaten and all attackers acknowledged.
    DefenderSucceeded,
    /// The defender picked up the table.
    DefenderSurrendered,
}

/// Phase of the current turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Nothing on the table yet.
    Attacking,
    /// At least one attack card is on the table.
    Defending,
    /// The turn is over. Outside of a finished game this is only seen
    /// while the controller settles the turn.
    Settling(TurnOutcome),
}

/// One attack card and, once beaten, its defence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Slot {
    /// Who played the attack card.
    pub attacker: PlayerId,
    pub attack: Card,
    pub defence: Option<Card>,
}

impl Slot {
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.defence.is_none()
    }

    fn cards(&self) -> impl Iterator<Item = Card> {
        std::iter::once(self.attack).chain(self.defence)
    }
}

/// State of the turn being played.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    slots: SmallVec<[Slot; 6]>,
    defender: PlayerId,
    /// Primary attacker first.
    attackers: SmallVec<[PlayerId; 2]>,
    acknowledged: SmallVec<[PlayerId; 2]>,
    phase: Phase,
    /// Times the attack has been passed on this turn.
    deflections: u8,
}

impl Round {
    /// A fresh round in the `Attacking` phase.
    ///
    /// `attackers` must be non-empty and must not contain `defender`.
    #[must_use]
    pub fn new(attackers: impl IntoIterator<Item = PlayerId>, defender: PlayerId) -> Self {
        let attackers: SmallVec<[PlayerId; 2]> = attackers.into_iter().collect();
        debug_assert!(!attackers.is_empty());
        debug_assert!(!attackers.contains(&defender));
        Self {
            slots: SmallVec::new(),
            defender,
            attackers,
            acknowledged: SmallVec::new(),
            phase: Phase::Attacking,
            deflections: 0,
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    #[must_use]
    pub fn defender(&self) -> PlayerId {
        self.defender
    }

    /// Attackers in attack order, primary attacker first.
    #[must_use]
    pub fn attackers(&self) -> &[PlayerId] {
        &self.attackers
    }

    #[must_use]
    pub fn primary_attacker(&self) -> PlayerId {
        self.attackers[0]
    }

    #[must_use]
    pub fn acknowledged(&self) -> &[PlayerId] {
        &self.acknowledged
    }

    #[must_use]
    pub fn deflections(&self) -> u8 {
        self.deflections
    }

    #[must_use]
    pub fn is_attacker(&self, player: PlayerId) -> bool {
        self.attackers.contains(&player)
    }

    #[must_use]
    pub fn open_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_open()).count()
    }

    /// Whether any attack has been beaten this round.
    #[must_use]
    pub fn any_closed(&self) -> bool {
        self.slots.iter().any(|s| !s.is_open())
    }

    /// Whether there are slots and all of them are beaten.
    #[must_use]
    pub fn all_closed(&self) -> bool {
        !self.slots.is_empty() && self.open_count() == 0
    }

    /// Number of cards on the table.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.slots.iter().map(|s| s.cards().count()).sum()
    }

    /// Ranks that may be thrown in under `throw_in`.
    #[must_use]
    pub fn table_ranks(&self, throw_in: ThrowIn) -> SmallVec<[Rank; 12]> {
        let mut ranks: SmallVec<[Rank; 12]> = SmallVec::new();
        for slot in &self.slots {
            let defence = match throw_in {
                ThrowIn::AttackRanks => None,
                ThrowIn::TableRanks => slot.defence,
            };
            for card in std::iter::once(slot.attack).chain(defence) {
                if !ranks.contains(&card.rank) {
                    ranks.push(card.rank);
                }
            }
        }
        ranks
    }

    fn ensure_in_play(&self) -> Result<(), MoveError> {
        match self.phase {
            Phase::Attacking | Phase::Defending => Ok(()),
            Phase::Settling(_) => Err(MoveError::WrongPhase),
        }
    }

    fn ensure_defending(&self) -> Result<(), MoveError> {
        match self.phase {
            Phase::Defending => Ok(()),
            Phase::Attacking | Phase::Settling(_) => Err(MoveError::WrongPhase),
        }
    }

    fn ensure_defender(&self, player: PlayerId) -> Result<(), MoveError> {
        if player == self.defender {
            Ok(())
        } else {
            Err(MoveError::NotTheDefender { player })
        }
    }

    // === Attack ===

    /// Validate an attack or throw-in.
    ///
    /// `defender_hand` is the number of cards the defender holds; no more
    /// attacks may be left open than the defender could possibly beat.
    pub fn check_attack(
        &self,
        player: PlayerId,
        card: Card,
        slot_limit: usize,
        throw_in: ThrowIn,
        defender_hand: usize,
    ) -> Result<(), MoveError> {
        self.ensure_in_play()?;
        if !self.is_attacker(player) {
            return Err(MoveError::NotAnAttacker { player });
        }
        if self.slots.len() >= slot_limit || self.open_count() >= defender_hand {
            return Err(MoveError::SlotsFull);
        }
        if !self.slots.is_empty() && !self.table_ranks(throw_in).contains(&card.rank) {
            return Err(MoveError::IllegalValue { card });
        }
        Ok(())
    }

    /// Put an attack card on the table. Acknowledgments are withdrawn since
    /// there is something new to beat.
    pub fn open_slot(&mut self, attacker: PlayerId, card: Card) {
        self.slots.push(Slot {
            attacker,
            attack: card,
            defence: None,
        });
        self.acknowledged.clear();
        self.phase = Phase::Defending;
    }

    // === Defend ===

    pub fn check_defend(
        &self,
        player: PlayerId,
        index: usize,
        card: Card,
        trump: Suit,
    ) -> Result<(), MoveError> {
        self.ensure_defending()?;
        self.ensure_defender(player)?;
        let slot = self
            .slots
            .get(index)
            .filter(|s| s.is_open())
            .ok_or(MoveError::SlotNotOpen { index })?;
        if !card.beats(slot.attack, trump) {
            return Err(MoveError::DoesNotBeat {
                attack: slot.attack,
                defence: card,
            });
        }
        Ok(())
    }

    pub fn close_slot(&mut self, index: usize, card: Card) {
        self.slots[index].defence = Some(card);
    }

    // === Deflect ===

    /// Validate a deflection against the table. Whether the next player can
    /// take the attack over is checked by the controller.
    pub fn check_deflect(
        &self,
        player: PlayerId,
        card: Card,
        slot_limit: usize,
    ) -> Result<(), MoveError> {
        self.ensure_defending()?;
        self.ensure_defender(player)?;
        if self.any_closed() {
            return Err(MoveError::WrongPhase);
        }
        if !self.slots.iter().any(|s| s.is_open() && s.attack.rank == card.rank) {
            return Err(MoveError::IllegalValue { card });
        }
        if self.slots.len() >= slot_limit {
            return Err(MoveError::SlotsFull);
        }
        Ok(())
    }

    /// Hand the attack on: the deflector's card becomes a new attack and the
    /// roles are replaced.
    pub fn deflect(
        &mut self,
        card: Card,
        attackers: impl IntoIterator<Item = PlayerId>,
        defender: PlayerId,
    ) {
        let deflector = self.defender;
        self.attackers = attackers.into_iter().collect();
        debug_assert_eq!(self.attackers.first(), Some(&deflector));
        self.defender = defender;
        self.slots.push(Slot {
            attacker: deflector,
            attack: card,
            defence: None,
        });
        self.acknowledged.clear();
        self.deflections += 1;
    }

    // === Surrender ===

    pub fn check_surrender(&self, player: PlayerId) -> Result<(), MoveError> {
        self.ensure_defending()?;
        self.ensure_defender(player)
    }

    // === Acknowledge ===

    pub fn check_acknowledge(&self, player: PlayerId) -> Result<(), MoveError> {
        self.ensure_defending()?;
        if !self.is_attacker(player) {
            return Err(MoveError::NotAnAttacker { player });
        }
        if !self.all_closed() {
            return Err(MoveError::WrongPhase);
        }
        Ok(())
    }

    /// Record an acknowledgment. Returns true once every attacker has
    /// acknowledged.
    pub fn acknowledge(&mut self, player: PlayerId) -> bool {
        if !self.acknowledged.contains(&player) {
            self.acknowledged.push(player);
        }
        self.attackers.iter().all(|a| self.acknowledged.contains(a))
    }

    // === Settling ===

    /// End the turn and hand back every card on the table.
    pub fn settle(&mut self, outcome: TurnOutcome) -> Vec<Card> {
        self.phase = Phase::Settling(outcome);
        self.slots.drain(..).flat_map(|s| s.cards()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card;

    const P0: PlayerId = PlayerId::new(0);
    const P1: PlayerId = PlayerId::new(1);
    const P2: PlayerId = PlayerId::new(2);
    const TRUMP: Suit = Suit::Diamonds;

    fn round() -> Round {
        Round::new([P0], P1)
    }

    #[test]
    fn test_new_round_is_attacking() {
        let round = round();
        assert_eq!(round.phase(), Phase::Attacking);
        assert!(round.slots().is_empty());
        assert_eq!(round.primary_attacker(), P0);
        assert_eq!(round.defender(), P1);
    }

    #[test]
    fn test_first_attack_any_rank() {
        let round = round();
        assert!(round
            .check_attack(P0, card!("K♣"), 6, ThrowIn::AttackRanks, 6)
            .is_ok());
    }

    #[test]
    fn test_attack_moves_to_defending() {
        let mut round = round();
        round.open_slot(P0, card!("6♠"));
        assert_eq!(round.phase(), Phase::Defending);
        assert_eq!(round.open_count(), 1);
    }

    #[test]
    fn test_throw_in_needs_rank_on_table() {
        let mut round = round();
        round.open_slot(P0, card!("6♠"));

        assert!(round.check_attack(P0, card!("6♥"), 6, ThrowIn::AttackRanks, 6).is_ok());
        assert_eq!(
            round.check_attack(P0, card!("7♥"), 6, ThrowIn::AttackRanks, 6),
            Err(MoveError::IllegalValue { card: card!("7♥") })
        );
    }

    #[test]
    fn test_throw_in_defence_ranks_only_with_table_rule() {
        let mut round = round();
        round.open_slot(P0, card!("6♠"));
        round.close_slot(0, card!("9♠"));

        assert!(round.check_attack(P0, card!("9♥"), 6, ThrowIn::AttackRanks, 6).is_err());
        assert!(round.check_attack(P0, card!("9♥"), 6, ThrowIn::TableRanks, 6).is_ok());
    }

    #[test]
    fn test_attack_by_non_attacker() {
        let round = round();
        assert_eq!(
            round.check_attack(P1, card!("6♠"), 6, ThrowIn::AttackRanks, 6),
            Err(MoveError::NotAnAttacker { player: P1 })
        );
    }

    #[test]
    fn test_slot_limit() {
        let mut round = round();
        for card in [card!("6♠"), card!("6♥"), card!("6♦")] {
            round.open_slot(P0, card);
        }
        assert_eq!(
            round.check_attack(P0, card!("6♣"), 3, ThrowIn::AttackRanks, 6),
            Err(MoveError::SlotsFull)
        );
    }

    #[test]
    fn test_open_attacks_limited_by_defender_hand() {
        let mut round = round();
        round.open_slot(P0, card!("6♠"));
        round.open_slot(P0, card!("6♥"));
        assert_eq!(
            round.check_attack(P0, card!("6♣"), 6, ThrowIn::AttackRanks, 2),
            Err(MoveError::SlotsFull)
        );
        round.close_slot(0, card!("7♠"));
        assert!(round.check_attack(P0, card!("6♣"), 6, ThrowIn::AttackRanks, 2).is_ok());
    }

    #[test]
    fn test_defend_rules() {
        let mut round = round();
        assert_eq!(
            round.check_defend(P1, 0, card!("7♠"), TRUMP),
            Err(MoveError::WrongPhase)
        );

        round.open_slot(P0, card!("6♠"));
        assert_eq!(
            round.check_defend(P0, 0, card!("7♠"), TRUMP),
            Err(MoveError::NotTheDefender { player: P0 })
        );
        assert_eq!(
            round.check_defend(P1, 1, card!("7♠"), TRUMP),
            Err(MoveError::SlotNotOpen { index: 1 })
        );
        assert_eq!(
            round.check_defend(P1, 0, card!("9♥"), TRUMP),
            Err(MoveError::DoesNotBeat { attack: card!("6♠"), defence: card!("9♥") })
        );
        assert!(round.check_defend(P1, 0, card!("6♦"), TRUMP).is_ok());

        round.close_slot(0, card!("6♦"));
        assert_eq!(
            round.check_defend(P1, 0, card!("A♦"), TRUMP),
            Err(MoveError::SlotNotOpen { index: 0 })
        );
    }

    #[test]
    fn test_deflect_only_before_any_defence() {
        let mut round = round();
        round.open_slot(P0, card!("6♠"));
        round.open_slot(P0, card!("6♥"));

        assert!(round.check_deflect(P1, card!("6♣"), 6).is_ok());
        assert_eq!(
            round.check_deflect(P1, card!("7♣"), 6),
            Err(MoveError::IllegalValue { card: card!("7♣") })
        );

        round.close_slot(0, card!("7♠"));
        assert_eq!(round.check_deflect(P1, card!("6♣"), 6), Err(MoveError::WrongPhase));
    }

    #[test]
    fn test_deflect_swaps_roles() {
        let mut round = Round::new([P0, P2], P1);
        round.open_slot(P0, card!("8♠"));
        round.deflect(card!("8♥"), [P1, P0], P2);

        assert_eq!(round.defender(), P2);
        assert_eq!(round.attackers(), &[P1, P0]);
        assert_eq!(round.slots()[1].attacker, P1);
        assert_eq!(round.open_count(), 2);
        assert_eq!(round.deflections(), 1);
    }

    #[test]
    fn test_acknowledge_requires_all_closed() {
        let mut round = Round::new([P0, P2], P1);
        round.open_slot(P0, card!("8♠"));
        assert_eq!(round.check_acknowledge(P0), Err(MoveError::WrongPhase));

        round.close_slot(0, card!("9♠"));
        assert_eq!(
            round.check_acknowledge(P1),
            Err(MoveError::NotAnAttacker { player: P1 })
        );
        assert!(round.check_acknowledge(P0).is_ok());

        assert!(!round.acknowledge(P0));
        assert!(!round.acknowledge(P0));
        assert!(round.acknowledge(P2));
    }

    #[test]
    fn test_new_attack_withdraws_acknowledgments() {
        let mut round = Round::new([P0, P2], P1);
        round.open_slot(P0, card!("8♠"));
        round.close_slot(0, card!("9♠"));
        round.acknowledge(P0);

        round.open_slot(P2, card!("8♣"));
        assert!(round.acknowledged().is_empty());
    }

    #[test]
    fn test_settle_returns_all_cards() {
        let mut round = round();
        round.open_slot(P0, card!("8♠"));
        round.close_slot(0, card!("9♠"));
        round.open_slot(P0, card!("8♣"));
        assert_eq!(round.card_count(), 3);

        let cards = round.settle(TurnOutcome::DefenderSurrendered);
        assert_eq!(cards, vec![card!("8♠"), card!("9♠"), card!("8♣")]);
        assert_eq!(round.phase(), Phase::Settling(TurnOutcome::DefenderSurrendered));
        assert_eq!(round.card_count(), 0);
        assert_eq!(
            round.check_attack(P0, card!("6♠"), 6, ThrowIn::AttackRanks, 6),
            Err(MoveError::WrongPhase)
        );
    }
}
