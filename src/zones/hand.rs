//! Per-player holdings: the hand and the pile of beaten cards.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::{Card, Deck, Suit};
use crate::core::error::MoveError;
use crate::core::player::PlayerId;

/// Cards held by one player plus the cards they have beaten off.
///
/// The hand keeps the order cards arrived in. `beaten` only ever grows.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    cards: Vector<Card>,
    beaten: Vector<Card>,
}

impl Hand {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cards(cards: impl IntoIterator<Item = Card>) -> Self {
        Self {
            cards: cards.into_iter().collect(),
            beaten: Vector::new(),
        }
    }

    /// Draw from the deck until the hand holds `target` cards or the deck
    /// runs out. Returns how many cards were drawn.
    pub fn refill_to(&mut self, target: usize, deck: &mut Deck) -> usize {
        let mut drawn = 0;
        while self.cards.len() < target {
            match deck.draw() {
                Some(card) => {
                    self.cards.push_back(card);
                    drawn += 1;
                }
                None => break,
            }
        }
        drawn
    }

    /// Take `card` out of the hand.
    pub fn remove(&mut self, owner: PlayerId, card: Card) -> Result<(), MoveError> {
        let pos = self
            .cards
            .index_of(&card)
            .ok_or(MoveError::CardNotHeld { player: owner, card })?;
        self.cards.remove(pos);
        Ok(())
    }

    /// Append cards to the hand.
    pub fn add(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.cards.extend(cards);
    }

    /// Append cards to the beaten pile.
    pub fn bury(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.beaten.extend(cards);
    }

    #[must_use]
    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> impl Iterator<Item = Card> + '_ {
        self.cards.iter().copied()
    }

    pub fn beaten(&self) -> impl Iterator<Item = Card> + '_ {
        self.beaten.iter().copied()
    }

    #[must_use]
    pub fn beaten_len(&self) -> usize {
        self.beaten.len()
    }

    /// The lowest trump held, if any.
    #[must_use]
    pub fn lowest_trump(&self, trump: Suit) -> Option<Card> {
        self.cards().filter(|c| c.is_trump(trump)).min_by_key(|c| c.rank)
    }
}
