//! The draw pile.
//!
//! Cards are drawn from the front. The trump card, once turned up during
//! setup, is put at the bottom so it is the last card anyone draws.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::card::{Card, Rank, Suit, DECK_SIZE};
use crate::core::error::InsufficientCards;
use crate::core::rng::GameRng;

/// Ordered sequence of remaining cards.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vector<Card>,
}

impl Deck {
    /// The full 36-card deck, suit-major and rank-minor.
    #[must_use]
    pub fn standard() -> Self {
        let mut cards = Vector::new();
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                cards.push_back(Card::new(rank, suit));
            }
        }
        debug_assert_eq!(cards.len(), DECK_SIZE);
        Self { cards }
    }

    /// A deck holding exactly `cards`, first card drawn first.
    pub fn from_cards(cards: impl IntoIterator<Item = Card>) -> Self {
        Self {
            cards: cards.into_iter().collect(),
        }
    }

    /// The standard deck shuffled with a fresh RNG seeded by `seed`.
    #[must_use]
    pub fn shuffled(seed: u64) -> Self {
        let mut deck = Self::standard();
        deck.shuffle(&mut GameRng::new(seed));
        deck
    }

    /// Permute the remaining cards.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        let mut cards: Vec<Card> = self.cards.iter().copied().collect();
        rng.shuffle(&mut cards);
        self.cards = cards.into_iter().collect();
    }

    /// Remove and return the first `n` cards.
    ///
    /// Fails without touching the deck if fewer than `n` remain.
    pub fn deal(&mut self, n: usize) -> Result<Vec<Card>, InsufficientCards> {
        if n > self.cards.len() {
            return Err(InsufficientCards {
                requested: n,
                remaining: self.cards.len(),
            });
        }
        let rest = self.cards.split_off(n);
        let dealt = std::mem::replace(&mut self.cards, rest);
        Ok(dealt.into_iter().collect())
    }

    /// Draw the front card, if any.
    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop_front()
    }

    /// Put a card at the bottom (drawn last).
    pub fn put_bottom(&mut self, card: Card) {
        self.cards.push_back(card);
    }

    #[must_use]
    pub fn peek_bottom(&self) -> Option<Card> {
        self.cards.back().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }
}
