//! Cards of the 36-card Durak deck.
//!
//! ## Ordering
//!
//! `Rank` is ordered from `Six` to `Ace`. `Card` orders suit-major,
//! rank-minor, which is also the order of [`Deck::standard`](super::Deck::standard).
//!
//! ## Text form
//!
//! Cards print as rank followed by a suit symbol (`6♠`, `10♥`, `A♣`). Parsing
//! accepts the same form, `T` for ten, and the letters `S`, `H`, `D`, `C`
//! for the suits:
//!
//! ```
//! use durak_engine::cards::{Card, Rank, Suit};
//!
//! let card: Card = "10♦".parse().unwrap();
//! assert_eq!(card, Card::new(Rank::Ten, Suit::Diamonds));
//! assert_eq!("TD".parse::<Card>().unwrap(), card);
//! assert_eq!(card.to_string(), "10♦");
//! ```

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Number of cards in a full deck.
pub const DECK_SIZE: usize = 36;

/// The suit of a [card](Card).
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Suit {
    #[serde(rename = "♠")]
    Spades,
    #[serde(rename = "♥")]
    Hearts,
    #[serde(rename = "♦")]
    Diamonds,
    #[serde(rename = "♣")]
    Clubs,
}

impl Suit {
    /// All suits in deck order.
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];

    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Suit::Spades => '♠',
            Suit::Hearts => '♥',
            Suit::Diamonds => '♦',
            Suit::Clubs => '♣',
        }
    }
}

impl std::fmt::Display for Suit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// The rank of a [card](Card). Six is the lowest, ace the highest.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Rank {
    #[serde(rename = "6")]
    Six,
    #[serde(rename = "7")]
    Seven,
    #[serde(rename = "8")]
    Eight,
    #[serde(rename = "9")]
    Nine,
    #[serde(rename = "10")]
    Ten,
    #[serde(rename = "J")]
    Jack,
    #[serde(rename = "Q")]
    Queen,
    #[serde(rename = "K")]
    King,
    #[serde(rename = "A")]
    Ace,
}

impl Rank {
    /// All ranks, lowest first.
    pub const ALL: [Rank; 9] = [
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
        }
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A playing card. Immutable once created.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    #[must_use]
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { suit, rank }
    }

    /// Whether this card, played as a defence, beats `attack`.
    ///
    /// A card beats an attack of its own suit with a strictly higher rank,
    /// and any non-trump attack when it is a trump itself.
    #[must_use]
    pub fn beats(self, attack: Card, trump: Suit) -> bool {
        if self.suit == attack.suit {
            self.rank > attack.rank
        } else {
            self.suit == trump
        }
    }

    #[must_use]
    pub fn is_trump(self, trump: Suit) -> bool {
        self.suit == trump
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

/// The error type for the [`FromStr`] instance of [`Card`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CardFromStrErr {
    #[error("card code is too short")]
    TooShort,
    #[error("card code is too long")]
    TooLong,
    #[error("invalid rank")]
    InvalidRank,
    #[error("invalid suit")]
    InvalidSuit,
}

impl FromStr for Card {
    type Err = CardFromStrErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        let suit_char = chars.next_back().ok_or(CardFromStrErr::TooShort)?;
        let rank_str = chars.as_str();
        if rank_str.is_empty() {
            return Err(CardFromStrErr::TooShort);
        }
        if rank_str.chars().count() > 2 {
            return Err(CardFromStrErr::TooLong);
        }
        let rank = match rank_str {
            "6" => Rank::Six,
            "7" => Rank::Seven,
            "8" => Rank::Eight,
            "9" => Rank::Nine,
            "10" | "T" => Rank::Ten,
            "J" => Rank::Jack,
            "Q" => Rank::Queen,
            "K" => Rank::King,
            "A" => Rank::Ace,
            _ => return Err(CardFromStrErr::InvalidRank),
        };
        let suit = match suit_char {
            '♠' | 'S' => Suit::Spades,
            '♥' | 'H' => Suit::Hearts,
            '♦' | 'D' => Suit::Diamonds,
            '♣' | 'C' => Suit::Clubs,
            _ => return Err(CardFromStrErr::InvalidSuit),
        };
        Ok(Card { suit, rank })
    }
}

/// Shorthand for creating cards from their text form.
///
/// ```
/// # use durak_engine::{card, cards::{Card, Rank, Suit}};
/// assert_eq!(card!("J♦"), Card::new(Rank::Jack, Suit::Diamonds));
/// ```
#[macro_export]
macro_rules! card {
    ($code:literal) => {
        <$crate::cards::Card as std::str::FromStr>::from_str($code)
            .expect("Invalid card code given to card! macro")
    };
}
