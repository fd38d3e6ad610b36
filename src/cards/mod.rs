//! Cards and the draw pile.
//!
//! ## Key Types
//!
//! - `Card`, `Suit`, `Rank`: the 36 cards of the deck and the beat relation
//! - `Deck`: seeded shuffle and sequential dealing

pub mod card;
pub mod deck;

pub use card::{Card, CardFromStrErr, Rank, Suit, DECK_SIZE};
pub use deck::Deck;
