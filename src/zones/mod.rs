//! Where cards live during play.
//!
//! - `Hand`: a player's cards and their beaten pile
//! - `Round`: the battlefield slots and the roles of the current turn

pub mod battlefield;
pub mod hand;

pub use battlefield::{Phase, Round, Slot, TurnOutcome};
pub use hand::Hand;
