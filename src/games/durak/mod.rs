//! Durak, the "fool" card game.
//!
//! - [`DurakBuilder`] deals a game, [`Arrangement`] stacks one
//! - [`Durak`] is the turn controller and implements [`RulesEngine`](crate::rules::RulesEngine)
//! - [`Session`] plays games back to back and keeps track of the dealer
//! - [`PlayerView`] is what one player gets to see

mod controller;
mod session;
mod setup;
mod view;

pub use controller::{apply_move, Durak};
pub use session::{GameRecord, Session};
pub use setup::{Arrangement, DurakBuilder};
pub use view::{PlayerView, Role, SeatView};
