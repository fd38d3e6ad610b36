//! Rules engine trait for game implementations.
//!
//! `RulesEngine` is the seam between whoever drives a game (a session, a
//! transport layer, a test) and the rules themselves:
//! - Legal moves for each game state
//! - How moves modify state
//! - Win/loss conditions

pub mod engine;

pub use engine::{GameResult, MoveEffect, RulesEngine};
