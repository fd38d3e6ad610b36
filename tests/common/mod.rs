//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::sync::Once;

use durak_engine::{Durak, GameResult, GameState, Move, MoveKind, PlayerId, RulesEngine};
use tracing_subscriber::{fmt, EnvFilter};

static INIT: Once = Once::new();

/// Install a test subscriber once per test binary.
///
/// The level comes from `TEST_LOG`, then `RUST_LOG`, then `"warn"`.
pub fn init_logging() {
    INIT.call_once(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}

/// The first player the game is waiting on.
pub fn next_to_act(state: &GameState) -> Option<PlayerId> {
    state.view(PlayerId::new(0)).to_act.first().copied()
}

/// A fixed, greedy policy: defend with the cheapest card that holds, attack
/// and throw in low, acknowledge when out of throw-ins, surrender when
/// beaten. Never deflects.
pub fn scripted_move(state: &GameState, player: PlayerId) -> Option<Move> {
    let trump = state.trump_suit();
    Durak
        .legal_moves(state, player)
        .into_iter()
        .min_by_key(|mv| {
            let priority = match mv.kind() {
                MoveKind::Defend => 0,
                MoveKind::Attack => 1,
                MoveKind::Acknowledge => 2,
                MoveKind::Surrender => 3,
                MoveKind::Deflect => 4,
            };
            (priority, mv.card().map(|c| (c.is_trump(trump), c.rank)))
        })
}

/// Drive a game with `scripted_move` until it ends or `max_moves` is hit.
pub fn play_scripted(state: &mut GameState, max_moves: usize) -> Option<GameResult> {
    for _ in 0..max_moves {
        if let Some(result) = Durak.is_terminal(state) {
            return Some(result);
        }
        let player = next_to_act(state)?;
        let mv = scripted_move(state, player)?;
        Durak
            .apply_move(state, &mv)
            .unwrap_or_else(|err| panic!("legal move {mv} rejected: {err}"));
        assert!(state.cards_conserved());
    }
    Durak.is_terminal(state)
}
