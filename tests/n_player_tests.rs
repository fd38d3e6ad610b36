//! N-player verification.
//!
//! These tests check that dealing, roles and turn order have no hidden
//! 2-player assumptions for every table size the deck can deal.

mod common;

use durak_engine::cards::DECK_SIZE;
use durak_engine::{card, Arrangement, Durak, DurakBuilder, Move, PlayerId, RulesEngine};

#[test]
fn test_deal_for_every_table_size() {
    common::init_logging();
    for player_count in 2..=6 {
        let (_, state) = DurakBuilder::new()
            .player_count(player_count)
            .build(42)
            .unwrap();

        assert_eq!(state.player_count(), player_count);
        for player in PlayerId::all(player_count) {
            assert_eq!(state.hand(player).len(), 6);
        }
        assert_eq!(state.deck().len(), DECK_SIZE - 6 * player_count);
        assert_eq!(state.total_cards(), DECK_SIZE);
    }
}

#[test]
fn test_roles_for_every_table_size() {
    for player_count in 2..=6 {
        let last = PlayerId::new(player_count as u8 - 1);
        let (_, state) = DurakBuilder::new()
            .player_count(player_count)
            .starting_attacker(last)
            .build(1)
            .unwrap();
        let round = state.round();

        assert_eq!(round.primary_attacker(), last);
        assert_eq!(round.defender(), PlayerId::new(0));
        if player_count == 2 {
            assert_eq!(round.attackers(), &[last]);
        } else {
            assert_eq!(round.attackers(), &[last, PlayerId::new(1)]);
        }
    }
}

#[test]
fn test_games_finish_for_every_table_size() {
    common::init_logging();
    for player_count in 2..=6 {
        for seed in 0..4 {
            let (_, mut state) = DurakBuilder::new()
                .player_count(player_count)
                .build(seed)
                .unwrap();
            let result = common::play_scripted(&mut state, 5_000);
            assert!(result.is_some(), "{player_count} players, seed {seed}");
            assert_eq!(state.total_cards(), DECK_SIZE);
        }
    }
}

#[test]
fn test_out_players_are_skipped() {
    common::init_logging();
    // Player 1 is already out; the attack on player 0 comes from player 3
    // and player 2 throws in.
    let arrangement = Arrangement::new(
        vec![
            vec![card!("9♠"), card!("K♥")],
            vec![],
            vec![card!("7♣"), card!("A♣")],
            vec![card!("7♠"), card!("Q♥")],
        ],
        card!("6♦"),
    );
    let (_, mut state) = DurakBuilder::new()
        .player_count(4)
        .starting_attacker(PlayerId::new(3))
        .arrange(arrangement)
        .unwrap();
    assert_eq!(state.round().defender(), PlayerId::new(0));
    assert_eq!(state.round().attackers(), &[PlayerId::new(3), PlayerId::new(2)]);

    for mv in [
        Move::Attack { player: PlayerId::new(3), card: card!("7♠") },
        Move::Attack { player: PlayerId::new(2), card: card!("7♣") },
        Move::Surrender { player: PlayerId::new(0) },
    ] {
        Durak.apply_move(&mut state, &mv).unwrap();
    }

    // The defender picked up, so the attack skips past both player 0 and the
    // empty seat.
    assert_eq!(state.round().primary_attacker(), PlayerId::new(2));
    assert_eq!(state.round().defender(), PlayerId::new(3));
    assert_eq!(state.round().attackers(), &[PlayerId::new(2), PlayerId::new(0)]);
}

#[test]
fn test_single_attacker_variant() {
    let (_, state) = DurakBuilder::new()
        .player_count(5)
        .max_attackers(1)
        .starting_attacker(PlayerId::new(0))
        .build(3)
        .unwrap();
    assert_eq!(state.round().attackers(), &[PlayerId::new(0)]);
}
