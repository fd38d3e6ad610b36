//! Turn controller: the legality gate for every move.
//!
//! A move is run against a clone of the state and committed only if it is
//! accepted, so callers never observe a half-applied move.

use tracing::{debug, info, trace};

use crate::cards::Card;
use crate::core::{GameState, Move, MoveError, MoveRecord, PlayerId};
use crate::rules::{GameResult, MoveEffect, RulesEngine};
use crate::zones::TurnOutcome;

/// Rules of Durak.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Durak;

/// Apply `mv` to a copy of `state` and return the new state.
pub fn apply_move(state: &GameState, mv: &Move) -> Result<GameState, MoveError> {
    let mut next = state.clone();
    Durak.apply_move(&mut next, mv)?;
    Ok(next)
}

impl RulesEngine for Durak {
    fn candidate_moves(&self, state: &GameState, player: PlayerId) -> Vec<Move> {
        if !state.hands.contains(player) {
            return vec![];
        }
        let hand: Vec<Card> = state.hand(player).cards().collect();
        let mut moves = Vec::with_capacity(hand.len() * (2 + state.round.slots().len()) + 2);
        for &card in &hand {
            moves.push(Move::Attack { player, card });
            moves.push(Move::Deflect { player, card });
        }
        for slot in 0..state.round.slots().len() {
            moves.extend(hand.iter().map(|&card| Move::Defend { player, slot, card }));
        }
        moves.push(Move::Acknowledge { player });
        moves.push(Move::Surrender { player });
        moves
    }

    fn apply_move(&self, state: &mut GameState, mv: &Move) -> Result<MoveEffect, MoveError> {
        let turn = state.turn_number;
        match try_apply(state, mv) {
            Ok((next, effect)) => {
                debug!(turn, player = %mv.player(), mv = %mv, ?effect, "move accepted");
                *state = next;
                Ok(effect)
            }
            Err(err) => {
                debug!(turn, player = %mv.player(), mv = %mv, error = %err, "move rejected");
                Err(err)
            }
        }
    }

    fn is_terminal(&self, state: &GameState) -> Option<GameResult> {
        game_result(state)
    }

    fn is_legal(&self, state: &GameState, mv: &Move) -> bool {
        try_apply(state, mv).is_ok()
    }
}

/// Run a move on a clone of `state`, recording it in the history.
fn try_apply(state: &GameState, mv: &Move) -> Result<(GameState, MoveEffect), MoveError> {
    let mut next = state.clone();
    let record = MoveRecord::new(*mv, state.turn_number, state.sequence);
    let effect = step(&mut next, mv)?;

    next.history.push_back(record);
    if effect == MoveEffect::Played {
        next.sequence += 1;
    }
    debug_assert!(next.cards_conserved(), "card count changed by {mv}");
    Ok((next, effect))
}

fn step(state: &mut GameState, mv: &Move) -> Result<MoveEffect, MoveError> {
    let player = mv.player();
    if !state.hands.contains(player) {
        return Err(MoveError::UnknownPlayer { player });
    }
    match *mv {
        Move::Attack { player, card } => attack(state, player, card),
        Move::Defend { player, slot, card } => defend(state, player, slot, card),
        Move::Deflect { player, card } => deflect(state, player, card),
        Move::Acknowledge { player } => acknowledge(state, player),
        Move::Surrender { player } => surrender(state, player),
    }
}

fn attack(state: &mut GameState, player: PlayerId, card: Card) -> Result<MoveEffect, MoveError> {
    let defender_hand = state.hands[state.round.defender()].len();
    state.round.check_attack(
        player,
        card,
        state.config.hand_size,
        state.config.throw_in,
        defender_hand,
    )?;
    state.hands[player].remove(player, card)?;
    state.round.open_slot(player, card);
    Ok(MoveEffect::Played)
}

fn defend(
    state: &mut GameState,
    player: PlayerId,
    slot: usize,
    card: Card,
) -> Result<MoveEffect, MoveError> {
    state.round.check_defend(player, slot, card, state.trump_suit())?;
    state.hands[player].remove(player, card)?;
    state.round.close_slot(slot, card);
    Ok(MoveEffect::Played)
}

fn deflect(state: &mut GameState, player: PlayerId, card: Card) -> Result<MoveEffect, MoveError> {
    state.round.check_deflect(player, card, state.config.hand_size)?;
    if !state.hands[player].contains(card) {
        return Err(MoveError::CardNotHeld { player, card });
    }

    let count = state.player_count();
    let next = state
        .next_in_play(player)
        .unwrap_or_else(|| player.next(count));
    let held = state.hands[next].len();
    let required = state.round.slots().len() + 1;
    if held <= required {
        return Err(MoveError::InsufficientDefenderCards { next, held, required });
    }

    state.hands[player].remove(player, card)?;

    let mut attackers = vec![player];
    if state.config.max_attackers > 1 {
        if let Some(second) = state.next_in_play(next) {
            if second != player && second != next {
                attackers.push(second);
            }
        }
    }
    let outgoing: Vec<PlayerId> = state.round.attackers().to_vec();
    state.round.deflect(card, attackers, next);
    for attacker in outgoing {
        refill(state, attacker);
    }
    Ok(MoveEffect::Played)
}

fn surrender(state: &mut GameState, player: PlayerId) -> Result<MoveEffect, MoveError> {
    state.round.check_surrender(player)?;
    let outcome = TurnOutcome::DefenderSurrendered;
    let cards = state.round.settle(outcome);
    state.hands[player].add(cards);

    let count = state.player_count();
    let next = state
        .next_in_play(player)
        .unwrap_or_else(|| player.next(count));
    Ok(finish_turn(state, outcome, next))
}

fn acknowledge(state: &mut GameState, player: PlayerId) -> Result<MoveEffect, MoveError> {
    state.round.check_acknowledge(player)?;
    if !state.round.acknowledge(player) {
        return Ok(MoveEffect::Played);
    }

    let outcome = TurnOutcome::DefenderSucceeded;
    let defender = state.round.defender();
    let cards = state.round.settle(outcome);
    state.hands[defender].bury(cards);

    // Decided after refills, when it is known whether the defender is out.
    Ok(finish_turn(state, outcome, defender))
}

/// Refill, check for the end of the game, and seat the next round.
///
/// `next` is the preferred next attacker; if that player turns out to be
/// out of the game the attack passes on to the next player still in.
fn finish_turn(state: &mut GameState, outcome: TurnOutcome, next: PlayerId) -> MoveEffect {
    let order: Vec<PlayerId> = state
        .round
        .attackers()
        .iter()
        .copied()
        .chain(std::iter::once(state.round.defender()))
        .collect();
    for player in order {
        refill(state, player);
    }

    if let Some(result) = game_result(state) {
        info!(turn = state.turn_number, ?outcome, ?result, "game over");
        return MoveEffect::GameOver { outcome, result };
    }

    let count = state.player_count();
    let next_attacker = if state.is_out(next) {
        state.next_in_play(next).unwrap_or_else(|| next.next(count))
    } else {
        next
    };
    state.round = state.round_for(next_attacker);
    state.turn_number += 1;
    state.sequence = 0;
    info!(
        turn = state.turn_number,
        ?outcome,
        next_attacker = %next_attacker,
        deck = state.deck.len(),
        "turn settled"
    );
    MoveEffect::TurnSettled {
        outcome,
        next_attacker,
    }
}

fn refill(state: &mut GameState, player: PlayerId) {
    let target = state.config.hand_size;
    let drawn = state.hands[player].refill_to(target, &mut state.deck);
    if drawn > 0 {
        trace!(player = %player, drawn, deck = state.deck.len(), "refilled hand");
    }
}

/// The result once the game is over. Only decided between turns, with
/// nothing on the table.
fn game_result(state: &GameState) -> Option<GameResult> {
    if !state.deck.is_empty() || state.round.card_count() > 0 {
        return None;
    }
    let mut holders = state
        .hands
        .iter()
        .filter(|(_, hand)| !hand.is_empty())
        .map(|(player, _)| player);
    match (holders.next(), holders.next()) {
        (None, _) => Some(GameResult::Draw),
        (Some(loser), None) => Some(GameResult::Durak(loser)),
        (Some(_), Some(_)) => None,
    }
}
