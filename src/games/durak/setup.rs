//! Dealing a new game.
//!
//! [`DurakBuilder`] deals a shuffled deck from a seed. [`Arrangement`]
//! stacks the deal instead, for fixtures and puzzles.

use rustc_hash::FxHashSet;
use tracing::debug;

use super::controller::Durak;
use crate::cards::{Card, Deck};
use crate::core::{
    GameConfig, GameRng, GameState, InsufficientCards, PlayerId, PlayerMap, SetupError, ThrowIn,
};
use crate::zones::Hand;

/// A stacked deal: exact hands, draw pile and trump.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Arrangement {
    hands: Vec<Vec<Card>>,
    deck: Vec<Card>,
    trump: Card,
}

impl Arrangement {
    /// Hands in seat order and the trump card, with an empty draw pile.
    #[must_use]
    pub fn new(hands: Vec<Vec<Card>>, trump: Card) -> Self {
        Self {
            hands,
            deck: Vec::new(),
            trump,
        }
    }

    /// Use `deck` as the draw pile, first card drawn first.
    #[must_use]
    pub fn with_deck(mut self, deck: impl IntoIterator<Item = Card>) -> Self {
        self.deck = deck.into_iter().collect();
        self
    }

    /// Fill the draw pile with every card not already in a hand, in standard
    /// order, with the trump card at the bottom.
    #[must_use]
    pub fn with_remaining_deck(mut self) -> Self {
        let held: FxHashSet<Card> = self.hands.iter().flatten().copied().collect();
        let mut deck: Vec<Card> = Deck::standard()
            .iter()
            .copied()
            .filter(|c| !held.contains(c) && *c != self.trump)
            .collect();
        if !held.contains(&self.trump) {
            deck.push(self.trump);
        }
        self.deck = deck;
        self
    }
}

/// Builder for a new game.
///
/// ```
/// use durak_engine::games::durak::DurakBuilder;
///
/// let (_rules, state) = DurakBuilder::new().player_count(3).build(42).unwrap();
/// assert_eq!(state.player_count(), 3);
/// assert_eq!(state.deck().len(), 36 - 3 * 6);
/// ```
#[derive(Clone, Debug, Default)]
pub struct DurakBuilder {
    config: GameConfig,
    starting_attacker: Option<PlayerId>,
    lowest_trump_leads: bool,
    dealer: Option<PlayerId>,
}

impl DurakBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn player_count(mut self, count: usize) -> Self {
        self.config.player_count = count;
        self
    }

    #[must_use]
    pub fn hand_size(mut self, size: usize) -> Self {
        self.config.hand_size = size;
        self
    }

    #[must_use]
    pub fn max_attackers(mut self, count: usize) -> Self {
        self.config.max_attackers = count;
        self
    }

    #[must_use]
    pub fn throw_in(mut self, throw_in: ThrowIn) -> Self {
        self.config.throw_in = throw_in;
        self
    }

    /// Seat the first attacker explicitly instead of drawing one.
    #[must_use]
    pub fn starting_attacker(mut self, player: PlayerId) -> Self {
        self.starting_attacker = Some(player);
        self
    }

    /// The holder of the lowest trump attacks first. Without any trump in
    /// the hands the seeded choice applies.
    #[must_use]
    pub fn lowest_trump_leads(mut self) -> Self {
        self.lowest_trump_leads = true;
        self
    }

    /// Loser of the previous game, recorded in the state.
    pub(crate) fn dealer(mut self, dealer: Option<PlayerId>) -> Self {
        self.dealer = dealer;
        self
    }

    /// Shuffle and deal: half a hand each, turn up the trump and put it
    /// under the deck, then the rest of each hand.
    pub fn build(self, seed: u64) -> Result<(Durak, GameState), SetupError> {
        self.config.validate()?;
        let count = self.config.player_count;
        let hand_size = self.config.hand_size;

        let mut rng = GameRng::new(seed);
        let mut deck = Deck::standard();
        deck.shuffle(&mut rng);

        let first = hand_size / 2;
        let mut hands = Vec::with_capacity(count);
        for _ in 0..count {
            hands.push(Hand::from_cards(deck.deal(first)?));
        }
        let trump = deck.draw().ok_or(InsufficientCards {
            requested: 1,
            remaining: 0,
        })?;
        deck.put_bottom(trump);
        for hand in &mut hands {
            hand.add(deck.deal(hand_size - first)?);
        }
        let hands = PlayerMap::from_vec(hands);

        let attacker = match self.starting_attacker {
            Some(player) => self.check_seat(player)?,
            None => self
                .lowest_trump_holder(&hands, trump)
                .unwrap_or_else(|| {
                    let mut pick = rng.for_context("first-attacker");
                    PlayerId::new(pick.gen_range_usize(0..count) as u8)
                }),
        };

        debug!(seed, players = count, %trump, %attacker, "game dealt");
        let state = GameState::new(self.config, deck, trump, hands, attacker, self.dealer);
        Ok((Durak, state))
    }

    /// Set up a stacked deal. The first attacker is seat 0 unless given.
    pub fn arrange(self, arrangement: Arrangement) -> Result<(Durak, GameState), SetupError> {
        self.config.validate()?;
        let Arrangement { hands, deck, trump } = arrangement;
        if hands.len() != self.config.player_count {
            return Err(SetupError::HandCountMismatch {
                got: hands.len(),
                expected: self.config.player_count,
            });
        }

        let mut seen = FxHashSet::default();
        for &card in hands.iter().flatten().chain(&deck) {
            if !seen.insert(card) {
                return Err(SetupError::DuplicateCard(card));
            }
        }

        let hands = PlayerMap::from_vec(hands.into_iter().map(Hand::from_cards).collect());
        let attacker = match self.starting_attacker {
            Some(player) => self.check_seat(player)?,
            None => self
                .lowest_trump_holder(&hands, trump)
                .unwrap_or(PlayerId::new(0)),
        };

        debug!(players = hands.player_count(), %trump, %attacker, "game arranged");
        let state = GameState::new(
            self.config,
            Deck::from_cards(deck),
            trump,
            hands,
            attacker,
            self.dealer,
        );
        Ok((Durak, state))
    }

    fn check_seat(&self, player: PlayerId) -> Result<PlayerId, SetupError> {
        if player.index() < self.config.player_count {
            Ok(player)
        } else {
            Err(SetupError::UnknownStartingPlayer(player))
        }
    }

    fn lowest_trump_holder(&self, hands: &PlayerMap<Hand>, trump: Card) -> Option<PlayerId> {
        if !self.lowest_trump_leads {
            return None;
        }
        hands
            .iter()
            .filter_map(|(player, hand)| hand.lowest_trump(trump.suit).map(|c| (c.rank, player)))
            .min()
            .map(|(_, player)| player)
    }
}
