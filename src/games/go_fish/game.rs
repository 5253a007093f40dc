//! Go Fish rules implementation.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use rustc_hash::FxHashMap;

use crate::core::{Card, Deck, GameError, GameRng, GameState, Hand, Player, PlayerId, Rank, StateValue};
use crate::rules::RulesEngine;

pub const BOOKS: &str = "books";
pub const ANOTHER_TURN: &str = "anotherTurn";
pub const LAST_ACTION: &str = "lastAction";

/// Total books in a standard deck.
const ALL_BOOKS: usize = 13;

/// Cards of one rank that make a book.
const BOOK_SIZE: usize = 4;

/// Ask `target` for every card of `rank`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GoFishMove {
    pub target: PlayerId,
    pub rank: Rank,
}

impl GoFishMove {
    #[must_use]
    pub fn new(target: impl Into<PlayerId>, rank: Rank) -> Self {
        Self {
            target: target.into(),
            rank,
        }
    }
}

impl fmt::Display for GoFishMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ask {} for {}", self.target, self.rank)
    }
}

/// Parses `"<target> <rank>"`, e.g. `"p2 7"`.
impl FromStr for GoFishMove {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        match (parts.next(), parts.next(), parts.next()) {
            (Some(target), Some(rank), None) => Ok(Self::new(target, rank.parse()?)),
            _ => Err(GameError::Config(format!("expected '<target> <rank>', got '{}'", s))),
        }
    }
}

/// Go Fish rules.
#[derive(Clone, Debug)]
pub struct GoFishRules {
    rng: GameRng,
    shuffle: bool,
}

impl GoFishRules {
    /// Rules that shuffle with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed).for_context("deal"),
            shuffle: true,
        }
    }

    /// Deal the deck in the order it is given.
    #[must_use]
    pub fn without_shuffle(mut self) -> Self {
        self.shuffle = false;
        self
    }

    /// Opening hand size for a table of `players`.
    #[must_use]
    pub fn hand_size(players: usize) -> usize {
        if players > 3 {
            5
        } else {
            7
        }
    }

    // === Books ===

    /// Rank labels of a player's books, in the order they were made.
    #[must_use]
    pub fn books_of(state: &GameState, player: &PlayerId) -> Vec<String> {
        state
            .custom_state(BOOKS)
            .and_then(StateValue::as_map)
            .and_then(|books| books.get(player.as_str()))
            .and_then(StateValue::as_list)
            .map(|labels| labels.iter().filter_map(StateValue::as_text).map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// Books made by everyone.
    #[must_use]
    pub fn total_books(state: &GameState) -> usize {
        state
            .custom_state(BOOKS)
            .and_then(StateValue::as_map)
            .map(|books| {
                books
                    .values()
                    .filter_map(StateValue::as_list)
                    .map(<[StateValue]>::len)
                    .sum()
            })
            .unwrap_or(0)
    }

    fn record_book(state: &mut GameState, player: &PlayerId, rank: Rank) {
        let mut books: BTreeMap<String, StateValue> = state
            .custom_state(BOOKS)
            .and_then(StateValue::as_map)
            .cloned()
            .unwrap_or_default();
        let mut labels: Vec<StateValue> = books
            .get(player.as_str())
            .and_then(StateValue::as_list)
            .map(<[StateValue]>::to_vec)
            .unwrap_or_default();
        labels.push(rank.label().into());
        books.insert(player.to_string(), labels.into());
        state.set_custom_state(BOOKS, books);
    }

    fn rank_counts(hand: &Hand) -> FxHashMap<Rank, usize> {
        let mut counts = FxHashMap::default();
        for rank in hand.iter().filter_map(Card::rank) {
            *counts.entry(rank).or_insert(0) += 1;
        }
        counts
    }

    /// Lay down every complete book in a player's hand. Returns the ranks.
    fn lay_down_books(state: &mut GameState, seat: usize) -> Vec<Rank> {
        let mut complete: Vec<Rank> = Self::rank_counts(&state.players[seat].hand)
            .into_iter()
            .filter(|&(_, count)| count >= BOOK_SIZE)
            .map(|(rank, _)| rank)
            .collect();
        complete.sort();

        let id = state.players[seat].id.clone();
        for &rank in &complete {
            let cards = state.players[seat].hand.remove_where(|c| c.rank() == Some(rank));
            for card in cards {
                state.discard_pile.add_to_top(card.revealed());
            }
            Self::record_book(state, &id, rank);
        }
        complete
    }

    /// Players with empty hands draw one card while the deck lasts.
    fn refill_empty_hands(state: &mut GameState) {
        for seat in 0..state.players.len() {
            if state.players[seat].hand.is_empty() {
                if let Some(card) = state.deck.draw() {
                    state.players[seat].hand.add(card.concealed());
                }
            }
        }
    }

    fn update_scores(state: &mut GameState) {
        let scores: Vec<i64> = state
            .players
            .iter()
            .map(|p| Self::books_of(state, &p.id).len() as i64)
            .collect();
        for (player, score) in state.players.iter_mut().zip(scores) {
            player.score = score;
        }
    }

    /// Could any player successfully ask any other for a rank?
    fn any_ask_can_succeed(state: &GameState) -> bool {
        state.players.iter().enumerate().any(|(i, asker)| {
            let ranks = Self::rank_counts(&asker.hand);
            state.players.iter().enumerate().any(|(j, target)| {
                i != j && target.hand.iter().any(|c| c.rank().is_some_and(|r| ranks.contains_key(&r)))
            })
        })
    }

    fn display_name(state: &GameState, id: &PlayerId) -> String {
        state
            .player_by_id(id)
            .map_or_else(|| id.to_string(), |p| p.name.clone())
    }
}

impl RulesEngine for GoFishRules {
    type Move = GoFishMove;

    fn name(&self) -> &str {
        "go-fish"
    }

    fn initialize_game(&mut self, state: &mut GameState) -> Result<(), GameError> {
        let players = state.players.len();
        if players < 2 {
            return Err(GameError::InvalidPlayerCount {
                game: self.name().to_string(),
                expected: "at least 2".to_string(),
                actual: players,
            });
        }

        if state.deck.is_empty() {
            state.deck = Deck::standard();
        }
        let hand_size = Self::hand_size(players);
        let needed = hand_size * players;
        if state.deck.len() < needed {
            return Err(GameError::InsufficientCards {
                game: self.name().to_string(),
                needed,
                available: state.deck.len(),
            });
        }

        if self.shuffle {
            state.deck.shuffle(&mut self.rng);
        }

        for _ in 0..hand_size {
            for seat in 0..players {
                if let Some(card) = state.deck.draw() {
                    state.players[seat].hand.add(card.concealed());
                }
            }
        }

        let books: BTreeMap<String, StateValue> = state
            .players
            .iter()
            .map(|p| (p.id.to_string(), StateValue::List(Vec::new())))
            .collect();
        state.set_custom_state(BOOKS, books);
        state.set_custom_state(ANOTHER_TURN, false);
        state.set_custom_state(LAST_ACTION, "");

        for seat in 0..players {
            let laid = Self::lay_down_books(state, seat);
            if !laid.is_empty() {
                log::debug!("{} was dealt {} book(s)", state.players[seat].id, laid.len());
            }
        }
        Self::refill_empty_hands(state);
        Self::update_scores(state);

        state.current_player_id = Some(state.players[0].id.clone());
        state.round = 1;
        Ok(())
    }

    fn validate_move(&self, state: &GameState, player: &Player, mv: &GoFishMove) -> bool {
        mv.target != player.id
            && state.player_by_id(&mv.target).is_some()
            && player.hand.count_where(|c| c.rank() == Some(mv.rank)) > 0
    }

    fn apply_move(&mut self, state: &mut GameState, player: &PlayerId, mv: &GoFishMove) {
        let (Some(asker), Some(target)) = (state.player_index(player), state.player_index(&mv.target)) else {
            return;
        };
        let asker_name = state.players[asker].name.clone();
        let target_name = state.players[target].name.clone();

        let taken = state.players[target].hand.remove_where(|c| c.rank() == Some(mv.rank));
        let mut action = if taken.is_empty() {
            match state.deck.draw() {
                Some(card) => {
                    let lucky = card.rank() == Some(mv.rank);
                    state.players[asker].hand.add(card.concealed());
                    state.set_custom_state(ANOTHER_TURN, lucky);
                    if lucky {
                        format!(
                            "{} asked {} for {}s. Go fish! {} drew a {} and goes again",
                            asker_name, target_name, mv.rank, asker_name, mv.rank
                        )
                    } else {
                        format!(
                            "{} asked {} for {}s. Go fish! {} drew a card",
                            asker_name, target_name, mv.rank, asker_name
                        )
                    }
                }
                None => {
                    state.set_custom_state(ANOTHER_TURN, false);
                    format!(
                        "{} asked {} for {}s. Go fish! No card available",
                        asker_name, target_name, mv.rank
                    )
                }
            }
        } else {
            let count = taken.len();
            state.players[asker].hand.add_all(taken);
            state.set_custom_state(ANOTHER_TURN, false);
            format!(
                "{} took {} {}(s) from {}",
                asker_name, count, mv.rank, target_name
            )
        };

        let laid = Self::lay_down_books(state, asker);
        if !laid.is_empty() {
            let labels: Vec<&str> = laid.iter().map(|r| r.label()).collect();
            action.push_str(&format!(" and made a book of {}s", labels.join(", ")));
        }

        Self::refill_empty_hands(state);
        Self::update_scores(state);
        state.set_custom_state(LAST_ACTION, action);
    }

    fn is_game_over(&self, state: &GameState) -> bool {
        if state.players.is_empty() {
            return false;
        }
        Self::total_books(state) >= ALL_BOOKS || (state.deck.is_empty() && !Self::any_ask_can_succeed(state))
    }

    fn winners(&self, state: &GameState) -> Vec<PlayerId> {
        if !self.is_game_over(state) {
            return Vec::new();
        }
        let best = state.players.iter().map(|p| p.score).max().unwrap_or(0);
        let mut winners: Vec<PlayerId> = state
            .players
            .iter()
            .filter(|p| p.score == best)
            .map(|p| p.id.clone())
            .collect();
        winners.sort();
        winners
    }

    fn legal_moves(&self, state: &GameState, player: &PlayerId) -> Vec<GoFishMove> {
        let Some(asker) = state.player_by_id(player) else {
            return Vec::new();
        };
        let mut ranks: Vec<Rank> = Self::rank_counts(&asker.hand).into_keys().collect();
        ranks.sort();

        state
            .players
            .iter()
            .filter(|p| p.id != asker.id)
            .flat_map(|target| ranks.iter().map(move |&rank| GoFishMove::new(target.id.clone(), rank)))
            .filter(|mv| self.validate_move(state, asker, mv))
            .collect()
    }

    fn describe_move(&self, state: &GameState, mv: &GoFishMove) -> String {
        format!("ask {} for {}s", Self::display_name(state, &mv.target), mv.rank)
    }

    /// The asker keeps the turn after a lucky draw; players with empty
    /// hands are skipped.
    fn next_player_id(&self, state: &GameState) -> Option<PlayerId> {
        let count = state.players.len();
        if count == 0 {
            return None;
        }
        let current = self
            .current_player_id(state)
            .and_then(|id| state.player_index(&id));

        if let Some(seat) = current {
            if state.custom_bool(ANOTHER_TURN, false) && !state.players[seat].hand.is_empty() {
                return Some(state.players[seat].id.clone());
            }
        }

        let start = current.map_or(0, |seat| seat + 1);
        (0..count)
            .map(|offset| &state.players[(start + offset) % count])
            .find(|p| !p.hand.is_empty())
            .or_else(|| state.players.get(start % count))
            .map(|p| p.id.clone())
    }
}
