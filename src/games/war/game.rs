//! War rules implementation.

use std::fmt;
use std::str::FromStr;

use crate::core::{Card, Deck, GameError, GameRng, GameState, Player, PlayerId};
use crate::rules::RulesEngine;

pub const WAR_MODE: &str = "warMode";
pub const CARDS_IN_PLAY: &str = "cardsInPlay";
pub const LAST_ACTION: &str = "lastAction";

/// Cards each player commits face down when a war starts.
const WAR_COMMIT: usize = 3;

/// The only War move: reveal the top cards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WarMove {
    Play,
}

impl fmt::Display for WarMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("play")
    }
}

impl FromStr for WarMove {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "play" => Ok(WarMove::Play),
            other => Err(GameError::Config(format!("unknown war move '{}'", other))),
        }
    }
}

/// War rules.
#[derive(Clone, Debug)]
pub struct WarRules {
    rng: GameRng,
    shuffle: bool,
}

impl WarRules {
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

    /// Move every card in play to the bottom of a player's hand.
    fn award(state: &mut GameState, seat: usize, pile: Vec<Card>) {
        let count = pile.len();
        let winner = &mut state.players[seat];
        winner.hand.add_all(pile.into_iter().map(Card::concealed));
        let message = format!("{} wins {} card(s)", winner.name, count);

        state.set_custom_state(CARDS_IN_PLAY, Vec::<Card>::new());
        state.set_custom_state(WAR_MODE, false);
        state.set_custom_state(LAST_ACTION, message);
    }

    fn update_scores(state: &mut GameState) {
        for player in &mut state.players {
            player.score = player.hand.len() as i64;
        }
    }
}

impl RulesEngine for WarRules {
    type Move = WarMove;

    fn name(&self) -> &str {
        "war"
    }

    fn initialize_game(&mut self, state: &mut GameState) -> Result<(), GameError> {
        if state.players.len() != 2 {
            return Err(GameError::InvalidPlayerCount {
                game: self.name().to_string(),
                expected: "exactly 2".to_string(),
                actual: state.players.len(),
            });
        }

        if state.deck.is_empty() {
            state.deck = Deck::standard();
        }
        if state.deck.len() < 2 {
            return Err(GameError::InsufficientCards {
                game: self.name().to_string(),
                needed: 2,
                available: state.deck.len(),
            });
        }

        if self.shuffle {
            state.deck.shuffle(&mut self.rng);
        }

        // An odd card stays in the deck.
        let dealt = state.deck.len() - state.deck.len() % 2;
        for (i, card) in state.deck.draw_n(dealt).into_iter().enumerate() {
            state.players[i % 2].hand.add(card.concealed());
        }

        state.current_player_id = Some(state.players[0].id.clone());
        state.round = 1;
        state.set_custom_state(WAR_MODE, false);
        state.set_custom_state(CARDS_IN_PLAY, Vec::<Card>::new());
        state.set_custom_state(LAST_ACTION, "");
        Self::update_scores(state);
        Ok(())
    }

    fn validate_move(&self, state: &GameState, _player: &Player, mv: &WarMove) -> bool {
        match mv {
            WarMove::Play => state.players.len() == 2 && state.players.iter().all(|p| !p.hand.is_empty()),
        }
    }

    fn apply_move(&mut self, state: &mut GameState, player: &PlayerId, mv: &WarMove) {
        let WarMove::Play = mv;
        if state.players.len() != 2 || state.players.iter().any(|p| p.hand.is_empty()) {
            return;
        }

        let mut pile = state.custom_cards(CARDS_IN_PLAY);
        let mut revealed = Vec::with_capacity(2);
        for seat in 0..2 {
            if let Some(card) = state.players[seat].hand.take_front() {
                let card = card.revealed();
                revealed.push(card.clone());
                pile.push(card);
            }
        }
        let (first, second) = (&revealed[0], &revealed[1]);
        log::debug!("war: {} vs {}", first, second);

        match first.rank().cmp(&second.rank()) {
            std::cmp::Ordering::Greater => Self::award(state, 0, pile),
            std::cmp::Ordering::Less => Self::award(state, 1, pile),
            std::cmp::Ordering::Equal => {
                let left = [state.players[0].hand.len(), state.players[1].hand.len()];
                if left.iter().any(|&n| n < WAR_COMMIT + 1) {
                    let seat = if left[0] != left[1] {
                        if left[0] > left[1] { 0 } else { 1 }
                    } else {
                        state.player_index(player).unwrap_or(0)
                    };
                    Self::award(state, seat, pile);
                } else {
                    for seat in 0..2 {
                        let committed = state.players[seat].hand.take_front_n(WAR_COMMIT);
                        pile.extend(committed.into_iter().map(Card::concealed));
                    }
                    let message = format!("{} ties {}: war! {} card(s) in play", first, second, pile.len());
                    state.set_custom_state(CARDS_IN_PLAY, pile);
                    state.set_custom_state(WAR_MODE, true);
                    state.set_custom_state(LAST_ACTION, message);
                }
            }
        }

        Self::update_scores(state);
    }

    fn is_game_over(&self, state: &GameState) -> bool {
        !state.players.is_empty()
            && state.players.iter().any(|p| p.hand.is_empty())
            && state.custom_cards(CARDS_IN_PLAY).is_empty()
    }

    fn winners(&self, state: &GameState) -> Vec<PlayerId> {
        if !self.is_game_over(state) {
            return Vec::new();
        }
        let mut winners: Vec<PlayerId> = state
            .players
            .iter()
            .filter(|p| !p.hand.is_empty())
            .map(|p| p.id.clone())
            .collect();
        winners.sort();
        winners
    }

    fn legal_moves(&self, state: &GameState, player: &PlayerId) -> Vec<WarMove> {
        match state.player_by_id(player) {
            Some(p) if self.validate_move(state, p, &WarMove::Play) => vec![WarMove::Play],
            _ => Vec::new(),
        }
    }

    fn describe_move(&self, _state: &GameState, mv: &WarMove) -> String {
        mv.to_string()
    }
}
