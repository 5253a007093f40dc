//! Game state: the authoritative snapshot of a game in progress.
//!
//! ## GameState
//!
//! - Deck and discard pile
//! - Players in seat order (turn order unless rules say otherwise)
//! - Current player and round counter
//! - Custom state: the open-ended bag rules use for game-specific data
//!
//! Every container is a persistent `im` structure, so `clone()` is cheap
//! and produces a value that shares nothing mutable with the original.
//! The engine snapshots state before every accepted move this way.

use im::OrdMap;
use serde::{Deserialize, Serialize};

use super::card::Card;
use super::error::GameError;
use super::pile::Deck;
use super::player::{Player, PlayerId};
use super::value::StateValue;

/// Full game state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Draw pile, top first.
    pub deck: Deck,

    /// Discard pile, top first.
    pub discard_pile: Deck,

    /// Players in seat order.
    pub players: Vec<Player>,

    /// Active player. `None` before any player has been seated.
    pub current_player_id: Option<PlayerId>,

    /// Round counter (starts at 1 once a game is initialized).
    pub round: u32,

    /// Game-specific data, keyed by name. Only rules read or write it.
    pub(crate) custom_state: OrdMap<String, StateValue>,
}

impl GameState {
    /// Create an empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty state around a prepared deck.
    #[must_use]
    pub fn with_deck(deck: Deck) -> Self {
        Self {
            deck,
            ..Self::default()
        }
    }

    // === Players ===

    /// Look up a player by id.
    ///
    /// `None` is a normal answer; callers use it to test membership.
    #[must_use]
    pub fn player_by_id(&self, id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == *id)
    }

    pub fn player_by_id_mut(&mut self, id: &PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == *id)
    }

    /// Seat index of a player.
    #[must_use]
    pub fn player_index(&self, id: &PlayerId) -> Option<usize> {
        self.players.iter().position(|p| p.id == *id)
    }

    /// Player ids in seat order.
    #[must_use]
    pub fn player_ids(&self) -> Vec<PlayerId> {
        self.players.iter().map(|p| p.id.clone()).collect()
    }

    /// The player whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> Option<&Player> {
        self.current_player_id.as_ref().and_then(|id| self.player_by_id(id))
    }

    /// Seat a player. The first player seated becomes the current player.
    pub fn add_player(&mut self, player: Player) -> Result<(), GameError> {
        if self.player_by_id(&player.id).is_some() {
            return Err(GameError::DuplicatePlayer(player.id));
        }
        if self.players.is_empty() && self.current_player_id.is_none() {
            self.current_player_id = Some(player.id.clone());
        }
        self.players.push(player);
        Ok(())
    }

    /// Remove a player, returning them.
    ///
    /// If the removed player was current, the player who moves into their
    /// seat (wrapping to the first seat) becomes current.
    pub fn remove_player(&mut self, id: &PlayerId) -> Option<Player> {
        let index = self.player_index(id)?;
        let removed = self.players.remove(index);

        if self.current_player_id.as_ref() == Some(id) {
            self.current_player_id = if self.players.is_empty() {
                None
            } else {
                Some(self.players[index % self.players.len()].id.clone())
            };
        }

        Some(removed)
    }

    // === Custom State ===

    /// Set a custom state value.
    pub fn set_custom_state(&mut self, key: impl Into<String>, value: impl Into<StateValue>) {
        self.custom_state.insert(key.into(), value.into());
    }

    /// Get a custom state value. Absent and `Null` entries are both `None`.
    #[must_use]
    pub fn custom_state(&self, key: &str) -> Option<&StateValue> {
        self.custom_state.get(key).filter(|v| !v.is_null())
    }

    /// Get a custom state value, or `default` when absent or null.
    #[must_use]
    pub fn get_custom_state(&self, key: &str, default: impl Into<StateValue>) -> StateValue {
        self.custom_state(key).cloned().unwrap_or_else(|| default.into())
    }

    /// Remove a custom state entry.
    pub fn remove_custom_state(&mut self, key: &str) -> Option<StateValue> {
        self.custom_state.remove(key)
    }

    /// Get a boolean flag with default.
    #[must_use]
    pub fn custom_bool(&self, key: &str, default: bool) -> bool {
        self.custom_state(key).and_then(StateValue::as_bool).unwrap_or(default)
    }

    /// Get an integer with default.
    #[must_use]
    pub fn custom_int(&self, key: &str, default: i64) -> i64 {
        self.custom_state(key).and_then(StateValue::as_int).unwrap_or(default)
    }

    /// Get a text value, empty when absent.
    #[must_use]
    pub fn custom_text(&self, key: &str) -> &str {
        self.custom_state(key).and_then(StateValue::as_text).unwrap_or("")
    }

    /// Get a list of cards, empty when absent.
    #[must_use]
    pub fn custom_cards(&self, key: &str) -> Vec<Card> {
        self.custom_state(key)
            .and_then(StateValue::as_cards)
            .map(<[Card]>::to_vec)
            .unwrap_or_default()
    }

    /// Iterate over every custom state entry in key order.
    pub fn custom_entries(&self) -> impl Iterator<Item = (&String, &StateValue)> {
        self.custom_state.iter()
    }

    // === Accounting ===

    /// Every card id in the game: deck, discard pile, hands and any cards
    /// rules keep in custom state. Sorted.
    #[must_use]
    pub fn all_card_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .deck
            .iter()
            .chain(self.discard_pile.iter())
            .chain(self.players.iter().flat_map(|p| p.hand.iter()))
            .chain(self.custom_state.values().flat_map(StateValue::cards))
            .map(|c| c.id.clone())
            .collect();
        ids.sort();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::card::{Rank, Suit};

    fn two_player_state() -> GameState {
        let mut state = GameState::with_deck(Deck::standard());
        state.add_player(Player::new("p1", "Ann")).unwrap();
        state.add_player(Player::new("p2", "Bo")).unwrap();
        state
    }

    #[test]
    fn test_new_state_is_empty() {
        let state = GameState::new();

        assert!(state.players.is_empty());
        assert!(state.deck.is_empty());
        assert_eq!(state.current_player_id, None);
        assert_eq!(state.round, 0);
    }

    #[test]
    fn test_first_player_becomes_current() {
        let state = two_player_state();

        assert_eq!(state.current_player_id, Some(PlayerId::new("p1")));
        assert_eq!(state.current_player().map(|p| p.name.as_str()), Some("Ann"));
    }

    #[test]
    fn test_duplicate_player_rejected() {
        let mut state = two_player_state();
        let err = state.add_player(Player::new("p1", "Again")).unwrap_err();

        assert_eq!(err, GameError::DuplicatePlayer(PlayerId::new("p1")));
        assert_eq!(state.players.len(), 2);
    }

    #[test]
    fn test_player_lookup() {
        let state = two_player_state();

        assert_eq!(state.player_by_id(&PlayerId::new("p2")).map(|p| p.name.as_str()), Some("Bo"));
        assert!(state.player_by_id(&PlayerId::new("nobody")).is_none());
        assert_eq!(state.player_index(&PlayerId::new("p2")), Some(1));
    }

    #[test]
    fn test_remove_current_player_moves_turn() {
        let mut state = two_player_state();

        let removed = state.remove_player(&PlayerId::new("p1"));
        assert_eq!(removed.map(|p| p.name), Some("Ann".to_string()));
        assert_eq!(state.current_player_id, Some(PlayerId::new("p2")));

        state.remove_player(&PlayerId::new("p2"));
        assert_eq!(state.current_player_id, None);
        assert!(state.remove_player(&PlayerId::new("p2")).is_none());
    }

    #[test]
    fn test_custom_state_defaults() {
        let mut state = GameState::new();

        assert_eq!(state.get_custom_state("warMode", false), StateValue::Bool(false));

        state.set_custom_state("warMode", true);
        assert_eq!(state.get_custom_state("warMode", false), StateValue::Bool(true));
        assert!(state.custom_bool("warMode", false));

        // Null is treated as absent
        state.set_custom_state("warMode", StateValue::Null);
        assert_eq!(state.get_custom_state("warMode", false), StateValue::Bool(false));
        assert!(state.custom_state("warMode").is_none());
    }

    #[test]
    fn test_clone_is_independent() {
        let mut state = two_player_state();
        state.set_custom_state("cardsInPlay", vec![Card::standard(Rank::Two, Suit::Clubs)]);

        let mut cloned = state.clone();
        let drawn = cloned.deck.draw().unwrap();
        cloned.players[0].hand.add(drawn);
        cloned.players[1].score = 9;
        cloned.set_custom_state("cardsInPlay", Vec::<Card>::new());
        cloned.current_player_id = Some(PlayerId::new("p2"));

        assert_eq!(state.deck.len(), 52);
        assert!(state.players[0].hand.is_empty());
        assert_eq!(state.players[1].score, 0);
        assert_eq!(state.custom_cards("cardsInPlay").len(), 1);
        assert_eq!(state.current_player_id, Some(PlayerId::new("p1")));
        assert_ne!(state, cloned);
    }

    #[test]
    fn test_all_card_ids_counts_every_location() {
        let mut state = two_player_state();
        let a = state.deck.draw().unwrap();
        let b = state.deck.draw().unwrap();
        let c = state.deck.draw().unwrap();
        state.players[0].hand.add(a);
        state.discard_pile.add_to_top(b);
        state.set_custom_state("cardsInPlay", vec![c]);

        let ids = state.all_card_ids();
        assert_eq!(ids.len(), 52);

        let mut expected: Vec<_> = Deck::standard().iter().map(|c| c.id.clone()).collect();
        expected.sort();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_serialization() {
        let mut state = two_player_state();
        state.set_custom_state("lastAction", "dealt");
        let json = serde_json::to_string(&state).unwrap();
        let deserialized: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, deserialized);
    }
}
