//! Rules engine trait for game implementations.
//!
//! Games implement `RulesEngine` to define their rules:
//! - How a game is set up
//! - What moves are legal
//! - How moves modify state
//! - Turn order, win conditions and winners

use std::fmt::Debug;

use crate::core::{GameError, GameState, Player, PlayerId};

/// Rules engine trait.
///
/// The orchestrator calls these methods during play and never interprets
/// game-specific concepts directly.
///
/// ## Implementation Notes
///
/// - `initialize_game`: Fail fast on broken preconditions; every dealt
///   card must end up in exactly one hand
/// - `validate_move`: Pure, must not mutate anything
/// - `apply_move`: The only place game progress happens; only called
///   after `validate_move` returned true
/// - `next_turn`: The only place turn order advances
/// - Game-specific data lives in `GameState`'s custom state, so that
///   snapshots capture it
pub trait RulesEngine {
    /// Move payload. Opaque to the orchestrator.
    type Move: Clone + Debug + PartialEq;

    /// Short game identifier.
    fn name(&self) -> &str;

    /// Validate preconditions, shuffle, deal, choose the first player and
    /// seed custom state.
    fn initialize_game(&mut self, state: &mut GameState) -> Result<(), GameError>;

    /// Is this move legal for this player right now?
    fn validate_move(&self, state: &GameState, player: &Player, mv: &Self::Move) -> bool;

    /// Resolve a validated move.
    fn apply_move(&mut self, state: &mut GameState, player: &PlayerId, mv: &Self::Move);

    /// Check if the game is over. Evaluated after every applied move.
    fn is_game_over(&self, state: &GameState) -> bool;

    /// Winning players, sorted. Empty if undetermined, several for a tie.
    fn winners(&self, state: &GameState) -> Vec<PlayerId>;

    /// Every move `player` could legally make. Used by drivers.
    fn legal_moves(&self, state: &GameState, player: &PlayerId) -> Vec<Self::Move>;

    /// Human-readable label for a move.
    fn describe_move(&self, state: &GameState, mv: &Self::Move) -> String {
        let _ = state;
        format!("{:?}", mv)
    }

    // === Turn Sequencing ===

    /// The player whose turn it is.
    fn current_player_id(&self, state: &GameState) -> Option<PlayerId> {
        state.current_player_id.clone()
    }

    /// The player who moves next.
    ///
    /// Default: round-robin in seat order.
    fn next_player_id(&self, state: &GameState) -> Option<PlayerId> {
        let seat = match self.current_player_id(state) {
            Some(current) => state.player_index(&current).map_or(0, |i| i + 1),
            None => 0,
        };
        state
            .players
            .get(seat % state.players.len().max(1))
            .map(|p| p.id.clone())
    }

    /// Advance to the next player.
    ///
    /// Default: take `next_player_id`, and start a new round when play
    /// moves back to an earlier seat.
    fn next_turn(&self, state: &mut GameState) {
        let Some(next) = self.next_player_id(state) else {
            return;
        };

        let from = self
            .current_player_id(state)
            .and_then(|id| state.player_index(&id));
        let to = state.player_index(&next);
        if let (Some(from), Some(to)) = (from, to) {
            if to <= from && next != state.players[from].id {
                state.round += 1;
            }
        }

        state.current_player_id = Some(next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal rules: a single "tick" move, three ticks end the game.
    struct TickRules;

    impl RulesEngine for TickRules {
        type Move = ();

        fn name(&self) -> &str {
            "tick"
        }

        fn initialize_game(&mut self, state: &mut GameState) -> Result<(), GameError> {
            state.round = 1;
            Ok(())
        }

        fn validate_move(&self, _state: &GameState, _player: &Player, _mv: &()) -> bool {
            true
        }

        fn apply_move(&mut self, state: &mut GameState, _player: &PlayerId, _mv: &()) {
            let ticks = state.custom_int("ticks", 0);
            state.set_custom_state("ticks", ticks + 1);
        }

        fn is_game_over(&self, state: &GameState) -> bool {
            state.custom_int("ticks", 0) >= 3
        }

        fn winners(&self, _state: &GameState) -> Vec<PlayerId> {
            vec![]
        }

        fn legal_moves(&self, _state: &GameState, _player: &PlayerId) -> Vec<()> {
            vec![()]
        }
    }

    fn three_players() -> GameState {
        let mut state = GameState::new();
        for id in ["a", "b", "c"] {
            state.add_player(Player::new(id, id)).unwrap();
        }
        state.round = 1;
        state
    }

    #[test]
    fn test_default_round_robin() {
        let rules = TickRules;
        let mut state = three_players();

        assert_eq!(rules.next_player_id(&state), Some(PlayerId::new("b")));

        rules.next_turn(&mut state);
        rules.next_turn(&mut state);
        assert_eq!(rules.current_player_id(&state), Some(PlayerId::new("c")));
        assert_eq!(state.round, 1);

        rules.next_turn(&mut state);
        assert_eq!(rules.current_player_id(&state), Some(PlayerId::new("a")));
        assert_eq!(state.round, 2);
    }

    #[test]
    fn test_next_player_without_players() {
        let rules = TickRules;
        let mut state = GameState::new();

        assert_eq!(rules.next_player_id(&state), None);
        rules.next_turn(&mut state);
        assert_eq!(state.current_player_id, None);
    }

    #[test]
    fn test_describe_move_default() {
        let rules = TickRules;
        assert_eq!(rules.describe_move(&GameState::new(), &()), "()");
    }
}
