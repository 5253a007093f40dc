//! Game orchestrator.
//!
//! `Engine` owns one `GameState`, one rules instance and one renderer. It
//! drives a game through `start`, `play_move`, `undo` and `restart`, and
//! keeps the snapshot history that makes undo and restart exact.
//!
//! ## Lifecycle
//!
//! ```text
//! Uninitialized --start--> InProgress --play_move (game over)--> Finished
//!                              ^  |                                 |
//!                              |  +------ undo / restart <----------+
//! ```
//!
//! ## Guarantees
//!
//! - A rejected call reports exactly one `show_error` and changes nothing
//! - A successful call ends with exactly one `render_game_state`, or one
//!   `show_game_over` when the move ended the game
//! - Mutation starts only after validation has fully passed
//!
//! ## Example
//!
//! ```
//! use card_engine::core::{Player, PlayerId};
//! use card_engine::engine::{Engine, EngineStatus};
//! use card_engine::games::war::{WarMove, WarRules};
//! use card_engine::render::RecordingRenderer;
//!
//! let mut engine = Engine::new(WarRules::new(7), RecordingRenderer::new());
//! engine.add_player(Player::new("p1", "Ann")).unwrap();
//! engine.add_player(Player::new("p2", "Bo")).unwrap();
//! engine.start().unwrap();
//!
//! engine.play_move(&PlayerId::new("p1"), WarMove::Play).unwrap();
//! assert_eq!(engine.move_log().len(), 1);
//!
//! engine.undo().unwrap();
//! assert_eq!(engine.state(), engine.baseline().unwrap());
//! assert_eq!(engine.status(), EngineStatus::InProgress);
//! ```

pub mod history;

pub use history::{History, MoveRecord};

use serde::{Deserialize, Serialize};

use crate::core::{GameError, GameState, Player, PlayerId};
use crate::render::{RenderView, Renderer};
use crate::rules::RulesEngine;

/// Engine lifecycle status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EngineStatus {
    /// Players may still be seated; nothing has been dealt.
    Uninitialized,
    /// Moves are accepted.
    InProgress,
    /// The rules declared the game over.
    Finished,
}

/// Turn-based game orchestrator, generic over rules and renderer.
pub struct Engine<R: RulesEngine, O: Renderer> {
    rules: R,
    renderer: O,
    state: GameState,
    history: History<R::Move>,
    status: EngineStatus,
}

impl<R: RulesEngine, O: Renderer> Engine<R, O> {
    /// Create an engine around an empty state.
    pub fn new(rules: R, renderer: O) -> Self {
        Self::with_state(rules, renderer, GameState::new())
    }

    /// Create an engine around a prepared state (seated players, a
    /// stacked deck). The state is dealt by `start()`.
    pub fn with_state(rules: R, renderer: O, state: GameState) -> Self {
        Self {
            rules,
            renderer,
            state,
            history: History::new(),
            status: EngineStatus::Uninitialized,
        }
    }

    // === Accessors ===

    /// The live state.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn rules(&self) -> &R {
        &self.rules
    }

    #[must_use]
    pub fn renderer(&self) -> &O {
        &self.renderer
    }

    /// Mutable renderer access, for drivers that prompt for moves.
    pub fn renderer_mut(&mut self) -> &mut O {
        &mut self.renderer
    }

    #[must_use]
    pub fn status(&self) -> EngineStatus {
        self.status
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.status == EngineStatus::Finished
    }

    /// Number of snapshots, baseline included.
    #[must_use]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// The state `restart()` returns to.
    #[must_use]
    pub fn baseline(&self) -> Option<&GameState> {
        self.history.baseline()
    }

    /// Accepted moves, oldest first.
    #[must_use]
    pub fn move_log(&self) -> &[MoveRecord<R::Move>] {
        self.history.moves()
    }

    /// The player whose turn it is, per the rules.
    #[must_use]
    pub fn current_player_id(&self) -> Option<PlayerId> {
        self.rules.current_player_id(&self.state)
    }

    /// Legal moves for the current player.
    #[must_use]
    pub fn legal_moves(&self) -> Vec<R::Move> {
        match (self.status, self.current_player_id()) {
            (EngineStatus::InProgress, Some(player)) => self.rules.legal_moves(&self.state, &player),
            _ => Vec::new(),
        }
    }

    #[must_use]
    pub fn describe_move(&self, mv: &R::Move) -> String {
        self.rules.describe_move(&self.state, mv)
    }

    /// Winners per the rules. Empty unless the game is finished.
    #[must_use]
    pub fn winners(&self) -> Vec<PlayerId> {
        if self.is_finished() {
            self.rules.winners(&self.state)
        } else {
            Vec::new()
        }
    }

    /// What a renderer would be shown right now.
    #[must_use]
    pub fn render_view(&self) -> RenderView<'_> {
        RenderView {
            game: self.rules.name(),
            state: &self.state,
            status: self.status,
            moves_played: self.history.moves().len(),
        }
    }

    // === Setup ===

    /// Seat a player before the game starts.
    pub fn add_player(&mut self, player: Player) -> Result<(), GameError> {
        if self.status != EngineStatus::Uninitialized {
            return Err(GameError::AlreadyStarted);
        }
        self.state.add_player(player)
    }

    /// Deal the game and take the baseline snapshot.
    ///
    /// Precondition violations from the rules abort the call and leave the
    /// engine uninitialized.
    pub fn start(&mut self) -> Result<(), GameError> {
        if self.status != EngineStatus::Uninitialized {
            return self.reject(GameError::AlreadyStarted);
        }

        let mut dealt = self.state.clone();
        if let Err(err) = self.rules.initialize_game(&mut dealt) {
            log::error!("{} failed to initialize: {}", self.rules.name(), err);
            self.renderer.show_error(&err.to_string());
            return Err(err);
        }

        self.state = dealt;
        self.history.reset(self.state.clone());
        self.status = EngineStatus::InProgress;
        log::info!(
            "started {} with {} players, {} card(s) left in deck",
            self.rules.name(),
            self.state.players.len(),
            self.state.deck.len()
        );

        if self.rules.is_game_over(&self.state) {
            self.finish();
        } else {
            self.render();
        }
        Ok(())
    }

    // === Play ===

    /// Validate and apply one move.
    pub fn play_move(&mut self, player_id: &PlayerId, mv: R::Move) -> Result<(), GameError> {
        match self.status {
            EngineStatus::Uninitialized => return self.reject(GameError::NotStarted),
            EngineStatus::Finished => return self.reject(GameError::GameFinished),
            EngineStatus::InProgress => {}
        }

        if self.state.player_by_id(player_id).is_none() {
            return self.reject(GameError::UnknownPlayer(player_id.clone()));
        }

        let current = self.rules.current_player_id(&self.state);
        if current.as_ref() != Some(player_id) {
            return self.reject(GameError::NotYourTurn {
                player: player_id.clone(),
                current: current.map_or_else(|| "none".to_string(), |id| id.to_string()),
            });
        }

        let legal = self
            .state
            .player_by_id(player_id)
            .is_some_and(|player| self.rules.validate_move(&self.state, player, &mv));
        if !legal {
            let description = self.rules.describe_move(&self.state, &mv);
            return self.reject(GameError::IllegalMove {
                player: player_id.clone(),
                description,
            });
        }

        let before = self.state.clone();
        let round = self.state.round;
        self.rules.apply_move(&mut self.state, player_id, &mv);
        log::debug!(
            "{} played {} in round {}",
            player_id,
            self.rules.describe_move(&before, &mv),
            round
        );
        self.history.push(before, MoveRecord::new(player_id.clone(), mv, round));

        if self.rules.is_game_over(&self.state) {
            self.finish();
        } else {
            self.rules.next_turn(&mut self.state);
            self.render();
        }
        Ok(())
    }

    /// Play the `index`-th entry of `legal_moves()` for the current player.
    pub fn play_legal(&mut self, index: usize) -> Result<(), GameError> {
        match self.status {
            EngineStatus::Uninitialized => return self.reject(GameError::NotStarted),
            EngineStatus::Finished => return self.reject(GameError::GameFinished),
            EngineStatus::InProgress => {}
        }
        let Some(player) = self.current_player_id() else {
            return self.reject(GameError::NotStarted);
        };

        let mut moves = self.legal_moves();
        if index >= moves.len() {
            let description = format!("choice {} of {}", index + 1, moves.len());
            return self.reject(GameError::IllegalMove { player, description });
        }
        let mv = moves.swap_remove(index);
        self.play_move(&player, mv)
    }

    /// Step back one accepted move.
    pub fn undo(&mut self) -> Result<(), GameError> {
        let Some((before, record)) = self.history.pop() else {
            return self.reject(GameError::NothingToUndo);
        };

        log::debug!("undid move by {} from round {}", record.player, record.round);
        self.state = before;
        self.status = EngineStatus::InProgress;
        self.render();
        Ok(())
    }

    /// Return to the freshly dealt baseline and clear the move log.
    pub fn restart(&mut self) -> Result<(), GameError> {
        let Some(baseline) = self.history.rewind() else {
            return self.reject(GameError::NothingToRestart);
        };

        log::info!("restarted {}", self.rules.name());
        self.state = baseline;
        self.status = EngineStatus::InProgress;
        self.render();
        Ok(())
    }

    // === Internals ===

    fn render(&mut self) {
        let view = RenderView {
            game: self.rules.name(),
            state: &self.state,
            status: self.status,
            moves_played: self.history.moves().len(),
        };
        self.renderer.render_game_state(&view);
    }

    fn finish(&mut self) {
        self.status = EngineStatus::Finished;
        let winner_ids = self.rules.winners(&self.state);
        let winners: Vec<Player> = winner_ids
            .iter()
            .filter_map(|id| self.state.player_by_id(id).cloned())
            .collect();
        log::info!(
            "{} finished after {} move(s); winners: {:?}",
            self.rules.name(),
            self.history.moves().len(),
            winner_ids
        );
        self.renderer.show_game_over(&winners);
    }

    fn reject(&mut self, err: GameError) -> Result<(), GameError> {
        log::warn!("rejected: {}", err);
        self.renderer.show_error(&err.to_string());
        Err(err)
    }
}
