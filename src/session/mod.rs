//! Type-erased game sessions.
//!
//! `Engine<R, O>` is generic over the rules' move type, which makes it
//! awkward to pick a game at runtime. `Session` hides the move type behind
//! move indices so drivers and the CLI can work with any registered game
//! through `Box<dyn Session>`.
//!
//! ## Modules
//!
//! - `registry`: game id to session factory
//! - `driver`: automated and interactive play loops

pub mod driver;
pub mod registry;

pub use driver::{play_auto_turn, run_automated, run_interactive, RunSummary};
pub use registry::{GameRegistry, SessionFactory};

use crate::core::{GameError, GameState, Player, PlayerId};
use crate::engine::{Engine, EngineStatus};
use crate::render::Renderer;
use crate::rules::RulesEngine;

/// Object-safe view of an engine.
pub trait Session {
    /// Rules name.
    fn game(&self) -> &str;

    fn add_player(&mut self, player: Player) -> Result<(), GameError>;

    fn start(&mut self) -> Result<(), GameError>;

    fn status(&self) -> EngineStatus;

    fn is_finished(&self) -> bool {
        self.status() == EngineStatus::Finished
    }

    fn state(&self) -> &GameState;

    fn current_player_id(&self) -> Option<PlayerId>;

    /// Labels of the current player's legal moves, in index order.
    fn move_labels(&self) -> Vec<String>;

    /// Play the current player's legal move at `index`.
    fn play_choice(&mut self, index: usize) -> Result<(), GameError>;

    fn undo(&mut self) -> Result<(), GameError>;

    fn restart(&mut self) -> Result<(), GameError>;

    /// Accepted moves since the baseline.
    fn moves_played(&self) -> usize;

    fn winners(&self) -> Vec<PlayerId>;

    /// The renderer, for prompting.
    fn renderer_mut(&mut self) -> &mut dyn Renderer;
}

impl<R, O> Session for Engine<R, O>
where
    R: RulesEngine,
    O: Renderer,
{
    fn game(&self) -> &str {
        self.rules().name()
    }

    fn add_player(&mut self, player: Player) -> Result<(), GameError> {
        Engine::add_player(self, player)
    }

    fn start(&mut self) -> Result<(), GameError> {
        Engine::start(self)
    }

    fn status(&self) -> EngineStatus {
        Engine::status(self)
    }

    fn state(&self) -> &GameState {
        Engine::state(self)
    }

    fn current_player_id(&self) -> Option<PlayerId> {
        Engine::current_player_id(self)
    }

    fn move_labels(&self) -> Vec<String> {
        self.legal_moves().iter().map(|mv| self.describe_move(mv)).collect()
    }

    fn play_choice(&mut self, index: usize) -> Result<(), GameError> {
        self.play_legal(index)
    }

    fn undo(&mut self) -> Result<(), GameError> {
        Engine::undo(self)
    }

    fn restart(&mut self) -> Result<(), GameError> {
        Engine::restart(self)
    }

    fn moves_played(&self) -> usize {
        self.move_log().len()
    }

    fn winners(&self) -> Vec<PlayerId> {
        Engine::winners(self)
    }

    fn renderer_mut(&mut self) -> &mut dyn Renderer {
        Engine::<R, O>::renderer_mut(self)
    }
}
