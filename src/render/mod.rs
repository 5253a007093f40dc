//! Rendering and prompting collaborators.
//!
//! The engine reports every observable effect through a `Renderer`:
//! - `render_game_state` after a successful start, move, undo or restart
//! - `show_game_over` instead of a render when a move ends the game
//! - `show_error` for every rejected call
//!
//! Prompting is only used by the drivers that gather moves, never by the
//! engine itself.
//!
//! ## Implementations
//!
//! - `ConsoleRenderer`: text output over any `BufRead`/`Write` pair
//! - `RecordingRenderer`: records calls and answers prompts from a script

pub mod console;
pub mod recording;

pub use console::ConsoleRenderer;
pub use recording::{RecordingRenderer, RenderEvent};

use crate::core::{GameError, GameState, Player};
use crate::engine::EngineStatus;

/// What a renderer gets to see of an engine.
#[derive(Clone, Copy, Debug)]
pub struct RenderView<'a> {
    /// Rules name.
    pub game: &'a str,
    /// Live state.
    pub state: &'a GameState,
    /// Engine lifecycle status.
    pub status: EngineStatus,
    /// Accepted moves since the baseline.
    pub moves_played: usize,
}

/// Output and input collaborator consumed by the engine and drivers.
pub trait Renderer {
    /// Show the current game.
    fn render_game_state(&mut self, view: &RenderView<'_>);

    /// Report a rejected or failed call.
    fn show_error(&mut self, message: &str);

    /// Announce the end of a game. Empty when no winner could be decided.
    fn show_game_over(&mut self, winners: &[Player]);

    /// Informational message.
    fn show_message(&mut self, message: &str);

    /// Ask for a line of text.
    fn prompt_input(&mut self, prompt: &str) -> Result<String, GameError>;

    /// Ask the user to pick one of `options`. Returns its index.
    fn prompt_select(&mut self, prompt: &str, options: &[String]) -> Result<usize, GameError>;
}

impl<T: Renderer + ?Sized> Renderer for Box<T> {
    fn render_game_state(&mut self, view: &RenderView<'_>) {
        (**self).render_game_state(view);
    }

    fn show_error(&mut self, message: &str) {
        (**self).show_error(message);
    }

    fn show_game_over(&mut self, winners: &[Player]) {
        (**self).show_game_over(winners);
    }

    fn show_message(&mut self, message: &str) {
        (**self).show_message(message);
    }

    fn prompt_input(&mut self, prompt: &str) -> Result<String, GameError> {
        (**self).prompt_input(prompt)
    }

    fn prompt_select(&mut self, prompt: &str, options: &[String]) -> Result<usize, GameError> {
        (**self).prompt_select(prompt, options)
    }
}
