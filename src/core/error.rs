//! Engine error type.
//!
//! Variants follow the failure categories of a game session:
//! - Precondition violations abort `start()` (player count, deck size)
//! - Rejected moves and empty-history operations are recoverable; the
//!   engine reports them and leaves state untouched
//! - Setup errors come from configuration and the registry

use super::player::PlayerId;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GameError {
    #[error("{game} needs {expected} players, got {actual}")]
    InvalidPlayerCount {
        game: String,
        expected: String,
        actual: usize,
    },
    #[error("{game} needs {needed} cards to deal, deck has {available}")]
    InsufficientCards {
        game: String,
        needed: usize,
        available: usize,
    },
    #[error("player id '{0}' is already taken")]
    DuplicatePlayer(PlayerId),
    #[error("invalid card: '{0}'")]
    InvalidCard(String),
    #[error("game has not been started")]
    NotStarted,
    #[error("game has already been started")]
    AlreadyStarted,
    #[error("game is over")]
    GameFinished,
    #[error("unknown player: '{0}'")]
    UnknownPlayer(PlayerId),
    #[error("it is not {player}'s turn (current player: {current})")]
    NotYourTurn { player: PlayerId, current: String },
    #[error("illegal move by {player}: {description}")]
    IllegalMove { player: PlayerId, description: String },
    #[error("nothing to undo")]
    NothingToUndo,
    #[error("nothing to restart")]
    NothingToRestart,
    #[error("unknown game: '{0}'")]
    UnknownGame(String),
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("i/o error: {0}")]
    Io(String),
}

impl GameError {
    /// Is this a precondition violation that aborts a session?
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            GameError::InvalidPlayerCount { .. } | GameError::InsufficientCards { .. } | GameError::Io(_)
        )
    }
}

impl From<std::io::Error> for GameError {
    fn from(err: std::io::Error) -> Self {
        GameError::Io(err.to_string())
    }
}
