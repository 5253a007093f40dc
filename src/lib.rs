//! # card-engine
//!
//! A turn-based card game engine with pluggable rules, exact undo and
//! restart.
//!
//! ## Design Principles
//!
//! 1. **Game-Agnostic**: The engine knows players, decks, hands, turns and
//!    snapshots. Everything else (legal moves, scoring, win conditions)
//!    lives behind the `RulesEngine` trait.
//!
//! 2. **State Is a Value**: `GameState` clones are independent and equal
//!    by value, so history is a list of snapshots and undo is a pop.
//!
//! 3. **Validate, Then Mutate**: A rejected call reports one error and
//!    leaves the game exactly as it was.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: Decks and custom state use `im-rs`,
//!   so taking a snapshot per move costs O(1) plus the player list.
//!
//! - **Custom State**: Rules keep their own data in a string-keyed map of
//!   `StateValue`s inside `GameState`, so snapshots capture it for free.
//!
//! ## Modules
//!
//! - `core`: Cards, piles, players, state, RNG, errors, configuration
//! - `rules`: `RulesEngine` trait for game implementations
//! - `engine`: `Engine` orchestrator and snapshot history
//! - `render`: Renderer trait, console and recording renderers
//! - `games`: War and Go Fish
//! - `session`: Type-erased sessions, game registry, play drivers

pub mod core;
pub mod rules;
pub mod engine;
pub mod render;
pub mod games;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    standard_deck, Card, Rank, Suit,
    Deck, Hand, PilePosition,
    Player, PlayerId,
    StateValue, GameState,
    GameRng, GameConfig, GameError,
};

pub use crate::rules::RulesEngine;

pub use crate::engine::{Engine, EngineStatus, History, MoveRecord};

pub use crate::render::{ConsoleRenderer, RecordingRenderer, RenderEvent, RenderView, Renderer};

pub use crate::games::{GoFishMove, GoFishRules, WarMove, WarRules};

pub use crate::session::{GameRegistry, RunSummary, Session, SessionFactory};
