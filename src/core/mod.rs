//! Core engine types: cards, piles, players, state, RNG, configuration.
//!
//! This module contains the fundamental building blocks that are game-agnostic.
//! Games store anything beyond them in `GameState`'s custom state.

pub mod card;
pub mod pile;
pub mod player;
pub mod value;
pub mod state;
pub mod rng;
pub mod config;
pub mod error;

pub use card::{standard_deck, Card, Rank, Suit};
pub use pile::{Deck, Hand, PilePosition};
pub use player::{Player, PlayerId};
pub use value::StateValue;
pub use state::GameState;
pub use rng::GameRng;
pub use config::GameConfig;
pub use error::GameError;
