//! Rules engine trait for game implementations.
//!
//! Games implement `RulesEngine` to define:
//! - Setup and dealing
//! - Which moves are legal and how they modify state
//! - Turn order and win conditions
//!
//! The orchestrator calls into `RulesEngine` but never interprets
//! game-specific concepts directly.

pub mod engine;

pub use engine::RulesEngine;
