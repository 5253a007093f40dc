//! Go Fish: ask for ranks, collect books.
//!
//! - 2+ players, 7 cards each (5 each with more than 3 players)
//! - A move names another player and a rank the asker holds
//! - If the target holds that rank, every such card changes hands;
//!   otherwise the asker draws one card and, if it matches, moves again
//! - Four of a kind is a book: laid face up on the discard pile and scored
//! - Ends when all 13 books are down, or the deck is empty and no ask
//!   between any two players could succeed
//!
//! ## Custom State
//!
//! - `books`: player id to the rank labels of their books
//! - `anotherTurn`: the current player moves again
//! - `lastAction`: description of the last ask

mod game;

pub use game::{GoFishMove, GoFishRules, ANOTHER_TURN, BOOKS, LAST_ACTION};
