//! War: a two-player game of pure comparison.
//!
//! - The deck is dealt evenly between the two players
//! - Each move, both players reveal their top card; the higher rank takes
//!   every card in play to the bottom of their hand
//! - On a tie ("war") each player commits three cards face down and the
//!   next move decides the whole pile; a player with fewer than four cards
//!   left loses the pile to the player holding more
//! - The game ends when a player's hand is empty
//!
//! ## Custom State
//!
//! - `warMode`: a tie is being resolved
//! - `cardsInPlay`: revealed and committed cards not yet awarded
//! - `lastAction`: description of the last exchange

mod game;

pub use game::{WarMove, WarRules, CARDS_IN_PLAY, LAST_ACTION, WAR_MODE};
