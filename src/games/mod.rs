//! Rules implementations.
//!
//! - `war`: two players, highest card takes the trick
//! - `go_fish`: ask for ranks, collect books

pub mod go_fish;
pub mod war;

pub use go_fish::{GoFishMove, GoFishRules};
pub use war::{WarMove, WarRules};
