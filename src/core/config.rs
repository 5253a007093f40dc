//! Session configuration.
//!
//! A `GameConfig` describes one run of a game: which rules, who plays,
//! how the deck is shuffled and how automated play is paced. It can be
//! loaded from a JSON file and is then overridden by command-line flags.
//!
//! ```
//! use card_engine::core::GameConfig;
//!
//! let config = GameConfig::from_json(r#"{ "game": "war", "players": ["Ann", "Bo"] }"#).unwrap();
//! assert_eq!(config.players.len(), 2);
//! assert!(config.shuffle);
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::GameError;
use super::player::{Player, PlayerId};

/// Configuration for a single game session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Registered game identifier ("war", "go-fish").
    pub game: String,

    /// Player display names, in seat order.
    pub players: Vec<String>,

    /// Shuffle seed. `None` draws one from OS entropy.
    pub seed: Option<u64>,

    /// Shuffle the deck before dealing.
    pub shuffle: bool,

    /// Upper bound on completed turns in automated play.
    pub max_turns: usize,

    /// Pause between automated turns, in milliseconds.
    pub delay_ms: u64,

    /// Seats (0-based) controlled by a human at the console.
    pub human_seats: Vec<usize>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            game: "war".to_string(),
            players: vec!["Player 1".to_string(), "Player 2".to_string()],
            seed: None,
            shuffle: true,
            max_turns: 1000,
            delay_ms: 0,
            human_seats: Vec::new(),
        }
    }
}

impl GameConfig {
    /// Parse a configuration from JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        serde_json::from_str(json).map_err(|e| GameError::Config(e.to_string()))
    }

    /// Load a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, GameError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Check the configuration is usable. Game-specific player counts are
    /// checked later by the rules.
    pub fn validate(&self) -> Result<(), GameError> {
        if self.players.is_empty() {
            return Err(GameError::Config("at least one player is required".to_string()));
        }

        let mut names: Vec<_> = self.players.iter().map(|n| n.trim()).collect();
        if names.iter().any(|n| n.is_empty()) {
            return Err(GameError::Config("player names must not be blank".to_string()));
        }
        names.sort_unstable();
        if names.windows(2).any(|w| w[0] == w[1]) {
            return Err(GameError::Config("player names must be unique".to_string()));
        }

        if let Some(&seat) = self.human_seats.iter().find(|&&s| s >= self.players.len()) {
            return Err(GameError::Config(format!(
                "human seat {} is out of range for {} players",
                seat,
                self.players.len()
            )));
        }

        if self.max_turns == 0 {
            return Err(GameError::Config("max_turns must be positive".to_string()));
        }

        Ok(())
    }

    /// Build the seated players. Ids are `p1`, `p2`, ... in seat order.
    #[must_use]
    pub fn build_players(&self) -> Vec<Player> {
        self.players
            .iter()
            .enumerate()
            .map(|(seat, name)| Player::new(Self::seat_id(seat), name.trim()))
            .collect()
    }

    /// Player id for a seat.
    #[must_use]
    pub fn seat_id(seat: usize) -> PlayerId {
        PlayerId::new(format!("p{}", seat + 1))
    }

    /// Is the player with this id controlled by a human?
    #[must_use]
    pub fn is_human(&self, id: &PlayerId) -> bool {
        self.human_seats.iter().any(|&seat| Self::seat_id(seat) == *id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::default();
        assert_eq!(config.game, "war");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = GameConfig::from_json(r#"{ "game": "go-fish", "seed": 7 }"#).unwrap();
        assert_eq!(config.game, "go-fish");
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.max_turns, 1000);
    }

    #[test]
    fn test_bad_json() {
        assert!(matches!(GameConfig::from_json("{ nope"), Err(GameError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_duplicates() {
        let config = GameConfig {
            players: vec!["Ann".to_string(), "Ann ".to_string()],
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_seat() {
        let config = GameConfig {
            human_seats: vec![2],
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_build_players() {
        let config = GameConfig {
            players: vec!["Ann".to_string(), "Bo".to_string(), "Cy".to_string()],
            human_seats: vec![1],
            ..GameConfig::default()
        };
        let players = config.build_players();

        assert_eq!(players.len(), 3);
        assert_eq!(players[0].id, "p1");
        assert_eq!(players[2].name, "Cy");
        assert!(config.is_human(&PlayerId::new("p2")));
        assert!(!config.is_human(&PlayerId::new("p1")));
    }
}
