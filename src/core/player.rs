//! Player identification and per-player data.
//!
//! ## PlayerId
//!
//! String identifier, unique within one game. Ordering is lexicographic,
//! which is what rules use when they need a deterministic winner order.
//!
//! ## Player
//!
//! A simple value holder: identity, hand and score. Score is written
//! directly by rules logic.

use serde::{Deserialize, Serialize};

use super::pile::Hand;

/// Player identifier, unique within a game.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(String);

impl PlayerId {
    /// Create a new player ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for PlayerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl PartialEq<str> for PlayerId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for PlayerId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// A participant in a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub hand: Hand,
    pub score: i64,
}

impl Player {
    /// Create a player with an empty hand and zero score.
    pub fn new(id: impl Into<PlayerId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            hand: Hand::new(),
            score: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Card;

    #[test]
    fn test_player_id_basics() {
        let id = PlayerId::new("alice");

        assert_eq!(id.as_str(), "alice");
        assert_eq!(format!("{}", id), "alice");
        assert_eq!(id, "alice");
        assert_eq!(PlayerId::from("alice"), id);
    }

    #[test]
    fn test_player_id_ordering() {
        let mut ids = vec![PlayerId::new("p2"), PlayerId::new("p0"), PlayerId::new("p1")];
        ids.sort();
        assert_eq!(ids, vec![PlayerId::new("p0"), PlayerId::new("p1"), PlayerId::new("p2")]);
    }

    #[test]
    fn test_new_player() {
        let player = Player::new("p0", "Alice");

        assert_eq!(player.id, "p0");
        assert_eq!(player.name, "Alice");
        assert!(player.hand.is_empty());
        assert_eq!(player.score, 0);
    }

    #[test]
    fn test_player_clone_is_independent() {
        let mut player = Player::new("p0", "Alice");
        player.hand.add(Card::new("x", "X"));

        let mut copy = player.clone();
        copy.hand.take_front();
        copy.score = 3;

        assert_eq!(player.hand.len(), 1);
        assert_eq!(player.score, 0);
    }

    #[test]
    fn test_player_serialization() {
        let player = Player::new("p1", "Bob");
        let json = serde_json::to_string(&player).unwrap();
        let deserialized: Player = serde_json::from_str(&json).unwrap();
        assert_eq!(player, deserialized);
    }
}
