//! Registry of playable games.
//!
//! The registry maps a game id to a factory that builds a fresh, unseated
//! session. It is an ordinary value: build it once at startup and pass it
//! to whatever needs it.
//!
//! ## Example
//!
//! ```
//! use card_engine::core::GameConfig;
//! use card_engine::render::RecordingRenderer;
//! use card_engine::session::GameRegistry;
//!
//! let registry = GameRegistry::with_builtin_games();
//! assert_eq!(registry.ids(), vec!["go-fish", "war"]);
//!
//! let config = GameConfig { seed: Some(3), ..GameConfig::default() };
//! let mut session = registry.create(&config, Box::new(RecordingRenderer::new())).unwrap();
//! session.start().unwrap();
//! assert_eq!(session.state().players.len(), 2);
//! ```

use rustc_hash::FxHashMap;

use crate::core::{GameConfig, GameError};
use crate::engine::Engine;
use crate::games::go_fish::GoFishRules;
use crate::games::war::WarRules;
use crate::render::Renderer;

use super::Session;

/// Builds an unseated session from a seed, a shuffle flag and a renderer.
pub type SessionFactory = fn(u64, bool, Box<dyn Renderer>) -> Box<dyn Session>;

#[derive(Clone, Debug)]
struct GameEntry {
    description: String,
    factory: SessionFactory,
}

/// Game id to factory.
#[derive(Clone, Debug, Default)]
pub struct GameRegistry {
    games: FxHashMap<String, GameEntry>,
}

impl GameRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding War and Go Fish.
    #[must_use]
    pub fn with_builtin_games() -> Self {
        let mut registry = Self::new();
        registry.insert("war", "War: reveal top cards, higher rank takes both", war_session);
        registry.insert("go-fish", "Go Fish: ask for ranks, collect books of four", go_fish_session);
        registry
    }

    /// Register a game. Fails if the id is taken.
    pub fn register(
        &mut self,
        id: impl Into<String>,
        description: impl Into<String>,
        factory: SessionFactory,
    ) -> Result<(), GameError> {
        let id = id.into();
        if self.games.contains_key(&id) {
            return Err(GameError::Config(format!("game '{}' is already registered", id)));
        }
        self.insert(id, description, factory);
        Ok(())
    }

    fn insert(&mut self, id: impl Into<String>, description: impl Into<String>, factory: SessionFactory) {
        self.games.insert(
            id.into(),
            GameEntry {
                description: description.into(),
                factory,
            },
        );
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.games.contains_key(id)
    }

    /// Registered ids, sorted.
    #[must_use]
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.games.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    #[must_use]
    pub fn description(&self, id: &str) -> Option<&str> {
        self.games.get(id).map(|entry| entry.description.as_str())
    }

    /// Build a session for `config.game` and seat `config`'s players.
    ///
    /// A missing seed is drawn from OS entropy and logged so the run can
    /// be reproduced.
    pub fn create(&self, config: &GameConfig, renderer: Box<dyn Renderer>) -> Result<Box<dyn Session>, GameError> {
        let entry = self
            .games
            .get(&config.game)
            .ok_or_else(|| GameError::UnknownGame(config.game.clone()))?;
        config.validate()?;

        let seed = config.seed.unwrap_or_else(rand::random);
        log::info!("creating {} session with seed {}", config.game, seed);

        let mut session = (entry.factory)(seed, config.shuffle, renderer);
        for player in config.build_players() {
            session.add_player(player)?;
        }
        Ok(session)
    }
}

fn war_session(seed: u64, shuffle: bool, renderer: Box<dyn Renderer>) -> Box<dyn Session> {
    let rules = if shuffle { WarRules::new(seed) } else { WarRules::new(seed).without_shuffle() };
    Box::new(Engine::new(rules, renderer))
}

fn go_fish_session(seed: u64, shuffle: bool, renderer: Box<dyn Renderer>) -> Box<dyn Session> {
    let rules = if shuffle { GoFishRules::new(seed) } else { GoFishRules::new(seed).without_shuffle() };
    Box::new(Engine::new(rules, renderer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::EngineStatus;
    use crate::render::RecordingRenderer;

    fn config(game: &str, players: &[&str]) -> GameConfig {
        GameConfig {
            game: game.to_string(),
            players: players.iter().map(|p| p.to_string()).collect(),
            seed: Some(5),
            ..GameConfig::default()
        }
    }

    #[test]
    fn test_builtin_games() {
        let registry = GameRegistry::with_builtin_games();
        assert!(registry.contains("war"));
        assert!(registry.contains("go-fish"));
        assert!(registry.description("war").unwrap().starts_with("War"));
        assert!(registry.description("poker").is_none());
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let mut registry = GameRegistry::with_builtin_games();
        let err = registry.register("war", "again", war_session).unwrap_err();
        assert!(matches!(err, GameError::Config(_)));
    }

    #[test]
    fn test_unknown_game() {
        let registry = GameRegistry::with_builtin_games();
        let err = registry
            .create(&config("poker", &["Ann", "Bo"]), Box::new(RecordingRenderer::new()))
            .err();
        assert_eq!(err, Some(GameError::UnknownGame("poker".to_string())));
    }

    #[test]
    fn test_create_seats_players() {
        let registry = GameRegistry::with_builtin_games();
        let mut session = registry
            .create(&config("go-fish", &["Ann", "Bo", "Cy"]), Box::new(RecordingRenderer::new()))
            .unwrap();

        assert_eq!(session.state().players.len(), 3);
        assert_eq!(session.status(), EngineStatus::Uninitialized);
        session.start().unwrap();
        let state = session.state();
        let in_hands: usize = state.players.iter().map(|p| p.hand.len()).sum();
        assert_eq!(in_hands + state.deck.len() + state.discard_pile.len(), 52);
    }

    #[test]
    fn test_same_seed_same_deal() {
        let registry = GameRegistry::with_builtin_games();
        let mut a = registry
            .create(&config("war", &["Ann", "Bo"]), Box::new(RecordingRenderer::new()))
            .unwrap();
        let mut b = registry
            .create(&config("war", &["Ann", "Bo"]), Box::new(RecordingRenderer::new()))
            .unwrap();
        a.start().unwrap();
        b.start().unwrap();

        assert_eq!(a.state(), b.state());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let registry = GameRegistry::with_builtin_games();
        let err = registry
            .create(&config("war", &["Ann", "Ann"]), Box::new(RecordingRenderer::new()))
            .err();
        assert!(matches!(err, Some(GameError::Config(_))));
    }
}
