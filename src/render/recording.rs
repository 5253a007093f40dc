//! A renderer that records every call.
//!
//! Used by tests to assert exactly which effects the engine produced, and
//! by automated runs where nothing should be printed. Prompts are answered
//! from queued scripts; an exhausted script fails like closed input.

use std::collections::VecDeque;

use crate::core::{GameError, Player, PlayerId};
use crate::engine::EngineStatus;

use super::{RenderView, Renderer};

/// One recorded renderer call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenderEvent {
    State {
        round: u32,
        current: Option<PlayerId>,
        moves_played: usize,
        status: EngineStatus,
    },
    Error(String),
    GameOver(Vec<PlayerId>),
    Message(String),
}

/// Records renderer calls; answers prompts from scripts.
#[derive(Clone, Debug, Default)]
pub struct RecordingRenderer {
    events: Vec<RenderEvent>,
    inputs: VecDeque<String>,
    selections: VecDeque<usize>,
}

impl RecordingRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue answers for `prompt_input`.
    #[must_use]
    pub fn with_inputs<S: Into<String>>(mut self, inputs: impl IntoIterator<Item = S>) -> Self {
        self.inputs.extend(inputs.into_iter().map(Into::into));
        self
    }

    /// Queue answers for `prompt_select`.
    #[must_use]
    pub fn with_selections(mut self, selections: impl IntoIterator<Item = usize>) -> Self {
        self.selections.extend(selections);
        self
    }

    /// Every call so far, in order.
    #[must_use]
    pub fn events(&self) -> &[RenderEvent] {
        &self.events
    }

    /// Number of `render_game_state` calls.
    #[must_use]
    pub fn render_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, RenderEvent::State { .. }))
            .count()
    }

    /// Messages passed to `show_error`.
    #[must_use]
    pub fn errors(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                RenderEvent::Error(msg) => Some(msg.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Winners of every `show_game_over` call.
    #[must_use]
    pub fn game_overs(&self) -> Vec<&[PlayerId]> {
        self.events
            .iter()
            .filter_map(|e| match e {
                RenderEvent::GameOver(ids) => Some(ids.as_slice()),
                _ => None,
            })
            .collect()
    }

    /// Forget recorded events; scripts are kept.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl Renderer for RecordingRenderer {
    fn render_game_state(&mut self, view: &RenderView<'_>) {
        self.events.push(RenderEvent::State {
            round: view.state.round,
            current: view.state.current_player_id.clone(),
            moves_played: view.moves_played,
            status: view.status,
        });
    }

    fn show_error(&mut self, message: &str) {
        self.events.push(RenderEvent::Error(message.to_string()));
    }

    fn show_game_over(&mut self, winners: &[Player]) {
        self.events
            .push(RenderEvent::GameOver(winners.iter().map(|p| p.id.clone()).collect()));
    }

    fn show_message(&mut self, message: &str) {
        self.events.push(RenderEvent::Message(message.to_string()));
    }

    fn prompt_input(&mut self, _prompt: &str) -> Result<String, GameError> {
        self.inputs
            .pop_front()
            .ok_or_else(|| GameError::Io("input script exhausted".to_string()))
    }

    fn prompt_select(&mut self, _prompt: &str, options: &[String]) -> Result<usize, GameError> {
        let choice = self
            .selections
            .pop_front()
            .ok_or_else(|| GameError::Io("selection script exhausted".to_string()))?;
        if choice < options.len() {
            Ok(choice)
        } else {
            Err(GameError::Io(format!(
                "scripted selection {} out of range for {} options",
                choice,
                options.len()
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_in_order() {
        let mut renderer = RecordingRenderer::new();
        renderer.show_message("hello");
        renderer.show_error("bad");
        renderer.show_game_over(&[Player::new("p1", "Ann")]);

        assert_eq!(
            renderer.events(),
            &[
                RenderEvent::Message("hello".to_string()),
                RenderEvent::Error("bad".to_string()),
                RenderEvent::GameOver(vec![PlayerId::new("p1")]),
            ]
        );
        assert_eq!(renderer.errors(), vec!["bad"]);
        assert_eq!(renderer.render_count(), 0);

        renderer.clear();
        assert!(renderer.events().is_empty());
    }

    #[test]
    fn test_scripted_prompts() {
        let mut renderer = RecordingRenderer::new()
            .with_inputs(["yes"])
            .with_selections([1, 5]);
        let options = vec!["a".to_string(), "b".to_string()];

        assert_eq!(renderer.prompt_input("?").unwrap(), "yes");
        assert!(renderer.prompt_input("?").is_err());
        assert_eq!(renderer.prompt_select("?", &options).unwrap(), 1);
        assert!(renderer.prompt_select("?", &options).is_err());
        assert!(renderer.prompt_select("?", &options).is_err());
    }
}
