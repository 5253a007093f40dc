//! Plain-text renderer for terminals.
//!
//! Generic over its input and output so tests can drive it with in-memory
//! buffers. Only the hands of "revealed" players are printed face up;
//! everyone else shows a card count.

use std::io::{BufRead, Write};

use crate::core::{GameError, Player, PlayerId, StateValue};
use crate::engine::EngineStatus;

use super::{RenderView, Renderer};

/// Console renderer over any line-based input and writer.
pub struct ConsoleRenderer<R, W> {
    input: R,
    output: W,
    reveal: Vec<PlayerId>,
}

impl<R: BufRead, W: Write> ConsoleRenderer<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            reveal: Vec::new(),
        }
    }

    /// Print these players' hands face up.
    #[must_use]
    pub fn revealing(mut self, players: impl IntoIterator<Item = PlayerId>) -> Self {
        self.reveal.extend(players);
        self
    }

    /// Consume the renderer, returning the writer.
    pub fn into_output(self) -> W {
        self.output
    }

    fn emit(&mut self, text: &str) {
        if let Err(err) = writeln!(self.output, "{}", text).and_then(|()| self.output.flush()) {
            log::warn!("console write failed: {}", err);
        }
    }

    fn read_line(&mut self) -> Result<String, GameError> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(GameError::Io("input closed".to_string()));
        }
        Ok(line.trim().to_string())
    }

    fn describe_value(value: &StateValue) -> Option<String> {
        match value {
            StateValue::Bool(v) => Some(v.to_string()),
            StateValue::Int(v) => Some(v.to_string()),
            StateValue::Text(s) if !s.is_empty() => Some(s.clone()),
            StateValue::Cards(cards) if !cards.is_empty() => Some(
                cards
                    .iter()
                    .map(|c| if c.face_up { c.name.clone() } else { "[hidden]".to_string() })
                    .collect::<Vec<_>>()
                    .join(", "),
            ),
            StateValue::Map(map) if !map.is_empty() => Some(
                map.iter()
                    .filter_map(|(k, v)| Self::describe_value(v).map(|d| format!("{}: {}", k, d)))
                    .collect::<Vec<_>>()
                    .join("; "),
            ),
            StateValue::List(items) if !items.is_empty() => Some(
                items
                    .iter()
                    .filter_map(Self::describe_value)
                    .collect::<Vec<_>>()
                    .join(", "),
            ),
            _ => None,
        }
    }
}

impl<R: BufRead, W: Write> Renderer for ConsoleRenderer<R, W> {
    fn render_game_state(&mut self, view: &RenderView<'_>) {
        let state = view.state;
        let mut lines = vec![
            String::new(),
            format!("=== {} | round {} | move {} ===", view.game, state.round, view.moves_played),
            format!(
                "Deck: {} card(s)  Discard: {} card(s)",
                state.deck.len(),
                state.discard_pile.len()
            ),
        ];

        for player in &state.players {
            let marker = if state.current_player_id.as_ref() == Some(&player.id) {
                ">"
            } else {
                " "
            };
            let mut line = format!(
                "{} {} ({}): {} card(s), score {}",
                marker,
                player.name,
                player.id,
                player.hand.len(),
                player.score
            );
            if self.reveal.contains(&player.id) && !player.hand.is_empty() {
                let cards: Vec<_> = player.hand.iter().map(|c| c.name.as_str()).collect();
                line.push_str(&format!("\n    hand: {}", cards.join(", ")));
            }
            lines.push(line);
        }

        for (key, value) in state.custom_entries() {
            if let Some(text) = Self::describe_value(value) {
                lines.push(format!("  {}: {}", key, text));
            }
        }

        if view.status == EngineStatus::Finished {
            lines.push("(game over)".to_string());
        }

        self.emit(&lines.join("\n"));
    }

    fn show_error(&mut self, message: &str) {
        self.emit(&format!("Error: {}", message));
    }

    fn show_game_over(&mut self, winners: &[Player]) {
        let text = match winners {
            [] => "Game over. No winner.".to_string(),
            [winner] => format!("Game over. {} wins with score {}!", winner.name, winner.score),
            _ => format!(
                "Game over. Tie between {}.",
                winners.iter().map(|p| p.name.as_str()).collect::<Vec<_>>().join(", ")
            ),
        };
        self.emit(&text);
    }

    fn show_message(&mut self, message: &str) {
        self.emit(message);
    }

    fn prompt_input(&mut self, prompt: &str) -> Result<String, GameError> {
        if let Err(err) = write!(self.output, "{} ", prompt).and_then(|()| self.output.flush()) {
            log::warn!("console write failed: {}", err);
        }
        self.read_line()
    }

    fn prompt_select(&mut self, prompt: &str, options: &[String]) -> Result<usize, GameError> {
        if options.is_empty() {
            return Err(GameError::Io("nothing to select".to_string()));
        }

        let mut menu = vec![prompt.to_string()];
        menu.extend(options.iter().enumerate().map(|(i, o)| format!("  {}) {}", i + 1, o)));
        self.emit(&menu.join("\n"));

        loop {
            let answer = self.prompt_input(&format!("Choose 1-{}:", options.len()))?;
            match answer.parse::<usize>() {
                Ok(n) if (1..=options.len()).contains(&n) => return Ok(n - 1),
                _ => self.emit(&format!("'{}' is not a valid choice.", answer)),
            }
        }
    }
}
