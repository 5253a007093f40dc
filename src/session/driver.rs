//! Play loops.
//!
//! - `run_automated`: every seat picks uniformly among its legal moves
//! - `run_interactive`: human seats choose from a menu of legal moves plus
//!   `undo`, `restart` and `quit`; the other seats are automated. `undo`
//!   steps back past automated moves to the last human decision
//!
//! Both count completed turns and stop at `max_turns`. Errors reported by
//! the engine have already been shown to the player, so the loops carry
//! on; only prompt failures end a run early.

use std::thread;
use std::time::Duration;

use crate::core::{GameError, GameRng, PlayerId};

use super::Session;

/// Outcome of a driver run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunSummary {
    /// Completed turns.
    pub turns: usize,
    /// The rules declared the game over.
    pub finished: bool,
    /// Winners, empty unless finished.
    pub winners: Vec<PlayerId>,
    /// A human chose to quit.
    pub quit: bool,
}

impl RunSummary {
    fn of(session: &dyn Session, turns: usize, quit: bool) -> Self {
        Self {
            turns,
            finished: session.is_finished(),
            winners: session.winners(),
            quit,
        }
    }
}

/// Play one uniformly random legal move for the current player.
///
/// Returns `Ok(false)` when the current player has no legal move.
pub fn play_auto_turn(session: &mut dyn Session, rng: &mut GameRng) -> Result<bool, GameError> {
    let choices = session.move_labels().len();
    if choices == 0 {
        return Ok(false);
    }
    let index = rng.gen_range_usize(0..choices);
    session.play_choice(index)?;
    Ok(true)
}

/// Play automatically until the game ends, nobody can move, or
/// `max_turns` turns have been completed.
pub fn run_automated(
    session: &mut dyn Session,
    rng: &mut GameRng,
    max_turns: usize,
    delay: Duration,
) -> Result<RunSummary, GameError> {
    let mut turns = 0;
    while !session.is_finished() && turns < max_turns {
        if !play_auto_turn(session, rng)? {
            log::warn!(
                "{} stalled: {:?} has no legal move",
                session.game(),
                session.current_player_id()
            );
            break;
        }
        turns += 1;
        if !delay.is_zero() {
            thread::sleep(delay);
        }
    }

    if !session.is_finished() && turns >= max_turns {
        log::info!("{} stopped after {} turn(s)", session.game(), turns);
    }
    Ok(RunSummary::of(session, turns, false))
}

const UNDO: &str = "undo";
const RESTART: &str = "restart";
const QUIT: &str = "quit";

/// Play with humans at the seats `is_human` accepts.
pub fn run_interactive(
    session: &mut dyn Session,
    is_human: &dyn Fn(&PlayerId) -> bool,
    rng: &mut GameRng,
    max_turns: usize,
    delay: Duration,
) -> Result<RunSummary, GameError> {
    let mut turns = 0;
    loop {
        if turns >= max_turns {
            session.renderer_mut().show_message("Turn limit reached.");
            return Ok(RunSummary::of(session, turns, false));
        }

        if session.is_finished() {
            let options = [RESTART.to_string(), QUIT.to_string()];
            match session.renderer_mut().prompt_select("Play again?", &options)? {
                0 => {
                    if session.restart().is_ok() {
                        turns = 0;
                    }
                    continue;
                }
                _ => return Ok(RunSummary::of(session, turns, false)),
            }
        }

        let Some(current) = session.current_player_id() else {
            return Ok(RunSummary::of(session, turns, false));
        };

        if !is_human(&current) {
            if !play_auto_turn(session, rng)? {
                log::warn!("{} has no legal move", current);
                return Ok(RunSummary::of(session, turns, false));
            }
            turns += 1;
            if !delay.is_zero() {
                thread::sleep(delay);
            }
            continue;
        }

        let mut options = session.move_labels();
        let moves = options.len();
        options.extend([UNDO, RESTART, QUIT].map(String::from));
        let name = session
            .state()
            .player_by_id(&current)
            .map_or_else(|| current.to_string(), |p| p.name.clone());

        let choice = session
            .renderer_mut()
            .prompt_select(&format!("{}, your move:", name), &options)?;
        let outcome = match choice {
            i if i < moves => session.play_choice(i).map(|()| turns += 1),
            i if i == moves => {
                undo_to_human(session, is_human).map(|undone| turns = turns.saturating_sub(undone))
            }
            i if i == moves + 1 => session.restart().map(|()| turns = 0),
            _ => return Ok(RunSummary::of(session, turns, true)),
        };
        if let Err(err) = outcome {
            log::debug!("choice {} rejected: {}", choice, err);
        }
    }
}

/// Undo at least one move, then keep undoing automated moves until a
/// human is on move again or only the baseline is left. Returns the number
/// of moves undone.
fn undo_to_human(session: &mut dyn Session, is_human: &dyn Fn(&PlayerId) -> bool) -> Result<usize, GameError> {
    session.undo()?;
    let mut undone = 1;
    while session.moves_played() > 0 && !session.current_player_id().is_some_and(|id| is_human(&id)) {
        session.undo()?;
        undone += 1;
    }
    Ok(undone)
}
