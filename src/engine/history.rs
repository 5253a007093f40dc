//! Snapshot history and move log.
//!
//! `History` keeps:
//! - `snapshots[0]`: the baseline, the freshly dealt game
//! - `snapshots[i]` for `i > 0`: the state just before accepted move `i`
//! - the move log, one `MoveRecord` per accepted move
//!
//! so `moves.len() == snapshots.len() - 1` whenever a baseline exists.
//! Snapshots are full `GameState` clones; with persistent containers the
//! copy is cheap and exact.

use serde::{Deserialize, Serialize};

use crate::core::{GameState, PlayerId};

/// A recorded move with metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord<M> {
    /// The player who made the move.
    pub player: PlayerId,

    /// The move payload.
    pub mv: M,

    /// Round in which the move was made.
    pub round: u32,
}

impl<M> MoveRecord<M> {
    #[must_use]
    pub fn new(player: PlayerId, mv: M, round: u32) -> Self {
        Self { player, mv, round }
    }
}

/// Linear snapshot history with a parallel move log.
#[derive(Clone, Debug)]
pub struct History<M> {
    snapshots: Vec<GameState>,
    moves: Vec<MoveRecord<M>>,
}

impl<M> Default for History<M> {
    fn default() -> Self {
        Self {
            snapshots: Vec::new(),
            moves: Vec::new(),
        }
    }
}

impl<M> History<M> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of snapshots, baseline included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Accepted moves, oldest first.
    #[must_use]
    pub fn moves(&self) -> &[MoveRecord<M>] {
        &self.moves
    }

    /// The baseline snapshot.
    #[must_use]
    pub fn baseline(&self) -> Option<&GameState> {
        self.snapshots.first()
    }

    /// The most recent snapshot.
    #[must_use]
    pub fn latest(&self) -> Option<&GameState> {
        self.snapshots.last()
    }

    /// Replace everything with a single baseline snapshot.
    pub fn reset(&mut self, baseline: GameState) {
        self.snapshots.clear();
        self.moves.clear();
        self.snapshots.push(baseline);
    }

    /// Record an accepted move with the state it was made from.
    pub fn push(&mut self, before: GameState, record: MoveRecord<M>) {
        self.snapshots.push(before);
        self.moves.push(record);
    }

    /// Remove the newest move, returning the state from before it.
    ///
    /// Returns `None` when only the baseline (or nothing) is left.
    pub fn pop(&mut self) -> Option<(GameState, MoveRecord<M>)> {
        if self.snapshots.len() <= 1 {
            return None;
        }
        let before = self.snapshots.pop()?;
        let record = self.moves.pop()?;
        Some((before, record))
    }

    /// Drop everything after the baseline. Returns a copy of the baseline.
    pub fn rewind(&mut self) -> Option<GameState> {
        self.snapshots.truncate(1);
        self.moves.clear();
        self.snapshots.first().cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_at(round: u32) -> GameState {
        GameState {
            round,
            ..GameState::new()
        }
    }

    fn record(round: u32) -> MoveRecord<&'static str> {
        MoveRecord::new(PlayerId::new("p1"), "play", round)
    }

    #[test]
    fn test_empty_history() {
        let mut history: History<&str> = History::new();

        assert!(history.is_empty());
        assert!(history.baseline().is_none());
        assert!(history.pop().is_none());
        assert!(history.rewind().is_none());
    }

    #[test]
    fn test_push_and_pop_keep_lockstep() {
        let mut history = History::new();
        history.reset(state_at(1));
        history.push(state_at(1), record(1));
        history.push(state_at(2), record(2));

        assert_eq!(history.len(), 3);
        assert_eq!(history.moves().len(), 2);

        let (before, rec) = history.pop().unwrap();
        assert_eq!(before.round, 2);
        assert_eq!(rec.round, 2);
        assert_eq!(history.moves().len(), history.len() - 1);
    }

    #[test]
    fn test_pop_never_removes_baseline() {
        let mut history = History::new();
        history.reset(state_at(1));
        history.push(state_at(1), record(1));

        assert!(history.pop().is_some());
        assert!(history.pop().is_none());
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_rewind() {
        let mut history = History::new();
        history.reset(state_at(1));
        history.push(state_at(5), record(5));
        history.push(state_at(6), record(6));

        let baseline = history.rewind().unwrap();
        assert_eq!(baseline.round, 1);
        assert_eq!(history.len(), 1);
        assert!(history.moves().is_empty());
        assert_eq!(history.latest().map(|s| s.round), Some(1));
    }
}
