//! Values stored in a game's custom state.
//!
//! Rules keep game-specific flags, counters and structures in
//! `GameState::custom_state`. The engine never interprets them.
//!
//! ## StateValue Types
//!
//! - `Null`: Explicitly cleared entry (treated as absent)
//! - `Bool`: Flags (war in progress, extra turn pending)
//! - `Int`: Counters
//! - `Text`: Messages (last action)
//! - `Cards`: Cards held by the rules themselves (cards in play)
//! - `List`, `Map`: Nested structures (books per player)

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::card::Card;

/// A custom-state value. Pure data, so snapshots can copy it freely.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StateValue {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Text(String),
    Cards(Vec<Card>),
    List(Vec<StateValue>),
    Map(BTreeMap<String, StateValue>),
}

impl StateValue {
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, StateValue::Null)
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            StateValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            StateValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            StateValue::Text(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_cards(&self) -> Option<&[Card]> {
        match self {
            StateValue::Cards(cards) => Some(cards),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[StateValue]> {
        match self {
            StateValue::List(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_map(&self) -> Option<&BTreeMap<String, StateValue>> {
        match self {
            StateValue::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Every card reachable from this value, depth first.
    pub fn cards(&self) -> Vec<&Card> {
        match self {
            StateValue::Cards(cards) => cards.iter().collect(),
            StateValue::List(items) => items.iter().flat_map(StateValue::cards).collect(),
            StateValue::Map(map) => map.values().flat_map(StateValue::cards).collect(),
            _ => Vec::new(),
        }
    }
}

impl From<bool> for StateValue {
    fn from(v: bool) -> Self {
        StateValue::Bool(v)
    }
}

impl From<i64> for StateValue {
    fn from(v: i64) -> Self {
        StateValue::Int(v)
    }
}

impl From<i32> for StateValue {
    fn from(v: i32) -> Self {
        StateValue::Int(v as i64)
    }
}

impl From<usize> for StateValue {
    fn from(v: usize) -> Self {
        StateValue::Int(v as i64)
    }
}

impl From<String> for StateValue {
    fn from(v: String) -> Self {
        StateValue::Text(v)
    }
}

impl From<&str> for StateValue {
    fn from(v: &str) -> Self {
        StateValue::Text(v.to_string())
    }
}

impl From<Vec<Card>> for StateValue {
    fn from(v: Vec<Card>) -> Self {
        StateValue::Cards(v)
    }
}

impl From<Vec<StateValue>> for StateValue {
    fn from(v: Vec<StateValue>) -> Self {
        StateValue::List(v)
    }
}

impl From<BTreeMap<String, StateValue>> for StateValue {
    fn from(v: BTreeMap<String, StateValue>) -> Self {
        StateValue::Map(v)
    }
}

impl<T: Into<StateValue>> From<Option<T>> for StateValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(StateValue::Null, Into::into)
    }
}
