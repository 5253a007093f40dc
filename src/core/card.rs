//! Playing cards: identity, rank and suit.
//!
//! A `Card` is identified by its `id`. Two cards with the same id are the
//! same card, regardless of orientation. The only mutable property is
//! `face_up`.
//!
//! ## Id Convention
//!
//! Standard cards use ids of the form `"<rank>-<suit>"`:
//!
//! ```
//! use card_engine::core::{Card, Rank, Suit};
//!
//! let card = Card::standard(Rank::Ten, Suit::Hearts);
//! assert_eq!(card.id, "10-hearts");
//! assert_eq!(card.rank(), Some(Rank::Ten));
//! assert_eq!(card.suit(), Some(Suit::Hearts));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::GameError;

/// Card ranks from Two (low) to Ace (high).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    /// Label used in card ids ("2".."10", "J", "Q", "K", "A").
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
        }
    }

    /// Long name ("Seven", "Queen").
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Rank::Two => "Two",
            Rank::Three => "Three",
            Rank::Four => "Four",
            Rank::Five => "Five",
            Rank::Six => "Six",
            Rank::Seven => "Seven",
            Rank::Eight => "Eight",
            Rank::Nine => "Nine",
            Rank::Ten => "Ten",
            Rank::Jack => "Jack",
            Rank::Queen => "Queen",
            Rank::King => "King",
            Rank::Ace => "Ace",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Rank {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        Rank::ALL
            .iter()
            .copied()
            .find(|r| r.label() == upper || r.name().to_ascii_uppercase() == upper)
            .or(match upper.as_str() {
                "T" => Some(Rank::Ten),
                _ => None,
            })
            .ok_or_else(|| GameError::InvalidCard(s.to_string()))
    }
}

/// Card suits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];

    /// Label used in card ids.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Suit::Hearts => "hearts",
            Suit::Diamonds => "diamonds",
            Suit::Clubs => "clubs",
            Suit::Spades => "spades",
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Suit::Hearts => "Hearts",
            Suit::Diamonds => "Diamonds",
            Suit::Clubs => "Clubs",
            Suit::Spades => "Spades",
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Suit {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Suit::ALL
            .iter()
            .copied()
            .find(|suit| suit.label() == lower)
            .ok_or_else(|| GameError::InvalidCard(s.to_string()))
    }
}

/// A single card.
///
/// `==` compares every field, so a face-up card differs from the same card
/// face down; snapshots rely on that. Use [`Card::same_card`] to ask whether
/// two values are the same physical card.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    /// Unique, stable identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Is the card showing its face?
    pub face_up: bool,
}

impl Card {
    /// Create a face-down card.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            face_up: false,
        }
    }

    /// Create a standard card following the `"<rank>-<suit>"` id convention.
    #[must_use]
    pub fn standard(rank: Rank, suit: Suit) -> Self {
        Self::new(
            format!("{}-{}", rank.label(), suit.label()),
            format!("{} of {}", rank.name(), suit.name()),
        )
    }

    /// Parse a card from its id, e.g. `"Q-spades"`.
    pub fn parse(id: &str) -> Result<Self, GameError> {
        let (rank, suit) = id
            .split_once('-')
            .ok_or_else(|| GameError::InvalidCard(id.to_string()))?;
        Ok(Self::standard(rank.parse()?, suit.parse()?))
    }

    /// Rank encoded in the id, if it follows the standard convention.
    #[must_use]
    pub fn rank(&self) -> Option<Rank> {
        let (rank, _) = self.id.split_once('-')?;
        rank.parse().ok()
    }

    /// Suit encoded in the id, if it follows the standard convention.
    #[must_use]
    pub fn suit(&self) -> Option<Suit> {
        let (_, suit) = self.id.split_once('-')?;
        suit.parse().ok()
    }

    /// Same identity, regardless of name or facing.
    #[must_use]
    pub fn same_card(&self, other: &Card) -> bool {
        self.id == other.id
    }

    /// Return this card turned face up.
    #[must_use]
    pub fn revealed(mut self) -> Self {
        self.face_up = true;
        self
    }

    /// Return this card turned face down.
    #[must_use]
    pub fn concealed(mut self) -> Self {
        self.face_up = false;
        self
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// The 52 standard cards, suits outer and ranks inner, all face down.
#[must_use]
pub fn standard_deck() -> Vec<Card> {
    Suit::ALL
        .iter()
        .flat_map(|&suit| Rank::ALL.iter().map(move |&rank| Card::standard(rank, suit)))
        .collect()
}
