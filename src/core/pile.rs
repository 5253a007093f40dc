//! Card containers: ordered decks and insertion-ordered hands.
//!
//! Both containers are backed by `im::Vector`, so cloning a pile is O(1)
//! and the clone is fully independent: writes to one never show up in the
//! other. History snapshots rely on this.
//!
//! ## Deck Orientation
//!
//! Index 0 is the top of the deck. Drawing removes from the top,
//! `add_to_top` prepends and `add_to_bottom` appends.
//!
//! ```
//! use card_engine::core::{Card, Deck, PilePosition};
//!
//! let mut deck = Deck::new();
//! deck.add_to_top(Card::new("a", "A"));
//! deck.add_to_bottom(Card::new("b", "B"));
//! deck.add(Card::new("c", "C"), PilePosition::Top);
//!
//! assert_eq!(deck.draw().map(|c| c.id), Some("c".to_string()));
//! assert_eq!(deck.len(), 2);
//! ```

use im::Vector;
use serde::{Deserialize, Serialize};

use super::card::Card;
use super::rng::GameRng;

/// Where to insert a card into an ordered pile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PilePosition {
    /// Becomes the next card drawn.
    Top,
    /// Drawn last.
    Bottom,
}

/// An ordered pile of cards. Also used for the discard pile.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vector<Card>,
}

impl Deck {
    /// Create an empty deck.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a deck from cards, first card on top.
    pub fn from_cards(cards: impl IntoIterator<Item = Card>) -> Self {
        Self {
            cards: cards.into_iter().collect(),
        }
    }

    /// Create a full 52-card deck in standard order.
    #[must_use]
    pub fn standard() -> Self {
        Self::from_cards(super::card::standard_deck())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Look at the top card without removing it.
    #[must_use]
    pub fn peek(&self) -> Option<&Card> {
        self.cards.front()
    }

    /// Remove and return the top card.
    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop_front()
    }

    /// Draw up to `n` cards from the top, in draw order.
    pub fn draw_n(&mut self, n: usize) -> Vec<Card> {
        (0..n).map_while(|_| self.draw()).collect()
    }

    /// Put a card on top.
    pub fn add_to_top(&mut self, card: Card) {
        self.cards.push_front(card);
    }

    /// Put a card on the bottom.
    pub fn add_to_bottom(&mut self, card: Card) {
        self.cards.push_back(card);
    }

    /// Put a card at the given position.
    pub fn add(&mut self, card: Card, position: PilePosition) {
        match position {
            PilePosition::Top => self.add_to_top(card),
            PilePosition::Bottom => self.add_to_bottom(card),
        }
    }

    /// Shuffle the deck in place.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        let mut cards: Vec<Card> = self.cards.iter().cloned().collect();
        rng.shuffle(&mut cards);
        self.cards = cards.into_iter().collect();
    }

    /// Remove every card, returning them top first.
    pub fn take_all(&mut self) -> Vec<Card> {
        std::mem::take(&mut self.cards).into_iter().collect()
    }

    /// Check if a card with this id is in the deck.
    #[must_use]
    pub fn contains(&self, card_id: &str) -> bool {
        self.cards.iter().any(|c| c.id == card_id)
    }

    /// Iterate from top to bottom.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }
}

/// The cards held by one player, in the order they were received.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    cards: Vector<Card>,
}

impl Hand {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cards(cards: impl IntoIterator<Item = Card>) -> Self {
        Self {
            cards: cards.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Add a card after every card already held.
    pub fn add(&mut self, card: Card) {
        self.cards.push_back(card);
    }

    pub fn add_all(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.cards.extend(cards);
    }

    /// Remove a card by id.
    ///
    /// Returns `None` if the card is not in this hand.
    pub fn remove(&mut self, card_id: &str) -> Option<Card> {
        let pos = self.cards.iter().position(|c| c.id == card_id)?;
        Some(self.cards.remove(pos))
    }

    /// Remove every card matching `pred`, returning them in hand order.
    pub fn remove_where(&mut self, mut pred: impl FnMut(&Card) -> bool) -> Vec<Card> {
        let (taken, kept): (Vector<Card>, Vector<Card>) =
            std::mem::take(&mut self.cards).into_iter().partition(|c| pred(c));
        self.cards = kept;
        taken.into_iter().collect()
    }

    /// Remove and return the oldest card.
    pub fn take_front(&mut self) -> Option<Card> {
        self.cards.pop_front()
    }

    /// Remove up to `n` of the oldest cards.
    pub fn take_front_n(&mut self, n: usize) -> Vec<Card> {
        (0..n).map_while(|_| self.take_front()).collect()
    }

    #[must_use]
    pub fn contains(&self, card_id: &str) -> bool {
        self.cards.iter().any(|c| c.id == card_id)
    }

    /// Count cards matching `pred`.
    pub fn count_where(&self, mut pred: impl FnMut(&Card) -> bool) -> usize {
        self.cards.iter().filter(|c| pred(c)).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::card::{Rank, Suit};

    fn card(id: &str) -> Card {
        Card::new(id, id.to_uppercase())
    }

    #[test]
    fn test_draw_from_top() {
        let mut deck = Deck::from_cards(vec![card("a"), card("b"), card("c")]);

        assert_eq!(deck.peek().map(|c| c.id.as_str()), Some("a"));
        assert_eq!(deck.draw(), Some(card("a")));
        assert_eq!(deck.len(), 2);

        let drawn = deck.draw_n(5);
        assert_eq!(drawn, vec![card("b"), card("c")]);
        assert!(deck.is_empty());
        assert_eq!(deck.draw(), None);
    }

    #[test]
    fn test_add_top_and_bottom() {
        let mut deck = Deck::from_cards(vec![card("b")]);
        deck.add_to_top(card("a"));
        deck.add(card("c"), PilePosition::Bottom);

        let ids: Vec<_> = deck.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_shuffle_keeps_cards() {
        let mut deck = Deck::standard();
        let mut rng = GameRng::new(42);
        deck.shuffle(&mut rng);

        assert_eq!(deck.len(), 52);
        assert_ne!(deck, Deck::standard());
        assert!(deck.contains("A-spades"));
    }

    #[test]
    fn test_clone_is_independent() {
        let deck = Deck::standard();
        let mut copy = deck.clone();
        copy.draw();

        assert_eq!(deck.len(), 52);
        assert_eq!(copy.len(), 51);
    }

    #[test]
    fn test_hand_remove() {
        let mut hand = Hand::from_cards(vec![card("a"), card("b")]);

        assert_eq!(hand.remove("a"), Some(card("a")));
        assert_eq!(hand.remove("zzz"), None);
        assert_eq!(hand.len(), 1);
        assert!(hand.contains("b"));
    }

    #[test]
    fn test_hand_remove_where_preserves_order() {
        let mut hand = Hand::from_cards(vec![
            Card::standard(Rank::Seven, Suit::Hearts),
            Card::standard(Rank::Two, Suit::Clubs),
            Card::standard(Rank::Seven, Suit::Spades),
        ]);

        let sevens = hand.remove_where(|c| c.rank() == Some(Rank::Seven));
        let ids: Vec<_> = sevens.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["7-hearts", "7-spades"]);
        assert_eq!(hand.len(), 1);
        assert_eq!(hand.count_where(|c| c.rank() == Some(Rank::Seven)), 0);
    }

    #[test]
    fn test_hand_take_front() {
        let mut hand = Hand::new();
        hand.add_all(vec![card("a"), card("b"), card("c")]);

        assert_eq!(hand.take_front(), Some(card("a")));
        assert_eq!(hand.take_front_n(5), vec![card("b"), card("c")]);
        assert!(hand.is_empty());
    }
}
