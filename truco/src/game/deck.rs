//! Deck construction for new games.

use thiserror::Error;

use super::entities::{Card, Deck};

/// Deck construction errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeckError {
    /// Built deck had no cards
    #[error("deck construction produced no cards")]
    Empty,

    /// Any other failure reported by a factory
    #[error("deck construction failed: {0}")]
    Failed(String),
}

/// Builds the deck a new game starts with.
///
/// The store calls this once per created game and owns the result from then
/// on.
pub trait DeckFactory: Send + Sync {
    fn build(&self) -> Result<Deck, DeckError>;
}

/// Shuffled 40-card Spanish deck.
#[derive(Clone, Copy, Debug, Default)]
pub struct SpanishDeck;

impl DeckFactory for SpanishDeck {
    fn build(&self) -> Result<Deck, DeckError> {
        let mut deck = Deck::spanish();
        deck.shuffle();
        Ok(deck)
    }
}

/// Deals exactly the given cards, in order, to every game it builds.
#[derive(Clone, Debug)]
pub struct FixedDeck {
    cards: Vec<Card>,
}

impl FixedDeck {
    pub fn new(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// The first `count` cards of the unshuffled Spanish deck.
    pub fn first_of_spanish(count: usize) -> Self {
        Self::new(Deck::spanish().iter().take(count).copied().collect())
    }
}

impl DeckFactory for FixedDeck {
    fn build(&self) -> Result<Deck, DeckError> {
        if self.cards.is_empty() {
            return Err(DeckError::Empty);
        }
        Ok(Deck::new(self.cards.iter().copied()))
    }
}
