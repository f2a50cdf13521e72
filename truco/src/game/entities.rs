use serde::{Deserialize, Serialize, Serializer};
use std::{collections::VecDeque, fmt};

use super::constants::{CARD_VALUES, MAX_PLAYERS};

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    Espada,
    Basto,
    Oro,
    Copa,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Espada, Suit::Basto, Suit::Oro, Suit::Copa];
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Espada => "espada",
            Self::Basto => "basto",
            Self::Oro => "oro",
            Self::Copa => "copa",
        };
        write!(f, "{repr}")
    }
}

/// Placeholder for card values.
pub type Value = u8;

/// A card is a tuple of a value and a suit. Two cards are equal when both
/// their value and suit match.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Card(pub Value, pub Suit);

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} de {}", self.0, self.1)
    }
}

/// Undealt cards of a game, consumed from the front.
///
/// A deck can only shrink once it has been built; there is no way to put
/// cards back into it.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Deck {
    cards: VecDeque<Card>,
}

impl Deck {
    pub fn new(cards: impl IntoIterator<Item = Card>) -> Self {
        Self {
            cards: cards.into_iter().collect(),
        }
    }

    /// The 40-card Spanish deck in suit-major order.
    pub fn spanish() -> Self {
        Self::new(
            Suit::ALL
                .into_iter()
                .flat_map(|suit| CARD_VALUES.into_iter().map(move |value| Card(value, suit))),
        )
    }

    pub fn shuffle(&mut self) {
        use rand::seq::SliceRandom;

        self.cards.make_contiguous().shuffle(&mut rand::rng());
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Take `count` cards off the front. Returns `None` and leaves the deck
    /// untouched if fewer than `count` cards remain.
    pub fn draw(&mut self, count: usize) -> Option<Vec<Card>> {
        if self.cards.len() < count {
            return None;
        }
        Some(self.cards.drain(..count).collect())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Player {
    pub id: String,
    pub name: String,
    pub hand: Vec<Card>,
    /// Positions in `hand` that have already been played this round.
    pub card_indices_played: Vec<usize>,
}

impl Player {
    pub fn new(id: String, name: String) -> Self {
        Self {
            id,
            name,
            hand: Vec::new(),
            card_indices_played: Vec::new(),
        }
    }

    /// Replace the hand with a freshly dealt one. Played indices refer to the
    /// old hand, so they are cleared too.
    pub fn with_hand(self, hand: Vec<Card>) -> Self {
        Self {
            hand,
            card_indices_played: Vec::new(),
            ..self
        }
    }

    pub fn is_played(&self, index: usize) -> bool {
        self.card_indices_played.contains(&index)
    }

    /// Cards from the hand that have not been played yet, in hand order.
    pub fn cards_remaining(&self) -> Vec<Card> {
        self.hand
            .iter()
            .enumerate()
            .filter(|(index, _)| !self.is_played(*index))
            .map(|(_, card)| *card)
            .collect()
    }

    pub fn summary(&self) -> PlayerSummary {
        PlayerSummary {
            id: self.id.clone(),
            name: self.name.clone(),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Game {
    pub id: String,
    pub name: String,
    pub players: Vec<Player>,
    #[serde(rename = "deck_size", serialize_with = "serialize_deck_size")]
    pub(crate) deck: Deck,
}

fn serialize_deck_size<S: Serializer>(deck: &Deck, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(deck.len() as u64)
}

impl Game {
    pub fn new(id: String, name: String, deck: Deck) -> Self {
        Self {
            id,
            name,
            players: Vec::new(),
            deck,
        }
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn deck_size(&self) -> usize {
        self.deck.len()
    }

    pub fn is_full(&self) -> bool {
        self.players.len() >= MAX_PLAYERS
    }

    pub fn summary(&self) -> GameSummary {
        GameSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            player_count: self.players.len(),
            max_players: MAX_PLAYERS,
        }
    }
}

/// Game list entry.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct GameSummary {
    pub id: String,
    pub name: String,
    pub player_count: usize,
    pub max_players: usize,
}

/// Player list entry.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct PlayerSummary {
    pub id: String,
    pub name: String,
}
