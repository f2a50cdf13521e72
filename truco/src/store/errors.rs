//! Store error types.

use std::fmt;
use thiserror::Error;

use crate::game::{deck::DeckError, entities::Card};

/// What a lookup was searching for
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EntityKind {
    Game,
    Player,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Game => write!(f, "game"),
            EntityKind::Player => write!(f, "player"),
        }
    }
}

/// Errors returned by store actions. None of them leave a partial write.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// Game or player id did not resolve
    #[error("{kind} with id \"{id}\" not found{}", in_game(.game_id))]
    NotFound {
        kind: EntityKind,
        id: String,
        game_id: Option<String>,
    },

    /// Game already seats the maximum number of players
    #[error("game {game_id} is full ({max_players} players), no more players can be added")]
    GameFull { game_id: String, max_players: usize },

    /// Deck cannot cover a new hand or a full deal
    #[error("deck not big enough: need {needed} cards, have {available}")]
    InsufficientDeck { needed: usize, available: usize },

    /// Played card is not part of the player's hand
    #[error("card {card} is not in the player's hand")]
    CardNotInHand { card: Card },

    /// Hand slot holding the card was already played
    #[error("card {card} already played in this hand (position {index}), cannot play card again")]
    AlreadyPlayed { card: Card, index: usize },

    /// Name was empty after trimming
    #[error("{kind} name must not be empty")]
    InvalidName { kind: EntityKind },

    /// Game could not be built
    #[error("failed to create game: {0}")]
    Creation(String),
}

fn in_game(game_id: &Option<String>) -> String {
    match game_id {
        Some(game_id) => format!(" in game {game_id}"),
        None => String::new(),
    }
}

impl StoreError {
    pub fn game_not_found(id: &str) -> Self {
        StoreError::NotFound {
            kind: EntityKind::Game,
            id: id.to_string(),
            game_id: None,
        }
    }

    pub fn player_not_found(game_id: &str, id: &str) -> Self {
        StoreError::NotFound {
            kind: EntityKind::Player,
            id: id.to_string(),
            game_id: Some(game_id.to_string()),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

impl From<DeckError> for StoreError {
    fn from(err: DeckError) -> Self {
        StoreError::Creation(err.to_string())
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;
