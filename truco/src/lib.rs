//! # Truco
//!
//! Authoritative in-memory state for multiplayer Truco games.
//!
//! The crate owns the collection of active games and enforces who may join,
//! deal and play. Every mutation goes through [`GameStore`], which serializes
//! work per game and reports each committed change through a
//! [`ChangeListener`].
//!
//! ## Core Modules
//!
//! - [`game`]: Cards, decks, players, games and deck construction
//! - [`store`]: The game store, lookups and the actions that mutate it
//! - [`notify`]: Change-notification port and a channel-based broadcaster
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use truco::{GameStore, NoopListener, SpanishDeck};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), truco::StoreError> {
//!     let store = GameStore::new(Arc::new(SpanishDeck), Arc::new(NoopListener));
//!
//!     let game = store.create_game("Mesa 1").await?;
//!     store.create_player(&game.id, "Ana").await?;
//!     store.create_player(&game.id, "Bo").await?;
//!     store.deal_cards(&game.id).await?;
//!
//!     Ok(())
//! }
//! ```

/// Cards, decks, players and games.
pub mod game;
pub use game::{
    constants::{self, MAX_PLAYERS, NUM_CARDS_IN_HAND},
    deck::{DeckError, DeckFactory, FixedDeck, SpanishDeck},
    entities::{self, Card, Deck, Game, GameSummary, Player, PlayerSummary, Suit},
};

/// Change notifications emitted after every committed mutation.
pub mod notify;
pub use notify::{ChangeBroadcaster, ChangeEvent, ChangeListener, NoopListener};

/// The game store and the actions that mutate it.
pub mod store;
pub use store::{EntityKind, GameStore, StoreError, StoreResult};
