//! Game store providing the single source of truth for active games.
//!
//! This module implements:
//! - GameStore: ordered collection of games with per-game locking
//! - Lookup of games by id and of players within a game
//! - The actions that create, delete, deal and play
//! - Typed errors for every rejected action
//!
//! ## Concurrency
//!
//! The game list sits behind a `RwLock` and every game behind its own
//! `Mutex`. Per-game actions hold the list read lock plus that game's mutex
//! for their whole read-modify-write, so different games never wait on each
//! other while two actions on the same game run one after the other.
//! Creating or deleting a game takes the list write lock.

pub mod actions;
pub mod errors;
pub(crate) mod lookup;
pub mod manager;

pub use errors::{EntityKind, StoreError, StoreResult};
pub use manager::GameStore;
