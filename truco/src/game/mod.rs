//! Truco game data.
//!
//! This module provides:
//! - Card, suit and deck types for the 40-card Spanish deck
//! - Player and game records with their small invariants
//! - Deck construction behind the [`deck::DeckFactory`] trait

pub mod constants;
pub mod deck;
pub mod entities;
