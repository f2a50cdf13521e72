//! Game store holding every active game.

use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use super::{errors::StoreResult, lookup};
use crate::{
    game::{
        deck::DeckFactory,
        entities::{Game, GameSummary, PlayerSummary},
    },
    notify::ChangeListener,
};

/// One game in the store.
///
/// The id is kept outside the mutex so lookups never wait on a busy game. It
/// never changes for the slot's lifetime.
#[derive(Debug)]
pub(crate) struct GameSlot {
    pub(crate) id: String,
    pub(crate) game: Mutex<Game>,
}

impl GameSlot {
    pub(crate) fn new(game: Game) -> Self {
        Self {
            id: game.id.clone(),
            game: Mutex::new(game),
        }
    }
}

/// Ordered collection of games and the only place they are mutated.
pub struct GameStore {
    /// Games in creation order
    pub(crate) games: RwLock<Vec<GameSlot>>,

    /// Builds the deck for each new game
    pub(crate) deck_factory: Arc<dyn DeckFactory>,

    /// Told about every committed change
    pub(crate) listener: Arc<dyn ChangeListener>,
}

impl GameStore {
    /// Create an empty store
    ///
    /// # Arguments
    ///
    /// * `deck_factory` - Builds the starting deck of each new game
    /// * `listener` - Receives change notifications after each mutation
    pub fn new(deck_factory: Arc<dyn DeckFactory>, listener: Arc<dyn ChangeListener>) -> Self {
        Self {
            games: RwLock::new(Vec::new()),
            deck_factory,
            listener,
        }
    }

    /// Snapshot of every game, in creation order.
    pub async fn all_games(&self) -> Vec<Game> {
        let games = self.games.read().await;
        let mut snapshot = Vec::with_capacity(games.len());
        for slot in games.iter() {
            snapshot.push(slot.game.lock().await.clone());
        }
        snapshot
    }

    /// Snapshot of one game.
    pub async fn game(&self, game_id: &str) -> StoreResult<Game> {
        let games = self.games.read().await;
        let (_, slot) = lookup::find_game(&games, game_id)?;
        let game = slot.game.lock().await.clone();
        Ok(game)
    }

    /// List entries for every game, in creation order.
    pub async fn game_summaries(&self) -> Vec<GameSummary> {
        let games = self.games.read().await;
        let mut summaries = Vec::with_capacity(games.len());
        for slot in games.iter() {
            summaries.push(slot.game.lock().await.summary());
        }
        summaries
    }

    /// List entries for one game's players, in seating order.
    pub async fn player_summaries(&self, game_id: &str) -> StoreResult<Vec<PlayerSummary>> {
        let games = self.games.read().await;
        let (_, slot) = lookup::find_game(&games, game_id)?;
        let game = slot.game.lock().await;
        Ok(game.players.iter().map(|player| player.summary()).collect())
    }

    pub async fn game_count(&self) -> usize {
        self.games.read().await.len()
    }
}
