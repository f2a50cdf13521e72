//! Resolve games and players by id.
//!
//! On duplicate ids the last match wins. The store never admits duplicate
//! ids, so in practice there is at most one.

use super::{
    errors::{StoreError, StoreResult},
    manager::GameSlot,
};
use crate::game::entities::{Game, Player};

/// Find a game's position and slot in the store's ordered list.
pub(crate) fn find_game<'a>(games: &'a [GameSlot], id: &str) -> StoreResult<(usize, &'a GameSlot)> {
    games
        .iter()
        .enumerate()
        .rev()
        .find(|(_, slot)| slot.id == id)
        .ok_or_else(|| StoreError::game_not_found(id))
}

/// Find a player's position within a game.
pub(crate) fn find_player<'a>(game: &'a Game, id: &str) -> StoreResult<(usize, &'a Player)> {
    game.players
        .iter()
        .enumerate()
        .rev()
        .find(|(_, player)| player.id == id)
        .ok_or_else(|| StoreError::player_not_found(&game.id, id))
}
