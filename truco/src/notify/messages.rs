//! Change event types.

use serde::{Deserialize, Serialize};

/// Notification sent when store state changes
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChangeEvent {
    /// A game was created or deleted; refetch the game list
    GameListChanged,
    /// A game changed or was deleted; refetch its full state
    GameChanged { game_id: String },
    /// A player joined or left; refetch the game's player list
    PlayerListChanged { game_id: String },
}
