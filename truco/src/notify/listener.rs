//! The change-notification port.

/// Receives a call after each committed store mutation.
///
/// Implementations are invoked from the task that performed the mutation,
/// after its locks are released, and must return without blocking. Slow
/// delivery belongs behind a channel (see
/// [`ChangeBroadcaster`](super::ChangeBroadcaster)).
///
/// For one mutation, list events always arrive before the game event.
pub trait ChangeListener: Send + Sync {
    fn on_game_list_changed(&self);

    /// Also sent when the game is deleted. Observers should treat a game
    /// that can no longer be fetched as gone for good.
    fn on_game_changed(&self, game_id: &str);

    fn on_player_list_changed(&self, game_id: &str);
}

/// Listener that ignores every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopListener;

impl ChangeListener for NoopListener {
    fn on_game_list_changed(&self) {}

    fn on_game_changed(&self, _game_id: &str) {}

    fn on_player_list_changed(&self, _game_id: &str) {}
}
