//! Change notifications.
//!
//! This module implements:
//! - [`ChangeListener`]: the port the store calls after every committed mutation
//! - [`ChangeBroadcaster`]: fan-out of [`ChangeEvent`]s to bounded mpsc subscribers
//! - [`NoopListener`]: discards every event
//!
//! Events carry no game state. They tell observers what to refetch: the game
//! list, one game, or one game's player list.

pub mod broadcaster;
pub mod listener;
pub mod messages;

pub use broadcaster::ChangeBroadcaster;
pub use listener::{ChangeListener, NoopListener};
pub use messages::ChangeEvent;
