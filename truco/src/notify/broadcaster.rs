//! Channel-based change broadcaster.

use parking_lot::Mutex;
use std::collections::HashMap;
use tokio::sync::mpsc;

use super::{listener::ChangeListener, messages::ChangeEvent};

/// Default per-subscriber buffer.
pub const DEFAULT_SUBSCRIBER_CAPACITY: usize = 64;

/// Fans change events out to any number of subscribers.
///
/// Each subscriber gets its own bounded channel. Sending never waits: when a
/// subscriber's buffer is full the event is dropped for that subscriber only,
/// and subscribers whose receiver was dropped are removed.
#[derive(Debug, Default)]
pub struct ChangeBroadcaster {
    subscribers: Mutex<Subscribers>,
}

#[derive(Debug, Default)]
struct Subscribers {
    next_id: u64,
    senders: HashMap<u64, mpsc::Sender<ChangeEvent>>,
}

impl ChangeBroadcaster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new subscriber with a buffer of `capacity` events.
    ///
    /// Dropping the returned receiver unsubscribes.
    pub fn subscribe(&self, capacity: usize) -> mpsc::Receiver<ChangeEvent> {
        let (sender, receiver) = mpsc::channel(capacity.max(1));

        let mut subscribers = self.subscribers.lock();
        let id = subscribers.next_id;
        subscribers.next_id += 1;
        subscribers.senders.insert(id, sender);

        log::debug!("Subscriber {} registered for change events", id);
        receiver
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().senders.len()
    }

    /// Broadcast an event to all subscribers
    pub fn broadcast(&self, event: ChangeEvent) {
        let mut subscribers = self.subscribers.lock();
        subscribers
            .senders
            .retain(|id, sender| match sender.try_send(event.clone()) {
                Ok(()) => true,
                Err(mpsc::error::TrySendError::Full(_)) => {
                    log::warn!("Subscriber {} channel full, dropping {:?}", id, event);
                    true
                }
                Err(mpsc::error::TrySendError::Closed(_)) => {
                    log::debug!("Subscriber {} disconnected, removing", id);
                    false
                }
            });
    }
}

impl ChangeListener for ChangeBroadcaster {
    fn on_game_list_changed(&self) {
        self.broadcast(ChangeEvent::GameListChanged);
    }

    fn on_game_changed(&self, game_id: &str) {
        self.broadcast(ChangeEvent::GameChanged {
            game_id: game_id.to_string(),
        });
    }

    fn on_player_list_changed(&self, game_id: &str) {
        self.broadcast(ChangeEvent::PlayerListChanged {
            game_id: game_id.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_every_subscriber_receives_event() {
        let broadcaster = ChangeBroadcaster::new();
        let mut first = broadcaster.subscribe(4);
        let mut second = broadcaster.subscribe(4);

        broadcaster.on_game_changed("g1");

        let expected = ChangeEvent::GameChanged {
            game_id: "g1".to_string(),
        };
        assert_eq!(first.recv().await, Some(expected.clone()));
        assert_eq!(second.recv().await, Some(expected));
    }

    #[tokio::test]
    async fn test_events_arrive_in_send_order() {
        let broadcaster = ChangeBroadcaster::new();
        let mut rx = broadcaster.subscribe(4);

        broadcaster.on_player_list_changed("g1");
        broadcaster.on_game_changed("g1");

        assert_eq!(
            rx.recv().await,
            Some(ChangeEvent::PlayerListChanged {
                game_id: "g1".to_string()
            })
        );
        assert_eq!(
            rx.recv().await,
            Some(ChangeEvent::GameChanged {
                game_id: "g1".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_full_subscriber_drops_event_but_stays() {
        let broadcaster = ChangeBroadcaster::new();
        let mut rx = broadcaster.subscribe(1);

        broadcaster.on_game_list_changed();
        broadcaster.on_game_changed("g1");

        assert_eq!(broadcaster.subscriber_count(), 1);
        assert_eq!(rx.recv().await, Some(ChangeEvent::GameListChanged));
        assert!(rx.try_recv().is_err());

        broadcaster.on_game_changed("g2");
        assert_eq!(
            rx.recv().await,
            Some(ChangeEvent::GameChanged {
                game_id: "g2".to_string()
            })
        );
    }

    #[test]
    fn test_dropped_receiver_is_removed() {
        let broadcaster = ChangeBroadcaster::new();
        let rx = broadcaster.subscribe(4);
        let _kept = broadcaster.subscribe(4);
        assert_eq!(broadcaster.subscriber_count(), 2);

        drop(rx);
        broadcaster.on_game_list_changed();
        assert_eq!(broadcaster.subscriber_count(), 1);
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let broadcaster = ChangeBroadcaster::new();
        let mut rx = broadcaster.subscribe(0);

        broadcaster.on_game_list_changed();
        assert_eq!(rx.try_recv().ok(), Some(ChangeEvent::GameListChanged));
    }

    #[test]
    fn test_event_json_shape() {
        let json = serde_json::to_string(&ChangeEvent::PlayerListChanged {
            game_id: "g1".to_string(),
        })
        .unwrap();
        assert_eq!(json, r#"{"type":"player_list_changed","game_id":"g1"}"#);

        let json = serde_json::to_string(&ChangeEvent::GameListChanged).unwrap();
        assert_eq!(json, r#"{"type":"game_list_changed"}"#);
    }
}
