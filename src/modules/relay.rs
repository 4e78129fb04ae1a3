use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::debug;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

pub const MESSAGE_PREFIX: &str = "Real-time update: ";

pub type ConnectionId = u64;

/// wrap a received message the way it is sent to all clients
pub fn decorate(message: &str) -> String {
    format!("{MESSAGE_PREFIX}{message}")
}

/// # connection registry
/// owns an outgoing queue for every connected realtime client.
///
/// connections are added when a socket opens and removed when it closes;
/// the socket task drains its queue into the socket.
#[derive(Clone, Default)]
pub struct Registry {
    connections: Arc<Mutex<HashMap<ConnectionId, UnboundedSender<String>>>>,
    next_id: Arc<AtomicU64>,
}

impl Registry {
    pub fn new() -> Registry {
        Registry::default()
    }

    fn connections(&self) -> MutexGuard<'_, HashMap<ConnectionId, UnboundedSender<String>>> {
        self.connections.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn add(&self) -> (ConnectionId, UnboundedReceiver<String>) {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (sender, receiver) = mpsc::unbounded_channel();
        self.connections().insert(id, sender);

        (id, receiver)
    }

    pub fn remove(&self, id: ConnectionId) {
        self.connections().remove(&id);
    }

    /// queue `message` for every connection, including the one that sent it.
    ///
    /// returns how many connections it was queued for. Closed queues are skipped.
    pub fn broadcast(&self, message: &str) -> usize {
        let connections = self.connections();
        let delivered = connections
            .values()
            .filter(|sender| sender.send(message.to_string()).is_ok())
            .count();

        debug!(target: "modules/relay:broadcast", "queued message for {}/{} connections", delivered, connections.len());
        delivered
    }

    pub fn len(&self) -> usize {
        self.connections().len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decorate_adds_prefix() {
        assert_eq!(decorate("berth 3 free"), "Real-time update: berth 3 free");
    }

    #[tokio::test]
    async fn broadcast_reaches_every_connection() {
        let registry = Registry::new();
        let (_a, mut a_rx) = registry.add();
        let (_b, mut b_rx) = registry.add();

        assert_eq!(registry.broadcast(&decorate("hello")), 2);

        assert_eq!(a_rx.recv().await.unwrap(), "Real-time update: hello");
        assert_eq!(b_rx.recv().await.unwrap(), "Real-time update: hello");
    }

    #[tokio::test]
    async fn removed_connection_gets_nothing() {
        let registry = Registry::new();
        let (a, mut a_rx) = registry.add();
        let (_b, mut b_rx) = registry.add();

        registry.remove(a);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.broadcast("only b"), 1);

        assert_eq!(b_rx.recv().await.unwrap(), "only b");
        // the registry held the only sender
        assert!(a_rx.recv().await.is_none());
    }

    #[test]
    fn dropped_receiver_is_skipped() {
        let registry = Registry::new();
        let (_a, a_rx) = registry.add();
        let (_b, _b_rx) = registry.add();
        drop(a_rx);

        assert_eq!(registry.broadcast("still fine"), 1);
    }

    #[test]
    fn ids_are_unique() {
        let registry = Registry::new();
        let (a, _a_rx) = registry.add();
        let (b, _b_rx) = registry.add();

        assert_ne!(a, b);
        assert_eq!(registry.len(), 2);

        registry.remove(a);
        registry.remove(b);
        assert!(registry.is_empty());
    }
}
