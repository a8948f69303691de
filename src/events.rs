//! State-changed notifications from the engines to whatever renders them.
//!
//! Engines emit via [`EventBus::emit`] after every mutation; renderers
//! subscribe via [`EventBus::subscribe`]. Built on [`tokio::sync::broadcast`]
//! so the REPL and tests can listen independently. Events carry a full
//! [`Snapshot`], never a reference into engine state.

use tokio::sync::broadcast;

use crate::engine::chat::Message;
use crate::engine::todo::Todo;
use crate::list::Snapshot;

/// Events that flow through the system.
#[derive(Debug, Clone)]
pub enum Event {
    /// The todo list changed (carries the new full list).
    TodosChanged { todos: Snapshot<Todo> },
    /// The chat transcript changed (carries the new full transcript).
    MessagesChanged { messages: Snapshot<Message> },
}

/// A broadcast channel that any component can emit to or subscribe from.
#[derive(Debug)]
pub struct EventBus {
    tx: broadcast::Sender<Event>,
}

impl EventBus {
    /// Create a new event bus with the given channel capacity.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Emit an event to all current subscribers.
    /// Returns the number of receivers that will see it.
    pub fn emit(&self, event: Event) -> usize {
        self.tx.send(event).unwrap_or(0)
    }

    /// Subscribe to events. Returns a receiver that yields all
    /// future events (does not replay past ones).
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.tx.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(crate::consts::DEFAULT_EVENT_CAPACITY)
    }
}
