use std::sync::{Arc, Mutex};

use serde::Serialize;
use tracing::{debug, trace};

use super::{Engine, lock};
use crate::events::{Event, EventBus};
use crate::identity::{Identity, IdentityAllocator};
use crate::list::{Entity, EntityList, Snapshot, normalize};

/// A single todo. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Todo {
    pub id: Identity,
    pub text: String,
}

impl Entity for Todo {
    fn identity(&self) -> Identity {
        self.id
    }
}

/// Delete handle given to the renderer, bound to [`TodoEngine::remove`].
pub type DeleteCallback = Arc<dyn Fn(Identity) + Send + Sync>;

struct State {
    todos: EntityList<Todo>,
}

/// Owns the todo list. Append and delete-by-identity, nothing else.
pub struct TodoEngine {
    state: Arc<Mutex<State>>,
    allocator: Arc<dyn IdentityAllocator>,
    bus: Arc<EventBus>,
}

impl TodoEngine {
    pub fn new(allocator: Arc<dyn IdentityAllocator>, bus: Arc<EventBus>) -> Self {
        Self {
            state: Arc::new(Mutex::new(State {
                todos: EntityList::new(),
            })),
            allocator,
            bus,
        }
    }

    /// Append a todo with the trimmed text. Blank text is ignored.
    pub fn add(&self, raw: &str) -> Option<Identity> {
        let Some(text) = normalize(raw) else {
            trace!("ignoring blank todo");
            return None;
        };

        let id = self.allocator.allocate();
        let mut state = lock(&self.state);
        state.todos.push(Todo { id, text });
        debug!(%id, count = state.todos.len(), "todo added");
        // Emitted under the lock so events arrive in mutation order.
        self.bus.emit(Event::TodosChanged {
            todos: state.todos.snapshot(),
        });
        Some(id)
    }

    /// Remove the todo with `id`. Unknown ids are already satisfied.
    pub fn remove(&self, id: Identity) -> bool {
        remove_from(&self.state, &self.bus, id)
    }

    /// Current list, in insertion order.
    pub fn todos(&self) -> Snapshot<Todo> {
        lock(&self.state).todos.snapshot()
    }

    /// A callback the renderer can hold on to. Safe to call with stale ids.
    pub fn delete_callback(&self) -> DeleteCallback {
        let state = Arc::clone(&self.state);
        let bus = Arc::clone(&self.bus);
        Arc::new(move |id| {
            remove_from(&state, &bus, id);
        })
    }
}

fn remove_from(state: &Mutex<State>, bus: &EventBus, id: Identity) -> bool {
    let mut state = lock(state);
    if state.todos.remove(id).is_none() {
        trace!(%id, "remove of unknown todo ignored");
        return false;
    }
    debug!(%id, count = state.todos.len(), "todo removed");
    bus.emit(Event::TodosChanged {
        todos: state.todos.snapshot(),
    });
    true
}

impl Engine for TodoEngine {
    fn submit(&self, raw: &str) -> Option<Identity> {
        self.add(raw)
    }

    fn len(&self) -> usize {
        lock(&self.state).todos.len()
    }
}
