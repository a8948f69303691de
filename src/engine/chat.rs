use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde::Serialize;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};
use tracing::{debug, trace, warn};

use super::{Engine, lock};
use crate::events::{Event, EventBus};
use crate::identity::{Identity, IdentityAllocator};
use crate::list::{Entity, EntityList, Snapshot, normalize};
use crate::responder::{CannedResponder, Responder};

/// Who wrote a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Counterparty,
}

/// A single chat message. Immutable once created, never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub id: Identity,
    pub role: Role,
    pub content: String,
}

impl Entity for Message {
    fn identity(&self) -> Identity {
        self.id
    }
}

#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// Simulated latency between a user message and its reply.
    pub reply_delay: Duration,
    /// Fixed reply text used by the default responder.
    pub reply_content: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            reply_delay: crate::consts::DEFAULT_REPLY_DELAY,
            reply_content: crate::consts::DEFAULT_REPLY_CONTENT.to_string(),
        }
    }
}

impl ChatConfig {
    pub fn validate(&self) -> Result<()> {
        if self.reply_delay.is_zero() {
            bail!("reply delay must be positive");
        }
        if self.reply_content.trim().is_empty() {
            bail!("reply content must not be empty");
        }
        Ok(())
    }
}

struct State {
    messages: EntityList<Message>,
    /// Replies queued but not yet appended.
    pending: usize,
    disposed: bool,
}

struct Shared {
    state: Mutex<State>,
    allocator: Arc<dyn IdentityAllocator>,
    responder: Arc<dyn Responder>,
    bus: Arc<EventBus>,
}

impl Shared {
    /// Append the counterparty reply for `prompt`, unless torn down.
    fn inject_reply(&self, prompt: &str) {
        let content = self.responder.reply(prompt);
        let mut state = lock(&self.state);
        if state.disposed {
            warn!("reply fired after teardown, discarded");
            return;
        }
        let id = self.allocator.allocate();
        state.messages.push(Message {
            id,
            role: Role::Counterparty,
            content,
        });
        state.pending = state.pending.saturating_sub(1);
        debug!(%id, pending = state.pending, "reply appended");
        self.bus.emit(Event::MessagesChanged {
            messages: state.messages.snapshot(),
        });
    }
}

struct PendingReply {
    prompt: String,
    due: Instant,
}

/// Owns the chat transcript and the simulated counterparty.
///
/// Each user message schedules one reply `reply_delay` later. A single
/// worker task holds the only outstanding timer and delivers replies in
/// the order their sends happened; since the delay is fixed, due times
/// never go backwards. Dropping the engine cancels anything still pending.
pub struct ChatEngine {
    shared: Arc<Shared>,
    queue: mpsc::UnboundedSender<PendingReply>,
    worker: JoinHandle<()>,
    config: ChatConfig,
}

impl ChatEngine {
    /// Engine with the canned responder from `config`.
    /// Must be called from within a tokio runtime.
    pub fn new(
        config: ChatConfig,
        allocator: Arc<dyn IdentityAllocator>,
        bus: Arc<EventBus>,
    ) -> Result<Self> {
        let responder = Arc::new(CannedResponder::new(config.reply_content.clone()));
        Self::with_responder(config, allocator, responder, bus)
    }

    pub fn with_responder(
        config: ChatConfig,
        allocator: Arc<dyn IdentityAllocator>,
        responder: Arc<dyn Responder>,
        bus: Arc<EventBus>,
    ) -> Result<Self> {
        config.validate()?;
        let runtime = tokio::runtime::Handle::try_current()
            .context("chat engine needs a running tokio runtime")?;

        let shared = Arc::new(Shared {
            state: Mutex::new(State {
                messages: EntityList::new(),
                pending: 0,
                disposed: false,
            }),
            allocator,
            responder,
            bus,
        });
        let (queue, rx) = mpsc::unbounded_channel();
        let worker = runtime.spawn(deliver_replies(Arc::downgrade(&shared), rx));

        Ok(Self {
            shared,
            queue,
            worker,
            config,
        })
    }

    /// Append a user message now and schedule its reply.
    /// Blank text is ignored and schedules nothing.
    pub fn send_user(&self, raw: &str) -> Option<Identity> {
        let Some(content) = normalize(raw) else {
            trace!("ignoring blank message");
            return None;
        };

        let mut state = lock(&self.shared.state);
        if state.disposed {
            trace!("send after teardown ignored");
            return None;
        }

        let id = self.shared.allocator.allocate();
        let pending = PendingReply {
            prompt: content.clone(),
            due: Instant::now() + self.config.reply_delay,
        };
        state.messages.push(Message {
            id,
            role: Role::User,
            content,
        });
        // Queued under the lock so reply order always matches send order.
        if self.queue.send(pending).is_ok() {
            state.pending += 1;
        } else {
            warn!("reply worker gone, no reply will follow");
        }
        debug!(%id, pending = state.pending, "user message appended");
        self.shared.bus.emit(Event::MessagesChanged {
            messages: state.messages.snapshot(),
        });
        Some(id)
    }

    /// Current transcript, in arrival order.
    pub fn messages(&self) -> Snapshot<Message> {
        lock(&self.shared.state).messages.snapshot()
    }

    /// Replies scheduled but not yet delivered.
    pub fn pending_replies(&self) -> usize {
        lock(&self.shared.state).pending
    }

    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    /// Cancel outstanding replies. Idempotent; also runs on drop.
    pub fn shutdown(&self) {
        {
            let mut state = lock(&self.shared.state);
            if state.disposed {
                return;
            }
            state.disposed = true;
            if state.pending > 0 {
                debug!(pending = state.pending, "cancelling pending replies");
            }
            state.pending = 0;
        }
        self.worker.abort();
    }
}

impl Drop for ChatEngine {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl Engine for ChatEngine {
    fn submit(&self, raw: &str) -> Option<Identity> {
        self.send_user(raw)
    }

    fn len(&self) -> usize {
        lock(&self.shared.state).messages.len()
    }
}

async fn deliver_replies(shared: Weak<Shared>, mut queue: mpsc::UnboundedReceiver<PendingReply>) {
    while let Some(pending) = queue.recv().await {
        time::sleep_until(pending.due).await;
        let Some(engine) = shared.upgrade() else {
            warn!("chat engine gone, reply discarded");
            break;
        };
        engine.inject_reply(&pending.prompt);
    }
}
