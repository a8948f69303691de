//! Project-wide constants.

use std::time::Duration;

/// Simulated "thinking" latency before the counterparty replies.
pub const DEFAULT_REPLY_DELAY: Duration = Duration::from_millis(800);

/// What the counterparty says. A stand-in until a real backend exists.
pub const DEFAULT_REPLY_CONTENT: &str = "🤖 Future AI reply";

/// Broadcast capacity for state-changed events.
pub const DEFAULT_EVENT_CAPACITY: usize = 64;

/// Empty-state hints shown by the renderer.
pub const EMPTY_TODOS_HINT: &str = "No todos yet. Add one above!";
pub const EMPTY_MESSAGES_HINT: &str = "No messages yet. Start a conversation!";
