//! Opaque identities for list entities.
//!
//! Identities only need to be unique within one list, so there is no
//! global registry. Engines take an [`IdentityAllocator`] so tests can
//! swap in a deterministic one.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use uuid::Uuid;

/// An opaque token distinguishing entities within one list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Identity(Uuid);

impl Identity {
    /// Short prefix for display in the REPL.
    pub fn short(&self) -> String {
        self.0.simple().to_string()[..8].to_string()
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short())
    }
}

/// Produces fresh identities. Never fails.
pub trait IdentityAllocator: Send + Sync {
    fn allocate(&self) -> Identity;
}

/// Random v4 UUIDs. The default.
#[derive(Debug, Default)]
pub struct RandomAllocator;

impl IdentityAllocator for RandomAllocator {
    fn allocate(&self) -> Identity {
        Identity(Uuid::new_v4())
    }
}

/// Deterministic identities for tests: 1, 2, 3, ...
#[derive(Debug, Default)]
pub struct SequenceAllocator {
    next: AtomicU64,
}

impl SequenceAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// The identity the `n`th allocation (1-based) returns.
    pub fn nth(n: u64) -> Identity {
        Identity(Uuid::from_u128(n as u128))
    }
}

impl IdentityAllocator for SequenceAllocator {
    fn allocate(&self) -> Identity {
        let n = self.next.fetch_add(1, Ordering::SeqCst) + 1;
        Self::nth(n)
    }
}
