//! Session configuration.
//!
//! Built from CLI flags in main.rs and validated once up front. Nothing is
//! read from the environment and nothing is persisted.

use anyhow::{Context, Result, bail};

use crate::consts::DEFAULT_EVENT_CAPACITY;
use crate::engine::chat::ChatConfig;

#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub chat: ChatConfig,
    /// Broadcast capacity for state-changed events.
    pub event_capacity: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            chat: ChatConfig::default(),
            event_capacity: DEFAULT_EVENT_CAPACITY,
        }
    }
}

impl DashboardConfig {
    pub fn validate(&self) -> Result<()> {
        self.chat.validate().context("invalid chat configuration")?;
        if self.event_capacity == 0 {
            bail!("event capacity must be at least 1");
        }
        Ok(())
    }
}
