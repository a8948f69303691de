//! The two panels side by side.
//!
//! Each panel gets its own engine and its own identity allocator; the
//! engines never touch each other's lists. They share one event bus so a
//! single renderer can follow both.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::{Result, bail};
use tracing::debug;

use crate::config::DashboardConfig;
use crate::engine::Engine;
use crate::engine::chat::ChatEngine;
use crate::engine::todo::TodoEngine;
use crate::events::EventBus;
use crate::identity::{Identity, IdentityAllocator, RandomAllocator};
use crate::responder::Responder;

/// Which panel plain input goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Panel {
    #[default]
    Todo,
    Chat,
}

impl fmt::Display for Panel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Panel::Todo => write!(f, "todo"),
            Panel::Chat => write!(f, "chat"),
        }
    }
}

impl FromStr for Panel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "todo" | "todos" => Ok(Panel::Todo),
            "chat" => Ok(Panel::Chat),
            other => bail!("unknown panel: {other}"),
        }
    }
}

pub struct Dashboard {
    bus: Arc<EventBus>,
    todo: TodoEngine,
    chat: ChatEngine,
}

impl Dashboard {
    /// Build both engines with random identities and the canned responder.
    /// Must be called from within a tokio runtime.
    pub fn new(config: DashboardConfig) -> Result<Self> {
        config.validate()?;
        let bus = Arc::new(EventBus::new(config.event_capacity));
        let todo = TodoEngine::new(Arc::new(RandomAllocator), Arc::clone(&bus));
        let chat = ChatEngine::new(config.chat, Arc::new(RandomAllocator), Arc::clone(&bus))?;
        Ok(Self { bus, todo, chat })
    }

    /// Like [`Dashboard::new`] but with injected collaborators (for tests).
    pub fn with_parts(
        config: DashboardConfig,
        todo_ids: Arc<dyn IdentityAllocator>,
        chat_ids: Arc<dyn IdentityAllocator>,
        responder: Arc<dyn Responder>,
    ) -> Result<Self> {
        config.validate()?;
        let bus = Arc::new(EventBus::new(config.event_capacity));
        let todo = TodoEngine::new(todo_ids, Arc::clone(&bus));
        let chat = ChatEngine::with_responder(config.chat, chat_ids, responder, Arc::clone(&bus))?;
        Ok(Self { bus, todo, chat })
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn todo(&self) -> &TodoEngine {
        &self.todo
    }

    pub fn chat(&self) -> &ChatEngine {
        &self.chat
    }

    fn engine(&self, panel: Panel) -> &dyn Engine {
        match panel {
            Panel::Todo => &self.todo,
            Panel::Chat => &self.chat,
        }
    }

    /// Forward a form submission to the given panel.
    pub fn submit(&self, panel: Panel, raw: &str) -> Option<Identity> {
        let id = self.engine(panel).submit(raw);
        if id.is_none() {
            debug!(%panel, "submission ignored");
        }
        id
    }

    /// Entity count per panel, for the session summary.
    pub fn counts(&self) -> (usize, usize) {
        (self.todo.len(), self.chat.len())
    }

    /// Tear down. Pending chat replies are cancelled.
    pub fn shutdown(&self) {
        self.chat.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panel_parses_case_insensitively() {
        assert_eq!("Todo".parse::<Panel>().unwrap(), Panel::Todo);
        assert_eq!("todos".parse::<Panel>().unwrap(), Panel::Todo);
        assert_eq!(" CHAT ".parse::<Panel>().unwrap(), Panel::Chat);
        assert!("notes".parse::<Panel>().is_err());
    }

    #[test]
    fn panel_display_roundtrips() {
        for panel in [Panel::Todo, Panel::Chat] {
            assert_eq!(panel.to_string().parse::<Panel>().unwrap(), panel);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn submit_routes_to_focused_panel() {
        let dash = Dashboard::new(DashboardConfig::default()).unwrap();
        dash.submit(Panel::Todo, "Buy milk");
        dash.submit(Panel::Chat, "Hello");
        dash.submit(Panel::Chat, "  ");
        assert_eq!(dash.counts(), (1, 1));
    }

    #[tokio::test(start_paused = true)]
    async fn invalid_config_rejected() {
        let config = DashboardConfig {
            event_capacity: 0,
            ..DashboardConfig::default()
        };
        assert!(Dashboard::new(config).is_err());
    }
}
