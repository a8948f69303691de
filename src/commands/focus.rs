use async_trait::async_trait;

use super::{Command, CommandResult, SessionInfo, StateChange};
use crate::dashboard::Panel;

/// `/todo` and `/chat`. Bare, switches focus; with text, submits straight
/// to that panel without moving focus.
pub struct FocusCommand(pub Panel);

#[async_trait]
impl Command for FocusCommand {
    fn name(&self) -> &str {
        match self.0 {
            Panel::Todo => "/todo",
            Panel::Chat => "/chat",
        }
    }

    fn description(&self) -> &str {
        match self.0 {
            Panel::Todo => "focus the todo panel, or `/todo <text>` to add one",
            Panel::Chat => "focus the chat panel, or `/chat <text>` to send one",
        }
    }

    async fn execute(&self, args: &str, info: &SessionInfo<'_>) -> CommandResult {
        if args.is_empty() {
            return CommandResult::StateChanged(StateChange::Focus(self.0));
        }
        info.dashboard.submit(self.0, args);
        CommandResult::Handled
    }
}
