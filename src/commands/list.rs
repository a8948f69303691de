use async_trait::async_trait;

use super::{Command, CommandResult, SessionInfo, StateChange};

pub struct ListCommand;

#[async_trait]
impl Command for ListCommand {
    fn name(&self) -> &str {
        "/ls"
    }

    fn aliases(&self) -> &[&str] {
        &["/list"]
    }

    fn description(&self) -> &str {
        "redraw both panels"
    }

    async fn execute(&self, _args: &str, _info: &SessionInfo<'_>) -> CommandResult {
        CommandResult::StateChanged(StateChange::Redraw)
    }
}
