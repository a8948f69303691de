use async_trait::async_trait;

use super::{Command, CommandResult, SessionInfo};

/// Delete a todo by the row number it was last drawn with.
pub struct RemoveCommand;

#[async_trait]
impl Command for RemoveCommand {
    fn name(&self) -> &str {
        "/rm"
    }

    fn aliases(&self) -> &[&str] {
        &["/del", "/done"]
    }

    fn description(&self) -> &str {
        "delete todo number N (`/rm 2`)"
    }

    async fn execute(&self, args: &str, info: &SessionInfo<'_>) -> CommandResult {
        let Ok(row) = args.parse::<usize>() else {
            eprintln!("  ✗ usage: /rm <row number>");
            return CommandResult::Handled;
        };
        let Some(rows) = info.rows else {
            eprintln!("  ✗ no todos shown yet");
            return CommandResult::Handled;
        };
        if rows.delete(row).is_none() {
            eprintln!("  ✗ no todo at row {row}");
        }
        CommandResult::Handled
    }
}
