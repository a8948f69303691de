//! Terminal rendering of both panels.
//!
//! Renderers only ever see snapshots. The todo renderer also receives the
//! engine's delete callback and hands back [`TodoRows`], which maps the row
//! numbers it printed to identities.

use std::io::{self, Write};

use clap::ValueEnum;
use serde::Serialize;

use crate::consts::{EMPTY_MESSAGES_HINT, EMPTY_TODOS_HINT};
use crate::engine::chat::{Message, Role};
use crate::engine::todo::{DeleteCallback, Todo};
use crate::identity::Identity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable panels.
    #[default]
    Text,
    /// One JSON object per redraw.
    Json,
}

#[derive(Serialize)]
#[serde(tag = "panel", rename_all = "lowercase")]
enum Frame<'a> {
    Todo { todos: &'a [Todo] },
    Chat { messages: &'a [Message] },
}

fn write_json<W: Write>(out: &mut W, frame: &Frame<'_>) -> io::Result<()> {
    serde_json::to_writer(&mut *out, frame)?;
    writeln!(out)
}

/// Rows as last rendered, bound to the engine's delete callback.
pub struct TodoRows {
    ids: Vec<Identity>,
    on_delete: DeleteCallback,
}

impl TodoRows {
    /// Delete the todo shown at 1-based `row`. Returns its identity, or
    /// `None` if no such row was rendered.
    pub fn delete(&self, row: usize) -> Option<Identity> {
        let id = *self.ids.get(row.checked_sub(1)?)?;
        (self.on_delete)(id);
        Some(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

pub fn render_todos<W: Write>(
    out: &mut W,
    todos: &[Todo],
    on_delete: DeleteCallback,
    format: OutputFormat,
) -> io::Result<TodoRows> {
    match format {
        OutputFormat::Json => write_json(out, &Frame::Todo { todos })?,
        OutputFormat::Text => {
            writeln!(out, "── my todos ──")?;
            if todos.is_empty() {
                writeln!(out, "  {EMPTY_TODOS_HINT}")?;
            }
            for (i, todo) in todos.iter().enumerate() {
                writeln!(out, "  {:>2}. {}", i + 1, todo.text)?;
            }
        }
    }
    Ok(TodoRows {
        ids: todos.iter().map(|t| t.id).collect(),
        on_delete,
    })
}

pub fn render_messages<W: Write>(
    out: &mut W,
    messages: &[Message],
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => write_json(out, &Frame::Chat { messages }),
        OutputFormat::Text => {
            writeln!(out, "── chat ──")?;
            if messages.is_empty() {
                writeln!(out, "  {EMPTY_MESSAGES_HINT}")?;
            }
            for message in messages {
                match message.role {
                    Role::User => writeln!(out, "  {:>40}", message.content)?,
                    Role::Counterparty => writeln!(out, "  {}", message.content)?,
                }
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use crate::identity::SequenceAllocator;

    fn todo(n: u64, text: &str) -> Todo {
        Todo {
            id: SequenceAllocator::nth(n),
            text: text.to_string(),
        }
    }

    fn recording() -> (DeleteCallback, Arc<Mutex<Vec<Identity>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let cb: DeleteCallback = Arc::new(move |id| sink.lock().unwrap().push(id));
        (cb, seen)
    }

    fn text_of(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn empty_todos_show_hint() {
        let (cb, _) = recording();
        let mut buf = Vec::new();
        let rows = render_todos(&mut buf, &[], cb, OutputFormat::Text).unwrap();
        assert!(rows.is_empty());
        assert!(text_of(buf).contains(EMPTY_TODOS_HINT));
    }

    #[test]
    fn todos_are_numbered_in_order() {
        let (cb, _) = recording();
        let mut buf = Vec::new();
        let todos = [todo(1, "Buy milk"), todo(2, "Walk dog")];
        render_todos(&mut buf, &todos, cb, OutputFormat::Text).unwrap();
        let out = text_of(buf);
        let milk = out.find(" 1. Buy milk").unwrap();
        let dog = out.find(" 2. Walk dog").unwrap();
        assert!(milk < dog);
    }

    #[test]
    fn row_delete_invokes_callback_with_identity() {
        let (cb, seen) = recording();
        let todos = [todo(7, "a"), todo(9, "b")];
        let rows = render_todos(&mut io::sink(), &todos, cb, OutputFormat::Text).unwrap();

        assert_eq!(rows.delete(2), Some(SequenceAllocator::nth(9)));
        assert_eq!(*seen.lock().unwrap(), vec![SequenceAllocator::nth(9)]);
    }

    #[test]
    fn out_of_range_rows_do_nothing() {
        let (cb, seen) = recording();
        let rows = render_todos(&mut io::sink(), &[todo(1, "a")], cb, OutputFormat::Text).unwrap();
        assert!(rows.delete(0).is_none());
        assert!(rows.delete(2).is_none());
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn empty_chat_shows_hint() {
        let mut buf = Vec::new();
        render_messages(&mut buf, &[], OutputFormat::Text).unwrap();
        assert!(text_of(buf).contains(EMPTY_MESSAGES_HINT));
    }

    #[test]
    fn chat_json_is_one_line_with_roles() {
        let messages = [
            Message {
                id: SequenceAllocator::nth(1),
                role: Role::User,
                content: "Hello".to_string(),
            },
            Message {
                id: SequenceAllocator::nth(2),
                role: Role::Counterparty,
                content: "Hi".to_string(),
            },
        ];
        let mut buf = Vec::new();
        render_messages(&mut buf, &messages, OutputFormat::Json).unwrap();
        let out = text_of(buf);
        assert_eq!(out.lines().count(), 1);

        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["panel"], "chat");
        assert_eq!(value["messages"][0]["role"], "user");
        assert_eq!(value["messages"][1]["role"], "counterparty");
        assert_eq!(value["messages"][1]["content"], "Hi");
    }

    #[test]
    fn todo_json_carries_identities() {
        let (cb, _) = recording();
        let mut buf = Vec::new();
        render_todos(&mut buf, &[todo(1, "Buy milk")], cb, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text_of(buf)).unwrap();
        assert_eq!(value["panel"], "todo");
        assert_eq!(value["todos"][0]["text"], "Buy milk");
        assert_eq!(
            value["todos"][0]["id"],
            "00000000-0000-0000-0000-000000000001"
        );
    }
}
