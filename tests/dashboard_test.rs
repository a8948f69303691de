use std::sync::Arc;
use std::time::Duration;

use dashboard::config::DashboardConfig;
use dashboard::dashboard::{Dashboard, Panel};
use dashboard::engine::chat::{ChatConfig, Role};
use dashboard::events::Event;
use dashboard::identity::SequenceAllocator;
use dashboard::render::{OutputFormat, render_todos};
use dashboard::responder::CannedResponder;
use tokio::time;

fn build_dashboard() -> Dashboard {
    let config = DashboardConfig {
        chat: ChatConfig {
            reply_delay: Duration::from_millis(100),
            reply_content: "ok".to_string(),
        },
        ..DashboardConfig::default()
    };
    Dashboard::with_parts(
        config.clone(),
        Arc::new(SequenceAllocator::new()),
        Arc::new(SequenceAllocator::new()),
        Arc::new(CannedResponder::new(config.chat.reply_content.clone())),
    )
    .unwrap()
}

#[tokio::test(start_paused = true)]
async fn panels_keep_separate_lists() {
    let dash = build_dashboard();

    let todo_id = dash.submit(Panel::Todo, "Buy milk").unwrap();
    let chat_id = dash.submit(Panel::Chat, "Hello").unwrap();

    // Same allocator sequence per panel; identities only matter per list.
    assert_eq!(todo_id, chat_id);

    dash.todo().remove(chat_id);
    assert!(dash.todo().todos().is_empty());
    assert_eq!(dash.chat().messages().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn one_bus_carries_both_panels() {
    let dash = build_dashboard();
    let mut rx = dash.bus().subscribe();

    dash.submit(Panel::Todo, "Buy milk");
    dash.submit(Panel::Chat, "Hello");
    time::sleep(Duration::from_millis(150)).await;

    let mut kinds = Vec::new();
    while let Ok(event) = rx.try_recv() {
        kinds.push(match event {
            Event::TodosChanged { .. } => "todos",
            Event::MessagesChanged { .. } => "messages",
        });
    }
    assert_eq!(kinds, vec!["todos", "messages", "messages"]);
    assert_eq!(dash.chat().messages()[1].role, Role::Counterparty);
    assert_eq!(dash.chat().messages()[1].content, "ok");
}

#[tokio::test(start_paused = true)]
async fn rendered_rows_delete_through_engine() {
    let dash = build_dashboard();
    dash.submit(Panel::Todo, "Buy milk");
    dash.submit(Panel::Todo, "Walk dog");

    let rows = render_todos(
        &mut std::io::sink(),
        &dash.todo().todos(),
        dash.todo().delete_callback(),
        OutputFormat::Text,
    )
    .unwrap();
    assert_eq!(rows.len(), 2);

    rows.delete(1);
    let todos = dash.todo().todos();
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0].text, "Walk dog");
}

#[tokio::test(start_paused = true)]
async fn shutdown_cancels_pending_chat_replies() {
    let dash = build_dashboard();
    dash.submit(Panel::Chat, "Hello");
    dash.shutdown();

    time::sleep(Duration::from_secs(1)).await;
    assert_eq!(dash.counts(), (0, 1));
}

#[tokio::test(start_paused = true)]
async fn dropping_dashboard_with_pending_reply_is_safe() {
    let dash = build_dashboard();
    let mut rx = dash.bus().subscribe();
    dash.submit(Panel::Chat, "Hello");
    drop(dash);

    time::sleep(Duration::from_secs(1)).await;
    assert!(matches!(rx.try_recv(), Ok(Event::MessagesChanged { .. })));
    assert!(rx.try_recv().is_err());
}
