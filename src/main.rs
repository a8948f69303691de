use std::io::{self, Write};
use std::time::Duration;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use dashboard::banner::{BannerInfo, print_banner, print_session_summary};
use dashboard::commands::{CommandRegistry, CommandResult, SessionInfo, StateChange};
use dashboard::config::DashboardConfig;
use dashboard::consts::{DEFAULT_EVENT_CAPACITY, DEFAULT_REPLY_CONTENT};
use dashboard::dashboard::{Dashboard, Panel};
use dashboard::engine::chat::ChatConfig;
use dashboard::events::Event;
use dashboard::render::{OutputFormat, TodoRows, render_messages, render_todos};

#[derive(Parser)]
#[command(name = "dashboard", version, about = "Todos and a chat that answers back.")]
struct Cli {
    /// Simulated reply latency in milliseconds
    #[arg(long, default_value_t = 800, value_parser = clap::value_parser!(u64).range(1..))]
    reply_delay_ms: u64,

    /// What the counterparty replies with
    #[arg(long, default_value = DEFAULT_REPLY_CONTENT)]
    reply: String,

    /// Panel that plain input goes to at startup (todo or chat)
    #[arg(short, long, default_value_t = Panel::Todo)]
    focus: Panel,

    /// How panels are drawn
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// More logging on stderr (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "dashboard=info",
        _ => "dashboard=debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = DashboardConfig {
        chat: ChatConfig {
            reply_delay: Duration::from_millis(cli.reply_delay_ms),
            reply_content: cli.reply,
        },
        event_capacity: DEFAULT_EVENT_CAPACITY,
    };
    let dashboard = Dashboard::new(config)?;
    let format = cli.format;
    let mut focus = cli.focus;

    if format == OutputFormat::Text {
        let chat = dashboard.chat().config();
        print_banner(&BannerInfo {
            focus,
            reply_delay: chat.reply_delay,
            reply_content: &chat.reply_content,
            format,
        });
    }

    let registry = CommandRegistry::new();
    let mut events = dashboard.bus().subscribe();
    let mut rows = redraw(&dashboard, format)?;

    // REPL with async stdin so state changes and Ctrl+C are seen at the prompt
    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    loop {
        if format == OutputFormat::Text {
            print!("\n[{focus}]> ");
            io::stdout().flush()?;
        }

        let line = tokio::select! {
            result = lines.next_line() => {
                match result {
                    Ok(Some(line)) => line,
                    Ok(None) => {
                        // Ctrl+D (EOF)
                        println!();
                        break;
                    }
                    Err(e) => {
                        eprintln!("input error: {}", e);
                        break;
                    }
                }
            }
            event = events.recv() => {
                if format == OutputFormat::Text {
                    println!();
                }
                match event {
                    Ok(Event::TodosChanged { todos }) => {
                        rows = render_todos(
                            &mut io::stdout(),
                            &todos,
                            dashboard.todo().delete_callback(),
                            format,
                        )?;
                    }
                    Ok(Event::MessagesChanged { messages }) => {
                        render_messages(&mut io::stdout(), &messages, format)?;
                    }
                    Err(RecvError::Lagged(missed)) => {
                        warn!(missed, "renderer fell behind, redrawing");
                        rows = redraw(&dashboard, format)?;
                    }
                    Err(RecvError::Closed) => break,
                }
                continue;
            }
            _ = tokio::signal::ctrl_c() => {
                println!();
                break;
            }
        };

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let info = SessionInfo {
            dashboard: &dashboard,
            focus,
            rows: Some(&rows),
        };
        let result = registry.dispatch(input, &info).await;
        match result {
            CommandResult::NotACommand => {
                dashboard.submit(focus, input);
            }
            CommandResult::Handled => {}
            CommandResult::StateChanged(StateChange::Focus(panel)) => {
                focus = panel;
            }
            CommandResult::StateChanged(StateChange::Redraw) => {
                rows = redraw(&dashboard, format)?;
            }
            CommandResult::Quit => break,
        }
    }

    dashboard.shutdown();
    if format == OutputFormat::Text {
        let (todos, messages) = dashboard.counts();
        print_session_summary(todos, messages);
    }
    Ok(())
}

/// Draw both panels from fresh snapshots.
fn redraw(dashboard: &Dashboard, format: OutputFormat) -> io::Result<TodoRows> {
    let mut out = io::stdout().lock();
    let rows = render_todos(
        &mut out,
        &dashboard.todo().todos(),
        dashboard.todo().delete_callback(),
        format,
    )?;
    render_messages(&mut out, &dashboard.chat().messages(), format)?;
    Ok(rows)
}
