//! Startup banner and session summary display.

use std::time::Duration;

use crate::dashboard::Panel;
use crate::render::OutputFormat;

/// Session configuration for display in the startup banner.
pub struct BannerInfo<'a> {
    pub focus: Panel,
    pub reply_delay: Duration,
    pub reply_content: &'a str,
    pub format: OutputFormat,
}

/// Print the startup banner with session info.
pub fn print_banner(info: &BannerInfo) {
    let format = match info.format {
        OutputFormat::Text => "text",
        OutputFormat::Json => "json",
    };
    println!(
        r#"
   ╔═══════════════════════════════════════╗
   ║          D A S H B O A R D            ║
   ║        todos on the left, chat        ║
   ╚═══════════════════════════════════════╝

   version   {}
   focus     {}
   reply     "{}" after {} ms
   output    {}

   type /help for commands
"#,
        env!("CARGO_PKG_VERSION"),
        info.focus,
        info.reply_content,
        info.reply_delay.as_millis(),
        format,
    );
}

/// Print the session summary (entity counts + farewell).
pub fn print_session_summary(todos: usize, messages: usize) {
    if todos + messages > 0 {
        println!(
            "session: {} todo{}, {} message{}",
            todos,
            plural(todos),
            messages,
            plural(messages),
        );
    }
    println!("goodbye.");
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}
