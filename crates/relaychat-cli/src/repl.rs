//! Line-editor loop around a chat session.

use reedline::{DefaultPrompt, DefaultPromptSegment, Reedline, Signal};
use relaychat_client::{ChatClient, Osc52Clipboard, Relay};
use tracing::debug;

const HELP: &str = "\
Type a message and press Enter to send it.
  /clear      start over
  /copy [N]   copy entry N (default: latest reply)
  /quit       exit";

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Submit(String),
    Clear,
    /// Zero-based entry index; `None` means the latest reply.
    Copy(Option<usize>),
    Help,
    Quit,
    Unknown(String),
}

pub fn parse(line: &str) -> Command {
    let trimmed = line.trim();
    let Some(rest) = trimmed.strip_prefix('/') else {
        return Command::Submit(line.to_string());
    };

    let mut parts = rest.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some("clear"), None) => Command::Clear,
        (Some("copy"), None) => Command::Copy(None),
        (Some("copy"), Some(n)) => match n.parse::<usize>() {
            Ok(n) if n >= 1 => Command::Copy(Some(n - 1)),
            _ => Command::Unknown(trimmed.to_string()),
        },
        (Some("help"), None) => Command::Help,
        (Some("quit") | Some("exit"), None) => Command::Quit,
        _ => Command::Unknown(trimmed.to_string()),
    }
}

pub async fn run(
    label: &str,
    session: &mut dyn ChatClient,
    relay: &dyn Relay,
) -> anyhow::Result<()> {
    let mut line_editor = Reedline::create();
    let prompt = DefaultPrompt::new(
        DefaultPromptSegment::Basic(label.to_string()),
        DefaultPromptSegment::Empty,
    );
    let mut clipboard = Osc52Clipboard::stdout();

    println!("{HELP}");

    loop {
        let line = match line_editor.read_line(&prompt)? {
            Signal::Success(line) => line,
            _ => break,
        };

        match parse(&line) {
            Command::Submit(text) => {
                session.set_input(&text);
                match session.submit(relay).await {
                    Ok(_) => {
                        if let Some(entry) = session.entries().last() {
                            println!("[{}] {}", entry.time_label(), entry.message.content);
                        }
                    }
                    Err(err) => {
                        debug!(error = ?err, "Submit failed");
                        println!("error: {err}");
                    }
                }
            }
            Command::Clear => {
                session.clear();
                println!("cleared");
            }
            Command::Copy(index) => {
                let copied = match index {
                    Some(i) => session.copy_message(i, &mut clipboard),
                    None => session.copy_response(&mut clipboard),
                };
                if copied {
                    println!("copied");
                } else {
                    println!("nothing copied");
                }
            }
            Command::Help => println!("{HELP}"),
            Command::Quit => break,
            Command::Unknown(cmd) => println!("unknown command: {cmd}"),
        }
    }

    Ok(())
}
