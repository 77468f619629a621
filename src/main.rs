//! Interactive terminal frontend.
//!
//! A plain line is a chat turn; slash commands cover provider selection,
//! credential entry, and theme toggling. The prompt does not return while a
//! send is in flight, which is what enforces the one-request-at-a-time gate
//! at the UI level; Ctrl-C cancels the in-flight call.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use reedline::{DefaultPrompt, DefaultPromptSegment, Reedline, Signal};
use tokio_util::sync::CancellationToken;
use tracing::info;

use parley::config::Config;
use parley::conversation::{Conversation, RejectReason, SendOutcome};
use parley::llm::{HttpTransport, ProviderRegistry};
use parley::transcript::{self, Theme};

#[derive(Parser)]
#[command(name = "parley", about = "Chat with hosted LLM providers from the terminal")]
struct Cli {
    /// Path to the YAML config file.
    #[arg(long, default_value = "parley.yaml")]
    config: PathBuf,

    /// Provider to start with, overriding the config file.
    #[arg(long)]
    provider: Option<String>,
}

enum CommandOutcome {
    Continue,
    Quit,
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string());
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    let config = Config::load(&cli.config).await?;

    let registry = ProviderRegistry::builtin();
    let mut conversation = Conversation::new(
        registry,
        HttpTransport::new(),
        Duration::from_secs(config.request_timeout_seconds),
    );
    conversation.switch_provider(cli.provider.as_deref().unwrap_or(&config.provider));
    let mut theme = config.theme;

    info!(provider = conversation.active_provider().id(), "session started");
    print_banner(&conversation);

    let mut line_editor = Reedline::create();
    let prompt = DefaultPrompt::new(
        DefaultPromptSegment::Basic("you".to_string()),
        DefaultPromptSegment::Empty,
    );

    loop {
        match line_editor.read_line(&prompt) {
            Ok(Signal::Success(line)) => {
                if let Some(command) = line.trim().strip_prefix('/') {
                    match handle_command(command, &mut conversation, &mut theme) {
                        CommandOutcome::Continue => continue,
                        CommandOutcome::Quit => break,
                    }
                }
                send_turn(&mut conversation, &line, theme).await;
            }
            Ok(Signal::CtrlC) => continue,
            Ok(Signal::CtrlD) => break,
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}

/// Run one send cycle and print the resulting assistant turn.
async fn send_turn(conversation: &mut Conversation<HttpTransport>, line: &str, theme: Theme) {
    // Ctrl-C during the round trip cancels the request instead of killing
    // the process.
    let cancel = CancellationToken::new();
    let watcher = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        })
    };

    let outcome = conversation.send(line, &cancel).await;
    watcher.abort();

    match outcome {
        SendOutcome::Replied | SendOutcome::Failed(_) => {
            if let Some(turn) = conversation.history().last() {
                println!("{}\n", transcript::render_turn(turn, theme));
            }
        }
        SendOutcome::Rejected(RejectReason::MissingCredential) => {
            println!("no API key set; run /key <your-api-key> first\n");
        }
        SendOutcome::Rejected(_) => {}
    }
}

fn handle_command(
    command: &str,
    conversation: &mut Conversation<HttpTransport>,
    theme: &mut Theme,
) -> CommandOutcome {
    let (name, arg) = match command.split_once(' ') {
        Some((name, arg)) => (name, arg.trim()),
        None => (command, ""),
    };

    match name {
        "providers" => {
            for descriptor in conversation.registry().descriptors() {
                let marker = if descriptor.id() == conversation.active_provider().id() {
                    "*"
                } else {
                    " "
                };
                println!("{} {}  {}", marker, descriptor.id(), descriptor.display_name());
            }
        }
        "provider" => {
            conversation.switch_provider(arg);
            println!("provider: {}", conversation.active_provider().display_name());
        }
        "key" => {
            if arg.is_empty() {
                println!("usage: /key <your-api-key>");
            } else {
                conversation.set_credential(arg);
                println!("API key set");
            }
        }
        "theme" => {
            *theme = theme.toggled();
            println!("theme: {:?}", theme);
        }
        "quit" | "exit" => return CommandOutcome::Quit,
        _ => println!("commands: /providers /provider <id> /key <value> /theme /quit"),
    }

    CommandOutcome::Continue
}

fn print_banner(conversation: &Conversation<HttpTransport>) {
    println!(
        "parley — chatting with {} (switch with /provider <id>, set a key with /key)",
        conversation.active_provider().display_name()
    );
}
