// Solace - Empathetic wellness companion with crisis risk screening
// Main entry point

use anyhow::{Context, Result};
use clap::Parser;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::sync::Arc;
use std::time::Duration;

use solace::chat::{ChatSession, WellnessCompanion};
use solace::config::{load_config, Config};
use solace::events::FileEventLog;
use solace::providers::create_generator;
use solace::risk::{CombinedVerdict, Lexicon, RiskEngine};
use tracing_subscriber::prelude::*;

#[derive(Parser, Debug)]
#[command(name = "solace")]
#[command(about = "Empathetic wellness companion with crisis risk screening", version)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// Companion persona: peer, mentor, or therapist
    #[arg(long)]
    persona: Option<String>,
}

#[derive(Parser, Debug)]
enum Command {
    /// Interactive chat session (default)
    Chat,
    /// Send a single message and print the reply
    Query {
        /// Message text
        text: String,
    },
    /// Screen a message and print the risk verdict as JSON
    Analyze {
        /// Message text
        text: String,
    },
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "solace=info".into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn build_session(config: &Config, persona_override: Option<String>) -> Result<ChatSession> {
    let lexicon = match &config.lexicon_path {
        Some(path) => Lexicon::load_from_file(path)?,
        None => Lexicon::default(),
    };
    let generator = create_generator(config)?;
    let event_log = Arc::new(FileEventLog::new(config.events_path.clone()));

    let engine = RiskEngine::new(
        &lexicon,
        config.thresholds,
        generator.clone(),
        Duration::from_secs(config.classifier_timeout_secs),
        event_log,
    )?;

    let persona = persona_override.unwrap_or_else(|| config.persona.clone());
    let companion = WellnessCompanion::new(generator, persona, config.history_window);

    Ok(ChatSession::new(engine, companion))
}

fn print_resource_banner(verdict: &CombinedVerdict) {
    if verdict.immediate_crisis {
        println!(
            "\n🚨 IMMEDIATE CRISIS RESOURCES — If you're in immediate danger, call your \
             local emergency number or a crisis line right now.\n"
        );
    } else if verdict.requires_intervention {
        println!(
            "\n💛 We're here to support you — consider reaching out to someone you trust \
             or a local support line.\n"
        );
    }
}

async fn run_chat(session: &mut ChatSession) -> Result<()> {
    let mut editor = DefaultEditor::new().context("Failed to initialize line editor")?;

    println!("Solace is here to listen. Type your message, or press Ctrl-D to leave.\n");

    loop {
        match editor.readline("you> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(line);

                let outcome = session.respond(line).await;
                print_resource_banner(&outcome.verdict);
                println!("\nsolace> {}\n", outcome.reply);
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                println!("\nTake care of yourself. Solace is here whenever you need it.");
                break;
            }
            Err(e) => return Err(e).context("Failed to read input"),
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let args = Args::parse();
    let config = load_config()?;
    let mut session = build_session(&config, args.persona)?;

    match args.command.unwrap_or(Command::Chat) {
        Command::Chat => run_chat(&mut session).await?,
        Command::Query { text } => {
            let outcome = session.respond(&text).await;
            print_resource_banner(&outcome.verdict);
            println!("{}", outcome.reply);
        }
        Command::Analyze { text } => {
            let verdict = session.engine().analyze(&text).await;
            println!(
                "{}",
                serde_json::to_string_pretty(&verdict).context("Failed to render verdict")?
            );
        }
    }

    Ok(())
}
