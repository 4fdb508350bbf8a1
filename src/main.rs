//! BlueBot - Main CLI Entry Point

use anyhow::{Context, Result};
use bluebot::{
    cli::{Args, Commands, Config, Verbosity},
    client::HttpTransport,
    conversation::ConversationStore,
    repl::{DisplayManager, ReplSession},
    streaming::StreamingPresenter,
    types::NO_LANGUAGE,
    ChatSession, SendOutcome,
};
use clap::Parser;
use colored::Colorize;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbosity());

    let mut config = Config::load(args.config.clone()).context("Failed to load configuration")?;
    args.apply_overrides(&mut config);
    config.validate().context("Invalid configuration")?;

    match args.command() {
        Commands::Chat => run_chat(&config).await?,
        Commands::Ask { message } => {
            let answered = run_ask(&config, &message.join(" ")).await?;
            if !answered {
                std::process::exit(1);
            }
        }
        Commands::Health => run_health(&config).await?,
        Commands::Languages => list_languages(&config)?,
        Commands::Config => show_config(&config)?,
    }

    Ok(())
}

/// Logs go to stderr so they never interleave with the reveal on stdout
fn init_tracing(verbosity: Verbosity) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| verbosity.log_filter().into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn build_session(config: &Config) -> Result<ChatSession<HttpTransport>> {
    let transport = HttpTransport::with_config(
        &config.server.base_url,
        &config.server.chat_path,
        &config.server.health_path,
        config.request_timeout(),
    )?;

    info!(endpoint = %config.chat_url(), "chat session ready");
    Ok(ChatSession::with_parts(
        transport,
        config.language()?,
        ConversationStore::new(config.chat.greeting.clone()),
        StreamingPresenter::new(config.reveal_interval()),
    ))
}

fn display_for(config: &Config) -> DisplayManager {
    DisplayManager::new(&config.display.cursor, config.display.color_output)
}

/// Interactive chat loop
async fn run_chat(config: &Config) -> Result<()> {
    let history_path = dirs::home_dir().map(|home| home.join(".bluebot_history"));

    let mut repl = ReplSession::new(build_session(config)?, display_for(config), history_path)?;
    repl.show_welcome(VERSION);
    repl.run().await
}

/// One-shot question; returns false when the reply was an error message
async fn run_ask(config: &Config, message: &str) -> Result<bool> {
    let mut session = build_session(config)?;
    let mut display = display_for(config);

    match session.send_message(message, &mut display).await {
        SendOutcome::Answered { .. } => Ok(true),
        SendOutcome::Ignored => {
            display.show_error("Nothing to send: message is empty");
            Ok(false)
        }
        SendOutcome::Superseded | SendOutcome::Failed { .. } => Ok(false),
    }
}

async fn run_health(config: &Config) -> Result<()> {
    let session = build_session(config)?;
    let display = display_for(config);

    println!("Checking {}{} ...", config.server.base_url, config.server.health_path);
    match session.health().await {
        Ok(health) => {
            display.show_health(&health);
            if !health.is_healthy() {
                std::process::exit(2);
            }
        }
        Err(e) => {
            display.show_error(&format!("Backend unreachable: {}", e));
            std::process::exit(2);
        }
    }
    Ok(())
}

fn list_languages(config: &Config) -> Result<()> {
    display_for(config).show_languages(config.language()?);
    Ok(())
}

fn show_config(config: &Config) -> Result<()> {
    match Config::default_path() {
        Some(path) => println!("{} {}", "# default location:".dimmed(), path.display()),
        None => println!("{}", "# no home directory; using built-in defaults".dimmed()),
    }
    println!("{}", config.to_toml()?);

    let language = config
        .language()?
        .map(|l| format!("{} {}", l.icon(), l))
        .unwrap_or_else(|| NO_LANGUAGE.to_string());
    println!("{} {}", "# language:".dimmed(), language);
    Ok(())
}
