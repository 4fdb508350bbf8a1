//! Slash commands available in the chat REPL

use anyhow::Result;
use colored::*;

use crate::client::ChatTransport;
use crate::orchestrator::ChatSession;
use crate::repl::display::DisplayManager;
use crate::types::{Language, NO_LANGUAGE};

/// Default number of messages shown by /history
const DEFAULT_HISTORY_LIMIT: usize = 10;

/// REPL command types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    History { limit: Option<usize> },
    Lang { tag: Option<String> },
    Languages,
    Status,
    Health,
    Exit,
    Clear,
    Unknown { input: String },
}

/// Check whether a line is a slash command rather than a chat message
pub fn is_command(input: &str) -> bool {
    input.trim_start().starts_with('/')
}

/// Command handler for parsing and executing REPL commands
#[derive(Debug, Default)]
pub struct CommandHandler;

impl CommandHandler {
    pub fn new() -> Self {
        CommandHandler
    }

    /// Parse input string into a command
    pub fn parse(&self, input: &str) -> Command {
        let trimmed = input.trim();

        let Some(rest) = trimmed.strip_prefix('/') else {
            return Command::Unknown {
                input: input.to_string(),
            };
        };

        let parts: Vec<&str> = rest.split_whitespace().collect();
        let Some(name) = parts.first() else {
            return Command::Unknown {
                input: input.to_string(),
            };
        };

        match name.to_lowercase().as_str() {
            "help" | "h" => Command::Help,
            "exit" | "quit" | "q" => Command::Exit,
            "history" => {
                let limit = parts.get(1).and_then(|s| s.parse().ok());
                Command::History { limit }
            }
            "lang" | "language" => Command::Lang {
                tag: parts.get(1).map(|s| s.to_string()),
            },
            "languages" | "langs" => Command::Languages,
            "status" => Command::Status,
            "health" => Command::Health,
            "clear" | "cls" => Command::Clear,
            _ => Command::Unknown {
                input: input.to_string(),
            },
        }
    }

    /// Execute a command
    ///
    /// Returns true if REPL should continue, false if should exit
    pub async fn execute<T: ChatTransport>(
        &self,
        command: Command,
        session: &mut ChatSession<T>,
        display: &DisplayManager,
    ) -> Result<bool> {
        match command {
            Command::Help => {
                self.show_help();
                Ok(true)
            }
            Command::Exit => {
                println!("{}", "Goodbye!".green());
                Ok(false)
            }
            Command::History { limit } => {
                display.show_history(
                    session.store().messages(),
                    limit.unwrap_or(DEFAULT_HISTORY_LIMIT),
                );
                Ok(true)
            }
            Command::Lang { tag: None } => {
                let current = session
                    .language()
                    .map(|l| format!("{} {}", l.icon(), l))
                    .unwrap_or_else(|| NO_LANGUAGE.to_string());
                println!("Language: {}", current.cyan());
                Ok(true)
            }
            Command::Lang { tag: Some(tag) } => {
                match Language::parse_optional(&tag) {
                    Ok(language) => {
                        if session.set_language(language) {
                            let shown = language
                                .map(|l| l.tag().to_string())
                                .unwrap_or_else(|| NO_LANGUAGE.to_string());
                            println!("{}", format!("Language set to {}", shown).cyan());
                        } else {
                            display.show_error("Cannot change language while a reply is pending");
                        }
                    }
                    Err(e) => {
                        display.show_error(&e.to_string());
                        println!("Type {} for the supported tags", "/languages".cyan());
                    }
                }
                Ok(true)
            }
            Command::Languages => {
                display.show_languages(session.language());
                Ok(true)
            }
            Command::Status => {
                display.show_status(session);
                Ok(true)
            }
            Command::Health => {
                match session.health().await {
                    Ok(health) => display.show_health(&health),
                    Err(e) => display.show_error(&format!("Health check failed: {}", e)),
                }
                Ok(true)
            }
            Command::Clear => {
                display.clear_screen()?;
                Ok(true)
            }
            Command::Unknown { input } => {
                println!("{}", format!("Unknown command: {}", input).red());
                println!("Type {} for available commands", "/help".cyan());
                Ok(true)
            }
        }
    }

    /// Display help information
    fn show_help(&self) {
        println!("\n{}", "Available Commands:".bold().cyan());
        println!("{}", "=".repeat(60).cyan());

        let commands = [
            ("/help, /h", "Show this help message"),
            ("/history [n]", "Show last n messages (default: 10)"),
            ("/lang [tag]", "Show or set the target language ('none' to omit)"),
            ("/languages", "List supported language tags"),
            ("/status", "Show endpoint, language and message count"),
            ("/health", "Query the backend health endpoint"),
            ("/clear, /cls", "Clear screen"),
            ("/exit, /quit, /q", "Exit"),
        ];

        for (cmd, desc) in commands {
            println!("  {:<20} {}", cmd.green(), desc);
        }
        println!("\nAnything else is sent to BlueBot.\n");
    }
}
