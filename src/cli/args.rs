//! Command-line argument parsing for BlueBot
//!
//! Provides clap-based CLI with subcommands and verbosity control.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::cli::config::Config;
use crate::types::{Language, NO_LANGUAGE};

/// BlueBot - terminal chat client for the BlueBot coding assistant
#[derive(Parser, Debug)]
#[command(name = "bluebot")]
#[command(version)]
#[command(about = "Chat with the BlueBot coding assistant from your terminal", long_about = None)]
pub struct Args {
    /// Backend base URL (e.g. http://localhost:8000)
    #[arg(long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Target programming language sent with each message
    #[arg(short, long, value_name = "TAG")]
    pub language: Option<Language>,

    /// Do not send a language field
    #[arg(long, conflicts_with = "language")]
    pub no_language: bool,

    /// Reveal tick period in milliseconds (5-15)
    #[arg(long, value_name = "MS")]
    pub tick_ms: Option<u64>,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Verbosity level: -q (quiet), default (normal), -v (verbose), -vv (very verbose)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (only errors are logged)
    #[arg(short, long)]
    pub quiet: bool,

    /// Subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Start interactive chat (default)
    Chat,

    /// Send one message, reveal the answer, and exit
    Ask {
        /// Message text
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
    },

    /// Query the backend health endpoint
    Health,

    /// List supported language tags
    Languages,

    /// Display effective configuration
    Config,
}

/// Verbosity level enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
    VeryVerbose,
}

impl Args {
    /// Get verbosity level based on flags
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::VeryVerbose,
            }
        }
    }

    /// Command to run (interactive chat when none given)
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Chat)
    }

    /// Apply CLI flags on top of file configuration
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(endpoint) = &self.endpoint {
            config.server.base_url = endpoint.clone();
        }
        if let Some(language) = self.language {
            config.chat.language = language.tag().to_string();
        }
        if self.no_language {
            config.chat.language = NO_LANGUAGE.to_string();
        }
        if let Some(tick_ms) = self.tick_ms {
            config.display.reveal_interval_ms = tick_ms;
        }
    }
}

impl Verbosity {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Verbosity::Quiet => "quiet",
            Verbosity::Normal => "normal",
            Verbosity::Verbose => "verbose",
            Verbosity::VeryVerbose => "very_verbose",
        }
    }

    /// Default tracing filter when RUST_LOG is unset
    pub fn log_filter(&self) -> &'static str {
        match self {
            Verbosity::Quiet => "error",
            Verbosity::Normal => "warn",
            Verbosity::Verbose => "bluebot=info",
            Verbosity::VeryVerbose => "bluebot=debug",
        }
    }
}
