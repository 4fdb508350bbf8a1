//! REPL (Read-Eval-Print Loop) module for interactive chat
//!
//! Reads a line, dispatches slash commands, and sends everything else to the
//! backend through the owned `ChatSession`. Input is not read while a
//! request or reveal is running, which keeps one cycle in flight at a time.

pub mod commands;
pub mod display;
pub mod input;

use anyhow::Result;
use colored::*;
use std::path::PathBuf;
use tracing::debug;

use crate::client::ChatTransport;
use crate::orchestrator::{ChatSession, SendOutcome};
use crate::repl::commands::{is_command, CommandHandler};
pub use crate::repl::display::DisplayManager;
use crate::repl::input::{InputEvent, InputHandler};

/// REPL session coordinator
pub struct ReplSession<T: ChatTransport> {
    input_handler: InputHandler,
    command_handler: CommandHandler,
    display_manager: DisplayManager,
    chat: ChatSession<T>,
}

impl<T: ChatTransport> ReplSession<T> {
    /// Create REPL session
    pub fn new(
        chat: ChatSession<T>,
        display_manager: DisplayManager,
        history_path: Option<PathBuf>,
    ) -> Result<Self> {
        let mut input_handler = match history_path {
            Some(path) => InputHandler::with_history(path)?,
            None => InputHandler::new()?,
        };
        input_handler.set_language(chat.language());

        Ok(ReplSession {
            input_handler,
            command_handler: CommandHandler::new(),
            display_manager,
            chat,
        })
    }

    /// Show banner and the seed greeting
    pub fn show_welcome(&self, version: &str) {
        self.display_manager.show_banner(
            version,
            &self.chat.transport().endpoint(),
            self.chat.language(),
        );
        for message in self.chat.store().messages() {
            self.display_manager.show_message(message);
        }
        println!();
    }

    /// Handle one line of input
    ///
    /// Returns true if session should continue, false to exit
    pub async fn handle_input(&mut self, input: &str) -> Result<bool> {
        if input.trim().is_empty() {
            return Ok(true);
        }

        if is_command(input) {
            let command = self.command_handler.parse(input);
            debug!(?command, "repl command");
            let keep_going = self
                .command_handler
                .execute(command, &mut self.chat, &self.display_manager)
                .await?;
            self.input_handler.set_language(self.chat.language());
            return Ok(keep_going);
        }

        match self
            .chat
            .send_message(input, &mut self.display_manager)
            .await
        {
            SendOutcome::Ignored => debug!("message ignored"),
            outcome => debug!(?outcome, "message handled"),
        }
        Ok(true)
    }

    /// Main loop until /exit or Ctrl-D
    pub async fn run(&mut self) -> Result<()> {
        loop {
            match self.input_handler.read_line()? {
                InputEvent::Line(line) => {
                    if !self.handle_input(&line).await? {
                        break;
                    }
                }
                InputEvent::Interrupted => {
                    println!("Use {} to quit", "/exit".cyan());
                }
                InputEvent::Eof => break,
            }
        }

        self.save()
    }

    /// Save input history
    pub fn save(&mut self) -> Result<()> {
        self.input_handler.save_history()
    }

    pub fn chat(&self) -> &ChatSession<T> {
        &self.chat
    }
}
