//! Display manager for the chat terminal UI
//!
//! Renders the transcript, the loading spinner, and the reveal frames.
//! Reveal frames are drawn in place: only the newly revealed characters are
//! written, followed by the cursor glyph which the next frame overwrites.

use colored::*;
use crossterm::{
    cursor, execute,
    terminal::{Clear, ClearType},
    tty::IsTty,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::time::Duration;

use crate::client::{ChatOutcome, ChatRequest, ChatTransport, HealthStatus};
use crate::orchestrator::{ChatSession, SessionObserver};
use crate::streaming::RevealObserver;
use crate::types::{Language, Message, Sender};

/// Spinner refresh interval
const SPINNER_TICK: Duration = Duration::from_millis(80);

/// Display manager for the chat REPL
pub struct DisplayManager {
    spinner: Option<ProgressBar>,
    cursor: String,
    animate: bool,
    revealed: usize,
}

impl DisplayManager {
    /// Create display manager; animation is disabled when stdout is not a terminal
    pub fn new(cursor: &str, color_output: bool) -> Self {
        if !color_output {
            colored::control::set_override(false);
        }

        DisplayManager {
            spinner: None,
            cursor: cursor.to_string(),
            animate: io::stdout().is_tty(),
            revealed: 0,
        }
    }

    /// Show welcome banner
    pub fn show_banner(&self, version: &str, endpoint: &str, language: Option<Language>) {
        let width = 64;
        let language = language
            .map(|l| format!("{} {}", l.icon(), l))
            .unwrap_or_else(|| "none".to_string());

        println!("\n{}", "=".repeat(width).cyan());
        println!("{}", format!("  🤖 BlueBot {}", version).bold().cyan());
        println!(
            "{}",
            "  Your AI companion for intelligent conversations and problem-solving! 🚀".dimmed()
        );
        println!(
            "{}",
            format!("  Endpoint: {} | Language: {}", endpoint, language).dimmed()
        );
        println!("{}\n", "=".repeat(width).cyan());
        println!(
            "Type your message (or {} for commands, {} to quit)\n",
            "/help".green(),
            "/exit".green()
        );
    }

    /// Print one transcript entry
    pub fn show_message(&self, message: &Message) {
        println!("{}", format_message(message));
    }

    /// Print the last `limit` messages, oldest first
    pub fn show_history(&self, messages: &[Message], limit: usize) {
        let start = messages.len().saturating_sub(limit);
        let shown = &messages[start..];

        println!(
            "\n{}",
            format!("Conversation (last {} of {}):", shown.len(), messages.len())
                .bold()
                .cyan()
        );
        println!("{}", "=".repeat(60).cyan());
        for message in shown {
            self.show_message(message);
        }
        println!();
    }

    /// Print the language menu, marking the current selection
    pub fn show_languages(&self, current: Option<Language>) {
        println!("\n{}", "Supported languages:".bold().cyan());
        for language in Language::ALL {
            let marker = if Some(language) == current { "*" } else { " " };
            println!("  {} {} {}", marker.green(), language.icon(), language.tag());
        }
        println!("    {}\n", "none (omit the language field)".dimmed());
    }

    /// Print session status
    pub fn show_status<T: ChatTransport>(&self, session: &ChatSession<T>) {
        let store = session.store();
        let language = session
            .language()
            .map(|l| l.tag().to_string())
            .unwrap_or_else(|| "none".to_string());

        println!("\n{}", "Session Status:".bold().cyan());
        println!("{}", "=".repeat(60).cyan());
        println!("  Endpoint:   {}", session.transport().endpoint());
        println!("  Language:   {}", language);
        println!("  State:      {}", store.state().display_name());
        println!("  Messages:   {}", store.len());
        println!(
            "  Reveal:     {}ms per character",
            session.presenter().tick().as_millis()
        );
        println!();
    }

    /// Print a health report
    pub fn show_health(&self, health: &HealthStatus) {
        let status = if health.is_healthy() {
            health.status.green()
        } else {
            health.status.red()
        };
        let ready = if health.gemini_client_ready {
            "ready".green()
        } else {
            "not ready".yellow()
        };
        println!("Backend: {} | Model client: {}", status, ready);
    }

    /// Display error message
    pub fn show_error(&self, error: &str) {
        eprintln!("{} {}", "✗".red(), error.red());
    }

    /// Display info message
    pub fn show_info(&self, message: &str) {
        println!("{} {}", "ℹ".cyan(), message);
    }

    /// Clear the terminal
    pub fn clear_screen(&self) -> io::Result<()> {
        let mut stdout = io::stdout();
        execute!(stdout, Clear(ClearType::All), cursor::MoveTo(0, 0))
    }

    fn start_spinner(&mut self) {
        self.stop_spinner();
        if !self.animate {
            return;
        }

        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message("BlueBot is thinking...");
        pb.enable_steady_tick(SPINNER_TICK);
        self.spinner = Some(pb);
    }

    fn stop_spinner(&mut self) {
        if let Some(pb) = self.spinner.take() {
            pb.finish_and_clear();
        }
    }

    fn draw_frame(&mut self, visible: &str) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        if self.revealed == 0 && visible.is_empty() {
            write!(stdout, "{} ", bot_label())?;
        }

        let delta = frame_delta(self.revealed, visible);
        execute!(stdout, Clear(ClearType::UntilNewLine))?;
        write!(stdout, "{}{}", delta, self.cursor)?;
        let width = self.cursor.chars().count() as u16;
        if width > 0 {
            execute!(stdout, cursor::MoveLeft(width))?;
        }
        stdout.flush()?;

        self.revealed = visible.len();
        Ok(())
    }

    fn finish_frame(&mut self) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        execute!(stdout, Clear(ClearType::UntilNewLine))?;
        writeln!(stdout)?;
        stdout.flush()?;
        self.revealed = 0;
        Ok(())
    }
}

impl Default for DisplayManager {
    fn default() -> Self {
        Self::new("|", true)
    }
}

impl RevealObserver for DisplayManager {
    fn on_frame(&mut self, visible: &str) {
        if self.animate {
            let _ = self.draw_frame(visible);
        }
    }

    fn on_commit(&mut self, full_text: &str) {
        if self.animate {
            let _ = self.finish_frame();
        } else {
            self.show_message(&Message::bot(full_text));
        }
    }

    fn on_superseded(&mut self) {
        if self.animate {
            let _ = self.finish_frame();
        }
    }
}

impl SessionObserver for DisplayManager {
    fn on_request_started(&mut self, _request: &ChatRequest) {
        self.start_spinner();
    }

    fn on_response(&mut self, _outcome: &ChatOutcome) {
        self.stop_spinner();
    }

    fn on_error(&mut self, message: &str) {
        println!("{} {}", bot_label(), message.red());
    }
}

fn bot_label() -> ColoredString {
    "bluebot ›".blue().bold()
}

/// Render one transcript line
pub fn format_message(message: &Message) -> String {
    match message.sender() {
        Sender::User => format!("{} {}", "you ›".green().bold(), message.text()),
        Sender::Bot => format!("{} {}", bot_label(), message.text()),
    }
}

/// Characters revealed since the previous frame
///
/// `previous` is the byte length of the last drawn prefix; a shorter new
/// prefix (new reveal) is drawn from the start.
pub fn frame_delta(previous: usize, visible: &str) -> &str {
    visible.get(previous..).unwrap_or(visible)
}
