//! Input handler for the chat REPL using rustyline
//!
//! Provides line editing and persistent history.

use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::history::History;
use rustyline::DefaultEditor;
use std::path::PathBuf;

use crate::types::Language;

/// What one readline call produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// A line (trimmed, possibly empty)
    Line(String),

    /// Ctrl-C
    Interrupted,

    /// Ctrl-D
    Eof,
}

/// Input handler managing readline interface and history
pub struct InputHandler {
    editor: DefaultEditor,
    history_path: Option<PathBuf>,
    prompt: String,
}

impl InputHandler {
    /// Create new input handler without persistent history
    pub fn new() -> Result<Self> {
        Ok(InputHandler {
            editor: DefaultEditor::new()?,
            history_path: None,
            prompt: prompt_for(None),
        })
    }

    /// Create input handler with persistent history
    pub fn with_history(history_file: PathBuf) -> Result<Self> {
        let mut editor = DefaultEditor::new()?;

        if history_file.exists() {
            let _ = editor.load_history(&history_file);
        }

        Ok(InputHandler {
            editor,
            history_path: Some(history_file),
            prompt: prompt_for(None),
        })
    }

    /// Refresh the prompt after a language change
    pub fn set_language(&mut self, language: Option<Language>) {
        self.prompt = prompt_for(language);
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Read a line of input from user
    pub fn read_line(&mut self) -> Result<InputEvent> {
        match self.editor.readline(&self.prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if !trimmed.is_empty() {
                    let _ = self.editor.add_history_entry(trimmed);
                }
                Ok(InputEvent::Line(trimmed.to_string()))
            }
            Err(ReadlineError::Interrupted) => Ok(InputEvent::Interrupted),
            Err(ReadlineError::Eof) => Ok(InputEvent::Eof),
            Err(err) => Err(anyhow::anyhow!("Readline error: {}", err)),
        }
    }

    /// Save history to disk
    pub fn save_history(&mut self) -> Result<()> {
        if let Some(ref path) = self.history_path {
            self.editor.save_history(path)?;
        }
        Ok(())
    }

    /// Get history size
    pub fn history_len(&self) -> usize {
        self.editor.history().len()
    }
}

fn prompt_for(language: Option<Language>) -> String {
    match language {
        Some(language) => format!("[{}] you › ", language.tag()),
        None => "you › ".to_string(),
    }
}
