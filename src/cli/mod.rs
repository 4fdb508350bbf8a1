//! CLI module for BlueBot
//!
//! Argument parsing and configuration.

pub mod args;
pub mod config;

pub use args::{Args, Commands, Verbosity};
pub use config::Config;
