//! Firewatch CLI library.
//!
//! Terminal host for the hazard monitor: configuration resolution, terminal
//! implementations of the map and notification traits, the interactive
//! prompt and the one-shot commands.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod repl;
pub mod terminal;

pub use cli::{Cli, Command};
pub use error::{CliError, Result};
pub use output::Formatter;
