//! devconsole - an in-application developer console
//!
//! The console model lives in the `console-core` and `console-parser`
//! crates. This crate is the host side:
//!
//! - `config`: layered configuration (defaults, TOML file, env, CLI)
//! - `commands`: filesystem commands (`pwd`, `ls`, `cd`)
//! - `renderer`: plain-text frame renderer
//! - `script`: event-script driver for headless runs
//! - `interactive`: line-at-a-time driver over stdin

pub mod commands;
pub mod config;
pub mod error;
pub mod interactive;
pub mod renderer;
pub mod script;

pub use config::{CliArgs, Config};
pub use error::{AppError, Result};

use console_core::Console;

/// Build a console from the application configuration
///
/// Registers the filesystem commands when enabled, working in the process
/// working directory.
pub fn build_console(config: &Config) -> Result<Console> {
    let mut console = Console::new(config.console.clone());
    if config.fs_commands {
        let dir = commands::WorkingDir::process()?;
        commands::fs::register(&mut console, &dir);
    }
    Ok(console)
}
