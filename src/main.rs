//! devconsole
//!
//! Runs the developer console without a window: either an event script
//! (`--script`) or commands read line by line from stdin.

use std::error::Error;
use std::fs;
use std::io::{self, IsTerminal, Read, Write};

use clap::Parser;
use devconsole::config::{CliArgs, Config};
use devconsole::renderer::TextRenderer;
use devconsole::script::{parse_script, run_script};
use devconsole::{build_console, interactive};

fn main() -> Result<(), Box<dyn Error>> {
    // Initialize logging with "warn" level by default
    // Users can set RUST_LOG=debug for more verbose output
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = CliArgs::parse();

    // Load configuration with precedence: CLI > env > file > defaults
    let config = match Config::load_with_args(&args) {
        Ok(config) => config,
        Err(e) => {
            log::error!("Configuration error: {}", e);
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    log::debug!("Activation key: {}", config.console.activation_key);
    log::debug!(
        "{} lines of {} bytes, {} history entries",
        config.console.lines,
        config.console.line_capacity,
        config.console.history_capacity
    );

    let mut console = build_console(&config)?;

    let exit_code = match &args.script {
        Some(path) => {
            let source = if path.as_os_str() == "-" {
                let mut source = String::new();
                io::stdin().read_to_string(&mut source)?;
                source
            } else {
                fs::read_to_string(path)?
            };
            let steps = parse_script(&source)?;
            let layout = config.layout();

            let stdout = io::stdout();
            let mut renderer = if stdout.is_terminal() && !args.json {
                TextRenderer::with_palette(stdout.lock(), config.palette())
            } else {
                TextRenderer::new(stdout.lock())
            };
            let code = run_script(&mut console, &steps, &mut renderer, &layout)?;

            let snapshot = console.snapshot();
            let mut out = renderer.into_inner();
            if args.json {
                writeln!(out, "{}", snapshot.to_json()?)?;
            } else {
                writeln!(out, "{}", snapshot.to_text())?;
            }
            code
        }
        None => {
            let stdin = io::stdin();
            let show_prompt = stdin.is_terminal();
            interactive::run_interactive(&mut console, stdin.lock(), io::stdout().lock(), show_prompt)?
        }
    };

    if let Some(code) = exit_code {
        log::debug!("exiting with code {}", code);
        std::process::exit(code);
    }
    Ok(())
}
