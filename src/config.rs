//! Configuration for devconsole
//!
//! This module provides the layered configuration system:
//! - XDG-compliant config file location
//! - Environment variable support (`DEVCONSOLE_*`)
//! - CLI argument overrides
//! - Config precedence: CLI > env > file > defaults
//! - Validation with the offending field named in the error

use clap::Parser;
use console_core::{ConfigError, ConsoleConfig, Key, Layout};
use serde::{Deserialize, Serialize};
use std::env;

use crate::renderer::Palette;
use std::fs;
use std::path::{Path, PathBuf};

/// CLI arguments for devconsole
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "devconsole")]
#[command(version)]
#[command(about = "An in-application developer console, driven from a script or stdin", long_about = None)]
pub struct CliArgs {
    /// Path to custom config file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Run an event script instead of reading commands from stdin ("-" reads the script from stdin)
    #[arg(short, long, value_name = "SCRIPT")]
    pub script: Option<PathBuf>,

    /// Print the final snapshot as JSON (script mode)
    #[arg(long)]
    pub json: bool,

    /// Key that opens and closes the console (e.g. f3, grave)
    #[arg(long, value_name = "KEY")]
    pub activation_key: Option<String>,

    /// Total console lines, prompt included
    #[arg(long, value_name = "LINES")]
    pub lines: Option<usize>,

    /// Number of remembered commands
    #[arg(long, value_name = "ENTRIES")]
    pub history: Option<usize>,

    /// Maximum bytes per line
    #[arg(long, value_name = "BYTES")]
    pub line_capacity: Option<usize>,

    /// Font size in pixels
    #[arg(long, value_name = "SIZE")]
    pub font_size: Option<f32>,

    /// Viewport height in pixels
    #[arg(long, value_name = "PIXELS")]
    pub viewport_height: Option<f32>,

    /// Do not register the pwd/ls/cd commands
    #[arg(long)]
    pub no_fs_commands: bool,
}

/// Presentation settings handed to the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Viewport height in pixels
    #[serde(default = "default_viewport_height")]
    pub viewport_height: f32,

    /// Font size in pixels
    #[serde(default = "default_font_size")]
    pub font_size: f32,

    /// Extra pixels between rows
    #[serde(default = "default_line_spacing")]
    pub line_spacing: f32,

    /// Text color (hex)
    #[serde(default = "default_font_color")]
    pub font_color: String,

    /// Window background color (hex)
    #[serde(default = "default_background_color")]
    pub background_color: String,
}

fn default_viewport_height() -> f32 {
    720.0
}
fn default_font_size() -> f32 {
    20.0
}
fn default_line_spacing() -> f32 {
    2.0
}
fn default_font_color() -> String {
    "#f5f5f5".to_string()
}
fn default_background_color() -> String {
    "#1e1e1e".to_string()
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            viewport_height: default_viewport_height(),
            font_size: default_font_size(),
            line_spacing: default_line_spacing(),
            font_color: default_font_color(),
            background_color: default_background_color(),
        }
    }
}

impl DisplayConfig {
    /// Parse a hex color string to RGB
    pub fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }

        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

        Some((r, g, b))
    }

    /// Get font color as RGB
    pub fn font_rgb(&self) -> (u8, u8, u8) {
        Self::parse_hex(&self.font_color).unwrap_or((245, 245, 245))
    }

    /// Get background color as RGB
    pub fn background_rgb(&self) -> (u8, u8, u8) {
        Self::parse_hex(&self.background_color).unwrap_or((30, 30, 30))
    }
}

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Console sizes, timings and activation key
    #[serde(default)]
    pub console: ConsoleConfig,

    /// Presentation settings
    #[serde(default)]
    pub display: DisplayConfig,

    /// Register the filesystem commands
    #[serde(default = "default_true")]
    pub fs_commands: bool,
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration with full precedence:
    /// CLI args > environment variables > config file > defaults
    pub fn load_with_args(args: &CliArgs) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        let config_path = args.config.clone().or_else(Self::default_config_path);
        if let Some(path) = &config_path {
            if path.exists() {
                match Self::load_from_file(path) {
                    Ok(file_config) => config = file_config,
                    Err(e) => {
                        // An explicitly requested file must load
                        if args.config.is_some() {
                            return Err(e);
                        }
                        log::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            } else if args.config.is_some() {
                return Err(ConfigError {
                    message: format!("Config file {:?} does not exist", path),
                    field: None,
                });
            }
        }

        config.apply_env(|name| env::var(name).ok());
        config.apply_cli_args(args)?;
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            message: format!("Failed to read config file: {}", e),
            field: None,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError {
            message: format!("Failed to parse config file: {}", e),
            field: None,
        })
    }

    /// Apply `DEVCONSOLE_*` variables looked up through `var`
    ///
    /// Unparseable values are logged and skipped.
    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        fn parsed<T: std::str::FromStr>(name: &str, value: Option<String>) -> Option<T> {
            let value = value?;
            match value.parse() {
                Ok(v) => Some(v),
                Err(_) => {
                    log::warn!("Ignoring {}={:?}: not a valid value", name, value);
                    None
                }
            }
        }

        if let Some(lines) = parsed("DEVCONSOLE_LINES", var("DEVCONSOLE_LINES")) {
            self.console.lines = lines;
        }
        if let Some(history) = parsed("DEVCONSOLE_HISTORY", var("DEVCONSOLE_HISTORY")) {
            self.console.history_capacity = history;
        }
        if let Some(capacity) = parsed("DEVCONSOLE_LINE_CAPACITY", var("DEVCONSOLE_LINE_CAPACITY")) {
            self.console.line_capacity = capacity;
        }
        if let Some(key) = parsed::<Key>("DEVCONSOLE_ACTIVATION_KEY", var("DEVCONSOLE_ACTIVATION_KEY")) {
            self.console.activation_key = key;
        }
        if let Some(size) = parsed("DEVCONSOLE_FONT_SIZE", var("DEVCONSOLE_FONT_SIZE")) {
            self.display.font_size = size;
        }
        if let Some(height) = parsed("DEVCONSOLE_VIEWPORT_HEIGHT", var("DEVCONSOLE_VIEWPORT_HEIGHT")) {
            self.display.viewport_height = height;
        }
        if let Some(val) = var("DEVCONSOLE_FS_COMMANDS") {
            self.fs_commands = val == "1" || val.eq_ignore_ascii_case("true");
        }
    }

    /// Apply CLI arguments to config
    fn apply_cli_args(&mut self, args: &CliArgs) -> Result<(), ConfigError> {
        if let Some(name) = &args.activation_key {
            self.console.activation_key = name
                .parse()
                .map_err(|e: console_core::Error| ConfigError::field("activation_key", e.to_string()))?;
        }
        if let Some(lines) = args.lines {
            self.console.lines = lines;
        }
        if let Some(history) = args.history {
            self.console.history_capacity = history;
        }
        if let Some(capacity) = args.line_capacity {
            self.console.line_capacity = capacity;
        }
        if let Some(size) = args.font_size {
            self.display.font_size = size;
        }
        if let Some(height) = args.viewport_height {
            self.display.viewport_height = height;
        }
        if args.no_fs_commands {
            self.fs_commands = false;
        }
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.console.validate()?;

        if self.display.font_size < 4.0 {
            return Err(ConfigError::field(
                "display.font_size",
                "Font size must be at least 4.0",
            ));
        }
        if self.display.font_size > 200.0 {
            return Err(ConfigError::field(
                "display.font_size",
                "Font size must be at most 200.0",
            ));
        }
        if !(self.display.viewport_height >= 1.0) {
            return Err(ConfigError::field(
                "display.viewport_height",
                "Viewport height must be at least 1 pixel",
            ));
        }
        if !(0.0..=100.0).contains(&self.display.line_spacing) {
            return Err(ConfigError::field(
                "display.line_spacing",
                "Line spacing must be between 0 and 100",
            ));
        }

        self.validate_color(&self.display.font_color, "display.font_color")?;
        self.validate_color(&self.display.background_color, "display.background_color")?;

        Ok(())
    }

    /// Validate a hex color string
    fn validate_color(&self, color: &str, field: &str) -> Result<(), ConfigError> {
        if DisplayConfig::parse_hex(color).is_none() {
            return Err(ConfigError::field(
                field,
                format!("Invalid hex color '{}'. Expected format: #RRGGBB", color),
            ));
        }
        Ok(())
    }

    /// Get the default configuration file path
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("devconsole").join("config.toml"))
    }

    /// Window geometry for the renderer
    pub fn layout(&self) -> Layout {
        Layout {
            viewport_height: self.display.viewport_height,
            viewport_fraction: self.console.viewport_fraction,
            font_size: self.display.font_size,
            line_spacing: self.display.line_spacing,
        }
    }

    /// Display colors for a terminal renderer
    pub fn palette(&self) -> Palette {
        Palette {
            foreground: self.display.font_rgb(),
            background: self.display.background_rgb(),
        }
    }
}
