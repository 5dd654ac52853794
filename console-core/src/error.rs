//! Error types for console operations
//!
//! None of these are fatal. The console turns every error that reaches it
//! into a single `Error: ...` line in the scrollback, except
//! [`Error::CapacityExceeded`] which is dropped silently.

use console_parser::ArgError;
use thiserror::Error;

/// Console error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The submitted verb matches no registered command
    ///
    /// Holds the attempted verb, empty when no verb could be parsed.
    #[error("{}", no_such_command(.0))]
    NoSuchCommand(String),

    /// A command was given the wrong number of arguments
    #[error("command '{command}' {expected}")]
    Arity {
        command: String,
        expected: &'static str,
    },

    /// A command argument could not be interpreted
    #[error("{command}: {message}")]
    InvalidArgument { command: String, message: String },

    /// Argument text was malformed
    #[error("{0}")]
    Args(#[from] ArgError),

    /// Formatted output did not fit in a line and was truncated
    #[error("output truncated to {capacity} bytes")]
    FormatOverflow { capacity: usize },

    /// An insert would grow a line past its capacity
    #[error("line capacity of {capacity} bytes exceeded")]
    CapacityExceeded { capacity: usize },

    /// A key name could not be parsed
    #[error("unknown key name '{0}'")]
    UnknownKey(String),

    /// Free-form failure reported by a command handler
    #[error("{0}")]
    Command(String),
}

fn no_such_command(verb: &str) -> String {
    if verb.is_empty() {
        "No such command".to_string()
    } else {
        format!("{}: No such command", verb)
    }
}

impl Error {
    /// Shorthand for a handler failure with a custom message
    pub fn command(message: impl Into<String>) -> Self {
        Error::Command(message.into())
    }
}

/// Result type for console operations
pub type Result<T> = std::result::Result<T, Error>;
