//! Console Parser - command-line tokenizer
//!
//! This crate turns a submitted console line into the pieces a command
//! handler needs:
//! - the leading verb and the raw argument text after it ([`CommandLine`])
//! - a lazy iterator over whitespace-separated or quoted arguments ([`Args`])
//! - a cheap argument-count estimate ([`Args::count_args`])
//!
//! The parser never allocates; every argument is a slice of the input.

mod args;
mod command;
mod error;

pub use args::Args;
pub use command::CommandLine;
pub use error::{ArgError, Result};

/// Whitespace characters that separate verbs and arguments
///
/// Space, tab, newline, vertical tab, form feed and carriage return.
pub fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r')
}

/// Quote characters that open and close a quoted argument
pub fn is_quote(c: char) -> bool {
    c == '"' || c == '\''
}
