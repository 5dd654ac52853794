//! Command line splitting
//!
//! A submitted line is a verb followed by raw argument text. The verb is the
//! first run of non-whitespace characters; the arguments are everything after
//! the whitespace that follows it, passed through untouched so each command
//! can tokenize (or not) as it sees fit.

use crate::args::Args;
use crate::is_whitespace;

/// A command line split into its verb and raw argument text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandLine<'a> {
    /// The command name
    pub verb: &'a str,
    /// Raw text after the verb, leading whitespace removed
    pub args: &'a str,
}

impl<'a> CommandLine<'a> {
    /// Split `line` into verb and arguments
    ///
    /// Returns `None` if the line holds no verb (empty or only whitespace).
    pub fn parse(line: &'a str) -> Option<Self> {
        let line = line.trim_start_matches(is_whitespace);
        if line.is_empty() {
            return None;
        }

        let verb_end = line.find(is_whitespace).unwrap_or(line.len());
        let (verb, rest) = line.split_at(verb_end);

        Some(Self {
            verb,
            args: rest.trim_start_matches(is_whitespace),
        })
    }

    /// Tokenize the argument text
    pub fn arg_iter(&self) -> Args<'a> {
        Args::new(self.args)
    }
}
