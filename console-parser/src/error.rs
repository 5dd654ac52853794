//! Error types for argument tokenizing

use thiserror::Error;

/// Malformed argument text
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArgError {
    /// A quote was opened but never closed by the same quote character
    #[error("unterminated quote starting at byte {position}")]
    UnterminatedQuote { position: usize },

    /// A quote character appeared in the middle of an unquoted argument
    #[error("quote inside unquoted argument at byte {position}")]
    QuoteInsideUnquotedArgument { position: usize },
}

/// Result type for tokenizer operations
pub type Result<T> = std::result::Result<T, ArgError>;
