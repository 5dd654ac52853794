//! Argument iterator
//!
//! Splits the raw argument text of a command into fields. A field is either
//! a run of characters containing no whitespace and no quotes, or a run that
//! opens with `"` or `'` and closes at the next identical quote. Quoted fields
//! may contain whitespace and the other quote character.
//!
//! The iterator only moves forward. Once it reports an error it produces no
//! further arguments; build a new [`Args`] to scan again.

use std::iter::FusedIterator;

use crate::error::{ArgError, Result};
use crate::{is_quote, is_whitespace};

/// Lazy iterator over the arguments in a raw argument span
#[derive(Debug, Clone)]
pub struct Args<'a> {
    /// The raw argument text
    text: &'a str,
    /// Byte offset of the next unscanned character
    next: usize,
    /// Set once the span is exhausted or malformed
    done: bool,
}

impl<'a> Args<'a> {
    /// Create an iterator over `text`
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            next: 0,
            done: false,
        }
    }

    /// The text this iterator was created from
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// The part of the span not yet consumed
    pub fn remainder(&self) -> &'a str {
        &self.text[self.next..]
    }

    /// Parse the next argument
    ///
    /// Returns `None` when the span is exhausted, or after an error has
    /// already been reported.
    pub fn next_arg(&mut self) -> Option<Result<&'a str>> {
        if self.done {
            return None;
        }

        let rest = self.remainder();
        self.next += rest.len() - rest.trim_start_matches(is_whitespace).len();

        let start = self.next;
        let first = match self.text[start..].chars().next() {
            Some(c) => c,
            None => {
                self.done = true;
                return None;
            }
        };

        if is_quote(first) {
            self.quoted(start, first)
        } else {
            self.unquoted(start)
        }
    }

    /// Collect every remaining argument, failing on the first malformed one
    pub fn collect_args(self) -> Result<Vec<&'a str>> {
        self.collect()
    }

    /// Estimate how many arguments the whole span holds
    ///
    /// This is a lookahead heuristic, not a validation pass: a quote
    /// character only flips an "inside quotes" flag, and whitespace outside
    /// quotes ends the current argument. Input the iterator would reject is
    /// still counted, so callers can use it for "no arguments given" checks
    /// without tokenizing.
    pub fn count_args(&self) -> usize {
        let mut count = 0;
        let mut in_quotes = false;
        let mut in_arg = false;

        for c in self.text.chars() {
            if is_quote(c) {
                if !in_arg {
                    count += 1;
                    in_arg = true;
                }
                in_quotes = !in_quotes;
            } else if is_whitespace(c) {
                if !in_quotes {
                    in_arg = false;
                }
            } else if !in_arg {
                count += 1;
                in_arg = true;
            }
        }

        count
    }

    fn quoted(&mut self, start: usize, quote: char) -> Option<Result<&'a str>> {
        let body_start = start + quote.len_utf8();
        let Some(len) = self.text[body_start..].find(quote) else {
            log::trace!("unterminated {} quote at byte {}", quote, start);
            return self.fail(ArgError::UnterminatedQuote { position: start });
        };
        let body_end = body_start + len;

        // Anything glued to the closing quote is dropped up to the next separator
        let after = body_end + quote.len_utf8();
        let glued = self.text[after..]
            .find(is_whitespace)
            .unwrap_or(self.text.len() - after);
        self.next = after + glued;

        Some(Ok(&self.text[body_start..body_end]))
    }

    fn unquoted(&mut self, start: usize) -> Option<Result<&'a str>> {
        let rest = &self.text[start..];
        let end = start
            + rest
                .find(|c: char| is_whitespace(c) || is_quote(c))
                .unwrap_or(rest.len());

        if self.text[end..].starts_with(is_quote) {
            log::trace!("quote inside unquoted argument at byte {}", end);
            return self.fail(ArgError::QuoteInsideUnquotedArgument { position: end });
        }

        self.next = end;
        Some(Ok(&self.text[start..end]))
    }

    fn fail(&mut self, error: ArgError) -> Option<Result<&'a str>> {
        self.done = true;
        self.next = self.text.len();
        Some(Err(error))
    }
}

impl<'a> Iterator for Args<'a> {
    type Item = Result<&'a str>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_arg()
    }
}

impl FusedIterator for Args<'_> {}
