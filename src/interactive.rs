//! Interactive mode
//!
//! Each line read from the input is typed into the console and submitted.
//! The output lines that submission produced are then printed, oldest
//! first, without the echoed command itself.

use std::io::{BufRead, Write};

use console_core::{AnimationState, Console, InputEvent, Key};

use crate::error::Result;
use crate::script::settle;

/// Prompt printed before each input line
pub const PROMPT: &str = "> ";

/// Open the console and run it until the input ends or `exit` is called
///
/// Returns the requested exit code, if any.
pub fn run_interactive<R: BufRead, W: Write>(
    console: &mut Console,
    input: R,
    mut output: W,
    show_prompt: bool,
) -> Result<Option<i32>> {
    settle(console, AnimationState::Opened);

    if show_prompt {
        write!(output, "{}", PROMPT)?;
        output.flush()?;
    }

    for line in input.lines() {
        let line = line?;
        let written = submit(console, &line);

        for text in new_output(console, written) {
            writeln!(output, "{}", text)?;
        }

        if let Some(code) = console.take_exit_request() {
            return Ok(Some(code));
        }

        if show_prompt {
            write!(output, "{}", PROMPT)?;
        }
        output.flush()?;
    }
    Ok(None)
}

/// Type and submit `line`, returning how many lines it wrote
fn submit(console: &mut Console, line: &str) -> u64 {
    let before = console.scrollback().total_written();
    let mut events: Vec<InputEvent> = line.chars().map(InputEvent::Char).collect();
    events.push(InputEvent::KeyDown(Key::Enter));
    events.push(InputEvent::KeyUp(Key::Enter));
    console.update(&events);
    console.scrollback().total_written() - before
}

/// The last `written` lines minus the echoed submission, oldest first
fn new_output(console: &Console, written: u64) -> Vec<&str> {
    let scrollback = console.scrollback();
    let count = usize::try_from(written)
        .unwrap_or(usize::MAX)
        .min(scrollback.len());
    let mut lines: Vec<&str> = scrollback.iter().take(count).map(|l| l.as_str()).collect();

    // The echo is the oldest new line, unless it was evicted or cleared
    if count as u64 == written {
        lines.pop();
    }
    lines.reverse();
    lines
}
