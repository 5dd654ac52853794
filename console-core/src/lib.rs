//! Console Core - Platform-independent developer console model
//!
//! This crate provides the core data structures and logic of an in-application
//! developer console:
//! - Bounded UTF-8 lines and the editable prompt
//! - Command history with browsing
//! - Scrollback of output lines
//! - Command registration and dispatch, with `exit`, `clear` and `help` built in
//! - Open/close animation, key repeat and cursor blink
//!
//! Nothing here draws or reads devices. The host feeds [`InputEvent`]s to a
//! [`Console`] every frame and renders its [`Snapshot`]. Given the same events
//! the console always ends up in the same state.

mod animation;
mod builtins;
mod config;
mod console;
mod dispatcher;
mod error;
mod history;
mod input;
mod layout;
mod line;
mod line_buffer;
mod repeat;
mod ring;
mod scrollback;
mod snapshot;
pub mod text;

pub use animation::{Animation, AnimationState};
pub use builtins::register_builtins;
pub use config::{ConfigError, ConsoleConfig, DEFAULT_LINES, DEFAULT_LINE_CAPACITY};
pub use console::Console;
pub use dispatcher::{Command, CommandContext, DispatchOutcome, Dispatcher};
pub use error::{Error, Result};
pub use history::History;
pub use input::{InputEvent, Key};
pub use layout::{Layout, Renderer};
pub use line::Line;
pub use line_buffer::LineBuffer;
pub use repeat::{Blink, KeyRepeat};
pub use ring::{Ring, RingIter};
pub use scrollback::{format_line, Scrollback};
pub use snapshot::{Snapshot, SnapshotCursor};

pub use console_parser::{Args, ArgError, CommandLine};
