//! Console controller
//!
//! [`Console`] ties the pieces together: it turns input events into edits of
//! the prompt, walks the history, runs the open/close animation and hands
//! submitted lines to the dispatcher. The host owns one `Console`, feeds it
//! a frame's worth of events through [`Console::update`] and draws
//! [`Console::snapshot`].

use std::fmt;

use crate::animation::{Animation, AnimationState};
use crate::builtins::register_builtins;
use crate::config::ConsoleConfig;
use crate::dispatcher::{Command, DispatchOutcome, Dispatcher};
use crate::error::Error;
use crate::history::History;
use crate::input::{InputEvent, Key};
use crate::line_buffer::LineBuffer;
use crate::repeat::{Blink, KeyRepeat};
use crate::scrollback::Scrollback;
use crate::snapshot::{Snapshot, SnapshotCursor};

/// Horizontal cursor direction of a held arrow key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Left,
    Right,
}

impl Direction {
    fn from_key(key: Key) -> Option<Self> {
        match key {
            Key::Left => Some(Direction::Left),
            Key::Right => Some(Direction::Right),
            _ => None,
        }
    }
}

/// The developer console
pub struct Console {
    config: ConsoleConfig,
    prompt: LineBuffer,
    history: History,
    scrollback: Scrollback,
    dispatcher: Dispatcher,
    animation: Animation,
    backspace: KeyRepeat,
    cursor_repeat: KeyRepeat,
    /// Arrow key currently auto-repeating
    cursor_dir: Option<Direction>,
    blink: Blink,
    /// Output lines scrolled back from the newest
    scroll_offset: usize,
    exit_request: Option<i32>,
}

impl Console {
    /// Create a closed console with the built-in commands registered
    pub fn new(config: ConsoleConfig) -> Self {
        let mut dispatcher = Dispatcher::new(config.line_capacity);
        register_builtins(&mut dispatcher);

        Self {
            prompt: LineBuffer::new(config.line_capacity),
            history: History::new(config.history_capacity),
            scrollback: Scrollback::new(config.scrollback_capacity(), config.line_capacity),
            dispatcher,
            animation: Animation::new(config.animation_steps, config.step_interval),
            backspace: KeyRepeat::new(config.backspace_delay, config.backspace_interval),
            cursor_repeat: KeyRepeat::new(config.cursor_delay, config.cursor_interval),
            cursor_dir: None,
            blink: Blink::new(config.blink_period),
            scroll_offset: 0,
            exit_request: None,
            config,
        }
    }

    /// Get the configuration the console was built with
    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    /// Add a command, replacing any with the same name
    ///
    /// Returns true if a command was replaced.
    pub fn register(&mut self, name: &str, command: impl Command + 'static) -> bool {
        self.dispatcher.register(name, command)
    }

    /// Add a command with a one-line description shown by `help`
    pub fn register_with_help(
        &mut self,
        name: &str,
        help: &str,
        command: impl Command + 'static,
    ) -> bool {
        self.dispatcher.register_with_help(name, help, command)
    }

    /// Write a line of output
    pub fn write_line(&mut self, text: &str) {
        self.scrollback.write_line(text);
    }

    /// Write a formatted line of output, as in `write!(console, ...)`
    pub fn write_fmt(&mut self, args: fmt::Arguments<'_>) {
        self.scrollback.write_fmt(args);
    }

    /// Process one frame of input
    pub fn update(&mut self, events: &[InputEvent]) {
        for event in events {
            self.handle_event(*event);
        }
    }

    /// Process a single input event
    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyDown(key) if key == self.config.activation_key => self.toggle(),
            InputEvent::FrameTick(dt) => self.tick(dt),
            _ if !self.is_active() => log::trace!("console inactive, ignoring {:?}", event),
            InputEvent::KeyDown(key) => self.key_down(key),
            InputEvent::KeyUp(key) => self.key_up(key),
            InputEvent::Char(ch) => self.insert_char(ch),
            InputEvent::Scroll(delta) => self.scroll(delta),
        }
    }

    /// Start opening or closing, as the activation key does
    pub fn toggle(&mut self) {
        let was_opened = self.animation.is_opened();
        if self.animation.toggle() && was_opened {
            self.cancel_repeats();
        }
    }

    fn tick(&mut self, dt: f32) {
        self.animation.tick(dt);
        if !self.is_active() {
            return;
        }

        if self.backspace.tick(dt) && !self.prompt.is_empty() {
            self.prompt.delete_before_cursor();
        }

        match self.cursor_dir {
            Some(dir) => {
                if self.cursor_repeat.tick(dt) {
                    self.move_cursor(dir);
                }
            }
            None => self.blink.tick(dt),
        }
    }

    fn key_down(&mut self, key: Key) {
        match key {
            Key::Backspace => {
                self.prompt.delete_before_cursor();
                self.backspace.press();
                self.blink.reset();
            }
            Key::Left | Key::Right => {
                if let Some(dir) = Direction::from_key(key) {
                    self.move_cursor(dir);
                    self.cursor_dir = Some(dir);
                    self.cursor_repeat.press();
                }
            }
            Key::Home => {
                self.prompt.move_home();
                self.blink.reset();
            }
            Key::End => {
                self.prompt.move_end();
                self.blink.reset();
            }
            Key::Up => {
                if let Some(text) = self.history.older(self.prompt.as_str()) {
                    self.prompt.set_text(text);
                }
            }
            Key::Down => {
                if let Some(text) = self.history.newer() {
                    self.prompt.set_text(text);
                }
            }
            Key::Enter => self.submit(),
            _ => {}
        }
    }

    fn key_up(&mut self, key: Key) {
        match key {
            Key::Backspace => self.backspace.release(),
            Key::Left | Key::Right => {
                // Only the direction that is repeating can stop it
                if self.cursor_dir.is_some() && self.cursor_dir == Direction::from_key(key) {
                    self.cursor_dir = None;
                    self.cursor_repeat.release();
                    self.blink.reset();
                }
            }
            _ => {}
        }
    }

    fn move_cursor(&mut self, dir: Direction) {
        match dir {
            Direction::Left => self.prompt.move_left(),
            Direction::Right => self.prompt.move_right(),
        };
    }

    fn insert_char(&mut self, ch: char) {
        if ch.is_control() {
            return;
        }
        match self.prompt.insert(ch) {
            Ok(()) => self.blink.reset(),
            Err(err) => log::trace!("dropped {:?}: {}", ch, err),
        }
    }

    fn scroll(&mut self, delta: i32) {
        let max = self.scrollback.len();
        let offset = if delta >= 0 {
            self.scroll_offset.saturating_add(delta.unsigned_abs() as usize)
        } else {
            self.scroll_offset
                .saturating_sub(delta.unsigned_abs() as usize)
        };
        self.scroll_offset = offset.min(max);
    }

    fn cancel_repeats(&mut self) {
        self.backspace.release();
        self.cursor_repeat.release();
        self.cursor_dir = None;
    }

    /// Enter: the line goes into the history and the scrollback, then to the
    /// dispatcher. Errors become one `Error: ...` output line.
    fn submit(&mut self) {
        let line = self.prompt.line().clone();
        self.history.record(&line);
        self.scrollback.push(line.clone());

        self.prompt.reset();
        self.history.reset_browse();
        self.blink.reset();
        self.scroll_offset = 0;

        match self.dispatcher.dispatch(line.as_str(), &mut self.scrollback) {
            Ok(Some(outcome)) => self.apply(outcome),
            Ok(None) => {}
            Err(err @ Error::CapacityExceeded { .. }) => log::trace!("{}", err),
            Err(err) => write!(self.scrollback, "Error: {}", err),
        }
    }

    fn apply(&mut self, outcome: DispatchOutcome) {
        if outcome.cleared {
            self.prompt.reset();
            self.scroll_offset = 0;
        }
        if let Some(code) = outcome.exit {
            self.exit_request = Some(code);
        }
    }

    /// Run a line directly, without touching the prompt or the history
    pub fn execute(&mut self, line: &str) {
        match self.dispatcher.dispatch(line, &mut self.scrollback) {
            Ok(Some(outcome)) => self.apply(outcome),
            Ok(None) => {}
            Err(err) => write!(self.scrollback, "Error: {}", err),
        }
    }

    /// Empty the scrollback and reset the view
    pub fn clear(&mut self) {
        self.scrollback.clear();
        self.prompt.reset();
        self.scroll_offset = 0;
    }

    /// Check if the console is fully open and taking input
    pub fn is_active(&self) -> bool {
        self.animation.is_opened()
    }

    /// Get the animation state
    pub fn state(&self) -> AnimationState {
        self.animation.state()
    }

    /// Fraction open, in [0, 1]
    pub fn percent(&self) -> f32 {
        self.animation.percent()
    }

    /// Change the key that opens and closes the console
    pub fn set_activation_key(&mut self, key: Key) {
        log::debug!("activation key set to {}", key);
        self.config.activation_key = key;
    }

    /// Exit code requested by the `exit` command, if any
    pub fn exit_requested(&self) -> Option<i32> {
        self.exit_request
    }

    /// Take the pending exit request
    pub fn take_exit_request(&mut self) -> Option<i32> {
        self.exit_request.take()
    }

    /// Lines scrolled back from the newest output
    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    /// Whether the cursor glyph is drawn this frame
    pub fn cursor_visible(&self) -> bool {
        self.cursor_dir.is_some() || self.blink.is_visible()
    }

    /// Get the output lines
    pub fn scrollback(&self) -> &Scrollback {
        &self.scrollback
    }

    /// Get the command history
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Get the prompt
    pub fn line_buffer(&self) -> &LineBuffer {
        &self.prompt
    }

    /// Get the command table
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Build the frame view for the renderer
    pub fn snapshot(&self) -> Snapshot {
        let visible = self.cursor_visible();
        let prompt = if visible {
            self.prompt.render_with_cursor(self.config.cursor_glyph)
        } else {
            self.prompt.as_str().to_string()
        };
        let cursor = self.prompt.cursor();

        Snapshot {
            state: self.state(),
            percent: self.percent(),
            prompt,
            cursor: SnapshotCursor {
                index: cursor.index,
                byte_offset: cursor.byte_offset,
                visible,
            },
            lines: self
                .scrollback
                .iter()
                .map(|line| line.as_str().to_string())
                .collect(),
            scroll_offset: self.scroll_offset,
        }
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::new(ConsoleConfig::default())
    }
}

impl fmt::Debug for Console {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Console")
            .field("state", &self.state())
            .field("prompt", &self.prompt.as_str())
            .field("scrollback", &self.scrollback.len())
            .field("history", &self.history.len())
            .field("dispatcher", &self.dispatcher)
            .finish()
    }
}
