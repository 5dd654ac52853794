//! Command dispatch
//!
//! The dispatcher owns the command table and routes a submitted line to the
//! handler registered for its verb. Handlers get a [`CommandContext`] giving
//! them the scrollback write API and a way to ask the console for things
//! (exit, clear, new commands) that must not happen while the table is
//! borrowed.

use std::collections::BTreeMap;
use std::fmt;

use console_parser::CommandLine;

use crate::error::{Error, Result};
use crate::scrollback::Scrollback;

/// A console command handler
///
/// `args` is the raw text after the verb with leading whitespace removed.
/// Handlers tokenize it themselves when they need to (see
/// [`console_parser::Args`]).
pub trait Command {
    /// Run the command once
    fn run(&mut self, ctx: &mut CommandContext<'_>, args: &str) -> Result<()>;
}

impl<F> Command for F
where
    F: FnMut(&mut CommandContext<'_>, &str) -> Result<()>,
{
    fn run(&mut self, ctx: &mut CommandContext<'_>, args: &str) -> Result<()> {
        self(ctx, args)
    }
}

type BoxedCommand = Box<dyn Command>;

/// A registration queued by a running handler
struct PendingCommand {
    name: String,
    help: Option<String>,
    command: BoxedCommand,
}

/// What a handler is allowed to touch while it runs
pub struct CommandContext<'a> {
    scrollback: &'a mut Scrollback,
    help: &'a BTreeMap<String, Option<String>>,
    pending: Vec<PendingCommand>,
    outcome: DispatchOutcome,
}

impl<'a> CommandContext<'a> {
    fn new(scrollback: &'a mut Scrollback, help: &'a BTreeMap<String, Option<String>>) -> Self {
        Self {
            scrollback,
            help,
            pending: Vec::new(),
            outcome: DispatchOutcome::default(),
        }
    }

    /// Write a line of output
    pub fn write_line(&mut self, text: &str) {
        self.scrollback.write_line(text);
    }

    /// Write a formatted line of output
    pub fn write_fmt(&mut self, args: fmt::Arguments<'_>) {
        self.scrollback.write_fmt(args);
    }

    /// Read access to the output written so far
    pub fn scrollback(&self) -> &Scrollback {
        self.scrollback
    }

    /// Register a command once the current one has returned
    pub fn register(&mut self, name: &str, command: impl Command + 'static) {
        self.pending.push(PendingCommand {
            name: name.to_string(),
            help: None,
            command: Box::new(command),
        });
    }

    /// Like [`register`](Self::register), with a one-line description
    pub fn register_with_help(&mut self, name: &str, help: &str, command: impl Command + 'static) {
        self.pending.push(PendingCommand {
            name: name.to_string(),
            help: Some(help.to_string()),
            command: Box::new(command),
        });
    }

    /// Registered command names with their descriptions, sorted by name
    pub fn commands(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.help
            .iter()
            .map(|(name, help)| (name.as_str(), help.as_deref()))
    }

    /// Ask the host to terminate with `code`
    pub fn request_exit(&mut self, code: i32) {
        self.outcome.exit = Some(code);
    }

    /// Empty the scrollback and ask the console to reset its view
    pub fn clear(&mut self) {
        self.scrollback.clear();
        self.outcome.cleared = true;
    }
}

/// Requests a handler left for the console
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchOutcome {
    /// Exit code requested by the handler
    pub exit: Option<i32>,
    /// The scrollback was cleared
    pub cleared: bool,
}

/// Command table keyed by verb
pub struct Dispatcher {
    handlers: BTreeMap<String, BoxedCommand>,
    help: BTreeMap<String, Option<String>>,
    /// Longest accepted verb in bytes
    verb_capacity: usize,
}

impl Dispatcher {
    /// Create an empty dispatcher accepting verbs up to `verb_capacity` bytes
    pub fn new(verb_capacity: usize) -> Self {
        Self {
            handlers: BTreeMap::new(),
            help: BTreeMap::new(),
            verb_capacity,
        }
    }

    /// Add a command, replacing any previous one with the same name
    ///
    /// Returns true if a command was replaced.
    pub fn register(&mut self, name: &str, command: impl Command + 'static) -> bool {
        self.insert(name.to_string(), None, Box::new(command))
    }

    /// Add a command with a one-line description shown by `help`
    pub fn register_with_help(
        &mut self,
        name: &str,
        help: &str,
        command: impl Command + 'static,
    ) -> bool {
        self.insert(name.to_string(), Some(help.to_string()), Box::new(command))
    }

    fn insert(&mut self, name: String, help: Option<String>, command: BoxedCommand) -> bool {
        let replaced = self.handlers.insert(name.clone(), command).is_some();
        if replaced {
            log::debug!("command '{}' replaced", name);
        } else {
            log::debug!("command '{}' registered", name);
        }
        self.help.insert(name, help);
        replaced
    }

    /// Check if a command is registered
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Number of registered commands
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Check if no command is registered
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Registered names, sorted
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }

    /// Run the command named by the first word of `line`
    ///
    /// An empty line does nothing and returns `Ok(None)`. A line without a
    /// verb, or with a verb longer than the verb capacity, fails with
    /// `NoSuchCommand("")`. Otherwise the handler runs exactly once and any
    /// commands it registered are added after it returns.
    pub fn dispatch(
        &mut self,
        line: &str,
        scrollback: &mut Scrollback,
    ) -> Result<Option<DispatchOutcome>> {
        if line.is_empty() {
            return Ok(None);
        }

        let Some(cmd) = CommandLine::parse(line) else {
            return Err(Error::NoSuchCommand(String::new()));
        };
        if cmd.verb.len() > self.verb_capacity {
            log::debug!("verb of {} bytes exceeds capacity", cmd.verb.len());
            return Err(Error::NoSuchCommand(String::new()));
        }

        let Some(handler) = self.handlers.get_mut(cmd.verb) else {
            log::debug!("no such command: {}", cmd.verb);
            return Err(Error::NoSuchCommand(cmd.verb.to_string()));
        };

        log::debug!("dispatching '{}' with {} bytes of arguments", cmd.verb, cmd.args.len());
        let mut ctx = CommandContext::new(scrollback, &self.help);
        let result = handler.run(&mut ctx, cmd.args);
        let CommandContext {
            pending, outcome, ..
        } = ctx;

        for p in pending {
            self.insert(p.name, p.help, p.command);
        }

        result.map(|()| Some(outcome))
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_LINE_CAPACITY)
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("commands", &self.help.keys().collect::<Vec<_>>())
            .field("verb_capacity", &self.verb_capacity)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line::Line;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn texts(sb: &Scrollback) -> Vec<&str> {
        sb.iter().map(Line::as_str).collect()
    }

    fn echo(ctx: &mut CommandContext<'_>, args: &str) -> Result<()> {
        ctx.write_line(args);
        Ok(())
    }

    #[test]
    fn test_dispatch_passes_raw_remainder() {
        let mut dispatcher = Dispatcher::new(64);
        let mut sb = Scrollback::new(8, 64);
        dispatcher.register("echo", echo);

        let outcome = dispatcher.dispatch("echo hello world", &mut sb).unwrap();
        assert_eq!(outcome, Some(DispatchOutcome::default()));
        assert_eq!(texts(&sb), vec!["hello world"]);

        dispatcher.dispatch("  echo \t spaced  out ", &mut sb).unwrap();
        assert_eq!(sb.get(0).unwrap().as_str(), "spaced  out ");
    }

    #[test]
    fn test_empty_line_is_noop() {
        let mut dispatcher = Dispatcher::new(64);
        let mut sb = Scrollback::new(8, 64);
        assert_eq!(dispatcher.dispatch("", &mut sb), Ok(None));
        assert!(sb.is_empty());
    }

    #[test]
    fn test_blank_line_has_no_verb() {
        let mut dispatcher = Dispatcher::new(64);
        let mut sb = Scrollback::new(8, 64);
        assert_eq!(
            dispatcher.dispatch("   ", &mut sb),
            Err(Error::NoSuchCommand(String::new()))
        );
    }

    #[test]
    fn test_unknown_verb() {
        let mut dispatcher = Dispatcher::new(64);
        let mut sb = Scrollback::new(8, 64);
        dispatcher.register("echo", echo);
        let err = dispatcher.dispatch("frobnicate now", &mut sb).unwrap_err();
        assert_eq!(err.to_string(), "frobnicate: No such command");
        assert!(sb.is_empty());
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let mut dispatcher = Dispatcher::new(64);
        let mut sb = Scrollback::new(8, 64);
        dispatcher.register("echo", echo);
        assert!(dispatcher.dispatch("ECHO hi", &mut sb).is_err());
    }

    #[test]
    fn test_verb_over_capacity() {
        let mut dispatcher = Dispatcher::new(4);
        let mut sb = Scrollback::new(8, 64);
        dispatcher.register("toolong", echo);
        assert_eq!(
            dispatcher.dispatch("toolong x", &mut sb),
            Err(Error::NoSuchCommand(String::new()))
        );
    }

    #[test]
    fn test_register_replaces() {
        let mut dispatcher = Dispatcher::new(64);
        let mut sb = Scrollback::new(8, 64);
        assert!(!dispatcher.register("greet", |ctx: &mut CommandContext<'_>, _: &str| -> Result<()> {
            ctx.write_line("first");
            Ok(())
        }));
        assert!(dispatcher.register("greet", |ctx: &mut CommandContext<'_>, _: &str| -> Result<()> {
            ctx.write_line("second");
            Ok(())
        }));
        assert_eq!(dispatcher.len(), 1);
        dispatcher.dispatch("greet", &mut sb).unwrap();
        assert_eq!(texts(&sb), vec!["second"]);
    }

    #[test]
    fn test_handler_runs_once_with_state() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let seen = Rc::clone(&calls);
        let mut dispatcher = Dispatcher::new(64);
        let mut sb = Scrollback::new(8, 64);
        dispatcher.register("record", move |_: &mut CommandContext<'_>, args: &str| -> Result<()> {
            seen.borrow_mut().push(args.to_string());
            Ok(())
        });

        dispatcher.dispatch("record a", &mut sb).unwrap();
        dispatcher.dispatch("record", &mut sb).unwrap();
        assert_eq!(*calls.borrow(), vec!["a".to_string(), String::new()]);
    }

    #[test]
    fn test_registration_during_dispatch_is_deferred() {
        let mut dispatcher = Dispatcher::new(64);
        let mut sb = Scrollback::new(8, 64);
        dispatcher.register("define", |ctx: &mut CommandContext<'_>, args: &str| -> Result<()> {
            ctx.register(args, echo);
            ctx.write_line(&format!("defined {}", args));
            Ok(())
        });

        assert!(!dispatcher.contains("shout"));
        dispatcher.dispatch("define shout", &mut sb).unwrap();
        assert!(dispatcher.contains("shout"));
        dispatcher.dispatch("shout loud", &mut sb).unwrap();
        assert_eq!(texts(&sb), vec!["loud", "defined shout"]);
    }

    #[test]
    fn test_handler_error_is_returned() {
        let mut dispatcher = Dispatcher::new(64);
        let mut sb = Scrollback::new(8, 64);
        dispatcher.register("fail", |_: &mut CommandContext<'_>, _: &str| -> Result<()> {
            Err(Error::command("it broke"))
        });
        assert_eq!(
            dispatcher.dispatch("fail", &mut sb),
            Err(Error::Command("it broke".to_string()))
        );
    }

    #[test]
    fn test_outcome_requests() {
        let mut dispatcher = Dispatcher::new(64);
        let mut sb = Scrollback::new(8, 64);
        sb.write_line("old output");
        dispatcher.register("quit", |ctx: &mut CommandContext<'_>, _: &str| -> Result<()> {
            ctx.request_exit(3);
            ctx.clear();
            Ok(())
        });

        let outcome = dispatcher.dispatch("quit", &mut sb).unwrap().unwrap();
        assert_eq!(outcome.exit, Some(3));
        assert!(outcome.cleared);
        assert!(sb.is_empty());
    }

    #[test]
    fn test_commands_listing() {
        let mut dispatcher = Dispatcher::new(64);
        let mut sb = Scrollback::new(8, 64);
        dispatcher.register_with_help("zap", "zaps things", echo);
        dispatcher.register("list", |ctx: &mut CommandContext<'_>, _: &str| -> Result<()> {
            let names: Vec<String> = ctx
                .commands()
                .map(|(name, help)| format!("{}={}", name, help.unwrap_or("-")))
                .collect();
            ctx.write_line(&names.join(","));
            Ok(())
        });

        dispatcher.dispatch("list", &mut sb).unwrap();
        assert_eq!(sb.get(0).unwrap().as_str(), "list=-,zap=zaps things");
    }
}
