//! Built-in commands
//!
//! `exit`, `clear` and `help` are registered on every console. They can be
//! shadowed by registering a command with the same name.

use console_parser::Args;

use crate::dispatcher::{CommandContext, Dispatcher};
use crate::error::{Error, Result};

/// Register the built-in commands
pub fn register_builtins(dispatcher: &mut Dispatcher) {
    dispatcher.register_with_help("clear", "clears the text pane of text", clear);
    dispatcher.register_with_help(
        "exit",
        "exits the program with exit code [code] (default 0)",
        exit,
    );
    dispatcher.register_with_help("help", "lists the available commands", help);
}

/// `exit [code]`
fn exit(ctx: &mut CommandContext<'_>, args: &str) -> Result<()> {
    let mut args = Args::new(args);
    if args.count_args() > 1 {
        return Err(Error::Arity {
            command: "exit".to_string(),
            expected: "does only take one argument",
        });
    }

    let code = match args.next_arg() {
        None => 0,
        Some(arg) => {
            let arg = arg?;
            arg.parse::<i32>().map_err(|_| Error::InvalidArgument {
                command: "exit".to_string(),
                message: format!("'{}' is not an integer exit code", arg),
            })?
        }
    };

    log::debug!("exit requested with code {}", code);
    ctx.request_exit(code);
    Ok(())
}

/// `clear`
fn clear(ctx: &mut CommandContext<'_>, args: &str) -> Result<()> {
    if Args::new(args).count_args() > 0 {
        return Err(Error::Arity {
            command: "clear".to_string(),
            expected: "does not take any arguments",
        });
    }
    ctx.clear();
    Ok(())
}

/// `help`
fn help(ctx: &mut CommandContext<'_>, _args: &str) -> Result<()> {
    let listing: Vec<String> = ctx
        .commands()
        .map(|(name, help)| match help {
            Some(help) => format!("    {:<20}: {}", name, help),
            None => format!("    {}", name),
        })
        .collect();

    ctx.write_line("command help:");
    for line in &listing {
        ctx.write_line(line);
    }
    Ok(())
}
