//! Golden tests for scripted console sessions
//!
//! Each `.script` file under `tests/scripts/` is run against a fresh console
//! and the final frame text is compared with the matching `.txt` file.

use console_core::{
    AnimationState, Args, CommandContext, Console, ConsoleConfig, InputEvent, Key, Layout, Line,
    Result,
};
use devconsole::renderer::{frame_rows, TextRenderer};
use devconsole::script::{parse_script, run_script};

/// Echo each argument separated by `|`
fn echo(ctx: &mut CommandContext<'_>, args: &str) -> Result<()> {
    let args = Args::new(args).collect_args()?;
    ctx.write_line(&args.join("|"));
    Ok(())
}

fn console() -> Console {
    let mut console = Console::default();
    console.register("echo", echo);
    console
}

fn run_golden(script: &str, expected: &str) {
    let steps = parse_script(script).unwrap();
    let mut console = console();
    let mut renderer = TextRenderer::new(Vec::new());
    run_script(&mut console, &steps, &mut renderer, &Layout::default()).unwrap();
    assert_eq!(console.snapshot().to_text(), expected.trim_end_matches('\n'));
}

#[test]
fn test_golden_echo_history() {
    run_golden(
        include_str!("scripts/echo_history.script"),
        include_str!("scripts/echo_history.txt"),
    );
}

#[test]
fn test_golden_errors() {
    run_golden(
        include_str!("scripts/errors.script"),
        include_str!("scripts/errors.txt"),
    );
}

#[test]
fn test_unknown_verb_writes_exactly_one_line() {
    let mut console = console();
    console.execute("nosuch thing");
    let lines: Vec<&str> = console.scrollback().iter().map(Line::as_str).collect();
    assert_eq!(lines, vec!["Error: nosuch: No such command"]);
}

#[test]
fn test_edit_in_the_middle() {
    let steps = parse_script(
        "open\ntype echo helo\nkey left\nup left\ntype l\nkey home\nup home\nkey end\nup end\nenter",
    )
    .unwrap();
    let mut console = console();
    let mut renderer = TextRenderer::new(Vec::new());
    run_script(&mut console, &steps, &mut renderer, &Layout::default()).unwrap();
    assert_eq!(console.scrollback().get(0).unwrap().as_str(), "hello");
}

#[test]
fn test_utf8_editing() {
    let mut console = console();
    let steps = parse_script("open\ntype echo 日本語\nkey backspace\nup backspace\ntype 🎌").unwrap();
    let mut renderer = TextRenderer::new(Vec::new());
    run_script(&mut console, &steps, &mut renderer, &Layout::default()).unwrap();
    assert_eq!(console.line_buffer().as_str(), "echo 日本🎌");
    assert_eq!(console.line_buffer().cursor().index, 8);
}

#[test]
fn test_commands_registered_by_commands() {
    let mut console = console();
    console.register("alias", |ctx: &mut CommandContext<'_>, args: &str| -> Result<()> {
        let name = args.trim().to_string();
        ctx.register(&name, echo);
        write!(ctx, "alias {} -> echo", name);
        Ok(())
    });

    console.execute("say nothing");
    console.execute("alias say");
    console.execute("say something");
    let lines: Vec<&str> = console.scrollback().iter().map(Line::as_str).collect();
    assert_eq!(
        lines,
        vec!["something", "alias say -> echo", "Error: say: No such command"]
    );
}

#[test]
fn test_long_output_is_truncated_not_rejected() {
    let mut console = Console::new(ConsoleConfig {
        line_capacity: 8,
        ..ConsoleConfig::default()
    });
    console.register("echo", echo);
    console.execute("echo abcdefghijkl");
    assert_eq!(console.scrollback().get(0).unwrap().as_str(), "abcdefgh");
}

#[test]
fn test_frame_follows_animation() {
    let mut console = console();
    let layout = Layout::default();
    console.write_line("visible when open");

    assert!(frame_rows(&console.snapshot(), &layout).is_empty());

    console.handle_event(InputEvent::KeyDown(Key::F3));
    for _ in 0..10 {
        console.handle_event(InputEvent::FrameTick(0.002));
    }
    assert_eq!(console.state(), AnimationState::Opening);
    let partial = frame_rows(&console.snapshot(), &layout).len();

    for _ in 0..90 {
        console.handle_event(InputEvent::FrameTick(0.002));
    }
    assert_eq!(console.state(), AnimationState::Opened);
    let snapshot = console.snapshot();
    let full = frame_rows(&snapshot, &layout);
    assert!(full.len() > partial);
    assert_eq!(full, vec!["visible when open", "_"]);
}

#[test]
fn test_scroll_back_through_output() {
    let steps = parse_script("open\nscroll 2\nprint").unwrap();
    let mut console = console();
    for i in 0..5 {
        write!(console, "line {}", i);
    }
    let mut renderer = TextRenderer::new(Vec::new());
    run_script(&mut console, &steps, &mut renderer, &Layout::default()).unwrap();
    let printed = String::from_utf8(renderer.into_inner()).unwrap();
    assert_eq!(printed, "line 0\nline 1\nline 2\n_\n");
}
