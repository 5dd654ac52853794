//! Event scripts
//!
//! A script drives a console without a window: one step per line, each
//! turned into the input events a frame loop would deliver. Blank lines and
//! lines starting with `#` are skipped.
//!
//! ```text
//! open                # press the activation key and run the animation
//! type echo hi        # type text (everything after the first space)
//! enter               # press and release Enter
//! key backspace       # key down (held until `up`)
//! tick 0.6            # let 0.6 seconds pass in one frame
//! up backspace        # key up
//! scroll 3            # mouse wheel
//! print               # render the current frame
//! close               # press the activation key and run the animation
//! ```

use console_core::{AnimationState, Console, InputEvent, Key, Layout, Renderer};

use crate::error::{AppError, Result};

/// Frame duration used while animating `open` and `close`
pub const FRAME_SECONDS: f32 = 1.0 / 60.0;

/// One script step
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Open,
    Close,
    Type(String),
    Enter,
    KeyDown(Key),
    KeyUp(Key),
    Tick(f32),
    Scroll(i32),
    Print,
}

/// Parse a whole script
pub fn parse_script(source: &str) -> Result<Vec<Step>> {
    let mut steps = Vec::new();
    for (index, raw) in source.lines().enumerate() {
        if let Some(step) = parse_step(raw).map_err(|message| AppError::Script {
            line: index + 1,
            message,
        })? {
            steps.push(step);
        }
    }
    Ok(steps)
}

/// Parse one line; `Ok(None)` for blank lines and comments
fn parse_step(raw: &str) -> std::result::Result<Option<Step>, String> {
    let line = raw.trim_end_matches(['\r', '\n']);
    let trimmed = line.trim_start();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let (verb, rest) = trimmed
        .split_once(' ')
        .unwrap_or((trimmed, ""));

    let step = match verb {
        "open" => Step::Open,
        "close" => Step::Close,
        "enter" => Step::Enter,
        "print" => Step::Print,
        // Typed text is taken verbatim, spaces included
        "type" => Step::Type(rest.to_string()),
        "key" => Step::KeyDown(parse_key(rest)?),
        "up" => Step::KeyUp(parse_key(rest)?),
        "tick" => {
            let secs: f32 = rest
                .trim()
                .parse()
                .map_err(|_| format!("'{}' is not a number of seconds", rest.trim()))?;
            if !secs.is_finite() || secs < 0.0 {
                return Err(format!("tick needs a non-negative duration, got {}", secs));
            }
            Step::Tick(secs)
        }
        "scroll" => Step::Scroll(
            rest.trim()
                .parse()
                .map_err(|_| format!("'{}' is not a line count", rest.trim()))?,
        ),
        other => return Err(format!("unknown step '{}'", other)),
    };
    Ok(Some(step))
}

fn parse_key(name: &str) -> std::result::Result<Key, String> {
    name.parse().map_err(|e: console_core::Error| e.to_string())
}

/// Press the activation key if needed and tick until the console rests
pub(crate) fn settle(console: &mut Console, target: AnimationState) {
    if console.state() != target {
        let key = console.config().activation_key;
        console.update(&[InputEvent::KeyDown(key), InputEvent::KeyUp(key)]);
    }
    // One step per frame, plus slack for the first frame
    let frames = console.config().animation_steps as usize + 2;
    for _ in 0..frames {
        if !console.state().is_animating() {
            break;
        }
        let dt = FRAME_SECONDS.max(console.config().step_interval * 2.0);
        console.handle_event(InputEvent::FrameTick(dt));
    }
}

/// Feed `steps` to `console`, rendering on `print`
///
/// Stops early when a command requests exit and returns its code.
pub fn run_script<R: Renderer>(
    console: &mut Console,
    steps: &[Step],
    renderer: &mut R,
    layout: &Layout,
) -> std::result::Result<Option<i32>, R::Error> {
    for step in steps {
        log::trace!("script step {:?}", step);
        match step {
            Step::Open => settle(console, AnimationState::Opened),
            Step::Close => settle(console, AnimationState::Closed),
            Step::Type(text) => {
                let events: Vec<InputEvent> = text.chars().map(InputEvent::Char).collect();
                console.update(&events);
            }
            Step::Enter => console.update(&[
                InputEvent::KeyDown(Key::Enter),
                InputEvent::KeyUp(Key::Enter),
            ]),
            Step::KeyDown(key) => console.handle_event(InputEvent::KeyDown(*key)),
            Step::KeyUp(key) => console.handle_event(InputEvent::KeyUp(*key)),
            Step::Tick(secs) => console.handle_event(InputEvent::FrameTick(*secs)),
            Step::Scroll(lines) => console.handle_event(InputEvent::Scroll(*lines)),
            Step::Print => renderer.render(&console.snapshot(), layout)?,
        }

        if let Some(code) = console.exit_requested() {
            log::debug!("script stopped by exit {}", code);
            return Ok(Some(code));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::TextRenderer;

    fn run(source: &str) -> (Console, Option<i32>, String) {
        let steps = parse_script(source).unwrap();
        let mut console = Console::default();
        let mut renderer = TextRenderer::new(Vec::new());
        let code = run_script(&mut console, &steps, &mut renderer, &Layout::default()).unwrap();
        let printed = String::from_utf8(renderer.into_inner()).unwrap();
        (console, code, printed)
    }

    #[test]
    fn test_parse_steps() {
        let steps = parse_script("# comment\n\nopen\ntype  two spaces\nkey F3\nup left\ntick 0.5\nscroll -2\nenter\n").unwrap();
        assert_eq!(
            steps,
            vec![
                Step::Open,
                Step::Type(" two spaces".to_string()),
                Step::KeyDown(Key::F3),
                Step::KeyUp(Key::Left),
                Step::Tick(0.5),
                Step::Scroll(-2),
                Step::Enter,
            ]
        );
    }

    #[test]
    fn test_parse_errors_name_the_line() {
        let err = parse_script("open\njump\n").unwrap_err();
        assert_eq!(err.to_string(), "script line 2: unknown step 'jump'");

        let err = parse_script("key hyper").unwrap_err();
        assert_eq!(
            err.to_string(),
            "script line 1: unknown key name 'hyper'"
        );
        assert!(parse_script("tick soon").is_err());
        assert!(parse_script("tick -1").is_err());
    }

    #[test]
    fn test_open_and_close() {
        let (console, _, _) = run("open");
        assert_eq!(console.state(), AnimationState::Opened);
        let (console, _, _) = run("open\nclose");
        assert_eq!(console.state(), AnimationState::Closed);
        // Opening twice stays open
        let (console, _, _) = run("open\nopen");
        assert_eq!(console.state(), AnimationState::Opened);
    }

    #[test]
    fn test_typing_before_open_is_ignored() {
        let (console, _, _) = run("type lost\nopen\ntype kept");
        assert_eq!(console.line_buffer().as_str(), "kept");
    }

    #[test]
    fn test_exit_stops_script() {
        let (console, code, _) = run("open\ntype exit 4\nenter\ntype after");
        assert_eq!(code, Some(4));
        assert!(console.line_buffer().is_empty());
    }

    #[test]
    fn test_print_renders_frame() {
        let (_, _, printed) = run("open\ntype help\nenter\ntype x\ntick 0.1\nprint");
        assert!(printed.contains("command help:"));
        assert!(printed.ends_with("x_\n"));
    }

    #[test]
    fn test_held_backspace() {
        let (console, _, _) = run("open\ntype abcdef\nkey backspace\ntick 0.6\ntick 0.03\nup backspace\ntick 1");
        assert_eq!(console.line_buffer().as_str(), "abc");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::renderer::TextRenderer;
    use proptest::prelude::*;

    proptest! {
        /// Everything after `type ` reaches the step unchanged.
        #[test]
        fn type_text_is_verbatim(text in "[^\r\n]{0,40}") {
            let steps = parse_script(&format!("type {}", text)).unwrap();
            prop_assert_eq!(steps, vec![Step::Type(text)]);
        }

        /// An open console's prompt holds the typed text minus control characters.
        #[test]
        fn typed_text_lands_in_prompt(text in "[^\r\n]{0,40}") {
            let steps = vec![Step::Open, Step::Type(text.clone())];
            let mut console = Console::default();
            let mut renderer = TextRenderer::new(Vec::new());
            run_script(&mut console, &steps, &mut renderer, &Layout::default()).unwrap();

            let expected: String = text.chars().filter(|c| !c.is_control()).collect();
            prop_assert_eq!(console.line_buffer().as_str(), expected.as_str());
            prop_assert_eq!(console.line_buffer().cursor().index, expected.chars().count());
        }
    }
}
