//! Plain-text renderer
//!
//! Draws console frames as lines of text: the rows that fit in the window at
//! its current height, oldest output at the top and the prompt last. Used by
//! the script driver and anywhere a frame needs to be inspected without a
//! GPU. With a [`Palette`] each row is wrapped in 24-bit SGR color
//! sequences for terminals.

use std::io::{self, Write};

use console_core::{Layout, Renderer, Snapshot};

/// Rows a window of the snapshot's height shows, top to bottom
///
/// Empty when the window is too short to hold even the prompt.
pub fn frame_rows<'a>(snapshot: &'a Snapshot, layout: &Layout) -> Vec<&'a str> {
    let height = layout.window_height(snapshot.percent);
    let rows = layout.visible_rows(height);
    if rows == 0 {
        return Vec::new();
    }

    let mut shown: Vec<&str> = snapshot.visible_lines().take(rows - 1).collect();
    shown.reverse();
    shown.push(&snapshot.prompt);
    shown
}

/// Text and window colors as RGB
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub foreground: (u8, u8, u8),
    pub background: (u8, u8, u8),
}

impl Palette {
    fn write_row<W: Write>(&self, out: &mut W, row: &str) -> io::Result<()> {
        let (fr, fg, fb) = self.foreground;
        let (br, bg, bb) = self.background;
        writeln!(
            out,
            "\x1b[38;2;{};{};{}m\x1b[48;2;{};{};{}m{}\x1b[0m",
            fr, fg, fb, br, bg, bb, row
        )
    }
}

/// Renderer writing frames to an `io::Write`
pub struct TextRenderer<W: Write> {
    out: W,
    frames: usize,
    palette: Option<Palette>,
}

impl<W: Write> TextRenderer<W> {
    /// Plain text output
    pub fn new(out: W) -> Self {
        Self {
            out,
            frames: 0,
            palette: None,
        }
    }

    /// Colored output for a terminal
    pub fn with_palette(out: W, palette: Palette) -> Self {
        Self {
            out,
            frames: 0,
            palette: Some(palette),
        }
    }

    /// Number of frames drawn so far
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Get the underlying writer back
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    type Error = io::Error;

    fn render(&mut self, snapshot: &Snapshot, layout: &Layout) -> io::Result<()> {
        self.frames += 1;
        let rows = frame_rows(snapshot, layout);
        if rows.is_empty() {
            writeln!(self.out, "[console {:?}]", snapshot.state)?;
        } else {
            for row in rows {
                match &self.palette {
                    Some(palette) => palette.write_row(&mut self.out, row)?,
                    None => writeln!(self.out, "{}", row)?,
                }
            }
        }
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use console_core::{AnimationState, SnapshotCursor};

    fn snapshot(percent: f32, lines: &[&str]) -> Snapshot {
        Snapshot {
            state: if percent >= 1.0 {
                AnimationState::Opened
            } else {
                AnimationState::Closed
            },
            percent,
            prompt: "> _".to_string(),
            cursor: SnapshotCursor {
                index: 2,
                byte_offset: 2,
                visible: true,
            },
            lines: lines.iter().map(|l| l.to_string()).collect(),
            scroll_offset: 0,
        }
    }

    fn layout() -> Layout {
        // Three rows of 20px when fully open
        Layout {
            viewport_height: 60.0,
            viewport_fraction: 1.0,
            font_size: 18.0,
            line_spacing: 2.0,
        }
    }

    #[test]
    fn test_frame_rows_fit_window() {
        let s = snapshot(1.0, &["newest", "middle", "oldest"]);
        assert_eq!(frame_rows(&s, &layout()), vec!["middle", "newest", "> _"]);
    }

    #[test]
    fn test_frame_rows_closed() {
        let s = snapshot(0.0, &["line"]);
        assert!(frame_rows(&s, &layout()).is_empty());
    }

    #[test]
    fn test_frame_rows_scrolled() {
        let mut s = snapshot(1.0, &["4", "3", "2", "1"]);
        s.scroll_offset = 2;
        assert_eq!(frame_rows(&s, &layout()), vec!["1", "2", "> _"]);
    }

    #[test]
    fn test_text_renderer_output() {
        let mut renderer = TextRenderer::new(Vec::new());
        renderer
            .render(&snapshot(1.0, &["hello"]), &layout())
            .unwrap();
        renderer.render(&snapshot(0.0, &[]), &layout()).unwrap();
        assert_eq!(renderer.frames(), 2);

        let text = String::from_utf8(renderer.into_inner()).unwrap();
        assert_eq!(text, "hello\n> _\n[console Closed]\n");
    }

    #[test]
    fn test_palette_colors_rows() {
        let palette = Palette {
            foreground: (245, 245, 245),
            background: (30, 30, 30),
        };
        let mut renderer = TextRenderer::with_palette(Vec::new(), palette);
        renderer
            .render(&snapshot(1.0, &["hello"]), &layout())
            .unwrap();
        renderer.render(&snapshot(0.0, &[]), &layout()).unwrap();

        let text = String::from_utf8(renderer.into_inner()).unwrap();
        assert_eq!(
            text,
            "\x1b[38;2;245;245;245m\x1b[48;2;30;30;30mhello\x1b[0m\n\
             \x1b[38;2;245;245;245m\x1b[48;2;30;30;30m> _\x1b[0m\n\
             [console Closed]\n"
        );
    }
}
