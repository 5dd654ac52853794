//! Window geometry and the renderer seam
//!
//! The console window hangs from the top of the viewport and grows to a
//! fixed share of its height. Lines are stacked upwards from the window's
//! bottom edge: row 0 is the prompt, row 1 the newest output line.

use serde::{Deserialize, Serialize};

use crate::snapshot::Snapshot;

/// Pixel geometry of the console window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    /// Viewport height in pixels
    pub viewport_height: f32,
    /// Share of the viewport covered when fully open
    pub viewport_fraction: f32,
    /// Font size in pixels
    pub font_size: f32,
    /// Extra pixels between rows
    pub line_spacing: f32,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            viewport_height: 720.0,
            viewport_fraction: 1.0 / 3.0,
            font_size: 20.0,
            line_spacing: 2.0,
        }
    }
}

impl Layout {
    /// Height of a fully open window
    pub fn max_height(&self) -> f32 {
        self.viewport_height * self.viewport_fraction
    }

    /// Window height at `percent` open
    pub fn window_height(&self, percent: f32) -> f32 {
        lerp(0.0, self.max_height(), percent.clamp(0.0, 1.0))
    }

    /// Distance between row baselines
    pub fn row_pitch(&self) -> f32 {
        self.font_size + self.line_spacing
    }

    /// Top edge of `row` for a window of `window_height`
    ///
    /// Rows above the window get a negative offset.
    pub fn row_y(&self, window_height: f32, row: usize) -> f32 {
        window_height - self.row_pitch() * (row as f32 + 1.0)
    }

    /// Number of rows that fit entirely in the window, prompt included
    pub fn visible_rows(&self, window_height: f32) -> usize {
        let pitch = self.row_pitch();
        if pitch <= 0.0 || window_height <= 0.0 {
            return 0;
        }
        (window_height / pitch).floor() as usize
    }
}

fn lerp(start: f32, end: f32, amount: f32) -> f32 {
    start + amount * (end - start)
}

/// Draws console frames
///
/// Implemented by the host; the console only produces snapshots.
pub trait Renderer {
    type Error;

    /// Draw one frame
    fn render(&mut self, snapshot: &Snapshot, layout: &Layout) -> Result<(), Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> Layout {
        Layout {
            viewport_height: 600.0,
            viewport_fraction: 0.5,
            font_size: 18.0,
            line_spacing: 2.0,
        }
    }

    #[test]
    fn test_window_height_lerps() {
        let l = layout();
        assert_eq!(l.window_height(0.0), 0.0);
        assert_eq!(l.window_height(0.5), 150.0);
        assert_eq!(l.window_height(1.0), 300.0);
        assert_eq!(l.window_height(2.0), 300.0);
    }

    #[test]
    fn test_rows_stack_from_bottom() {
        let l = layout();
        assert_eq!(l.row_y(300.0, 0), 280.0);
        assert_eq!(l.row_y(300.0, 1), 260.0);
        assert!(l.row_y(300.0, 20) < 0.0);
    }

    #[test]
    fn test_visible_rows() {
        let l = layout();
        assert_eq!(l.visible_rows(300.0), 15);
        assert_eq!(l.visible_rows(19.0), 0);
        assert_eq!(l.visible_rows(0.0), 0);
    }
}
