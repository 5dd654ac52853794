//! Open/close animation
//!
//! The console slides in and out over a fixed number of steps. Each frame
//! tick accumulates elapsed time, and once it passes the step interval the
//! open fraction moves by one step. Counting steps instead of adding float
//! increments means the fraction lands exactly on 0.0 and 1.0.

use serde::{Deserialize, Serialize};

/// Visibility state of the console
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationState {
    #[default]
    Closed,
    Opening,
    Opened,
    Closing,
}

impl AnimationState {
    /// Check if the console is moving between closed and opened
    pub fn is_animating(self) -> bool {
        matches!(self, AnimationState::Opening | AnimationState::Closing)
    }
}

/// Animation progress
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    state: AnimationState,
    /// Steps taken towards fully open
    step: u32,
    /// Steps between closed and opened
    steps: u32,
    timer: f32,
    step_interval: f32,
}

impl Animation {
    /// Create a closed animation
    ///
    /// `steps` is clamped to at least 1.
    pub fn new(steps: u32, step_interval: f32) -> Self {
        Self {
            state: AnimationState::Closed,
            step: 0,
            steps: steps.max(1),
            timer: 0.0,
            step_interval,
        }
    }

    /// Get the current state
    pub fn state(&self) -> AnimationState {
        self.state
    }

    /// Check if fully open
    pub fn is_opened(&self) -> bool {
        self.state == AnimationState::Opened
    }

    /// Fraction open, in [0, 1]
    pub fn percent(&self) -> f32 {
        self.step as f32 / self.steps as f32
    }

    /// Start opening or closing
    ///
    /// Only a resting console reacts; returns false while animating.
    pub fn toggle(&mut self) -> bool {
        let next = match self.state {
            AnimationState::Closed => AnimationState::Opening,
            AnimationState::Opened => AnimationState::Closing,
            AnimationState::Opening | AnimationState::Closing => return false,
        };
        self.transition(next);
        true
    }

    /// Advance by `dt` seconds
    ///
    /// Returns true if the state changed.
    pub fn tick(&mut self, dt: f32) -> bool {
        if !self.state.is_animating() {
            return false;
        }

        self.timer += dt;
        if self.timer <= self.step_interval {
            return false;
        }
        self.timer = 0.0;

        match self.state {
            AnimationState::Opening => {
                self.step = (self.step + 1).min(self.steps);
                if self.step == self.steps {
                    self.transition(AnimationState::Opened);
                    return true;
                }
            }
            AnimationState::Closing => {
                self.step = self.step.saturating_sub(1);
                if self.step == 0 {
                    self.transition(AnimationState::Closed);
                    return true;
                }
            }
            AnimationState::Closed | AnimationState::Opened => {}
        }
        false
    }

    fn transition(&mut self, next: AnimationState) {
        log::debug!("console {:?} -> {:?}", self.state, next);
        self.state = next;
        self.timer = 0.0;
    }
}
