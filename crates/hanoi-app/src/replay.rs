//! Paced playback of a solver ledger.

use std::num::NonZero;

use hanoi_solver::Step;

/// Hands out one ledger step every `frames_per_step` frames.
#[derive(Debug, Clone)]
pub struct Replay {
    steps: Vec<Step>,
    next: usize,
    frames_per_step: NonZero<usize>,
    frames_left: usize,
}

impl Replay {
    #[must_use]
    pub fn new(steps: Vec<Step>, frames_per_step: NonZero<usize>) -> Self {
        Self {
            steps,
            next: 0,
            frames_per_step,
            frames_left: frames_per_step.get(),
        }
    }

    /// Advances one frame and returns the step due on this frame, if any.
    pub fn tick(&mut self) -> Option<Step> {
        let step = *self.steps.get(self.next)?;
        self.frames_left -= 1;
        if self.frames_left > 0 {
            return None;
        }
        self.frames_left = self.frames_per_step.get();
        self.next += 1;
        Some(step)
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.next >= self.steps.len()
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.steps.len() - self.next
    }
}
