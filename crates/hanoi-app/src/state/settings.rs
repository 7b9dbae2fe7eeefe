use std::num::NonZero;

use hanoi_solver::DEFAULT_CYCLES_PER_QUANTUM;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Settings {
    pub solver: SolverSettings,
    pub replay: ReplaySettings,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverSettings {
    /// Search cycles run per frame while solving.
    pub cycles_per_tick: NonZero<usize>,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            cycles_per_tick: DEFAULT_CYCLES_PER_QUANTUM,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaySettings {
    /// Frames spent on each replayed step.
    pub frames_per_step: NonZero<usize>,
}

impl Default for ReplaySettings {
    fn default() -> Self {
        Self {
            frames_per_step: NonZero::<usize>::MIN,
        }
    }
}
