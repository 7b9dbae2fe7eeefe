use hanoi_game::Game;
use hanoi_solver::SolveScheduler;

use crate::{replay::Replay, state::Settings};

/// Where the automatic solver currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SolveStatus {
    /// Nothing requested, or the last request was cancelled.
    Idle,
    /// A solve task is running.
    Solving,
    /// A solution is being played back onto the game.
    Replaying,
    /// The last solution has been fully played back.
    Replayed,
    /// The solver found no solution.
    NoSolution,
}

#[derive(Debug)]
pub struct AppState {
    pub game: Game,
    pub scheduler: SolveScheduler,
    pub replay: Option<Replay>,
    pub settings: Settings,
    pub status: SolveStatus,
}

impl AppState {
    #[must_use]
    pub fn new(game: Game, settings: Settings) -> Self {
        let scheduler = SolveScheduler::new(settings.solver.cycles_per_tick);
        Self {
            game,
            scheduler,
            replay: None,
            settings,
            status: SolveStatus::Idle,
        }
    }

    /// Returns `true` if player input is currently blocked.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.status.is_solving() || self.status.is_replaying()
    }

    /// Drops any running solve task and pending playback.
    pub fn stop_solving(&mut self) {
        self.scheduler.cancel();
        self.replay = None;
        self.status = SolveStatus::Idle;
    }
}
