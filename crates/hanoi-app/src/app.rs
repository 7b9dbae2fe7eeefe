//! Frame-driven host for the puzzle.
//!
//! # Design Notes
//! - Each frame drains queued actions, runs one solver quantum, and advances
//!   solution playback by one frame.
//! - Player input is blocked while a solve task or playback is in progress.

use hanoi_game::Game;
use hanoi_solver::Outcome;

use crate::{
    action::ActionRequestQueue,
    action_handler,
    replay::Replay,
    state::{AppState, Settings, SolveStatus},
};

#[derive(Debug)]
pub struct HanoiApp {
    state: AppState,
    frame: usize,
}

impl HanoiApp {
    #[must_use]
    pub fn new(game: Game, settings: Settings) -> Self {
        Self {
            state: AppState::new(game, settings),
            frame: 0,
        }
    }

    #[must_use]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    #[must_use]
    pub fn frame(&self) -> usize {
        self.frame
    }

    /// Returns `true` when no solve task or playback is pending.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        !self.state.is_busy()
    }

    pub fn update(&mut self, action_queue: &mut ActionRequestQueue) {
        self.frame += 1;
        action_handler::handle_all(&mut self.state, action_queue);

        if let Some(outcome) = self.state.scheduler.tick() {
            self.finish_solve(outcome);
        }
        self.advance_replay();
    }

    fn finish_solve(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Solved(steps) => {
                log::info!("solution found with {} steps", steps.len());
                for step in &steps {
                    log::info!("{step}");
                }
                let frames_per_step = self.state.settings.replay.frames_per_step;
                self.state.replay = Some(Replay::new(steps, frames_per_step));
                self.state.status = SolveStatus::Replaying;
            }
            Outcome::Failed => {
                log::warn!("no solution found for {}", self.state.game.arrangement());
                self.state.status = SolveStatus::NoSolution;
            }
        }
    }

    fn advance_replay(&mut self) {
        let Some(replay) = &mut self.state.replay else {
            return;
        };
        if let Some(step) = replay.tick()
            && let Err(err) = self.state.game.apply_step(&step)
        {
            log::warn!("stopping playback: {err}");
            self.state.replay = None;
            self.state.status = SolveStatus::Idle;
            return;
        }
        if replay.is_finished() {
            log::info!(
                "playback finished after {} moves: {}",
                self.state.game.moves(),
                self.state.game.arrangement()
            );
            self.state.replay = None;
            self.state.status = SolveStatus::Replayed;
        }
    }
}
