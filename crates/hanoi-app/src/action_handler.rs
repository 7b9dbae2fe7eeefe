use hanoi_core::PuzzleView as _;

use crate::{
    action::{Action, ActionRequestQueue},
    state::{AppState, SolveStatus},
};

pub fn handle_all(state: &mut AppState, action_queue: &mut ActionRequestQueue) {
    for action in action_queue.take_all() {
        handle(state, action);
    }
}

pub fn handle(state: &mut AppState, action: Action) {
    if state.is_busy()
        && matches!(
            action,
            Action::PickUp(_) | Action::DropOn(_) | Action::CancelHold | Action::Move { .. }
        )
    {
        log::warn!("ignoring {action:?} while the solver is busy");
        return;
    }

    match action {
        Action::PickUp(ring) => {
            if let Err(err) = state.game.pick_up(ring) {
                log::warn!("cannot pick up {ring}: {err}");
            }
        }
        Action::DropOn(pin) => match state.game.drop_on(pin) {
            Ok(outcome) => log::debug!("dropped on {pin}: {outcome:?}"),
            Err(err) => log::warn!("cannot drop on {pin}: {err}"),
        },
        Action::CancelHold => {
            if let Err(err) = state.game.cancel_hold() {
                log::warn!("cannot cancel hold: {err}");
            }
        }
        Action::Move { from, to } => {
            let Some(ring) = state.game.top(from) else {
                log::warn!("cannot move from {from}: no ring there");
                return;
            };
            handle(state, Action::PickUp(ring));
            if state.game.held().is_some_and(|held| held.ring() == ring) {
                handle(state, Action::DropOn(to));
            }
        }
        Action::RequestSolve => request_solve(state),
        Action::CancelSolve => {
            if state.status.is_solving() || state.status.is_replaying() {
                state.stop_solving();
            }
        }
        Action::Reset { starter } => {
            state.stop_solving();
            if let Err(err) = state.game.reset(starter) {
                log::warn!("cannot reset onto {starter}: {err}");
            }
        }
        Action::ResetRandom { seed } => {
            state.stop_solving();
            match state.game.reset_random(seed) {
                Ok(starter) => log::info!("reset onto {starter}"),
                Err(err) => log::warn!("cannot reset: {err}"),
            }
        }
    }
}

fn request_solve(state: &mut AppState) {
    if state.game.is_complete() {
        log::info!("puzzle is already complete");
        return;
    }
    state.stop_solving();
    let arrangement = match state.game.solvable_arrangement() {
        Ok(arrangement) => arrangement,
        Err(err) => {
            log::warn!("cannot solve now: {err}");
            return;
        }
    };
    match state.scheduler.request(arrangement) {
        Ok(()) => {
            log::debug!("solving {arrangement}");
            state.status = SolveStatus::Solving;
        }
        Err(err) => log::warn!("cannot solve: {err}"),
    }
}
