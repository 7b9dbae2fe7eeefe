use std::mem;

use hanoi_core::{PinId, RingId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    PickUp(RingId),
    DropOn(PinId),
    CancelHold,
    /// Lifts the top ring of `from` and drops it on `to`.
    Move { from: PinId, to: PinId },
    RequestSolve,
    CancelSolve,
    Reset { starter: PinId },
    ResetRandom { seed: u64 },
}

#[derive(Debug, Default)]
pub struct ActionRequestQueue {
    actions: Vec<Action>,
}

impl ActionRequestQueue {
    pub fn request(&mut self, action: Action) {
        self.actions.push(action);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn take_all(&mut self) -> Vec<Action> {
        mem::take(&mut self.actions)
    }
}
