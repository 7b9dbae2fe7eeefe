//! Interactive play for the ring-and-pin puzzle.
//!
//! [`Game`] is the live puzzle a player manipulates: rings are lifted with
//! [`Game::pick_up`] and put down with [`Game::drop_on`], which accepts the drop
//! only if [`can_place`](hanoi_core::can_place) allows it. The same game can
//! replay a solver's [`Step`](hanoi_solver::Step) ledger.
//!
//! # Examples
//!
//! ```
//! use hanoi_core::{PinId, RingId};
//! use hanoi_game::{DropOutcome, Game};
//!
//! let mut game = Game::new(2, 3, PinId::new(0))?;
//!
//! game.pick_up(RingId::new(1))?;
//! assert_eq!(game.drop_on(PinId::new(1))?, DropOutcome::Moved);
//!
//! // The large ring may not rest on the small one.
//! game.pick_up(RingId::new(0))?;
//! assert_eq!(game.drop_on(PinId::new(1))?, DropOutcome::Denied);
//! assert_eq!(game.moves(), 1);
//! # Ok::<(), hanoi_game::GameError>(())
//! ```

pub use self::{
    error::GameError,
    game::{DropOutcome, Game, HeldRing},
};

mod error;
mod game;
