use hanoi_core::{MalformedPuzzleError, PinId, RingId};
use hanoi_solver::Step;

/// Errors that can occur when manipulating a [`Game`](crate::Game).
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum GameError {
    /// The pin does not exist.
    #[display("pin {pin} does not exist")]
    PinOutOfRange {
        /// The requested pin.
        pin: PinId,
    },
    /// The ring does not exist.
    #[display("ring {ring} does not exist")]
    RingOutOfRange {
        /// The requested ring.
        ring: RingId,
    },
    /// Only the top ring of a pin can be lifted.
    #[display("ring {ring} is not on top of its pin")]
    NotTopRing {
        /// The requested ring.
        ring: RingId,
    },
    /// A ring is already lifted.
    #[display("ring {ring} is already held")]
    AlreadyHolding {
        /// The ring being held.
        ring: RingId,
    },
    /// No ring is lifted.
    #[display("no ring is held")]
    NothingHeld,
    /// The puzzle is complete; rings can no longer be lifted.
    #[display("puzzle is already complete")]
    AlreadyComplete,
    /// A replayed step does not fit the current configuration.
    #[display("step {step} does not match the puzzle")]
    ReplayMismatch {
        /// The offending step.
        step: Step,
    },
    /// The puzzle configuration is invalid.
    #[display("malformed puzzle: {_0}")]
    #[from]
    Malformed(MalformedPuzzleError),
}
