//! Core data structures for the ring-and-pin stacking puzzle.
//!
//! This crate provides the pieces shared by interactive play and automated
//! solving. Nothing in here knows about searching or about input handling; the
//! solver and the game crates build on these types.
//!
//! # Overview
//!
//! 1. **Identities** - Small index handles into ring and pin arenas
//!    - [`RingId`], [`PinId`]: dense indices assigned when a puzzle is created
//!    - [`RingSize`]: a totally ordered ring size (larger = physically bigger)
//!
//! 2. **Stack-of-Rings primitive** - [`RingStack`], an O(1) push/pop LIFO used
//!    both by the live puzzle and by the solver's private copy.
//!
//! 3. **Move legality** - [`can_place`] over any [`PuzzleView`]. This single
//!    predicate is the only authority on whether a ring may land on a pin.
//!
//! 4. **Arrangements** - [`Arrangement`], a validated configuration of rings
//!    on pins together with the starter pin, and its text layout notation.
//!
//! # Examples
//!
//! ```
//! use hanoi_core::{Arrangement, PinId, RingId, can_place};
//!
//! let arrangement: Arrangement = "*3 2 1 | . | .".parse()?;
//!
//! // The smallest ring sits on top of the starter pin.
//! let top = arrangement.pin(PinId::new(0)).and_then(|pin| pin.top());
//! assert_eq!(top, Some(RingId::new(2)));
//!
//! // It may go onto an empty pin, the largest ring may not go onto it.
//! assert!(can_place(&arrangement, RingId::new(2), PinId::new(1)));
//! assert!(!can_place(&arrangement, RingId::new(0), PinId::new(0)));
//! # Ok::<(), hanoi_core::LayoutParseError>(())
//! ```

pub use self::{
    arrangement::Arrangement,
    error::{LayoutParseError, MalformedPuzzleError},
    id::{PinId, RingId, RingSize},
    ring_stack::RingStack,
    rule::{PuzzleView, can_place, has_destination},
};

mod arrangement;
mod error;
mod id;
mod ring_stack;
mod rule;
