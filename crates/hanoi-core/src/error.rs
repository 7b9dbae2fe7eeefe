use crate::{PinId, RingId, RingSize};

/// A puzzle configuration that cannot be played or solved.
///
/// These errors describe a broken caller: a ring that does not exist, a ring
/// in two places, or a stack that violates the size ordering. They are fatal
/// for snapshot construction and are never produced by a legal sequence of
/// moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum MalformedPuzzleError {
    /// The puzzle has no pin at all.
    #[display("puzzle has no pins")]
    NoPins,
    /// The starter pin does not exist.
    #[display("starter pin {starter} is out of range ({pin_count} pins)")]
    StarterOutOfRange {
        /// The requested starter pin.
        starter: PinId,
        /// Number of pins in the puzzle.
        pin_count: usize,
    },
    /// A pin references a ring that is not part of the puzzle.
    #[display("pin {pin} references unknown ring {ring}")]
    UnknownRing {
        /// The pin holding the reference.
        pin: PinId,
        /// The unresolved ring.
        ring: RingId,
    },
    /// A ring is stacked more than once.
    #[display("ring {ring} is stacked more than once")]
    DuplicateRing {
        /// The repeated ring.
        ring: RingId,
    },
    /// A ring of the puzzle is on no pin.
    #[display("ring {ring} is not on any pin")]
    UnplacedRing {
        /// The missing ring.
        ring: RingId,
    },
    /// Two rings share the same size.
    #[display("more than one ring has size {size}")]
    DuplicateSize {
        /// The shared size.
        size: RingSize,
    },
    /// A ring rests on a smaller one.
    #[display("ring {above} rests on smaller ring {below} on pin {pin}")]
    StackOrder {
        /// The pin violating the ordering.
        pin: PinId,
        /// The lower ring.
        below: RingId,
        /// The larger ring resting on it.
        above: RingId,
    },
}

/// Errors that can occur when parsing the layout notation.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum LayoutParseError {
    /// A ring size is not a positive integer.
    #[display("invalid ring size `{token}`")]
    InvalidSize {
        /// The offending token.
        token: String,
    },
    /// No pin is marked with `*`.
    #[display("no starter pin marked with `*`")]
    MissingStarter,
    /// More than one pin is marked with `*`.
    #[display("more than one starter pin marked with `*`")]
    MultipleStarters,
    /// The layout parsed but does not describe a valid puzzle.
    #[display("malformed puzzle: {_0}")]
    #[from]
    Malformed(MalformedPuzzleError),
}
