//! Ring and pin identities.

/// Identity of a ring in a live puzzle.
///
/// Ring ids are dense indices (`0..ring_count`) assigned when an
/// [`Arrangement`](crate::Arrangement) is created. They never change while
/// the ring moves between pins, so they are the key the interactive layer and
/// the solver's step ledger share.
///
/// # Examples
///
/// ```
/// use hanoi_core::RingId;
///
/// let ring = RingId::new(2);
/// assert_eq!(ring.index(), 2);
/// assert_eq!(ring.to_string(), "R(2)");
/// ```
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display,
)]
#[display("R({_0})")]
pub struct RingId(usize);

impl RingId {
    /// Creates a ring id from its arena index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the arena index of this ring.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Identity of a pin.
///
/// Pins are numbered left to right from `0`. The solver copies pins in order,
/// so a `PinId` names the same pin in the live puzzle and in a solver snapshot.
///
/// # Examples
///
/// ```
/// use hanoi_core::PinId;
///
/// let pins: Vec<_> = PinId::all(3).collect();
/// assert_eq!(pins, [PinId::new(0), PinId::new(1), PinId::new(2)]);
/// assert_eq!(pins[1].to_string(), "P(1)");
/// ```
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display,
)]
#[display("P({_0})")]
pub struct PinId(usize);

impl PinId {
    /// Creates a pin id from its position.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the position of this pin.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }

    /// Returns every pin id of a puzzle with `pin_count` pins, left to right.
    pub fn all(pin_count: usize) -> impl DoubleEndedIterator<Item = Self> + ExactSizeIterator {
        (0..pin_count).map(Self)
    }
}

/// Size of a ring.
///
/// Sizes are totally ordered; a larger value is a physically bigger ring. In a
/// live puzzle the values are whatever the caller chose (they only need to be
/// distinct), while a solver snapshot re-ranks them to `1..=ring_count`.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display,
)]
pub struct RingSize(u32);

impl RingSize {
    /// Creates a ring size.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns the numeric size.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}
