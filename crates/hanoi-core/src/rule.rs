//! The move legality rule.

use crate::{PinId, RingSize};

/// Read access to a puzzle configuration, as needed by the legality rule.
///
/// Both the live puzzle and the solver's snapshot implement this trait, so a
/// drop made by a player and a move chosen by the solver are judged by the same
/// [`can_place`] predicate.
pub trait PuzzleView {
    /// Handle used to name rings in this view.
    type Ring: Copy;

    /// Returns the number of pins.
    fn pin_count(&self) -> usize;

    /// Returns the top ring of `pin`, or `None` if the pin is empty.
    ///
    /// `pin` is always in range when called from [`can_place`].
    fn top(&self, pin: PinId) -> Option<Self::Ring>;

    /// Returns the size of `ring`.
    fn size_of(&self, ring: Self::Ring) -> RingSize;
}

/// Returns `true` if `ring` may be placed on `pin`.
///
/// A ring may land on an empty pin or on a ring strictly larger than itself.
/// A pin outside the view is never a legal destination. The predicate is pure
/// and O(1); it does not care where `ring` currently is, so asking about the
/// pin the ring already tops yields `false` (a ring is never smaller than
/// itself).
///
/// # Examples
///
/// ```
/// use hanoi_core::{Arrangement, PinId, RingId, can_place};
///
/// let arrangement: Arrangement = "*3 | 1 | .".parse()?;
/// let large = RingId::new(0);
/// let small = RingId::new(1);
///
/// assert!(can_place(&arrangement, small, PinId::new(0)));
/// assert!(can_place(&arrangement, large, PinId::new(2)));
/// assert!(!can_place(&arrangement, large, PinId::new(1)));
/// assert!(!can_place(&arrangement, small, PinId::new(7)));
/// # Ok::<(), hanoi_core::LayoutParseError>(())
/// ```
#[must_use]
pub fn can_place<V>(view: &V, ring: V::Ring, pin: PinId) -> bool
where
    V: PuzzleView + ?Sized,
{
    if pin.index() >= view.pin_count() {
        return false;
    }
    match view.top(pin) {
        None => true,
        Some(top) => view.size_of(ring) < view.size_of(top),
    }
}

/// Returns `true` if at least one pin of `view` accepts `ring`.
#[must_use]
pub fn has_destination<V>(view: &V, ring: V::Ring) -> bool
where
    V: PuzzleView + ?Sized,
{
    PinId::all(view.pin_count()).any(|pin| can_place(view, ring, pin))
}
