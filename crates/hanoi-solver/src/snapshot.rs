use hanoi_core::{
    Arrangement, MalformedPuzzleError, PinId, PuzzleView, RingId, RingSize, RingStack,
};

use crate::CandidateList;

/// Opaque handle of a ring inside a [`Snapshot`].
///
/// Keys are assigned once when the snapshot is built and index the snapshot's
/// ring arena. They are unrelated to ring sizes.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display,
)]
#[display("K({_0})")]
pub struct RingKey(usize);

impl RingKey {
    /// Returns the arena index of this key.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Solver-private state of one ring.
#[derive(Debug, Clone)]
pub struct SnapshotRing {
    origin: RingId,
    size: RingSize,
    solved: bool,
    last_moved_step: usize,
    candidates: CandidateList,
}

impl SnapshotRing {
    /// Returns the live ring this one was copied from.
    #[must_use]
    pub fn origin(&self) -> RingId {
        self.origin
    }

    /// Returns the ranked size of the ring (`1` is the smallest, the ring count
    /// is the largest).
    #[must_use]
    pub fn size(&self) -> RingSize {
        self.size
    }

    /// Returns `true` if the ring is in its final position.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.solved
    }

    /// Returns the index of the step that last moved this ring, or `0` if it
    /// has not moved.
    #[must_use]
    pub fn last_moved_step(&self) -> usize {
        self.last_moved_step
    }

    /// Returns the scored candidate paths not yet visited.
    #[must_use]
    pub fn candidates(&self) -> &CandidateList {
        &self.candidates
    }

    pub(crate) fn mark_solved(&mut self) {
        self.solved = true;
    }

    pub(crate) fn set_last_moved_step(&mut self, step: usize) {
        self.last_moved_step = step;
    }

    pub(crate) fn candidates_mut(&mut self) -> &mut CandidateList {
        &mut self.candidates
    }
}

/// The solver's private copy of a puzzle.
///
/// A snapshot is built from a live [`Arrangement`] by [`build_snapshot`] and is
/// owned by a single solve attempt. Ring sizes are re-ranked to `1..=N`, and the
/// pins are copied in order so a [`PinId`] names the same pin in both.
#[derive(Debug, Clone)]
pub struct Snapshot {
    rings: Vec<SnapshotRing>,
    pins: Vec<RingStack<RingKey>>,
    starter: PinId,
    solution_pin: Option<PinId>,
}

impl Snapshot {
    /// Returns the number of rings.
    #[must_use]
    pub fn ring_count(&self) -> usize {
        self.rings.len()
    }

    /// Returns the starter pin.
    #[must_use]
    pub fn starter(&self) -> PinId {
        self.starter
    }

    /// Returns the pin that must end up holding every ring, once known.
    ///
    /// It is established when the largest ring is first moved, or when the
    /// largest ring is found already resting at the bottom of a non-starter pin.
    #[must_use]
    pub fn solution_pin(&self) -> Option<PinId> {
        self.solution_pin
    }

    /// Returns every ring key.
    pub fn keys(&self) -> impl DoubleEndedIterator<Item = RingKey> + ExactSizeIterator {
        (0..self.rings.len()).map(RingKey)
    }

    /// Returns the ring behind `key`.
    ///
    /// # Panics
    ///
    /// Panics if `key` does not belong to this snapshot.
    #[must_use]
    pub fn ring(&self, key: RingKey) -> &SnapshotRing {
        &self.rings[key.0]
    }

    /// Returns the stack of `pin`, or `None` if the pin does not exist.
    #[must_use]
    pub fn pin(&self, pin: PinId) -> Option<&RingStack<RingKey>> {
        self.pins.get(pin.index())
    }

    /// Returns every pin stack, left to right.
    #[must_use]
    pub fn pins(&self) -> &[RingStack<RingKey>] {
        &self.pins
    }

    /// Returns `true` if `key` is the largest ring.
    #[must_use]
    pub fn is_largest(&self, key: RingKey) -> bool {
        self.ring(key).size.get() as usize == self.rings.len()
    }

    /// Returns `true` if the solution pin is known and holds every ring.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.solution_pin
            .and_then(|pin| self.pin(pin))
            .is_some_and(|stack| stack.len() == self.rings.len())
    }

    /// Returns the first unsolved ring of `pin`, scanning from the bottom.
    #[must_use]
    pub fn first_unsolved(&self, pin: PinId) -> Option<RingKey> {
        self.pin(pin)?.iter().find(|&key| !self.ring(key).solved)
    }

    pub(crate) fn ring_mut(&mut self, key: RingKey) -> &mut SnapshotRing {
        &mut self.rings[key.0]
    }

    pub(crate) fn set_solution_pin(&mut self, pin: PinId) {
        self.solution_pin = Some(pin);
    }

    pub(crate) fn pop(&mut self, pin: PinId) -> Option<RingKey> {
        self.pins.get_mut(pin.index())?.pop()
    }

    pub(crate) fn push(&mut self, pin: PinId, key: RingKey) {
        debug_assert!(hanoi_core::can_place(self, key, pin));
        self.pins[pin.index()].push(key);
    }

    /// Marks the pre-solved prefix of every non-starter pin.
    fn recognise_solved_prefixes(&mut self) {
        let ring_count = self.rings.len();
        for pin in PinId::all(self.pins.len()) {
            if pin == self.starter {
                continue;
            }
            let stack = self.pins[pin.index()].clone();
            let mut below: Option<RingSize> = None;
            for key in &stack {
                let size = self.ring(key).size;
                let solved = match below {
                    None => size.get() as usize == ring_count,
                    Some(below) => size.get() + 1 == below.get(),
                };
                if !solved {
                    break;
                }
                if below.is_none() {
                    self.solution_pin = Some(pin);
                }
                self.rings[key.0].solved = true;
                below = Some(size);
            }
        }
    }
}

impl PuzzleView for Snapshot {
    type Ring = RingKey;

    fn pin_count(&self) -> usize {
        self.pins.len()
    }

    fn top(&self, pin: PinId) -> Option<RingKey> {
        self.pins.get(pin.index()).and_then(RingStack::top)
    }

    fn size_of(&self, ring: RingKey) -> RingSize {
        self.ring(ring).size
    }
}

/// Builds a solver-owned [`Snapshot`] from a live arrangement.
///
/// Ring sizes are replaced by their rank (`1` for the smallest ring, `N` for
/// the largest), every pin is copied in order, and rings already resting in
/// their final position are marked solved: on each non-starter pin the bottom
/// ring is solved if it is the largest ring, and each ring above is solved while
/// it is exactly one size smaller than the ring beneath it.
///
/// # Errors
///
/// Returns a [`MalformedPuzzleError`] if the arrangement is not a valid puzzle,
/// for example while a ring is lifted off its pin.
///
/// # Examples
///
/// ```
/// use hanoi_core::{Arrangement, PinId};
/// use hanoi_solver::build_snapshot;
///
/// let arrangement: Arrangement = "*20 10 | 30 | .".parse()?;
/// let snapshot = build_snapshot(&arrangement)?;
///
/// assert_eq!(snapshot.solution_pin(), Some(PinId::new(1)));
/// assert!(!snapshot.is_complete());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn build_snapshot(arrangement: &Arrangement) -> Result<Snapshot, MalformedPuzzleError> {
    if let Err(err) = arrangement.validate() {
        log::warn!("refusing to snapshot malformed puzzle: {err}");
        return Err(err);
    }

    let mut by_size: Vec<_> = arrangement.rings().collect();
    by_size.sort_unstable_by_key(|&ring| arrangement.size_of(ring));
    let mut ranks = vec![RingSize::default(); by_size.len()];
    for (rank, ring) in (1..).zip(by_size) {
        ranks[ring.index()] = RingSize::new(rank);
    }

    let rings = arrangement
        .rings()
        .map(|origin| SnapshotRing {
            origin,
            size: ranks[origin.index()],
            solved: false,
            last_moved_step: 0,
            candidates: CandidateList::new(),
        })
        .collect();
    let pins = arrangement
        .pins()
        .iter()
        .map(|stack| stack.iter().map(|ring| RingKey(ring.index())).collect())
        .collect();

    let mut snapshot = Snapshot {
        rings,
        pins,
        starter: arrangement.starter(),
        solution_pin: None,
    };
    snapshot.recognise_solved_prefixes();

    log::debug!(
        "built snapshot of {} rings on {} pins (solution pin: {:?})",
        snapshot.ring_count(),
        snapshot.pin_count(),
        snapshot.solution_pin,
    );
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(s: &str) -> Snapshot {
        build_snapshot(&s.parse().unwrap()).unwrap()
    }

    fn solved_sizes(snapshot: &Snapshot) -> Vec<u32> {
        let mut sizes: Vec<_> = snapshot
            .keys()
            .filter(|&key| snapshot.ring(key).is_solved())
            .map(|key| snapshot.ring(key).size().get())
            .collect();
        sizes.sort_unstable();
        sizes
    }

    #[test]
    fn test_sizes_are_ranked() {
        let snapshot = snapshot("*70 40 | 55 | 3");
        let ranks: Vec<_> = snapshot
            .keys()
            .map(|key| snapshot.ring(key).size().get())
            .collect();
        assert_eq!(ranks, [4, 2, 3, 1]);
        assert!(snapshot.is_largest(RingKey(0)));
        assert_eq!(snapshot.ring(RingKey(2)).origin(), RingId::new(2));
    }

    #[test]
    fn test_pins_are_copied_in_order() {
        let snapshot = snapshot("3 | *2 1 | .");
        assert_eq!(snapshot.starter(), PinId::new(1));
        let starter = snapshot.pin(PinId::new(1)).unwrap();
        assert_eq!(starter.as_slice(), &[RingKey(1), RingKey(2)]);
        assert!(snapshot.pin(PinId::new(2)).unwrap().is_empty());
        assert_eq!(snapshot.pin(PinId::new(3)), None);
    }

    #[test]
    fn test_presolved_largest_ring() {
        let snapshot = snapshot("*2 1 | 3 | .");
        assert_eq!(snapshot.solution_pin(), Some(PinId::new(1)));
        assert_eq!(solved_sizes(&snapshot), [3]);
    }

    #[test]
    fn test_presolved_prefix_stops_at_gap() {
        let snapshot = snapshot("*3 | 5 4 2 1 | .");
        assert_eq!(snapshot.solution_pin(), Some(PinId::new(1)));
        assert_eq!(solved_sizes(&snapshot), [4, 5]);
    }

    #[test]
    fn test_starter_pin_is_never_presolved() {
        let snapshot = snapshot("*3 2 1 | . | .");
        assert_eq!(snapshot.solution_pin(), None);
        assert!(solved_sizes(&snapshot).is_empty());
        assert!(!snapshot.is_complete());
    }

    #[test]
    fn test_non_largest_bottom_is_not_presolved() {
        let snapshot = snapshot("*3 | 2 1 | .");
        assert_eq!(snapshot.solution_pin(), None);
        assert!(solved_sizes(&snapshot).is_empty());
    }

    #[test]
    fn test_already_complete() {
        let snapshot = snapshot("*. | 3 2 1 | .");
        assert!(snapshot.is_complete());
        assert_eq!(solved_sizes(&snapshot), [1, 2, 3]);
    }

    #[test]
    fn test_first_unsolved() {
        let snapshot = snapshot("*1 | 4 3 2 | .");
        assert_eq!(snapshot.first_unsolved(PinId::new(1)), None);
        assert_eq!(snapshot.first_unsolved(PinId::new(0)), Some(RingKey(0)));
        assert_eq!(snapshot.first_unsolved(PinId::new(2)), None);
    }

    #[test]
    fn test_malformed_arrangement_is_rejected() {
        let mut arrangement: Arrangement = "*2 1 | .".parse().unwrap();
        let ring = arrangement.pop(PinId::new(0)).unwrap();
        assert_eq!(
            build_snapshot(&arrangement).unwrap_err(),
            MalformedPuzzleError::UnplacedRing { ring }
        );
    }
}
