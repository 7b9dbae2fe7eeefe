//! Candidate path scoring.

use hanoi_core::{PinId, PuzzleView as _, can_place};
use tinyvec::TinyVec;

use crate::{RingKey, Snapshot};

/// A scored, not yet executed proposal to move a ring onto a pin.
///
/// Lower weights are better.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CandidatePath {
    ring: RingKey,
    destination: PinId,
    weight: i64,
}

impl CandidatePath {
    /// Returns the ring to move.
    #[must_use]
    pub fn ring(&self) -> RingKey {
        self.ring
    }

    /// Returns the pin the ring would land on.
    #[must_use]
    pub fn destination(&self) -> PinId {
        self.destination
    }

    /// Returns the weight of the path.
    #[must_use]
    pub fn weight(&self) -> i64 {
        self.weight
    }
}

/// Candidate paths of one ring, kept in ascending weight order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CandidateList {
    paths: TinyVec<[CandidatePath; 4]>,
}

impl CandidateList {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `path` before the first entry that weighs at least as much, or
    /// at the end if it is the heaviest.
    pub fn insert(&mut self, path: CandidatePath) {
        let at = self
            .paths
            .iter()
            .position(|other| other.weight >= path.weight)
            .unwrap_or(self.paths.len());
        self.paths.insert(at, path);
    }

    /// Returns the lightest path.
    #[must_use]
    pub fn best(&self) -> Option<&CandidatePath> {
        self.paths.first()
    }

    /// Removes the lightest path and discards the rest.
    pub fn take_best(&mut self) -> Option<CandidatePath> {
        if self.paths.is_empty() {
            return None;
        }
        let best = self.paths.remove(0);
        self.paths.clear();
        Some(best)
    }

    /// Removes every path.
    pub fn clear(&mut self) {
        self.paths.clear();
    }

    /// Returns the number of paths.
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Returns `true` if the list holds no path.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Returns the paths, lightest first.
    #[must_use]
    pub fn as_slice(&self) -> &[CandidatePath] {
        &self.paths
    }
}

/// Scores every legal destination of `ring`.
///
/// Each pin that accepts the ring yields one path. Starting from zero:
///
/// - a non-empty destination costs `1`;
/// - if its top ring is unsolved, the weight drops by twice the size gap
///   between the first unsolved ring from the bottom of that pin and `ring`;
/// - the largest ring moving to an empty pin gains `-2 * N`;
/// - otherwise, landing on a solved top ring exactly one size larger gains
///   `-2 * N`.
///
/// Scoring does not touch the snapshot, so scoring twice yields the same list.
#[must_use]
pub fn score(snapshot: &Snapshot, ring: RingKey) -> CandidateList {
    let size = i64::from(snapshot.size_of(ring).get());
    let bonus = 2 * i64::try_from(snapshot.ring_count()).unwrap_or(i64::MAX / 2);

    let mut list = CandidateList::new();
    for destination in PinId::all(snapshot.pin_count()) {
        if !can_place(snapshot, ring, destination) {
            continue;
        }

        let mut weight = 0;
        match snapshot.top(destination) {
            Some(top) => {
                weight += 1;
                let top = snapshot.ring(top);
                if top.is_solved() {
                    if size + 1 == i64::from(top.size().get()) {
                        weight -= bonus;
                    }
                } else if let Some(unsolved) = snapshot.first_unsolved(destination) {
                    weight -= (i64::from(snapshot.size_of(unsolved).get()) - size) * 2;
                }
            }
            None if snapshot.is_largest(ring) => weight -= bonus,
            None => {}
        }

        list.insert(CandidatePath {
            ring,
            destination,
            weight,
        });
    }
    list
}
