use hanoi_core::{PinId, PuzzleView as _, RingStack, has_destination};

use crate::{CandidatePath, RingKey, Snapshot, StepLedger, scorer};

/// Why a search stopped without solving the puzzle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SearchFailure {
    /// Every pin is empty.
    #[display("no ring to move")]
    NoMovableRing,
    /// Every top ring is solved or has nowhere to go.
    #[display("no unsolved ring can move")]
    Exhausted,
    /// The search is looping through positions it has already been in.
    #[display("search entered a cycle")]
    RepeatedPosition,
}

/// Result of one [`IncrementalSolver::step`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SearchStatus {
    /// A cycle ran and the puzzle is not complete yet.
    Continue,
    /// The puzzle is complete.
    Solved,
    /// The search gave up.
    Failed(SearchFailure),
}

/// Lifecycle of an [`IncrementalSolver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SolverState {
    /// No cycle has run yet.
    Idle,
    /// At least one cycle has run and the search has not ended.
    Searching,
    /// The puzzle is complete; the ledger holds the solution.
    Solved,
    /// The search gave up.
    Failed(SearchFailure),
}

/// Everything the next search cycle depends on.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Position {
    pins: Vec<RingStack<RingKey>>,
    solved: Vec<bool>,
    solution_pin: Option<PinId>,
    last_moved: Option<RingKey>,
}

/// Detects when a deterministic sequence of values starts repeating.
///
/// Brent's cycle detection: a single saved value is compared against each new
/// one and replaced whenever the run since it was saved reaches the next power
/// of two. A repeat is reported within about twice the length of the prefix
/// plus the cycle after the sequence first enters the cycle. Memory does not
/// depend on how long the sequence runs.
#[derive(Debug, Clone)]
struct CycleGuard<T> {
    saved: Option<T>,
    power: usize,
    run: usize,
}

impl<T> Default for CycleGuard<T> {
    fn default() -> Self {
        Self {
            saved: None,
            power: 1,
            run: 0,
        }
    }
}

impl<T: PartialEq> CycleGuard<T> {
    /// Feeds the next value. Returns `true` if it equals the saved one.
    fn observe(&mut self, value: T) -> bool {
        if self.saved.as_ref() == Some(&value) {
            return true;
        }
        self.run += 1;
        if self.run >= self.power {
            self.saved = Some(value);
            self.power = self.power.saturating_mul(2);
            self.run = 0;
        }
        false
    }
}

/// A resumable, weight-guided search over a [`Snapshot`].
///
/// Each call to [`step`](Self::step) runs exactly one search cycle: pick a top
/// ring to move, score its destinations, and execute the lightest path. The
/// search never undoes a move. It stops when the solution pin holds every ring,
/// when no ring can move, or when it notices it is going round in a loop of
/// positions. Each cycle is a pure function of the position it starts from, so
/// a loop would otherwise repeat forever.
///
/// The solver may give up on puzzles that do have a solution, and the moves it
/// finds are not necessarily the shortest.
///
/// # Examples
///
/// ```
/// use hanoi_solver::{IncrementalSolver, SearchStatus, build_snapshot};
///
/// let snapshot = build_snapshot(&"*3 2 1 | . | .".parse()?)?;
/// let mut solver = IncrementalSolver::new(snapshot);
///
/// let status = loop {
///     match solver.step() {
///         SearchStatus::Continue => {}
///         status => break status,
///     }
/// };
/// assert_eq!(status, SearchStatus::Solved);
/// assert!(solver.snapshot().is_complete());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct IncrementalSolver {
    snapshot: Snapshot,
    ledger: StepLedger,
    state: SolverState,
    last_moved: Option<RingKey>,
    guard: CycleGuard<Position>,
}

impl IncrementalSolver {
    /// Creates an idle solver owning `snapshot`.
    #[must_use]
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            snapshot,
            ledger: StepLedger::new(),
            state: SolverState::Idle,
            last_moved: None,
            guard: CycleGuard::default(),
        }
    }

    /// Returns the solver's working copy of the puzzle.
    #[must_use]
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Returns the moves executed so far.
    #[must_use]
    pub fn ledger(&self) -> &StepLedger {
        &self.ledger
    }

    /// Returns the current lifecycle state.
    #[must_use]
    pub fn state(&self) -> SolverState {
        self.state
    }

    /// Consumes the solver and returns its ledger.
    #[must_use]
    pub fn into_ledger(self) -> StepLedger {
        self.ledger
    }

    /// Runs one search cycle.
    ///
    /// The first call checks whether the snapshot is already complete, in which
    /// case the solver is solved without moving anything. Once solved or failed,
    /// further calls return the same status and change nothing.
    pub fn step(&mut self) -> SearchStatus {
        match self.state {
            SolverState::Solved => return SearchStatus::Solved,
            SolverState::Failed(failure) => return SearchStatus::Failed(failure),
            SolverState::Idle => {
                self.state = SolverState::Searching;
                if self.snapshot.is_complete() {
                    log::info!("puzzle is already complete");
                    self.state = SolverState::Solved;
                    return SearchStatus::Solved;
                }
            }
            SolverState::Searching => {}
        }

        match self.cycle() {
            Ok(false) => SearchStatus::Continue,
            Ok(true) => {
                log::info!("solved in {} steps", self.ledger.len());
                self.state = SolverState::Solved;
                SearchStatus::Solved
            }
            Err(failure) => {
                match failure {
                    SearchFailure::NoMovableRing => log::warn!("search failed: {failure}"),
                    SearchFailure::Exhausted | SearchFailure::RepeatedPosition => {
                        log::info!(
                            "search failed after {} steps: {failure}",
                            self.ledger.len()
                        );
                    }
                }
                self.state = SolverState::Failed(failure);
                SearchStatus::Failed(failure)
            }
        }
    }

    fn cycle(&mut self) -> Result<bool, SearchFailure> {
        if self.guard.observe(self.position()) {
            return Err(SearchFailure::RepeatedPosition);
        }

        let (source, ring) = self.choose_ring()?;
        let mut candidates = scorer::score(&self.snapshot, ring);
        let path = candidates.take_best().ok_or(SearchFailure::Exhausted)?;
        *self.snapshot.ring_mut(ring).candidates_mut() = candidates;

        self.visit(source, path);
        if let Some(previous) = self.last_moved.replace(ring) {
            self.snapshot.ring_mut(previous).candidates_mut().clear();
        }

        Ok(self.snapshot.is_complete())
    }

    fn position(&self) -> Position {
        Position {
            pins: self.snapshot.pins().to_vec(),
            solved: self
                .snapshot
                .keys()
                .map(|key| self.snapshot.ring(key).is_solved())
                .collect(),
            solution_pin: self.snapshot.solution_pin(),
            last_moved: self.last_moved,
        }
    }

    /// Picks the first movable, unsolved top ring in pin order, avoiding the
    /// ring moved last unless it is the only choice.
    fn choose_ring(&self) -> Result<(PinId, RingKey), SearchFailure> {
        let tops: Vec<_> = PinId::all(self.snapshot.pin_count())
            .filter_map(|pin| Some((pin, self.snapshot.top(pin)?)))
            .collect();
        if tops.is_empty() {
            return Err(SearchFailure::NoMovableRing);
        }

        let mut movable = tops.into_iter().filter(|&(_, ring)| {
            !self.snapshot.ring(ring).is_solved() && has_destination(&self.snapshot, ring)
        });
        let first = movable.next().ok_or(SearchFailure::Exhausted)?;
        if Some(first.1) != self.last_moved {
            return Ok(first);
        }
        Ok(movable.next().unwrap_or(first))
    }

    fn visit(&mut self, source: PinId, path: CandidatePath) {
        let ring = path.ring();
        let destination = path.destination();

        let popped = self.snapshot.pop(source);
        debug_assert_eq!(popped, Some(ring));

        if self.snapshot.is_largest(ring) {
            self.snapshot.set_solution_pin(destination);
            self.snapshot.ring_mut(ring).mark_solved();
        } else if self.snapshot.solution_pin() == Some(destination) {
            let size = self.snapshot.size_of(ring).get();
            let lands_in_place = self.snapshot.top(destination).is_some_and(|top| {
                let top = self.snapshot.ring(top);
                top.is_solved() && top.size().get() == size + 1
            });
            if lands_in_place {
                self.snapshot.ring_mut(ring).mark_solved();
            }
        }

        self.snapshot.push(destination, ring);
        let origin = self.snapshot.ring(ring).origin();
        let step = self.ledger.record(source, destination, origin);
        self.snapshot
            .ring_mut(ring)
            .set_last_moved_step(step.index().get());
        log::trace!("{step} (weight {})", path.weight());
    }
}
