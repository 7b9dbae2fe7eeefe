//! Test utilities for the incremental solver.
//!
//! [`SolverTester`] wraps an [`IncrementalSolver`] built from layout notation
//! and offers chained assertions phrased in physical ring sizes and pin
//! positions, so tests read like the puzzles they describe.

use hanoi_core::{Arrangement, PinId, PuzzleView as _, RingId, can_place};

use crate::{IncrementalSolver, SearchFailure, SearchStatus, build_snapshot};

/// A test harness for driving an [`IncrementalSolver`].
///
/// Every cycle run through the tester also checks that the executed move was
/// legal and that every pin still reads in strictly decreasing size from
/// bottom to top.
///
/// # Panics
///
/// All assertion methods panic with detailed messages on failure, using
/// `#[track_caller]` to report the correct source location.
#[derive(Debug)]
pub struct SolverTester {
    initial: Arrangement,
    solver: IncrementalSolver,
    status: Option<SearchStatus>,
}

impl SolverTester {
    /// Creates a tester from layout notation.
    ///
    /// # Panics
    ///
    /// Panics if the layout cannot be parsed or is not a valid puzzle.
    #[track_caller]
    pub fn from_str(s: &str) -> Self {
        let initial: Arrangement = s.parse().unwrap();
        let solver = IncrementalSolver::new(build_snapshot(&initial).unwrap());
        Self {
            initial,
            solver,
            status: None,
        }
    }

    /// Runs `cycles` search cycles.
    #[track_caller]
    pub fn run_cycles(mut self, cycles: usize) -> Self {
        for _ in 0..cycles {
            self.step_checked();
        }
        self
    }

    /// Runs search cycles until the solver reports a terminal status.
    #[track_caller]
    pub fn run_to_end(mut self) -> Self {
        while self.step_checked().is_continue() {}
        self
    }

    #[track_caller]
    fn step_checked(&mut self) -> SearchStatus {
        let before = self.solver.snapshot().clone();
        let steps_before = self.solver.ledger().len();
        let status = self.solver.step();
        self.status = Some(status);

        let ledger = self.solver.ledger();
        assert!(
            ledger.len() <= steps_before + 1,
            "Expected at most one move per cycle, but {} were recorded",
            ledger.len() - steps_before
        );
        if let Some(step) = ledger.as_slice().get(steps_before) {
            let moved = before
                .top(step.from())
                .expect("a step must start from a non-empty pin");
            assert_eq!(
                before.ring(moved).origin(),
                step.ring(),
                "Expected {step} to move the top ring of {}",
                step.from()
            );
            assert!(
                can_place(&before, moved, step.to()),
                "Expected {step} to be a legal move"
            );
        }

        let snapshot = self.solver.snapshot();
        for (pin, stack) in PinId::all(snapshot.pin_count()).zip(snapshot.pins()) {
            let sizes: Vec<_> = stack.iter().map(|key| snapshot.size_of(key)).collect();
            assert!(
                sizes.windows(2).all(|pair| pair[0] > pair[1]),
                "Expected {pin} to be ordered largest to smallest, but sizes are {sizes:?}"
            );
        }
        status
    }

    fn physical_size(&self, ring: RingId) -> u32 {
        self.initial.size_of(ring).get()
    }

    /// Asserts the status returned by the last cycle.
    #[track_caller]
    pub fn assert_status(self, expected: SearchStatus) -> Self {
        assert_eq!(
            self.status,
            Some(expected),
            "Expected status {expected:?}, but got {:?}",
            self.status
        );
        self
    }

    /// Asserts that the solver reached [`SearchStatus::Solved`].
    #[track_caller]
    pub fn assert_solved(self) -> Self {
        assert!(
            self.solver.snapshot().is_complete(),
            "Expected the snapshot to be complete, but status is {:?} after {} steps",
            self.status,
            self.solver.ledger().len()
        );
        self.assert_status(SearchStatus::Solved)
    }

    /// Asserts that the solver failed for the given reason.
    #[track_caller]
    pub fn assert_failed(self, failure: SearchFailure) -> Self {
        self.assert_status(SearchStatus::Failed(failure))
    }

    /// Asserts the number of recorded steps.
    #[track_caller]
    pub fn assert_step_count(self, expected: usize) -> Self {
        let actual = self.solver.ledger().len();
        assert_eq!(
            actual, expected,
            "Expected {expected} steps, but {actual} were recorded"
        );
        self
    }

    /// Asserts the recorded steps as `(from, to, size)` triples, where `size`
    /// is the physical size of the moved ring.
    #[track_caller]
    pub fn assert_steps<I>(self, expected: I) -> Self
    where
        I: IntoIterator<Item = (usize, usize, u32)>,
    {
        let expected: Vec<_> = expected.into_iter().collect();
        let actual: Vec<_> = self
            .solver
            .ledger()
            .iter()
            .map(|step| {
                (
                    step.from().index(),
                    step.to().index(),
                    self.physical_size(step.ring()),
                )
            })
            .collect();
        assert_eq!(actual, expected, "Unexpected steps");
        self
    }

    /// Asserts the physical ring sizes on `pin`, bottom to top.
    #[track_caller]
    pub fn assert_pin<I>(self, pin: usize, expected: I) -> Self
    where
        I: IntoIterator<Item = u32>,
    {
        let expected: Vec<_> = expected.into_iter().collect();
        let snapshot = self.solver.snapshot();
        let actual: Vec<_> = snapshot
            .pin(PinId::new(pin))
            .unwrap_or_else(|| panic!("Expected pin {pin} to exist"))
            .iter()
            .map(|key| self.physical_size(snapshot.ring(key).origin()))
            .collect();
        assert_eq!(actual, expected, "Unexpected rings on pin {pin}");
        self
    }

    /// Asserts the solution pin.
    #[track_caller]
    pub fn assert_solution_pin(self, expected: Option<usize>) -> Self {
        let actual = self.solver.snapshot().solution_pin().map(PinId::index);
        assert_eq!(actual, expected, "Unexpected solution pin");
        self
    }

    /// Asserts exactly which rings, by physical size, are marked solved.
    #[track_caller]
    pub fn assert_solved_rings<I>(self, expected: I) -> Self
    where
        I: IntoIterator<Item = u32>,
    {
        let mut expected: Vec<_> = expected.into_iter().collect();
        expected.sort_unstable();
        let snapshot = self.solver.snapshot();
        let mut actual: Vec<_> = snapshot
            .keys()
            .filter(|&key| snapshot.ring(key).is_solved())
            .map(|key| self.physical_size(snapshot.ring(key).origin()))
            .collect();
        actual.sort_unstable();
        assert_eq!(actual, expected, "Unexpected solved rings");
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tester_reports_presolved_state_before_running() {
        SolverTester::from_str("*1 | 2 | .")
            .assert_solution_pin(Some(1))
            .assert_solved_rings([2])
            .assert_step_count(0)
            .assert_pin(0, [1]);
    }

    #[test]
    #[should_panic(expected = "Unexpected steps")]
    fn test_tester_detects_wrong_steps() {
        SolverTester::from_str("*3 2 1 | . | .")
            .run_cycles(1)
            .assert_steps([(0, 1, 1)]);
    }

    #[test]
    #[should_panic(expected = "Expected the snapshot to be complete")]
    fn test_tester_detects_wrong_status() {
        SolverTester::from_str("*2 1")
            .run_to_end()
            .assert_solved();
    }
}
