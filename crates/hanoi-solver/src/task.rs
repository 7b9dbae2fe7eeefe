//! Time-sliced solving.
//!
//! A [`SolveTask`] runs an [`IncrementalSolver`] a bounded number of cycles per
//! [`poll`](SolveTask::poll), so a host loop can interleave solving with its own
//! per-frame work. [`SolveScheduler`] keeps at most one task in flight.

use std::num::NonZero;

use hanoi_core::{Arrangement, MalformedPuzzleError};

use crate::{IncrementalSolver, SearchStatus, Snapshot, Step, build_snapshot};

/// Default number of search cycles per quantum.
pub const DEFAULT_CYCLES_PER_QUANTUM: NonZero<usize> = NonZero::new(10).unwrap();

/// Final result of a solve attempt.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant)]
pub enum Outcome {
    /// The puzzle was solved; the steps lead from the snapshot to completion.
    Solved(Vec<Step>),
    /// No solution was found.
    Failed,
}

/// Result of [`SolveTask::poll`].
#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant)]
pub enum TaskPoll {
    /// The task needs more quanta.
    Pending,
    /// The task has finished.
    Ready(Outcome),
}

/// A cancellable, resumable solve attempt.
///
/// Dropping the task cancels it; the live puzzle is never touched.
///
/// # Examples
///
/// ```
/// use hanoi_solver::{Outcome, build_snapshot, solve};
///
/// let snapshot = build_snapshot(&"*3 2 1 | . | .".parse()?)?;
/// let Outcome::Solved(steps) = solve(snapshot).run_to_end() else {
///     panic!("expected a solution");
/// };
/// assert_eq!(steps.len(), 9);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct SolveTask {
    solver: IncrementalSolver,
    cycles_per_quantum: NonZero<usize>,
    quanta: usize,
}

/// Starts a solve attempt over `snapshot` with the default quantum size.
#[must_use]
pub fn solve(snapshot: Snapshot) -> SolveTask {
    SolveTask::new(snapshot, DEFAULT_CYCLES_PER_QUANTUM)
}

impl SolveTask {
    /// Creates a task that runs at most `cycles_per_quantum` search cycles per
    /// [`poll`](Self::poll).
    #[must_use]
    pub fn new(snapshot: Snapshot, cycles_per_quantum: NonZero<usize>) -> Self {
        Self {
            solver: IncrementalSolver::new(snapshot),
            cycles_per_quantum,
            quanta: 0,
        }
    }

    /// Returns the underlying solver.
    #[must_use]
    pub fn solver(&self) -> &IncrementalSolver {
        &self.solver
    }

    /// Returns the number of quanta run so far.
    #[must_use]
    pub fn quanta(&self) -> usize {
        self.quanta
    }

    /// Runs one quantum.
    ///
    /// Once the task is ready, further polls return the same outcome.
    pub fn poll(&mut self) -> TaskPoll {
        self.quanta += 1;
        for _ in 0..self.cycles_per_quantum.get() {
            match self.solver.step() {
                SearchStatus::Continue => {}
                SearchStatus::Solved => {
                    let steps = self.solver.ledger().as_slice().to_vec();
                    return TaskPoll::Ready(Outcome::Solved(steps));
                }
                SearchStatus::Failed(_) => return TaskPoll::Ready(Outcome::Failed),
            }
        }
        log::debug!(
            "quantum {} done, {} steps so far",
            self.quanta,
            self.solver.ledger().len()
        );
        TaskPoll::Pending
    }

    /// Polls until the task is ready.
    #[must_use]
    pub fn run_to_end(mut self) -> Outcome {
        loop {
            if let TaskPoll::Ready(outcome) = self.poll() {
                return outcome;
            }
        }
    }
}

/// Owns at most one [`SolveTask`] and advances it one quantum per tick.
///
/// # Examples
///
/// ```
/// use std::num::NonZero;
///
/// use hanoi_core::Arrangement;
/// use hanoi_solver::SolveScheduler;
///
/// let arrangement: Arrangement = "*3 2 1 | . | .".parse()?;
/// let mut scheduler = SolveScheduler::new(NonZero::new(2).unwrap());
/// scheduler.request(&arrangement)?;
///
/// let mut ticks = 0;
/// let outcome = loop {
///     ticks += 1;
///     if let Some(outcome) = scheduler.tick() {
///         break outcome;
///     }
/// };
/// assert!(outcome.is_solved());
/// assert_eq!(ticks, 5);
/// assert!(scheduler.is_idle());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct SolveScheduler {
    task: Option<SolveTask>,
    cycles_per_quantum: NonZero<usize>,
}

impl Default for SolveScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_CYCLES_PER_QUANTUM)
    }
}

impl SolveScheduler {
    /// Creates an idle scheduler.
    #[must_use]
    pub fn new(cycles_per_quantum: NonZero<usize>) -> Self {
        Self {
            task: None,
            cycles_per_quantum,
        }
    }

    /// Returns `true` if no task is in flight.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.task.is_none()
    }

    /// Returns the task in flight.
    #[must_use]
    pub fn task(&self) -> Option<&SolveTask> {
        self.task.as_ref()
    }

    /// Cancels the task in flight, then starts solving `arrangement`.
    ///
    /// # Errors
    ///
    /// Returns a [`MalformedPuzzleError`] if the arrangement cannot be
    /// snapshotted. The scheduler is idle afterwards in that case.
    pub fn request(&mut self, arrangement: &Arrangement) -> Result<(), MalformedPuzzleError> {
        self.cancel();
        let snapshot = build_snapshot(arrangement)?;
        self.task = Some(SolveTask::new(snapshot, self.cycles_per_quantum));
        Ok(())
    }

    /// Cancels the task in flight.
    ///
    /// Returns `true` if there was one.
    pub fn cancel(&mut self) -> bool {
        let Some(task) = self.task.take() else {
            return false;
        };
        log::warn!(
            "cancelled solve task after {} quanta and {} steps",
            task.quanta(),
            task.solver().ledger().len()
        );
        true
    }

    /// Runs one quantum of the task in flight.
    ///
    /// Returns the outcome when the task finishes; the scheduler is then idle.
    /// Returns `None` while the task is pending or when no task is in flight.
    pub fn tick(&mut self) -> Option<Outcome> {
        let task = self.task.as_mut()?;
        match task.poll() {
            TaskPoll::Pending => None,
            TaskPoll::Ready(outcome) => {
                self.task = None;
                Some(outcome)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arrangement(s: &str) -> Arrangement {
        s.parse().unwrap()
    }

    fn task(s: &str, cycles: usize) -> SolveTask {
        let snapshot = build_snapshot(&arrangement(s)).unwrap();
        SolveTask::new(snapshot, NonZero::new(cycles).unwrap())
    }

    #[test]
    fn test_poll_runs_bounded_quanta() {
        let mut task = task("*3 2 1 | . | .", 4);
        assert_eq!(task.poll(), TaskPoll::Pending);
        assert_eq!(task.solver().ledger().len(), 4);
        assert_eq!(task.poll(), TaskPoll::Pending);
        assert_eq!(task.solver().ledger().len(), 8);

        let TaskPoll::Ready(Outcome::Solved(steps)) = task.poll() else {
            panic!("expected the third quantum to finish");
        };
        assert_eq!(steps.len(), 9);
        assert_eq!(task.quanta(), 3);

        // Ready is sticky.
        assert_eq!(task.poll(), TaskPoll::Ready(Outcome::Solved(steps)));
    }

    #[test]
    fn test_failure_hides_ledger() {
        let outcome = task("4 3 2 1 | . | . | *5", 10).run_to_end();
        assert_eq!(outcome, Outcome::Failed);
    }

    #[test]
    fn test_already_complete_is_solved_without_steps() {
        let outcome = solve(build_snapshot(&arrangement("*. | . | 2 1")).unwrap()).run_to_end();
        assert_eq!(outcome, Outcome::Solved(Vec::new()));
    }

    #[test]
    fn test_steps_refer_to_live_rings() {
        let live = arrangement("*30 20 10 | . | .");
        let Outcome::Solved(steps) = solve(build_snapshot(&live).unwrap()).run_to_end() else {
            panic!("expected a solution");
        };
        let first = steps[0];
        assert_eq!(live.ring_size(first.ring()).map(|size| size.get()), Some(10));
        for (i, step) in steps.iter().enumerate() {
            assert_eq!(step.index().get(), i + 1);
        }
    }

    #[test]
    fn test_scheduler_request_replaces_task() {
        let mut scheduler = SolveScheduler::new(NonZero::new(1).unwrap());
        assert!(scheduler.is_idle());
        assert_eq!(scheduler.tick(), None);

        scheduler.request(&arrangement("*3 2 1 | . | .")).unwrap();
        assert_eq!(scheduler.tick(), None);
        assert_eq!(scheduler.task().unwrap().quanta(), 1);

        scheduler.request(&arrangement("*1 | .")).unwrap();
        assert_eq!(scheduler.task().unwrap().quanta(), 0);
        let mut outcome = None;
        while outcome.is_none() {
            outcome = scheduler.tick();
        }
        assert_eq!(outcome, Some(Outcome::Solved(vec![Step::new(
            hanoi_core::PinId::new(0),
            hanoi_core::PinId::new(1),
            hanoi_core::RingId::new(0),
            NonZero::<usize>::MIN,
        )])));
        assert!(scheduler.is_idle());
    }

    #[test]
    fn test_scheduler_cancel() {
        let mut scheduler = SolveScheduler::default();
        assert!(!scheduler.cancel());
        scheduler.request(&arrangement("*3 2 1 | . | .")).unwrap();
        assert!(scheduler.cancel());
        assert!(scheduler.is_idle());
        assert_eq!(scheduler.tick(), None);
    }

    #[test]
    fn test_scheduler_rejects_malformed_puzzle() {
        let mut scheduler = SolveScheduler::default();
        scheduler.request(&arrangement("*3 2 1 | . | .")).unwrap();

        let mut lifted = arrangement("*2 1 | .");
        lifted.pop(hanoi_core::PinId::new(0));
        assert!(scheduler.request(&lifted).is_err());
        assert!(scheduler.is_idle());
    }
}
