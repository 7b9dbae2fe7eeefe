//! Incremental, weight-guided solver for the ring-and-pin puzzle.
//!
//! # Overview
//!
//! Solving happens on a private copy of the puzzle and never touches the live
//! configuration:
//!
//! 1. [`build_snapshot`] copies an [`Arrangement`](hanoi_core::Arrangement)
//!    into a [`Snapshot`], re-ranking ring sizes and recognising rings already
//!    in their final position.
//! 2. [`IncrementalSolver::step`] runs one search cycle: choose a top ring,
//!    [`score`] its destinations, execute the lightest [`CandidatePath`] and
//!    record a [`Step`] in the [`StepLedger`]. The search never backtracks.
//! 3. [`SolveTask`] slices the search into quanta of a few cycles, and
//!    [`SolveScheduler`] keeps one task in flight for a host that ticks once
//!    per frame.
//!
//! The solver is greedy. It may report [`Outcome::Failed`] on a puzzle that has
//! a solution, and its solutions are not minimal.
//!
//! # Examples
//!
//! ```
//! use hanoi_core::Arrangement;
//! use hanoi_solver::{Outcome, build_snapshot, solve};
//!
//! let arrangement: Arrangement = "*3 2 1 | . | .".parse()?;
//! let outcome = solve(build_snapshot(&arrangement)?).run_to_end();
//!
//! if let Outcome::Solved(steps) = outcome {
//!     for step in &steps {
//!         println!("{step}");
//!     }
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use self::{
    ledger::{Step, StepLedger},
    scorer::{CandidateList, CandidatePath, score},
    search::{IncrementalSolver, SearchFailure, SearchStatus, SolverState},
    snapshot::{RingKey, Snapshot, SnapshotRing, build_snapshot},
    task::{DEFAULT_CYCLES_PER_QUANTUM, Outcome, SolveScheduler, SolveTask, TaskPoll, solve},
};

mod ledger;
mod scorer;
mod search;
mod snapshot;
mod task;
#[cfg(test)]
mod testing;
