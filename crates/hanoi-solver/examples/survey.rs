//! Surveys how the greedy solver fares on every arrangement of a given size.
//!
//! Every way of distributing the rings over the pins is combined with every
//! starter pin, and each puzzle is solved in parallel. The survey prints how
//! many puzzles were solved, how many failed and why, and the longest solution.
//!
//! # Usage
//!
//! ```sh
//! cargo run --example survey
//! ```
//!
//! Change the puzzle size (default: 4 rings on 3 pins):
//!
//! ```sh
//! cargo run --example survey -- --rings 6 --pins 4
//! ```
//!
//! List the layouts the solver gave up on:
//!
//! ```sh
//! cargo run --example survey -- --rings 3 --pins 4 --show-failures
//! ```

use std::{collections::BTreeMap, process};

use clap::Parser;
use hanoi_core::{Arrangement, PinId, RingId, RingSize, RingStack};
use hanoi_solver::{IncrementalSolver, SearchStatus, build_snapshot};
use rayon::prelude::*;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Number of rings.
    #[arg(long, value_name = "COUNT", default_value_t = 4)]
    rings: u32,

    /// Number of pins.
    #[arg(long, value_name = "COUNT", default_value_t = 3)]
    pins: usize,

    /// Print the layout of every puzzle the solver failed on.
    #[arg(long)]
    show_failures: bool,
}

fn main() {
    let args = Args::parse();
    if args.pins == 0 {
        eprintln!("--pins must be at least 1.");
        process::exit(1);
    }
    let Some(total) = u32::try_from(args.pins)
        .ok()
        .and_then(|pins| pins.checked_pow(args.rings))
        .map(|count| count as usize * args.pins)
    else {
        eprintln!("Too many arrangements to survey.");
        process::exit(1);
    };

    let results: Vec<_> = (0..total)
        .into_par_iter()
        .map(|index| {
            let arrangement = nth_arrangement(index, args.rings, args.pins);
            let status = run(&arrangement);
            (arrangement, status)
        })
        .collect();

    let mut solved = 0;
    let mut longest: Option<(usize, &Arrangement)> = None;
    let mut failures: BTreeMap<String, Vec<&Arrangement>> = BTreeMap::new();
    for (arrangement, (status, steps)) in &results {
        match status {
            SearchStatus::Solved => {
                solved += 1;
                if longest.is_none_or(|(best, _)| *steps > best) {
                    longest = Some((*steps, arrangement));
                }
            }
            SearchStatus::Failed(failure) => {
                failures
                    .entry(failure.to_string())
                    .or_default()
                    .push(arrangement);
            }
            SearchStatus::Continue => unreachable!("searches run to completion"),
        }
    }

    println!("Puzzles:");
    println!("  rings: {}", args.rings);
    println!("  pins: {}", args.pins);
    println!("  total: {total}");
    println!();
    println!("Solved: {solved}");
    if let Some((steps, arrangement)) = longest {
        println!("  longest: {steps} steps ({arrangement})");
    }
    println!();
    println!("Failed: {}", total - solved);
    for (reason, arrangements) in &failures {
        println!("  {reason}: {}", arrangements.len());
        if args.show_failures {
            for arrangement in arrangements {
                println!("    {arrangement}");
            }
        }
    }
}

/// Decodes `index` into an arrangement: the lowest digits (base `pins`) place
/// each ring, the remaining quotient picks the starter.
fn nth_arrangement(mut index: usize, rings: u32, pins: usize) -> Arrangement {
    let mut stacks = vec![RingStack::new(); pins];
    for ring in 0..rings as usize {
        stacks[index % pins].push(RingId::new(ring));
        index /= pins;
    }
    let sizes = (1..=rings).rev().map(RingSize::new).collect();
    Arrangement::new(sizes, stacks, PinId::new(index % pins)).unwrap()
}

fn run(arrangement: &Arrangement) -> (SearchStatus, usize) {
    let mut solver = IncrementalSolver::new(build_snapshot(arrangement).unwrap());
    loop {
        let status = solver.step();
        if !status.is_continue() {
            return (status, solver.ledger().len());
        }
    }
}
