//! Hanoi command-line player.
//!
//! Runs the frame loop until the solver and playback settle, then prints the
//! final layout.

use std::process::ExitCode;

use clap::Parser as _;
use hanoi_app::{action::ActionRequestQueue, app::HanoiApp, cli::Args, state::SolveStatus};

fn main() -> ExitCode {
    better_panic::install();
    env_logger::init();

    let args = Args::parse();
    let game = match args.game() {
        Ok(game) => game,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };
    log::info!("starting with {}", game.arrangement());

    let mut app = HanoiApp::new(game, args.settings());
    let mut action_queue = ActionRequestQueue::default();
    args.queue_actions(&mut action_queue);

    while app.frame() < args.max_frames {
        app.update(&mut action_queue);
        if app.is_settled() && action_queue.is_empty() {
            break;
        }
    }

    let state = app.state();
    println!("Layout:");
    println!("  {}", state.game.arrangement());
    println!("Moves: {}", state.game.moves());
    println!("Frames: {}", app.frame());

    match state.status {
        SolveStatus::Replayed | SolveStatus::Idle if state.game.is_complete() => {
            println!("Complete.");
            ExitCode::SUCCESS
        }
        SolveStatus::NoSolution => {
            println!("No solution found.");
            ExitCode::FAILURE
        }
        SolveStatus::Solving | SolveStatus::Replaying => {
            eprintln!("Gave up after {} frames.", args.max_frames);
            ExitCode::FAILURE
        }
        SolveStatus::Idle | SolveStatus::Replayed => {
            println!("Not complete.");
            ExitCode::FAILURE
        }
    }
}
