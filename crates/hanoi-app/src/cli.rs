//! Command-line configuration.

use std::{num::NonZero, str::FromStr};

use clap::Parser;
use hanoi_core::{Arrangement, LayoutParseError, PinId};
use hanoi_game::{Game, GameError};

use crate::{
    action::{Action, ActionRequestQueue},
    state::{ReplaySettings, Settings, SolverSettings},
};

/// Plays a ring-and-pin puzzle and lets the solver finish it.
///
/// Rings start stacked on the starter pin (or as given by `--layout`). The
/// player moves in `--moves` are applied first, then the solver searches for a
/// way to complete the puzzle and the solution is played back.
#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Args {
    /// Initial layout, e.g. `"*3 2 1 | . | ."`. Overrides --rings, --pins and --starter.
    #[arg(long, value_name = "LAYOUT")]
    pub layout: Option<String>,

    /// Number of rings of a fresh puzzle.
    #[arg(long, value_name = "COUNT", default_value_t = 3)]
    pub rings: u32,

    /// Number of pins of a fresh puzzle.
    #[arg(long, value_name = "COUNT", default_value_t = 3)]
    pub pins: usize,

    /// Starter pin of a fresh puzzle.
    #[arg(long, value_name = "PIN", default_value_t = 0)]
    pub starter: usize,

    /// Restack the rings onto a random other pin chosen from this seed first.
    #[arg(long, value_name = "SEED")]
    pub reset_seed: Option<u64>,

    /// Player moves applied before solving, as `FROM-TO` pin pairs.
    #[arg(long, value_name = "FROM-TO", value_delimiter = ',')]
    pub moves: Vec<PlayerMove>,

    /// Search cycles the solver runs per frame.
    #[arg(long, value_name = "COUNT", default_value_t = SolverSettings::default().cycles_per_tick)]
    pub cycles_per_tick: NonZero<usize>,

    /// Frames spent on each replayed step.
    #[arg(long, value_name = "COUNT", default_value_t = ReplaySettings::default().frames_per_step)]
    pub frames_per_step: NonZero<usize>,

    /// Give up after this many frames.
    #[arg(long, value_name = "COUNT", default_value_t = 100_000)]
    pub max_frames: usize,
}

/// A player move given on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerMove {
    pub from: PinId,
    pub to: PinId,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid move `{input}`, expected `FROM-TO`")]
pub struct PlayerMoveParseError {
    input: String,
}

impl FromStr for PlayerMove {
    type Err = PlayerMoveParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let error = || PlayerMoveParseError {
            input: s.to_owned(),
        };
        let (from, to) = s.split_once('-').ok_or_else(error)?;
        let from = from.trim().parse().map_err(|_| error())?;
        let to = to.trim().parse().map_err(|_| error())?;
        Ok(Self {
            from: PinId::new(from),
            to: PinId::new(to),
        })
    }
}

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum CliError {
    #[display("invalid layout: {_0}")]
    Layout(LayoutParseError),
    #[display("invalid puzzle: {_0}")]
    Game(GameError),
}

impl Args {
    #[must_use]
    pub fn settings(&self) -> Settings {
        Settings {
            solver: SolverSettings {
                cycles_per_tick: self.cycles_per_tick,
            },
            replay: ReplaySettings {
                frames_per_step: self.frames_per_step,
            },
        }
    }

    /// Builds the initial game.
    pub fn game(&self) -> Result<Game, CliError> {
        let game = match &self.layout {
            Some(layout) => Game::from_arrangement(layout.parse::<Arrangement>()?)?,
            None => Game::new(self.rings, self.pins, PinId::new(self.starter))?,
        };
        Ok(game)
    }

    /// Queues the scripted actions: the optional reset, the player moves, and
    /// the solve request.
    pub fn queue_actions(&self, queue: &mut ActionRequestQueue) {
        if let Some(seed) = self.reset_seed {
            queue.request(Action::ResetRandom { seed });
        }
        for PlayerMove { from, to } in &self.moves {
            queue.request(Action::Move {
                from: *from,
                to: *to,
            });
        }
        queue.request(Action::RequestSolve);
    }
}
