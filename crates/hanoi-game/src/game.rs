use hanoi_core::{Arrangement, PinId, PuzzleView, RingId, RingSize, can_place};
use hanoi_solver::Step;
use rand::{SeedableRng as _, seq::SliceRandom as _};
use rand_pcg::Pcg64;

use crate::GameError;

/// A ring lifted off its pin and not yet dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeldRing {
    ring: RingId,
    source: PinId,
}

impl HeldRing {
    /// Returns the lifted ring.
    #[must_use]
    pub fn ring(&self) -> RingId {
        self.ring
    }

    /// Returns the pin the ring was lifted from.
    #[must_use]
    pub fn source(&self) -> PinId {
        self.source
    }
}

/// What happened to a held ring when it was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum DropOutcome {
    /// The ring landed on another pin and the move was counted.
    Moved,
    /// The ring was put back on the pin it came from.
    Returned,
    /// The pin refused the ring; it went back to its source.
    Denied,
}

/// A live puzzle session.
///
/// Tracks the ring configuration, the ring currently held by the player, the
/// move counter, and whether the puzzle has been completed. A game is complete
/// once a pin other than the starter holds every ring; from then on rings can
/// no longer be lifted until the game is reset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    arrangement: Arrangement,
    held: Option<HeldRing>,
    moves: usize,
    completed: bool,
}

impl Game {
    /// Creates a fresh game with every ring stacked on `starter`.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Malformed`] if there is no pin or `starter` does not
    /// exist.
    pub fn new(ring_count: u32, pin_count: usize, starter: PinId) -> Result<Self, GameError> {
        let arrangement = Arrangement::stacked(ring_count, pin_count, starter)?;
        Self::from_arrangement(arrangement)
    }

    /// Creates a game from an arbitrary configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Malformed`] if the configuration is not a playable
    /// puzzle, e.g. after a raw [`Arrangement::pop`] left a ring on no pin.
    pub fn from_arrangement(arrangement: Arrangement) -> Result<Self, GameError> {
        arrangement.validate()?;
        let completed = arrangement.is_complete();
        Ok(Self {
            arrangement,
            held: None,
            moves: 0,
            completed,
        })
    }

    /// Returns the current configuration.
    ///
    /// While a ring is held it is on no pin.
    #[must_use]
    pub fn arrangement(&self) -> &Arrangement {
        &self.arrangement
    }

    /// Returns the configuration to hand to a solver.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::AlreadyHolding`] while a ring is lifted.
    pub fn solvable_arrangement(&self) -> Result<&Arrangement, GameError> {
        match self.held {
            Some(held) => Err(GameError::AlreadyHolding { ring: held.ring }),
            None => Ok(&self.arrangement),
        }
    }

    /// Returns the ring currently lifted, if any.
    #[must_use]
    pub fn held(&self) -> Option<HeldRing> {
        self.held
    }

    /// Returns the number of counted moves since the last reset.
    #[must_use]
    pub fn moves(&self) -> usize {
        self.moves
    }

    /// Returns `true` once the puzzle has been completed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completed
    }

    /// Lifts `ring` off its pin.
    ///
    /// # Errors
    ///
    /// - [`GameError::AlreadyComplete`] if the puzzle is complete.
    /// - [`GameError::AlreadyHolding`] if another ring is lifted.
    /// - [`GameError::RingOutOfRange`] if the ring does not exist.
    /// - [`GameError::NotTopRing`] if another ring rests on it.
    pub fn pick_up(&mut self, ring: RingId) -> Result<(), GameError> {
        if self.completed {
            return Err(GameError::AlreadyComplete);
        }
        if let Some(held) = self.held {
            return Err(GameError::AlreadyHolding { ring: held.ring });
        }
        if self.arrangement.ring_size(ring).is_none() {
            return Err(GameError::RingOutOfRange { ring });
        }
        let source = self
            .arrangement
            .locate(ring)
            .ok_or(GameError::NotTopRing { ring })?;
        if self.arrangement.top(source) != Some(ring) {
            return Err(GameError::NotTopRing { ring });
        }

        self.arrangement.pop(source);
        self.held = Some(HeldRing { ring, source });
        Ok(())
    }

    /// Drops the held ring on `pin`.
    ///
    /// If the pin accepts the ring it lands there, otherwise it returns to the
    /// pin it was lifted from. A pin that does not exist never accepts a ring.
    /// Only a landing on a different pin counts as a move.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::NothingHeld`] if no ring is lifted.
    pub fn drop_on(&mut self, pin: PinId) -> Result<DropOutcome, GameError> {
        let held = self.held.take().ok_or(GameError::NothingHeld)?;
        if !can_place(&self.arrangement, held.ring, pin) {
            self.arrangement.push(held.source, held.ring);
            return Ok(DropOutcome::Denied);
        }

        self.arrangement.push(pin, held.ring);
        if pin == held.source {
            return Ok(DropOutcome::Returned);
        }
        self.moves += 1;
        if pin != self.arrangement.starter() {
            self.check_completion();
        }
        Ok(DropOutcome::Moved)
    }

    /// Puts the held ring back on its source pin.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::NothingHeld`] if no ring is lifted.
    pub fn cancel_hold(&mut self) -> Result<(), GameError> {
        let held = self.held.take().ok_or(GameError::NothingHeld)?;
        self.arrangement.push(held.source, held.ring);
        Ok(())
    }

    /// Replays one solver step.
    ///
    /// The move is not checked against the legality rule; the step is trusted
    /// to come from a ledger computed for this configuration.
    ///
    /// # Errors
    ///
    /// - [`GameError::AlreadyHolding`] if a ring is lifted.
    /// - [`GameError::PinOutOfRange`] if either pin does not exist.
    /// - [`GameError::ReplayMismatch`] if the step's ring is not on top of its
    ///   source pin.
    pub fn apply_step(&mut self, step: &Step) -> Result<(), GameError> {
        if let Some(held) = self.held {
            return Err(GameError::AlreadyHolding { ring: held.ring });
        }
        for pin in [step.from(), step.to()] {
            if pin.index() >= self.arrangement.pin_count() {
                return Err(GameError::PinOutOfRange { pin });
            }
        }
        if self.arrangement.top(step.from()) != Some(step.ring()) {
            return Err(GameError::ReplayMismatch { step: *step });
        }

        self.arrangement.pop(step.from());
        self.arrangement.push(step.to(), step.ring());
        self.moves += 1;
        self.check_completion();
        Ok(())
    }

    /// Replays a whole ledger, stopping at the first step that fails.
    ///
    /// # Errors
    ///
    /// Returns the error of the first failing step; see
    /// [`apply_step`](Self::apply_step).
    pub fn replay<'a, I>(&mut self, steps: I) -> Result<(), GameError>
    where
        I: IntoIterator<Item = &'a Step>,
    {
        for step in steps {
            self.apply_step(step)?;
        }
        Ok(())
    }

    /// Restacks every ring on `starter`, which becomes the new starter pin.
    ///
    /// A held ring is restacked too, and the move counter starts over.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::PinOutOfRange`] if `starter` does not exist.
    pub fn reset(&mut self, starter: PinId) -> Result<(), GameError> {
        if starter.index() >= self.arrangement.pin_count() {
            return Err(GameError::PinOutOfRange { pin: starter });
        }
        self.arrangement.restack(starter)?;
        self.held = None;
        self.moves = 0;
        self.completed = false;
        log::debug!("reset onto {starter}: {}", self.arrangement);
        Ok(())
    }

    /// Resets onto a starter pin chosen from `seed`.
    ///
    /// The new starter differs from the current one whenever there is more than
    /// one pin. Returns the chosen pin.
    ///
    /// # Errors
    ///
    /// Never fails for a valid game; the error type is shared with
    /// [`reset`](Self::reset).
    pub fn reset_random(&mut self, seed: u64) -> Result<PinId, GameError> {
        let current = self.arrangement.starter();
        let mut choices: Vec<_> = PinId::all(self.arrangement.pin_count())
            .filter(|&pin| pin != current)
            .collect();
        let mut rng = Pcg64::seed_from_u64(seed);
        choices.shuffle(&mut rng);
        let starter = choices.first().copied().unwrap_or(current);
        self.reset(starter)?;
        Ok(starter)
    }

    fn check_completion(&mut self) {
        if !self.completed && self.arrangement.is_complete() {
            self.completed = true;
            log::info!("puzzle complete after {} moves", self.moves);
        }
    }
}

impl PuzzleView for Game {
    type Ring = RingId;

    fn pin_count(&self) -> usize {
        self.arrangement.pin_count()
    }

    fn top(&self, pin: PinId) -> Option<RingId> {
        self.arrangement.top(pin)
    }

    fn size_of(&self, ring: RingId) -> RingSize {
        self.arrangement.size_of(ring)
    }
}
