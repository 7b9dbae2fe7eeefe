use std::{num::NonZero, slice};

use hanoi_core::{PinId, RingId};

/// One executed, recorded move.
///
/// Steps name the live [`RingId`] and [`PinId`]s, so a ledger can be replayed
/// directly onto the puzzle it was computed from. Indices start at `1`.
///
/// # Examples
///
/// ```
/// use std::num::NonZero;
///
/// use hanoi_core::{PinId, RingId};
/// use hanoi_solver::Step;
///
/// let step = Step::new(PinId::new(0), PinId::new(2), RingId::new(4), NonZero::<usize>::MIN);
/// assert_eq!(step.to_string(), "S[1] R(4) -> P(2)");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
#[display("S[{index}] {ring} -> {to}")]
pub struct Step {
    from: PinId,
    to: PinId,
    ring: RingId,
    index: NonZero<usize>,
}

impl Step {
    /// Creates a step.
    #[must_use]
    pub const fn new(from: PinId, to: PinId, ring: RingId, index: NonZero<usize>) -> Self {
        Self {
            from,
            to,
            ring,
            index,
        }
    }

    /// Returns the source pin.
    #[must_use]
    pub const fn from(&self) -> PinId {
        self.from
    }

    /// Returns the destination pin.
    #[must_use]
    pub const fn to(&self) -> PinId {
        self.to
    }

    /// Returns the moved ring.
    #[must_use]
    pub const fn ring(&self) -> RingId {
        self.ring
    }

    /// Returns the 1-based position of this step in its ledger.
    #[must_use]
    pub const fn index(&self) -> NonZero<usize> {
        self.index
    }
}

/// Append-only sequence of [`Step`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepLedger {
    steps: Vec<Step>,
}

impl StepLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a move and returns the step, numbered after the last one.
    pub fn record(&mut self, from: PinId, to: PinId, ring: RingId) -> Step {
        let index = NonZero::<usize>::MIN.saturating_add(self.steps.len());
        let step = Step::new(from, to, ring, index);
        self.steps.push(step);
        step
    }

    /// Returns the number of recorded steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns `true` if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Returns the most recent step.
    #[must_use]
    pub fn last(&self) -> Option<&Step> {
        self.steps.last()
    }

    /// Iterates over the steps in execution order.
    pub fn iter(&self) -> slice::Iter<'_, Step> {
        self.steps.iter()
    }

    /// Returns the steps in execution order.
    #[must_use]
    pub fn as_slice(&self) -> &[Step] {
        &self.steps
    }
}

impl<'a> IntoIterator for &'a StepLedger {
    type Item = &'a Step;
    type IntoIter = slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl From<StepLedger> for Vec<Step> {
    fn from(ledger: StepLedger) -> Self {
        ledger.steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_numbers_from_one() {
        let mut ledger = StepLedger::new();
        assert!(ledger.is_empty());

        let first = ledger.record(PinId::new(0), PinId::new(1), RingId::new(2));
        let second = ledger.record(PinId::new(1), PinId::new(2), RingId::new(2));

        assert_eq!(first.index().get(), 1);
        assert_eq!(second.index().get(), 2);
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.last(), Some(&second));
        assert_eq!(Vec::from(ledger), [first, second]);
    }

    #[test]
    fn test_step_display() {
        let mut ledger = StepLedger::new();
        ledger.record(PinId::new(0), PinId::new(2), RingId::new(1));
        let step = ledger.record(PinId::new(2), PinId::new(1), RingId::new(0));
        assert_eq!(step.to_string(), "S[2] R(0) -> P(1)");
        assert_eq!(step.from(), PinId::new(2));
    }
}
