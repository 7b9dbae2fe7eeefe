use std::{
    fmt::{self, Display},
    str::FromStr,
};

use crate::{
    LayoutParseError, MalformedPuzzleError, PinId, PuzzleView, RingId, RingSize, RingStack,
};

/// A configuration of rings on pins, together with the starter pin.
///
/// An `Arrangement` is the live, caller-owned description of a puzzle: every
/// ring has a physical [`RingSize`] (any distinct values) and sits on exactly one
/// pin, and no ring rests on a smaller one. Constructors validate these rules and
/// report violations as [`MalformedPuzzleError`].
///
/// The mutating methods ([`pop`](Self::pop), [`push`](Self::push)) are the raw
/// pin operations the interactive layer builds on; they do not consult the
/// legality rule themselves.
///
/// # Layout notation
///
/// Arrangements parse from and render to a compact text form: pins are
/// separated by `|`, each pin lists ring sizes bottom to top separated by
/// whitespace, an empty pin may be written as `.`, and the starter pin is
/// prefixed with `*`. Ring ids are assigned in order of appearance.
///
/// ```
/// use hanoi_core::{Arrangement, PinId, RingId, RingSize};
///
/// let arrangement: Arrangement = "*30 20 | . | 10".parse()?;
/// assert_eq!(arrangement.ring_count(), 3);
/// assert_eq!(arrangement.starter(), PinId::new(0));
/// assert_eq!(arrangement.ring_size(RingId::new(2)), Some(RingSize::new(10)));
/// assert_eq!(arrangement.to_string(), "*30 20 | . | 10");
/// # Ok::<(), hanoi_core::LayoutParseError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arrangement {
    ring_sizes: Vec<RingSize>,
    pins: Vec<RingStack>,
    starter: PinId,
}

impl Arrangement {
    /// Creates an arrangement from ring sizes (indexed by [`RingId`]), pin stacks
    /// and the starter pin.
    ///
    /// # Errors
    ///
    /// Returns a [`MalformedPuzzleError`] if the configuration is not a valid
    /// puzzle; see [`validate`](Self::validate).
    pub fn new(
        ring_sizes: Vec<RingSize>,
        pins: Vec<RingStack>,
        starter: PinId,
    ) -> Result<Self, MalformedPuzzleError> {
        let this = Self {
            ring_sizes,
            pins,
            starter,
        };
        this.validate()?;
        Ok(this)
    }

    /// Creates a fresh puzzle: `ring_count` rings stacked on `starter`, the
    /// largest at the bottom.
    ///
    /// Ring `R(0)` is the largest ring with size `ring_count`, the last ring is
    /// the smallest with size `1`.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedPuzzleError::NoPins`] if `pin_count` is zero and
    /// [`MalformedPuzzleError::StarterOutOfRange`] if `starter` is not a pin.
    ///
    /// # Examples
    ///
    /// ```
    /// use hanoi_core::{Arrangement, PinId};
    ///
    /// let arrangement = Arrangement::stacked(3, 3, PinId::new(1))?;
    /// assert_eq!(arrangement.to_string(), ". | *3 2 1 | .");
    /// # Ok::<(), hanoi_core::MalformedPuzzleError>(())
    /// ```
    pub fn stacked(
        ring_count: u32,
        pin_count: usize,
        starter: PinId,
    ) -> Result<Self, MalformedPuzzleError> {
        let ring_sizes: Vec<_> = (1..=ring_count).rev().map(RingSize::new).collect();
        let mut pins = vec![RingStack::new(); pin_count];
        if let Some(stack) = pins.get_mut(starter.index()) {
            *stack = (0..ring_sizes.len()).map(RingId::new).collect();
        }
        Self::new(ring_sizes, pins, starter)
    }

    /// Checks that this arrangement is a playable puzzle.
    ///
    /// # Errors
    ///
    /// - [`MalformedPuzzleError::NoPins`] if there is no pin.
    /// - [`MalformedPuzzleError::StarterOutOfRange`] if the starter pin does not exist.
    /// - [`MalformedPuzzleError::DuplicateSize`] if two rings have the same size.
    /// - [`MalformedPuzzleError::UnknownRing`] if a pin references a ring that does not exist.
    /// - [`MalformedPuzzleError::DuplicateRing`] if a ring is stacked more than once.
    /// - [`MalformedPuzzleError::StackOrder`] if a ring rests on a smaller one.
    /// - [`MalformedPuzzleError::UnplacedRing`] if a ring is on no pin.
    pub fn validate(&self) -> Result<(), MalformedPuzzleError> {
        if self.pins.is_empty() {
            return Err(MalformedPuzzleError::NoPins);
        }
        if self.starter.index() >= self.pins.len() {
            return Err(MalformedPuzzleError::StarterOutOfRange {
                starter: self.starter,
                pin_count: self.pins.len(),
            });
        }

        let mut sizes = self.ring_sizes.clone();
        sizes.sort_unstable();
        if let Some(pair) = sizes.windows(2).find(|pair| pair[0] == pair[1]) {
            return Err(MalformedPuzzleError::DuplicateSize { size: pair[0] });
        }

        let mut placed = vec![false; self.ring_sizes.len()];
        for (pin, stack) in PinId::all(self.pins.len()).zip(&self.pins) {
            let mut below: Option<RingId> = None;
            for ring in stack {
                let Some(seen) = placed.get_mut(ring.index()) else {
                    return Err(MalformedPuzzleError::UnknownRing { pin, ring });
                };
                if *seen {
                    return Err(MalformedPuzzleError::DuplicateRing { ring });
                }
                *seen = true;
                if let Some(below) = below {
                    if self.size_of(ring) >= self.size_of(below) {
                        return Err(MalformedPuzzleError::StackOrder {
                            pin,
                            below,
                            above: ring,
                        });
                    }
                }
                below = Some(ring);
            }
        }

        if let Some(index) = placed.iter().position(|placed| !placed) {
            return Err(MalformedPuzzleError::UnplacedRing {
                ring: RingId::new(index),
            });
        }
        Ok(())
    }

    /// Returns the number of rings.
    #[must_use]
    pub fn ring_count(&self) -> usize {
        self.ring_sizes.len()
    }

    /// Returns the number of pins.
    #[must_use]
    pub fn pin_count(&self) -> usize {
        self.pins.len()
    }

    /// Returns the starter pin.
    #[must_use]
    pub fn starter(&self) -> PinId {
        self.starter
    }

    /// Returns every ring id, in id order.
    pub fn rings(&self) -> impl DoubleEndedIterator<Item = RingId> + ExactSizeIterator {
        (0..self.ring_sizes.len()).map(RingId::new)
    }

    /// Returns the physical size of `ring`, or `None` if it is not part of the puzzle.
    #[must_use]
    pub fn ring_size(&self, ring: RingId) -> Option<RingSize> {
        self.ring_sizes.get(ring.index()).copied()
    }

    /// Returns the largest ring, or `None` if the puzzle has no ring.
    #[must_use]
    pub fn largest_ring(&self) -> Option<RingId> {
        self.rings().max_by_key(|&ring| self.size_of(ring))
    }

    /// Returns the stack of `pin`, or `None` if the pin does not exist.
    #[must_use]
    pub fn pin(&self, pin: PinId) -> Option<&RingStack> {
        self.pins.get(pin.index())
    }

    /// Returns every pin stack, left to right.
    #[must_use]
    pub fn pins(&self) -> &[RingStack] {
        &self.pins
    }

    /// Returns the pin currently holding `ring`.
    #[must_use]
    pub fn locate(&self, ring: RingId) -> Option<PinId> {
        PinId::all(self.pins.len())
            .zip(&self.pins)
            .find(|(_, stack)| stack.iter().any(|r| r == ring))
            .map(|(pin, _)| pin)
    }

    /// Returns `true` if a pin other than the starter holds every ring.
    ///
    /// A puzzle without rings is never complete.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        let ring_count = self.ring_count();
        ring_count > 0
            && PinId::all(self.pins.len())
                .zip(&self.pins)
                .any(|(pin, stack)| pin != self.starter && stack.len() == ring_count)
    }

    /// Removes and returns the top ring of `pin`.
    ///
    /// Returns `None` if the pin is empty or does not exist.
    pub fn pop(&mut self, pin: PinId) -> Option<RingId> {
        self.pins.get_mut(pin.index())?.pop()
    }

    /// Places `ring` on top of `pin` without consulting the legality rule.
    ///
    /// # Panics
    ///
    /// Panics if `pin` does not exist.
    pub fn push(&mut self, pin: PinId, ring: RingId) {
        self.pins[pin.index()].push(ring);
    }

    /// Restacks every ring on `starter`, largest at the bottom, and makes it the
    /// new starter pin.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedPuzzleError::StarterOutOfRange`] if `starter` is not a
    /// pin. The arrangement is left unchanged in that case.
    pub fn restack(&mut self, starter: PinId) -> Result<(), MalformedPuzzleError> {
        if starter.index() >= self.pins.len() {
            return Err(MalformedPuzzleError::StarterOutOfRange {
                starter,
                pin_count: self.pins.len(),
            });
        }
        let mut rings: Vec<_> = self.rings().collect();
        rings.sort_unstable_by_key(|&ring| std::cmp::Reverse(self.size_of(ring)));
        for stack in &mut self.pins {
            stack.clear();
        }
        self.pins[starter.index()] = rings.into_iter().collect();
        self.starter = starter;
        Ok(())
    }
}

impl PuzzleView for Arrangement {
    type Ring = RingId;

    fn pin_count(&self) -> usize {
        self.pins.len()
    }

    fn top(&self, pin: PinId) -> Option<RingId> {
        self.pins.get(pin.index()).and_then(RingStack::top)
    }

    /// # Panics
    ///
    /// Panics if `ring` is not part of the puzzle.
    fn size_of(&self, ring: RingId) -> RingSize {
        self.ring_sizes[ring.index()]
    }
}

impl FromStr for Arrangement {
    type Err = LayoutParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut ring_sizes = Vec::new();
        let mut pins = Vec::new();
        let mut starter = None;

        for (index, part) in s.split('|').enumerate() {
            let mut body = part.trim();
            if let Some(rest) = body.strip_prefix('*') {
                if starter.replace(PinId::new(index)).is_some() {
                    return Err(LayoutParseError::MultipleStarters);
                }
                body = rest.trim_start();
            }

            let mut stack = RingStack::new();
            if body != "." {
                for token in body.split_whitespace() {
                    let size = token
                        .parse::<u32>()
                        .ok()
                        .filter(|&size| size > 0)
                        .ok_or_else(|| LayoutParseError::InvalidSize {
                            token: token.to_owned(),
                        })?;
                    stack.push(RingId::new(ring_sizes.len()));
                    ring_sizes.push(RingSize::new(size));
                }
            }
            pins.push(stack);
        }

        let starter = starter.ok_or(LayoutParseError::MissingStarter)?;
        Ok(Self::new(ring_sizes, pins, starter)?)
    }
}

impl Display for Arrangement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (pin, stack) in PinId::all(self.pins.len()).zip(&self.pins) {
            if pin.index() > 0 {
                f.write_str(" | ")?;
            }
            if pin == self.starter {
                f.write_str("*")?;
            }
            if stack.is_empty() {
                f.write_str(".")?;
                continue;
            }
            for (i, ring) in stack.iter().enumerate() {
                if i > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{}", self.size_of(ring))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> Result<Arrangement, LayoutParseError> {
        s.parse()
    }

    #[test]
    fn test_parse_assigns_ids_in_order_of_appearance() {
        let arrangement = parse("2 1 | *5 | . | 3").unwrap();
        assert_eq!(arrangement.pin_count(), 4);
        assert_eq!(arrangement.starter(), PinId::new(1));
        let sizes: Vec<_> = arrangement
            .rings()
            .map(|ring| arrangement.ring_size(ring).unwrap().get())
            .collect();
        assert_eq!(sizes, [2, 1, 5, 3]);
        assert_eq!(arrangement.locate(RingId::new(2)), Some(PinId::new(1)));
        assert_eq!(arrangement.locate(RingId::new(3)), Some(PinId::new(3)));
    }

    #[test]
    fn test_display_round_trip() {
        for text in ["*3 2 1 | . | .", ". | 4 | *3 1", "*."] {
            assert_eq!(parse(text).unwrap().to_string(), text);
        }
        // Whitespace and empty pins are normalised.
        assert_eq!(parse(" * 3  2|| ").unwrap().to_string(), "*3 2 | . | .");
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse("3 2 1 | |"), Err(LayoutParseError::MissingStarter));
        assert_eq!(parse("*3 | *2"), Err(LayoutParseError::MultipleStarters));
        assert_eq!(
            parse("*3 x"),
            Err(LayoutParseError::InvalidSize {
                token: "x".to_owned()
            })
        );
        assert_eq!(
            parse("*3 0"),
            Err(LayoutParseError::InvalidSize {
                token: "0".to_owned()
            })
        );
    }

    #[test]
    fn test_parse_rejects_stack_order() {
        assert_eq!(
            parse("*1 2 | ."),
            Err(LayoutParseError::Malformed(MalformedPuzzleError::StackOrder {
                pin: PinId::new(0),
                below: RingId::new(0),
                above: RingId::new(1),
            }))
        );
    }

    #[test]
    fn test_parse_rejects_duplicate_size() {
        assert_eq!(
            parse("*2 | 2"),
            Err(LayoutParseError::Malformed(
                MalformedPuzzleError::DuplicateSize {
                    size: RingSize::new(2)
                }
            ))
        );
    }

    #[test]
    fn test_new_rejects_unresolvable_rings() {
        let sizes = vec![RingSize::new(2), RingSize::new(1)];
        let unknown = vec![
            [RingId::new(0), RingId::new(1)].into_iter().collect(),
            [RingId::new(5)].into_iter().collect(),
        ];
        assert_eq!(
            Arrangement::new(sizes.clone(), unknown, PinId::new(0)),
            Err(MalformedPuzzleError::UnknownRing {
                pin: PinId::new(1),
                ring: RingId::new(5),
            })
        );

        let duplicate = vec![
            [RingId::new(0), RingId::new(1)].into_iter().collect(),
            [RingId::new(1)].into_iter().collect(),
        ];
        assert_eq!(
            Arrangement::new(sizes.clone(), duplicate, PinId::new(0)),
            Err(MalformedPuzzleError::DuplicateRing {
                ring: RingId::new(1)
            })
        );

        let unplaced = vec![[RingId::new(0)].into_iter().collect(), RingStack::new()];
        assert_eq!(
            Arrangement::new(sizes, unplaced, PinId::new(0)),
            Err(MalformedPuzzleError::UnplacedRing {
                ring: RingId::new(1)
            })
        );
    }

    #[test]
    fn test_stacked() {
        let arrangement = Arrangement::stacked(4, 3, PinId::new(0)).unwrap();
        assert_eq!(arrangement.to_string(), "*4 3 2 1 | . | .");
        assert_eq!(arrangement.largest_ring(), Some(RingId::new(0)));
        assert!(!arrangement.is_complete());

        assert_eq!(
            Arrangement::stacked(3, 0, PinId::new(0)),
            Err(MalformedPuzzleError::NoPins)
        );
        assert_eq!(
            Arrangement::stacked(3, 3, PinId::new(3)),
            Err(MalformedPuzzleError::StarterOutOfRange {
                starter: PinId::new(3),
                pin_count: 3,
            })
        );
    }

    #[test]
    fn test_is_complete_ignores_starter() {
        assert!(!parse("*3 2 1 | . | .").unwrap().is_complete());
        assert!(parse("*. | . | 3 2 1").unwrap().is_complete());
        assert!(!parse("*. | 3 2 | 1").unwrap().is_complete());
        assert!(!parse("*.").unwrap().is_complete());
    }

    #[test]
    fn test_restack() {
        let mut arrangement = parse("*2 | 3 1 | .").unwrap();
        arrangement.restack(PinId::new(2)).unwrap();
        assert_eq!(arrangement.to_string(), ". | . | *3 2 1");
        assert!(arrangement.validate().is_ok());

        assert!(arrangement.restack(PinId::new(3)).is_err());
        assert_eq!(arrangement.to_string(), ". | . | *3 2 1");
    }

    #[test]
    fn test_pop_push() {
        let mut arrangement = parse("*3 2 1 | .").unwrap();
        let ring = arrangement.pop(PinId::new(0)).unwrap();
        assert_eq!(ring, RingId::new(2));
        assert_eq!(
            arrangement.validate(),
            Err(MalformedPuzzleError::UnplacedRing { ring })
        );
        arrangement.push(PinId::new(1), ring);
        assert_eq!(arrangement.to_string(), "*3 2 | 1");
        assert_eq!(arrangement.pop(PinId::new(5)), None);
    }
}
