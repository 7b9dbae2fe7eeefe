use std::{iter::Copied, slice};

use crate::RingId;

/// An ordered, bottom-to-top stack of rings on a single pin.
///
/// `RingStack` is the Stack-of-Rings primitive shared by the live puzzle and
/// the solver. Rings only enter and leave through the top: [`push`] and [`pop`]
/// are O(1). The stack itself does not check sizes; callers consult
/// [`can_place`](crate::can_place) before pushing.
///
/// The ring handle type is generic so the solver can stack its own opaque keys
/// with the same primitive; the live puzzle uses [`RingId`].
///
/// [`push`]: Self::push
/// [`pop`]: Self::pop
///
/// # Examples
///
/// ```
/// use hanoi_core::{RingId, RingStack};
///
/// let mut stack = RingStack::new();
/// stack.push(RingId::new(0));
/// stack.push(RingId::new(1));
///
/// assert_eq!(stack.top(), Some(RingId::new(1)));
/// assert_eq!(stack.get(0), Some(RingId::new(0)));
/// assert_eq!(stack.pop(), Some(RingId::new(1)));
/// assert_eq!(stack.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RingStack<R = RingId> {
    rings: Vec<R>,
}

impl<R> Default for RingStack<R> {
    fn default() -> Self {
        Self { rings: Vec::new() }
    }
}

impl<R> RingStack<R>
where
    R: Copy,
{
    /// Creates an empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty stack with room for `capacity` rings.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            rings: Vec::with_capacity(capacity),
        }
    }

    /// Places a ring on top of the stack.
    pub fn push(&mut self, ring: R) {
        self.rings.push(ring);
    }

    /// Removes and returns the top ring, or `None` if the stack is empty.
    pub fn pop(&mut self) -> Option<R> {
        self.rings.pop()
    }

    /// Returns the top ring without removing it.
    #[must_use]
    pub fn top(&self) -> Option<R> {
        self.rings.last().copied()
    }

    /// Returns the ring at `index`, counting from the bottom (`0`).
    #[must_use]
    pub fn get(&self, index: usize) -> Option<R> {
        self.rings.get(index).copied()
    }

    /// Returns the number of rings on the stack.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rings.len()
    }

    /// Returns `true` if the stack holds no ring.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rings.is_empty()
    }

    /// Removes every ring.
    pub fn clear(&mut self) {
        self.rings.clear();
    }

    /// Iterates over the rings from bottom to top.
    pub fn iter(&self) -> Copied<slice::Iter<'_, R>> {
        self.rings.iter().copied()
    }

    /// Returns the rings as a bottom-to-top slice.
    #[must_use]
    pub fn as_slice(&self) -> &[R] {
        &self.rings
    }
}

impl<R> FromIterator<R> for RingStack<R> {
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        Self {
            rings: iter.into_iter().collect(),
        }
    }
}

impl<'a, R> IntoIterator for &'a RingStack<R>
where
    R: Copy,
{
    type Item = R;
    type IntoIter = Copied<slice::Iter<'a, R>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
