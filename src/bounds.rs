//! Half-open boundary events used by the merge engine.
//!
//! A closed interval `[inf, sup]` is flattened into two events:
//! the start at `inf` and the end at `sup + 1`.
//! The end positions are kept as `u64` so that `Proc::MAX` still
//! has room for the one-past-the-end position.

use crate::{Proc, ProcInt};

pub const LEFT: bool = false;
pub const RIGHT: bool = true;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// A half-open interval boundary: either the first included position
/// ([`LEFT`]) or the first excluded one ([`RIGHT`]).
pub struct Boundary {
    pub side: bool,
    pub at: u64,
}

impl Boundary {
    fn start(itv: ProcInt) -> Self {
        Self {
            side: LEFT,
            at: u64::from(itv.inf()),
        }
    }

    fn end(itv: ProcInt) -> Self {
        Self {
            side: RIGHT,
            at: u64::from(itv.sup()) + 1,
        }
    }

    /// Whether the sweep position `head` lies inside the set
    /// whose next pending boundary is `self`.
    ///
    /// Before a start, or exactly at an end, the position is outside.
    pub fn encloses(self, head: u64) -> bool {
        (head < self.at) == (self.side == RIGHT)
    }
}

/// Flatten the sorted intervals into a strictly increasing stream of boundaries.
pub fn flatten<'a, I>(itvs: I) -> impl Iterator<Item = Boundary> + 'a
where
    I: IntoIterator<Item = &'a ProcInt>,
    I::IntoIter: 'a,
{
    itvs.into_iter()
        .flat_map(|&itv| [Boundary::start(itv), Boundary::end(itv)])
}

/// Group a stream of boundary positions by pairs
/// and convert them back into closed intervals.
///
/// A dangling last position (an odd count) is dropped.
pub struct Unflatten<I> {
    positions: I,
}

impl<I> Unflatten<I> {
    pub const fn new(positions: I) -> Self {
        Self { positions }
    }
}

impl<I> Iterator for Unflatten<I>
where
    I: Iterator<Item = u64>,
{
    type Item = ProcInt;

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.positions.next()?;
        let end = self.positions.next()?;
        debug_assert!(start < end && end <= u64::from(Proc::MAX) + 1);

        // every position comes either from an `inf` or from a `sup + 1`,
        // and a start is strictly below its end, so both fit into `Proc`
        #[allow(clippy::cast_possible_truncation)]
        Some(ProcInt::new_unchecked(start as Proc, (end - 1) as Proc))
    }
}
