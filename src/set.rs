use alloc::vec::Vec;
use core::{cmp::Ordering, iter::FlatMap, ops::RangeInclusive, slice};

use tracing::trace;

use crate::{helper::OneOrPair, Error, Proc, ProcInt};

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
/// A set of processors stored as disjoint closed intervals.
///
/// The intervals are kept sorted, non-overlapping and non-adjacent
/// after every mutation, so two sets holding the same processors
/// always store the same intervals.
///
/// ```
/// # use procset::ProcSet;
/// let mut set = ProcSet::new();
/// set.insert(1).unwrap();
/// set.insert(2).unwrap();
/// set.insert(3).unwrap();
/// assert_eq!(set.to_string(), "1-3");
/// assert_eq!(set.count(), 1);
/// ```
///
/// Mutation requires an exclusive borrow, so a set cannot change
/// while it is being iterated.
pub struct ProcSet {
    pub(crate) itvs: Vec<ProcInt>,
}

impl ProcSet {
    /// Create an empty set.
    pub const fn new() -> Self {
        Self { itvs: Vec::new() }
    }

    /// Build a set from normalized intervals.
    pub(crate) fn from_normalized(itvs: Vec<ProcInt>) -> Self {
        debug_assert!(itvs
            .windows(2)
            .all(|w| u64::from(w[0].sup()) + 1 < u64::from(w[1].inf())));
        Self { itvs }
    }

    /// Create a set from processors and intervals, possibly overlapping,
    /// inserting them one after another.
    ///
    /// ```
    /// # use procset::{OneOrPair, ProcInt, ProcSet};
    /// let set = ProcSet::try_from_items([
    ///     OneOrPair::<u32>::One(7),
    ///     OneOrPair::Pair((0, 1)),
    ///     ProcInt::new(2, 3).unwrap().into(),
    /// ])
    /// .unwrap();
    /// assert_eq!(set.to_string(), "0-3 7");
    /// ```
    ///
    /// # Errors
    ///
    /// Return [`Error::InvalidBounds`] on the first reversed interval.
    pub fn try_from_items<I>(items: I) -> Result<Self, Error>
    where
        I: IntoIterator,
        I::Item: Into<OneOrPair<Proc>>,
    {
        let mut set = Self::new();
        for item in items {
            set.insert(item)?;
        }
        Ok(set)
    }

    /// Insert a processor or an interval into the set.
    ///
    /// Every stored interval overlapping or touching the new one
    /// is absorbed into it.
    ///
    /// # Errors
    ///
    /// Return [`Error::InvalidBounds`] for a reversed interval,
    /// the set is left untouched then.
    pub fn insert<T>(&mut self, item: T) -> Result<(), Error>
    where
        T: Into<OneOrPair<Proc>>,
    {
        let itv = ProcInt::try_from(item.into())?;
        self.insert_interval(itv);
        Ok(())
    }

    fn insert_interval(&mut self, itv: ProcInt) {
        let (new_inf, new_sup) = (u64::from(itv.inf()), u64::from(itv.sup()));

        // first stored interval overlapping or touching from the left
        let lo = self
            .itvs
            .partition_point(|stored| u64::from(stored.sup()) + 1 < new_inf);
        // one past the last one overlapping or touching from the right
        let hi = self
            .itvs
            .partition_point(|stored| u64::from(stored.inf()) <= new_sup + 1);

        let merged = if lo < hi {
            ProcInt::new_unchecked(
                self.itvs[lo].inf().min(itv.inf()),
                self.itvs[hi - 1].sup().max(itv.sup()),
            )
        } else {
            itv
        };

        trace!(%itv, %merged, absorbed = hi - lo, "insert interval");
        self.itvs.splice(lo..hi, [merged]);
    }

    /// Remove a processor or an interval from the set.
    ///
    /// # Errors
    ///
    /// Return [`Error::InvalidBounds`] for a reversed interval
    /// or [`Error::Missing`] with the first absent processor
    /// when the item is not entirely in the set.
    /// The set is left untouched on error.
    pub fn remove<T>(&mut self, item: T) -> Result<(), Error>
    where
        T: Into<OneOrPair<Proc>>,
    {
        let itv = ProcInt::try_from(item.into())?;
        let removed = Self::from(itv);
        if let Ok(absent) = (&removed - &*self).min() {
            return Err(Error::Missing(absent));
        }

        *self -= &removed;
        Ok(())
    }

    /// Remove a processor or an interval from the set, if present.
    ///
    /// Processors of the item missing from the set are ignored.
    ///
    /// # Errors
    ///
    /// Return [`Error::InvalidBounds`] for a reversed interval.
    pub fn discard<T>(&mut self, item: T) -> Result<(), Error>
    where
        T: Into<OneOrPair<Proc>>,
    {
        let itv = ProcInt::try_from(item.into())?;
        *self -= &Self::from(itv);
        Ok(())
    }

    /// Remove and return the smallest processor of the set.
    pub fn pop(&mut self) -> Option<Proc> {
        let first = self.itvs.first_mut()?;
        let popped = first.inf();
        if first.inf() == first.sup() {
            self.itvs.remove(0);
        } else {
            *first = ProcInt::new_unchecked(popped + 1, first.sup());
        }
        trace!(popped, "pop processor");
        Some(popped)
    }

    /// Remove every processor from the set.
    pub fn clear(&mut self) {
        self.itvs.clear();
    }

    /// Whether the processor `x` is in the set.
    ///
    /// Binary search over the stored intervals.
    pub fn contains(&self, x: Proc) -> bool {
        self.itvs
            .binary_search_by(|itv| {
                if itv.sup() < x {
                    Ordering::Less
                } else if itv.inf() > x {
                    Ordering::Greater
                } else {
                    Ordering::Equal
                }
            })
            .is_ok()
    }

    /// The number of processors in the set.
    pub fn len(&self) -> u64 {
        self.itvs.iter().map(ProcInt::len).sum()
    }

    /// Whether the set contains no processor.
    pub fn is_empty(&self) -> bool {
        self.itvs.is_empty()
    }

    /// The number of disjoint intervals in the set.
    pub fn count(&self) -> usize {
        self.itvs.len()
    }

    /// Whether the processors form a single contiguous interval.
    ///
    /// The empty set is contiguous.
    pub fn is_contiguous(&self) -> bool {
        self.count() <= 1
    }

    /// The smallest processor.
    ///
    /// # Errors
    ///
    /// Return [`Error::EmptySet`] when the set is empty.
    pub fn min(&self) -> Result<Proc, Error> {
        self.itvs.first().map(ProcInt::inf).ok_or(Error::EmptySet)
    }

    /// The greatest processor.
    ///
    /// # Errors
    ///
    /// Return [`Error::EmptySet`] when the set is empty.
    pub fn max(&self) -> Result<Proc, Error> {
        self.itvs.last().map(ProcInt::sup).ok_or(Error::EmptySet)
    }

    #[must_use]
    /// The convex hull of the set: the smallest interval
    /// containing every processor, or the empty set.
    ///
    /// ```
    /// # use procset::ProcSet;
    /// let set: ProcSet = "1-3 5 8-9".parse().unwrap();
    /// assert_eq!(set.aggregate().to_string(), "1-9");
    /// assert!(ProcSet::new().aggregate().is_empty());
    /// ```
    pub fn aggregate(&self) -> Self {
        match (self.itvs.first(), self.itvs.last()) {
            (Some(first), Some(last)) => {
                ProcInt::new_unchecked(first.inf(), last.sup()).into()
            }
            _ => Self::new(),
        }
    }

    /// The `index`-th processor of the set in increasing order.
    pub fn nth(&self, index: u64) -> Option<Proc> {
        let mut rest = index;
        for itv in &self.itvs {
            if rest < itv.len() {
                // `rest` is below the interval length, which fits into `Proc` range
                #[allow(clippy::cast_possible_truncation)]
                return Some(itv.inf() + rest as Proc);
            }
            rest -= itv.len();
        }
        None
    }

    /// Remove and return the `index`-th processor of the set.
    ///
    /// The interval holding it is split in two when needed.
    pub fn remove_nth(&mut self, index: u64) -> Option<Proc> {
        let x = self.nth(index)?;
        *self -= &Self::from(ProcInt::singleton(x));
        trace!(index, removed = x, "remove processor by index");
        Some(x)
    }

    /// Iterate over the stored intervals in increasing order.
    pub fn intervals(&self) -> slice::Iter<'_, ProcInt> {
        self.itvs.iter()
    }

    /// Iterate over the processors in increasing order.
    ///
    /// The processors are generated lazily from the intervals.
    /// Use [`Iterator::rev`] to get them in decreasing order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.itvs.iter().flat_map(ProcInt::range as fn(&ProcInt) -> RangeInclusive<Proc>),
        }
    }

    /// Iterate over the processors in decreasing order.
    pub fn iter_desc(&self) -> core::iter::Rev<Iter<'_>> {
        self.iter().rev()
    }
}

type RangesOf<'a> = FlatMap<
    slice::Iter<'a, ProcInt>,
    RangeInclusive<Proc>,
    fn(&ProcInt) -> RangeInclusive<Proc>,
>;

#[derive(Debug, Clone)]
/// Iterator over the processors of a [`ProcSet`].
///
/// Created by [`ProcSet::iter`].
pub struct Iter<'a> {
    inner: RangesOf<'a>,
}

impl Iterator for Iter<'_> {
    type Item = Proc;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl core::iter::FusedIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a ProcSet {
    type Item = Proc;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl From<ProcInt> for ProcSet {
    fn from(itv: ProcInt) -> Self {
        Self::from_normalized(alloc::vec![itv])
    }
}

impl Extend<ProcInt> for ProcSet {
    fn extend<I: IntoIterator<Item = ProcInt>>(&mut self, iter: I) {
        for itv in iter {
            self.insert_interval(itv);
        }
    }
}

impl Extend<Proc> for ProcSet {
    fn extend<I: IntoIterator<Item = Proc>>(&mut self, iter: I) {
        self.extend(iter.into_iter().map(ProcInt::singleton));
    }
}

impl FromIterator<ProcInt> for ProcSet {
    fn from_iter<I: IntoIterator<Item = ProcInt>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl FromIterator<Proc> for ProcSet {
    fn from_iter<I: IntoIterator<Item = Proc>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

#[macro_export]
/// Create a [`ProcSet`] from processors and intervals.
///
/// Every item is anything convertible into a [`OneOrPair`]:
/// a single processor, an `(inf, sup)` pair, an inclusive range
/// or a [`ProcInt`]. Evaluates to `Result<ProcSet, Error>`.
///
/// ```
/// # use procset::{procset, Error};
/// let set = procset![0, (2, 4), 6..=7].unwrap();
/// assert_eq!(set.to_string(), "0 2-4 6-7");
///
/// assert_eq!(procset![], Ok(procset::ProcSet::new()));
/// assert_eq!(procset![(5, 2)], Err(Error::InvalidBounds { inf: 5, sup: 2 }));
/// ```
macro_rules! procset {
    () => {
        ::core::result::Result::<$crate::ProcSet, $crate::Error>::Ok($crate::ProcSet::new())
    };
    ($($item:expr),+ $(,)?) => {
        $crate::ProcSet::try_from_items([$($crate::OneOrPair::<$crate::Proc>::from($item)),+])
    };
}
