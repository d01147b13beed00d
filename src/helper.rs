use core::ops::RangeInclusive;

use crate::{Error, Proc, ProcInt};

/// A pair of lower and upper bounds.
pub type Pair<T> = (T, T);

pub fn map_pair<T, U, F>((a, b): Pair<T>, mut f: F) -> Pair<U>
where
    F: FnMut(T) -> U,
{
    (f(a), f(b))
}

/// Either a single value or a pair of values.
///
/// This is the item accepted by [`ProcSet::insert`][crate::ProcSet::insert]
/// and its siblings: a single processor or an `(inf, sup)` pair
/// of a closed interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OneOrPair<T> {
    /// A single value variant.
    One(T),
    /// A pair of values variant.
    Pair(Pair<T>),
}

impl<T> From<T> for OneOrPair<T> {
    fn from(value: T) -> Self {
        Self::One(value)
    }
}

impl<T> From<Pair<T>> for OneOrPair<T> {
    fn from(value: Pair<T>) -> Self {
        Self::Pair(value)
    }
}

impl<T> From<RangeInclusive<T>> for OneOrPair<T> {
    fn from(value: RangeInclusive<T>) -> Self {
        Self::Pair(value.into_inner())
    }
}

impl From<ProcInt> for OneOrPair<Proc> {
    fn from(itv: ProcInt) -> Self {
        Self::Pair(itv.into())
    }
}

impl TryFrom<OneOrPair<Proc>> for ProcInt {
    type Error = Error;

    fn try_from(item: OneOrPair<Proc>) -> Result<Self, Self::Error> {
        match item {
            OneOrPair::One(x) => Ok(Self::singleton(x)),
            OneOrPair::Pair((inf, sup)) => Self::new(inf, sup),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_is_singleton() {
        let itv = ProcInt::try_from(OneOrPair::<Proc>::One(7)).unwrap();
        assert_eq!(itv, ProcInt::singleton(7));
    }

    #[test]
    fn pair_and_range_agree() {
        let from_pair = ProcInt::try_from(OneOrPair::<Proc>::Pair((2, 5))).unwrap();
        let from_range = ProcInt::try_from(OneOrPair::<Proc>::from(2..=5)).unwrap();
        assert_eq!(from_pair, from_range);
    }

    #[test]
    fn reversed_pair_is_rejected() {
        assert_eq!(
            ProcInt::try_from(OneOrPair::<Proc>::Pair((5, 2))),
            Err(Error::InvalidBounds { inf: 5, sup: 2 })
        );
    }

    #[test]
    fn map_both_sides() {
        assert_eq!(map_pair((1, 2), |x| x * 10), (10, 20));
    }
}
