use core::{fmt, ops::RangeInclusive};

use crate::{
    helper::{map_pair, Pair},
    Error, Proc,
};

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Pair<Proc>", into = "Pair<Proc>")
)]
/// A closed interval `[inf, sup]` of processor indices.
///
/// Both bounds are included, so `ProcInt::new(2, 4)` stands for
/// the processors `2`, `3` and `4`.
/// The lower bound never exceeds the upper one.
pub struct ProcInt {
    inf: Proc,
    sup: Proc,
}

impl ProcInt {
    /// Create the interval `[inf, sup]`.
    ///
    /// ```
    /// # use procset::{Error, ProcInt};
    /// assert_eq!(ProcInt::new(1, 3).unwrap().len(), 3);
    /// assert_eq!(ProcInt::new(5, 2), Err(Error::InvalidBounds { inf: 5, sup: 2 }));
    /// ```
    ///
    /// # Errors
    ///
    /// Return [`Error::InvalidBounds`] when `inf > sup`.
    pub fn new(inf: Proc, sup: Proc) -> Result<Self, Error> {
        if inf > sup {
            return Err(Error::InvalidBounds {
                inf: i64::from(inf),
                sup: i64::from(sup),
            });
        }
        Ok(Self { inf, sup })
    }

    /// Create the interval containing the single processor `x`.
    pub const fn singleton(x: Proc) -> Self {
        Self { inf: x, sup: x }
    }

    /// Build an interval out of bounds known to be ordered.
    pub(crate) fn new_unchecked(inf: Proc, sup: Proc) -> Self {
        debug_assert!(inf <= sup);
        Self { inf, sup }
    }

    /// The lower bound.
    pub const fn inf(&self) -> Proc {
        self.inf
    }

    /// The upper bound.
    pub const fn sup(&self) -> Proc {
        self.sup
    }

    #[allow(clippy::len_without_is_empty)]
    /// The number of processors in the interval.
    ///
    /// An interval is never empty, hence the result is at least `1`.
    pub fn len(&self) -> u64 {
        u64::from(self.sup) - u64::from(self.inf) + 1
    }

    /// Whether the processor `x` lies within the interval.
    pub const fn contains(&self, x: Proc) -> bool {
        self.inf <= x && x <= self.sup
    }

    /// Display the interval with a custom separator between its bounds.
    ///
    /// ```
    /// # use procset::ProcInt;
    /// let itv = ProcInt::new(2, 5).unwrap();
    /// assert_eq!(itv.display_with(":").to_string(), "2:5");
    /// assert_eq!(ProcInt::singleton(7).display_with(":").to_string(), "7");
    /// ```
    pub const fn display_with<'a>(&'a self, insep: &'a str) -> DisplayInt<'a> {
        DisplayInt {
            itv: self,
            insep: Separator::Str(insep),
        }
    }

    /// The processors of the interval as a standard range.
    pub const fn range(&self) -> RangeInclusive<Proc> {
        self.inf..=self.sup
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum Separator<'a> {
    Str(&'a str),
    Char(char),
}

impl fmt::Display for Separator<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Char(c) => fmt::Write::write_char(f, *c),
        }
    }
}

/// Helper to display a [`ProcInt`] with a custom bounds separator.
///
/// Created by [`ProcInt::display_with`].
#[derive(Debug, Clone, Copy)]
pub struct DisplayInt<'a> {
    pub(crate) itv: &'a ProcInt,
    pub(crate) insep: Separator<'a>,
}

impl fmt::Display for DisplayInt<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ProcInt { inf, sup } = *self.itv;
        if inf == sup {
            write!(f, "{inf}")
        } else {
            write!(f, "{inf}{}{sup}", self.insep)
        }
    }
}

impl fmt::Display for ProcInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.display_with(crate::str::DEFAULT_INSEP), f)
    }
}

impl From<ProcInt> for Pair<Proc> {
    fn from(itv: ProcInt) -> Self {
        (itv.inf, itv.sup)
    }
}

impl From<ProcInt> for RangeInclusive<Proc> {
    fn from(itv: ProcInt) -> Self {
        itv.range()
    }
}

impl TryFrom<Pair<Proc>> for ProcInt {
    type Error = Error;

    fn try_from((inf, sup): Pair<Proc>) -> Result<Self, Self::Error> {
        Self::new(inf, sup)
    }
}

impl TryFrom<RangeInclusive<Proc>> for ProcInt {
    type Error = Error;

    fn try_from(range: RangeInclusive<Proc>) -> Result<Self, Self::Error> {
        Self::try_from(range.into_inner())
    }
}

impl TryFrom<Pair<i64>> for ProcInt {
    type Error = Error;

    /// Convert signed bounds, as they come from foreign callers.
    ///
    /// Ordering and negative bounds are checked first,
    /// so `(-1, 5)` is an [`Error::InvalidBounds`]
    /// while `(0, 1 << 40)` is an [`Error::InvalidType`].
    fn try_from((inf, sup): Pair<i64>) -> Result<Self, Self::Error> {
        if inf > sup || inf < 0 {
            return Err(Error::InvalidBounds { inf, sup });
        }

        let (inf_res, sup_res) = map_pair((inf, sup), |b| {
            Proc::try_from(b).map_err(|_| Error::InvalidType(b))
        });
        Self::new(inf_res?, sup_res?)
    }
}
