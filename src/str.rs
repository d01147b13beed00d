use alloc::string::ToString as _;
use core::{fmt, str::FromStr};

use crate::{
    interval::{DisplayInt, Separator},
    Error, Proc, ProcInt, ProcSet,
};

/// The default separator between the bounds of an interval.
pub const DEFAULT_INSEP: &str = "-";
/// The default separator between the intervals of a set.
pub const DEFAULT_OUTSEP: &str = " ";

impl ProcSet {
    /// Parse a set written as `item (outsep item)*`,
    /// where an item is either `x` or `inf{insep}sup`.
    ///
    /// The empty string is the empty set.
    /// Items may overlap or come in any order.
    ///
    /// ```
    /// # use procset::ProcSet;
    /// let set = ProcSet::parse_with("8:9,1:3,5", ":", ",").unwrap();
    /// assert_eq!(set.to_string(), "1-3 5 8-9");
    /// ```
    ///
    /// # Errors
    ///
    /// Return [`Error::Parse`] when an item is not a non-negative
    /// integer or an ordered pair of them.
    pub fn parse_with(s: &str, insep: &str, outsep: &str) -> Result<Self, Error> {
        let mut set = Self::new();
        if s.is_empty() {
            return Ok(set);
        }

        let parse_error = || Error::Parse(s.to_string());
        let parse_proc = |bound: &str| bound.parse::<Proc>().map_err(|_| parse_error());

        for item in s.split(outsep) {
            let itv = match item.split_once(insep) {
                None => ProcInt::singleton(parse_proc(item)?),
                Some((inf, sup)) => {
                    ProcInt::new(parse_proc(inf)?, parse_proc(sup)?).map_err(|_| parse_error())?
                }
            };
            set.insert(itv)?;
        }
        Ok(set)
    }

    /// Display the set with custom separators.
    ///
    /// ```
    /// # use procset::ProcSet;
    /// let set: ProcSet = "1-3 5 8-9".parse().unwrap();
    /// assert_eq!(set.display_with(":", ",").to_string(), "1:3,5,8:9");
    /// ```
    pub const fn display_with<'a>(&'a self, insep: &'a str, outsep: &'a str) -> DisplaySet<'a> {
        DisplaySet {
            set: self,
            insep: Separator::Str(insep),
            outsep: Separator::Str(outsep),
        }
    }

    /// Display the set according to a two-character format specifier:
    /// the first character separates the bounds of an interval,
    /// the second one separates the intervals.
    ///
    /// ```
    /// # use procset::{Error, ProcSet};
    /// let set: ProcSet = "1-3 5 8-9".parse().unwrap();
    /// assert_eq!(set.display_spec(":,").unwrap().to_string(), "1:3,5,8:9");
    /// assert!(matches!(set.display_spec(":"), Err(Error::FormatSpec(_))));
    /// ```
    ///
    /// # Errors
    ///
    /// Return [`Error::FormatSpec`] unless the specifier
    /// has exactly two characters.
    pub fn display_spec(&self, spec: &str) -> Result<DisplaySet<'_>, Error> {
        let mut chars = spec.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(insep), Some(outsep), None) => Ok(DisplaySet {
                set: self,
                insep: Separator::Char(insep),
                outsep: Separator::Char(outsep),
            }),
            _ => Err(Error::FormatSpec(spec.to_string())),
        }
    }
}

/// Helper to display a [`ProcSet`] with custom separators.
///
/// Created by [`ProcSet::display_with`] and [`ProcSet::display_spec`].
#[derive(Debug, Clone, Copy)]
pub struct DisplaySet<'a> {
    set: &'a ProcSet,
    insep: Separator<'a>,
    outsep: Separator<'a>,
}

impl fmt::Display for DisplaySet<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, itv) in self.set.intervals().enumerate() {
            if i > 0 {
                write!(f, "{}", self.outsep)?;
            }
            let itv = DisplayInt {
                itv,
                insep: self.insep,
            };
            write!(f, "{itv}")?;
        }
        Ok(())
    }
}

impl fmt::Display for ProcSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.display_with(DEFAULT_INSEP, DEFAULT_OUTSEP), f)
    }
}

impl FromStr for ProcSet {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_with(s, DEFAULT_INSEP, DEFAULT_OUTSEP)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ProcSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ProcSet {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = <alloc::borrow::Cow<'de, str>>::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}


#[cfg(all(feature = "serde", test))]
mod deser_tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn set_as_string() {
        let set: ProcSet = "1-3 5".parse().unwrap();
        assert_eq!(serde_json::to_value(&set).unwrap(), json!("1-3 5"));

        let restored: ProcSet = serde_json::from_value(json!("5 1-3")).unwrap();
        assert_eq!(restored, set);
    }

    #[test]
    fn invalid_set_string() {
        assert!(serde_json::from_value::<ProcSet>(json!("3-1")).is_err());
        assert!(serde_json::from_value::<ProcSet>(json!(12)).is_err());
    }

    #[test]
    fn interval_as_pair() {
        let itv = ProcInt::new(2, 4).unwrap();
        assert_eq!(serde_json::to_value(itv).unwrap(), json!([2, 4]));

        let restored: ProcInt = serde_json::from_value(json!([2, 4])).unwrap();
        assert_eq!(restored, itv);
        assert!(serde_json::from_value::<ProcInt>(json!([4, 2])).is_err());
        assert!(serde_json::from_value::<ProcInt>(json!([-1, 2])).is_err());
    }
}
