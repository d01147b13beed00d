use alloc::string::String;

use crate::Proc;

#[derive(Debug, Clone, PartialEq, Eq, Hash, thiserror::Error)]
/// The failures of the processor set operations.
///
/// Any operation returning this error leaves its receiver untouched.
pub enum Error {
    /// A bound does not fit into the processor index type.
    #[error("interval bound {0} is out of the processor index range")]
    InvalidType(i64),

    /// The lower bound is greater than the upper one, or a bound is negative.
    #[error("invalid interval bounds [{inf}, {sup}]")]
    InvalidBounds {
        /// The requested lower bound.
        inf: i64,
        /// The requested upper bound.
        sup: i64,
    },

    /// The text does not follow the `item (outsep item)*` grammar.
    #[error("invalid interval format, parsed string is: {0:?}")]
    Parse(String),

    /// The minimum or maximum of an empty set was requested.
    #[error("empty processor set")]
    EmptySet,

    /// A format specifier is not made of exactly two characters.
    #[error("invalid format specifier: {0:?}")]
    FormatSpec(String),

    /// The processor to remove does not belong to the set.
    #[error("processor {0} is not in the set")]
    Missing(Proc),
}
