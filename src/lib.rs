//! Sets of processors stored as sorted disjoint closed intervals.
//!
//! A [`ProcSet`] keeps its processors as a minimal list of intervals:
//! no two of them overlap or touch, and they are sorted by bounds.
//! The set operations work on the intervals directly, so their cost
//! depends on the number of intervals and not on the number of processors.
//!
//! ```
//! use procset::{procset, ProcSet};
//!
//! let a: ProcSet = "0-7 12".parse().unwrap();
//! let b = procset![(4, 12)].unwrap();
//!
//! assert_eq!((&a & &b).to_string(), "4-7 12");
//! assert_eq!((&a - &b).to_string(), "0-3");
//! assert_eq!((&a ^ &b).to_string(), "0-3 8-11");
//! assert_eq!((&a | &b).len(), 13);
//! ```
#![no_std]

extern crate alloc;

#[cfg(any(test, feature = "arbitrary"))]
mod arbitrary;
pub(crate) mod bounds;
mod error;
pub(crate) mod helper;
mod interval;
mod ops;
mod set;
mod str;

#[cfg(feature = "arbitrary")]
pub use self::arbitrary::Universe;

pub use self::{
    error::Error,
    helper::{OneOrPair, Pair},
    interval::{DisplayInt, ProcInt},
    ops::SetOp,
    set::{Iter, ProcSet},
    str::{DisplaySet, DEFAULT_INSEP, DEFAULT_OUTSEP},
};

/// A processor identifier.
pub type Proc = u32;
