use alloc::vec::Vec;
use core::{
    fmt,
    iter::Peekable,
    ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Sub, SubAssign},
};

use tracing::trace;

use crate::{
    bounds::{flatten, Boundary, Unflatten},
    ProcInt, ProcSet,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// A binary set operation, defined by the way it decides
/// whether a position belongs to the result.
pub enum SetOp {
    /// Positions in either operand.
    Union,
    /// Positions in both operands.
    Intersection,
    /// Positions in the left operand but not in the right one.
    Difference,
    /// Positions in exactly one operand.
    SymmetricDifference,
}

impl SetOp {
    /// Whether a position belongs to the result,
    /// knowing whether it belongs to each operand.
    ///
    /// No operation keeps a position outside of both operands,
    /// so the result is always finite.
    pub const fn keep(self, in_left: bool, in_right: bool) -> bool {
        match self {
            Self::Union => in_left || in_right,
            Self::Intersection => in_left && in_right,
            Self::Difference => in_left && !in_right,
            Self::SymmetricDifference => in_left ^ in_right,
        }
    }
}

impl fmt::Display for SetOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Union => "union",
            Self::Intersection => "intersection",
            Self::Difference => "difference",
            Self::SymmetricDifference => "symmetric difference",
        })
    }
}

/// The sweep over two boundary streams.
///
/// Yields the half-open boundary positions of the result:
/// a position is produced whenever the `keep` predicate
/// changes its verdict relative to the previous position.
struct MergeBounds<L, R, F>
where
    L: Iterator<Item = Boundary>,
    R: Iterator<Item = Boundary>,
{
    left: Peekable<L>,
    right: Peekable<R>,
    keep: F,
    inside: bool,
}

impl<L, R, F> MergeBounds<L, R, F>
where
    L: Iterator<Item = Boundary>,
    R: Iterator<Item = Boundary>,
{
    fn new(left: L, right: R, keep: F) -> Self {
        Self {
            left: left.peekable(),
            right: right.peekable(),
            keep,
            inside: false,
        }
    }
}

impl<L, R, F> Iterator for MergeBounds<L, R, F>
where
    L: Iterator<Item = Boundary>,
    R: Iterator<Item = Boundary>,
    F: FnMut(bool, bool) -> bool,
{
    type Item = u64;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let lhead = self.left.peek().copied();
            let rhead = self.right.peek().copied();

            let head = match (lhead, rhead) {
                (None, None) => return None,
                (Some(l), None) => l.at,
                (None, Some(r)) => r.at,
                (Some(l), Some(r)) => l.at.min(r.at),
            };

            // an exhausted stream is outside of its set
            let in_left = lhead.is_some_and(|l| l.encloses(head));
            let in_right = rhead.is_some_and(|r| r.encloses(head));

            if lhead.is_some_and(|l| l.at == head) {
                self.left.next();
            }
            if rhead.is_some_and(|r| r.at == head) {
                self.right.next();
            }

            if (self.keep)(in_left, in_right) != self.inside {
                self.inside = !self.inside;
                return Some(head);
            }
        }
    }
}

/// Merge the intervals of two sets, keeping the positions
/// accepted by the `keep` predicate.
///
/// `keep(false, false)` must be `false`.
fn merge_with<F>(left: &ProcSet, right: &ProcSet, keep: F) -> Vec<ProcInt>
where
    F: FnMut(bool, bool) -> bool,
{
    let bounds = MergeBounds::new(flatten(&left.itvs), flatten(&right.itvs), keep);
    Unflatten::new(bounds).collect()
}

impl ProcSet {
    #[must_use]
    /// Combine two sets with the given operation, returning a new set.
    ///
    /// This is the single engine behind every binary operation:
    /// both sets are flattened into half-open boundaries,
    /// swept together, and the result boundaries are converted
    /// back into closed intervals.
    ///
    /// ```
    /// # use procset::{ProcSet, SetOp};
    /// let a: ProcSet = "0-5".parse().unwrap();
    /// let b: ProcSet = "2-3 8".parse().unwrap();
    /// assert_eq!(a.merge(&b, SetOp::Difference).to_string(), "0-1 4-5");
    /// assert_eq!(a.merge(&b, SetOp::SymmetricDifference).to_string(), "0-1 4-5 8");
    /// ```
    pub fn merge(&self, other: &Self, op: SetOp) -> Self {
        let itvs = merge_with(self, other, |l, r| op.keep(l, r));
        trace!(
            %op,
            left = self.count(),
            right = other.count(),
            result = itvs.len(),
            "merge processor sets"
        );
        Self::from_normalized(itvs)
    }

    fn merge_update(&mut self, other: &Self, op: SetOp) {
        *self = self.merge(other, op);
    }

    #[must_use]
    /// The processors in `self` or `other`.
    pub fn union(&self, other: &Self) -> Self {
        self.merge(other, SetOp::Union)
    }

    #[must_use]
    /// The processors both in `self` and `other`.
    pub fn intersection(&self, other: &Self) -> Self {
        self.merge(other, SetOp::Intersection)
    }

    #[must_use]
    /// The processors in `self` but not in `other`.
    pub fn difference(&self, other: &Self) -> Self {
        self.merge(other, SetOp::Difference)
    }

    #[must_use]
    /// The processors in exactly one of `self` and `other`.
    pub fn symmetric_difference(&self, other: &Self) -> Self {
        self.merge(other, SetOp::SymmetricDifference)
    }

    /// Add the processors of `other` to `self`.
    pub fn update(&mut self, other: &Self) {
        self.merge_update(other, SetOp::Union);
    }

    /// Keep only the processors also found in `other`.
    pub fn intersection_update(&mut self, other: &Self) {
        self.merge_update(other, SetOp::Intersection);
    }

    /// Remove the processors found in `other`.
    pub fn difference_update(&mut self, other: &Self) {
        self.merge_update(other, SetOp::Difference);
    }

    /// Keep the processors found in exactly one of `self` and `other`.
    pub fn symmetric_difference_update(&mut self, other: &Self) {
        self.merge_update(other, SetOp::SymmetricDifference);
    }

    #[must_use]
    /// Fold the operation over several sets, starting from `self`.
    ///
    /// Without any other set, this is a copy of `self`.
    pub fn merge_all<'a, I>(&self, others: I, op: SetOp) -> Self
    where
        I: IntoIterator<Item = &'a Self>,
    {
        others
            .into_iter()
            .fold(self.clone(), |acc, other| acc.merge(other, op))
    }

    #[must_use]
    /// The processors in `self` or in any of `others`.
    ///
    /// ```
    /// # use procset::ProcSet;
    /// let a: ProcSet = "0-1".parse().unwrap();
    /// let b: ProcSet = "5".parse().unwrap();
    /// let c: ProcSet = "2-3".parse().unwrap();
    /// assert_eq!(a.union_all([&b, &c]).to_string(), "0-3 5");
    /// ```
    pub fn union_all<'a, I>(&self, others: I) -> Self
    where
        I: IntoIterator<Item = &'a Self>,
    {
        self.merge_all(others, SetOp::Union)
    }

    #[must_use]
    /// The processors in `self` and in every one of `others`.
    pub fn intersection_all<'a, I>(&self, others: I) -> Self
    where
        I: IntoIterator<Item = &'a Self>,
    {
        self.merge_all(others, SetOp::Intersection)
    }

    #[must_use]
    /// The processors in `self` and in none of `others`.
    pub fn difference_all<'a, I>(&self, others: I) -> Self
    where
        I: IntoIterator<Item = &'a Self>,
    {
        self.merge_all(others, SetOp::Difference)
    }

    /// Add the processors of every one of `others` to `self`.
    pub fn update_all<'a, I>(&mut self, others: I)
    where
        I: IntoIterator<Item = &'a Self>,
    {
        for other in others {
            self.update(other);
        }
    }

    /// Keep only the processors found in every one of `others`.
    pub fn intersection_update_all<'a, I>(&mut self, others: I)
    where
        I: IntoIterator<Item = &'a Self>,
    {
        for other in others {
            self.intersection_update(other);
        }
    }

    /// Remove the processors found in any of `others`.
    pub fn difference_update_all<'a, I>(&mut self, others: I)
    where
        I: IntoIterator<Item = &'a Self>,
    {
        for other in others {
            self.difference_update(other);
        }
    }

    /// Whether `self` and `other` have no processor in common.
    pub fn is_disjoint(&self, other: &Self) -> bool {
        self.intersection(other).is_empty()
    }

    /// Whether every processor of `self` is in `other`.
    pub fn is_subset(&self, other: &Self) -> bool {
        self.difference(other).is_empty()
    }

    /// Whether every processor of `other` is in `self`.
    pub fn is_superset(&self, other: &Self) -> bool {
        other.is_subset(self)
    }
}

macro_rules! impl_set_op {
    ($op_trait:ident :: $op_fn:ident, $assign_trait:ident :: $assign_fn:ident => $set_op:expr) => {
        impl $op_trait<&ProcSet> for &ProcSet {
            type Output = ProcSet;

            fn $op_fn(self, rhs: &ProcSet) -> Self::Output {
                self.merge(rhs, $set_op)
            }
        }

        impl $op_trait<ProcSet> for ProcSet {
            type Output = ProcSet;

            fn $op_fn(self, rhs: ProcSet) -> Self::Output {
                self.merge(&rhs, $set_op)
            }
        }

        impl $op_trait<&ProcSet> for ProcSet {
            type Output = ProcSet;

            fn $op_fn(self, rhs: &ProcSet) -> Self::Output {
                self.merge(rhs, $set_op)
            }
        }

        impl $assign_trait<&ProcSet> for ProcSet {
            fn $assign_fn(&mut self, rhs: &ProcSet) {
                self.merge_update(rhs, $set_op);
            }
        }

        impl $assign_trait<ProcSet> for ProcSet {
            fn $assign_fn(&mut self, rhs: ProcSet) {
                self.merge_update(&rhs, $set_op);
            }
        }
    };
}

impl_set_op!(BitOr::bitor, BitOrAssign::bitor_assign => SetOp::Union);
impl_set_op!(BitAnd::bitand, BitAndAssign::bitand_assign => SetOp::Intersection);
impl_set_op!(Sub::sub, SubAssign::sub_assign => SetOp::Difference);
impl_set_op!(BitXor::bitxor, BitXorAssign::bitxor_assign => SetOp::SymmetricDifference);
