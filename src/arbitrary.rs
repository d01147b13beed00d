use proptest::prelude::*;

use crate::{Proc, ProcInt, ProcSet};

#[derive(Debug, Clone, Copy)]
/// The interval arbitrary processors are drawn from.
///
/// Small universes make overlapping and touching intervals likely.
pub struct Universe(pub ProcInt);

impl Default for Universe {
    fn default() -> Self {
        Self(ProcInt::new_unchecked(0, Proc::MAX))
    }
}

impl From<ProcInt> for Universe {
    fn from(itv: ProcInt) -> Self {
        Self(itv)
    }
}

impl Universe {
    /// Creates a strategy that generates processors from this universe.
    pub fn procs(self) -> BoxedStrategy<Proc> {
        self.0.range().boxed()
    }
}

impl Arbitrary for ProcInt {
    type Parameters = Universe;
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(universe: Self::Parameters) -> Self::Strategy {
        (universe.procs(), universe.procs())
            .prop_map(|(a, b)| Self::new_unchecked(a.min(b), a.max(b)))
            .boxed()
    }
}

impl Arbitrary for ProcSet {
    type Parameters = Universe;
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(universe: Self::Parameters) -> Self::Strategy {
        prop::collection::vec(any_with::<ProcInt>(universe), 0..8)
            .prop_map(|itvs| itvs.into_iter().collect())
            .boxed()
    }
}

#[cfg(test)]
mod prop_test {
    extern crate alloc;
    use alloc::{collections::BTreeSet, string::ToString as _, vec::Vec};

    use super::*;

    const LIMIT: Proc = 63;

    fn small() -> Universe {
        ProcInt::new_unchecked(0, LIMIT).into()
    }

    fn sets() -> BoxedStrategy<ProcSet> {
        ProcSet::arbitrary_with(small())
    }

    fn reference(set: &ProcSet) -> BTreeSet<Proc> {
        set.iter().collect()
    }

    fn is_normalized(set: &ProcSet) -> bool {
        set.intervals()
            .zip(set.intervals().skip(1))
            .all(|(a, b)| u64::from(a.sup()) + 1 < u64::from(b.inf()))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(2000))]

        #[test]
        fn insertions_are_normalized(procs in prop::collection::vec(0..=LIMIT, 0..64)) {
            let mut set = ProcSet::new();
            for &x in &procs {
                let before = set.count();
                set.insert(x).unwrap();
                prop_assert!(set.count() <= before + 1);
            }

            let expected: BTreeSet<Proc> = procs.iter().copied().collect();
            let runs = expected
                .iter()
                .filter(|&&x| x == 0 || !expected.contains(&(x - 1)))
                .count();

            prop_assert!(is_normalized(&set));
            prop_assert_eq!(set.len(), expected.len() as u64);
            prop_assert_eq!(set.count(), runs);
            prop_assert_eq!(reference(&set), expected);
        }

        #[test]
        fn adjacent_insertion_never_adds_interval(set in sets()) {
            if let Ok(max) = set.max() {
                if max < LIMIT {
                    let mut grown = set.clone();
                    grown.insert(max + 1).unwrap();
                    prop_assert_eq!(grown.count(), set.count());
                    prop_assert_eq!(grown.len(), set.len() + 1);
                }
            }
        }

        #[test]
        fn operations_match_reference(a in sets(), b in sets()) {
            let (ra, rb) = (reference(&a), reference(&b));

            prop_assert_eq!(reference(&(&a | &b)), &ra | &rb);
            prop_assert_eq!(reference(&(&a & &b)), &ra & &rb);
            prop_assert_eq!(reference(&(&a - &b)), &ra - &rb);
            prop_assert_eq!(reference(&(&a ^ &b)), &ra ^ &rb);

            for result in [&a | &b, &a & &b, &a - &b, &a ^ &b] {
                prop_assert!(is_normalized(&result));
            }
        }

        #[test]
        fn union_and_intersection_commute(a in sets(), b in sets()) {
            prop_assert_eq!(&a | &b, &b | &a);
            prop_assert_eq!(&a & &b, &b & &a);
        }

        #[test]
        fn union_and_intersection_associate(a in sets(), b in sets(), c in sets()) {
            prop_assert_eq!(&(&a | &b) | &c, &a | &(&b | &c));
            prop_assert_eq!(&(&a & &b) & &c, &a & &(&b & &c));
        }

        #[test]
        fn absorption(a in sets(), b in sets()) {
            prop_assert_eq!(&a | &(&a & &b), a.clone());
            prop_assert_eq!(&a & &(&a | &b), a);
        }

        #[test]
        fn difference_ignores_outer_part(a in sets(), b in sets()) {
            prop_assert_eq!(&a - &b, &a - &(&a & &b));
        }

        #[test]
        fn symmetric_difference_is_union_of_differences(a in sets(), b in sets()) {
            prop_assert_eq!(&a ^ &b, &(&a - &b) | &(&b - &a));
        }

        #[test]
        fn in_place_matches_pure(a in sets(), b in sets()) {
            let mut c = a.clone();
            c |= &b;
            prop_assert_eq!(c, &a | &b);
            let mut c = a.clone();
            c &= &b;
            prop_assert_eq!(c, &a & &b);
            let mut c = a.clone();
            c -= &b;
            prop_assert_eq!(c, &a - &b);
            let mut c = a.clone();
            c ^= &b;
            prop_assert_eq!(c, &a ^ &b);
        }

        #[test]
        fn disjoint_cardinality_is_additive(a in sets(), b in sets()) {
            let b = &b - &a;
            prop_assert!(a.is_disjoint(&b));
            prop_assert_eq!((&a | &b).len(), a.len() + b.len());
        }

        #[test]
        fn subset_agrees_with_reference(a in sets(), b in sets()) {
            let (ra, rb) = (reference(&a), reference(&b));
            prop_assert_eq!(a.is_subset(&b), ra.is_subset(&rb));
            prop_assert_eq!(a.is_superset(&b), ra.is_superset(&rb));
            prop_assert_eq!(a.is_disjoint(&b), ra.is_disjoint(&rb));
            prop_assert!((&a & &b).is_subset(&a));
        }

        #[test]
        fn containment_matches_iteration(set in sets(), x in 0..=LIMIT + 2) {
            prop_assert_eq!(set.contains(x), set.iter().any(|p| p == x));
        }

        #[test]
        fn descending_is_reversed_ascending(set in sets()) {
            let mut asc: Vec<Proc> = set.iter().collect();
            let desc: Vec<Proc> = set.iter_desc().collect();
            asc.reverse();
            prop_assert_eq!(asc, desc);
        }

        #[test]
        fn nth_matches_iteration(set in sets()) {
            for (i, x) in set.iter().enumerate() {
                prop_assert_eq!(set.nth(i as u64), Some(x));
            }
            prop_assert_eq!(set.nth(set.len()), None);
        }

        #[test]
        fn text_round_trip(set in sets()) {
            let text = set.to_string();
            let parsed: ProcSet = text.parse().unwrap();
            prop_assert_eq!(parsed.to_string(), text);
            prop_assert_eq!(parsed, set);
        }

        #[test]
        fn aggregate_is_hull(set in sets()) {
            let hull = set.aggregate();
            prop_assert!(hull.is_contiguous());
            prop_assert!(set.is_subset(&hull));
            prop_assert_eq!(hull.min().ok(), set.min().ok());
            prop_assert_eq!(hull.max().ok(), set.max().ok());
        }

        #[test]
        fn pop_drains_in_order(set in sets()) {
            let mut drained = set.clone();
            let popped: Vec<Proc> = core::iter::from_fn(|| drained.pop()).collect();
            prop_assert!(drained.is_empty());
            prop_assert_eq!(popped, set.iter().collect::<Vec<_>>());
        }

        #[test]
        fn remove_is_all_or_nothing(set in sets(), itv in ProcInt::arbitrary_with(small())) {
            let mut changed = set.clone();
            let removed = ProcSet::from(itv);
            match changed.remove(itv) {
                Ok(()) => {
                    prop_assert!(removed.is_subset(&set));
                    prop_assert_eq!(changed, &set - &removed);
                }
                Err(_) => {
                    prop_assert!(!removed.is_subset(&set));
                    prop_assert_eq!(changed, set);
                }
            }
        }
    }
}
