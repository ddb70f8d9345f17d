use std::iter::FusedIterator;
use std::ops::Range;

use itertools::{Combinations, Itertools, Permutations};

use crate::region::RegionValues;

/// The order in which [`Candidates`] visits value triples.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum CandidateOrder {
    /// Triples in increasing lexicographic order.
    Lexicographic,
    /// Triples by increasing sum, lexicographic among equal sums.
    AscendingSum,
}

#[derive(Clone)]
enum Triples {
    Lexicographic(Combinations<Range<u32>>),
    // next `a < b` to try for `sum`, the third value being `sum - a - b`
    AscendingSum { sum: u32, a: u32, b: u32 },
}

/// Every assignment of three distinct positive integers with sum below `bound` onto the regions.
///
/// Each triple is visited in [`CandidateOrder`], and each triple's permutations in lexicographic index order,
/// so `{1, 2, 3}` yields `1,2,3`, `1,3,2`, `2,1,3`, `2,3,1`, `3,1,2` and `3,2,1`.
/// Nothing is materialised up front; [`Clone`] an instance to restart it.
#[derive(Clone)]
pub struct Candidates {
    bound: u32,
    order: CandidateOrder,
    triples: Triples,
    orderings: Option<Permutations<std::array::IntoIter<u32, 3>>>,
}

// smallest possible sum of three distinct positive integers
const MIN_SUM: u32 = 1 + 2 + 3;

impl Candidates {
    /// All assignments summing below `bound`, in `order`.
    pub fn new(bound: u32, order: CandidateOrder) -> Self {
        let triples = match order {
            CandidateOrder::Lexicographic => Triples::Lexicographic((1..bound.max(1)).combinations(3)),
            CandidateOrder::AscendingSum => Triples::AscendingSum { sum: MIN_SUM, a: 1, b: 2 },
        };

        Self { bound, order, triples, orderings: None }
    }

    /// Every assignment sums to less than this.
    pub fn bound(&self) -> u32 {
        self.bound
    }

    /// The order triples are visited in.
    pub fn order(&self) -> CandidateOrder {
        self.order
    }

    fn next_triple(&mut self) -> Option<[u32; 3]> {
        let bound = self.bound;
        match &mut self.triples {
            Triples::Lexicographic(combinations) => combinations
                .find(|triple| triple.iter().sum::<u32>() < bound)
                .map(|triple| [triple[0], triple[1], triple[2]]),
            Triples::AscendingSum { sum, a, b } => loop {
                if *sum >= bound {
                    return None;
                }
                if *sum > *a + 2 * *b {
                    let triple = [*a, *b, *sum - *a - *b];
                    *b += 1;
                    return Some(triple);
                }

                if *b == *a + 1 {
                    // no `b` fits this `a`, so none fits a larger one
                    *sum += 1;
                    *a = 1;
                    *b = 2;
                } else {
                    *a += 1;
                    *b = *a + 1;
                }
            },
        }
    }
}

impl Iterator for Candidates {
    type Item = RegionValues;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(ordering) = self.orderings.as_mut().and_then(Iterator::next) {
                return Some(RegionValues::trusted([ordering[0], ordering[1], ordering[2]]));
            }

            let triple = self.next_triple()?;
            self.orderings = Some(triple.into_iter().permutations(3));
        }
    }
}

impl FusedIterator for Candidates {}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn arrays(candidates: Candidates) -> Vec<[u32; 3]> {
        candidates.map(|values| values.as_array()).collect()
    }

    #[test]
    fn smallest_bound_with_candidates() {
        assert_eq!(arrays(Candidates::new(7, CandidateOrder::Lexicographic)), vec![
            [1, 2, 3], [1, 3, 2], [2, 1, 3], [2, 3, 1], [3, 1, 2], [3, 2, 1],
        ]);
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(6)]
    fn too_small_bounds(#[case] bound: u32) {
        assert_eq!(Candidates::new(bound, CandidateOrder::Lexicographic).count(), 0);
        assert_eq!(Candidates::new(bound, CandidateOrder::AscendingSum).count(), 0);
    }

    #[test]
    fn lexicographic_triples() {
        let triples = arrays(Candidates::new(9, CandidateOrder::Lexicographic))
            .into_iter()
            .step_by(6)
            .collect::<Vec<_>>();
        assert_eq!(triples, vec![[1, 2, 3], [1, 2, 4], [1, 2, 5], [1, 3, 4]]);
    }

    #[test]
    fn ascending_sum_triples() {
        let triples = arrays(Candidates::new(10, CandidateOrder::AscendingSum))
            .into_iter()
            .step_by(6)
            .collect::<Vec<_>>();
        assert_eq!(triples, vec![[1, 2, 3], [1, 2, 4], [1, 2, 5], [1, 3, 4], [1, 2, 6], [1, 3, 5], [2, 3, 4]]);
    }

    #[test]
    fn ascending_sum_is_a_stable_sort_by_sum() {
        let mut sorted = arrays(Candidates::new(40, CandidateOrder::Lexicographic));
        sorted.sort_by_key(|values| values.iter().sum::<u32>());

        assert_eq!(arrays(Candidates::new(40, CandidateOrder::AscendingSum)), sorted);
    }

    #[test]
    fn ascending_sum_is_lazy() {
        let first = Candidates::new(u32::MAX, CandidateOrder::AscendingSum).take(6 * 4).collect_vec();
        assert_eq!(first.last().map(RegionValues::as_array), Some([4, 3, 1]));
    }

    #[rstest]
    #[case(CandidateOrder::Lexicographic)]
    #[case(CandidateOrder::AscendingSum)]
    fn both_orders_cover_the_same_assignments(#[case] order: CandidateOrder) {
        let all = arrays(Candidates::new(50, order));
        // 3-subsets of 1..=49 with sum below 50, six orderings each
        assert_eq!(all.len(), 2788 * 6);
        assert!(all.iter().all(|values| values.iter().sum::<u32>() < 50));
        assert_eq!(all.iter().unique().count(), all.len());
    }

    #[test]
    fn restart_by_clone() {
        let mut candidates = Candidates::new(20, CandidateOrder::AscendingSum);
        candidates.nth(10);
        let restarted = candidates.clone();
        assert!(candidates.eq(restarted));
    }
}
