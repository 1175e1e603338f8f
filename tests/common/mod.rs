//! Helpers shared across the integration tests.

#![allow(dead_code)]

use twelvecoins::permutation::permutations;
use twelvecoins::{util, CoinSet, Failure, Solution, Weighing};

/// The reference solution with its rows taken in `order` and the pans of
/// canonical row `k` exchanged when bit `k` of `flips` is set
pub fn arrangement(order: &[usize], flips: u8) -> Solution {
    let reference = util::reference_weighings();
    let weighings: [Weighing; 3] =
        [0, 1, 2].map(|k| reference[order[k]].flipped_if(flips & (1 << k) != 0));
    Solution::new(weighings, util::reference_solution().zero_coin())
}

/// Every row order and pan orientation of the reference solution
pub fn arrangements() -> Vec<Solution> {
    let mut all = Vec::new();
    for order in permutations(&[0, 1, 2]) {
        for flips in 0..8 {
            all.push(arrangement(&order, flips));
        }
    }
    all
}

/// The hypotheses a reversed solution gets wrong
pub fn failures(solution: &Solution) -> Vec<Failure> {
    util::test_all(solution.zero_coin(), |oracle| solution.decide(oracle))
}

/// Assert that the unique, paired and triple coins of `solution` split the
/// 12 coins between them with no coin in two groups
pub fn assert_partition(solution: &Solution) {
    let grouped = solution.groupings().unwrap();
    let groups = grouped.groups().unwrap();
    assert_eq!(groups.unique.size(), 3);
    assert_eq!(groups.triples.size(), 3);
    assert!(groups.pairs.iter().all(|pair| pair.size() == 2));
    let sizes = groups.unique.size()
        + groups.triples.size()
        + groups.pairs.iter().map(CoinSet::size).sum::<u8>();
    assert_eq!(sizes, 12);
    assert_eq!(groups.all(), CoinSet::all());
}
