//! Reference material: a known solution to the puzzle, and a harness for
//! checking any decision procedure against every possible counterfeit.

use crate::coinset::{CoinMask, CoinSet, COINS, ZERO_BASED};
use crate::scale::{Oracle, Weight};
use crate::solution::{Failure, Solution};
use crate::weighing::Weighing;
use crate::Result;

/// Zero-based `[left, right]` pans of the reference solution
pub const REFERENCE: [[[usize; 4]; 2]; 3] = [
    [[2, 4, 0, 6], [5, 7, 1, 3]],
    [[5, 10, 7, 0], [8, 1, 6, 9]],
    [[2, 11, 7, 1], [5, 8, 10, 4]],
];

/// The weighings of a known valid solution, coins numbered from 0
pub fn reference_weighings() -> [Weighing; 3] {
    REFERENCE.map(|[left, right]| {
        Weighing::new(
            CoinSet::from_mask(mask(&left)),
            CoinSet::from_mask(mask(&right)),
        )
    })
}

fn mask(coins: &[usize]) -> CoinMask {
    coins.iter().fold(0, |mask, &coin| mask | (1 << coin))
}

/// A raw solution holding the [`reference_weighings`]
pub fn reference_solution() -> Solution {
    Solution::new(reference_weighings(), ZERO_BASED)
}

/// Check a decision procedure against an [`Oracle`] for every coin, both
/// light and heavy, answering the hypotheses it gets wrong.
///
/// `decide` is given a fresh oracle each time and should answer the coin
/// and weight it concludes; an error counts as a wrong answer.
pub fn test_all(
    zero_coin: usize,
    mut decide: impl FnMut(&mut Oracle) -> Result<(usize, Weight)>,
) -> Vec<Failure> {
    let mut failures = Vec::new();
    for coin in zero_coin..zero_coin + COINS {
        for weight in [Weight::Light, Weight::Heavy] {
            let mut oracle = Oracle::new(coin, weight, zero_coin);
            if decide(&mut oracle) != Ok((coin, weight)) {
                failures.push(Failure { coin, weight });
            }
        }
    }
    failures
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scale::Scale;

    #[test]
    fn the_reference_solution_decides_everything() {
        let reversed = reference_solution().reverse().unwrap();
        assert!(test_all(ZERO_BASED, |oracle| reversed.decide(oracle)).is_empty());
    }

    #[test]
    fn a_bad_procedure_fails_everywhere_but_once() {
        let failures = test_all(1, |oracle| {
            oracle.weigh(&[1], &[2])?;
            Ok((1, Weight::Heavy))
        });
        assert_eq!(failures.len(), 23);
        assert!(!failures.contains(&Failure {
            coin: 1,
            weight: Weight::Heavy
        }));
    }
}
