//! Reverse engineering of decision tables, and deciding with them.

mod common;

use pretty_assertions::assert_eq;
use twelvecoins::coinset::{ONE_BASED, ZERO_BASED};
use twelvecoins::{util, Error, Oracle, ScaleError, Solution, Stage, Weight};

#[test]
fn test_reference_solution_has_no_failures() {
    let reversed = util::reference_solution().reverse().unwrap();
    assert!(reversed.failures().is_empty());
    assert_eq!(
        reversed.decide(&mut Oracle::new(0, Weight::Light, ZERO_BASED)),
        Ok((0, Weight::Light))
    );
    assert!(common::failures(&reversed).is_empty());
}

#[test]
fn test_every_arrangement_decides_every_counterfeit() {
    for solution in common::arrangements() {
        let reversed = solution.reverse().unwrap();
        assert_eq!(reversed.coins().len(), 12);
        assert_eq!(common::failures(&reversed), vec![], "{:?}", solution.weighings());
    }
}

#[test]
fn test_one_based_coins() {
    let solution = Solution::from_coins(
        [
            [&[3, 5, 1, 7], &[6, 8, 2, 4]],
            [&[6, 11, 8, 1], &[9, 2, 7, 10]],
            [&[3, 12, 8, 2], &[6, 9, 11, 5]],
        ],
        ONE_BASED,
    )
    .unwrap();
    let reversed = solution.reverse().unwrap();
    assert_eq!(reversed.coins(), &[12, 11, 10, 9, 8, 7, 6, 5, 4, 3, 2, 1]);
    assert!(common::failures(&reversed).is_empty());
    assert_eq!(
        reversed.decide(&mut Oracle::new(12, Weight::Heavy, ONE_BASED)),
        Ok((12, Weight::Heavy))
    );
}

#[test]
fn test_decide_uses_the_scale_three_times() {
    let reversed = util::reference_solution().reverse().unwrap();
    let mut oracle = Oracle::new(7, Weight::Heavy, ZERO_BASED);
    reversed.decide(&mut oracle).unwrap();
    assert_eq!(oracle.attempts(), Oracle::MAX_ATTEMPTS);
    assert_eq!(
        reversed.decide(&mut oracle),
        Err(Error::Scale(ScaleError::Exhausted))
    );
}

#[test]
fn test_coin_on_both_pans_is_a_scale_violation() {
    let solution = Solution::from_coins(
        [
            [&[2, 4, 0, 6], &[5, 7, 1, 3]],
            [&[5, 10, 7, 0], &[8, 1, 6, 0]],
            [&[2, 11, 7, 1], &[5, 8, 10, 4]],
        ],
        ZERO_BASED,
    )
    .unwrap();
    let violation = Err(Error::Scale(ScaleError::DuplicateCoin(0)));
    assert_eq!(solution.groupings(), violation);
    assert_eq!(solution.reverse(), violation);
    assert!(!solution.is_valid());
    assert!(solution.verify().stage().contains(Stage::INVALID));
}

#[test]
fn test_same_outcome_twice_is_ambiguous() {
    // coins 0 and 1 are always weighed together
    let solution = Solution::from_coins(
        [
            [&[0, 1, 2, 3], &[4, 5, 6, 7]],
            [&[0, 1, 4, 8], &[2, 5, 9, 10]],
            [&[0, 1, 5, 9], &[3, 6, 8, 11]],
        ],
        ZERO_BASED,
    )
    .unwrap();
    let verified = solution.verify();
    assert!(verified.stage().contains(Stage::INVALID));
    let failures = verified.failures();
    for coin in [0, 1] {
        for weight in [Weight::Light, Weight::Heavy] {
            assert!(
                failures.contains(&twelvecoins::Failure { coin, weight }),
                "{coin} {weight}"
            );
        }
    }
    assert!(matches!(solution.reverse(), Err(Error::Ambiguous(_))));
}
