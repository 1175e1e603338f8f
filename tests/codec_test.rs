//! Numbering of solutions: every number names a valid solution, and every
//! arrangement of a solution has its own number.

mod common;

use std::collections::HashSet;

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use twelvecoins::coinset::{ONE_BASED, ZERO_BASED};
use twelvecoins::solution::{split, Pattern, FLIP_CODES, MAX_NUMBER, RADIX, STRUCTURE_CODES};
use twelvecoins::{util, Error, Solution};

const ROLE_NUMBERS: [u64; 5] = [0, 1, 123_456_789, 473_153_816, 479_001_599];

fn round_trip(number: u64, zero_coin: usize) {
    let decoded = Solution::decode_with(number, zero_coin).unwrap();
    assert_eq!(decoded.number(), Some(number));
    assert!(Pattern::ALL.contains(&decoded.canon().unwrap().pattern));

    common::assert_partition(&decoded);

    let restored = decoded.restore().unwrap();
    common::assert_partition(&restored);
    let reversed = restored.reverse().unwrap();
    assert!(common::failures(&reversed).is_empty(), "{number}");
    assert_eq!(restored.encode(), Ok(number));

    let recanonical = restored.canonical().unwrap();
    assert_eq!(recanonical.canon(), decoded.canon());
    assert_eq!(recanonical.slots(), decoded.slots());
    assert_eq!(recanonical.weighings(), decoded.weighings());
}

#[test]
fn test_every_structure_and_flip_code() {
    for roles in ROLE_NUMBERS {
        for flips in 0..FLIP_CODES {
            for structure in 0..STRUCTURE_CODES {
                round_trip(roles * RADIX + STRUCTURE_CODES * flips + structure, ZERO_BASED);
            }
        }
    }
}

#[test]
fn test_one_based_numbers() {
    for structure in 0..STRUCTURE_CODES {
        round_trip(473_153_816 * RADIX + structure, ONE_BASED);
    }
}

#[test]
fn test_arrangements_number_apart() {
    let mut numbers = HashSet::new();
    for solution in common::arrangements() {
        let number = solution.encode().unwrap();
        let (roles, _, _) = split(number);
        assert_eq!(roles, 473_153_816);

        let restored = Solution::decode_with(number, ZERO_BASED)
            .unwrap()
            .restore()
            .unwrap();
        assert_eq!(restored.weighings(), solution.weighings());
        numbers.insert(number);
    }
    assert_eq!(numbers.len(), 48);
}

#[test]
fn test_reference_number() {
    let number = util::reference_solution().encode().unwrap();
    assert_eq!(number, 143_838_760_127);
    assert_eq!(split(number), (473_153_816, 1, 25));
}

#[test]
fn test_numbers_out_of_range() {
    assert_eq!(
        Solution::decode(MAX_NUMBER).map(|_| ()),
        Err(Error::OutOfRange(MAX_NUMBER))
    );
    assert!(Solution::decode(MAX_NUMBER - 1).is_ok());
}

proptest! {
    #[test]
    fn test_decoded_numbers_encode_back(number in 0..MAX_NUMBER) {
        let restored = Solution::decode(number).unwrap().restore().unwrap();
        common::assert_partition(&restored);
        prop_assert!(restored.is_valid());
        prop_assert_eq!(restored.encode(), Ok(number));
    }
}
