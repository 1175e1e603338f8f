//! Lehmer coding: the bijection between the permutations of n items and the
//! integers in `0..n!`.
//!
//! Permutations are numbered in lexicographic order, so `[0, 1, 2]` is 0 and
//! `[2, 1, 0]` is 5.

use itertools::Itertools;

use crate::error::illegal;
use crate::internal_util::factorial;
use crate::{Error, Result};

/// Number a permutation of `0..n`.
///
/// Each element contributes the count of smaller elements still to come,
/// weighted by the factorial of the length of the tail.
///
/// # Errors
///
/// [`Error::StructuralInvariant`] if `perm` is not a permutation of `0..n`
pub fn number(perm: &[usize]) -> Result<u64> {
    let n = perm.len();
    // value -> how many smaller values have already been consumed
    let mut consumed_below = vec![0; n];
    let mut seen = vec![false; n];
    let mut code = 0;
    for (i, &head) in perm.iter().enumerate() {
        if head >= n || seen[head] {
            return Err(illegal(format!("not a permutation: {perm:?}")));
        }
        seen[head] = true;
        let digit = head - consumed_below[head];
        code = code * (n - i) as u64 + digit as u64;
        for count in &mut consumed_below[head + 1..] {
            *count += 1;
        }
    }
    Ok(code)
}

/// The permutation of `template` numbered `code`; the inverse of [`number`]
/// when `template` is `0..n`.
///
/// # Errors
///
/// [`Error::OutOfRange`] if `code >= n!`
pub fn decode<T: Clone>(mut code: u64, template: &[T]) -> Result<Vec<T>> {
    let mut pool = template.to_vec();
    let mut radix = factorial(pool.len());
    if code >= radix {
        return Err(Error::OutOfRange(code));
    }
    let mut result = Vec::with_capacity(pool.len());
    while !pool.is_empty() {
        radix /= pool.len() as u64;
        let index = (code / radix) as usize;
        code %= radix;
        result.push(pool.remove(index));
    }
    Ok(result)
}

/// All orderings of `items`, in lexicographic order of position
pub fn permutations<T: Clone>(items: &[T]) -> Vec<Vec<T>> {
    items.iter().cloned().permutations(items.len()).collect()
}

/// A sequence of distinct coins, indexed both ways: by position, and by coin.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Permutation {
    sequence: Vec<usize>,
    /// coin - zero -> position
    index: Vec<usize>,
    zero: usize,
}
impl Permutation {
    /// # Errors
    ///
    /// [`Error::StructuralInvariant`] unless `sequence` holds each of
    /// `zero..zero + sequence.len()` exactly once
    pub fn new(sequence: &[usize], zero: usize) -> Result<Self> {
        let n = sequence.len();
        let mut index = vec![usize::MAX; n];
        for (position, &element) in sequence.iter().enumerate() {
            match element.checked_sub(zero) {
                Some(offset) if offset < n && index[offset] == usize::MAX => {
                    index[offset] = position;
                },
                _ => {
                    return Err(illegal(format!(
                        "not a permutation of {zero}..{}: {sequence:?}",
                        zero + n
                    )));
                },
            }
        }
        Ok(Self {
            sequence: sequence.to_vec(),
            index,
            zero,
        })
    }

    /// The position of `element` in the sequence
    pub fn index_of(&self, element: usize) -> Option<usize> {
        element
            .checked_sub(self.zero)
            .and_then(|offset| self.index.get(offset))
            .copied()
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.sequence
    }

    /// The Lehmer code of the sequence
    pub fn number(&self) -> u64 {
        // `new` has already proven this is a permutation of 0..n once shifted
        let shifted = self.sequence.iter().map(|e| e - self.zero).collect_vec();
        number(&shifted).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn numbers_all_permutations_of_three() {
        let expected = [
            ([0, 1, 2], 0),
            ([0, 2, 1], 1),
            ([1, 0, 2], 2),
            ([1, 2, 0], 3),
            ([2, 0, 1], 4),
            ([2, 1, 0], 5),
        ];
        for (perm, code) in expected {
            assert_eq!(number(&perm), Ok(code), "{perm:?}");
            assert_eq!(decode(code, &[0, 1, 2]), Ok(perm.to_vec()));
        }
    }

    #[test]
    fn permutations_are_in_code_order() {
        for (code, perm) in permutations(&[0, 1, 2, 3]).iter().enumerate() {
            assert_eq!(number(perm), Ok(code as u64));
        }
    }

    #[test]
    fn twelve_coins() {
        let identity = (0..12).collect_vec();
        let reversed = identity.iter().rev().copied().collect_vec();
        assert_eq!(number(&identity), Ok(0));
        assert_eq!(number(&reversed), Ok(factorial(12) - 1));
        assert_eq!(decode(factorial(12) - 1, &identity), Ok(reversed));
        assert_eq!(
            decode(factorial(12), &identity),
            Err(Error::OutOfRange(factorial(12)))
        );
    }

    #[test]
    fn decode_uses_the_template() {
        assert_eq!(decode(5, &['a', 'b', 'c']), Ok(vec!['c', 'b', 'a']));
    }

    #[test]
    fn rejects_non_permutations() {
        assert!(number(&[0, 0, 1]).is_err());
        assert!(number(&[0, 3, 1]).is_err());
        assert!(Permutation::new(&[1, 2, 2], 1).is_err());
        assert!(Permutation::new(&[0, 1, 2], 1).is_err());
    }

    #[test]
    fn index_of() {
        let p = Permutation::new(&[3, 1, 2], 1).unwrap();
        assert_eq!(p.index_of(3), Some(0));
        assert_eq!(p.index_of(1), Some(1));
        assert_eq!(p.index_of(2), Some(2));
        assert_eq!(p.index_of(0), None);
        assert_eq!(p.index_of(4), None);
        assert_eq!(p.number(), 4);
    }

    proptest! {
        #[test]
        fn twelve_coin_codes_round_trip(code in 0..factorial(12)) {
            let identity = (0..12).collect_vec();
            let perm = decode(code, &identity).unwrap();
            prop_assert_eq!(number(&perm), Ok(code));
        }
    }
}
