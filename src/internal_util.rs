/// n!
///
/// Only ever called with n <= 20, beyond which the result no longer fits
pub(crate) fn factorial(n: usize) -> u64 {
    (2..=n as u64).product()
}

/// 12!, the number of ways to assign the 12 coins to their roles
pub(crate) const FACTORIAL_12: u64 = 479_001_600;

/// The row ordering that starts at `first` and wraps around
pub(crate) fn rotation(first: usize) -> [usize; 3] {
    [first % 3, (first + 1) % 3, (first + 2) % 3]
}

/// Pack per-row booleans into a bitmask, row 0 in the low bit
pub(crate) fn to_mask(bits: [bool; 3]) -> u64 {
    bits.iter()
        .enumerate()
        .filter(|&(_, &bit)| bit)
        .map(|(row, _)| 1 << row)
        .sum()
}

pub(crate) fn from_mask(mask: u64) -> [bool; 3] {
    [mask & 1 != 0, mask & 2 != 0, mask & 4 != 0]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factorial_of_twelve() {
        assert_eq!(factorial(0), 1);
        assert_eq!(factorial(3), 6);
        assert_eq!(factorial(12), FACTORIAL_12);
    }

    #[test]
    fn rotations_wrap() {
        assert_eq!(rotation(0), [0, 1, 2]);
        assert_eq!(rotation(1), [1, 2, 0]);
        assert_eq!(rotation(5), [2, 0, 1]);
    }

    #[test]
    fn masks() {
        for mask in 0..8 {
            assert_eq!(to_mask(from_mask(mask)), mask);
        }
        assert_eq!(to_mask([true, false, true]), 5);
    }
}
