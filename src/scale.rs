//! The balance scale, and an oracle that knows the answer.

use std::fmt;
use std::str::FromStr;

use crate::coinset::COINS;
use crate::{Error, ScaleError};

/// The relative weight of a coin, or the outcome of a weighing read as the
/// weight of the left pan relative to the right.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Weight {
    Light = 0,
    Equal = 1,
    Heavy = 2,
}
impl Weight {
    pub fn invert(self) -> Self {
        match self {
            Self::Light => Self::Heavy,
            Self::Equal => Self::Equal,
            Self::Heavy => Self::Light,
        }
    }

    /// 0, 1 or 2
    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn from_value(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Light),
            1 => Some(Self::Equal),
            2 => Some(Self::Heavy),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Equal => "equal",
            Self::Heavy => "heavy",
        }
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Weight {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Self::Light),
            "equal" => Ok(Self::Equal),
            "heavy" => Ok(Self::Heavy),
            _ => Err(Error::Parse(format!("unknown weight '{s}'"))),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Weight {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Weight {
    /// Accepts either the name or the 0/1/2 encoding
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Value(u8),
            Name(String),
        }
        match Repr::deserialize(deserializer)? {
            Repr::Value(value) => {
                Self::from_value(value).ok_or_else(|| {
                    serde::de::Error::custom(format!("invalid weight {value}"))
                })
            },
            Repr::Name(name) => name.parse().map_err(serde::de::Error::custom),
        }
    }
}

/// A scale can weigh two collections of coins and answer whether the left
/// collection weighs less than, the same as, or more than the right.
///
/// A coin may appear at most once across both collections.
pub trait Scale {
    /// # Errors
    ///
    /// Implementations reject duplicate or out-of-range coins, and may limit
    /// how often they can be used.
    fn weigh(&mut self, left: &[usize], right: &[usize]) -> Result<Weight, ScaleError>;
}

impl<F: FnMut(&[usize], &[usize]) -> Result<Weight, ScaleError>> Scale for F {
    fn weigh(&mut self, left: &[usize], right: &[usize]) -> Result<Weight, ScaleError> {
        self(left, right)
    }
}

/// A scale that happens to know which coin is counterfeit.
///
/// Good for three weighings, after which it refuses to answer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Oracle {
    coin: usize,
    weight: Weight,
    zero_coin: usize,
    attempts: u8,
}
impl Oracle {
    pub const MAX_ATTEMPTS: u8 = 3;

    /// An oracle for the hypothesis that `coin` (numbered from `zero_coin`)
    /// is `weight` relative to the others
    pub fn new(coin: usize, weight: Weight, zero_coin: usize) -> Self {
        Self {
            coin,
            weight,
            zero_coin,
            attempts: 0,
        }
    }

    pub fn coin(&self) -> usize {
        self.coin
    }

    pub fn weight(&self) -> Weight {
        self.weight
    }

    pub fn attempts(&self) -> u8 {
        self.attempts
    }

    fn check(&self, left: &[usize], right: &[usize]) -> Result<(), ScaleError> {
        if self.attempts == Self::MAX_ATTEMPTS {
            return Err(ScaleError::Exhausted);
        }
        let mut seen = [false; COINS];
        for &coin in left.iter().chain(right) {
            let offset = coin
                .checked_sub(self.zero_coin)
                .filter(|&offset| offset < COINS)
                .ok_or(ScaleError::InvalidCoin(coin))?;
            if seen[offset] {
                return Err(ScaleError::DuplicateCoin(coin));
            }
            seen[offset] = true;
        }
        Ok(())
    }
}

impl Scale for Oracle {
    fn weigh(&mut self, left: &[usize], right: &[usize]) -> Result<Weight, ScaleError> {
        self.check(left, right)?;
        self.attempts += 1;
        if left.contains(&self.coin) {
            Ok(self.weight)
        } else if right.contains(&self.coin) {
            Ok(self.weight.invert())
        } else {
            Ok(Weight::Equal)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_invert() {
        assert_eq!(Weight::Light.invert(), Weight::Heavy);
        assert_eq!(Weight::Equal.invert(), Weight::Equal);
        assert_eq!(Weight::Heavy.invert(), Weight::Light);
        assert!(Weight::Light < Weight::Equal && Weight::Equal < Weight::Heavy);
    }

    #[test]
    fn weights_parse() {
        for weight in [Weight::Light, Weight::Equal, Weight::Heavy] {
            assert_eq!(weight.to_string().parse::<Weight>(), Ok(weight));
            assert_eq!(Weight::from_value(weight.value()), Some(weight));
        }
        assert!("medium".parse::<Weight>().is_err());
        assert_eq!(Weight::from_value(3), None);
    }

    #[test]
    fn oracle_answers_from_the_hidden_coin() {
        let mut oracle = Oracle::new(3, Weight::Heavy, 1);
        assert_eq!(oracle.weigh(&[3, 4], &[5, 6]), Ok(Weight::Heavy));
        assert_eq!(oracle.weigh(&[5, 6], &[3, 4]), Ok(Weight::Light));
        assert_eq!(oracle.weigh(&[1], &[2]), Ok(Weight::Equal));
        assert_eq!(oracle.attempts(), 3);
        assert_eq!(oracle.weigh(&[1], &[2]), Err(ScaleError::Exhausted));
    }

    #[test]
    fn oracle_rejects_bad_coins() {
        let mut oracle = Oracle::new(0, Weight::Light, 0);
        assert_eq!(
            oracle.weigh(&[0, 1], &[1, 2]),
            Err(ScaleError::DuplicateCoin(1))
        );
        assert_eq!(oracle.weigh(&[0], &[12]), Err(ScaleError::InvalidCoin(12)));
        assert_eq!(
            Oracle::new(1, Weight::Light, 1).weigh(&[0], &[2]),
            Err(ScaleError::InvalidCoin(0))
        );
        // rejected weighings do not count
        assert_eq!(oracle.attempts(), 0);
    }

    #[test]
    fn closures_are_scales() {
        let mut calls = 0;
        let mut scale = |left: &[usize], right: &[usize]| {
            calls += 1;
            Ok(if left.len() > right.len() { Weight::Heavy } else { Weight::Equal })
        };
        assert_eq!(scale.weigh(&[1, 2], &[3]), Ok(Weight::Heavy));
        assert_eq!(calls, 1);
    }
}
