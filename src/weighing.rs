use std::fmt;

use crate::coinset::CoinSet;
use crate::Result;

/// One side of a single weighing
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Pan {
    Left,
    Right,
}
impl Pan {
    pub fn other(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// `Right` if `flipped`, else `Left`
    pub fn chosen(flipped: bool) -> Self {
        if flipped {
            Self::Right
        } else {
            Self::Left
        }
    }
}

/// The coins placed on each pan for one use of the scale.
///
/// `both` is always `left ∪ right`. A well-formed weighing has disjoint pans,
/// but that is only checked when the weighing is analysed or run, so that
/// malformed plans can still be represented and reported on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Weighing {
    left: CoinSet,
    right: CoinSet,
    both: CoinSet,
}
impl Weighing {
    pub fn new(left: CoinSet, right: CoinSet) -> Self {
        Self {
            both: left.union(&right),
            left,
            right,
        }
    }

    /// # Errors
    ///
    /// [`Error::InvalidCoin`](crate::Error::InvalidCoin) if either pan holds
    /// a coin outside `zero_coin..zero_coin + 12`
    pub fn from_coins(left: &[usize], right: &[usize], zero_coin: usize) -> Result<Self> {
        Ok(Self::new(
            CoinSet::from_coins(left.iter().copied(), zero_coin)?,
            CoinSet::from_coins(right.iter().copied(), zero_coin)?,
        ))
    }

    pub fn left(&self) -> &CoinSet {
        &self.left
    }

    pub fn right(&self) -> &CoinSet {
        &self.right
    }

    pub fn both(&self) -> &CoinSet {
        &self.both
    }

    pub fn pan(&self, pan: Pan) -> &CoinSet {
        match pan {
            Pan::Left => &self.left,
            Pan::Right => &self.right,
        }
    }

    /// Coins that appear on both pans
    pub fn overlap(&self) -> CoinSet {
        self.left.intersection(&self.right)
    }

    /// The same weighing with the pans exchanged
    pub fn flipped(&self) -> Self {
        Self {
            left: self.right.clone(),
            right: self.left.clone(),
            both: self.both.clone(),
        }
    }

    pub fn flipped_if(&self, flip: bool) -> Self {
        if flip {
            self.flipped()
        } else {
            self.clone()
        }
    }

    /// Both pans in ascending coin order
    pub fn sort(&self) -> Self {
        Self::new(self.left.sort(), self.right.sort())
    }
}

impl fmt::Display for Weighing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} v {}", self.left, self.right)
    }
}
