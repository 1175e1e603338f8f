//! Immutable bitsets over the 12 coins.
//!
//! Bit i of a [`CoinSet`]'s mask is set if the coin numbered `zero_coin + i`
//! is in the set. Every operation answers a new set; nothing is mutated in
//! place.

use std::fmt;
use std::hash::{Hash, Hasher};

use itertools::Itertools;

use crate::{Error, Result};

pub type CoinMask = u16;

/// Number of coins in the puzzle
pub const COINS: usize = 12;
pub const ZERO_BASED: usize = 0;
pub const ONE_BASED: usize = 1;

const FULL_MASK: CoinMask = (1 << COINS) - 1;

/// A set of coins.
///
/// An *ordered* set additionally remembers the sequence its coins were
/// supplied in, which matters only where position carries information (the
/// role permutation of a canonical solution). Equality and hashing only ever
/// consider membership.
#[derive(Clone, Debug, Default)]
pub struct CoinSet {
    mask: CoinMask,
    size: u8,
    order: Option<Sequence>,
}

/// Insertion order of an ordered set, numbered relative to `zero_coin`
#[derive(Clone, Debug, PartialEq, Eq)]
struct Sequence {
    coins: Vec<usize>,
    zero_coin: usize,
}

fn bit(coin: usize, zero_coin: usize) -> Result<CoinMask> {
    match coin.checked_sub(zero_coin) {
        Some(offset) if offset < COINS => Ok(1 << offset),
        _ => Err(Error::InvalidCoin { coin, zero_coin }),
    }
}

impl CoinSet {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Every coin
    pub fn all() -> Self {
        Self::from_mask(FULL_MASK)
    }

    /// Build an unordered set from coins numbered relative to `zero_coin`.
    ///
    /// Duplicates coalesce; the size only counts distinct coins.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidCoin`] if a coin is outside `zero_coin..zero_coin + 12`
    pub fn from_coins(
        coins: impl IntoIterator<Item = usize>,
        zero_coin: usize,
    ) -> Result<Self> {
        let mut mask = 0;
        for coin in coins {
            mask |= bit(coin, zero_coin)?;
        }
        Ok(Self::from_mask(mask))
    }

    /// Build an ordered set, keeping the first occurrence of each coin in the
    /// order given
    pub fn ordered(
        coins: impl IntoIterator<Item = usize>,
        zero_coin: usize,
    ) -> Result<Self> {
        let mut mask = 0;
        let mut sequence = Vec::new();
        for coin in coins {
            let next = mask | bit(coin, zero_coin)?;
            if next != mask {
                mask = next;
                sequence.push(coin);
            }
        }
        Ok(Self {
            order: Some(Sequence {
                coins: sequence,
                zero_coin,
            }),
            ..Self::from_mask(mask)
        })
    }

    /// Bits beyond the 12th are discarded
    pub fn from_mask(mask: CoinMask) -> Self {
        let mask = mask & FULL_MASK;
        Self {
            mask,
            size: mask.count_ones() as u8,
            order: None,
        }
    }

    pub fn mask(&self) -> CoinMask {
        self.mask
    }

    pub fn size(&self) -> u8 {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn is_ordered(&self) -> bool {
        self.order.is_some()
    }

    pub fn contains(&self, coin: usize, zero_coin: usize) -> bool {
        bit(coin, zero_coin).map_or(false, |bit| self.mask & bit != 0)
    }

    pub fn is_subset(&self, other: &Self) -> bool {
        self.mask & !other.mask == 0
    }

    /// The coins of the set numbered relative to `zero_coin`: ascending for
    /// a plain set, in insertion order for an ordered one
    pub fn as_coins(&self, zero_coin: usize) -> Vec<usize> {
        match &self.order {
            Some(sequence) => {
                sequence
                    .coins
                    .iter()
                    .map(|&coin| coin - sequence.zero_coin + zero_coin)
                    .collect()
            },
            None => {
                (0..COINS)
                    .filter(|offset| self.mask & (1 << offset) != 0)
                    .map(|offset| offset + zero_coin)
                    .collect()
            },
        }
    }

    /// A plain version of this set; the ordering, if any, is forgotten
    pub fn sort(&self) -> Self {
        Self::from_mask(self.mask)
    }

    pub fn union(&self, other: &Self) -> Self {
        Self::from_mask(self.mask | other.mask)
    }

    pub fn intersection(&self, other: &Self) -> Self {
        Self::from_mask(self.mask & other.mask)
    }

    /// The coins of `self` that are not in `other`
    pub fn complement(&self, other: &Self) -> Self {
        Self::from_mask(self.mask & !other.mask)
    }

    /// A new set that also contains `coin`. An ordered set appends it.
    pub fn add(&self, coin: usize, zero_coin: usize) -> Result<Self> {
        let mask = self.mask | bit(coin, zero_coin)?;
        if mask == self.mask {
            return Ok(self.clone());
        }
        let order = self.order.as_ref().map(|sequence| {
            let mut coins = sequence.coins.clone();
            coins.push(coin - zero_coin + sequence.zero_coin);
            Sequence {
                coins,
                zero_coin: sequence.zero_coin,
            }
        });
        Ok(Self {
            order,
            ..Self::from_mask(mask)
        })
    }

    /// The only coin of the set
    ///
    /// # Errors
    ///
    /// [`Error::NotSingleton`] unless the set holds exactly one coin
    pub fn exactly_one(&self, zero_coin: usize) -> Result<usize> {
        if self.size != 1 {
            return Err(Error::NotSingleton(self.size));
        }
        Ok(self.mask.trailing_zeros() as usize + zero_coin)
    }
}

impl PartialEq for CoinSet {
    fn eq(&self, other: &Self) -> bool {
        self.mask == other.mask
    }
}
impl Eq for CoinSet {
}
impl Hash for CoinSet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.mask.hash(state);
    }
}

impl fmt::Display for CoinSet {
    /// One-based, as the puzzle is usually told
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.as_coins(ONE_BASED).iter().join(","))
    }
}
