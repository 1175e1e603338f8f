//! A candidate solution to the 12 coins problem, and the transformations
//! that verify, classify and number it.
//!
//! A [`Solution`] starts out holding nothing but its three weighings. Each
//! transformation ([`reverse`](Solution::reverse),
//! [`groupings`](Solution::groupings),
//! [`analyse_structure`](Solution::analyse_structure),
//! [`canonical`](Solution::canonical), [`relabel`](Solution::relabel),
//! [`normalize`](Solution::normalize)) answers a new solution with more
//! [`Stage`]s reached; the receiver is never modified.

use std::fmt;

use crate::coinset::{CoinSet, COINS, ONE_BASED};
use crate::error::illegal;
use crate::scale::{Scale, Weight};
use crate::weighing::Weighing;
use crate::{Error, Result};

mod canonical;
mod codec;
mod grouping;
mod relabel;
mod reverse;
mod structure;

pub use canonical::Placement;
pub use codec::{
    decode_structure,
    encode_structure,
    split,
    FLIP_CODES,
    MAX_NUMBER,
    RADIX,
    STRUCTURE_CODES,
};
pub use structure::{canonical_order, Pattern, Structure, StructureType};

/// Entries in the decision table while it is being reverse-engineered; one
/// per possible outcome of three weighings
pub(crate) const TABLE: usize = 27;

bitflags::bitflags! {
    /// The stages a solution has reached.
    #[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
    pub struct Stage: u8 {
        const REVERSED = 1 << 0;
        const GROUPED = 1 << 1;
        const ANALYSED = 1 << 2;
        const CANONICALISED = 1 << 3;
        const NUMBERED = 1 << 4;
        const RELABELLED = 1 << 5;
        const NORMALISED = 1 << 6;
        const INVALID = 1 << 7;
    }
}

/// A hypothesis (this coin has this relative weight) that a solution cannot
/// tell apart from some other hypothesis.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Failure {
    pub coin: usize,
    pub weight: Weight,
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.coin, self.weight)
    }
}

/// The coins that appear in exactly one, two or three of the weighings.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Groups {
    /// In exactly one weighing
    pub unique: CoinSet,
    /// In every weighing
    pub triples: CoinSet,
    /// `pairs[i]` are the coins in rows `i` and `i + 1` (mod 3) only
    pub pairs: [CoinSet; 3],
}

/// The structure of each row and the canonical order they imply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Analysis {
    pub structure: [Structure; 3],
    /// `order[k]` is the row that becomes canonical row `k`
    pub order: [usize; 3],
    pub pattern: Pattern,
}
impl Analysis {
    /// Whether each row had its right pan chosen
    pub fn flips(&self) -> [bool; 3] {
        self.structure.map(|structure| structure.is_flipped())
    }
}

/// How a canonical solution was derived from, and can be restored to, its
/// source arrangement.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Canon {
    pub pattern: Pattern,
    pub chirality: bool,
    /// `order[k]` is the source row of canonical row `k`
    pub order: [usize; 3],
    /// Per source row, whether its pans were exchanged
    pub flips: [bool; 3],
    /// Ordered: the coin playing each of the 12 roles
    pub slots: CoinSet,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    pub(crate) weighings: [Weighing; 3],
    pub(crate) zero_coin: usize,
    /// The row whose outcome is inverted before consulting the decision table
    pub(crate) flip: Option<usize>,
    /// Indexed by `abs(9a + 3b + c - 13) - 1` once reversed
    pub(crate) coins: Vec<usize>,
    pub(crate) weights: Vec<Weight>,
    pub(crate) groups: Option<Groups>,
    pub(crate) analysis: Option<Analysis>,
    pub(crate) canon: Option<Canon>,
    pub(crate) number: Option<u64>,
    pub(crate) stage: Stage,
    pub(crate) failures: Vec<Failure>,
}
impl Solution {
    pub fn new(weighings: [Weighing; 3], zero_coin: usize) -> Self {
        Self {
            weighings,
            zero_coin,
            flip: None,
            coins: Vec::new(),
            weights: Vec::new(),
            groups: None,
            analysis: None,
            canon: None,
            number: None,
            stage: Stage::empty(),
            failures: Vec::new(),
        }
    }

    /// Build a solution from `[left, right]` coin lists for each row
    ///
    /// # Errors
    ///
    /// [`Error::InvalidCoin`] if any coin is out of range for `zero_coin`
    pub fn from_coins(rows: [[&[usize]; 2]; 3], zero_coin: usize) -> Result<Self> {
        let [a, b, c] = rows;
        Ok(Self::new(
            [
                Weighing::from_coins(a[0], a[1], zero_coin)?,
                Weighing::from_coins(b[0], b[1], zero_coin)?,
                Weighing::from_coins(c[0], c[1], zero_coin)?,
            ],
            zero_coin,
        ))
    }

    pub fn weighings(&self) -> &[Weighing; 3] {
        &self.weighings
    }

    pub fn zero_coin(&self) -> usize {
        self.zero_coin
    }

    pub fn flip(&self) -> Option<usize> {
        self.flip
    }

    pub fn coins(&self) -> &[usize] {
        &self.coins
    }

    pub fn weights(&self) -> &[Weight] {
        &self.weights
    }

    pub fn groups(&self) -> Option<&Groups> {
        self.groups.as_ref()
    }

    pub fn analysis(&self) -> Option<&Analysis> {
        self.analysis.as_ref()
    }

    pub fn canon(&self) -> Option<&Canon> {
        self.canon.as_ref()
    }

    pub fn number(&self) -> Option<u64> {
        self.number
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn failures(&self) -> &[Failure] {
        &self.failures
    }

    /// A clone holding only the weighings and the zero coin
    pub fn reset(&self) -> Self {
        Self::new(self.weighings.clone(), self.zero_coin)
    }

    /// Decide which coin is counterfeit, and whether it is light or heavy,
    /// with at most three uses of `scale`.
    ///
    /// # Errors
    ///
    /// [`Error::NotReversed`] unless the solution has been reversed, or any
    /// error from the scale
    pub fn decide(&self, scale: &mut impl Scale) -> Result<(usize, Weight)> {
        if !self.stage.contains(Stage::REVERSED) {
            return Err(Error::NotReversed);
        }
        let (coin, weight, _) = self.decide_slot(scale)?;
        Ok((coin, weight))
    }

    /// Run the three weighings and look the outcome up in the decision
    /// table, answering the coin, its weight, and the table slot consulted
    pub(crate) fn decide_slot(&self, scale: &mut impl Scale) -> Result<(usize, Weight, usize)> {
        let z = self.zero_coin;
        let mut idx = -13;
        for (row, weighing) in self.weighings.iter().enumerate() {
            let mut result =
                scale.weigh(&weighing.left().as_coins(z), &weighing.right().as_coins(z))?;
            if self.flip == Some(row) {
                result = result.invert();
            }
            idx += [9, 3, 1][row] * i32::from(result.value());
        }
        let slot = match self.coins.len() {
            COINS => {
                let offset = idx.unsigned_abs() as usize;
                if !(1..=COINS).contains(&offset) {
                    return Err(illegal(format!("index out of bounds: {idx}")));
                }
                offset - 1
            },
            TABLE => (idx + 13) as usize,
            entries => {
                return Err(illegal(format!("decision table has {entries} entries")));
            },
        };
        let coin = self.coins[slot];
        let weight = if idx > 0 {
            self.weights[slot].invert()
        } else {
            self.weights[slot]
        };
        Ok((coin, weight, slot))
    }
}

impl Default for Solution {
    fn default() -> Self {
        Self::new(
            [
                Weighing::new(CoinSet::empty(), CoinSet::empty()),
                Weighing::new(CoinSet::empty(), CoinSet::empty()),
                Weighing::new(CoinSet::empty(), CoinSet::empty()),
            ],
            ONE_BASED,
        )
    }
}
