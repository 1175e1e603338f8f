//! Numbering of solutions.
//!
//! A canonical solution is determined by its pattern, the chirality of its
//! pair placement, the order and flips that produced it, and the role each
//! coin plays. These fold into a single integer
//!
//! ```text
//! N = number(roles) * RADIX + STRUCTURE_CODES * F + S
//! ```
//!
//! where `F` has bit `i` set if row `i` had its pans exchanged and `S` numbers
//! the pattern, row order and chirality together.

use itertools::Itertools;
use tracing::debug;

use super::canonical::rebuild;
use super::{Canon, Pattern, Solution, Stage};
use crate::coinset::{CoinSet, COINS, ONE_BASED};
use crate::error::illegal;
use crate::internal_util::{from_mask, rotation, to_mask, FACTORIAL_12};
use crate::permutation::{self, Permutation};
use crate::{Error, Result};

/// Distinct (pattern, row order, chirality) combinations
pub const STRUCTURE_CODES: u64 = 38;
/// Distinct flip masks
pub const FLIP_CODES: u64 = 8;
pub const RADIX: u64 = STRUCTURE_CODES * FLIP_CODES;
/// Every solution number is below this
pub const MAX_NUMBER: u64 = FACTORIAL_12 * RADIX;

const PPP: u64 = 0;
const QPP: u64 = 2;
const PRS: u64 = 8;
const PRT: u64 = 20;
const QRS: u64 = 26;

fn row_order(code: u64) -> Result<[usize; 3]> {
    let order = permutation::decode(code, &[0, 1, 2])?;
    Ok([order[0], order[1], order[2]])
}

/// Number a pattern, the row order that produced it and its chirality
///
/// # Errors
///
/// [`Error::StructuralInvariant`] if the order could not have produced the
/// pattern, or a PRT pattern claims to be chiral
pub fn encode_structure(pattern: Pattern, order: [usize; 3], chirality: bool) -> Result<u64> {
    let chiral = u64::from(chirality);
    let mismatch = || illegal(format!("{pattern} cannot come from row order {order:?}"));
    match pattern {
        Pattern::Ppp => {
            if order != rotation(0) {
                return Err(mismatch());
            }
            Ok(PPP + chiral)
        },
        Pattern::Qpp => {
            if order != rotation(order[0]) {
                return Err(mismatch());
            }
            Ok(QPP + 2 * order[0] as u64 + chiral)
        },
        Pattern::Prs => Ok(PRS + 2 * permutation::number(&order)? + chiral),
        Pattern::Prt => {
            if chirality {
                return Err(illegal("PRT has no chiral form"));
            }
            Ok(PRT + permutation::number(&order)?)
        },
        Pattern::Qrs => Ok(QRS + 2 * permutation::number(&order)? + chiral),
    }
}

/// The inverse of [`encode_structure`]
///
/// # Errors
///
/// [`Error::OutOfRange`] unless `code < STRUCTURE_CODES`
pub fn decode_structure(code: u64) -> Result<(Pattern, [usize; 3], bool)> {
    match code {
        PPP..=1 => Ok((Pattern::Ppp, rotation(0), code == 1)),
        QPP..=7 => {
            let code = code - QPP;
            Ok((Pattern::Qpp, rotation((code / 2) as usize), code % 2 == 1))
        },
        PRS..=19 => {
            let code = code - PRS;
            Ok((Pattern::Prs, row_order(code / 2)?, code % 2 == 1))
        },
        PRT..=25 => Ok((Pattern::Prt, row_order(code - PRT)?, false)),
        QRS..=37 => {
            let code = code - QRS;
            Ok((Pattern::Qrs, row_order(code / 2)?, code % 2 == 1))
        },
        _ => Err(Error::OutOfRange(code)),
    }
}

/// Split a solution number into its role permutation number, flip mask and
/// structure code
pub fn split(number: u64) -> (u64, u64, u64) {
    let rem = number % RADIX;
    (
        number / RADIX,
        rem / STRUCTURE_CODES,
        rem % STRUCTURE_CODES,
    )
}

impl Solution {
    /// The canonical form of the solution, with its number
    ///
    /// # Errors
    ///
    /// Any error from [`canonical`](Self::canonical)
    pub fn numbered(&self) -> Result<Self> {
        if self.stage.contains(Stage::NUMBERED) && self.number.is_some() {
            return Ok(self.clone());
        }
        let canonical = self.canonical()?;
        let canon = canonical
            .canon
            .as_ref()
            .ok_or_else(|| illegal("canonical solution has no roles"))?;
        let z = canonical.zero_coin;
        let structure = encode_structure(canon.pattern, canon.order, canon.chirality)?;
        let flips = to_mask(canon.flips);
        let roles = Permutation::new(&canon.slots.as_coins(z), z)?.number();
        let number = roles * RADIX + STRUCTURE_CODES * flips + structure;
        debug!(number, roles, flips, structure, "numbered");
        Ok(Self {
            number: Some(number),
            stage: canonical.stage | Stage::NUMBERED,
            ..canonical
        })
    }

    /// The number of the solution's canonical form
    ///
    /// # Errors
    ///
    /// Any error from [`canonical`](Self::canonical)
    pub fn encode(&self) -> Result<u64> {
        self.numbered()?
            .number
            .ok_or_else(|| illegal("numbered solution has no number"))
    }

    /// The canonical solution numbered `number`, with one-based coins
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] unless `number < MAX_NUMBER`
    pub fn decode(number: u64) -> Result<Self> {
        Self::decode_with(number, ONE_BASED)
    }

    /// The canonical solution numbered `number`, with coins numbered from
    /// `zero_coin`
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] unless `number < MAX_NUMBER`
    pub fn decode_with(number: u64, zero_coin: usize) -> Result<Self> {
        if number >= MAX_NUMBER {
            return Err(Error::OutOfRange(number));
        }
        let (roles, flips, structure) = split(number);
        let (pattern, order, chirality) = decode_structure(structure)?;
        let coins = (zero_coin..zero_coin + COINS).collect_vec();
        let slots = permutation::decode(roles, &coins)?;
        let frame = rebuild(pattern, chirality, &slots, zero_coin)?;
        let framed = Self::new(frame, zero_coin).analyse_structure()?;
        Ok(Self {
            canon: Some(Canon {
                pattern,
                chirality,
                order,
                flips: from_mask(flips),
                slots: CoinSet::ordered(slots, zero_coin)?,
            }),
            number: Some(number),
            stage: framed.stage | Stage::CANONICALISED | Stage::NUMBERED,
            ..framed
        })
    }
}
