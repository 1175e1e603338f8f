//! Verification, classification and numbering of solutions to the 12 coins
//! problem: find, in three weighings on a balance scale, which of 12 coins is
//! counterfeit and whether it is light or heavy.
//!
//! ```
//! use twelvecoins::{util, Oracle, Weight};
//!
//! let solution = util::reference_solution().reverse()?;
//! assert_eq!(solution.decide(&mut Oracle::new(4, Weight::Heavy, 0))?, (4, Weight::Heavy));
//!
//! let number = solution.encode()?;
//! let decoded = twelvecoins::Solution::decode_with(number, 0)?;
//! assert!(decoded.restore()?.is_valid());
//! # Ok::<(), twelvecoins::Error>(())
//! ```
#![allow(clippy::module_name_repetitions)]

pub mod coinset;
#[cfg(feature = "serde")]
pub mod encoding;
mod error;
mod internal_util;
pub mod permutation;
pub mod scale;
pub mod solution;
pub mod util;
pub mod weighing;

pub use coinset::CoinSet;
#[cfg(feature = "serde")]
pub use encoding::Record;
pub use error::{Error, Result, ScaleError};
pub use permutation::Permutation;
pub use scale::{Oracle, Scale, Weight};
pub use solution::{Failure, Pattern, Solution, Stage, Structure, StructureType};
pub use weighing::{Pan, Weighing};
