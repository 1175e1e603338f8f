use thiserror::Error;

use crate::solution::Failure;

/// A [`Scale`](crate::scale::Scale) was asked to do something it cannot do.
///
/// A well-formed solution never triggers one of these; seeing one means the
/// weighings themselves are malformed.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Error)]
pub enum ScaleError {
    #[error("duplicate detected: {0}")]
    DuplicateCoin(usize),
    #[error("invalid coin: {0}")]
    InvalidCoin(usize),
    #[error("too many attempts to use the scale")]
    Exhausted,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Groupings, structure or canonical form disagree with the shape every
    /// valid solution has
    #[error("illegal state: {0}")]
    StructuralInvariant(String),
    /// Two or more (coin, weight) hypotheses produce identical weighing
    /// outcomes; every such hypothesis is listed
    #[error("not a valid solution because of {} failures", .0.len())]
    Ambiguous(Vec<Failure>),
    #[error(transparent)]
    Scale(#[from] ScaleError),
    #[error("infinite recursion detected: a second flip was required")]
    RecursionGuard,
    #[error("illegal state: expected a set of exactly one: was {0}")]
    NotSingleton(u8),
    #[error("coin {coin} is out of range for zero coin {zero_coin}")]
    InvalidCoin { coin: usize, zero_coin: usize },
    #[error("this solution must be reversed first")]
    NotReversed,
    #[error("solution number {0} is out of range")]
    OutOfRange(u64),
    #[error("parse error: {0}")]
    Parse(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Shorthand for building a [`Error::StructuralInvariant`]
pub(crate) fn illegal(message: impl Into<String>) -> Error {
    Error::StructuralInvariant(message.into())
}
