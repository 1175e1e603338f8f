use tracing::debug;

use super::{Canon, Groups, Pattern, Solution, Stage, StructureType};
use crate::coinset::{CoinSet, COINS};
use crate::error::illegal;
use crate::weighing::{Pan, Weighing};
use crate::Result;

/// Role of the unique coin of canonical row `i` is `SINGLETONS + i`
const SINGLETONS: usize = 0;
/// Roles of the coins of `pairs[i]` are `PAIRS + 2i` (on the same pan in both
/// rows that weigh them) and `PAIRS + 2i + 1` (on opposite pans)
const PAIRS: usize = 3;
/// Role of the triple that canonical row `i` keeps off its chosen pan is
/// `TRIPLES + i`
const TRIPLES: usize = 9;

/// Which pan of its first row each coin of a pair set goes on, for each pair
/// set of a canonical solution.
///
/// The opposite-pan coin of `pairs[i]` is on the other pan in row `i + 1`;
/// the same-pan coin is on the same pan there.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct Placement {
    pub same_left: [bool; 3],
    pub opposite_left: [bool; 3],
}
impl Placement {
    /// The placement of a canonical solution with this pattern and
    /// chirality, if there is one
    pub fn of(pattern: Pattern, chirality: bool) -> Option<Self> {
        const NONE: [bool; 3] = [false; 3];
        let (same_left, opposite_left) = match (pattern, chirality) {
            (Pattern::Ppp | Pattern::Qpp, _) => (NONE, [chirality; 3]),
            (Pattern::Prs | Pattern::Qrs, true) => ([false, false, true], [false, true, true]),
            (Pattern::Prs | Pattern::Qrs, false) => ([false, true, false], NONE),
            (Pattern::Prt, false) => (NONE, [false, true, false]),
            (Pattern::Prt, true) => return None,
        };
        Some(Self {
            same_left,
            opposite_left,
        })
    }
}

impl StructureType {
    /// The pan of a canonical row that holds its unique coin
    fn unique_pan(self) -> Pan {
        match self {
            Self::P | Self::T => Pan::Left,
            Self::Q | Self::R | Self::S => Pan::Right,
        }
    }

    /// Whether a canonical row of this type weighs every triple on its left
    fn holds_all_triples(self) -> bool {
        matches!(self, Self::Q | Self::T)
    }
}

fn role(set: CoinSet, zero_coin: usize, name: &str, row: usize) -> Result<usize> {
    set.exactly_one(zero_coin)
        .map_err(|_| illegal(format!("row {row} has no single {name} coin: {set}")))
}

/// Assign the coins of a solution already in canonical order to their roles,
/// answering the role permutation and the chirality
fn extract(
    rows: &[Weighing; 3],
    groups: &Groups,
    pattern: Pattern,
    zero_coin: usize,
) -> Result<(CoinSet, bool)> {
    let z = zero_coin;
    let everywhere_left = rows[0]
        .left()
        .intersection(rows[1].left())
        .intersection(rows[2].left());
    let mut slots = [z; COINS];
    let mut same_left = [false; 3];
    let mut opposite_left = [false; 3];
    for (row, kind) in pattern.types().into_iter().enumerate() {
        let weighing = &rows[row];
        let next = &rows[(row + 1) % 3];

        let unique = groups.unique.intersection(weighing.pan(kind.unique_pan()));
        slots[SINGLETONS + row] = role(unique, z, "unique", row)?;

        let triple = if kind.holds_all_triples() {
            groups.triples.intersection(&everywhere_left)
        } else {
            groups.triples.intersection(weighing.right())
        };
        slots[TRIPLES + row] = role(triple, z, "triple", row)?;

        let pair = &groups.pairs[row];
        let together = weighing
            .left()
            .intersection(next.left())
            .union(&weighing.right().intersection(next.right()));
        let same = role(pair.intersection(&together), z, "same-pan", row)?;
        let opposite = role(pair.complement(&together), z, "opposite-pan", row)?;
        same_left[row] = weighing.left().contains(same, z);
        opposite_left[row] = weighing.left().contains(opposite, z);
        slots[PAIRS + 2 * row] = same;
        slots[PAIRS + 2 * row + 1] = opposite;
    }

    let chirality = opposite_left[2];
    let observed = Placement {
        same_left,
        opposite_left,
    };
    if Placement::of(pattern, chirality) != Some(observed) {
        return Err(illegal(format!(
            "pairs of a {pattern} solution are misplaced: {observed:?}"
        )));
    }
    let slots = CoinSet::ordered(slots, z)?;
    if slots.size() as usize != COINS {
        return Err(illegal(format!("roles are not a permutation: {slots}")));
    }
    Ok((slots, chirality))
}

/// The weighings, in canonical order, of the solution with the given
/// pattern, chirality and role permutation
pub(crate) fn rebuild(
    pattern: Pattern,
    chirality: bool,
    slots: &[usize],
    zero_coin: usize,
) -> Result<[Weighing; 3]> {
    let placement = Placement::of(pattern, chirality)
        .ok_or_else(|| illegal(format!("{pattern} has no chirality {chirality}")))?;
    if slots.len() != COINS {
        return Err(illegal(format!("expected {COINS} roles: {slots:?}")));
    }
    let types = pattern.types();
    let mut rows = Vec::with_capacity(3);
    for (row, kind) in types.into_iter().enumerate() {
        let mut left = Vec::with_capacity(4);
        let mut right = Vec::with_capacity(4);
        let mut place = |coin: usize, on_left: bool| {
            if on_left {
                left.push(coin);
            } else {
                right.push(coin);
            }
        };
        for other in 0..3 {
            place(slots[TRIPLES + other], kind.holds_all_triples() || other != row);
        }
        place(slots[SINGLETONS + row], kind.unique_pan() == Pan::Left);
        let previous = (row + 2) % 3;
        place(slots[PAIRS + 2 * row], placement.same_left[row]);
        place(slots[PAIRS + 2 * row + 1], placement.opposite_left[row]);
        place(slots[PAIRS + 2 * previous], placement.same_left[previous]);
        place(slots[PAIRS + 2 * previous + 1], !placement.opposite_left[previous]);
        rows.push(Weighing::from_coins(&left, &right, zero_coin)?);
    }
    rows.try_into()
        .map_err(|_| illegal("expected three weighings"))
}

impl Solution {
    /// The canonical form of the solution: rows reordered and re-panned so
    /// that their structure reads as one of the five [`Pattern`]s with every
    /// chosen pan on the left.
    ///
    /// The answer remembers the order and flips it was derived with (see
    /// [`restore`](Self::restore)) and the role each coin plays. Its decision
    /// table and relabelling, if any, are dropped, since neither matches the
    /// reordered weighings.
    ///
    /// # Errors
    ///
    /// Any error from [`analyse_structure`](Self::analyse_structure), or
    /// [`Error::StructuralInvariant`](crate::Error::StructuralInvariant) if
    /// the coins cannot be assigned to their roles
    pub fn canonical(&self) -> Result<Self> {
        if self.stage.contains(Stage::CANONICALISED) {
            return Ok(self.clone());
        }
        let analysed = self.analyse_structure()?;
        let analysis = analysed
            .analysis
            .ok_or_else(|| illegal("analysed solution has no analysis"))?;
        let flips = analysis.flips();
        let order = analysis.order;
        let frame = order.map(|row| self.weighings[row].flipped_if(flips[row]));

        let framed = Self::new(frame, self.zero_coin).analyse_structure()?;
        let reanalysis = framed
            .analysis
            .ok_or_else(|| illegal("analysed solution has no analysis"))?;
        if reanalysis.order != [0, 1, 2]
            || reanalysis.pattern != analysis.pattern
            || reanalysis.flips().contains(&true)
        {
            return Err(illegal(format!(
                "canonical frame is not canonical: {reanalysis:?}"
            )));
        }
        let groups = framed
            .groups
            .as_ref()
            .ok_or_else(|| illegal("grouped solution has no groups"))?;
        let (slots, chirality) =
            extract(&framed.weighings, groups, analysis.pattern, self.zero_coin)?;
        debug!(pattern = %analysis.pattern, chirality, ?order, ?flips, %slots, "canonicalised");

        Ok(Self {
            canon: Some(Canon {
                pattern: analysis.pattern,
                chirality,
                order,
                flips,
                slots,
            }),
            stage: self
                .stage
                .difference(
                    Stage::REVERSED | Stage::NUMBERED | Stage::RELABELLED | Stage::INVALID,
                )
                | framed.stage
                | Stage::CANONICALISED,
            ..framed
        })
    }

    /// Undo [`canonical`](Self::canonical): the weighings in the order and
    /// orientation the canonical form was derived from
    ///
    /// # Errors
    ///
    /// [`Error::StructuralInvariant`](crate::Error::StructuralInvariant) if
    /// the solution is not canonical
    pub fn restore(&self) -> Result<Self> {
        let canon = self
            .canon
            .as_ref()
            .ok_or_else(|| illegal("only a canonical solution can be restored"))?;
        let mut weighings = self.weighings.clone();
        for (position, &row) in canon.order.iter().enumerate() {
            weighings[row] = self.weighings[position].flipped_if(canon.flips[row]);
        }
        Ok(Self::new(weighings, self.zero_coin))
    }

    /// The coin playing each role, once canonical
    pub fn slots(&self) -> Option<Vec<usize>> {
        self.canon
            .as_ref()
            .map(|canon| canon.slots.as_coins(self.zero_coin))
    }
}
