use tracing::{debug, trace, warn};

use super::{Failure, Solution, Stage, TABLE};
use crate::coinset::COINS;
use crate::error::illegal;
use crate::scale::{Oracle, Weight};
use crate::{Error, Result};

/// Cells of the 27-entry table which, when unused, identify the row to flip
/// so that the all-light cell goes unused instead
const FLIP_PROBES: [(usize, usize); 3] = [(8, 0), (6, 1), (2, 2)];

impl Solution {
    /// Reverse engineer the decision table of the weighings.
    ///
    /// Every (coin, weight) hypothesis is run through the weighings against
    /// an [`Oracle`]; a valid solution sends each to a distinct outcome.
    ///
    /// # Errors
    ///
    /// - [`Error::Ambiguous`] listing every hypothesis that shares an
    ///   outcome with another
    /// - [`Error::Scale`] if a weighing uses a coin twice or out of range
    /// - [`Error::RecursionGuard`] if the table cannot be folded even after
    ///   flipping a row
    pub fn reverse(&self) -> Result<Self> {
        if self.stage.contains(Stage::REVERSED) {
            return Ok(self.clone());
        }
        self.reverse_with(None)
    }

    fn reverse_with(&self, flip: Option<usize>) -> Result<Self> {
        let z = self.zero_coin;
        let mut table = Self {
            flip,
            coins: vec![z; TABLE],
            weights: vec![Weight::Equal; TABLE],
            ..self.reset()
        };
        let mut failures = Vec::new();
        for weight in [Weight::Light, Weight::Heavy] {
            for coin in z..z + COINS {
                let (_, _, slot) = table.decide_slot(&mut Oracle::new(coin, weight, z))?;
                if table.weights[slot] != Weight::Equal {
                    trace!(coin, %weight, other = table.coins[slot], slot, "collision");
                    let other = Failure {
                        coin: table.coins[slot],
                        weight: table.weights[slot],
                    };
                    for failure in [other, Failure { coin, weight }] {
                        if !failures.contains(&failure) {
                            failures.push(failure);
                        }
                    }
                    continue;
                }
                table.coins[slot] = coin;
                table.weights[slot] = weight;
            }
        }
        if !failures.is_empty() {
            debug!(count = failures.len(), "ambiguous solution");
            return Err(Error::Ambiguous(failures));
        }

        if table.weights[0] == Weight::Equal {
            // entry k of the folded table is the hypothesis at idx = -(k + 1)
            let cells = (1..=COINS).rev();
            return Ok(Self {
                weighings: self.weighings.clone(),
                zero_coin: z,
                flip,
                coins: cells.clone().map(|cell| table.coins[cell]).collect(),
                weights: cells.map(|cell| table.weights[cell]).collect(),
                groups: self.groups.clone(),
                analysis: self.analysis,
                canon: self.canon.clone(),
                number: self.number,
                stage: self.stage.difference(Stage::INVALID) | Stage::REVERSED,
                failures: Vec::new(),
            });
        }

        if flip.is_some() {
            return Err(Error::RecursionGuard);
        }
        let row = FLIP_PROBES
            .iter()
            .find(|&&(cell, _)| table.weights[cell] == Weight::Equal)
            .map(|&(_, row)| row)
            .ok_or_else(|| illegal("no row flip frees the all-light outcome"))?;
        debug!(row, "flipping row");
        self.reverse_with(Some(row))
    }

    /// Like [`reverse`](Self::reverse), but an invalid solution is answered
    /// as a clone marked [`Stage::INVALID`] carrying its failures
    pub fn verify(&self) -> Self {
        match self.reverse() {
            Ok(reversed) => reversed,
            Err(err) => {
                warn!(%err, "invalid solution");
                let failures = match err {
                    Error::Ambiguous(failures) => failures,
                    _ => Vec::new(),
                };
                Self {
                    stage: Stage::INVALID,
                    failures,
                    ..self.reset()
                }
            },
        }
    }

    /// Whether the weighings identify every (coin, weight) hypothesis
    pub fn is_valid(&self) -> bool {
        self.stage.contains(Stage::REVERSED) || self.reverse().is_ok()
    }
}
