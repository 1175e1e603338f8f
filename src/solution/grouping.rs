use tracing::trace;

use super::{Groups, Solution, Stage};
use crate::coinset::CoinSet;
use crate::error::illegal;
use crate::{Result, ScaleError};

/// Coins on each pan of a well-formed weighing
const PAN_SIZE: u8 = 4;

impl Solution {
    /// Partition the coins by the weighings they take part in.
    ///
    /// # Errors
    ///
    /// - [`Error::Scale`](crate::Error::Scale) if a coin is on both pans of
    ///   a weighing
    /// - [`Error::StructuralInvariant`](crate::Error::StructuralInvariant) if
    ///   the partition does not have the shape of a solution: three coins
    ///   weighed once (one per row), six weighed twice (two per pair of rows)
    ///   and three weighed every time
    pub fn groupings(&self) -> Result<Self> {
        if self.stage.contains(Stage::GROUPED) {
            return Ok(self.clone());
        }
        let z = self.zero_coin;
        for weighing in &self.weighings {
            let overlap = weighing.overlap();
            if !overlap.is_empty() {
                let coin = overlap.as_coins(z)[0];
                return Err(ScaleError::DuplicateCoin(coin).into());
            }
            if weighing.left().size() != PAN_SIZE || weighing.right().size() != PAN_SIZE {
                return Err(illegal(format!(
                    "each pan must hold {PAN_SIZE} coins: {weighing}"
                )));
            }
        }

        let [a, b, c] = [0, 1, 2].map(|row| self.weighings[row].both().clone());
        let triples = a.intersection(&b).intersection(&c);
        let unique = a
            .complement(&b.union(&c))
            .union(&b.complement(&a.union(&c)))
            .union(&c.complement(&a.union(&b)));
        let pairs = a
            .union(&b)
            .union(&c)
            .complement(&triples)
            .complement(&unique);
        if triples.size() != 3 || unique.size() != 3 || pairs.size() != 6 {
            return Err(illegal(format!(
                "expected 3 triples, 3 unique and 6 paired coins: found {}, {} and {}",
                triples.size(),
                unique.size(),
                pairs.size()
            )));
        }

        let both = [&a, &b, &c];
        let pairs = [0, 1, 2].map(|row| {
            pairs
                .intersection(both[row])
                .intersection(both[(row + 1) % 3])
        });
        for row in 0..3 {
            if unique.intersection(both[row]).size() != 1 || pairs[row].size() != 2 {
                return Err(illegal(format!(
                    "row {row} must hold one unique coin and share two coins with the next row"
                )));
            }
        }
        trace!(%unique, %triples, "grouped");

        Ok(Self {
            groups: Some(Groups {
                unique,
                triples,
                pairs,
            }),
            stage: self.stage | Stage::GROUPED,
            ..self.clone()
        })
    }
}

impl Groups {
    /// Every coin that is weighed at all
    pub fn all(&self) -> CoinSet {
        self.pairs
            .iter()
            .fold(self.unique.union(&self.triples), |all, pair| all.union(pair))
    }
}
