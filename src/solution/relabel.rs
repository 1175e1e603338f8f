use tracing::trace;

use super::{Groups, Solution, Stage};
use crate::coinset::{CoinSet, COINS};
use crate::permutation::Permutation;
use crate::weighing::Weighing;
use crate::{Error, Result};

impl Solution {
    /// Rename the coins so that the decision table lists them in order: the
    /// coin decided by entry `k` of the table becomes coin `zero_coin + k`.
    ///
    /// # Errors
    ///
    /// Any error from [`reverse`](Self::reverse)
    pub fn relabel(&self) -> Result<Self> {
        let reversed = self.reverse()?;
        let z = reversed.zero_coin;
        let positions = Permutation::new(&reversed.coins, z)?;
        let rename = |pan: &CoinSet| -> Result<CoinSet> {
            let coins = pan
                .as_coins(z)
                .into_iter()
                .map(|coin| {
                    positions
                        .index_of(coin)
                        .map(|position| position + z)
                        .ok_or(Error::InvalidCoin { coin, zero_coin: z })
                })
                .collect::<Result<Vec<_>>>()?;
            CoinSet::from_coins(coins, z)
        };
        let mut weighings = reversed.weighings.clone();
        for weighing in &mut weighings {
            *weighing = Weighing::new(rename(weighing.left())?, rename(weighing.right())?);
        }
        trace!(from = ?reversed.coins, "relabelled");
        Ok(Self {
            flip: reversed.flip,
            coins: (z..z + COINS).collect(),
            weights: reversed.weights.clone(),
            stage: Stage::REVERSED | Stage::RELABELLED | Stage::NORMALISED,
            ..Self::new(weighings, z)
        })
    }

    /// Every pan and group in ascending coin order. Nothing else changes.
    pub fn normalize(&self) -> Self {
        let weighings = [0, 1, 2].map(|row| self.weighings[row].sort());
        let groups = self.groups.as_ref().map(|groups| {
            Groups {
                unique: groups.unique.sort(),
                triples: groups.triples.sort(),
                pairs: [0, 1, 2].map(|i| groups.pairs[i].sort()),
            }
        });
        Self {
            weighings,
            groups,
            stage: self.stage | Stage::NORMALISED,
            ..self.clone()
        }
    }
}
