//! The line-oriented JSON record of a solution.
//!
//! ```json
//! {"weighings":[[[1,2,3,4],[5,6,7,8]],...],"coins":[...],"weights":["light",...],
//!  "zero-coin":0,"unique":[...],"pairs":[[a,b],...],"triples":[...],"flip":1,
//!  "valid":true,"failures":[{"coin":1,"weight":"heavy"}],
//!  "structure":["p[0,1]",...],"S":0,"F":0,"P":[...],"N":0}
//! ```
//!
//! Only `weighings` is required. Every other field is derived from the
//! weighings: on reading, `S`, `F`, `P` and `N` are ignored and the rest are
//! checked against the weighings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::coinset::{CoinSet, ONE_BASED};
use crate::scale::Weight;
use crate::solution::{split, Failure, Groups, Solution, Stage, Structure};
use crate::{Error, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub weighings: Vec<[Vec<usize>; 2]>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub coins: Vec<usize>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub weights: Vec<Weight>,
    #[serde(rename = "zero-coin", default, skip_serializing_if = "Option::is_none")]
    pub zero_coin: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique: Option<Vec<usize>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pairs: Option<Vec<Vec<usize>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub triples: Option<Vec<usize>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flip: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<Failure>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structure: Option<Vec<String>>,
    #[serde(rename = "S", default, skip_serializing_if = "Option::is_none")]
    pub s: Option<u64>,
    #[serde(rename = "F", default, skip_serializing_if = "Option::is_none")]
    pub f: Option<u64>,
    #[serde(rename = "P", default, skip_serializing_if = "Option::is_none")]
    pub p: Option<Vec<usize>>,
    #[serde(rename = "N", default, skip_serializing_if = "Option::is_none")]
    pub n: Option<u64>,
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let line = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&line)
    }
}

impl FromStr for Record {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        serde_json::from_str(s).map_err(|err| Error::Parse(err.to_string()))
    }
}

impl Solution {
    pub fn to_record(&self) -> Record {
        let z = self.zero_coin;
        let mut record = Record {
            weighings: self
                .weighings
                .iter()
                .map(|weighing| [weighing.left().as_coins(z), weighing.right().as_coins(z)])
                .collect(),
            coins: self.coins.clone(),
            weights: self.weights.clone(),
            zero_coin: (z != ONE_BASED).then_some(z),
            flip: self.flip,
            failures: self.failures.clone(),
            ..Record::default()
        };
        if self.stage.contains(Stage::REVERSED) {
            record.valid = Some(true);
        } else if self.stage.contains(Stage::INVALID) {
            record.valid = Some(false);
        }
        if let Some(groups) = &self.groups {
            record.unique = Some(groups.unique.as_coins(z));
            record.triples = Some(groups.triples.as_coins(z));
            record.pairs = Some(groups.pairs.iter().map(|pair| pair.as_coins(z)).collect());
        }
        if let Some(analysis) = &self.analysis {
            record.structure = Some(analysis.structure.iter().map(ToString::to_string).collect());
        }
        if let Some(number) = self.number {
            let (_, flips, structure) = split(number);
            record.s = Some(structure);
            record.f = Some(flips);
            record.n = Some(number);
        }
        record.p = self.slots();
        record
    }

    /// Read a solution back from its record.
    ///
    /// Everything but the weighings and the zero coin is derived from them:
    /// the decision table, validity, groups and structure tags present in
    /// the record are recomputed and must agree. `S`, `F`, `P` and `N` are
    /// ignored.
    ///
    /// # Errors
    ///
    /// [`Error::Parse`] if the record does not hold three weighings, a field
    /// is malformed, or a derived field disagrees with the weighings;
    /// [`Error::InvalidCoin`] if a coin is out of range; any error from
    /// [`groupings`](Self::groupings) or
    /// [`analyse_structure`](Self::analyse_structure) if the record claims
    /// groups or tags the weighings do not have
    pub fn from_record(record: &Record) -> Result<Self> {
        let z = record.zero_coin.unwrap_or(ONE_BASED);
        let rows = match record.weighings.as_slice() {
            [a, b, c] => [a, b, c].map(|[left, right]| [left.as_slice(), right.as_slice()]),
            rows => {
                return Err(Error::Parse(format!(
                    "expected 3 weighings, found {}",
                    rows.len()
                )));
            },
        };
        let mut solution = Self::from_coins(rows, z)?;

        let has_table = !record.coins.is_empty() || !record.weights.is_empty();
        if has_table || record.valid.is_some() || !record.failures.is_empty() {
            solution = solution.verify();
            let valid = solution.stage.contains(Stage::REVERSED);
            if record.valid.is_some_and(|claimed| claimed != valid) {
                return Err(mismatch("valid"));
            }
            if has_table
                && (record.coins != solution.coins
                    || record.weights != solution.weights
                    || record.flip != solution.flip)
            {
                return Err(mismatch("decision table"));
            }
            if !record.failures.is_empty() && record.failures != solution.failures {
                return Err(mismatch("failures"));
            }
        }

        if let (Some(unique), Some(triples), Some(pairs)) =
            (&record.unique, &record.triples, &record.pairs)
        {
            let pairs = match pairs.as_slice() {
                [a, b, c] => [a, b, c],
                _ => return Err(Error::Parse("expected 3 pairs".to_string())),
            };
            let claimed = Groups {
                unique: CoinSet::from_coins(unique.iter().copied(), z)?,
                triples: CoinSet::from_coins(triples.iter().copied(), z)?,
                pairs: [
                    CoinSet::from_coins(pairs[0].iter().copied(), z)?,
                    CoinSet::from_coins(pairs[1].iter().copied(), z)?,
                    CoinSet::from_coins(pairs[2].iter().copied(), z)?,
                ],
            };
            solution = solution.groupings()?;
            if solution.groups.as_ref() != Some(&claimed) {
                return Err(mismatch("groups"));
            }
        }

        if let Some(tags) = &record.structure {
            let claimed = match tags.as_slice() {
                [a, b, c] => [a.parse::<Structure>()?, b.parse()?, c.parse()?],
                _ => return Err(Error::Parse("expected 3 structure tags".to_string())),
            };
            solution = solution.analyse_structure()?;
            if solution.analysis.map(|analysis| analysis.structure) != Some(claimed) {
                return Err(mismatch("structure"));
            }
        }
        Ok(solution)
    }
}

fn mismatch(field: &str) -> Error {
    Error::Parse(format!("\"{field}\" does not match the weighings"))
}
