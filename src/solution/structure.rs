use std::fmt;
use std::str::FromStr;

use tracing::debug;

use super::{Analysis, Groups, Solution, Stage};
use crate::error::illegal;
use crate::internal_util::rotation;
use crate::weighing::{Pan, Weighing};
use crate::{Error, Result};

/// How the chosen pan of a weighing (the one holding most of the triples)
/// is made up.
///
/// | type | triples | unique | pairs |
/// |------|---------|--------|-------|
/// | P    | 2       | 1      | 1     |
/// | Q    | 3       | 0      | 1     |
/// | R    | 2       | 0      | 1 from each adjacent pair set |
/// | S    | 2       | 0      | 2 from one pair set |
/// | T    | 3       | 1      | 0     |
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum StructureType {
    P,
    Q,
    R,
    S,
    T,
}
impl StructureType {
    pub fn as_char(self) -> char {
        match self {
            Self::P => 'p',
            Self::Q => 'q',
            Self::R => 'r',
            Self::S => 's',
            Self::T => 't',
        }
    }
}

impl fmt::Display for StructureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for StructureType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "p" => Ok(Self::P),
            "q" => Ok(Self::Q),
            "r" => Ok(Self::R),
            "s" => Ok(Self::S),
            "t" => Ok(Self::T),
            _ => Err(Error::Parse(format!("unknown structure type '{s}'"))),
        }
    }
}

/// The structure of one weighing: its type, and which pan was chosen.
///
/// Rendered as the type followed by the pan permutation, e.g. `p[0,1]` when
/// the left pan was chosen and `r[1,0]` when the right was.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct Structure {
    pub kind: StructureType,
    pub pan: Pan,
}
impl Structure {
    pub fn new(kind: StructureType, pan: Pan) -> Self {
        Self { kind, pan }
    }

    /// Whether the right pan was chosen
    pub fn is_flipped(&self) -> bool {
        self.pan == Pan::Right
    }

    /// Classify a weighing given the groups of its solution
    ///
    /// # Errors
    ///
    /// [`Error::StructuralInvariant`] if the weighing fits none of the types
    pub fn classify(weighing: &Weighing, groups: &Groups) -> Result<Self> {
        let left = weighing.left().intersection(&groups.triples).size();
        let right = weighing.right().intersection(&groups.triples).size();
        let pan = Pan::chosen(right > left);
        let chosen = weighing.pan(pan);
        let triples = chosen.intersection(&groups.triples).size();
        let unique = chosen.intersection(&groups.unique).size();
        let kind = match (triples, unique) {
            (3, 1) => StructureType::T,
            (3, 0) => StructureType::Q,
            (2, 1) => StructureType::P,
            (2, 0) => {
                let shared = groups
                    .pairs
                    .iter()
                    .map(|pair| pair.intersection(chosen).size())
                    .find(|&shared| shared > 0);
                match shared {
                    Some(1) => StructureType::R,
                    Some(2) => StructureType::S,
                    _ => {
                        return Err(illegal(format!(
                            "chosen pan of {weighing} shares no pairs"
                        )));
                    },
                }
            },
            _ => {
                return Err(illegal(format!(
                    "chosen pan of {weighing} has {triples} triples and {unique} unique coins"
                )));
            },
        };
        Ok(Self::new(kind, pan))
    }
}

impl fmt::Display for Structure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.pan {
            Pan::Left => write!(f, "{}[0,1]", self.kind),
            Pan::Right => write!(f, "{}[1,0]", self.kind),
        }
    }
}

impl FromStr for Structure {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let parse_error = || Error::Parse(format!("invalid structure '{s}'"));
        let open = s.find('[').ok_or_else(parse_error)?;
        let kind = s[..open].parse()?;
        let pan = match &s[open..] {
            "[0,1]" => Pan::Left,
            "[1,0]" => Pan::Right,
            _ => return Err(parse_error()),
        };
        Ok(Self::new(kind, pan))
    }
}

/// The sequence of structure types of a solution's rows once they are in
/// canonical order. Every valid solution has one of these five.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Pattern {
    Ppp,
    Qpp,
    Prs,
    Prt,
    Qrs,
}
impl Pattern {
    pub const ALL: [Self; 5] = [Self::Ppp, Self::Qpp, Self::Prs, Self::Prt, Self::Qrs];

    pub fn types(self) -> [StructureType; 3] {
        use StructureType::{P, Q, R, S, T};
        match self {
            Self::Ppp => [P, P, P],
            Self::Qpp => [Q, P, P],
            Self::Prs => [P, R, S],
            Self::Prt => [P, R, T],
            Self::Qrs => [Q, R, S],
        }
    }

    pub fn from_types(types: [StructureType; 3]) -> Option<Self> {
        Self::ALL.into_iter().find(|pattern| pattern.types() == types)
    }

    /// Whether the rows can be told apart by type alone
    pub fn is_ordered(self) -> bool {
        self.types()[1] == StructureType::R
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for kind in self.types() {
            write!(f, "{}", kind.as_char().to_ascii_uppercase())?;
        }
        Ok(())
    }
}

/// The canonical order of the rows of a solution with the given structure
/// types, as the source row of each canonical row, and the pattern that
/// order produces.
///
/// A Q row comes first, then R, then S or T. Without an R row the rows can
/// only be rotated: the rotation starting at the Q row, or at the first row
/// when all are P.
///
/// # Errors
///
/// [`Error::StructuralInvariant`] if the types do not form one of the five
/// patterns
pub fn canonical_order(types: [StructureType; 3]) -> Result<([usize; 3], Pattern)> {
    let mut order = [None; 3];
    for (row, kind) in types.iter().enumerate() {
        match kind {
            StructureType::Q => order[0] = Some(row),
            StructureType::R => order[1] = Some(row),
            StructureType::S | StructureType::T => order[2] = Some(row),
            StructureType::P => {
                if order[0].is_none() {
                    order[0] = Some(row);
                }
            },
        }
    }
    let unrecognised = || illegal(format!("unrecognised structure {types:?}"));
    let order = match order {
        [Some(first), Some(second), Some(third)] => [first, second, third],
        [Some(first), None, None] => rotation(first),
        _ => return Err(unrecognised()),
    };
    let pattern = Pattern::from_types(order.map(|row| types[row])).ok_or_else(unrecognised)?;
    Ok((order, pattern))
}

impl Solution {
    /// Classify each weighing and derive the canonical order of the rows
    ///
    /// # Errors
    ///
    /// Any error from [`groupings`](Self::groupings), or
    /// [`Error::StructuralInvariant`] if the rows do not fit one of the five
    /// patterns
    pub fn analyse_structure(&self) -> Result<Self> {
        if self.stage.contains(Stage::ANALYSED) {
            return Ok(self.clone());
        }
        let grouped = self.groupings()?;
        let groups = grouped
            .groups
            .as_ref()
            .ok_or_else(|| illegal("grouped solution has no groups"))?;
        let structure = [
            Structure::classify(&grouped.weighings[0], groups)?,
            Structure::classify(&grouped.weighings[1], groups)?,
            Structure::classify(&grouped.weighings[2], groups)?,
        ];
        let (order, pattern) = canonical_order(structure.map(|s| s.kind))?;
        let tags = structure.iter().map(ToString::to_string).collect::<Vec<_>>();
        debug!(
            structure = %tags.join(" "),
            ?order,
            %pattern,
            "analysed"
        );
        Ok(Self {
            analysis: Some(Analysis {
                structure,
                order,
                pattern,
            }),
            stage: grouped.stage | Stage::ANALYSED,
            ..grouped
        })
    }
}
