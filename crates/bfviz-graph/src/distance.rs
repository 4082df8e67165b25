//! Distances and the per-round distance matrix.

use std::fmt;

use indexmap::IndexMap;

use crate::graph::Graph;
use crate::node::NodeName;

/// Best known distance from the source.
///
/// Every finite value orders below [`Distance::Infinite`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Distance {
    /// Reached with this total weight
    Finite(i64),
    /// Not reached (yet)
    Infinite,
}

impl Distance {
    /// Distance of the source to itself.
    pub const ZERO: Self = Self::Finite(0);

    /// Check whether the vertex has been reached.
    pub fn is_finite(&self) -> bool {
        matches!(self, Self::Finite(_))
    }

    /// The finite value, if any.
    pub fn finite(&self) -> Option<i64> {
        match self {
            Self::Finite(d) => Some(*d),
            Self::Infinite => None,
        }
    }

    /// Length of a path that extends this one by an edge of `weight`.
    ///
    /// Infinity absorbs any weight. Finite sums saturate.
    pub fn extend(self, weight: i64) -> Self {
        match self {
            Self::Finite(d) => Self::Finite(d.saturating_add(weight)),
            Self::Infinite => Self::Infinite,
        }
    }
}

impl From<i64> for Distance {
    fn from(d: i64) -> Self {
        Self::Finite(d)
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Finite(d) => write!(f, "{}", d),
            Self::Infinite => f.write_str("inf"),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Distance {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Finite(d) => serializer.serialize_i64(*d),
            Self::Infinite => serializer.serialize_str("inf"),
        }
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Distance {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Value(i64),
            Text(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Value(d) => Ok(Self::Finite(d)),
            Repr::Text(text) if text == "inf" => Ok(Self::Infinite),
            Repr::Text(text) => Err(serde::de::Error::custom(format!(
                "invalid distance {:?}, expected an integer or \"inf\"",
                text
            ))),
        }
    }
}

/// One round of the matrix. `None` is a cell that has not been computed.
pub type DistanceColumn = IndexMap<NodeName, Option<Distance>>;

/// Distances per relaxation round.
///
/// Column `i` holds the distances after round `i`; column 0 is the
/// initialization. A graph with `n` vertices has `n` columns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DistanceMatrix {
    columns: Vec<DistanceColumn>,
}

impl DistanceMatrix {
    /// Allocate one column per vertex, every cell unset.
    pub fn unset(graph: &Graph) -> Self {
        let column: DistanceColumn = graph.nodes().map(|node| (node.clone(), None)).collect();
        Self {
            columns: vec![column; graph.vertex_count()],
        }
    }

    /// Number of columns (rounds including initialization).
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// All columns in round order.
    pub fn columns(&self) -> &[DistanceColumn] {
        &self.columns
    }

    /// A single column.
    pub fn column(&self, iteration: usize) -> Option<&DistanceColumn> {
        self.columns.get(iteration)
    }

    /// The last column, i.e. the result after the final round.
    pub fn last_column(&self) -> Option<&DistanceColumn> {
        self.columns.last()
    }

    /// Value of a cell, `None` when unset or out of range.
    pub fn get(&self, iteration: usize, node: &NodeName) -> Option<Distance> {
        self.columns
            .get(iteration)
            .and_then(|column| column.get(node))
            .copied()
            .flatten()
    }

    /// Write a cell.
    ///
    /// Cells outside the allocated rounds or for unknown vertices are left
    /// alone; returns whether the write happened.
    pub fn set(&mut self, iteration: usize, node: &NodeName, value: Option<Distance>) -> bool {
        match self
            .columns
            .get_mut(iteration)
            .and_then(|column| column.get_mut(node))
        {
            Some(cell) => {
                *cell = value;
                true
            }
            None => false,
        }
    }

    /// Every round's value for one vertex.
    pub fn row(&self, node: &NodeName) -> Vec<Option<Distance>> {
        self.columns
            .iter()
            .map(|column| column.get(node).copied().flatten())
            .collect()
    }

    /// Vertices in row order.
    pub fn nodes(&self) -> impl Iterator<Item = &NodeName> {
        self.columns.first().into_iter().flat_map(|column| column.keys())
    }
}

/// Plain-text table: one row per vertex, one column per round.
impl fmt::Display for DistanceMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = 6;

        write!(f, "{:<width$}", "node")?;
        for iteration in 0..self.columns.len() {
            write!(f, "|{:>width$}", iteration)?;
        }
        writeln!(f)?;

        for node in self.nodes() {
            write!(f, "{:<width$}", node.as_str())?;
            for cell in self.row(node) {
                match cell {
                    Some(d) => write!(f, "|{:>width$}", d.to_string())?,
                    None => write!(f, "|{:>width$}", "")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
