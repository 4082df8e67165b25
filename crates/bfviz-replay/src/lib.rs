//! Bellman-Ford Step Replay
//!
//! Folds a step log into the three views a user pages through:
//! - [`VisGraph`]: node and edge highlights plus per-node distance labels
//! - [`DistanceTable`]: the per-round distance matrix
//! - [`ParentTable`]: the shortest-path parent map
//!
//! Every projection is plain data. Applying a step returns a new value and
//! leaves the previous one untouched, so older snapshots stay valid.
//!
//! # Round Trip
//!
//! For any projection `p` reached by replaying `steps[..k]`,
//! `p.apply_forward(&steps[k]).apply_backward(&steps[k]) == p`.
//!
//! Changes that reference a node or edge missing from the projection are
//! skipped.

use bfviz_engine::Step;
use bfviz_graph::Graph;
use serde::{Deserialize, Serialize};

mod visual;
mod distances;
mod parents;

pub use visual::{VisEdge, VisGraph, VisNode};
pub use distances::DistanceTable;
pub use parents::ParentTable;

/// Which way a step is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Forward,
    Backward,
}

/// A view of the algorithm state that steps can be applied to.
pub trait Projection: Sized {
    /// The state before any step, derived from the graph alone.
    fn reset(graph: &Graph) -> Self;

    /// Write every `new` value the step carries.
    fn apply_forward(&self, step: &Step) -> Self;

    /// Write every `old` value the step carries.
    fn apply_backward(&self, step: &Step) -> Self;

    /// Apply a step in the given direction.
    fn apply(&self, direction: Direction, step: &Step) -> Self {
        match direction {
            Direction::Forward => self.apply_forward(step),
            Direction::Backward => self.apply_backward(step),
        }
    }

    /// Reset, then apply `steps` forward in order.
    fn replay<'a, I>(graph: &Graph, steps: I) -> Self
    where
        I: IntoIterator<Item = &'a Step>,
    {
        steps
            .into_iter()
            .fold(Self::reset(graph), |state, step| state.apply_forward(step))
    }
}
