//! The distance matrix projection.

use std::fmt;
use std::ops::Deref;

use bfviz_engine::Step;
use bfviz_graph::{DistanceMatrix, Graph};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::Projection;

/// Distance matrix as the user sees it while paging through a run.
///
/// Rewinding a change with no old value clears the cell, so "not computed"
/// stays distinct from `0` and `inf`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DistanceTable {
    matrix: DistanceMatrix,
}

impl DistanceTable {
    /// The underlying matrix.
    pub fn matrix(&self) -> &DistanceMatrix {
        &self.matrix
    }

    pub fn into_matrix(self) -> DistanceMatrix {
        self.matrix
    }
}

impl From<DistanceMatrix> for DistanceTable {
    fn from(matrix: DistanceMatrix) -> Self {
        Self { matrix }
    }
}

impl Deref for DistanceTable {
    type Target = DistanceMatrix;

    fn deref(&self) -> &Self::Target {
        &self.matrix
    }
}

impl fmt::Display for DistanceTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.matrix, f)
    }
}

impl Projection for DistanceTable {
    fn reset(graph: &Graph) -> Self {
        DistanceMatrix::unset(graph).into()
    }

    fn apply_forward(&self, step: &Step) -> Self {
        let mut matrix = self.matrix.clone();
        for change in &step.distance_changes {
            if !matrix.set(change.iteration, &change.node, Some(change.new_value)) {
                trace!(iteration = change.iteration, node = %change.node, "skipping unknown cell");
            }
        }
        matrix.into()
    }

    fn apply_backward(&self, step: &Step) -> Self {
        let mut matrix = self.matrix.clone();
        for change in &step.distance_changes {
            if !matrix.set(change.iteration, &change.node, change.old_value) {
                trace!(iteration = change.iteration, node = %change.node, "skipping unknown cell");
            }
        }
        matrix.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bfviz_engine::{run, DistanceChange};
    use bfviz_graph::{build_graph, Distance, EdgeSpec, NodeName};

    fn n(name: &str) -> NodeName {
        NodeName::from(name)
    }

    fn change(iteration: usize, node: &str, new_value: i64, old_value: Option<Distance>) -> Step {
        Step {
            distance_changes: vec![DistanceChange {
                iteration,
                node: n(node),
                new_value: Distance::Finite(new_value),
                old_value,
            }],
            ..Step::default()
        }
    }

    #[test]
    fn reset_allocates_unset_columns() {
        let graph = build_graph([EdgeSpec::new("a", "b", 1), EdgeSpec::new("c", "b", 1)], "a");
        let table = DistanceTable::reset(&graph);

        assert_eq!(table.column_count(), 3);
        for node in ["a", "b", "c"] {
            assert_eq!(table.row(&n(node)), vec![None, None, None]);
        }
    }

    #[test]
    fn backward_without_old_value_clears() {
        let graph = build_graph([EdgeSpec::new("a", "b", 1)], "a");
        let step = change(0, "a", 0, None);

        let forward = DistanceTable::reset(&graph).apply_forward(&step);
        assert_eq!(forward.get(0, &n("a")), Some(Distance::ZERO));

        let back = forward.apply_backward(&step);
        assert_eq!(back.get(0, &n("a")), None);
        assert_eq!(back, DistanceTable::reset(&graph));
    }

    #[test]
    fn backward_restores_old_value() {
        let graph = build_graph([EdgeSpec::new("a", "b", 1)], "a");
        let table = DistanceTable::reset(&graph).apply_forward(&change(1, "b", 9, None));
        let step = change(1, "b", 4, Some(Distance::Finite(9)));

        let forward = table.apply_forward(&step);
        assert_eq!(forward.get(1, &n("b")), Some(Distance::Finite(4)));
        assert_eq!(forward.apply_backward(&step).get(1, &n("b")), Some(Distance::Finite(9)));
    }

    #[test]
    fn out_of_range_cells_are_skipped() {
        let graph = build_graph([EdgeSpec::new("a", "b", 1)], "a");
        let table = DistanceTable::reset(&graph);

        assert_eq!(table.apply_forward(&change(5, "a", 1, None)), table);
        assert_eq!(table.apply_forward(&change(0, "zz", 1, None)), table);
    }

    #[test]
    fn unreachable_vertex_renders_blank() {
        let graph = build_graph(
            [EdgeSpec::new("s", "a", 2), EdgeSpec::new("lost", "a", 1)],
            "s",
        );
        let result = run(&graph, &n("s"));
        let table = DistanceTable::replay(&graph, &result.steps);

        assert_eq!(table.row(&n("lost")), vec![Some(Distance::Infinite); 3]);
        let text = table.to_string();
        assert!(text.lines().any(|line| line.starts_with("lost") && line.contains("inf")));

        // Before the first step every cell is blank.
        let blank = DistanceTable::reset(&graph).to_string();
        assert!(!blank.contains("inf"));
    }
}
