//! Bellman-Ford with step recording.
//!
//! The recorder runs the relaxation rounds once and, besides the final tables,
//! emits a step for every observable transition:
//!
//! 1. Initialization: source highlighted, column 0 filled, source parent set
//! 2. Per round `i` in `1..n`:
//!    - carry column `i - 1` over into column `i`
//!    - per edge `(u, v)`: visit, then either accept (update `v`) or reject,
//!      then revert the highlights back to normal
//!
//! Candidates are computed from column `i - 1`, so round `i` only sees paths
//! of at most `i` edges. Ties never update. Negative cycles are not detected;
//! the rounds simply stop after `n - 1`.

use bfviz_graph::{Distance, DistanceColumn, DistanceMatrix, Graph, NodeName, Parent, ParentMap};
use tracing::{debug, trace, warn};

use crate::log::StepLog;
use crate::step::{DistanceChange, EdgeChange, EdgeStatus, NodeChange, NodeStatus, ParentChange, Step};

/// Everything one run produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BellmanFordRun {
    /// Replayable log of every transition
    pub steps: StepLog,
    /// Distance per round, fully computed
    pub distances: DistanceMatrix,
    /// Final shortest-path tree
    pub parent: ParentMap,
}

impl BellmanFordRun {
    /// Distances after the final round.
    pub fn final_distances(&self) -> Option<&DistanceColumn> {
        self.distances.last_column()
    }

    /// Path from the source to `node` along the final parent map.
    pub fn path_to(&self, node: &NodeName) -> Option<Vec<NodeName>> {
        self.parent.path_to(node)
    }
}

/// Run Bellman-Ford from `source`, recording every step.
///
/// `source` must be a vertex of `graph`. For an unknown source the log holds
/// only the initialization step and no round runs.
pub fn run(graph: &Graph, source: &NodeName) -> BellmanFordRun {
    StepRecorder::new(graph, source).record()
}

/// Accumulates steps while mutating its own copy of the tables.
struct StepRecorder<'g> {
    graph: &'g Graph,
    source: &'g NodeName,
    steps: Vec<Step>,
    distances: DistanceMatrix,
    parent: ParentMap,
}

impl<'g> StepRecorder<'g> {
    fn new(graph: &'g Graph, source: &'g NodeName) -> Self {
        let rounds = graph.vertex_count().saturating_sub(1);
        let edges = graph.distinct_edge_count();
        Self {
            graph,
            source,
            steps: Vec::with_capacity(1 + rounds * (1 + 3 * edges)),
            distances: DistanceMatrix::unset(graph),
            parent: ParentMap::unset(graph),
        }
    }

    fn record(mut self) -> BellmanFordRun {
        debug!(
            vertices = self.graph.vertex_count(),
            edges = self.graph.distinct_edge_count(),
            source = %self.source,
            "recording Bellman-Ford run"
        );

        self.initialize();

        if self.graph.contains(self.source) {
            for iteration in 1..self.graph.vertex_count() {
                self.carry_over(iteration);
                self.relax_all(iteration);
            }
        } else {
            warn!(source = %self.source, "source is not a vertex, skipping relaxation");
        }

        debug!(steps = self.steps.len(), "recorded Bellman-Ford run");

        BellmanFordRun {
            steps: self.steps.into(),
            distances: self.distances,
            parent: self.parent,
        }
    }

    fn initialize(&mut self) {
        let graph = self.graph;
        let mut distance_changes = Vec::with_capacity(graph.vertex_count());

        for node in graph.nodes() {
            let value = if node == self.source {
                Distance::ZERO
            } else {
                Distance::Infinite
            };
            let old_value = self.distances.get(0, node);
            self.distances.set(0, node, Some(value));
            distance_changes.push(DistanceChange {
                iteration: 0,
                node: node.clone(),
                new_value: value,
                old_value,
            });
        }

        let old_parent = self.parent.get(self.source).cloned();
        self.parent.set(self.source, Some(Parent::Root));

        self.steps.push(Step {
            node_changes: vec![NodeChange {
                node: self.source.clone(),
                new_status: NodeStatus::Source,
                old_status: NodeStatus::Normal,
            }],
            distance_changes,
            parent_changes: vec![ParentChange {
                node: self.source.clone(),
                new_parent: Parent::Root,
                old_parent,
            }],
            ..Step::default()
        });
    }

    fn carry_over(&mut self, iteration: usize) {
        let graph = self.graph;
        let mut distance_changes = Vec::with_capacity(graph.vertex_count());

        for node in graph.nodes() {
            let value = self
                .distances
                .get(iteration - 1, node)
                .unwrap_or(Distance::Infinite);
            let old_value = self.distances.get(iteration, node);
            self.distances.set(iteration, node, Some(value));
            distance_changes.push(DistanceChange {
                iteration,
                node: node.clone(),
                new_value: value,
                old_value,
            });
        }

        self.steps.push(Step {
            distance_changes,
            ..Step::default()
        });
    }

    fn relax_all(&mut self, iteration: usize) {
        let graph = self.graph;

        for edge in graph.edges() {
            self.steps.push(edge_step(edge.from, edge.to, EdgeStatus::Visiting, EdgeStatus::Normal));

            let candidate = self
                .distances
                .get(iteration - 1, edge.from)
                .unwrap_or(Distance::Infinite)
                .extend(edge.weight);
            let current = self
                .distances
                .get(iteration, edge.to)
                .unwrap_or(Distance::Infinite);

            if candidate < current {
                trace!(iteration, from = %edge.from, to = %edge.to, %candidate, %current, "accept");
                self.accept(iteration, edge.from, edge.to, candidate, current);
            } else {
                trace!(iteration, from = %edge.from, to = %edge.to, %candidate, %current, "reject");
                self.steps.push(edge_step(edge.from, edge.to, EdgeStatus::Rejected, EdgeStatus::Visiting));
                self.steps.push(edge_step(edge.from, edge.to, EdgeStatus::Normal, EdgeStatus::Rejected));
            }
        }
    }

    fn accept(
        &mut self,
        iteration: usize,
        from: &NodeName,
        to: &NodeName,
        candidate: Distance,
        current: Distance,
    ) {
        let old_parent = self.parent.get(to).cloned();
        self.distances.set(iteration, to, Some(candidate));
        self.parent.set(to, Some(Parent::Node(from.clone())));

        self.steps.push(Step {
            node_changes: vec![NodeChange {
                node: to.clone(),
                new_status: NodeStatus::Updated,
                old_status: NodeStatus::Normal,
            }],
            edge_changes: vec![EdgeChange {
                from: from.clone(),
                to: to.clone(),
                new_status: EdgeStatus::Updated,
                old_status: EdgeStatus::Visiting,
            }],
            distance_changes: vec![DistanceChange {
                iteration,
                node: to.clone(),
                new_value: candidate,
                old_value: Some(current),
            }],
            parent_changes: vec![ParentChange {
                node: to.clone(),
                new_parent: Parent::Node(from.clone()),
                old_parent,
            }],
        });

        self.steps.push(Step {
            node_changes: vec![NodeChange {
                node: to.clone(),
                new_status: NodeStatus::Normal,
                old_status: NodeStatus::Updated,
            }],
            edge_changes: vec![EdgeChange {
                from: from.clone(),
                to: to.clone(),
                new_status: EdgeStatus::Normal,
                old_status: EdgeStatus::Updated,
            }],
            ..Step::default()
        });
    }
}

fn edge_step(from: &NodeName, to: &NodeName, new_status: EdgeStatus, old_status: EdgeStatus) -> Step {
    Step {
        edge_changes: vec![EdgeChange {
            from: from.clone(),
            to: to.clone(),
            new_status,
            old_status,
        }],
        ..Step::default()
    }
}
