//! The parent map projection.

use std::ops::Deref;

use bfviz_engine::Step;
use bfviz_graph::{Graph, ParentMap};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::Projection;

/// Parent map as the user sees it while paging through a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParentTable {
    map: ParentMap,
}

impl ParentTable {
    /// The underlying map.
    pub fn map(&self) -> &ParentMap {
        &self.map
    }

    pub fn into_map(self) -> ParentMap {
        self.map
    }
}

impl From<ParentMap> for ParentTable {
    fn from(map: ParentMap) -> Self {
        Self { map }
    }
}

impl Deref for ParentTable {
    type Target = ParentMap;

    fn deref(&self) -> &Self::Target {
        &self.map
    }
}

impl Projection for ParentTable {
    fn reset(graph: &Graph) -> Self {
        ParentMap::unset(graph).into()
    }

    fn apply_forward(&self, step: &Step) -> Self {
        let mut map = self.map.clone();
        for change in &step.parent_changes {
            if !map.set(&change.node, Some(change.new_parent.clone())) {
                trace!(node = %change.node, "skipping parent of unknown node");
            }
        }
        map.into()
    }

    fn apply_backward(&self, step: &Step) -> Self {
        let mut map = self.map.clone();
        for change in &step.parent_changes {
            if !map.set(&change.node, change.old_parent.clone()) {
                trace!(node = %change.node, "skipping parent of unknown node");
            }
        }
        map.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bfviz_engine::{run, ParentChange};
    use bfviz_graph::{build_graph, EdgeSpec, NodeName, Parent};

    fn n(name: &str) -> NodeName {
        NodeName::from(name)
    }

    #[test]
    fn source_gets_root_on_first_step() {
        let graph = build_graph([EdgeSpec::new("s", "t", 1)], "s");
        let result = run(&graph, &n("s"));

        let table = ParentTable::reset(&graph).apply_forward(result.steps.get(0).unwrap());
        assert_eq!(table.get(&n("s")), Some(&Parent::Root));
        assert_eq!(table.get(&n("t")), None);

        let back = table.apply_backward(result.steps.get(0).unwrap());
        assert_eq!(back, ParentTable::reset(&graph));
    }

    #[test]
    fn rewinding_an_update_restores_previous_parent() {
        let graph = build_graph([EdgeSpec::new("a", "b", 1), EdgeSpec::new("c", "b", 1)], "a");
        let first = Step {
            parent_changes: vec![ParentChange {
                node: n("b"),
                new_parent: Parent::Node(n("a")),
                old_parent: None,
            }],
            ..Step::default()
        };
        let second = Step {
            parent_changes: vec![ParentChange {
                node: n("b"),
                new_parent: Parent::Node(n("c")),
                old_parent: Some(Parent::Node(n("a"))),
            }],
            ..Step::default()
        };

        let table = ParentTable::reset(&graph).apply_forward(&first).apply_forward(&second);
        assert_eq!(table.get(&n("b")), Some(&Parent::Node(n("c"))));

        let back = table.apply_backward(&second);
        assert_eq!(back.get(&n("b")), Some(&Parent::Node(n("a"))));
    }

    #[test]
    fn unknown_nodes_are_skipped() {
        let graph = build_graph([EdgeSpec::new("a", "b", 1)], "a");
        let table = ParentTable::reset(&graph);
        let step = Step {
            parent_changes: vec![ParentChange {
                node: n("ghost"),
                new_parent: Parent::Root,
                old_parent: None,
            }],
            ..Step::default()
        };
        assert_eq!(table.apply_forward(&step), table);
    }

    #[test]
    fn wire_form_is_a_plain_map() {
        let graph = build_graph([EdgeSpec::new("a", "b", 1)], "a");
        let result = run(&graph, &n("a"));
        let table = ParentTable::replay(&graph, &result.steps);

        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(json["a"], "none");
        assert_eq!(json["b"], "a");
    }
}
