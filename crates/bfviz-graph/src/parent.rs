//! Shortest-path tree as a parent map.

use std::collections::HashSet;
use std::fmt;

use indexmap::IndexMap;

use crate::graph::Graph;
use crate::node::NodeName;

/// Parent of a vertex in the shortest-path tree.
///
/// On the wire the source's parent is the string `"none"` and any other
/// parent is the bare vertex name. A vertex literally named `none` therefore
/// reads back as [`Parent::Root`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Parent {
    /// The source has no parent
    #[cfg_attr(feature = "serde", serde(rename = "none"))]
    Root,
    /// Reached through this vertex
    #[cfg_attr(feature = "serde", serde(untagged))]
    Node(NodeName),
}

impl fmt::Display for Parent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Parent::Root => f.write_str("none"),
            Parent::Node(node) => write!(f, "{}", node),
        }
    }
}

/// Vertex to parent. A `None` cell is a vertex that was never reached.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ParentMap {
    entries: IndexMap<NodeName, Option<Parent>>,
}

impl ParentMap {
    /// Every vertex of the graph, none of them reached.
    pub fn unset(graph: &Graph) -> Self {
        Self {
            entries: graph.nodes().map(|node| (node.clone(), None)).collect(),
        }
    }

    /// Parent of a vertex, `None` when unset or unknown.
    pub fn get(&self, node: &NodeName) -> Option<&Parent> {
        self.entries.get(node).and_then(Option::as_ref)
    }

    /// Check whether the vertex has a cell.
    pub fn contains(&self, node: &NodeName) -> bool {
        self.entries.contains_key(node)
    }

    /// Write a cell. Unknown vertices are ignored; returns whether the write
    /// happened.
    pub fn set(&mut self, node: &NodeName, parent: Option<Parent>) -> bool {
        match self.entries.get_mut(node) {
            Some(cell) => {
                *cell = parent;
                true
            }
            None => false,
        }
    }

    /// All cells in vertex order.
    pub fn iter(&self) -> impl Iterator<Item = (&NodeName, Option<&Parent>)> {
        self.entries.iter().map(|(node, parent)| (node, parent.as_ref()))
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the map has no vertices.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Walk parents from `node` back to the root.
    ///
    /// Returns the path source-first, or `None` if the vertex is unreached or
    /// the walk loops (only possible with a negative cycle).
    pub fn path_to(&self, node: &NodeName) -> Option<Vec<NodeName>> {
        let mut path = vec![node.clone()];
        let mut seen = HashSet::from([node.clone()]);
        let mut current = node;

        loop {
            match self.get(current)? {
                Parent::Root => break,
                Parent::Node(parent) => {
                    if !seen.insert(parent.clone()) {
                        return None;
                    }
                    path.push(parent.clone());
                    current = parent;
                }
            }
        }

        path.reverse();
        Some(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(name: &str) -> NodeName {
        NodeName::from(name)
    }

    fn chain() -> ParentMap {
        let mut graph = Graph::new();
        graph.add_directed_edge("s", "a", 1);
        graph.add_directed_edge("a", "b", 1);
        graph.add_node("lonely");

        let mut parent = ParentMap::unset(&graph);
        parent.set(&n("s"), Some(Parent::Root));
        parent.set(&n("a"), Some(Parent::Node(n("s"))));
        parent.set(&n("b"), Some(Parent::Node(n("a"))));
        parent
    }

    #[test]
    fn unknown_vertices_are_ignored() {
        let mut parent = chain();
        let before = parent.clone();
        assert!(!parent.set(&n("ghost"), Some(Parent::Root)));
        assert_eq!(parent, before);
    }

    #[test]
    fn path_walks_back_to_root() {
        let parent = chain();
        assert_eq!(parent.path_to(&n("b")), Some(vec![n("s"), n("a"), n("b")]));
        assert_eq!(parent.path_to(&n("s")), Some(vec![n("s")]));
        assert_eq!(parent.path_to(&n("lonely")), None);
    }

    #[test]
    fn path_detects_loops() {
        let mut parent = chain();
        parent.set(&n("a"), Some(Parent::Node(n("b"))));
        assert_eq!(parent.path_to(&n("b")), None);
    }

    #[test]
    fn root_displays_as_none() {
        assert_eq!(Parent::Root.to_string(), "none");
        assert_eq!(Parent::Node(n("q")).to_string(), "q");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn parent_json_form() {
        assert_eq!(serde_json::to_string(&Parent::Root).unwrap(), "\"none\"");
        assert_eq!(serde_json::to_string(&Parent::Node(n("a"))).unwrap(), "\"a\"");

        let parsed: Parent = serde_json::from_str("\"a\"").unwrap();
        assert_eq!(parsed, Parent::Node(n("a")));
        let parsed: Parent = serde_json::from_str("\"none\"").unwrap();
        assert_eq!(parsed, Parent::Root);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn map_json_uses_bare_names() {
        let json = serde_json::to_value(chain()).unwrap();
        assert_eq!(json["s"], "none");
        assert_eq!(json["b"], "a");
        assert!(json["lonely"].is_null());

        let parsed: ParentMap = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, chain());
    }
}
