//! Adjacency-map graph model.

use indexmap::IndexMap;

use crate::node::NodeName;

/// A directed weighted graph with an optional source vertex.
///
/// Vertices and edges iterate in insertion order. Every edge endpoint is a key
/// of the adjacency map, possibly with no outgoing edges.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Graph {
    vertex_count: usize,
    edge_count: usize,
    adjacency: IndexMap<NodeName, IndexMap<NodeName, i64>>,
    source: Option<NodeName>,
}

/// A borrowed view of one directed edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge<'a> {
    pub from: &'a NodeName,
    pub to: &'a NodeName,
    pub weight: i64,
}

/// An edge as entered by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeSpec {
    pub src: NodeName,
    pub dest: NodeName,
    pub weight: i64,
}

impl EdgeSpec {
    /// Create an edge record.
    pub fn new(src: impl Into<NodeName>, dest: impl Into<NodeName>, weight: i64) -> Self {
        Self {
            src: src.into(),
            dest: dest.into(),
            weight,
        }
    }
}

impl Graph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a vertex if it is not present yet.
    ///
    /// Returns `true` on first insertion.
    pub fn add_node(&mut self, node: impl Into<NodeName>) -> bool {
        let node = node.into();
        if self.adjacency.contains_key(&node) {
            return false;
        }
        self.adjacency.insert(node, IndexMap::new());
        self.vertex_count += 1;
        true
    }

    /// Add the edge `src -> dest`, inserting both endpoints as needed.
    ///
    /// Re-adding an ordered pair overwrites its weight. The edge count still
    /// increments; see [`Graph::distinct_edge_count`] for the pair count.
    pub fn add_directed_edge(
        &mut self,
        src: impl Into<NodeName>,
        dest: impl Into<NodeName>,
        weight: i64,
    ) {
        let src = src.into();
        let dest = dest.into();
        self.add_node(src.clone());
        self.add_node(dest.clone());

        if let Some(successors) = self.adjacency.get_mut(&src) {
            successors.insert(dest, weight);
        }
        self.edge_count += 1;
    }

    /// Designate the source vertex.
    ///
    /// Unknown vertices are silently rejected and the previous source is kept.
    /// Returns whether the source was accepted.
    pub fn set_source(&mut self, source: impl Into<NodeName>) -> bool {
        let source = source.into();
        if !self.adjacency.contains_key(&source) {
            return false;
        }
        self.source = Some(source);
        true
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Number of `add_directed_edge` calls, overwrites included.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Number of distinct ordered pairs with an edge.
    pub fn distinct_edge_count(&self) -> usize {
        self.adjacency.values().map(IndexMap::len).sum()
    }

    /// The designated source, if one was accepted.
    pub fn source(&self) -> Option<&NodeName> {
        self.source.as_ref()
    }

    /// Check whether a vertex exists.
    pub fn contains(&self, node: &NodeName) -> bool {
        self.adjacency.contains_key(node)
    }

    /// Vertices in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &NodeName> {
        self.adjacency.keys()
    }

    /// Outgoing edges of a vertex, keyed by destination.
    pub fn successors(&self, node: &NodeName) -> Option<&IndexMap<NodeName, i64>> {
        self.adjacency.get(node)
    }

    /// Weight of `from -> to`, if that edge exists.
    pub fn weight(&self, from: &NodeName, to: &NodeName) -> Option<i64> {
        self.adjacency.get(from).and_then(|s| s.get(to)).copied()
    }

    /// All edges, grouped by source vertex in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = Edge<'_>> {
        self.adjacency.iter().flat_map(|(from, successors)| {
            successors
                .iter()
                .map(move |(to, &weight)| Edge { from, to, weight })
        })
    }

    /// The full adjacency map.
    pub fn adjacency(&self) -> &IndexMap<NodeName, IndexMap<NodeName, i64>> {
        &self.adjacency
    }
}

/// Build a graph from edge records and designate `source`.
///
/// Nothing is validated here: the source is dropped silently when it is not a
/// vertex, so callers that must report that check membership first.
pub fn build_graph<I>(edges: I, source: impl Into<NodeName>) -> Graph
where
    I: IntoIterator<Item = EdgeSpec>,
{
    let mut graph = Graph::new();
    for edge in edges {
        graph.add_directed_edge(edge.src, edge.dest, edge.weight);
    }
    graph.set_source(source);
    graph
}
