//! The visual graph: highlights and distance labels.

use std::collections::BTreeMap;

use bfviz_engine::{EdgeStatus, NodeStatus, Step};
use bfviz_graph::{Distance, Graph, NodeName};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use tracing::trace;

use crate::Projection;

/// A vertex as drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisNode {
    pub id: NodeName,
    pub status: NodeStatus,
    /// Distance seen per round
    pub distances: BTreeMap<usize, Distance>,
}

impl VisNode {
    fn new(id: NodeName) -> Self {
        Self {
            id,
            status: NodeStatus::Normal,
            distances: BTreeMap::new(),
        }
    }

    /// Distance of the latest round this vertex has a value for.
    pub fn distance(&self) -> Option<Distance> {
        self.distances.values().next_back().copied()
    }

    /// `"<id> : <distance>"`, or just the id before any distance is known.
    pub fn label(&self) -> String {
        match self.distance() {
            Some(d) => format!("{} : {}", self.id, d),
            None => self.id.to_string(),
        }
    }
}

impl Serialize for VisNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut node = serializer.serialize_struct("VisNode", 5)?;
        node.serialize_field("id", &self.id)?;
        node.serialize_field("label", &self.label())?;
        node.serialize_field("status", &self.status)?;
        node.serialize_field("color", self.status.color())?;
        node.serialize_field("distances", &self.distances)?;
        node.end()
    }
}

/// An edge as drawn, labelled with its weight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisEdge {
    pub from: NodeName,
    pub to: NodeName,
    pub weight: i64,
    pub status: EdgeStatus,
}

impl Serialize for VisEdge {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut edge = serializer.serialize_struct("VisEdge", 6)?;
        edge.serialize_field("from", &self.from)?;
        edge.serialize_field("to", &self.to)?;
        edge.serialize_field("weight", &self.weight)?;
        edge.serialize_field("label", &self.weight.to_string())?;
        edge.serialize_field("status", &self.status)?;
        edge.serialize_field("color", self.status.color())?;
        edge.end()
    }
}

/// Nodes and edges in graph insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VisGraph {
    nodes: Vec<VisNode>,
    edges: Vec<VisEdge>,
}

impl VisGraph {
    /// All vertices.
    pub fn nodes(&self) -> &[VisNode] {
        &self.nodes
    }

    /// All edges.
    pub fn edges(&self) -> &[VisEdge] {
        &self.edges
    }

    /// Look up a vertex.
    pub fn node(&self, id: &NodeName) -> Option<&VisNode> {
        self.nodes.iter().find(|node| &node.id == id)
    }

    /// Look up an edge.
    pub fn edge(&self, from: &NodeName, to: &NodeName) -> Option<&VisEdge> {
        self.edges
            .iter()
            .find(|edge| &edge.from == from && &edge.to == to)
    }

    fn node_mut(&mut self, id: &NodeName) -> Option<&mut VisNode> {
        self.nodes.iter_mut().find(|node| &node.id == id)
    }

    fn edge_mut(&mut self, from: &NodeName, to: &NodeName) -> Option<&mut VisEdge> {
        self.edges
            .iter_mut()
            .find(|edge| &edge.from == from && &edge.to == to)
    }

    fn set_status(&mut self, id: &NodeName, status: NodeStatus) {
        match self.node_mut(id) {
            Some(node) => node.status = status,
            None => trace!(node = %id, "skipping status of unknown node"),
        }
    }

    fn set_edge_status(&mut self, from: &NodeName, to: &NodeName, status: EdgeStatus) {
        match self.edge_mut(from, to) {
            Some(edge) => edge.status = status,
            None => trace!(%from, %to, "skipping status of unknown edge"),
        }
    }

    fn set_distance(&mut self, id: &NodeName, iteration: usize, value: Option<Distance>) {
        let Some(node) = self.node_mut(id) else {
            trace!(node = %id, "skipping distance of unknown node");
            return;
        };
        match value {
            Some(d) => {
                node.distances.insert(iteration, d);
            }
            None => {
                node.distances.remove(&iteration);
            }
        }
    }
}

impl Projection for VisGraph {
    fn reset(graph: &Graph) -> Self {
        Self {
            nodes: graph.nodes().cloned().map(VisNode::new).collect(),
            edges: graph
                .edges()
                .map(|edge| VisEdge {
                    from: edge.from.clone(),
                    to: edge.to.clone(),
                    weight: edge.weight,
                    status: EdgeStatus::Normal,
                })
                .collect(),
        }
    }

    fn apply_forward(&self, step: &Step) -> Self {
        let mut next = self.clone();
        for change in &step.node_changes {
            next.set_status(&change.node, change.new_status);
        }
        for change in &step.edge_changes {
            next.set_edge_status(&change.from, &change.to, change.new_status);
        }
        for change in &step.distance_changes {
            next.set_distance(&change.node, change.iteration, Some(change.new_value));
        }
        next
    }

    fn apply_backward(&self, step: &Step) -> Self {
        let mut prev = self.clone();
        for change in &step.node_changes {
            prev.set_status(&change.node, change.old_status);
        }
        for change in &step.edge_changes {
            prev.set_edge_status(&change.from, &change.to, change.old_status);
        }
        for change in &step.distance_changes {
            prev.set_distance(&change.node, change.iteration, change.old_value);
        }
        prev
    }
}
