//! Step records: the replayable unit of change.
//!
//! Every change records both the value it writes and the value it replaces,
//! so a step can be applied forward or undone backward. Sub-lists of one step
//! touch disjoint slots and commute.

use bfviz_graph::{Distance, NodeName, Parent};
use serde::{Deserialize, Serialize};

/// Highlight state of a vertex.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeStatus {
    #[default]
    Normal,
    Updated,
    Source,
}

impl NodeStatus {
    /// Display color of the status.
    pub fn color(&self) -> &'static str {
        match self {
            NodeStatus::Normal => "#2F2F2F",
            NodeStatus::Updated => "#4CAF50",
            NodeStatus::Source => "#2196F3",
        }
    }
}

/// Highlight state of an edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeStatus {
    #[default]
    Normal,
    Visiting,
    Updated,
    Rejected,
}

impl EdgeStatus {
    /// Display color of the status.
    pub fn color(&self) -> &'static str {
        match self {
            EdgeStatus::Normal => "#2F2F2F",
            EdgeStatus::Visiting => "#FFC107",
            EdgeStatus::Updated => "#4CAF50",
            EdgeStatus::Rejected => "#F4511E",
        }
    }
}

/// A vertex changes highlight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeChange {
    pub node: NodeName,
    pub new_status: NodeStatus,
    pub old_status: NodeStatus,
}

/// An edge changes highlight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeChange {
    pub from: NodeName,
    pub to: NodeName,
    pub new_status: EdgeStatus,
    pub old_status: EdgeStatus,
}

/// A distance-matrix cell is written.
///
/// `old_value` is `None` when the cell had not been computed before.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistanceChange {
    pub iteration: usize,
    pub node: NodeName,
    pub new_value: Distance,
    #[serde(default)]
    pub old_value: Option<Distance>,
}

/// A parent-map cell is written.
///
/// `old_parent` is `None` when the vertex had no parent recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParentChange {
    pub node: NodeName,
    pub new_parent: Parent,
    #[serde(default)]
    pub old_parent: Option<Parent>,
}

/// One atomic, reversible bundle of changes.
///
/// Absent sub-lists are empty; they are omitted on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub node_changes: Vec<NodeChange>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub edge_changes: Vec<EdgeChange>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub distance_changes: Vec<DistanceChange>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parent_changes: Vec<ParentChange>,
}

/// What a step shows, derived from its changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    /// Source marked, column 0 filled, source parent set
    Initialize,
    /// A new column copied from the previous one
    CarryOver,
    /// An edge is being examined
    Visit,
    /// The edge improved its destination
    Accept,
    /// The edge did not improve its destination
    Reject,
    /// Highlights return to normal
    Revert,
    /// Anything else (hand-built steps)
    Other,
}

impl Step {
    /// Check whether the step carries no changes at all.
    pub fn is_empty(&self) -> bool {
        self.node_changes.is_empty()
            && self.edge_changes.is_empty()
            && self.distance_changes.is_empty()
            && self.parent_changes.is_empty()
    }

    /// Classify the step by the changes it carries.
    pub fn kind(&self) -> StepKind {
        if self
            .node_changes
            .iter()
            .any(|c| c.new_status == NodeStatus::Source)
        {
            return StepKind::Initialize;
        }

        if let Some(edge) = self.edge_changes.first() {
            return match edge.new_status {
                EdgeStatus::Visiting => StepKind::Visit,
                EdgeStatus::Updated => StepKind::Accept,
                EdgeStatus::Rejected => StepKind::Reject,
                EdgeStatus::Normal => StepKind::Revert,
            };
        }

        if !self.distance_changes.is_empty()
            && self.node_changes.is_empty()
            && self.parent_changes.is_empty()
        {
            return StepKind::CarryOver;
        }

        StepKind::Other
    }

    /// One-line description for logs and captions.
    pub fn describe(&self) -> String {
        match self.kind() {
            StepKind::Initialize => match self.node_changes.first() {
                Some(c) => format!("initialize from source {}", c.node),
                None => "initialize".to_string(),
            },
            StepKind::CarryOver => match self.distance_changes.first() {
                Some(c) => format!("start iteration {}", c.iteration),
                None => "start iteration".to_string(),
            },
            kind => match (self.edge_changes.first(), kind) {
                (Some(e), StepKind::Visit) => format!("visit edge {} -> {}", e.from, e.to),
                (Some(e), StepKind::Accept) => match self.distance_changes.first() {
                    Some(d) => format!("relax edge {} -> {}: {} = {}", e.from, e.to, d.node, d.new_value),
                    None => format!("relax edge {} -> {}", e.from, e.to),
                },
                (Some(e), StepKind::Reject) => format!("keep {}: edge {} -> {} is no shorter", e.to, e.from, e.to),
                (Some(e), StepKind::Revert) => format!("settle edge {} -> {}", e.from, e.to),
                _ => "change".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(name: &str) -> NodeName {
        NodeName::from(name)
    }

    fn accept_step() -> Step {
        Step {
            node_changes: vec![NodeChange {
                node: n("b"),
                new_status: NodeStatus::Updated,
                old_status: NodeStatus::Normal,
            }],
            edge_changes: vec![EdgeChange {
                from: n("a"),
                to: n("b"),
                new_status: EdgeStatus::Updated,
                old_status: EdgeStatus::Visiting,
            }],
            distance_changes: vec![DistanceChange {
                iteration: 1,
                node: n("b"),
                new_value: Distance::Finite(3),
                old_value: Some(Distance::Infinite),
            }],
            parent_changes: vec![ParentChange {
                node: n("b"),
                new_parent: Parent::Node(n("a")),
                old_parent: None,
            }],
        }
    }

    #[test]
    fn wire_field_names() {
        let json = serde_json::to_value(accept_step()).unwrap();

        assert_eq!(json["nodeChanges"][0]["newStatus"], "updated");
        assert_eq!(json["nodeChanges"][0]["oldStatus"], "normal");
        assert_eq!(json["edgeChanges"][0]["from"], "a");
        assert_eq!(json["edgeChanges"][0]["oldStatus"], "visiting");
        assert_eq!(json["distanceChanges"][0]["iteration"], 1);
        assert_eq!(json["distanceChanges"][0]["newValue"], 3);
        assert_eq!(json["distanceChanges"][0]["oldValue"], "inf");
        assert_eq!(json["parentChanges"][0]["newParent"], "a");
        assert!(json["parentChanges"][0]["oldParent"].is_null());
    }

    #[test]
    fn empty_sub_lists_are_omitted() {
        let step = Step {
            edge_changes: accept_step().edge_changes,
            ..Step::default()
        };
        let json = serde_json::to_string(&step).unwrap();
        assert!(!json.contains("nodeChanges"));
        assert!(!json.contains("distanceChanges"));

        let parsed: Step = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, step);
        assert!(parsed.node_changes.is_empty());
    }

    #[test]
    fn classifies_steps() {
        assert_eq!(accept_step().kind(), StepKind::Accept);
        assert_eq!(Step::default().kind(), StepKind::Other);
        assert!(Step::default().is_empty());

        let carry = Step {
            distance_changes: accept_step().distance_changes,
            ..Step::default()
        };
        assert_eq!(carry.kind(), StepKind::CarryOver);
        assert_eq!(carry.describe(), "start iteration 1");
    }

    #[test]
    fn describes_relaxation() {
        assert_eq!(accept_step().describe(), "relax edge a -> b: b = 3");
    }

    #[test]
    fn status_colors() {
        assert_eq!(NodeStatus::Source.color(), "#2196F3");
        assert_eq!(EdgeStatus::Visiting.color(), "#FFC107");
        assert_eq!(EdgeStatus::Normal.color(), NodeStatus::Normal.color());
    }
}
