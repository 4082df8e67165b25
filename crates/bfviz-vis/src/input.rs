//! Edge-list input and validation.
//!
//! One edge per line as `src, dest, weight`. Blank lines and lines starting
//! with `#` are skipped. Names are ASCII alphanumeric; weights are signed
//! integers.

use std::collections::HashSet;

use bfviz_graph::{build_graph, EdgeSpec, Graph, NodeName};
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Source of the built-in graph.
pub const DEFAULT_SOURCE: &str = "1";

/// Most vertices a loaded graph may have.
///
/// The distance matrix holds `V * V` cells and every step copies it.
pub const MAX_VERTICES: usize = 64;

/// Most edge records a loaded graph may have. A run records
/// `1 + (V - 1) * (1 + 3E)` steps.
pub const MAX_EDGES: usize = 256;

/// The graph loaded when no edge list is given.
pub fn default_edges() -> Vec<EdgeSpec> {
    vec![
        EdgeSpec::new(1, 2, 4),
        EdgeSpec::new(1, 4, 5),
        EdgeSpec::new(4, 3, 3),
        EdgeSpec::new(3, 2, -10),
        EdgeSpec::new(2, 4, 5),
    ]
}

/// Parse an edge list.
///
/// Errors carry the 1-based line number.
pub fn parse_edges(text: &str) -> Result<Vec<EdgeSpec>> {
    let mut edges = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = trimmed.split(',').map(str::trim).collect();
        let [src, dest, weight] = fields[..] else {
            return Err(Error::MalformedLine {
                line,
                content: trimmed.to_string(),
            });
        };

        edges.push(EdgeSpec::new(
            parse_name(line, src)?,
            parse_name(line, dest)?,
            parse_weight(line, weight)?,
        ));
    }

    Ok(edges)
}

/// Parse an edge list and build its graph from `source`.
pub fn load_graph(text: &str, source: &str) -> Result<Graph> {
    let edges = parse_edges(text).inspect_err(|err| warn!(error = %err, "rejected edge list"))?;
    graph_from_edges(edges, source)
}

/// Validate edge records and build their graph from `source`.
///
/// Records are numbered from 1 in error messages, as lines would be. Graphs
/// beyond [`MAX_VERTICES`] or [`MAX_EDGES`] are rejected before anything is
/// allocated for them.
pub fn graph_from_edges(edges: Vec<EdgeSpec>, source: &str) -> Result<Graph> {
    if edges.is_empty() {
        return Err(Error::EmptyGraph);
    }
    if edges.len() > MAX_EDGES {
        warn!(edges = edges.len(), limit = MAX_EDGES, "rejected oversized graph");
        return Err(Error::GraphTooLarge {
            kind: "edges",
            count: edges.len(),
            limit: MAX_EDGES,
        });
    }

    let mut vertices = HashSet::new();
    for (index, edge) in edges.iter().enumerate() {
        parse_name(index + 1, edge.src.as_str())?;
        parse_name(index + 1, edge.dest.as_str())?;
        vertices.insert(&edge.src);
        vertices.insert(&edge.dest);
    }
    if vertices.len() > MAX_VERTICES {
        warn!(vertices = vertices.len(), limit = MAX_VERTICES, "rejected oversized graph");
        return Err(Error::GraphTooLarge {
            kind: "vertices",
            count: vertices.len(),
            limit: MAX_VERTICES,
        });
    }

    let source = NodeName::from(source.trim());
    let graph = build_graph(edges, source.clone());
    if !graph.contains(&source) {
        warn!(%source, "source is not a vertex");
        return Err(Error::UnknownSource(source.to_string()));
    }

    debug!(
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        %source,
        "built graph"
    );
    Ok(graph)
}

fn parse_name(line: usize, name: &str) -> Result<NodeName> {
    if !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric()) {
        Ok(NodeName::from(name))
    } else {
        Err(Error::InvalidNodeName {
            line,
            name: name.to_string(),
        })
    }
}

fn parse_weight(line: usize, weight: &str) -> Result<i64> {
    let digits = weight.strip_prefix('-').unwrap_or(weight);
    let well_formed = !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit());

    well_formed
        .then(|| weight.parse().ok())
        .flatten()
        .ok_or_else(|| Error::InvalidWeight {
            line,
            weight: weight.to_string(),
        })
}
