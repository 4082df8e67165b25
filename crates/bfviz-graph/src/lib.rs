//! Bellman-Ford Graph Model
//!
//! Plain data shared by the step recorder and the replay projections.
//!
//! # Model
//!
//! - **Graph**: adjacency map of a directed weighted graph, in insertion order,
//!   with an optional designated source.
//! - **DistanceMatrix**: one column per relaxation round, each mapping a vertex
//!   to its best known distance, `inf`, or unset (not computed yet).
//! - **ParentMap**: vertex to parent vertex, `none` for the source, unset for
//!   vertices that were never reached.
//!
//! Integer labels are stored by their decimal text, so `1` and `"1"` name the
//! same vertex.

mod node;
mod distance;
mod graph;
mod parent;

pub use node::NodeName;
pub use distance::{Distance, DistanceColumn, DistanceMatrix};
pub use graph::{build_graph, Edge, EdgeSpec, Graph};
pub use parent::{Parent, ParentMap};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projections_cover_destination_only_vertices() {
        let graph = build_graph(
            [EdgeSpec::new("a", "b", 3), EdgeSpec::new("a", "c", -1)],
            "a",
        );

        let matrix = DistanceMatrix::unset(&graph);
        let parent = ParentMap::unset(&graph);

        assert_eq!(matrix.column_count(), 3);
        for node in ["a", "b", "c"] {
            let node = NodeName::from(node);
            assert!(matrix.row(&node).iter().all(Option::is_none));
            assert!(parent.contains(&node));
            assert_eq!(parent.get(&node), None);
        }
    }
}
