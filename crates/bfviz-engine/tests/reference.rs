//! Final distances agree with petgraph's Bellman-Ford on graphs without
//! negative cycles.

use bfviz_engine::{expected_step_count, run, StepKind};
use bfviz_graph::{Distance, Graph, NodeName};
use petgraph::algo::bellman_ford;
use proptest::prelude::*;

fn name(index: usize) -> NodeName {
    NodeName::from(index)
}

fn build(vertices: usize, edges: &[(usize, usize, i64)]) -> Graph {
    let mut graph = Graph::new();
    for v in 0..vertices {
        graph.add_node(name(v));
    }
    for &(from, to, weight) in edges {
        graph.add_directed_edge(name(from), name(to), weight);
    }
    graph.set_source(name(0));
    graph
}

/// Reference distances indexed by vertex position.
fn reference(graph: &Graph) -> Vec<f64> {
    let mut reference = petgraph::Graph::<(), f64>::new();
    let index: Vec<_> = graph.nodes().map(|_| reference.add_node(())).collect();
    let position = |node: &NodeName| {
        graph
            .nodes()
            .position(|n| n == node)
            .expect("edge endpoint is a vertex")
    };
    for edge in graph.edges() {
        reference.add_edge(
            index[position(edge.from)],
            index[position(edge.to)],
            edge.weight as f64,
        );
    }

    bellman_ford(&reference, index[0])
        .expect("no negative cycle")
        .distances
}

fn assert_matches_reference(graph: &Graph) {
    let result = run(graph, &name(0));
    let last = result.final_distances().expect("at least one column");
    let expected = reference(graph);

    for (position, node) in graph.nodes().enumerate() {
        let ours = last.get(node).copied().flatten().expect("every cell computed");
        match ours {
            Distance::Finite(d) => assert_eq!(d as f64, expected[position], "vertex {}", node),
            Distance::Infinite => assert!(expected[position].is_infinite(), "vertex {}", node),
        }
    }
}

/// Edges only from lower to higher index: acyclic, any sign.
fn dag() -> impl Strategy<Value = (usize, Vec<(usize, usize, i64)>)> {
    (2usize..8).prop_flat_map(|vertices| {
        let edge = (0..vertices, 0..vertices, -20i64..20).prop_filter_map("forward edge", |(a, b, w)| {
            (a < b).then_some((a, b, w))
        });
        (Just(vertices), prop::collection::vec(edge, 0..16))
    })
}

/// Arbitrary shape, non-negative weights.
fn non_negative() -> impl Strategy<Value = (usize, Vec<(usize, usize, i64)>)> {
    (1usize..8).prop_flat_map(|vertices| {
        let edge = (0..vertices, 0..vertices, 0i64..30);
        (Just(vertices), prop::collection::vec(edge, 0..20))
    })
}

proptest! {
    #[test]
    fn dag_distances_match((vertices, edges) in dag()) {
        let graph = build(vertices, &edges);
        assert_matches_reference(&graph);
    }

    #[test]
    fn non_negative_distances_match((vertices, edges) in non_negative()) {
        let graph = build(vertices, &edges);
        assert_matches_reference(&graph);
    }

    #[test]
    fn parent_paths_cost_their_distance((vertices, edges) in dag()) {
        let graph = build(vertices, &edges);
        let result = run(&graph, &name(0));

        for node in graph.nodes() {
            let distance = result.distances.get(vertices - 1, node);
            match result.path_to(node) {
                Some(path) => {
                    prop_assert_eq!(path.first(), Some(&name(0)));
                    let cost: i64 = path
                        .windows(2)
                        .map(|pair| graph.weight(&pair[0], &pair[1]).expect("tree edge exists"))
                        .sum();
                    prop_assert_eq!(distance, Some(Distance::Finite(cost)));
                }
                None => prop_assert_eq!(distance, Some(Distance::Infinite)),
            }
        }
    }

    #[test]
    fn log_shape((vertices, edges) in non_negative()) {
        let graph = build(vertices, &edges);
        let result = run(&graph, &name(0));

        prop_assert_eq!(
            result.steps.len(),
            expected_step_count(graph.vertex_count(), graph.distinct_edge_count())
        );

        let visits = result.steps.iter().filter(|s| s.kind() == StepKind::Visit).count();
        let decisions = result
            .steps
            .iter()
            .filter(|s| matches!(s.kind(), StepKind::Accept | StepKind::Reject))
            .count();
        prop_assert_eq!(visits, (vertices - 1) * graph.distinct_edge_count());
        prop_assert_eq!(decisions, visits);
    }
}
