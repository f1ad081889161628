//! Small hand-built problem graphs used in tests and demos.
//!
//! Each fixture returns the full map and the package source/destination
//! pairs; the garage is vertex 0.

use super::Graph;

const TRIANGLE_EDGES: &[(usize, usize, f64)] = &[(0, 1, 10.0), (0, 2, 30.0), (1, 2, 20.0)];

const OGG_EDGES: &[(usize, usize, f64)] = &[
    (0, 1, 20.0),
    (1, 8, 100.0),
    (1, 2, 68.0),
    (0, 3, 14.0),
    (3, 4, 6.0),
    (4, 5, 4.0),
    (5, 6, 30.0),
    (6, 0, 51.0),
    (0, 7, 36.0),
    (7, 3, 15.0),
];

const CIRCLE_SIZE: usize = 10;

/// Builds a fixture graph. Fixture edges are in range with positive
/// weights, as `test_fixture_edges_validate` checks.
fn build(vertex_count: usize, edges: &[(usize, usize, f64)]) -> Graph {
    let mut graph = Graph::new(vertex_count);
    for &(u, v, w) in edges {
        graph.insert_edge(u, v, w);
    }
    graph
}

fn circle_edges() -> Vec<(usize, usize, f64)> {
    (0..CIRCLE_SIZE).map(|i| (i, (i + 1) % CIRCLE_SIZE, 5.0)).collect()
}

/// Three vertices, edges (0,1)=10, (0,2)=30, (1,2)=20, packages (1→2), (2→0).
pub fn triangle() -> (Graph, Vec<(usize, usize)>) {
    (build(3, TRIANGLE_EDGES), vec![(1, 2), (2, 0)])
}

/// A nine-vertex graph with three packages (6→2), (3→1), (4→5).
pub fn ogg() -> (Graph, Vec<(usize, usize)>) {
    (build(9, OGG_EDGES), vec![(6, 2), (3, 1), (4, 5)])
}

/// A ten-vertex ring with unit step weight 5 and one package per step
/// (i → i+1, wrapping 9 → 0).
pub fn circle() -> (Graph, Vec<(usize, usize)>) {
    let pairs = (0..CIRCLE_SIZE).map(|i| (i, (i + 1) % CIRCLE_SIZE)).collect();
    (build(CIRCLE_SIZE, &circle_edges()), pairs)
}
