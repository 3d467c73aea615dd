//! Shared graph fixtures for integration tests.

use tessella_core::AdjacencyGraph;

/// Zachary's karate club (34 nodes, 78 edges), 0-indexed.
pub const KARATE_EDGES: [(usize, usize); 78] = [
    (0, 1),
    (0, 2),
    (0, 3),
    (0, 4),
    (0, 5),
    (0, 6),
    (0, 7),
    (0, 8),
    (0, 10),
    (0, 11),
    (0, 12),
    (0, 13),
    (0, 17),
    (0, 19),
    (0, 21),
    (0, 31),
    (1, 2),
    (1, 3),
    (1, 7),
    (1, 13),
    (1, 17),
    (1, 19),
    (1, 21),
    (1, 30),
    (2, 3),
    (2, 7),
    (2, 8),
    (2, 9),
    (2, 13),
    (2, 27),
    (2, 28),
    (2, 32),
    (3, 7),
    (3, 12),
    (3, 13),
    (4, 6),
    (4, 10),
    (5, 6),
    (5, 10),
    (5, 16),
    (6, 16),
    (8, 30),
    (8, 32),
    (8, 33),
    (9, 33),
    (13, 33),
    (14, 32),
    (14, 33),
    (15, 32),
    (15, 33),
    (18, 32),
    (18, 33),
    (19, 33),
    (20, 32),
    (20, 33),
    (22, 32),
    (22, 33),
    (23, 25),
    (23, 27),
    (23, 29),
    (23, 32),
    (23, 33),
    (24, 25),
    (24, 27),
    (24, 31),
    (25, 31),
    (26, 29),
    (26, 33),
    (27, 33),
    (28, 31),
    (28, 33),
    (29, 32),
    (29, 33),
    (30, 32),
    (30, 33),
    (31, 32),
    (31, 33),
    (32, 33),
];

/// Members of Mr. Hi's faction in the documented real-world split.
pub const KARATE_FACTION: [usize; 17] = [
    0, 1, 2, 3, 4, 5, 6, 7, 8, 10, 11, 12, 13, 16, 17, 19, 21,
];

/// Builds the karate club benchmark graph.
pub fn karate_club() -> AdjacencyGraph {
    AdjacencyGraph::unweighted("karate-club", 34, &KARATE_EDGES).expect("edge list is valid")
}

/// The ±1 assignment of the documented karate faction split.
pub fn karate_faction_assignment() -> Vec<f64> {
    let mut assignment = vec![-1.0; 34];
    for &member in &KARATE_FACTION {
        assignment[member] = 1.0;
    }
    assignment
}

/// Builds a barbell graph: two complete groups of `size` nodes joined by a
/// single bridge edge between nodes `size - 1` and `size`.
pub fn barbell(size: usize) -> AdjacencyGraph {
    let mut edges = Vec::new();
    for offset in [0, size] {
        for i in 0..size {
            for j in (i + 1)..size {
                edges.push((offset + i, offset + j));
            }
        }
    }
    edges.push((size - 1, size));
    AdjacencyGraph::unweighted("barbell", 2 * size, &edges).expect("edge list is valid")
}
