use std::collections::BinaryHeap;

use crate::{
    problem::distance_matrix::Cost, solver::christofides::graph::CompleteGraph, utils::dsu::Dsu,
};

#[derive(PartialEq, Eq)]
struct KruskalEdge {
    from: usize,
    to: usize,
    weight: Cost,
}

impl PartialOrd for KruskalEdge {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// Reversed so the max-heap pops the lightest edge, ties by lowest endpoints
impl Ord for KruskalEdge {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (other.weight, other.from, other.to).cmp(&(self.weight, self.from, self.to))
    }
}

pub struct SpanningTree {
    pub edges: Vec<(usize, usize)>,
    pub weight: Cost,
}

/// Kruskal's algorithm over the complete graph.
pub fn minimum_spanning_tree(graph: &CompleteGraph) -> SpanningTree {
    let n = graph.num_nodes();
    let mut edges = BinaryHeap::with_capacity(n * n.saturating_sub(1) / 2);

    for from in 0..n {
        for to in (from + 1)..n {
            edges.push(KruskalEdge {
                from,
                to,
                weight: graph.weight(from, to),
            });
        }
    }

    let mut dsu = Dsu::new(n);
    let mut tree = SpanningTree {
        edges: Vec::with_capacity(n.saturating_sub(1)),
        weight: 0,
    };

    while let Some(edge) = edges.pop() {
        if dsu.num_components() <= 1 {
            break;
        }

        if dsu.union(edge.from, edge.to) {
            tree.edges.push((edge.from, edge.to));
            tree.weight += edge.weight;
        }
    }

    tree
}
