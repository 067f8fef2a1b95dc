use serde::{Deserialize, Serialize};

use crate::{
    error::SolveError,
    problem::distance_matrix::{Cost, DistanceMatrix},
};

/// How a directional matrix is turned into undirected weights.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Symmetrization {
    /// `weight(u, v) = cost(min(u, v), max(u, v))`, the reverse direction is ignored
    #[default]
    Upper,
    Max,
    Average,
    /// Fails on the first asymmetric pair
    Reject,
}

/// Complete undirected graph over `0..num_nodes`, weights stored flat.
pub struct CompleteGraph {
    weights: Vec<Cost>,
    num_nodes: usize,
}

impl CompleteGraph {
    pub fn from_matrix(
        matrix: &DistanceMatrix,
        symmetrization: Symmetrization,
    ) -> Result<Self, SolveError> {
        let num_nodes = matrix.num_locations();
        let mut weights = vec![0; num_nodes * num_nodes];

        for u in 0..num_nodes {
            for v in (u + 1)..num_nodes {
                let forward = matrix.cost(u, v);
                let backward = matrix.cost(v, u);

                let weight = match symmetrization {
                    Symmetrization::Upper => forward,
                    Symmetrization::Max => forward.max(backward),
                    Symmetrization::Average => (forward + backward) / 2,
                    Symmetrization::Reject => {
                        if forward != backward {
                            return Err(SolveError::AsymmetricMatrix { from: u, to: v });
                        }
                        forward
                    }
                };

                weights[u * num_nodes + v] = weight;
                weights[v * num_nodes + u] = weight;
            }
        }

        Ok(Self { weights, num_nodes })
    }

    #[inline(always)]
    pub fn weight(&self, u: usize, v: usize) -> Cost {
        self.weights[u * self.num_nodes + v]
    }

    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }
}

/// Undirected multigraph, edges are referenced by their index in `edges`.
#[derive(Default)]
pub struct MultiGraph {
    edges: Vec<(usize, usize)>,
    adjacency: Vec<Vec<usize>>,
}

impl MultiGraph {
    pub fn new(num_nodes: usize) -> Self {
        Self {
            edges: Vec::new(),
            adjacency: vec![Vec::new(); num_nodes],
        }
    }

    pub fn add_edge(&mut self, u: usize, v: usize) {
        let edge = self.edges.len();
        self.edges.push((u, v));
        self.adjacency[u].push(edge);
        self.adjacency[v].push(edge);
    }

    pub fn degree(&self, node: usize) -> usize {
        self.adjacency[node].len()
    }

    pub fn num_nodes(&self) -> usize {
        self.adjacency.len()
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn incident_edges(&self, node: usize) -> &[usize] {
        &self.adjacency[node]
    }

    /// The endpoint of `edge` that is not `node`.
    pub fn opposite(&self, edge: usize, node: usize) -> usize {
        let (u, v) = self.edges[edge];
        if u == node { v } else { u }
    }

    pub fn odd_degree_nodes(&self) -> Vec<usize> {
        (0..self.num_nodes())
            .filter(|&node| self.degree(node) % 2 == 1)
            .collect()
    }
}
