use fixedbitset::FixedBitSet;
use serde::Serialize;

use crate::{
    error::SolveError,
    problem::distance_matrix::{Cost, DistanceMatrix},
    solver::route_evaluator,
};

/// A closed tour: `[depot, ..., depot]`, every other location exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Route {
    nodes: Vec<usize>,
}

impl Route {
    pub fn new(nodes: Vec<usize>) -> Self {
        Self { nodes }
    }

    pub fn nodes(&self) -> &[usize] {
        &self.nodes
    }

    pub fn into_nodes(self) -> Vec<usize> {
        self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn cost(&self, matrix: &DistanceMatrix) -> Cost {
        route_evaluator::route_cost(&self.nodes, matrix)
    }

    /// Number of legs travelling an unreachable pair.
    pub fn unreachable_legs(&self, matrix: &DistanceMatrix) -> usize {
        self.nodes
            .windows(2)
            .filter(|leg| matrix.is_unreachable(leg[0], leg[1]))
            .count()
    }

    /// Reverses the nodes in `[from, to)`.
    pub(crate) fn reverse_segment(&mut self, from: usize, to: usize) {
        self.nodes[from..to].reverse();
    }

    /// Checks the route is a Hamiltonian cycle over `num_locations` framed by `depot`.
    pub fn validate(&self, num_locations: usize, depot: usize) -> Result<(), SolveError> {
        if self.nodes.len() != num_locations + 1 {
            return Err(SolveError::InvalidRoute(format!(
                "expected {} nodes, got {}",
                num_locations + 1,
                self.nodes.len()
            )));
        }

        if self.nodes.first() != Some(&depot) || self.nodes.last() != Some(&depot) {
            return Err(SolveError::InvalidRoute(format!(
                "route must start and end at depot {depot}"
            )));
        }

        let mut seen = FixedBitSet::with_capacity(num_locations);
        for &node in &self.nodes[..num_locations] {
            if node >= num_locations {
                return Err(SolveError::InvalidRoute(format!("unknown location {node}")));
            }
            if seen.put(node) {
                return Err(SolveError::InvalidRoute(format!(
                    "location {node} is visited twice"
                )));
            }
        }

        Ok(())
    }
}
