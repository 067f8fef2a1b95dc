use std::sync::Arc;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{
    error::SolveError,
    problem::{
        distance_matrix::{Cost, DistanceMatrix},
        location::Location,
        route::Route,
    },
    solver::{solver::RouteSolver, strategy::Strategy},
};

/// Everything a single solve needs. The matrix is built once and shared
/// read-only by every strategy.
#[derive(Debug, Clone)]
pub struct SolveRequest {
    locations: Vec<Location>,
    matrix: Arc<DistanceMatrix>,
    depot: usize,
}

impl SolveRequest {
    /// The first location is the depot.
    pub fn new(locations: Vec<Location>, matrix: DistanceMatrix) -> Result<Self, SolveError> {
        if locations.is_empty() {
            return Err(SolveError::EmptyProblem);
        }

        if locations.len() != matrix.num_locations() {
            return Err(SolveError::MatrixSizeMismatch {
                locations: locations.len(),
                matrix: matrix.num_locations(),
            });
        }

        Ok(Self {
            locations,
            matrix: Arc::new(matrix),
            depot: 0,
        })
    }

    pub fn with_depot(mut self, depot: usize) -> Result<Self, SolveError> {
        self.matrix.check_depot(depot)?;
        self.depot = depot;
        Ok(self)
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn matrix(&self) -> &DistanceMatrix {
        &self.matrix
    }

    pub fn depot(&self) -> usize {
        self.depot
    }

    pub fn solve(&self, solver: &RouteSolver, strategy: Strategy) -> AlgorithmResult {
        match solver.solve(strategy, &self.matrix, self.depot) {
            Ok(Some(route)) => self.solved(strategy.name(), &route),
            Ok(None) => AlgorithmResult::failed(strategy.name(), "No solution found"),
            Err(error) => AlgorithmResult::failed(strategy.name(), error),
        }
    }

    /// Solves every named algorithm in parallel. Results keep the order of
    /// `algorithms` and a failing algorithm does not affect the others.
    pub fn solve_all(&self, solver: &RouteSolver, algorithms: &[String]) -> Vec<AlgorithmResult> {
        info!(
            "Solving {} locations with {} algorithm(s)",
            self.locations.len(),
            algorithms.len()
        );

        algorithms
            .par_iter()
            .map(|name| match name.parse::<Strategy>() {
                Ok(strategy) => self.solve(solver, strategy),
                Err(error) => {
                    warn!("{}", error);
                    AlgorithmResult::failed(name, error)
                }
            })
            .collect()
    }

    fn solved(&self, algorithm: &str, route: &Route) -> AlgorithmResult {
        AlgorithmResult {
            algorithm: algorithm.to_owned(),
            outcome: AlgorithmOutcome::Solved {
                route: route
                    .nodes()
                    .iter()
                    .map(|&node| self.locations[node].id().to_owned())
                    .collect(),
                total_cost: route.cost(&self.matrix),
                unreachable_legs: route.unreachable_legs(&self.matrix),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlgorithmResult {
    pub algorithm: String,
    #[serde(flatten)]
    pub outcome: AlgorithmOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AlgorithmOutcome {
    Solved {
        /// Location identifiers, depot first and last
        route: Vec<String>,
        total_cost: Cost,
        unreachable_legs: usize,
    },
    Failed {
        error: String,
    },
}

impl AlgorithmResult {
    pub fn failed(algorithm: impl Into<String>, error: impl ToString) -> Self {
        Self {
            algorithm: algorithm.into(),
            outcome: AlgorithmOutcome::Failed {
                error: error.to_string(),
            },
        }
    }

    pub fn is_solved(&self) -> bool {
        matches!(self.outcome, AlgorithmOutcome::Solved { .. })
    }
}
