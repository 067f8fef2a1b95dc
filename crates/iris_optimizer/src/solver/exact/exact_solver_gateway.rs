use jiff::SignedDuration;
use serde::{Deserialize, Serialize};

use crate::{
    error::SolveError,
    problem::{distance_matrix::DistanceMatrix, route::Route},
    solver::christofides::graph::Symmetrization,
};

/// Tour used to seed the search before any branching.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FirstSolutionStrategy {
    /// Repeatedly extends the route with the cheapest arc out of its last node
    #[default]
    PathCheapestArc,
    Christofides,
}

#[derive(Debug, Clone)]
pub struct ExactSolverParams {
    pub first_solution_strategy: FirstSolutionStrategy,
    /// Used by the Christofides first solution.
    pub symmetrization: Symmetrization,
    /// The best route found so far is returned when the limit is reached.
    pub time_limit: SignedDuration,
}

impl Default for ExactSolverParams {
    fn default() -> Self {
        Self {
            first_solution_strategy: FirstSolutionStrategy::default(),
            symmetrization: Symmetrization::default(),
            time_limit: SignedDuration::from_secs(10),
        }
    }
}

/// A solver searching for an optimal closed route over a single vehicle.
pub trait ExactSolverGateway: Send + Sync {
    fn name(&self) -> &'static str;

    /// Unreachable pairs are scored at their sentinel cost. Returns `Ok(None)`
    /// when no route was found in time.
    fn solve(
        &self,
        matrix: &DistanceMatrix,
        depot: usize,
        params: &ExactSolverParams,
    ) -> Result<Option<Route>, SolveError>;
}
