use tracing::{debug, warn};

use crate::{
    error::SolveError,
    problem::{distance_matrix::DistanceMatrix, route::Route},
    solver::{
        christofides::christofides,
        construction::nearest_neighbor::nearest_neighbor,
        exact::{
            branch_and_bound::BranchAndBoundSolver,
            exact_solver_gateway::{ExactSolverGateway, ExactSolverParams},
        },
        ls::two_opt::two_opt,
        solver_params::SolverParams,
        strategy::Strategy,
    },
    timer_debug,
};

/// Runs any [`Strategy`] over a matrix. Holds no per-request state and can
/// be shared between threads.
pub struct RouteSolver {
    params: SolverParams,
    exact_solver: Box<dyn ExactSolverGateway>,
}

impl Default for RouteSolver {
    fn default() -> Self {
        Self::new(SolverParams::default())
    }
}

impl RouteSolver {
    pub fn new(params: SolverParams) -> Self {
        Self {
            params,
            exact_solver: Box::new(BranchAndBoundSolver),
        }
    }

    pub fn with_exact_solver(mut self, exact_solver: impl ExactSolverGateway + 'static) -> Self {
        self.exact_solver = Box::new(exact_solver);
        self
    }

    /// `Ok(None)` means the strategy found no route, which only the exact
    /// gateway can report.
    pub fn solve(
        &self,
        strategy: Strategy,
        matrix: &DistanceMatrix,
        depot: usize,
    ) -> Result<Option<Route>, SolveError> {
        matrix.check_depot(depot)?;

        let route = match strategy {
            Strategy::GreedyTwoOpt => {
                let initial = timer_debug!("Nearest neighbor", nearest_neighbor(matrix, depot)?);
                timer_debug!("TwoOpt", two_opt(&initial, matrix, &self.params.two_opt))
            }
            Strategy::ChristofidesTwoOpt => {
                let tour = timer_debug!(
                    "Christofides",
                    christofides(matrix, depot, self.params.symmetrization)?
                );
                timer_debug!(
                    "TwoOpt",
                    two_opt(&tour.route, matrix, &self.params.two_opt)
                )
            }
            Strategy::ExactSolver => {
                let params = ExactSolverParams {
                    symmetrization: self.params.symmetrization,
                    ..self.params.exact.clone()
                };
                let solved = timer_debug!(
                    self.exact_solver.name(),
                    self.exact_solver.solve(matrix, depot, &params)?
                );

                let Some(route) = solved else {
                    warn!("{}: no feasible route", self.exact_solver.name());
                    return Ok(None);
                };

                route.validate(matrix.num_locations(), depot)?;
                route
            }
        };

        debug!("{}: route cost {}", strategy, route.cost(matrix));

        Ok(Some(route))
    }
}
