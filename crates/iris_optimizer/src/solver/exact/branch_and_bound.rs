use std::time::{Duration, Instant};

use fixedbitset::FixedBitSet;
use tracing::{debug, info};

use crate::{
    error::SolveError,
    problem::{
        distance_matrix::{Cost, DistanceMatrix},
        route::Route,
    },
    solver::{
        christofides::christofides,
        construction::nearest_neighbor::nearest_neighbor,
    },
};

use super::exact_solver_gateway::{ExactSolverGateway, ExactSolverParams, FirstSolutionStrategy};

/// The clock is read once every this many expansions.
const CLOCK_CHECK_INTERVAL: usize = 4096;

/// Depth-first branch and bound over the directed matrix.
///
/// The unreachable sentinel is an ordinary, very large cost: the bound steers
/// the search away from such arcs, but a route travelling one is still
/// returned when nothing cheaper exists.
/// Children are explored cheapest arc first and a branch is cut once its cost
/// plus the cheapest way out of every open node reaches the best known tour.
#[derive(Debug, Default, Clone, Copy)]
pub struct BranchAndBoundSolver;

impl ExactSolverGateway for BranchAndBoundSolver {
    fn name(&self) -> &'static str {
        "branch_and_bound"
    }

    fn solve(
        &self,
        matrix: &DistanceMatrix,
        depot: usize,
        params: &ExactSolverParams,
    ) -> Result<Option<Route>, SolveError> {
        matrix.check_depot(depot)?;

        if matrix.num_locations() == 1 {
            return Ok(Some(Route::new(vec![depot, depot])));
        }

        let time_limit = Duration::try_from(params.time_limit).unwrap_or_default();
        let mut search = Search::new(matrix, depot, cheapest_outgoing_arcs(matrix), time_limit);

        let seed = first_solution(matrix, depot, params)?;
        debug!(
            "BranchAndBound: {:?} seed with cost {}, {} unreachable legs",
            params.first_solution_strategy,
            seed.cost(matrix),
            seed.unreachable_legs(matrix)
        );
        search.best = Some((seed.cost(matrix), seed.into_nodes()));

        let open_bound = search.initial_open_bound();
        search.visited.insert(depot);
        search.path.push(depot);
        search.branch(depot, 0, open_bound);

        info!(
            "BranchAndBound: {} expansions, best cost {:?}, {}",
            search.expansions,
            search.best.as_ref().map(|(cost, _)| *cost),
            if search.timed_out {
                "stopped at time limit"
            } else {
                "search completed"
            }
        );

        Ok(search.best.map(|(_, nodes)| Route::new(nodes)))
    }
}

/// Cheapest arc out of every location.
fn cheapest_outgoing_arcs(matrix: &DistanceMatrix) -> Vec<Cost> {
    let n = matrix.num_locations();

    (0..n)
        .map(|from| {
            (0..n)
                .filter(|&to| to != from)
                .map(|to| matrix.cost(from, to))
                .min()
                .unwrap_or(0)
        })
        .collect()
}

fn first_solution(
    matrix: &DistanceMatrix,
    depot: usize,
    params: &ExactSolverParams,
) -> Result<Route, SolveError> {
    match params.first_solution_strategy {
        FirstSolutionStrategy::PathCheapestArc => nearest_neighbor(matrix, depot),
        FirstSolutionStrategy::Christofides => {
            Ok(christofides(matrix, depot, params.symmetrization)?.route)
        }
    }
}

struct Search<'a> {
    matrix: &'a DistanceMatrix,
    depot: usize,
    min_out: Vec<Cost>,
    path: Vec<usize>,
    visited: FixedBitSet,
    best: Option<(Cost, Vec<usize>)>,
    deadline: Option<Instant>,
    expansions: usize,
    timed_out: bool,
}

impl<'a> Search<'a> {
    fn new(
        matrix: &'a DistanceMatrix,
        depot: usize,
        min_out: Vec<Cost>,
        time_limit: Duration,
    ) -> Self {
        let num_locations = matrix.num_locations();
        Self {
            matrix,
            depot,
            min_out,
            path: Vec::with_capacity(num_locations + 1),
            visited: FixedBitSet::with_capacity(num_locations),
            best: None,
            deadline: Instant::now().checked_add(time_limit),
            expansions: 0,
            timed_out: false,
        }
    }

    /// Sum of the cheapest way out of every location except the depot.
    fn initial_open_bound(&self) -> Cost {
        self.min_out
            .iter()
            .enumerate()
            .filter(|&(node, _)| node != self.depot)
            .map(|(_, cost)| cost)
            .sum()
    }

    fn best_cost(&self) -> Option<Cost> {
        self.best.as_ref().map(|(cost, _)| *cost)
    }

    /// `open_bound` is the sum of `min_out` over the unvisited locations.
    fn branch(&mut self, current: usize, cost: Cost, open_bound: Cost) {
        self.expansions += 1;
        if self.expansions % CLOCK_CHECK_INTERVAL == 0
            && self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
        {
            self.timed_out = true;
            return;
        }

        let matrix = self.matrix;

        if self.path.len() == matrix.num_locations() {
            let total = cost + matrix.cost(current, self.depot);
            if self.best_cost().is_none_or(|best| total < best) {
                let mut nodes = self.path.clone();
                nodes.push(self.depot);
                self.best = Some((total, nodes));
            }
            return;
        }

        let lower_bound = cost + self.min_out[current] + open_bound;
        if self.best_cost().is_some_and(|best| lower_bound >= best) {
            return;
        }

        let mut candidates: Vec<(Cost, usize)> = self
            .visited
            .zeroes()
            .map(|next| (matrix.cost(current, next), next))
            .collect();
        candidates.sort_unstable();

        for (arc, next) in candidates {
            self.visited.insert(next);
            self.path.push(next);

            self.branch(next, cost + arc, open_bound - self.min_out[next]);

            self.path.pop();
            self.visited.set(next, false);

            if self.timed_out {
                return;
            }
        }
    }
}
