use fixedbitset::FixedBitSet;

use crate::{
    error::SolveError,
    problem::{distance_matrix::DistanceMatrix, route::Route},
};

/// Nearest-neighbor tour starting and ending at `depot`.
///
/// From the last appended location, the unvisited location with the lowest
/// outgoing cost is visited next. Candidates are scanned in ascending index
/// order with a strict comparison, so ties go to the lowest index.
/// Unreachable pairs are only picked when nothing else is left.
pub fn nearest_neighbor(matrix: &DistanceMatrix, depot: usize) -> Result<Route, SolveError> {
    matrix.check_depot(depot)?;

    let num_locations = matrix.num_locations();
    let mut visited = FixedBitSet::with_capacity(num_locations);
    visited.insert(depot);

    let mut nodes = Vec::with_capacity(num_locations + 1);
    nodes.push(depot);

    let mut last = depot;
    for _ in 1..num_locations {
        let mut nearest: Option<(usize, u64)> = None;
        for candidate in visited.zeroes() {
            let cost = matrix.cost(last, candidate);
            if nearest.is_none_or(|(_, best)| cost < best) {
                nearest = Some((candidate, cost));
            }
        }

        // visited always has a zero bit here, the loop runs num_locations - 1 times
        let Some((next, _)) = nearest else {
            break;
        };

        visited.insert(next);
        nodes.push(next);
        last = next;
    }

    nodes.push(depot);

    Ok(Route::new(nodes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        problem::distance_matrix::UNREACHABLE_COST,
        test_utils::{assert_valid_tour, random_euclidean_matrix, unit_square_matrix},
    };

    #[test]
    fn test_unit_square() {
        let matrix = unit_square_matrix();

        let route = nearest_neighbor(&matrix, 0).unwrap();

        assert_eq!(route.nodes(), &[0, 1, 2, 3, 0]);
    }

    #[test]
    fn test_ties_go_to_lowest_index() {
        let matrix = DistanceMatrix::new(vec![
            vec![0, 5, 5, 5],
            vec![5, 0, 5, 5],
            vec![5, 5, 0, 5],
            vec![5, 5, 5, 0],
        ])
        .unwrap();

        let route = nearest_neighbor(&matrix, 0).unwrap();

        assert_eq!(route.nodes(), &[0, 1, 2, 3, 0]);
    }

    #[test]
    fn test_follows_outgoing_costs() {
        let matrix = DistanceMatrix::new(vec![
            vec![0, 9, 1, 8],
            vec![1, 0, 9, 9],
            vec![9, 9, 0, 2],
            vec![9, 3, 9, 0],
        ])
        .unwrap();

        let route = nearest_neighbor(&matrix, 0).unwrap();

        assert_eq!(route.nodes(), &[0, 2, 3, 1, 0]);
    }

    #[test]
    fn test_unreachable_only_when_forced() {
        let s = UNREACHABLE_COST;
        let matrix = DistanceMatrix::new(vec![
            vec![0, s, 4, s],
            vec![s, 0, 1, s],
            vec![4, 1, 0, s],
            vec![s, s, s, 0],
        ])
        .unwrap();

        let route = nearest_neighbor(&matrix, 0).unwrap();

        assert_eq!(route.nodes(), &[0, 2, 1, 3, 0]);
    }

    #[test]
    fn test_shape_for_all_sizes() {
        for n in 1..30 {
            let matrix = random_euclidean_matrix(n, n as u64);
            let route = nearest_neighbor(&matrix, 0).unwrap();
            assert_valid_tour(&route, n, 0);
        }
    }

    #[test]
    fn test_single_location() {
        let matrix = DistanceMatrix::new(vec![vec![0]]).unwrap();

        assert_eq!(nearest_neighbor(&matrix, 0).unwrap().nodes(), &[0, 0]);
    }

    #[test]
    fn test_non_zero_depot() {
        let matrix = unit_square_matrix();

        let route = nearest_neighbor(&matrix, 2).unwrap();

        assert_eq!(route.nodes(), &[2, 1, 0, 3, 2]);
    }

    #[test]
    fn test_empty_problem() {
        let matrix = DistanceMatrix::new(vec![]).unwrap();

        assert_eq!(nearest_neighbor(&matrix, 0), Err(SolveError::EmptyProblem));
    }
}
