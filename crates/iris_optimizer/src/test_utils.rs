use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    problem::{
        distance_matrix::{Cost, DistanceMatrix},
        route::Route,
    },
    solver::ls::two_opt::is_improving,
};

/// (0,0), (0,1), (1,1), (1,0) with euclidean costs scaled by 100.
pub fn unit_square_matrix() -> DistanceMatrix {
    DistanceMatrix::from_euclidean(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)], 100.0)
}

pub fn random_points(n: usize, seed: u64) -> Vec<(f64, f64)> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| (rng.random_range(0.0..100.0), rng.random_range(0.0..100.0)))
        .collect()
}

pub fn random_euclidean_matrix(n: usize, seed: u64) -> DistanceMatrix {
    DistanceMatrix::from_euclidean(&random_points(n, seed), 10.0)
}

/// Manhattan distances on an integer grid, an exact metric.
pub fn random_manhattan_matrix(n: usize, seed: u64) -> DistanceMatrix {
    let mut rng = StdRng::seed_from_u64(seed);
    let points: Vec<(i64, i64)> = (0..n)
        .map(|_| (rng.random_range(0..200), rng.random_range(0..200)))
        .collect();

    let rows: Vec<Vec<Cost>> = points
        .iter()
        .map(|&(x1, y1)| {
            points
                .iter()
                .map(|&(x2, y2)| ((x1 - x2).abs() + (y1 - y2).abs()) as Cost)
                .collect()
        })
        .collect();

    DistanceMatrix::new(rows).unwrap()
}

pub fn random_asymmetric_matrix(n: usize, seed: u64) -> DistanceMatrix {
    let mut rng = StdRng::seed_from_u64(seed);
    let rows: Vec<Vec<Cost>> = (0..n)
        .map(|i| {
            (0..n)
                .map(|j| if i == j { 0 } else { rng.random_range(1..1000) })
                .collect()
        })
        .collect();

    DistanceMatrix::new(rows).unwrap()
}

pub fn assert_valid_tour(route: &Route, num_locations: usize, depot: usize) {
    if let Err(error) = route.validate(num_locations, depot) {
        panic!("{:?} is not a valid tour: {}", route.nodes(), error);
    }
}

pub fn assert_two_opt_local_optimum(route: &Route, matrix: &DistanceMatrix) {
    let len = route.len();
    if len < 5 {
        return;
    }

    for i in 1..len - 2 {
        for j in (i + 2)..=(len - 2) {
            assert!(
                !is_improving(route.nodes(), matrix, i, j),
                "reversing [{i}, {j}) still improves {:?}",
                route.nodes()
            );
        }
    }
}

/// Exhaustive search over every tour, for small instances.
pub fn brute_force_optimum(matrix: &DistanceMatrix, depot: usize) -> Cost {
    fn search(
        matrix: &DistanceMatrix,
        depot: usize,
        current: usize,
        visited: &mut Vec<bool>,
        remaining: usize,
        cost: Cost,
        best: &mut Cost,
    ) {
        if remaining == 0 {
            *best = (*best).min(cost + matrix.cost(current, depot));
            return;
        }

        for next in 0..matrix.num_locations() {
            if !visited[next] {
                visited[next] = true;
                search(
                    matrix,
                    depot,
                    next,
                    visited,
                    remaining - 1,
                    cost + matrix.cost(current, next),
                    best,
                );
                visited[next] = false;
            }
        }
    }

    let n = matrix.num_locations();
    let mut visited = vec![false; n];
    visited[depot] = true;
    let mut best = Cost::MAX;
    search(matrix, depot, depot, &mut visited, n - 1, 0, &mut best);

    best
}
