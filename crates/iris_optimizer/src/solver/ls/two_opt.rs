use tracing::debug;

use crate::problem::{
    distance_matrix::{Cost, DistanceMatrix},
    route::Route,
};

#[derive(Debug, Clone, Default)]
pub struct TwoOptParams {
    /// Stops the search after this many passes, the best route so far is kept.
    pub max_passes: Option<usize>,
}

/// **Intra-Route 2-Opt**
///
/// Reverses the nodes in `[i, j)`, leaving both depot endpoints untouched.
///
/// ```text
/// BEFORE:
///    ... (a) --x--> [b] -> ... -> [c] --x--> (d) ...
///    positions:  i-1    i           j-1        j
///
/// AFTER (Sequence Reversed):
///    ... (a) -----> [c] -> ... -> [b] -----> (d) ...
///
/// Edges Removed: (a->b), (c->d)
/// Edges Added:   (a->c), (b->d)
/// ```
///
/// The search is first-improvement with restart: pairs are scanned with
/// ascending `i` then ascending `j`, the first strictly improving reversal is
/// applied and the scan starts over. It stops once a full pass finds nothing,
/// so the result is a 2-opt local optimum and always the same for the same input.
pub fn two_opt(route: &Route, matrix: &DistanceMatrix, params: &TwoOptParams) -> Route {
    let mut best = route.clone();
    let len = best.len();

    // need 1 <= i < len - 2 and i + 2 <= j <= len - 2
    if len < 5 {
        return best;
    }

    let mut passes = 0;
    let mut improvements = 0;

    'search: loop {
        if params.max_passes.is_some_and(|max_passes| passes >= max_passes) {
            debug!("TwoOpt: stopped after {} passes", passes);
            break;
        }
        passes += 1;

        for i in 1..len - 2 {
            for j in (i + 2)..=(len - 2) {
                if is_improving(best.nodes(), matrix, i, j) {
                    best.reverse_segment(i, j);
                    improvements += 1;
                    continue 'search;
                }
            }
        }

        break;
    }

    debug!(
        "TwoOpt: {} improvements in {} passes, cost {} -> {}",
        improvements,
        passes,
        route.cost(matrix),
        best.cost(matrix)
    );

    best
}

/// Whether reversing `[i, j)` strictly lowers the route cost.
pub fn is_improving(nodes: &[usize], matrix: &DistanceMatrix, i: usize, j: usize) -> bool {
    let (current, reversed) = if matrix.is_symmetric() {
        symmetric_delta(nodes, matrix, i, j)
    } else {
        asymmetric_delta(nodes, matrix, i, j)
    };

    reversed < current
}

/// Only the two boundary edges change when costs do not depend on direction.
fn symmetric_delta(nodes: &[usize], matrix: &DistanceMatrix, i: usize, j: usize) -> (Cost, Cost) {
    let a = nodes[i - 1];
    let b = nodes[i];
    let c = nodes[j - 1];
    let d = nodes[j];

    let current = matrix.cost(a, b) + matrix.cost(c, d);
    let reversed = matrix.cost(a, c) + matrix.cost(b, d);

    (current, reversed)
}

/// The reversed segment is travelled backwards, so its inner legs count too.
fn asymmetric_delta(nodes: &[usize], matrix: &DistanceMatrix, i: usize, j: usize) -> (Cost, Cost) {
    let current: Cost = (i - 1..j)
        .map(|k| matrix.cost(nodes[k], nodes[k + 1]))
        .sum();

    let inner_reversed: Cost = (i..j - 1)
        .map(|k| matrix.cost(nodes[k + 1], nodes[k]))
        .sum();
    let reversed =
        matrix.cost(nodes[i - 1], nodes[j - 1]) + inner_reversed + matrix.cost(nodes[i], nodes[j]);

    (current, reversed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        problem::distance_matrix::UNREACHABLE_COST,
        solver::construction::nearest_neighbor::nearest_neighbor,
        test_utils::{
            assert_two_opt_local_optimum, assert_valid_tour, random_asymmetric_matrix,
            random_euclidean_matrix, unit_square_matrix,
        },
    };

    fn reversed_cost(route: &Route, matrix: &DistanceMatrix, i: usize, j: usize) -> Cost {
        let mut candidate = route.clone();
        candidate.reverse_segment(i, j);
        candidate.cost(matrix)
    }

    #[test]
    fn test_unit_square_is_left_unchanged() {
        let matrix = unit_square_matrix();
        let route = Route::new(vec![0, 1, 2, 3, 0]);

        let optimized = two_opt(&route, &matrix, &TwoOptParams::default());

        assert_eq!(optimized, route);
    }

    #[test]
    fn test_uncrosses_route() {
        let matrix = unit_square_matrix();
        // 0 -> 2 and 1 -> 3 are the diagonals of the square
        let route = Route::new(vec![0, 2, 1, 3, 0]);

        let optimized = two_opt(&route, &matrix, &TwoOptParams::default());

        assert_eq!(optimized.nodes(), &[0, 1, 2, 3, 0]);
        assert_eq!(optimized.cost(&matrix), 400);
    }

    #[test]
    fn test_short_routes_are_untouched() {
        let matrix = unit_square_matrix();

        for nodes in [vec![0, 0], vec![0, 1, 0], vec![0, 2, 1, 0]] {
            let route = Route::new(nodes);
            assert_eq!(two_opt(&route, &matrix, &TwoOptParams::default()), route);
        }
    }

    #[test]
    fn test_delta_matches_full_evaluation() {
        for matrix in [random_euclidean_matrix(12, 7), random_asymmetric_matrix(12, 7)] {
            let route = nearest_neighbor(&matrix, 0).unwrap();
            let len = route.len();
            let current = route.cost(&matrix);

            for i in 1..len - 2 {
                for j in (i + 2)..=(len - 2) {
                    assert_eq!(
                        is_improving(route.nodes(), &matrix, i, j),
                        reversed_cost(&route, &matrix, i, j) < current,
                        "i={i} j={j}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_never_increases_cost_and_reaches_local_optimum() {
        for seed in 0..20 {
            for matrix in [
                random_euclidean_matrix(15, seed),
                random_asymmetric_matrix(15, seed),
            ] {
                let initial = nearest_neighbor(&matrix, 0).unwrap();

                let optimized = two_opt(&initial, &matrix, &TwoOptParams::default());

                assert_valid_tour(&optimized, 15, 0);
                assert!(optimized.cost(&matrix) <= initial.cost(&matrix));
                assert_two_opt_local_optimum(&optimized, &matrix);
            }
        }
    }

    #[test]
    fn test_deterministic() {
        let matrix = random_euclidean_matrix(25, 3);
        let initial = nearest_neighbor(&matrix, 0).unwrap();

        let first = two_opt(&initial, &matrix, &TwoOptParams::default());
        let second = two_opt(&initial, &matrix, &TwoOptParams::default());

        assert_eq!(first, second);
    }

    #[test]
    fn test_max_passes() {
        let matrix = unit_square_matrix();
        let route = Route::new(vec![0, 2, 1, 3, 0]);

        let untouched = two_opt(&route, &matrix, &TwoOptParams { max_passes: Some(0) });
        let one_pass = two_opt(&route, &matrix, &TwoOptParams { max_passes: Some(1) });

        assert_eq!(untouched, route);
        assert_eq!(one_pass.nodes(), &[0, 1, 2, 3, 0]);
    }

    #[test]
    fn test_huge_costs_do_not_overflow() {
        let huge = u64::MAX / 2 + 1;
        // ring 0 - 1 - 2 - 3 - 4 - 0 costs 1, every chord is huge
        let rows = (0..5)
            .map(|i: usize| {
                (0..5)
                    .map(|j: usize| match (i as isize - j as isize).rem_euclid(5) {
                        0 => 0,
                        1 | 4 => 1,
                        _ => huge,
                    })
                    .collect()
            })
            .collect();
        let matrix = DistanceMatrix::new(rows).unwrap();
        let route = Route::new(vec![0, 2, 1, 3, 4, 0]);

        let optimized = two_opt(&route, &matrix, &TwoOptParams::default());

        assert_eq!(optimized.nodes(), &[0, 1, 2, 3, 4, 0]);
        assert_eq!(optimized.cost(&matrix), 5);
    }

    #[test]
    fn test_avoids_unreachable_leg() {
        let s = UNREACHABLE_COST;
        let matrix = DistanceMatrix::new(vec![
            vec![0, 1, 5, 4, 7],
            vec![1, 0, 4, 2, 6],
            vec![5, 4, 0, 3, s],
            vec![4, 2, 3, 0, 2],
            vec![7, 6, s, 2, 0],
        ])
        .unwrap();

        let initial = nearest_neighbor(&matrix, 0).unwrap();
        assert_eq!(initial.nodes(), &[0, 1, 3, 4, 2, 0]);
        assert_eq!(initial.unreachable_legs(&matrix), 1);

        let optimized = two_opt(&initial, &matrix, &TwoOptParams::default());

        assert_valid_tour(&optimized, 5, 0);
        assert_eq!(optimized.unreachable_legs(&matrix), 0);
        assert!(optimized.cost(&matrix) < UNREACHABLE_COST);
    }
}
