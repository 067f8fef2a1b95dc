use crate::{problem::distance_matrix::Cost, solver::christofides::graph::CompleteGraph};

/// Largest vertex set matched exactly. The bitmask table holds `2^n` entries.
pub const EXACT_MATCHING_LIMIT: usize = 20;

/// Minimum weight perfect matching over `nodes`, which must have an even length.
///
/// Exact up to [`EXACT_MATCHING_LIMIT`] nodes. Larger sets fall back to a greedy
/// matching improved by pairwise swaps, which is not guaranteed to be minimal.
pub fn minimum_weight_perfect_matching(
    graph: &CompleteGraph,
    nodes: &[usize],
) -> Vec<(usize, usize)> {
    debug_assert!(nodes.len() % 2 == 0);

    if nodes.len() <= EXACT_MATCHING_LIMIT {
        exact_matching(graph, nodes)
    } else {
        let mut matching = greedy_matching(graph, nodes);
        improve_matching(graph, &mut matching);
        matching
    }
}

pub fn matching_weight(graph: &CompleteGraph, matching: &[(usize, usize)]) -> Cost {
    matching.iter().map(|&(u, v)| graph.weight(u, v)).sum()
}

/// Dynamic program over subsets: the lowest unmatched node of a set is
/// always paired first, so each reachable set is solved once.
fn exact_matching(graph: &CompleteGraph, nodes: &[usize]) -> Vec<(usize, usize)> {
    let k = nodes.len();
    if k == 0 {
        return Vec::new();
    }

    let full = (1usize << k) - 1;
    let mut best = vec![Cost::MAX; full + 1];
    let mut choice = vec![(0u8, 0u8); full + 1];
    best[0] = 0;

    for mask in 0..full {
        if best[mask] == Cost::MAX {
            continue;
        }

        let i = (!mask).trailing_zeros() as usize;
        for j in (i + 1)..k {
            if mask & (1 << j) != 0 {
                continue;
            }

            let next = mask | (1 << i) | (1 << j);
            let cost = best[mask] + graph.weight(nodes[i], nodes[j]);
            if cost < best[next] {
                best[next] = cost;
                choice[next] = (i as u8, j as u8);
            }
        }
    }

    let mut matching = Vec::with_capacity(k / 2);
    let mut mask = full;
    while mask != 0 {
        let (i, j) = choice[mask];
        matching.push((nodes[i as usize], nodes[j as usize]));
        mask &= !((1 << i) | (1 << j));
    }

    matching
}

fn greedy_matching(graph: &CompleteGraph, nodes: &[usize]) -> Vec<(usize, usize)> {
    let mut pairs = Vec::with_capacity(nodes.len() * nodes.len() / 2);
    for (a, &u) in nodes.iter().enumerate() {
        for &v in &nodes[a + 1..] {
            pairs.push((graph.weight(u, v), u, v));
        }
    }
    pairs.sort_unstable();

    let mut matched = vec![false; graph.num_nodes()];
    let mut matching = Vec::with_capacity(nodes.len() / 2);
    for (_, u, v) in pairs {
        if !matched[u] && !matched[v] {
            matched[u] = true;
            matched[v] = true;
            matching.push((u, v));
        }
    }

    matching
}

/// Re-pairs two matched edges whenever that lowers the total, until stable.
fn improve_matching(graph: &CompleteGraph, matching: &mut [(usize, usize)]) {
    let mut improved = true;
    while improved {
        improved = false;
        for p in 0..matching.len() {
            for q in (p + 1)..matching.len() {
                let (a, b) = matching[p];
                let (c, d) = matching[q];
                let current = graph.weight(a, b) + graph.weight(c, d);

                if graph.weight(a, c) + graph.weight(b, d) < current {
                    matching[p] = (a, c);
                    matching[q] = (b, d);
                    improved = true;
                } else if graph.weight(a, d) + graph.weight(b, c) < current {
                    matching[p] = (a, d);
                    matching[q] = (b, c);
                    improved = true;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        solver::christofides::graph::Symmetrization, test_utils::random_euclidean_matrix,
    };

    fn brute_force(graph: &CompleteGraph, nodes: &[usize]) -> Cost {
        if nodes.is_empty() {
            return 0;
        }

        let first = nodes[0];
        (1..nodes.len())
            .map(|j| {
                let rest: Vec<usize> = nodes[1..]
                    .iter()
                    .enumerate()
                    .filter(|&(index, _)| index + 1 != j)
                    .map(|(_, &node)| node)
                    .collect();
                graph.weight(first, nodes[j]) + brute_force(graph, &rest)
            })
            .min()
            .unwrap()
    }

    fn assert_perfect(matching: &[(usize, usize)], nodes: &[usize]) {
        let mut matched: Vec<usize> = matching.iter().flat_map(|&(u, v)| [u, v]).collect();
        matched.sort();
        let mut expected = nodes.to_vec();
        expected.sort();
        assert_eq!(matched, expected);
    }

    #[test]
    fn test_exact_matches_brute_force() {
        for seed in 0..10 {
            let matrix = random_euclidean_matrix(12, seed);
            let graph = CompleteGraph::from_matrix(&matrix, Symmetrization::Upper).unwrap();
            let nodes: Vec<usize> = (0..10).map(|i| i + (seed as usize % 2)).collect();

            let matching = minimum_weight_perfect_matching(&graph, &nodes);

            assert_perfect(&matching, &nodes);
            assert_eq!(matching_weight(&graph, &matching), brute_force(&graph, &nodes));
        }
    }

    #[test]
    fn test_empty_set() {
        let matrix = random_euclidean_matrix(3, 0);
        let graph = CompleteGraph::from_matrix(&matrix, Symmetrization::Upper).unwrap();

        assert!(minimum_weight_perfect_matching(&graph, &[]).is_empty());
    }

    #[test]
    fn test_large_sets_are_perfect() {
        let matrix = random_euclidean_matrix(60, 5);
        let graph = CompleteGraph::from_matrix(&matrix, Symmetrization::Upper).unwrap();
        let nodes: Vec<usize> = (0..30).map(|i| i * 2).collect();

        let matching = minimum_weight_perfect_matching(&graph, &nodes);
        let greedy = greedy_matching(&graph, &nodes);

        assert_perfect(&matching, &nodes);
        assert!(matching_weight(&graph, &matching) <= matching_weight(&graph, &greedy));
    }
}
