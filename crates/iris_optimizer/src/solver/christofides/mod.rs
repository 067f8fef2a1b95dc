pub mod euler;
pub mod graph;
pub mod matching;
pub mod mst;

use fixedbitset::FixedBitSet;
use tracing::debug;

use crate::{
    error::SolveError,
    problem::{
        distance_matrix::{Cost, DistanceMatrix},
        route::Route,
    },
};

use euler::eulerian_circuit;
use graph::{CompleteGraph, MultiGraph, Symmetrization};
use matching::{matching_weight, minimum_weight_perfect_matching};
use mst::minimum_spanning_tree;

#[derive(Debug, Clone)]
pub struct ChristofidesTour {
    pub route: Route,
    /// Weight of the spanning tree the tour was built from.
    pub mst_weight: Cost,
    /// Weight of the matching added over the odd degree nodes.
    pub matching_weight: Cost,
    /// Weight of `route` in the symmetrized graph.
    pub weight: Cost,
}

/// Christofides' construction over the symmetrized matrix.
///
/// The Euler circuit is walked from `depot`, so after dropping repeated nodes
/// the tour already starts there and only needs to be closed.
pub fn christofides(
    matrix: &DistanceMatrix,
    depot: usize,
    symmetrization: Symmetrization,
) -> Result<ChristofidesTour, SolveError> {
    matrix.check_depot(depot)?;

    let graph = CompleteGraph::from_matrix(matrix, symmetrization)?;
    let num_nodes = graph.num_nodes();

    let tree = minimum_spanning_tree(&graph);
    let mut multigraph = MultiGraph::new(num_nodes);
    for &(u, v) in &tree.edges {
        multigraph.add_edge(u, v);
    }

    let odd_nodes = multigraph.odd_degree_nodes();
    let matching = minimum_weight_perfect_matching(&graph, &odd_nodes);
    for &(u, v) in &matching {
        multigraph.add_edge(u, v);
    }

    let circuit = eulerian_circuit(&multigraph, depot);

    let mut visited = FixedBitSet::with_capacity(num_nodes);
    let mut nodes = Vec::with_capacity(num_nodes + 1);
    for node in circuit {
        if !visited.put(node) {
            nodes.push(node);
        }
    }
    nodes.push(depot);

    let weight = nodes
        .windows(2)
        .map(|leg| graph.weight(leg[0], leg[1]))
        .sum();

    let tour = ChristofidesTour {
        route: Route::new(nodes),
        mst_weight: tree.weight,
        matching_weight: matching_weight(&graph, &matching),
        weight,
    };

    debug!(
        "Christofides: {} odd nodes, mst {}, matching {}, tour {}",
        odd_nodes.len(),
        tour.mst_weight,
        tour.matching_weight,
        tour.weight
    );

    Ok(tour)
}
