use crate::problem::distance_matrix::{Cost, DistanceMatrix};

/// Sum of the legs `nodes[k] -> nodes[k + 1]`.
pub fn route_cost(nodes: &[usize], matrix: &DistanceMatrix) -> Cost {
    nodes
        .windows(2)
        .map(|leg| matrix.cost(leg[0], leg[1]))
        .fold(0, Cost::saturating_add)
}
