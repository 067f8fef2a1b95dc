use fixedbitset::FixedBitSet;

use crate::solver::christofides::graph::MultiGraph;

/// Hierholzer's algorithm. Every node of `graph` must have an even degree
/// and all edges must be reachable from `start`.
///
/// The returned circuit starts and ends at `start` and uses each edge once.
pub fn eulerian_circuit(graph: &MultiGraph, start: usize) -> Vec<usize> {
    let mut used = FixedBitSet::with_capacity(graph.num_edges());
    let mut cursor = vec![0; graph.num_nodes()];
    let mut stack = vec![start];
    let mut circuit = Vec::with_capacity(graph.num_edges() + 1);

    while let Some(&node) = stack.last() {
        let incident = graph.incident_edges(node);

        while cursor[node] < incident.len() && used.contains(incident[cursor[node]]) {
            cursor[node] += 1;
        }

        match incident.get(cursor[node]) {
            Some(&edge) => {
                used.insert(edge);
                stack.push(graph.opposite(edge, node));
            }
            None => {
                circuit.push(node);
                stack.pop();
            }
        }
    }

    circuit.reverse();
    circuit
}
