#![allow(dead_code)]

use iris_matrix_providers::{
    distance_matrix_api::{BlockResponse, DistanceMatrixApi, ElementStatus, MatrixElement},
    error::MatrixProviderError,
    travel_matrix::UNREACHABLE_COST,
    waypoint::Waypoint,
};
use iris_optimizer::problem::{distance_matrix::DistanceMatrix, location::Location};

//
//  Unit square, costs scaled by 100:
//
//  (0.0, 1.0) 1 ---- 2 (1.0, 1.0)
//             |      |
//  (0.0, 0.0) 0 ---- 3 (1.0, 0.0)
//
pub fn square_matrix() -> DistanceMatrix {
    DistanceMatrix::from_euclidean(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)], 100.0)
}

/// Five locations where 2 and 4 cannot reach each other.
pub fn unreachable_pair_rows() -> Vec<Vec<u64>> {
    let s = UNREACHABLE_COST;
    vec![
        vec![0, 1, 5, 4, 7],
        vec![1, 0, 4, 2, 6],
        vec![5, 4, 0, 3, s],
        vec![4, 2, 3, 0, 2],
        vec![7, 6, s, 2, 0],
    ]
}

pub fn create_locations(names: &[&str]) -> Vec<Location> {
    names.iter().map(|&name| Location::new(name)).collect()
}

/// Answers every block out of a fixed matrix, looking waypoints up by address.
/// Unreachable cells are reported as `ZERO_RESULTS`.
pub struct FixedMatrixApi {
    pub addresses: Vec<String>,
    pub rows: Vec<Vec<u64>>,
}

impl FixedMatrixApi {
    pub fn new(addresses: &[&str], rows: Vec<Vec<u64>>) -> Self {
        Self {
            addresses: addresses.iter().map(|&address| address.to_owned()).collect(),
            rows,
        }
    }

    fn index(&self, waypoint: &Waypoint) -> usize {
        self.addresses
            .iter()
            .position(|address| *address == waypoint.address)
            .unwrap()
    }
}

impl DistanceMatrixApi for FixedMatrixApi {
    async fn fetch_block(
        &self,
        origins: &[Waypoint],
        destinations: &[Waypoint],
    ) -> Result<BlockResponse, MatrixProviderError> {
        Ok(origins
            .iter()
            .map(|from| {
                destinations
                    .iter()
                    .map(|to| match self.rows[self.index(from)][self.index(to)] {
                        UNREACHABLE_COST => MatrixElement::with_status(ElementStatus::ZeroResults),
                        distance => MatrixElement::ok(distance),
                    })
                    .collect()
            })
            .collect())
    }
}
