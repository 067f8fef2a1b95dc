use std::sync::atomic::{AtomicUsize, Ordering};

use crate::{
    distance_matrix_api::{BlockResponse, DistanceMatrixApi, ElementStatus, MatrixElement},
    error::MatrixProviderError,
    waypoint::{Coordinates, Waypoint},
};

pub fn create_waypoints(count: usize) -> Vec<Waypoint> {
    (0..count)
        .map(|i| {
            Waypoint::from_coordinates(
                format!("location-{i}"),
                Coordinates::new(50.0 + i as f64 * 0.01, 4.0),
            )
        })
        .collect()
}

fn waypoint_index(waypoint: &Waypoint) -> usize {
    waypoint
        .address
        .trim_start_matches("location-")
        .parse()
        .unwrap()
}

/// Answers every block from a deterministic cost function, optionally
/// failing one call (1-based) or reporting a status for one pair.
#[derive(Default)]
pub struct MockMatrixApi {
    calls: AtomicUsize,
    failing_call: Option<usize>,
    status_override: Option<(usize, usize, ElementStatus)>,
}

impl MockMatrixApi {
    pub fn failing_on_call(call: usize) -> Self {
        Self {
            failing_call: Some(call),
            ..Self::default()
        }
    }

    pub fn with_status(from: usize, to: usize, status: ElementStatus) -> Self {
        Self {
            status_override: Some((from, to, status)),
            ..Self::default()
        }
    }

    pub fn distance(from: usize, to: usize) -> u64 {
        if from == to {
            0
        } else {
            (from * 31 + to * 7 + 100) as u64
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl DistanceMatrixApi for MockMatrixApi {
    async fn fetch_block(
        &self,
        origins: &[Waypoint],
        destinations: &[Waypoint],
    ) -> Result<BlockResponse, MatrixProviderError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.failing_call == Some(call) {
            return Err(MatrixProviderError::Api {
                status: "OVER_QUERY_LIMIT".to_string(),
                message: "mock failure".to_string(),
            });
        }

        Ok(origins
            .iter()
            .map(|origin| {
                let from = waypoint_index(origin);
                destinations
                    .iter()
                    .map(|destination| {
                        let to = waypoint_index(destination);
                        match self.status_override {
                            Some((f, t, status)) if f == from && t == to => {
                                MatrixElement::with_status(status)
                            }
                            _ => MatrixElement::ok(Self::distance(from, to)),
                        }
                    })
                    .collect()
            })
            .collect())
    }
}
