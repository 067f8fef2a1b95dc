use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::{
    batch::{MatrixBlock, partition_blocks},
    distance_matrix_api::{BlockResponse, DistanceMatrixApi},
    error::MatrixProviderError,
    travel_matrix::{TravelMatrix, UNREACHABLE_COST},
    waypoint::Waypoint,
};

pub const DEFAULT_BATCH_SIZE: usize = 10;
pub const DEFAULT_REQUEST_DELAY: Duration = Duration::from_secs(1);

#[derive(Debug, Clone)]
pub struct MatrixBuilderParams {
    /// Maximum number of origins, and of destinations, per request
    pub batch_size: usize,
    /// Minimum delay between two consecutive requests
    pub request_delay: Duration,
}

impl Default for MatrixBuilderParams {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            request_delay: DEFAULT_REQUEST_DELAY,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct BlockProgress {
    pub completed: usize,
    pub total: usize,
    pub failed: bool,
}

#[derive(Debug)]
pub struct MatrixBuildReport {
    pub matrix: TravelMatrix,
    pub num_blocks: usize,
    /// Blocks whose request failed, their cells hold [`UNREACHABLE_COST`]
    pub failed_blocks: Vec<MatrixBlock>,
}

type ProgressCallback = Box<dyn Fn(BlockProgress) + Send + Sync>;

/// Builds a full travel matrix out of bounded, rate limited block requests.
pub struct DistanceMatrixBuilder {
    params: MatrixBuilderParams,
    on_block: Option<ProgressCallback>,
}

impl DistanceMatrixBuilder {
    pub fn new(params: MatrixBuilderParams) -> Result<Self, MatrixProviderError> {
        if params.batch_size == 0 {
            return Err(MatrixProviderError::InvalidBatchSize);
        }

        Ok(Self {
            params,
            on_block: None,
        })
    }

    pub fn on_block_completed<F>(&mut self, callback: F)
    where
        F: Fn(BlockProgress) + Send + Sync + 'static,
    {
        self.on_block = Some(Box::new(callback));
    }

    pub async fn build<A>(
        &self,
        api: &A,
        waypoints: &[Waypoint],
    ) -> Result<MatrixBuildReport, MatrixProviderError>
    where
        A: DistanceMatrixApi,
    {
        let num_locations = waypoints.len();
        let blocks = partition_blocks(num_locations, self.params.batch_size);
        let total = blocks.len();

        info!(
            "MatrixBuilder: fetching {}x{} matrix in {} blocks",
            num_locations, num_locations, total
        );

        let mut matrix = TravelMatrix::unreachable(num_locations);
        let mut failed_blocks = Vec::new();
        let mut last_request: Option<Instant> = None;

        for (index, block) in blocks.into_iter().enumerate() {
            if let Some(last) = last_request {
                tokio::time::sleep_until(last + self.params.request_delay).await;
            }
            last_request = Some(Instant::now());

            let origins = &waypoints[block.origins.clone()];
            let destinations = &waypoints[block.destinations.clone()];

            let result = api
                .fetch_block(origins, destinations)
                .await
                .and_then(|response| fill_block(&mut matrix, &block, response));

            let failed = match result {
                Ok(()) => {
                    debug!(
                        "MatrixBuilder: block {}/{} ({:?} x {:?}) done",
                        index + 1,
                        total,
                        block.origins,
                        block.destinations
                    );
                    false
                }
                Err(error) => {
                    warn!(
                        "MatrixBuilder: block {:?} x {:?} failed, cells left unreachable: {}",
                        block.origins, block.destinations, error
                    );
                    failed_blocks.push(block);
                    true
                }
            };

            if let Some(on_block) = &self.on_block {
                on_block(BlockProgress {
                    completed: index + 1,
                    total,
                    failed,
                });
            }
        }

        Ok(MatrixBuildReport {
            matrix,
            num_blocks: total,
            failed_blocks,
        })
    }
}

/// Validates the whole block before touching the matrix so a malformed
/// response never leaves a half written block behind.
fn fill_block(
    matrix: &mut TravelMatrix,
    block: &MatrixBlock,
    response: BlockResponse,
) -> Result<(), MatrixProviderError> {
    let expected_rows = block.origins.len();
    let expected_cols = block.destinations.len();

    if response.len() != expected_rows || response.iter().any(|row| row.len() != expected_cols) {
        return Err(MatrixProviderError::ShapeMismatch {
            expected_rows,
            expected_cols,
            rows: response.len(),
            cols: response.first().map_or(0, Vec::len),
        });
    }

    for (row, from) in response.into_iter().zip(block.origins.clone()) {
        for (element, to) in row.into_iter().zip(block.destinations.clone()) {
            let cost = if from == to {
                0
            } else {
                element
                    .routable_distance()
                    .map_or(UNREACHABLE_COST, |distance| distance.min(UNREACHABLE_COST - 1))
            };
            matrix.set(from, to, cost);
        }
    }

    Ok(())
}
