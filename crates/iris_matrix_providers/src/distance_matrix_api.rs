use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::{error::MatrixProviderError, waypoint::Waypoint};

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ElementStatus {
    Ok,
    NotFound,
    ZeroResults,
    MaxRouteLengthExceeded,
    #[serde(other)]
    Unknown,
}

/// One origin/destination pair of a block response.
/// `distance` is only meaningful when `status` is [`ElementStatus::Ok`].
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixElement {
    pub status: ElementStatus,
    pub distance: Option<u64>,
}

impl MatrixElement {
    pub fn ok(distance: u64) -> Self {
        Self {
            status: ElementStatus::Ok,
            distance: Some(distance),
        }
    }

    pub fn with_status(status: ElementStatus) -> Self {
        Self {
            status,
            distance: None,
        }
    }

    /// The trusted distance of this element, if any.
    pub fn routable_distance(&self) -> Option<u64> {
        match self.status {
            ElementStatus::Ok => self.distance,
            _ => None,
        }
    }
}

/// Rows indexed by origin, columns by destination.
pub type BlockResponse = Vec<Vec<MatrixElement>>;

/// External routing capability answering origins x destinations queries.
pub trait DistanceMatrixApi {
    fn fetch_block(
        &self,
        origins: &[Waypoint],
        destinations: &[Waypoint],
    ) -> impl Future<Output = Result<BlockResponse, MatrixProviderError>> + Send;
}
