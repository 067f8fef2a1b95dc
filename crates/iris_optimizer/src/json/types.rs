use iris_matrix_providers::{
    travel_matrix_client::TravelMatrixClient,
    travel_matrix_provider::TravelMatrixProvider,
    waypoint::{Coordinates, Waypoint},
};
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

use crate::{
    problem::{distance_matrix::DistanceMatrix, location::Location},
    solver::{
        solve_request::{AlgorithmResult, SolveRequest},
        strategy::Strategy,
    },
};

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields, rename = "RouteRequest")]
pub struct JsonRouteRequest {
    /// The first location is the depot.
    pub locations: Vec<JsonLocation>,
    #[serde(default = "default_algorithms")]
    pub algorithms: Vec<String>,
    #[serde(default)]
    pub provider: TravelMatrixProvider,
}

fn default_algorithms() -> Vec<String> {
    Strategy::ALL
        .iter()
        .map(|strategy| strategy.name().to_owned())
        .collect()
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields, rename = "Location")]
pub struct JsonLocation {
    pub address: String,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

impl TryFrom<&JsonLocation> for Waypoint {
    type Error = anyhow::Error;

    fn try_from(value: &JsonLocation) -> Result<Self, Self::Error> {
        match (value.lat, value.lon) {
            (Some(lat), Some(lon)) => Ok(Waypoint::from_coordinates(
                value.address.clone(),
                Coordinates::new(lat, lon),
            )),
            (None, None) => Ok(Waypoint::from_address(value.address.clone())),
            _ => anyhow::bail!("Location {:?} needs both lat and lon", value.address),
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename = "RouteResponse")]
pub struct JsonRouteResponse {
    pub locations: Vec<String>,
    pub results: Vec<AlgorithmResult>,
}

impl JsonRouteRequest {
    /// Geocodes the locations when the provider needs it, then builds the
    /// travel matrix.
    #[instrument(skip_all, level = "debug")]
    pub async fn build_request(&self, client: &TravelMatrixClient) -> anyhow::Result<SolveRequest> {
        let mut waypoints = self
            .locations
            .iter()
            .map(Waypoint::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        if !matches!(self.provider, TravelMatrixProvider::Custom { .. }) {
            client.resolve_waypoints(&mut waypoints).await?;
        }

        let report = client
            .fetch_matrix(&waypoints, self.provider.clone())
            .await?;

        if !report.failed_blocks.is_empty() {
            warn!(
                "{} of {} matrix blocks failed, their pairs are unreachable",
                report.failed_blocks.len(),
                report.num_blocks
            );
        }

        let matrix = DistanceMatrix::from_travel_matrix(report.matrix)?;
        let locations = waypoints.into_iter().map(Location::from).collect();

        Ok(SolveRequest::new(locations, matrix)?)
    }
}
