use tracing::info;

use crate::{
    as_the_crow_flies::AsTheCrowFliesApi,
    error::MatrixProviderError,
    geocoding::{DEFAULT_GEOCODING_DELAY, geocode_all},
    google_maps_api::{GoogleMapsClient, TravelMode},
    matrix_builder::{BlockProgress, DistanceMatrixBuilder, MatrixBuildReport, MatrixBuilderParams},
    travel_matrix_provider::TravelMatrixProvider,
    waypoint::Waypoint,
};

pub struct TravelMatrixClient {
    google_maps_client: Option<GoogleMapsClient>,
    builder: DistanceMatrixBuilder,
}

impl TravelMatrixClient {
    pub fn new(
        google_maps_client: Option<GoogleMapsClient>,
        params: MatrixBuilderParams,
    ) -> Result<Self, MatrixProviderError> {
        Ok(Self {
            google_maps_client,
            builder: DistanceMatrixBuilder::new(params)?,
        })
    }

    /// Reads the Google Maps key from the environment when present.
    pub fn from_env(params: MatrixBuilderParams) -> Result<Self, MatrixProviderError> {
        Self::new(GoogleMapsClient::from_env(TravelMode::default()).ok(), params)
    }

    pub fn on_block_completed<F>(&mut self, callback: F)
    where
        F: Fn(BlockProgress) + Send + Sync + 'static,
    {
        self.builder.on_block_completed(callback);
    }

    fn google_maps_client(&self) -> anyhow::Result<&GoogleMapsClient> {
        self.google_maps_client.as_ref().ok_or_else(|| {
            anyhow::anyhow!(MatrixProviderError::MissingApiKey(
                crate::google_maps_api::GOOGLE_MAPS_API_KEY_ENV_VAR
            ))
        })
    }

    /// Resolves the coordinates of every waypoint that has none.
    pub async fn resolve_waypoints(&self, waypoints: &mut [Waypoint]) -> anyhow::Result<()> {
        let missing: Vec<usize> = waypoints
            .iter()
            .enumerate()
            .filter(|(_, waypoint)| waypoint.coordinates.is_none())
            .map(|(index, _)| index)
            .collect();

        if missing.is_empty() {
            return Ok(());
        }

        info!("Geocoding {} address(es)", missing.len());

        let addresses: Vec<String> = missing
            .iter()
            .map(|&index| waypoints[index].address.clone())
            .collect();
        let coordinates = geocode_all(
            self.google_maps_client()?,
            &addresses,
            DEFAULT_GEOCODING_DELAY,
        )
        .await?;

        for (index, coordinates) in missing.into_iter().zip(coordinates) {
            waypoints[index].coordinates = Some(coordinates);
        }

        Ok(())
    }

    pub async fn fetch_matrix(
        &self,
        waypoints: &[Waypoint],
        provider: TravelMatrixProvider,
    ) -> anyhow::Result<MatrixBuildReport> {
        match provider {
            TravelMatrixProvider::GoogleMaps { mode } => {
                let client = self.google_maps_client()?.with_mode(mode);
                Ok(self.builder.build(&client, waypoints).await?)
            }
            TravelMatrixProvider::AsTheCrowFlies => {
                Ok(self.builder.build(&AsTheCrowFliesApi, waypoints).await?)
            }
            TravelMatrixProvider::Custom { matrix } => {
                if matrix.num_locations != waypoints.len()
                    || matrix.costs.len() != matrix.num_locations * matrix.num_locations
                {
                    anyhow::bail!(
                        "Custom matrix does not match the {} locations",
                        waypoints.len()
                    );
                }

                Ok(MatrixBuildReport {
                    matrix,
                    num_blocks: 0,
                    failed_blocks: Vec::new(),
                })
            }
        }
    }
}
