use std::fmt::Display;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    distance_matrix_api::{BlockResponse, DistanceMatrixApi, ElementStatus, MatrixElement},
    error::MatrixProviderError,
    geocoding::Geocoder,
    waypoint::{Coordinates, Waypoint},
};

pub const GOOGLE_MAPS_API_KEY_ENV_VAR: &str = "GOOGLE_MAPS_API_KEY";

pub const GOOGLE_MAPS_DISTANCE_MATRIX_API_URL: &str =
    "https://maps.googleapis.com/maps/api/distancematrix/json";
pub const GOOGLE_MAPS_GEOCODING_API_URL: &str =
    "https://maps.googleapis.com/maps/api/geocode/json";

#[derive(Deserialize, Serialize, Debug, Copy, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TravelMode {
    #[default]
    Driving,
    Walking,
    Bicycling,
}

impl Display for TravelMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                TravelMode::Driving => "driving",
                TravelMode::Walking => "walking",
                TravelMode::Bicycling => "bicycling",
            }
        )
    }
}

#[derive(Deserialize)]
struct DistanceMatrixResponse {
    status: String,
    error_message: Option<String>,
    #[serde(default)]
    rows: Vec<DistanceMatrixRow>,
}

#[derive(Deserialize)]
struct DistanceMatrixRow {
    elements: Vec<DistanceMatrixElement>,
}

#[derive(Deserialize)]
struct DistanceMatrixElement {
    status: ElementStatus,
    distance: Option<TextValue>,
}

#[derive(Deserialize)]
struct TextValue {
    value: u64,
}

#[derive(Deserialize)]
struct GeocodingResponse {
    status: String,
    error_message: Option<String>,
    #[serde(default)]
    results: Vec<GeocodingResult>,
}

#[derive(Deserialize)]
struct GeocodingResult {
    geometry: Geometry,
}

#[derive(Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

pub struct GoogleMapsClientParams {
    pub api_key: String,
    pub mode: TravelMode,
}

pub struct GoogleMapsClient {
    params: GoogleMapsClientParams,
    client: reqwest::Client,
}

impl GoogleMapsClient {
    pub fn new(params: GoogleMapsClientParams) -> Self {
        Self {
            params,
            client: reqwest::Client::new(),
        }
    }

    pub fn from_env(mode: TravelMode) -> Result<Self, MatrixProviderError> {
        let api_key = std::env::var(GOOGLE_MAPS_API_KEY_ENV_VAR)
            .map_err(|_| MatrixProviderError::MissingApiKey(GOOGLE_MAPS_API_KEY_ENV_VAR))?;

        Ok(Self::new(GoogleMapsClientParams { api_key, mode }))
    }

    /// Same key and connection pool, different travel mode.
    pub fn with_mode(&self, mode: TravelMode) -> Self {
        Self {
            params: GoogleMapsClientParams {
                api_key: self.params.api_key.clone(),
                mode,
            },
            client: self.client.clone(),
        }
    }

    async fn get<T>(&self, url: &str, query: &[(&str, String)]) -> Result<T, MatrixProviderError>
    where
        T: for<'de> Deserialize<'de>,
    {
        let response = self
            .client
            .get(url)
            .query(query)
            .query(&[("key", &self.params.api_key)])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16().to_string();
            let message = response.text().await.unwrap_or_default();
            return Err(MatrixProviderError::Api { status, message });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

fn join_waypoints(waypoints: &[Waypoint]) -> String {
    waypoints
        .iter()
        .map(Waypoint::query)
        .collect::<Vec<_>>()
        .join("|")
}

fn into_block_response(
    response: DistanceMatrixResponse,
) -> Result<BlockResponse, MatrixProviderError> {
    if response.status != "OK" {
        return Err(MatrixProviderError::Api {
            status: response.status,
            message: response.error_message.unwrap_or_default(),
        });
    }

    Ok(response
        .rows
        .into_iter()
        .map(|row| {
            row.elements
                .into_iter()
                .map(|element| MatrixElement {
                    status: element.status,
                    distance: element.distance.map(|distance| distance.value),
                })
                .collect()
        })
        .collect())
}

fn into_coordinates(
    response: GeocodingResponse,
) -> Result<Option<Coordinates>, MatrixProviderError> {
    match response.status.as_str() {
        "OK" => Ok(response
            .results
            .into_iter()
            .next()
            .map(|result| Coordinates::new(result.geometry.location.lat, result.geometry.location.lng))),
        "ZERO_RESULTS" => Ok(None),
        _ => Err(MatrixProviderError::Api {
            status: response.status,
            message: response.error_message.unwrap_or_default(),
        }),
    }
}

impl DistanceMatrixApi for GoogleMapsClient {
    async fn fetch_block(
        &self,
        origins: &[Waypoint],
        destinations: &[Waypoint],
    ) -> Result<BlockResponse, MatrixProviderError> {
        debug!(
            "GoogleMapsApi: requesting {}x{} distance matrix",
            origins.len(),
            destinations.len()
        );

        let response: DistanceMatrixResponse = self
            .get(
                GOOGLE_MAPS_DISTANCE_MATRIX_API_URL,
                &[
                    ("origins", join_waypoints(origins)),
                    ("destinations", join_waypoints(destinations)),
                    ("mode", self.params.mode.to_string()),
                ],
            )
            .await?;

        into_block_response(response)
    }
}

impl Geocoder for GoogleMapsClient {
    async fn geocode(&self, address: &str) -> Result<Option<Coordinates>, MatrixProviderError> {
        let response: GeocodingResponse = self
            .get(GOOGLE_MAPS_GEOCODING_API_URL, &[("address", address.to_string())])
            .await?;

        into_coordinates(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_distance_matrix_response() {
        let body = r#"{
            "destination_addresses": ["a", "b"],
            "origin_addresses": ["a"],
            "rows": [{
                "elements": [
                    { "distance": { "text": "1 m", "value": 0 }, "duration": { "text": "1 min", "value": 0 }, "status": "OK" },
                    { "status": "ZERO_RESULTS" }
                ]
            }],
            "status": "OK"
        }"#;
        let response: DistanceMatrixResponse = serde_json::from_str(body).unwrap();

        let block = into_block_response(response).unwrap();

        assert_eq!(block.len(), 1);
        assert_eq!(block[0][0], MatrixElement::ok(0));
        assert_eq!(block[0][1].status, ElementStatus::ZeroResults);
        assert_eq!(block[0][1].routable_distance(), None);
    }

    #[test]
    fn test_unknown_element_status() {
        let body = r#"{ "rows": [{ "elements": [{ "status": "SOMETHING_NEW" }] }], "status": "OK" }"#;
        let response: DistanceMatrixResponse = serde_json::from_str(body).unwrap();

        let block = into_block_response(response).unwrap();

        assert_eq!(block[0][0].status, ElementStatus::Unknown);
    }

    #[test]
    fn test_request_level_error() {
        let body = r#"{ "rows": [], "status": "OVER_QUERY_LIMIT", "error_message": "slow down" }"#;
        let response: DistanceMatrixResponse = serde_json::from_str(body).unwrap();

        match into_block_response(response) {
            Err(MatrixProviderError::Api { status, message }) => {
                assert_eq!(status, "OVER_QUERY_LIMIT");
                assert_eq!(message, "slow down");
            }
            _ => panic!("expected an API error"),
        }
    }

    #[test]
    fn test_parse_geocoding_response() {
        let body = r#"{
            "results": [{ "geometry": { "location": { "lat": 50.8467, "lng": 4.3525 } } }],
            "status": "OK"
        }"#;
        let response: GeocodingResponse = serde_json::from_str(body).unwrap();

        assert_eq!(
            into_coordinates(response).unwrap(),
            Some(Coordinates::new(50.8467, 4.3525))
        );

        let empty: GeocodingResponse =
            serde_json::from_str(r#"{ "results": [], "status": "ZERO_RESULTS" }"#).unwrap();
        assert_eq!(into_coordinates(empty).unwrap(), None);
    }

    #[test]
    fn test_join_waypoints_prefers_coordinates() {
        let waypoints = vec![
            Waypoint::from_address("Meir, Antwerp"),
            Waypoint::from_coordinates("Grand Place", Coordinates::new(50.5, 4.25)),
        ];

        assert_eq!(join_waypoints(&waypoints), "Meir, Antwerp|50.5,4.25");
    }
}
