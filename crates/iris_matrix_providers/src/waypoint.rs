use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.lat, self.lon)
    }
}

impl From<Coordinates> for geo::Point {
    fn from(value: Coordinates) -> Self {
        geo::Point::new(value.lon, value.lat)
    }
}

/// A point handed to a distance matrix API.
/// Providers that can route on addresses use `address` when no coordinates are known.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Waypoint {
    pub address: String,
    pub coordinates: Option<Coordinates>,
}

impl Waypoint {
    pub fn from_address(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            coordinates: None,
        }
    }

    pub fn from_coordinates(address: impl Into<String>, coordinates: Coordinates) -> Self {
        Self {
            address: address.into(),
            coordinates: Some(coordinates),
        }
    }

    /// The string sent to text based APIs, "lat,lon" when resolved.
    pub fn query(&self) -> String {
        match self.coordinates {
            Some(coordinates) => coordinates.to_string(),
            None => self.address.clone(),
        }
    }
}
