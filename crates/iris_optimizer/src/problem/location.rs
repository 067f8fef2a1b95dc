use iris_matrix_providers::waypoint::{Coordinates, Waypoint};

/// A stop of the route. Index 0 of a problem is the depot.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    id: String,
    coordinates: Option<Coordinates>,
}

impl Location {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            coordinates: None,
        }
    }

    pub fn from_lat_lon(id: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            id: id.into(),
            coordinates: Some(Coordinates::new(lat, lon)),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        self.coordinates
    }

    pub fn lat(&self) -> Option<f64> {
        self.coordinates.map(|coordinates| coordinates.lat)
    }

    pub fn lon(&self) -> Option<f64> {
        self.coordinates.map(|coordinates| coordinates.lon)
    }
}

impl From<&Location> for Waypoint {
    fn from(location: &Location) -> Self {
        Waypoint {
            address: location.id.clone(),
            coordinates: location.coordinates,
        }
    }
}

impl From<Waypoint> for Location {
    fn from(waypoint: Waypoint) -> Self {
        Self {
            id: waypoint.address,
            coordinates: waypoint.coordinates,
        }
    }
}
