use serde::{Deserialize, Serialize};

use crate::{google_maps_api::TravelMode, travel_matrix::TravelMatrix};

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TravelMatrixProvider {
    /// https://developers.google.com/maps/documentation/distance-matrix
    GoogleMaps {
        #[serde(default)]
        mode: TravelMode,
    },
    AsTheCrowFlies,
    Custom {
        matrix: TravelMatrix,
    },
}

impl TravelMatrixProvider {
    /// Whether the provider can only work from resolved coordinates.
    pub fn requires_coordinates(&self) -> bool {
        matches!(self, TravelMatrixProvider::AsTheCrowFlies)
    }
}

impl Default for TravelMatrixProvider {
    fn default() -> Self {
        TravelMatrixProvider::GoogleMaps {
            mode: TravelMode::default(),
        }
    }
}
