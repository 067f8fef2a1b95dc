pub mod as_the_crow_flies;
pub mod batch;
pub mod distance_matrix_api;
pub mod error;
pub mod geocoding;
pub mod google_maps_api;
pub mod matrix_builder;
pub mod travel_matrix;
pub mod travel_matrix_client;
pub mod travel_matrix_provider;
pub mod waypoint;

#[cfg(test)]
pub(crate) mod test_utils;
