use std::{future::Future, time::Duration};

use fxhash::FxHashMap;
use tracing::{debug, warn};

use crate::{
    error::{GeocodingError, MatrixProviderError},
    waypoint::Coordinates,
};

pub const DEFAULT_GEOCODING_DELAY: Duration = Duration::from_millis(100);

/// External capability resolving an address to coordinates.
/// `Ok(None)` means the address is unknown to the provider.
pub trait Geocoder {
    fn geocode(
        &self,
        address: &str,
    ) -> impl Future<Output = Result<Option<Coordinates>, MatrixProviderError>> + Send;
}

/// Geocodes every address in order, one request per distinct address.
///
/// Fails with [`GeocodingError::Unresolved`] naming every address that could
/// not be resolved; coordinates are never defaulted.
pub async fn geocode_all<G>(
    geocoder: &G,
    addresses: &[String],
    delay: Duration,
) -> Result<Vec<Coordinates>, GeocodingError>
where
    G: Geocoder,
{
    let mut resolved: FxHashMap<&str, Option<Coordinates>> = FxHashMap::default();

    for address in addresses {
        if resolved.contains_key(address.as_str()) {
            continue;
        }

        if !resolved.is_empty() && !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let coordinates = geocoder.geocode(address).await?;
        debug!("Geocoding: {} -> {:?}", address, coordinates);
        resolved.insert(address.as_str(), coordinates);
    }

    let unresolved: Vec<String> = addresses
        .iter()
        .filter(|address| resolved.get(address.as_str()).is_some_and(Option::is_none))
        .cloned()
        .collect();

    if !unresolved.is_empty() {
        warn!("Geocoding: {} address(es) unresolved", unresolved.len());
        return Err(GeocodingError::Unresolved {
            addresses: unresolved,
        });
    }

    Ok(addresses
        .iter()
        .filter_map(|address| resolved.get(address.as_str()).copied().flatten())
        .collect())
}
