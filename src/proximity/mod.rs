//! Proximity queries over the place store.
//!
//! Both finders validate every input before touching the store, read one
//! snapshot per call, and return results ordered nearest-first with ties
//! broken by place id. All radii and distances are kilometers, following
//! the unit convention set by [`crate::utils::geo`].

use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::store::{PlaceStore, StoredPlace};
use crate::utils::geo::{haversine_distance_km, Coordinate, GeoError};

/// Radius applied when a nearby query does not specify one.
pub const DEFAULT_RADIUS_KM: f64 = 5.0;

#[derive(Debug, Error)]
pub enum ProximityError {
    #[error(transparent)]
    InvalidCoordinate(#[from] GeoError),
    #[error("invalid radius {0}: must be a non-negative finite number of kilometers")]
    InvalidRadius(f64),
    #[error("invalid viewport: {0}")]
    InvalidViewport(String),
    #[error(transparent)]
    Store(#[from] crate::store::StoreError),
}

/// Raw corner coordinates of a viewport query, south-west then north-east.
#[derive(Debug, Clone, Copy)]
pub struct ViewportBounds {
    pub sw_lat: f64,
    pub sw_lng: f64,
    pub ne_lat: f64,
    pub ne_lng: f64,
}

/// A validated rectangular bounding box.
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    sw: Coordinate,
    ne: Coordinate,
}

impl Viewport {
    pub fn new(bounds: ViewportBounds) -> Result<Self, ProximityError> {
        let sw = Coordinate::new(bounds.sw_lat, bounds.sw_lng)
            .map_err(|e| ProximityError::InvalidViewport(e.to_string()))?;
        let ne = Coordinate::new(bounds.ne_lat, bounds.ne_lng)
            .map_err(|e| ProximityError::InvalidViewport(e.to_string()))?;

        if sw.lat() > ne.lat() {
            return Err(ProximityError::InvalidViewport(format!(
                "south-west corner ({}) is north of north-east corner ({})",
                sw.lat(),
                ne.lat()
            )));
        }

        Ok(Self { sw, ne })
    }

    /// Containment test. Latitude is a plain closed interval; a box whose
    /// south-west longitude exceeds its north-east longitude crosses the
    /// ±180° antimeridian and matches longitudes on both sides of it.
    pub fn contains(&self, point: Coordinate) -> bool {
        let lat_in = self.sw.lat() <= point.lat() && point.lat() <= self.ne.lat();
        let lng_in = if self.sw.lng() <= self.ne.lng() {
            self.sw.lng() <= point.lng() && point.lng() <= self.ne.lng()
        } else {
            point.lng() >= self.sw.lng() || point.lng() <= self.ne.lng()
        };

        lat_in && lng_in
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearbyPlace {
    pub id: Uuid,
    pub name: String,
    pub distance_km: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewportPlace {
    pub id: Uuid,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub distance_km: f64,
}

/// Find all places within `radius_km` of a center point, nearest first.
///
/// A missing radius falls back to [`DEFAULT_RADIUS_KM`]. An empty result
/// is not an error; the first element of a non-empty result is the
/// globally nearest qualifying place.
pub async fn find_within_radius<S: PlaceStore>(
    store: &S,
    lat: f64,
    lng: f64,
    radius_km: Option<f64>,
) -> Result<Vec<NearbyPlace>, ProximityError> {
    let center = Coordinate::new(lat, lng)?;
    let radius_km = radius_km.unwrap_or(DEFAULT_RADIUS_KM);
    if !radius_km.is_finite() || radius_km < 0.0 {
        return Err(ProximityError::InvalidRadius(radius_km));
    }

    let snapshot = store.list_all().await?;

    let mut matches: Vec<NearbyPlace> = snapshot
        .into_iter()
        .filter_map(|place| {
            let location = stored_location(&place)?;
            let distance_km = haversine_distance_km(center, location);
            (distance_km <= radius_km).then(|| NearbyPlace {
                id: place.id,
                name: place.name,
                distance_km,
            })
        })
        .collect();

    matches.sort_by(|a, b| {
        a.distance_km
            .total_cmp(&b.distance_km)
            .then_with(|| a.id.cmp(&b.id))
    });

    Ok(matches)
}

/// Find all places inside a viewport, ordered by distance from a
/// reference point.
///
/// Containment in the box alone decides inclusion; the distance to the
/// reference point only ranks the result.
pub async fn find_in_viewport<S: PlaceStore>(
    store: &S,
    bounds: ViewportBounds,
    ref_lat: f64,
    ref_lng: f64,
) -> Result<Vec<ViewportPlace>, ProximityError> {
    let viewport = Viewport::new(bounds)?;
    let reference = Coordinate::new(ref_lat, ref_lng)?;

    let snapshot = store.list_all().await?;

    let mut matches: Vec<ViewportPlace> = snapshot
        .into_iter()
        .filter_map(|place| {
            let location = stored_location(&place)?;
            viewport.contains(location).then(|| ViewportPlace {
                id: place.id,
                latitude: place.latitude,
                longitude: place.longitude,
                distance_km: haversine_distance_km(reference, location),
                name: place.name,
            })
        })
        .collect();

    matches.sort_by(|a, b| {
        a.distance_km
            .total_cmp(&b.distance_km)
            .then_with(|| a.id.cmp(&b.id))
    });

    Ok(matches)
}

/// Coordinates are validated when a place is written, so a row failing
/// here means out-of-band corruption; it is logged and excluded instead
/// of failing the whole query.
fn stored_location(place: &StoredPlace) -> Option<Coordinate> {
    match Coordinate::new(place.latitude, place.longitude) {
        Ok(location) => Some(location),
        Err(err) => {
            tracing::warn!(id = %place.id, %err, "skipping place with invalid stored coordinates");
            None
        }
    }
}
