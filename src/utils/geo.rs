use thiserror::Error;

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum GeoError {
    #[error("invalid coordinate ({lat}, {lng}): latitude must be in [-90, 90] and longitude in [-180, 180]")]
    InvalidCoordinate { lat: f64, lng: f64 },
}

/// A validated latitude/longitude pair in degrees.
///
/// Construction rejects non-finite components and values outside the
/// valid ranges, so any `Coordinate` held by the rest of the crate is
/// safe to feed into distance computations without re-checking.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Coordinate {
    lat: f64,
    lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Result<Self, GeoError> {
        let valid = lat.is_finite()
            && lng.is_finite()
            && (-90.0..=90.0).contains(&lat)
            && (-180.0..=180.0).contains(&lng);

        if valid {
            Ok(Self { lat, lng })
        } else {
            Err(GeoError::InvalidCoordinate { lat, lng })
        }
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lng(&self) -> f64 {
        self.lng
    }
}

/// Calculate distance between two coordinates using the Haversine formula.
/// Returns distance in kilometers.
///
/// Kilometers are the canonical unit for every distance and radius in
/// this crate; callers converting from other units must do so before
/// crossing this boundary.
pub fn haversine_distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let lat1_rad = a.lat.to_radians();
    let lat2_rad = b.lat.to_radians();
    let delta_lat = (b.lat - a.lat).to_radians();
    let delta_lng = (b.lng - a.lng).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().asin();

    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_london_paris() {
        let london = Coordinate::new(51.5074, -0.1278).unwrap();
        let paris = Coordinate::new(48.8566, 2.3522).unwrap();

        let distance = haversine_distance_km(london, paris);
        // Should be approximately 340-345 km
        assert!(distance > 330.0 && distance < 355.0);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let a = Coordinate::new(-6.2088, 106.8456).unwrap();
        let b = Coordinate::new(35.6762, 139.6503).unwrap();

        let there = haversine_distance_km(a, b);
        let back = haversine_distance_km(b, a);
        assert!((there - back).abs() < 1e-9);
    }

    #[test]
    fn test_distance_to_self_is_zero() {
        let point = Coordinate::new(48.8566, 2.3522).unwrap();
        assert_eq!(haversine_distance_km(point, point), 0.0);
    }

    #[test]
    fn test_rejects_out_of_range_values() {
        assert!(Coordinate::new(91.0, 0.0).is_err());
        assert!(Coordinate::new(-90.5, 0.0).is_err());
        assert!(Coordinate::new(0.0, 200.0).is_err());
        assert!(Coordinate::new(0.0, -180.1).is_err());
    }

    #[test]
    fn test_rejects_non_finite_values() {
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
        assert!(Coordinate::new(0.0, f64::INFINITY).is_err());
        assert!(Coordinate::new(f64::NEG_INFINITY, f64::NAN).is_err());
    }

    #[test]
    fn test_accepts_boundary_values() {
        assert!(Coordinate::new(90.0, 180.0).is_ok());
        assert!(Coordinate::new(-90.0, -180.0).is_ok());
        assert!(Coordinate::new(0.0, 0.0).is_ok());
    }
}
