//! Haversine distance calculation.
//!
//! The Haversine formula calculates the great-circle distance between two points
//! on a sphere given their longitudes and latitudes. Inputs are never range
//! checked here; NaN and infinity propagate to the result.

use crate::Coordinate;

/// Earth's mean radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Calculates the great-circle distance between two coordinates in kilometers.
///
/// # Arguments
/// * `from` - Starting coordinate
/// * `to` - Ending coordinate
///
/// # Returns
/// Distance in kilometers, within `[0, π·6371]` for finite input.
///
/// # Example
/// ```
/// use pingrank_geo::{haversine_distance, Coordinate};
///
/// let origin = Coordinate::new(0.0, 0.0);
/// let east = Coordinate::new(0.0, 1.0);
///
/// let distance = haversine_distance(&origin, &east);
/// assert!((distance - 111.19).abs() < 0.1);
/// ```
#[inline]
pub fn haversine_distance(from: &Coordinate, to: &Coordinate) -> f64 {
    let (lat1, lon1) = from.to_radians();
    let (lat2, lon2) = to.to_radians();

    let d_lat = lat2 - lat1;
    let d_lon = lon2 - lon1;

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);

    // Rounding can push `a` a hair past 1.0 for antipodal points; NaN passes through clamp.
    let a = a.clamp(0.0, 1.0);

    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Distance in kilometers between two `(lat, lon)` pairs given in degrees.
///
/// # Example
/// ```
/// let km = pingrank_geo::distance(40.7128, -74.0060, 34.0522, -118.2437);
/// assert!((km - 3936.0).abs() < 5.0);
/// ```
#[inline]
pub fn distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    haversine_distance(&Coordinate::new(lat1, lon1), &Coordinate::new(lat2, lon2))
}


#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f64::consts::PI;

    const NEW_YORK: Coordinate = Coordinate { latitude: 40.7128, longitude: -74.0060 };
    const LOS_ANGELES: Coordinate = Coordinate { latitude: 34.0522, longitude: -118.2437 };
    const BERLIN: Coordinate = Coordinate { latitude: 52.5200, longitude: 13.4050 };
    const PARIS: Coordinate = Coordinate { latitude: 48.8566, longitude: 2.3522 };

    #[test]
    fn test_new_york_to_los_angeles() {
        let distance = haversine_distance(&NEW_YORK, &LOS_ANGELES);
        // Expected: ~3936 km
        assert!((distance - 3936.0).abs() < 5.0, "NYC-LA: {}", distance);
    }

    #[test]
    fn test_berlin_to_paris() {
        let distance = haversine_distance(&BERLIN, &PARIS);
        assert!((distance - 878.0).abs() < 5.0, "Berlin-Paris: {}", distance);
    }

    #[test]
    fn test_one_degree_on_equator() {
        let d = distance(0.0, 0.0, 0.0, 1.0);
        assert!((d - 111.195).abs() < 0.01, "1 degree: {}", d);
    }

    #[test]
    fn test_same_point_zero_distance() {
        assert_eq!(haversine_distance(&BERLIN, &BERLIN), 0.0);
    }

    #[test]
    fn test_antipodal_points_hit_upper_bound() {
        let d = distance(0.0, 0.0, 0.0, 180.0);
        assert!((d - PI * EARTH_RADIUS_KM).abs() < 1e-6);
        let poles = distance(90.0, 0.0, -90.0, 0.0);
        assert!(poles <= PI * EARTH_RADIUS_KM);
    }

    #[test]
    fn test_out_of_range_still_computes() {
        let d = distance(120.0, 400.0, 0.0, 0.0);
        assert!(d.is_finite());
        assert!(d >= 0.0);
    }

    #[test]
    fn test_nan_propagates() {
        assert!(distance(f64::NAN, 0.0, 0.0, 0.0).is_nan());
        assert!(distance(0.0, 0.0, 0.0, f64::NAN).is_nan());
    }

    fn lat() -> impl Strategy<Value = f64> {
        -90.0f64..=90.0
    }

    fn lon() -> impl Strategy<Value = f64> {
        -180.0f64..=180.0
    }

    proptest! {
        #[test]
        fn prop_identity(la in lat(), lo in lon()) {
            prop_assert_eq!(distance(la, lo, la, lo), 0.0);
        }

        #[test]
        fn prop_symmetry(la1 in lat(), lo1 in lon(), la2 in lat(), lo2 in lon()) {
            let d1 = distance(la1, lo1, la2, lo2);
            let d2 = distance(la2, lo2, la1, lo1);
            prop_assert!((d1 - d2).abs() <= 1e-9 * d1.max(1.0));
        }

        #[test]
        fn prop_bounded(la1 in lat(), lo1 in lon(), la2 in lat(), lo2 in lon()) {
            let d = distance(la1, lo1, la2, lo2);
            prop_assert!(d >= 0.0);
            prop_assert!(d <= PI * EARTH_RADIUS_KM);
        }
    }
}
