//! Great-circle distance utilities for pingrank.
//!
//! This crate provides:
//! - Haversine distance calculations on a sphere of radius 6371 km
//! - Coordinate range validation
//! - Batch processing with optional parallelism
//!
//! # Example
//!
//! ```
//! use pingrank_geo::{haversine_distance, Coordinate};
//!
//! let new_york = Coordinate::new(40.7128, -74.0060);
//! let los_angeles = Coordinate::new(34.0522, -118.2437);
//!
//! let distance_km = haversine_distance(&new_york, &los_angeles);
//! assert!((distance_km - 3936.0).abs() < 5.0);
//! ```

mod haversine;
pub mod batch;
mod error;

pub use haversine::{distance, haversine_distance, EARTH_RADIUS_KM};
pub use batch::{distances_from, within_radius};
pub use error::{GeoError, GeoErrorCode, Result};

/// A geographic coordinate with latitude and longitude in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees (-90 to 90)
    pub latitude: f64,
    /// Longitude in degrees (-180 to 180)
    pub longitude: f64,
}

impl Coordinate {
    /// Creates a new coordinate.
    ///
    /// No range check happens here; use [`Coordinate::is_valid`] or
    /// [`Coordinate::checked`] when the values come from untrusted input.
    #[inline]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Creates a coordinate, rejecting non-finite or out-of-range values.
    pub fn checked(latitude: f64, longitude: f64) -> Result<Self> {
        let coord = Self::new(latitude, longitude);
        if coord.is_valid() {
            Ok(coord)
        } else {
            Err(GeoError::InvalidCoordinate(format!(
                "latitude {} / longitude {} is outside [-90, 90] / [-180, 180]",
                latitude, longitude
            )))
        }
    }

    /// Returns true if both components are finite and within WGS84 ranges.
    ///
    /// NaN fails every comparison, so it is rejected by the range checks.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.latitude >= -90.0
            && self.latitude <= 90.0
            && self.longitude >= -180.0
            && self.longitude <= 180.0
    }

    /// Converts degrees to radians for internal calculations.
    #[inline]
    pub(crate) fn to_radians(&self) -> (f64, f64) {
        (self.latitude.to_radians(), self.longitude.to_radians())
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lon): (f64, f64)) -> Self {
        Self::new(lat, lon)
    }
}
