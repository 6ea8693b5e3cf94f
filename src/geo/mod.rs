//! Geodetic primitives and the local-frame projection.
//!
//! Raw GPS samples are degrees of latitude/longitude plus meters of
//! elevation. The scene works in a local Cartesian frame whose origin is
//! the dataset [`Centroid`]; [`Projector`] maps between the two.

mod projection;

pub use projection::{project, Centroid, Projector};

/// A single GPS sample as read from the source data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawPoint {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
    /// Elevation in meters (0 when the source omits it).
    pub elevation: f64,
}

impl RawPoint {
    /// Sample at sea level.
    #[must_use]
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self {
            lat,
            lon,
            elevation: 0.0,
        }
    }

    /// Sample with an explicit elevation.
    #[must_use]
    pub const fn with_elevation(lat: f64, lon: f64, elevation: f64) -> Self {
        Self {
            lat,
            lon,
            elevation,
        }
    }

    /// Whether latitude and longitude are finite and within their valid
    /// ranges.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && self.elevation.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }
}
