//! Equirectangular projection around the dataset centroid.
//!
//! Longitude is scaled by `cos(centroid latitude)` so ground distances stay
//! roughly isotropic near the origin. Accurate for city-scale extents
//! (tens of kilometers); distortion grows without bound farther out and no
//! error is raised for it.

use glam::DVec3;

use super::RawPoint;
use crate::options::ProjectionOptions;

/// Mean latitude/longitude of every sample in a dataset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Centroid {
    /// Mean latitude in degrees.
    pub lat: f64,
    /// Mean longitude in degrees.
    pub lon: f64,
}

impl Centroid {
    /// Arithmetic mean over `points`, or `None` if there are none.
    pub fn from_points<'a>(
        points: impl IntoIterator<Item = &'a RawPoint>,
    ) -> Option<Self> {
        let mut count = 0usize;
        let mut lat = 0.0;
        let mut lon = 0.0;
        for p in points {
            lat += p.lat;
            lon += p.lon;
            count += 1;
        }
        if count == 0 {
            return None;
        }
        let n = count as f64;
        Some(Self {
            lat: lat / n,
            lon: lon / n,
        })
    }
}

/// Maps geodetic samples into the centroid-relative scene frame.
///
/// `x` grows east, `z` grows south (north is `-z`, the usual top-down map
/// orientation), `y` is scaled elevation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projector {
    centroid: Centroid,
    lon_scale: f64,
    lat_scale: f64,
    elevation_scale: f64,
}

impl Projector {
    /// Projector centered on `centroid`.
    #[must_use]
    pub fn new(centroid: Centroid, options: &ProjectionOptions) -> Self {
        Self {
            centroid,
            lon_scale: options.projection_scale
                * centroid.lat.to_radians().cos(),
            lat_scale: options.projection_scale,
            elevation_scale: options.elevation_scale,
        }
    }

    /// Origin of the local frame.
    #[must_use]
    pub fn centroid(&self) -> Centroid {
        self.centroid
    }

    /// Project a geodetic coordinate into the local frame.
    #[inline]
    #[must_use]
    pub fn project(&self, lat: f64, lon: f64, elevation: f64) -> DVec3 {
        DVec3::new(
            (lon - self.centroid.lon) * self.lon_scale,
            elevation * self.elevation_scale,
            -(lat - self.centroid.lat) * self.lat_scale,
        )
    }

    /// Project a [`RawPoint`].
    #[inline]
    #[must_use]
    pub fn project_point(&self, point: &RawPoint) -> DVec3 {
        self.project(point.lat, point.lon, point.elevation)
    }

    /// Inverse of [`project`](Self::project): local point back to
    /// `(lat, lon, elevation)`.
    ///
    /// Components whose scale is zero (a centroid at a pole, or a zero
    /// elevation scale) come back as the centroid value / zero.
    #[must_use]
    pub fn unproject(&self, local: DVec3) -> (f64, f64, f64) {
        let lat = self.centroid.lat - local.z / self.lat_scale;
        let lon = if self.lon_scale == 0.0 {
            self.centroid.lon
        } else {
            self.centroid.lon + local.x / self.lon_scale
        };
        let elevation = if self.elevation_scale == 0.0 {
            0.0
        } else {
            local.y / self.elevation_scale
        };
        (lat, lon, elevation)
    }
}

/// One-shot projection of a single coordinate relative to `centroid`.
#[must_use]
pub fn project(
    lat: f64,
    lon: f64,
    elevation: f64,
    centroid: Centroid,
    options: &ProjectionOptions,
) -> DVec3 {
    Projector::new(centroid, options).project(lat, lon, elevation)
}
