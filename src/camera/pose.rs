//! Where the auto camera looks at a track from.

use std::f64::consts::TAU;

use glam::DVec3;
use rand::Rng;

use crate::options::CameraAnimationOptions;
use crate::track::BoundingBox;

/// Camera position and look-at target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    /// Eye position in the local frame.
    pub position: DVec3,
    /// Look-at point.
    pub target: DVec3,
}

impl CameraPose {
    /// Pose at `eased` of the way from `self` to `to`.
    #[must_use]
    pub fn lerp(&self, to: &Self, eased: f64) -> Self {
        Self {
            position: self.position.lerp(to.position, eased),
            target: self.target.lerp(to.target, eased),
        }
    }
}

/// Eye distance that fits `bbox` in a vertical field of view of
/// `fovy_degrees`, padded and clamped.
#[must_use]
pub fn fit_distance(
    bbox: &BoundingBox,
    fovy_degrees: f64,
    options: &CameraAnimationOptions,
) -> f64 {
    let size = bbox.size();
    let max_dimension = size.x.max(size.z);
    let half_fov = (fovy_degrees.to_radians() / 2.0).max(f64::EPSILON);
    let base = (max_dimension / 2.0) / half_fov.tan();
    let padded = base * options.distance_padding_factor;
    if padded.is_finite() {
        padded.max(options.min_distance).min(options.max_distance)
    } else {
        options.min_distance
    }
}

/// Pose viewing `bbox` from the given orbit angles.
///
/// `horizontal` is the azimuth around +Y in radians; `vertical` the
/// elevation above the ground plane in radians.
#[must_use]
pub fn view_pose_with_angles(
    bbox: &BoundingBox,
    fovy_degrees: f64,
    options: &CameraAnimationOptions,
    horizontal: f64,
    vertical: f64,
) -> CameraPose {
    let center = bbox.center();
    let distance = fit_distance(bbox, fovy_degrees, options);
    let horizontal_distance = distance * vertical.cos();
    let height = distance * vertical.sin() + bbox.size().y * options.height_offset_factor;

    CameraPose {
        position: center
            + DVec3::new(
                horizontal_distance * horizontal.cos(),
                height,
                horizontal_distance * horizontal.sin(),
            ),
        target: center,
    }
}

/// Pose viewing `bbox` from a random azimuth in `[0, 2π)` and a random
/// elevation between the configured bounds.
pub fn compute_view_pose<R: Rng + ?Sized>(
    bbox: &BoundingBox,
    fovy_degrees: f64,
    options: &CameraAnimationOptions,
    rng: &mut R,
) -> CameraPose {
    let horizontal = rng.random_range(0.0..TAU);
    let (lo, hi) = elevation_bounds(options);
    let vertical = rng.random_range(lo..=hi).to_radians();
    view_pose_with_angles(bbox, fovy_degrees, options, horizontal, vertical)
}

fn elevation_bounds(options: &CameraAnimationOptions) -> (f64, f64) {
    let lo = options.min_elevation_degrees;
    let hi = options.max_elevation_degrees;
    if lo <= hi {
        (lo, hi)
    } else {
        (hi, lo)
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn bbox(min: DVec3, max: DVec3) -> BoundingBox {
        BoundingBox { min, max }
    }

    #[test]
    fn distance_is_clamped() {
        let options = CameraAnimationOptions::default();
        let tiny = bbox(DVec3::ZERO, DVec3::splat(1.0));
        let huge = bbox(DVec3::ZERO, DVec3::new(5_000.0, 0.0, 10.0));
        assert_eq!(fit_distance(&tiny, 45.0, &options), 50.0);
        assert_eq!(fit_distance(&huge, 45.0, &options), 300.0);
    }

    #[test]
    fn distance_fits_box_between_bounds() {
        let options = CameraAnimationOptions::default();
        let b = bbox(DVec3::ZERO, DVec3::new(100.0, 0.0, 60.0));
        let expected = (50.0 / (22.5_f64).to_radians().tan()) * 1.8;
        assert!((fit_distance(&b, 45.0, &options) - expected).abs() < 1e-9);
    }

    #[test]
    fn overhead_view_sits_above_center() {
        let options = CameraAnimationOptions::default();
        let b = bbox(DVec3::new(-10.0, 0.0, -10.0), DVec3::new(10.0, 20.0, 10.0));
        let pose = view_pose_with_angles(&b, 45.0, &options, 1.0, FRAC_PI_2);
        let center = b.center();
        assert_eq!(pose.target, center);
        assert!((pose.position.x - center.x).abs() < 1e-9);
        assert!((pose.position.z - center.z).abs() < 1e-9);
        assert!((pose.position.y - (center.y + 50.0 + 10.0)).abs() < 1e-9);
    }

    #[test]
    fn random_pose_respects_elevation_bounds() {
        let options = CameraAnimationOptions::default();
        let b = bbox(DVec3::new(-50.0, 0.0, -50.0), DVec3::new(50.0, 0.0, 50.0));
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..100 {
            let pose = compute_view_pose(&b, 45.0, &options, &mut rng);
            let offset = pose.position - pose.target;
            let distance = offset.length();
            let elevation = (offset.y / distance).asin().to_degrees();
            assert!(elevation >= 10.0 - 1e-9);
            assert!(elevation <= 90.0 + 1e-9);
            assert!((distance - fit_distance(&b, 45.0, &options)).abs() < 1e-9);
        }
    }

    #[test]
    fn lerp_endpoints_are_exact() {
        let a = CameraPose {
            position: DVec3::new(1.0, 2.0, 3.0),
            target: DVec3::ZERO,
        };
        let b = CameraPose {
            position: DVec3::new(-7.5, 40.0, 0.25),
            target: DVec3::new(3.0, 0.0, -3.0),
        };
        assert_eq!(a.lerp(&b, 0.0), a);
        assert_eq!(a.lerp(&b, 1.0).target, b.target);
    }
}
