//! Parametric track curves and the sampling helpers shared by the
//! per-frame animation driver and the one-time trail builder.
//!
//! Sampling is pure: the same curve and `t` always give the same point.

mod catmull_rom;

pub use catmull_rom::{CatmullRomCurve, CurveKind};
use glam::DVec3;

/// Step used for finite-difference tangents.
const TANGENT_DELTA: f64 = 1e-4;

/// Point on `curve` at progress `t`. Out-of-range `t` is clamped to
/// `[0, 1]`; NaN is treated as 0.
#[inline]
#[must_use]
pub fn sample_point(curve: &CatmullRomCurve, t: f64) -> DVec3 {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    curve.evaluate(t)
}

/// `segments + 1` evenly t-spaced points, both endpoints included.
#[must_use]
pub fn sample_uniform(curve: &CatmullRomCurve, segments: usize) -> Vec<DVec3> {
    if segments == 0 {
        return vec![sample_point(curve, 0.0)];
    }
    let n = segments as f64;
    (0..=segments)
        .map(|i| sample_point(curve, i as f64 / n))
        .collect()
}

/// Unit tangent at `t` (central difference, one-sided at the ends).
///
/// Returns `DVec3::ZERO` where the curve does not move.
#[must_use]
pub fn tangent(curve: &CatmullRomCurve, t: f64) -> DVec3 {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let t0 = (t - TANGENT_DELTA).max(0.0);
    let t1 = (t + TANGENT_DELTA).min(1.0);
    (curve.evaluate(t1) - curve.evaluate(t0)).normalize_or_zero()
}

/// Arc length approximated by a polyline of `divisions` segments.
#[must_use]
pub fn length(curve: &CatmullRomCurve, divisions: usize) -> f64 {
    sample_uniform(curve, divisions.max(1))
        .windows(2)
        .map(|w| w[0].distance(w[1]))
        .sum()
}
