//! Catmull-Rom spline through a track's control points.
//!
//! The curve passes through every control point. Open ends get a mirrored
//! ghost point (`2·p₀ − p₁`) so the first and last spans have a tangent.

use glam::DVec3;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::TrackBuildError;

/// Knot spacing used between control points.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum CurveKind {
    /// Uniform knots with an explicit tension.
    #[default]
    Uniform,
    /// Knots spaced by the square root of the chord length.
    Centripetal,
    /// Knots spaced by the chord length.
    Chordal,
}

/// Knot intervals shorter than this are treated as degenerate.
const MIN_KNOT: f64 = 1e-4;

/// Smooth parametric curve through an ordered set of local points.
///
/// Immutable once built; evaluation is deterministic given the control
/// points.
#[derive(Debug, Clone, PartialEq)]
pub struct CatmullRomCurve {
    points: Vec<DVec3>,
    kind: CurveKind,
    tension: f64,
}

impl CatmullRomCurve {
    /// Build an open curve through `points`.
    ///
    /// Fails when fewer than two points are given, when any coordinate is
    /// not finite, or when every point sits at the same location.
    ///
    /// # Errors
    ///
    /// The matching [`TrackBuildError`].
    pub fn new(
        points: Vec<DVec3>,
        kind: CurveKind,
        tension: f64,
    ) -> Result<Self, TrackBuildError> {
        if points.len() < 2 {
            return Err(TrackBuildError::TooFewPoints {
                count: points.len(),
            });
        }
        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(TrackBuildError::NonFinitePoint { index });
        }
        let first = points[0];
        if points.iter().all(|p| *p == first) {
            return Err(TrackBuildError::Degenerate);
        }
        Ok(Self {
            points,
            kind,
            tension,
        })
    }

    /// Control points the curve passes through.
    #[must_use]
    pub fn control_points(&self) -> &[DVec3] {
        &self.points
    }

    /// Knot spacing of this curve.
    #[must_use]
    pub fn kind(&self) -> CurveKind {
        self.kind
    }

    /// Evaluate at `t ∈ [0, 1]` (no clamping; callers go through
    /// [`sample_point`](super::sample_point)).
    ///
    /// Parameter space is split evenly across the control-point spans, so
    /// `t = i / (n - 1)` lands exactly on control point `i`.
    pub(crate) fn evaluate(&self, t: f64) -> DVec3 {
        let n = self.points.len();
        let last = n - 1;
        if t <= 0.0 {
            return self.points[0];
        }
        if t >= 1.0 {
            return self.points[last];
        }

        let p = last as f64 * t;
        let mut span = p.floor() as usize;
        let mut weight = p - span as f64;
        if span >= last {
            span = last - 1;
            weight = 1.0;
        }

        let p1 = self.points[span];
        let p2 = self.points[span + 1];
        let p0 = if span > 0 {
            self.points[span - 1]
        } else {
            self.points[0] * 2.0 - self.points[1]
        };
        let p3 = if span + 2 < n {
            self.points[span + 2]
        } else {
            self.points[last] * 2.0 - self.points[last - 1]
        };

        let cubic = match self.kind {
            CurveKind::Uniform => CubicPoly::uniform(p0, p1, p2, p3, self.tension),
            CurveKind::Centripetal => CubicPoly::nonuniform(p0, p1, p2, p3, 0.25),
            CurveKind::Chordal => CubicPoly::nonuniform(p0, p1, p2, p3, 0.5),
        };
        cubic.at(weight)
    }
}

/// Hermite cubic `c0 + c1·t + c2·t² + c3·t³` for one span.
struct CubicPoly {
    c0: DVec3,
    c1: DVec3,
    c2: DVec3,
    c3: DVec3,
}

impl CubicPoly {
    fn hermite(x0: DVec3, x1: DVec3, t0: DVec3, t1: DVec3) -> Self {
        Self {
            c0: x0,
            c1: t0,
            c2: -3.0 * x0 + 3.0 * x1 - 2.0 * t0 - t1,
            c3: 2.0 * x0 - 2.0 * x1 + t0 + t1,
        }
    }

    fn uniform(
        p0: DVec3,
        p1: DVec3,
        p2: DVec3,
        p3: DVec3,
        tension: f64,
    ) -> Self {
        Self::hermite(p1, p2, tension * (p2 - p0), tension * (p3 - p1))
    }

    /// Non-uniform knots: `dt = |Δp|^(2·power)`; power 0.25 is centripetal,
    /// 0.5 is chordal.
    fn nonuniform(
        p0: DVec3,
        p1: DVec3,
        p2: DVec3,
        p3: DVec3,
        power: f64,
    ) -> Self {
        let mut dt0 = p0.distance_squared(p1).powf(power);
        let mut dt1 = p1.distance_squared(p2).powf(power);
        let mut dt2 = p2.distance_squared(p3).powf(power);

        if dt1 < MIN_KNOT {
            dt1 = 1.0;
        }
        if dt0 < MIN_KNOT {
            dt0 = dt1;
        }
        if dt2 < MIN_KNOT {
            dt2 = dt1;
        }

        let t1 = ((p1 - p0) / dt0 - (p2 - p0) / (dt0 + dt1) + (p2 - p1) / dt1)
            * dt1;
        let t2 = ((p2 - p1) / dt1 - (p3 - p1) / (dt1 + dt2) + (p3 - p2) / dt2)
            * dt1;
        Self::hermite(p1, p2, t1, t2)
    }

    #[inline]
    fn at(&self, t: f64) -> DVec3 {
        let t2 = t * t;
        let t3 = t2 * t;
        self.c0 + self.c1 * t + self.c2 * t2 + self.c3 * t3
    }
}
