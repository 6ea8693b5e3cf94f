use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::curve::CurveKind;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Tracks", inline)]
#[serde(default)]
/// Track processing and trail geometry options.
pub struct TrackOptions {
    /// Tracks longer than this are downsampled at a uniform stride.
    #[schemars(title = "Max Points per Track", range(min = 2))]
    pub max_points_per_track: usize,
    /// Segments per static trail line (the line has one more vertex).
    #[schemars(title = "Trail Subdivisions", range(min = 1))]
    pub curve_subdivisions: usize,
    /// Catmull-Rom parameterization.
    pub curve_kind: CurveKind,
    /// Catmull-Rom tension (only used by the uniform parameterization).
    #[schemars(title = "Tension", range(min = 0.0, max = 1.0), extend("step" = 0.05))]
    pub tension: f64,
}

impl Default for TrackOptions {
    fn default() -> Self {
        Self {
            max_points_per_track: 1000,
            curve_subdivisions: 2000,
            curve_kind: CurveKind::Uniform,
            tension: 0.5,
        }
    }
}
