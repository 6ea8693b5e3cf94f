use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Projection", inline)]
#[serde(default)]
/// Scale factors for the geodetic → local-frame projection.
pub struct ProjectionOptions {
    /// Scene units per degree of latitude.
    #[schemars(title = "Projection Scale", range(min = 1.0))]
    pub projection_scale: f64,
    /// Scene units per meter of elevation.
    #[schemars(title = "Elevation Scale", range(min = 0.0, max = 10.0), extend("step" = 0.01))]
    pub elevation_scale: f64,
}

impl Default for ProjectionOptions {
    fn default() -> Self {
        Self {
            projection_scale: 10_000.0,
            elevation_scale: 0.1,
        }
    }
}
