use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Bloom", inline)]
#[serde(default)]
/// Brightness-bloom settings forwarded to the renderer untouched.
pub struct BloomOptions {
    #[schemars(title = "Bloom Intensity", range(min = 0.0, max = 5.0), extend("step" = 0.05))]
    /// Strength of the bloom contribution.
    pub intensity: f32,
    #[schemars(title = "Bloom Threshold", range(min = 0.0, max = 1.0), extend("step" = 0.01))]
    /// Luminance above which pixels bloom.
    pub threshold: f32,
    #[schemars(title = "Bloom Smoothing", range(min = 0.0, max = 1.0), extend("step" = 0.01))]
    /// Soft knee width around the threshold.
    pub smoothing: f32,
    #[schemars(title = "Bloom Radius", range(min = 0.0, max = 2.0), extend("step" = 0.05))]
    /// Blur radius.
    pub radius: f32,
}

impl Default for BloomOptions {
    fn default() -> Self {
        Self {
            intensity: 1.5,
            threshold: 0.1,
            smoothing: 0.9,
            radius: 0.4,
        }
    }
}
