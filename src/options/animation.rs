use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use web_time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Animation", inline)]
#[serde(default)]
/// Global animation clock and instance sizing.
pub struct AnimationOptions {
    /// Seconds for one pass along every track.
    #[schemars(title = "Duration (s)", range(min = 1.0, max = 600.0), extend("step" = 1.0))]
    pub duration_seconds: f64,
    /// Restart from the beginning after each pass instead of holding at
    /// the end.
    #[schemars(title = "Loop")]
    pub loop_enabled: bool,
    /// Instance scale of ordinary track heads.
    #[schemars(skip)]
    pub normal_scale: f32,
    /// Instance scale of the featured track head.
    #[schemars(skip)]
    pub featured_scale: f32,
}

impl AnimationOptions {
    /// Loop duration as a [`Duration`]. Negative or NaN values collapse to
    /// zero; values too large to represent saturate.
    #[must_use]
    pub fn loop_duration(&self) -> Duration {
        super::secs(self.duration_seconds)
    }
}

impl Default for AnimationOptions {
    fn default() -> Self {
        Self {
            duration_seconds: 60.0,
            loop_enabled: true,
            normal_scale: 1.0,
            featured_scale: 2.0,
        }
    }
}
