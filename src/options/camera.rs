use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use web_time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Camera projection parameters.
pub struct CameraOptions {
    /// Vertical field of view in degrees.
    #[schemars(title = "Field of View", range(min = 20.0, max = 90.0), extend("step" = 1.0))]
    pub fovy: f64,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self { fovy: 45.0 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera Tour", inline)]
#[serde(default)]
/// Autonomous camera tour: featured-track selection, transitions and
/// hand-off to the user.
pub struct CameraAnimationOptions {
    /// Whether the camera tours featured tracks on its own.
    #[schemars(title = "Auto Tour")]
    pub enabled: bool,
    /// Seconds between featured-track selections while touring.
    #[schemars(title = "Interval (s)", range(min = 0.5, max = 60.0), extend("step" = 0.5))]
    pub interval_seconds: f64,
    /// Seconds a camera transition takes.
    #[schemars(title = "Transition (s)", range(min = 0.1, max = 10.0), extend("step" = 0.1))]
    pub transition_seconds: f64,
    /// Seconds without user input before the tour resumes.
    #[schemars(title = "Inactivity Timeout (s)", range(min = 0.5, max = 60.0), extend("step" = 0.5))]
    pub inactivity_timeout: f64,
    /// Seconds between inactivity checks.
    #[schemars(skip)]
    pub inactivity_check_seconds: f64,
    /// Multiplier applied to the fit-to-view distance.
    #[schemars(title = "Distance Padding", range(min = 1.0, max = 4.0), extend("step" = 0.1))]
    pub distance_padding_factor: f64,
    /// Closest the camera gets to a featured track.
    #[schemars(skip)]
    pub min_distance: f64,
    /// Farthest the camera gets from a featured track.
    #[schemars(skip)]
    pub max_distance: f64,
    /// Extra lift as a fraction of the track's vertical extent.
    #[schemars(skip)]
    pub height_offset_factor: f64,
    /// Lowest camera elevation angle above the horizon, in degrees.
    #[schemars(skip)]
    pub min_elevation_degrees: f64,
    /// Highest camera elevation angle above the horizon, in degrees.
    #[schemars(skip)]
    pub max_elevation_degrees: f64,
}

impl CameraAnimationOptions {
    /// Featured-track selection period.
    #[must_use]
    pub fn interval(&self) -> Duration {
        super::secs(self.interval_seconds)
    }

    /// Transition length.
    #[must_use]
    pub fn transition(&self) -> Duration {
        super::secs(self.transition_seconds)
    }

    /// Idle time before the tour resumes.
    #[must_use]
    pub fn inactivity(&self) -> Duration {
        super::secs(self.inactivity_timeout)
    }

    /// Inactivity check period.
    #[must_use]
    pub fn inactivity_check(&self) -> Duration {
        super::secs(self.inactivity_check_seconds)
    }
}

impl Default for CameraAnimationOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_seconds: 4.0,
            transition_seconds: 1.5,
            inactivity_timeout: 3.0,
            inactivity_check_seconds: 1.0,
            distance_padding_factor: 1.8,
            min_distance: 50.0,
            max_distance: 300.0,
            height_offset_factor: 0.5,
            min_elevation_degrees: 10.0,
            max_elevation_degrees: 90.0,
        }
    }
}
