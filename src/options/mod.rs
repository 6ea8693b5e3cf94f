//! Centralized pipeline options with TOML preset support.
//!
//! Every tunable of the projection, track processing, animation clock,
//! camera tour and bloom pass lives here. Options serialize to/from TOML;
//! every sub-struct uses `#[serde(default)]` so partial files work.

mod animation;
mod bloom;
mod camera;
mod projection;
mod tracks;

use std::path::Path;

pub use animation::AnimationOptions;
pub use bloom::BloomOptions;
pub use camera::{CameraAnimationOptions, CameraOptions};
pub use projection::ProjectionOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use tracks::TrackOptions;
use web_time::Duration;

use crate::error::TrailError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[camera_animation]`) work
/// correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Geodetic projection scales.
    pub projection: ProjectionOptions,
    /// Downsampling and curve construction.
    pub tracks: TrackOptions,
    /// Global animation clock.
    pub animation: AnimationOptions,
    /// Camera projection.
    pub camera: CameraOptions,
    /// Autonomous camera tour.
    pub camera_animation: CameraAnimationOptions,
    /// Bloom pass settings (opaque to the pipeline).
    pub bloom: BloomOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// I/O failure, malformed TOML, or values rejected by
    /// [`validate`](Self::validate).
    pub fn load(path: &Path) -> Result<Self, TrailError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse and validate options from TOML text.
    ///
    /// # Errors
    ///
    /// [`TrailError::OptionsParse`] or [`TrailError::InvalidOptions`].
    pub fn from_toml(content: &str) -> Result<Self, TrailError> {
        let options: Self = toml::from_str(content)
            .map_err(|e| TrailError::OptionsParse(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// Save options to a TOML file (pretty-printed), creating parent
    /// directories as needed.
    ///
    /// # Errors
    ///
    /// [`TrailError::OptionsParse`] if serialization fails, or
    /// [`TrailError::Io`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), TrailError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| TrailError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject values the pipeline cannot run with.
    ///
    /// # Errors
    ///
    /// [`TrailError::InvalidOptions`] naming the first offending field.
    pub fn validate(&self) -> Result<(), TrailError> {
        let invalid = |msg: &str| -> Result<(), TrailError> {
            Err(TrailError::InvalidOptions(msg.to_owned()))
        };
        let positive = |v: f64| v.is_finite() && v > 0.0;
        let duration = |v: f64| Duration::try_from_secs_f64(v).is_ok();

        if !positive(self.projection.projection_scale) {
            return invalid("projection.projection_scale must be positive");
        }
        if !self.projection.elevation_scale.is_finite() {
            return invalid("projection.elevation_scale must be finite");
        }
        if self.tracks.max_points_per_track < 2 {
            return invalid("tracks.max_points_per_track must be at least 2");
        }
        if self.tracks.curve_subdivisions == 0 {
            return invalid("tracks.curve_subdivisions must be at least 1");
        }
        if !positive(self.animation.duration_seconds)
            || !duration(self.animation.duration_seconds)
        {
            return invalid("animation.duration_seconds must be positive and in range");
        }
        if !positive(self.camera.fovy) || self.camera.fovy >= 180.0 {
            return invalid("camera.fovy must be within (0, 180) degrees");
        }

        let tour = &self.camera_animation;
        if !positive(tour.interval_seconds) || !duration(tour.interval_seconds)
        {
            return invalid("camera_animation.interval_seconds must be positive and in range");
        }
        if !duration(tour.transition_seconds) {
            return invalid(
                "camera_animation.transition_seconds must be zero or positive",
            );
        }
        if !duration(tour.inactivity_timeout) {
            return invalid(
                "camera_animation.inactivity_timeout must be zero or positive",
            );
        }
        if !positive(tour.inactivity_check_seconds)
            || !duration(tour.inactivity_check_seconds)
        {
            return invalid(
                "camera_animation.inactivity_check_seconds must be positive and in range",
            );
        }
        if tour.min_distance.is_nan() || tour.min_distance > tour.max_distance
        {
            return invalid(
                "camera_animation.min_distance exceeds max_distance",
            );
        }
        if tour.min_elevation_degrees.is_nan()
            || tour.min_elevation_degrees > tour.max_elevation_degrees
        {
            return invalid(
                "camera_animation.min_elevation_degrees exceeds \
                 max_elevation_degrees",
            );
        }
        Ok(())
    }
}

/// Seconds as a [`Duration`]. Negative or NaN values collapse to zero;
/// values too large to represent saturate.
fn secs(value: f64) -> Duration {
    Duration::try_from_secs_f64(value).unwrap_or(if value > 0.0 {
        Duration::MAX
    } else {
        Duration::ZERO
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::CurveKind;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn defaults_match_documented_values() {
        let opts = Options::default();
        assert_eq!(opts.projection.projection_scale, 10_000.0);
        assert_eq!(opts.projection.elevation_scale, 0.1);
        assert_eq!(opts.tracks.max_points_per_track, 1000);
        assert_eq!(opts.tracks.tension, 0.5);
        assert_eq!(opts.animation.duration_seconds, 60.0);
        assert!(opts.animation.loop_enabled);
        assert_eq!(opts.camera_animation.interval_seconds, 4.0);
        assert_eq!(opts.camera_animation.transition_seconds, 1.5);
        assert_eq!(opts.camera_animation.inactivity_timeout, 3.0);
        assert_eq!(opts.camera_animation.distance_padding_factor, 1.8);
        assert_eq!(opts.camera_animation.min_distance, 50.0);
        assert_eq!(opts.camera_animation.max_distance, 300.0);
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r#"
[camera_animation]
interval_seconds = 8.0

[tracks]
curve_kind = "centripetal"
"#;
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(opts.camera_animation.interval_seconds, 8.0);
        assert_eq!(opts.tracks.curve_kind, CurveKind::Centripetal);
        // Everything else should be default
        assert_eq!(opts.camera_animation.transition_seconds, 1.5);
        assert_eq!(opts.projection, ProjectionOptions::default());
    }

    #[test]
    fn validate_rejects_inverted_distance_range() {
        let toml_str = r"
[camera_animation]
min_distance = 400.0
max_distance = 100.0
";
        let err = Options::from_toml(toml_str).unwrap_err();
        assert!(matches!(err, TrailError::InvalidOptions(_)));
    }

    #[test]
    fn validate_rejects_zero_duration() {
        let mut opts = Options::default();
        opts.animation.duration_seconds = 0.0;
        assert!(opts.validate().is_err());
        opts.animation.duration_seconds = f64::NAN;
        assert!(opts.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_inactivity_timeout() {
        let mut opts = Options::default();
        for bad in [-5.0, f64::NAN, f64::INFINITY] {
            opts.camera_animation.inactivity_timeout = bad;
            assert!(
                matches!(opts.validate(), Err(TrailError::InvalidOptions(_))),
                "accepted inactivity_timeout = {bad}"
            );
        }
        opts.camera_animation.inactivity_timeout = 0.0;
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn validate_rejects_durations_out_of_range() {
        let err = Options::from_toml("[camera_animation]\ninterval_seconds = 1e30\n")
            .unwrap_err();
        assert!(matches!(err, TrailError::InvalidOptions(_)));

        let mut opts = Options::default();
        opts.camera_animation.transition_seconds = 1e30;
        assert!(opts.validate().is_err());

        let mut opts = Options::default();
        opts.camera_animation.inactivity_check_seconds = 1e30;
        assert!(opts.validate().is_err());

        let mut opts = Options::default();
        opts.animation.duration_seconds = 1e30;
        assert!(opts.validate().is_err());
    }

    #[test]
    fn huge_seconds_saturate_instead_of_collapsing() {
        let tour = CameraAnimationOptions {
            interval_seconds: 1e30,
            inactivity_timeout: -1.0,
            ..CameraAnimationOptions::default()
        };
        assert_eq!(tour.interval(), Duration::MAX);
        assert_eq!(tour.inactivity(), Duration::ZERO);
        assert_eq!(tour.transition(), Duration::from_millis(1_500));
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = std::env::temp_dir()
            .join(format!("trailglow-options-{}", std::process::id()));
        let path = dir.join("presets").join("tour.toml");

        let mut opts = Options::default();
        opts.camera_animation.interval_seconds = 7.5;
        opts.animation.loop_enabled = false;
        opts.save(&path).unwrap();

        let loaded = Options::load(&path).unwrap();
        std::fs::remove_dir_all(&dir).unwrap();
        assert_eq!(loaded, opts);
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let err = Options::from_toml("[camera_animation\nenabled = ").unwrap_err();
        assert!(matches!(err, TrailError::OptionsParse(_)));
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("projection"));
        assert!(props.contains_key("tracks"));
        assert!(props.contains_key("animation"));
        assert!(props.contains_key("camera_animation"));
        assert!(props.contains_key("bloom"));

        let tour = &props["camera_animation"]["properties"];
        assert!(tour.get("interval_seconds").is_some());
        assert!(tour.get("min_distance").is_none());
    }
}
