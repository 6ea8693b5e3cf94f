//! Seams to the rendering collaborator.
//!
//! The crate never draws anything itself. A renderer implements
//! [`SceneSink`] to receive trail geometry and per-frame instance buffers,
//! and exposes its orbit-style camera through [`OrbitCamera`].

use glam::DVec3;

use crate::animation::InstanceBuffers;
use crate::options::BloomOptions;

/// Orbit-style camera owned by the renderer.
pub trait OrbitCamera {
    /// Camera position in the local frame.
    fn position(&self) -> DVec3;

    /// Point the camera orbits around and looks at.
    fn target(&self) -> DVec3;

    /// Move the camera. Programmatic writes must not be reported back as
    /// user interaction.
    fn set_pose(&mut self, position: DVec3, target: DVec3);

    /// Vertical field of view in degrees.
    fn fovy_degrees(&self) -> f64;

    /// Accept or ignore user input. Disabled while the camera is being
    /// moved programmatically.
    fn set_user_input_enabled(&mut self, enabled: bool);
}

/// Static line-strip for one track, built once per dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct TrailGeometry {
    /// Track the line belongs to.
    pub track_id: u32,
    /// Vertices in curve order.
    pub vertices: Vec<[f32; 3]>,
}

/// Receives everything the renderer needs to draw.
pub trait SceneSink {
    /// Replace all trail lines. Called once per loaded dataset.
    fn upload_trails(&mut self, trails: &[TrailGeometry]);

    /// Per-frame instance data for normal and featured track heads.
    fn write_instances(&mut self, buffers: &InstanceBuffers);

    /// Bloom pass settings. Called alongside trail upload.
    fn configure_bloom(&mut self, bloom: &BloomOptions) {
        let _ = bloom;
    }
}
