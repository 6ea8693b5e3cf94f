use glam::DVec3;

/// Perspective camera defined by eye position, target, up vector and field
/// of view.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Eye (camera) position in the local frame.
    pub eye: DVec3,
    /// Look-at target position.
    pub target: DVec3,
    /// Up direction vector.
    pub up: DVec3,
    /// Vertical field of view in degrees.
    pub fovy: f64,
}

impl Camera {
    /// Camera looking at `target` from `eye`, Y up.
    #[must_use]
    pub const fn looking_at(eye: DVec3, target: DVec3, fovy: f64) -> Self {
        Self {
            eye,
            target,
            up: DVec3::Y,
            fovy,
        }
    }

    /// Distance from eye to target.
    #[must_use]
    pub fn distance(&self) -> f64 {
        self.eye.distance(self.target)
    }
}
