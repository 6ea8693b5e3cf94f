//! Camera system: the autonomous tour and a headless orbit rig.
//!
//! [`controller`] decides where the camera should be; it drives any
//! renderer camera through the [`OrbitCamera`](crate::render::OrbitCamera)
//! trait. [`orbit`] provides one such camera for headless use.

/// Tour state machine: featured-track selection, transitions, user hand-off.
pub mod controller;
/// Core camera struct and view-projection matrices.
pub mod core;
/// Pointer-event handling for the orbit rig.
pub mod input;
/// Orbit camera with rotate, pan and zoom.
pub mod orbit;
/// Viewing-pose calculation for a featured track.
pub mod pose;

pub use controller::{CameraController, CameraMode, CameraTransition};
pub use orbit::OrbitRig;
pub use pose::{compute_view_pose, CameraPose};
