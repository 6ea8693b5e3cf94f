use glam::{DMat3, DQuat, DVec2, DVec3};
use web_time::Instant;

use crate::camera::core::Camera;
use crate::camera::input::InputHandler;
use crate::input::{InputEvent, InteractionSender};
use crate::render::OrbitCamera;

/// Headless orbit camera: rotate, pan and zoom around a focus point.
///
/// Stands in for a renderer's orbit controls in the tour binary and in
/// tests; any real renderer provides its own [`OrbitCamera`].
#[derive(Debug, Clone)]
pub struct OrbitRig {
    orientation: DQuat,
    distance: f64,
    focus_point: DVec3,

    /// Camera driven by the rig.
    pub camera: Camera,

    input_enabled: bool,
    /// Whether the primary button is held.
    pub mouse_pressed: bool,
    /// Whether shift is held (pan instead of rotate).
    pub shift_pressed: bool,
    rotate_speed: f64,
    pan_speed: f64,
    zoom_speed: f64,

    input: InputHandler,
    interaction: Option<InteractionSender>,
}

impl OrbitRig {
    /// Rig orbiting `target` from `eye`.
    #[must_use]
    pub fn new(eye: DVec3, target: DVec3, fovy: f64) -> Self {
        let mut rig = Self {
            orientation: DQuat::IDENTITY,
            distance: 1.0,
            focus_point: target,
            camera: Camera::looking_at(eye, target, fovy),
            input_enabled: true,
            mouse_pressed: false,
            shift_pressed: false,
            rotate_speed: 0.01,
            pan_speed: 0.1,
            zoom_speed: 0.05,
            input: InputHandler::new(),
            interaction: None,
        };
        rig.set_pose(eye, target);
        rig
    }

    /// Report every user-driven motion to `sender`.
    #[must_use]
    pub fn with_interaction(mut self, sender: InteractionSender) -> Self {
        self.interaction = Some(sender);
        self
    }

    /// Feed one pointer event. Returns true if the camera moved, in which
    /// case the motion is also reported as a user interaction at `now`.
    ///
    /// Programmatic [`set_pose`](OrbitCamera::set_pose) calls never report.
    pub fn handle_input(&mut self, event: InputEvent, now: Instant) -> bool {
        let mut input = self.input;
        let moved = input.handle_event(self, event);
        self.input = input;

        if moved {
            if let Some(sender) = &self.interaction {
                if !sender.notify(now) {
                    log::debug!("Interaction receiver gone; dropping sender");
                    self.interaction = None;
                }
            }
        }
        moved
    }

    /// Whether user input is currently accepted.
    #[must_use]
    pub fn user_input_enabled(&self) -> bool {
        self.input_enabled
    }

    /// Distance from eye to focus point.
    #[must_use]
    pub fn distance(&self) -> f64 {
        self.distance
    }

    fn update_camera_pos(&mut self) {
        let dir = self.orientation * DVec3::Z;

        self.camera.eye = self.focus_point + (dir * self.distance);
        self.camera.target = self.focus_point;
        self.camera.up = self.orientation * DVec3::Y;
    }

    /// Orbit around the focus point by a screen-space drag.
    pub fn rotate(&mut self, delta: DVec2) {
        // Horizontal rotation around camera's up vector
        let up = self.orientation * DVec3::Y;
        let horizontal = DQuat::from_axis_angle(up, -delta.x * self.rotate_speed);
        self.orientation = horizontal * self.orientation;

        // Vertical rotation around camera's right vector (after horizontal rotation)
        let right = self.orientation * DVec3::X;
        let vertical = DQuat::from_axis_angle(right, -delta.y * self.rotate_speed);
        self.orientation = (vertical * self.orientation).normalize();

        self.update_camera_pos();
    }

    /// Slide the focus point in the view plane.
    pub fn pan(&mut self, delta: DVec2) {
        let right = self.orientation * DVec3::X;
        let up = self.orientation * DVec3::Y;

        let translation =
            right * (-delta.x * self.pan_speed) + up * (delta.y * self.pan_speed);

        self.focus_point += translation;
        self.update_camera_pos();
    }

    /// Move toward (positive) or away from (negative) the focus point.
    pub fn zoom(&mut self, delta: f64) {
        self.distance *= 1.0 - delta * self.zoom_speed;
        self.distance = self.distance.clamp(1.0, 10_000.0);
        self.update_camera_pos();
    }
}

/// Orientation whose +Z points along `dir` with +Y kept as level as
/// possible.
fn look_orientation(dir: DVec3) -> DQuat {
    let mut right = DVec3::Y.cross(dir);
    if right.length_squared() < 1e-12 {
        right = DVec3::X;
    }
    let right = right.normalize();
    let up = dir.cross(right).normalize();
    DQuat::from_mat3(&DMat3::from_cols(right, up, dir)).normalize()
}

impl OrbitCamera for OrbitRig {
    fn position(&self) -> DVec3 {
        self.camera.eye
    }

    fn target(&self) -> DVec3 {
        self.camera.target
    }

    fn set_pose(&mut self, position: DVec3, target: DVec3) {
        let offset = position - target;
        self.distance = offset.length().max(f64::EPSILON);
        self.focus_point = target;
        self.orientation = look_orientation(offset.normalize_or(DVec3::Z));

        // Exact pose as written; the orbit state only drives later motion.
        self.camera.eye = position;
        self.camera.target = target;
        self.camera.up = self.orientation * DVec3::Y;
    }

    fn fovy_degrees(&self) -> f64 {
        self.camera.fovy
    }

    fn set_user_input_enabled(&mut self, enabled: bool) {
        self.input_enabled = enabled;
        if !enabled {
            self.mouse_pressed = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_pose_is_exact() {
        let mut rig = OrbitRig::new(DVec3::new(0.0, 50.0, 100.0), DVec3::ZERO, 45.0);
        let pos = DVec3::new(12.345, 67.89, -101.1);
        let target = DVec3::new(1.0, 2.0, 3.0);
        rig.set_pose(pos, target);
        assert_eq!(rig.position(), pos);
        assert_eq!(rig.target(), target);
        assert!((rig.distance() - pos.distance(target)).abs() < 1e-9);
    }

    #[test]
    fn rotate_preserves_distance_to_focus() {
        let mut rig = OrbitRig::new(DVec3::new(0.0, 50.0, 100.0), DVec3::ZERO, 45.0);
        let before = rig.camera.distance();
        rig.rotate(DVec2::new(40.0, -15.0));
        assert!((rig.camera.distance() - before).abs() < 1e-6);
        assert_eq!(rig.target(), DVec3::ZERO);
    }

    #[test]
    fn orbit_continues_from_written_pose() {
        let mut rig = OrbitRig::new(DVec3::new(0.0, 50.0, 100.0), DVec3::ZERO, 45.0);
        let pos = DVec3::new(80.0, 30.0, -20.0);
        rig.set_pose(pos, DVec3::ZERO);
        // A zero-size drag recomputes the eye from orbit state.
        rig.rotate(DVec2::ZERO);
        assert!((rig.position() - pos).length() < 1e-9);
    }

    #[test]
    fn straight_down_view_has_valid_up() {
        let mut rig = OrbitRig::new(DVec3::new(0.0, 50.0, 100.0), DVec3::ZERO, 45.0);
        rig.set_pose(DVec3::new(0.0, 200.0, 0.0), DVec3::ZERO);
        let up = rig.camera.up;
        let forward = (rig.target() - rig.position()).normalize();
        assert!(up.is_finite());
        assert!((up.length() - 1.0).abs() < 1e-9);
        assert!(up.dot(forward).abs() < 1e-9);
    }

    #[test]
    fn user_motion_is_reported_but_set_pose_is_not() {
        let (tx, rx) = crate::input::channel();
        let mut rig = OrbitRig::new(DVec3::new(0.0, 50.0, 100.0), DVec3::ZERO, 45.0)
            .with_interaction(tx);
        let now = Instant::now();

        rig.set_pose(DVec3::new(10.0, 10.0, 10.0), DVec3::ZERO);
        assert_eq!(rx.drain().count(), 0);

        assert!(rig.handle_input(InputEvent::Scroll { delta: 1.0 }, now));
        let events: Vec<_> = rx.drain().collect();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].at, now);
    }

    #[test]
    fn disabled_input_ignores_motion() {
        let (tx, rx) = crate::input::channel();
        let mut rig = OrbitRig::new(DVec3::new(0.0, 50.0, 100.0), DVec3::ZERO, 45.0)
            .with_interaction(tx);
        let now = Instant::now();
        rig.set_user_input_enabled(false);
        let before = rig.position();

        assert!(!rig.handle_input(InputEvent::Scroll { delta: 2.0 }, now));
        let _ = rig.handle_input(
            InputEvent::MouseButton {
                button: crate::input::MouseButton::Left,
                pressed: true,
            },
            now,
        );
        assert!(!rig.handle_input(InputEvent::CursorMoved { x: 40.0, y: 9.0 }, now));
        assert_eq!(rig.position(), before);
        assert_eq!(rx.drain().count(), 0);
    }

    #[test]
    fn drag_rotates_and_shift_drag_pans() {
        let mut rig = OrbitRig::new(DVec3::new(0.0, 50.0, 100.0), DVec3::ZERO, 45.0);
        let now = Instant::now();
        let press = InputEvent::MouseButton {
            button: crate::input::MouseButton::Left,
            pressed: true,
        };
        let _ = rig.handle_input(InputEvent::CursorMoved { x: 0.0, y: 0.0 }, now);
        let _ = rig.handle_input(press, now);
        assert!(rig.handle_input(InputEvent::CursorMoved { x: 30.0, y: 0.0 }, now));
        assert_eq!(rig.target(), DVec3::ZERO);

        let _ = rig.handle_input(InputEvent::ModifiersChanged { shift: true }, now);
        assert!(rig.handle_input(InputEvent::CursorMoved { x: 60.0, y: 0.0 }, now));
        assert_ne!(rig.target(), DVec3::ZERO);
    }

    #[test]
    fn zoom_is_clamped() {
        let mut rig = OrbitRig::new(DVec3::new(0.0, 0.0, 10.0), DVec3::ZERO, 45.0);
        for _ in 0..200 {
            rig.zoom(10.0);
        }
        assert!(rig.distance() >= 1.0);
    }
}
