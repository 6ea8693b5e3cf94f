use glam::DVec2;

use crate::camera::orbit::OrbitRig;
use crate::input::{InputEvent, MouseButton};

/// Turns pointer events into rig motions.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputHandler {
    last_mouse_pos: DVec2,
}

impl InputHandler {
    /// Handler with the cursor at the origin.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one event to `rig`. Returns true if the camera moved.
    ///
    /// Button and modifier state is tracked even while the rig ignores
    /// user input, so motion resumes cleanly without a cursor jump.
    pub fn handle_event(&mut self, rig: &mut OrbitRig, event: InputEvent) -> bool {
        match event {
            InputEvent::MouseButton {
                button: MouseButton::Left,
                pressed,
            } => {
                rig.mouse_pressed = pressed && rig.user_input_enabled();
                false
            }
            InputEvent::MouseButton { .. } => false,
            InputEvent::ModifiersChanged { shift } => {
                rig.shift_pressed = shift;
                false
            }
            InputEvent::CursorMoved { x, y } => {
                let current_pos = DVec2::new(f64::from(x), f64::from(y));
                let delta = current_pos - self.last_mouse_pos;
                self.last_mouse_pos = current_pos;

                if !rig.mouse_pressed || !rig.user_input_enabled() {
                    return false;
                }
                if rig.shift_pressed {
                    rig.pan(delta);
                } else {
                    rig.rotate(delta);
                }
                delta != DVec2::ZERO
            }
            InputEvent::Scroll { delta } => {
                if !rig.user_input_enabled() || delta == 0.0 {
                    return false;
                }
                rig.zoom(f64::from(delta));
                true
            }
        }
    }
}
