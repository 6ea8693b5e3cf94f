//! Easing for camera transitions.
//!
//! Maps `0 → 0` and `1 → 1` exactly, so a transition that reaches full
//! progress lands bit-exactly on its end pose.

/// Cubic ease-in-out: `4t³` for the first half, `1 - (-2t + 2)³ / 2` for
/// the second. Input is clamped to `[0, 1]`.
#[inline]
#[must_use]
pub fn ease_in_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let u = -2.0 * t + 2.0;
        1.0 - u * u * u / 2.0
    }
}
