//! Frame pacing for the host loop.

use web_time::{Duration, Instant};

/// Frame pacing with smoothed FPS and optional frame limiting.
///
/// The caller reads the clock once per tick and passes it in, so a frame
/// driven by this pacer shares its timestamp with everything else in that
/// frame.
pub struct FrameTiming {
    /// Target FPS (0 = unlimited)
    target_fps: u32,
    /// Minimum frame duration based on target FPS
    min_frame_duration: Duration,
    /// Last frame timestamp
    last_frame: Instant,
    /// Smoothed FPS using exponential moving average
    smoothed_fps: f64,
    /// Smoothing factor (lower = smoother, 0.0-1.0)
    smoothing: f64,
    /// Frames completed since construction.
    frame_count: u64,
}

impl FrameTiming {
    /// Create a new frame timer with the given FPS target (0 = unlimited).
    #[must_use]
    pub fn new(target_fps: u32, now: Instant) -> Self {
        let min_frame_duration = if target_fps > 0 {
            Duration::from_secs_f64(1.0 / f64::from(target_fps))
        } else {
            Duration::ZERO
        };

        Self {
            target_fps,
            min_frame_duration,
            last_frame: now,
            smoothed_fps: 60.0,
            smoothing: 0.05,
            frame_count: 0,
        }
    }

    /// Duration of one frame at the target rate (zero when unlimited).
    #[must_use]
    pub fn frame_duration(&self) -> Duration {
        self.min_frame_duration
    }

    /// Whether enough time has passed since the last frame to render.
    #[must_use]
    pub fn should_render(&self, now: Instant) -> bool {
        if self.target_fps == 0 {
            return true;
        }
        now.saturating_duration_since(self.last_frame)
            >= self.min_frame_duration
    }

    /// Record a completed frame at `now`.
    pub fn end_frame(&mut self, now: Instant) {
        let elapsed = now.saturating_duration_since(self.last_frame);
        self.last_frame = now;
        self.frame_count += 1;

        let frame_time = elapsed.as_secs_f64();
        if frame_time > 0.0 {
            let instant_fps = 1.0 / frame_time;
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing;
        }
    }

    /// Current smoothed FPS.
    #[must_use]
    pub fn fps(&self) -> f64 {
        self.smoothed_fps
    }

    /// Frames completed so far.
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlimited_always_renders() {
        let now = Instant::now();
        let timing = FrameTiming::new(0, now);
        assert!(timing.should_render(now));
    }

    #[test]
    fn limited_waits_for_frame_duration() {
        let now = Instant::now();
        let mut timing = FrameTiming::new(60, now);
        timing.end_frame(now);
        assert!(!timing.should_render(now + Duration::from_millis(5)));
        assert!(timing.should_render(now + Duration::from_millis(17)));
    }

    #[test]
    fn fps_converges_towards_frame_rate() {
        let start = Instant::now();
        let mut timing = FrameTiming::new(0, start);
        let step = Duration::from_millis(20);
        for i in 1..=400 {
            timing.end_frame(start + step * i);
        }
        assert!((timing.fps() - 50.0).abs() < 1.0);
        assert_eq!(timing.frame_count(), 400);
    }
}
