//! Drives every track head from one shared clock.
//!
//! Progress is a pure function of elapsed time: the driver keeps nothing
//! between frames except the moment it was first activated. All tracks in
//! a frame are sampled at the same progress value, which is what makes the
//! motion read as synchronized.

use web_time::{Duration, Instant};

use super::instance::{InstanceBuffers, InstanceRaw};
use crate::curve::sample_point;
use crate::options::AnimationOptions;
use crate::track::TrackSet;

/// What one frame of the driver produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSnapshot {
    /// Progress every track was sampled at.
    pub progress: f64,
    /// Time since the driver started.
    pub elapsed: Duration,
    /// Instances written across both buffers.
    pub written: usize,
    /// Tracks skipped because their sample was unusable.
    pub skipped: usize,
}

/// Shared-clock animation of all track heads.
#[derive(Debug, Clone)]
pub struct AnimationDriver {
    start_time: Option<Instant>,
    loop_duration: Duration,
    loop_enabled: bool,
    normal_scale: f32,
    featured_scale: f32,
}

impl AnimationDriver {
    /// Driver that has not started yet; the first
    /// [`update`](Self::update) or [`start`](Self::start) sets its clock.
    #[must_use]
    pub fn new(options: &AnimationOptions) -> Self {
        Self {
            start_time: None,
            loop_duration: options.loop_duration(),
            loop_enabled: options.loop_enabled,
            normal_scale: options.normal_scale,
            featured_scale: options.featured_scale,
        }
    }

    /// Set the start time if it is not already set.
    pub fn start(&mut self, now: Instant) {
        if self.start_time.is_none() {
            self.start_time = Some(now);
        }
    }

    /// Forget the start time; the next frame restarts the loop.
    pub fn reset(&mut self) {
        self.start_time = None;
    }

    /// When the driver was first activated.
    #[must_use]
    pub fn start_time(&self) -> Option<Instant> {
        self.start_time
    }

    /// Time since activation (zero before).
    #[must_use]
    pub fn elapsed(&self, now: Instant) -> Duration {
        self.start_time
            .map_or(Duration::ZERO, |start| now.saturating_duration_since(start))
    }

    /// Animation progress in `[0, 1]` at `now`.
    ///
    /// Looping wraps on whole nanoseconds, so `now` and
    /// `now + loop_duration` give bit-identical progress. Without looping,
    /// progress holds at 1 once the duration has passed.
    #[must_use]
    pub fn progress_at(&self, now: Instant) -> f64 {
        progress_for(self.elapsed(now), self.loop_duration, self.loop_enabled)
    }

    /// Whether a non-looping animation has reached its end.
    #[must_use]
    pub fn is_finished(&self, now: Instant) -> bool {
        !self.loop_enabled && self.progress_at(now) >= 1.0
    }

    /// Sample every track at the current progress and rewrite `buffers`.
    ///
    /// The track whose id equals `featured` goes into the featured buffer,
    /// every other track into the normal buffer. A track whose sample is not
    /// finite is skipped for this frame.
    pub fn update(
        &mut self,
        now: Instant,
        tracks: &TrackSet,
        featured: Option<u32>,
        buffers: &mut InstanceBuffers,
    ) -> FrameSnapshot {
        self.start(now);
        let elapsed = self.elapsed(now);
        let progress =
            progress_for(elapsed, self.loop_duration, self.loop_enabled);

        buffers.clear();
        let mut skipped = 0;
        for track in tracks.tracks() {
            let position = sample_point(&track.curve, progress);
            if !position.is_finite() {
                skipped += 1;
                continue;
            }
            if Some(track.id) == featured {
                buffers.set_featured(
                    track.id,
                    InstanceRaw::new(position, self.featured_scale),
                );
            } else {
                buffers.push_normal(
                    track.id,
                    InstanceRaw::new(position, self.normal_scale),
                );
            }
        }

        FrameSnapshot {
            progress,
            elapsed,
            written: buffers.len(),
            skipped,
        }
    }
}

/// Normalized progress for `elapsed` time into a loop of `duration`.
#[must_use]
pub fn progress_for(elapsed: Duration, duration: Duration, looping: bool) -> f64 {
    let total = duration.as_nanos();
    if total == 0 {
        return 1.0;
    }
    let elapsed = elapsed.as_nanos();
    if looping {
        (elapsed % total) as f64 / total as f64
    } else {
        (elapsed as f64 / total as f64).min(1.0)
    }
}

#[cfg(test)]
mod tests {
    use glam::DVec3;

    use super::*;
    use crate::curve::{CatmullRomCurve, CurveKind};
    use crate::geo::Centroid;
    use crate::track::{BoundingBox, ProcessedTrack, TrackMetadata};

    fn track(id: u32, offset: f64) -> ProcessedTrack {
        let points = vec![
            DVec3::new(offset, 0.0, 0.0),
            DVec3::new(offset + 10.0, 0.0, 0.0),
            DVec3::new(offset + 20.0, 0.0, 5.0),
        ];
        let bounding_box = BoundingBox::from_points(&points).unwrap();
        ProcessedTrack {
            id,
            curve: CatmullRomCurve::new(points, CurveKind::Uniform, 0.5).unwrap(),
            bounding_box,
            metadata: TrackMetadata {
                start_lat: 0.0,
                start_lon: 0.0,
                end_lat: 0.0,
                end_lon: 0.0,
                timestamp: None,
                sequence_index: id as usize,
            },
            raw_point_count: 3,
            length: 0.0,
        }
    }

    fn set(n: u32) -> TrackSet {
        TrackSet::new(
            (0..n).map(|i| track(i * 2, f64::from(i))).collect(),
            Centroid { lat: 0.0, lon: 0.0 },
            Vec::new(),
        )
    }

    fn options(looping: bool) -> AnimationOptions {
        AnimationOptions {
            duration_seconds: 10.0,
            loop_enabled: looping,
            ..AnimationOptions::default()
        }
    }

    #[test]
    fn looping_progress_wraps_exactly() {
        let start = Instant::now();
        let mut driver = AnimationDriver::new(&options(true));
        driver.start(start);
        let loop_len = Duration::from_secs(10);
        for ms in [0_u64, 1, 2_500, 7_333, 9_999] {
            let t = start + Duration::from_millis(ms);
            assert_eq!(driver.progress_at(t), driver.progress_at(t + loop_len));
            assert_eq!(
                driver.progress_at(t),
                driver.progress_at(t + loop_len * 3)
            );
        }
        assert_eq!(driver.progress_at(start + Duration::from_millis(2_500)), 0.25);
    }

    #[test]
    fn looping_progress_is_monotonic_within_a_cycle() {
        let start = Instant::now();
        let mut driver = AnimationDriver::new(&options(true));
        driver.start(start);
        let mut prev = -1.0;
        for ms in (0..10_000).step_by(37) {
            let p = driver.progress_at(start + Duration::from_millis(ms));
            assert!(p >= prev);
            assert!((0.0..1.0).contains(&p));
            prev = p;
        }
    }

    #[test]
    fn non_looping_progress_holds_at_one() {
        let start = Instant::now();
        let mut driver = AnimationDriver::new(&options(false));
        driver.start(start);
        assert_eq!(driver.progress_at(start + Duration::from_secs(5)), 0.5);
        assert_eq!(driver.progress_at(start + Duration::from_secs(10)), 1.0);
        assert_eq!(driver.progress_at(start + Duration::from_secs(25)), 1.0);
        assert!(driver.is_finished(start + Duration::from_secs(25)));
    }

    #[test]
    fn start_time_is_set_only_once() {
        let start = Instant::now();
        let mut driver = AnimationDriver::new(&options(true));
        driver.start(start);
        driver.start(start + Duration::from_secs(3));
        assert_eq!(driver.start_time(), Some(start));
        driver.reset();
        assert_eq!(driver.start_time(), None);
    }

    #[test]
    fn all_tracks_share_one_progress_value() {
        let tracks = set(6);
        let start = Instant::now();
        let mut driver = AnimationDriver::new(&options(true));
        let mut buffers = InstanceBuffers::default();
        let _ = driver.update(start, &tracks, None, &mut buffers);

        let now = start + Duration::from_millis(3_700);
        let snapshot = driver.update(now, &tracks, None, &mut buffers);
        assert_eq!(snapshot.written, 6);
        for (slot, id) in buffers.normal_ids().iter().enumerate() {
            let track = tracks.get(*id).unwrap();
            let expected =
                InstanceRaw::new(sample_point(&track.curve, snapshot.progress), 1.0);
            assert_eq!(buffers.normal()[slot], expected);
        }
    }

    #[test]
    fn featured_track_goes_to_its_own_buffer() {
        let tracks = set(4);
        let start = Instant::now();
        let mut driver = AnimationDriver::new(&options(true));
        let mut buffers = InstanceBuffers::default();
        let snapshot = driver.update(start, &tracks, Some(4), &mut buffers);

        assert_eq!(snapshot.written, 4);
        assert_eq!(buffers.normal().len(), 3);
        assert!(!buffers.normal_ids().contains(&4));
        let featured = buffers.featured().unwrap();
        assert_eq!(featured.track_id, 4);
        assert_eq!(featured.instance.scale, 2.0);
    }

    #[test]
    fn unknown_featured_id_leaves_featured_buffer_empty() {
        let tracks = set(3);
        let mut driver = AnimationDriver::new(&options(true));
        let mut buffers = InstanceBuffers::default();
        let _ = driver.update(Instant::now(), &tracks, Some(99), &mut buffers);
        assert!(buffers.featured().is_none());
        assert_eq!(buffers.normal().len(), 3);
    }

    #[test]
    fn zero_duration_is_always_complete() {
        assert_eq!(
            progress_for(Duration::from_secs(1), Duration::ZERO, true),
            1.0
        );
    }
}
