//! Autonomous camera tour.
//!
//! The controller features one track at a time: every selection interval
//! it picks a new track at random, computes a pose that frames it, and
//! eases the camera there. Any user interaction hands control back to the
//! user until they have been idle for the inactivity timeout.
//!
//! ```text
//!            selection timer                 elapsed >= transition
//!   Auto ─────────────────────▶ Transitioning ─────────────────────▶ Auto
//!     │                                                                ▲
//!     │ user interaction                         idle >= inactivity     │
//!     └──────────────────────────▶ UserControl ────────────────────────┘
//! ```
//!
//! Interaction signals that arrive while Transitioning are the camera's own
//! motion being echoed back and are ignored.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use web_time::{Duration, Instant};

use super::pose::{compute_view_pose, CameraPose};
use crate::options::CameraAnimationOptions;
use crate::render::OrbitCamera;
use crate::track::TrackSet;
use crate::util::easing::ease_in_out_cubic;

/// Who is driving the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraMode {
    /// Touring; waiting for the next selection.
    Auto,
    /// Easing toward a newly featured track.
    Transitioning,
    /// The user is in control.
    UserControl,
}

/// One in-flight camera move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraTransition {
    /// Pose the camera had when the move began.
    pub from: CameraPose,
    /// Pose the move ends on.
    pub to: CameraPose,
    /// When the move began.
    pub started_at: Instant,
}

/// Mode and transition data together, so they always change as one.
#[derive(Debug, Clone, Copy, PartialEq)]
enum TourState {
    Auto,
    Transitioning(CameraTransition),
    UserControl,
}

/// Camera tour state machine. Owns no camera; every call that moves the
/// camera is handed the renderer's [`OrbitCamera`].
#[derive(Debug)]
pub struct CameraController<R = StdRng> {
    options: CameraAnimationOptions,
    state: TourState,
    featured: Option<u32>,
    last_interaction: Instant,
    rng: R,
}

impl CameraController<StdRng> {
    /// Controller seeded from the OS.
    #[must_use]
    pub fn new(options: &CameraAnimationOptions, now: Instant) -> Self {
        Self::with_rng(options, StdRng::from_os_rng(), now)
    }
}

impl<R: Rng> CameraController<R> {
    /// Controller drawing track choices and view angles from `rng`.
    pub fn with_rng(options: &CameraAnimationOptions, rng: R, now: Instant) -> Self {
        Self {
            options: options.clone(),
            state: TourState::Auto,
            featured: None,
            last_interaction: now,
            rng,
        }
    }

    /// Current mode.
    #[must_use]
    pub fn mode(&self) -> CameraMode {
        match self.state {
            TourState::Auto => CameraMode::Auto,
            TourState::Transitioning(_) => CameraMode::Transitioning,
            TourState::UserControl => CameraMode::UserControl,
        }
    }

    /// Track the tour is currently featuring.
    #[must_use]
    pub fn current_featured_track_id(&self) -> Option<u32> {
        self.featured
    }

    /// Whether the tour (rather than the user) owns the camera.
    #[must_use]
    pub fn is_auto_animating(&self) -> bool {
        self.options.enabled && !matches!(self.state, TourState::UserControl)
    }

    /// Whether a camera move is in flight.
    #[must_use]
    pub fn is_transitioning(&self) -> bool {
        matches!(self.state, TourState::Transitioning(_))
    }

    /// The in-flight move, if any.
    #[must_use]
    pub fn transition(&self) -> Option<&CameraTransition> {
        match &self.state {
            TourState::Transitioning(transition) => Some(transition),
            _ => None,
        }
    }

    /// Last time the user touched the camera.
    #[must_use]
    pub fn last_interaction(&self) -> Instant {
        self.last_interaction
    }

    /// Selection timer fired. In Auto mode, feature a new track and start
    /// moving toward it; returns the newly featured id.
    ///
    /// Ignored while touring is disabled, while a move is in flight, under
    /// user control, or when there are no tracks.
    pub fn on_selection_timer(
        &mut self,
        now: Instant,
        tracks: &TrackSet,
        camera: &mut impl OrbitCamera,
    ) -> Option<u32> {
        if !self.options.enabled || self.state != TourState::Auto {
            return None;
        }
        self.select(now, tracks, camera)
    }

    fn select(
        &mut self,
        now: Instant,
        tracks: &TrackSet,
        camera: &mut impl OrbitCamera,
    ) -> Option<u32> {
        let index = self.pick_index(tracks)?;
        let track = &tracks.tracks()[index];

        let to = compute_view_pose(
            &track.bounding_box,
            camera.fovy_degrees(),
            &self.options,
            &mut self.rng,
        );
        let from = CameraPose {
            position: camera.position(),
            target: camera.target(),
        };

        camera.set_user_input_enabled(false);
        self.featured = Some(track.id);
        self.state = TourState::Transitioning(CameraTransition {
            from,
            to,
            started_at: now,
        });
        log::debug!(
            "Featuring track {} ({} raw points)",
            track.id,
            track.raw_point_count
        );
        Some(track.id)
    }

    /// Uniform pick that never repeats the current featured track while
    /// another is available.
    fn pick_index(&mut self, tracks: &TrackSet) -> Option<usize> {
        let len = tracks.len();
        if len == 0 {
            return None;
        }
        let current = self.featured.and_then(|id| tracks.position(id));
        match current {
            Some(skip) if len > 1 => {
                let k = self.rng.random_range(0..len - 1);
                Some(if k >= skip { k + 1 } else { k })
            }
            _ => Some(self.rng.random_range(0..len)),
        }
    }

    /// The user moved the camera. Returns true if this took control away
    /// from the tour (or extended an existing user session).
    pub fn on_interaction(&mut self, now: Instant) -> bool {
        match self.state {
            TourState::Transitioning(_) => false,
            TourState::Auto | TourState::UserControl => {
                if self.state == TourState::Auto {
                    log::debug!("User took camera control");
                }
                self.state = TourState::UserControl;
                self.last_interaction = now;
                true
            }
        }
    }

    /// Inactivity check timer fired. Returns true if the tour resumed.
    pub fn on_inactivity_check(&mut self, now: Instant) -> bool {
        if self.state != TourState::UserControl {
            return false;
        }
        let idle = now.saturating_duration_since(self.last_interaction);
        if idle < self.options.inactivity() {
            return false;
        }
        log::debug!("Camera idle for {:.1}s, resuming tour", idle.as_secs_f64());
        self.state = TourState::Auto;
        true
    }

    /// Advance an in-flight move to `now`. Returns the pose written, if
    /// any. On completion the camera lands exactly on the end pose and user
    /// input is re-enabled.
    pub fn update(
        &mut self,
        now: Instant,
        camera: &mut impl OrbitCamera,
    ) -> Option<CameraPose> {
        let TourState::Transitioning(transition) = self.state else {
            return None;
        };

        let progress = transition_progress(
            now.saturating_duration_since(transition.started_at),
            self.options.transition(),
        );
        if progress >= 1.0 {
            camera.set_pose(transition.to.position, transition.to.target);
            camera.set_user_input_enabled(true);
            self.state = TourState::Auto;
            return Some(transition.to);
        }

        let pose = transition.from.lerp(&transition.to, ease_in_out_cubic(progress));
        camera.set_pose(pose.position, pose.target);
        Some(pose)
    }

    /// Check that the featured track still exists in `tracks`. If it does
    /// not, warn, drop any move toward it and, when touring, feature a
    /// different track right away. Returns true if the featured id was
    /// stale.
    pub fn validate_featured(
        &mut self,
        now: Instant,
        tracks: &TrackSet,
        camera: &mut impl OrbitCamera,
    ) -> bool {
        let Some(id) = self.featured else {
            return false;
        };
        if tracks.contains(id) {
            return false;
        }

        log::warn!("Featured track {id} is not in the current track set; reselecting");
        self.featured = None;
        if self.is_transitioning() {
            camera.set_user_input_enabled(true);
            self.state = TourState::Auto;
        }
        if self.options.enabled && self.state == TourState::Auto {
            let _ = self.select(now, tracks, camera);
        }
        true
    }

    /// Back to Auto with nothing featured, as after loading a new dataset.
    pub fn reset(&mut self, now: Instant, camera: &mut impl OrbitCamera) {
        if self.is_transitioning() {
            camera.set_user_input_enabled(true);
        }
        self.state = TourState::Auto;
        self.featured = None;
        self.last_interaction = now;
    }
}

/// Linear progress of a move of length `duration` after `elapsed`, capped
/// at 1. A zero-length move is already complete.
fn transition_progress(elapsed: Duration, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    (elapsed.as_secs_f64() / duration.as_secs_f64()).min(1.0)
}

#[cfg(test)]
mod tests {
    use glam::DVec3;

    use super::*;
    use crate::geo::RawPoint;
    use crate::options::{ProjectionOptions, TrackOptions};
    use crate::track::{RawTrack, TrackProcessor};

    #[derive(Debug)]
    struct FakeCamera {
        position: DVec3,
        target: DVec3,
        input_enabled: bool,
        writes: usize,
    }

    impl FakeCamera {
        fn new() -> Self {
            Self {
                position: DVec3::new(0.0, 200.0, 200.0),
                target: DVec3::ZERO,
                input_enabled: true,
                writes: 0,
            }
        }
    }

    impl OrbitCamera for FakeCamera {
        fn position(&self) -> DVec3 {
            self.position
        }

        fn target(&self) -> DVec3 {
            self.target
        }

        fn set_pose(&mut self, position: DVec3, target: DVec3) {
            self.position = position;
            self.target = target;
            self.writes += 1;
        }

        fn fovy_degrees(&self) -> f64 {
            45.0
        }

        fn set_user_input_enabled(&mut self, enabled: bool) {
            self.input_enabled = enabled;
        }
    }

    fn tracks(n: usize) -> TrackSet {
        let raw: Vec<RawTrack> = (0..n)
            .map(|i| {
                let lon = -122.30 - i as f64 * 0.01;
                RawTrack::new(
                    vec![
                        RawPoint::new(47.60, lon),
                        RawPoint::new(47.61, lon - 0.005),
                        RawPoint::new(47.62, lon),
                    ],
                    i,
                )
            })
            .collect();
        TrackProcessor::new(&TrackOptions::default(), &ProjectionOptions::default())
            .process(&raw)
            .unwrap()
    }

    fn controller(now: Instant) -> CameraController {
        CameraController::with_rng(
            &CameraAnimationOptions::default(),
            StdRng::seed_from_u64(7),
            now,
        )
    }

    #[test]
    fn starts_in_auto_with_nothing_featured() {
        let c = controller(Instant::now());
        assert_eq!(c.mode(), CameraMode::Auto);
        assert_eq!(c.current_featured_track_id(), None);
        assert!(c.is_auto_animating());
        assert!(!c.is_transitioning());
    }

    #[test]
    fn selection_never_repeats_featured_track() {
        let set = tracks(3);
        let mut cam = FakeCamera::new();
        let mut now = Instant::now();
        let mut c = controller(now);
        let mut prev = None;
        for _ in 0..200 {
            let id = c.on_selection_timer(now, &set, &mut cam);
            assert!(id.is_some());
            assert_ne!(id, prev);
            prev = id;
            now += Duration::from_secs(2);
            let _ = c.update(now, &mut cam);
            assert_eq!(c.mode(), CameraMode::Auto);
        }
    }

    #[test]
    fn single_track_is_reselected() {
        let set = tracks(1);
        let mut cam = FakeCamera::new();
        let mut now = Instant::now();
        let mut c = controller(now);
        assert_eq!(c.on_selection_timer(now, &set, &mut cam), Some(0));
        now += Duration::from_secs(2);
        let _ = c.update(now, &mut cam);
        assert_eq!(c.on_selection_timer(now, &set, &mut cam), Some(0));
    }

    #[test]
    fn transition_eases_and_lands_exactly() {
        let set = tracks(4);
        let mut cam = FakeCamera::new();
        let start = Instant::now();
        let mut c = controller(start);

        let _ = c.on_selection_timer(start, &set, &mut cam);
        assert!(c.is_transitioning());
        assert!(!cam.input_enabled);
        let transition = *c.transition().unwrap();
        assert_eq!(transition.from.position, DVec3::new(0.0, 200.0, 200.0));

        // Halfway in time is halfway in space for the cubic in-out curve.
        let mid = c
            .update(start + Duration::from_millis(750), &mut cam)
            .unwrap();
        let expected = transition.from.position.lerp(transition.to.position, 0.5);
        assert!((mid.position - expected).length() < 1e-9);
        assert!(c.is_transitioning());

        let _ = c.update(start + Duration::from_millis(1_500), &mut cam);
        assert_eq!(cam.position, transition.to.position);
        assert_eq!(cam.target, transition.to.target);
        assert!(cam.input_enabled);
        assert_eq!(c.mode(), CameraMode::Auto);
        assert!(c.transition().is_none());
    }

    #[test]
    fn target_pose_frames_featured_track() {
        let set = tracks(2);
        let mut cam = FakeCamera::new();
        let now = Instant::now();
        let mut c = controller(now);
        let id = c.on_selection_timer(now, &set, &mut cam).unwrap();
        let to = c.transition().unwrap().to;
        let bbox = set.get(id).unwrap().bounding_box;
        assert_eq!(to.target, bbox.center());
        let distance = to.position.distance(to.target);
        assert!(distance >= 50.0 - 1e-9);
    }

    #[test]
    fn interaction_during_transition_is_ignored() {
        let set = tracks(2);
        let mut cam = FakeCamera::new();
        let now = Instant::now();
        let mut c = controller(now);
        let _ = c.on_selection_timer(now, &set, &mut cam);
        assert!(!c.on_interaction(now + Duration::from_millis(100)));
        assert_eq!(c.mode(), CameraMode::Transitioning);
    }

    #[test]
    fn selection_ignored_under_user_control() {
        let set = tracks(2);
        let mut cam = FakeCamera::new();
        let now = Instant::now();
        let mut c = controller(now);
        assert!(c.on_interaction(now));
        assert_eq!(c.mode(), CameraMode::UserControl);
        assert!(!c.is_auto_animating());
        assert_eq!(c.on_selection_timer(now, &set, &mut cam), None);
        assert_eq!(cam.writes, 0);
    }

    #[test]
    fn inactivity_returns_to_auto() {
        let start = Instant::now();
        let mut c = controller(start);
        assert!(c.on_interaction(start + Duration::from_millis(500)));
        assert!(!c.on_inactivity_check(start + Duration::from_secs(2)));
        assert!(c.on_interaction(start + Duration::from_secs(2)));
        assert!(!c.on_inactivity_check(start + Duration::from_millis(4_999)));
        assert!(c.on_inactivity_check(start + Duration::from_secs(5)));
        assert_eq!(c.mode(), CameraMode::Auto);
    }

    #[test]
    fn disabled_tour_never_selects() {
        let set = tracks(2);
        let mut cam = FakeCamera::new();
        let now = Instant::now();
        let options = CameraAnimationOptions {
            enabled: false,
            ..CameraAnimationOptions::default()
        };
        let mut c = CameraController::with_rng(&options, StdRng::seed_from_u64(1), now);
        assert_eq!(c.on_selection_timer(now, &set, &mut cam), None);
        assert!(!c.is_auto_animating());
    }

    #[test]
    fn stale_featured_track_is_replaced() {
        let big = tracks(3);
        let small = tracks(1);
        let mut cam = FakeCamera::new();
        let mut now = Instant::now();
        let mut c = controller(now);
        // Walk until a track other than 0 is featured.
        while c.current_featured_track_id() == Some(0) || c.current_featured_track_id().is_none() {
            let _ = c.on_selection_timer(now, &big, &mut cam);
            now += Duration::from_secs(2);
            let _ = c.update(now, &mut cam);
        }
        assert!(c.validate_featured(now, &small, &mut cam));
        assert_eq!(c.current_featured_track_id(), Some(0));
        assert!(c.is_transitioning());
        assert!(!c.validate_featured(now, &small, &mut cam));
    }

    #[test]
    fn reset_clears_featured_and_restores_input() {
        let set = tracks(2);
        let mut cam = FakeCamera::new();
        let now = Instant::now();
        let mut c = controller(now);
        let _ = c.on_selection_timer(now, &set, &mut cam);
        c.reset(now, &mut cam);
        assert_eq!(c.mode(), CameraMode::Auto);
        assert_eq!(c.current_featured_track_id(), None);
        assert!(cam.input_enabled);
    }

    #[test]
    fn zero_length_transition_completes_on_next_update() {
        assert_eq!(transition_progress(Duration::ZERO, Duration::ZERO), 1.0);
        assert_eq!(
            transition_progress(Duration::from_secs(3), Duration::from_secs(2)),
            1.0
        );
    }
}
