//! One loaded dataset and everything animating it.
//!
//! A [`Session`] owns the processed tracks, the animation driver, the
//! camera tour and its timers. The host calls [`Session::frame`] once per
//! display tick with the tick's clock reading; nothing in the session runs
//! on its own.
//!
//! # Frame order
//!
//! 1. Trails and bloom settings go to the sink (first frame after a load).
//! 2. Queued user interactions are applied to the tour.
//! 3. Due timers fire (featured selection, inactivity check).
//! 4. The featured id is checked against the track set.
//! 5. An in-flight camera move advances.
//! 6. Every track head is sampled and the instance buffers are written.

pub mod timers;

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use web_time::Instant;

use self::timers::{TimerFire, TimerKind, Timers};
use crate::animation::{AnimationDriver, FrameSnapshot, InstanceBuffers};
use crate::camera::{CameraController, CameraMode, CameraPose};
use crate::error::TrailError;
use crate::input::{self, InteractionReceiver, InteractionSender};
use crate::options::Options;
use crate::render::{OrbitCamera, SceneSink};
use crate::track::{ProcessedTrack, RawTrack, TrackProcessor, TrackSet};
use crate::trail::build_trails;

/// What happened during one [`Session::frame`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// Animation driver output.
    pub snapshot: FrameSnapshot,
    /// Camera mode after the frame.
    pub mode: CameraMode,
    /// Featured track after the frame.
    pub featured: Option<u32>,
    /// Pose the tour wrote to the camera this frame, if any.
    pub camera_pose: Option<CameraPose>,
    /// User interactions applied this frame.
    pub interactions: usize,
    /// Timers that fired this frame.
    pub timers_fired: usize,
}

/// A loaded dataset plus its animation and camera tour.
#[derive(Debug)]
pub struct Session<R = StdRng> {
    options: Options,
    tracks: Arc<TrackSet>,
    driver: AnimationDriver,
    controller: CameraController<R>,
    timers: Timers,
    buffers: InstanceBuffers,
    interaction_tx: InteractionSender,
    interaction_rx: InteractionReceiver,
    /// Interactions stamped before this belong to an older dataset.
    epoch_started: Instant,
    trails_uploaded: bool,
}

impl Session<StdRng> {
    /// Process `raw` and start a session seeded from the OS.
    ///
    /// # Errors
    ///
    /// Invalid options, a dataset with no points, or a dataset where no
    /// track survives processing.
    pub fn load(raw: &[RawTrack], options: Options, now: Instant) -> Result<Self, TrailError> {
        Self::with_rng(raw, options, StdRng::from_os_rng(), now)
    }
}

impl<R: Rng> Session<R> {
    /// Process `raw` and start a session drawing tour choices from `rng`.
    ///
    /// # Errors
    ///
    /// Same as [`Session::load`].
    pub fn with_rng(
        raw: &[RawTrack],
        options: Options,
        rng: R,
        now: Instant,
    ) -> Result<Self, TrailError> {
        options.validate()?;
        let tracks = Arc::new(process(raw, &options)?);
        let (interaction_tx, interaction_rx) = input::channel();

        let mut session = Self {
            driver: AnimationDriver::new(&options.animation),
            controller: CameraController::with_rng(&options.camera_animation, rng, now),
            timers: Timers::new(),
            buffers: InstanceBuffers::with_capacity(tracks.len()),
            tracks,
            options,
            interaction_tx,
            interaction_rx,
            epoch_started: now,
            trails_uploaded: false,
        };
        session.schedule_timers(now);
        log::info!("Session started with {} tracks", session.tracks.len());
        Ok(session)
    }

    fn schedule_timers(&mut self, now: Instant) {
        let camera = &self.options.camera_animation;
        if camera.enabled {
            self.timers
                .schedule(TimerKind::FeaturedSelection, camera.interval(), now);
        }
        self.timers
            .schedule(TimerKind::InactivityCheck, camera.inactivity_check(), now);
    }

    /// Replace the dataset. Timers are cancelled, pending interactions
    /// discarded, the tour reset to Auto with nothing featured, and the
    /// animation clock restarted. Trails are re-uploaded on the next frame.
    ///
    /// # Errors
    ///
    /// If `raw` does not load, the session keeps running the previous
    /// dataset untouched.
    pub fn reload(
        &mut self,
        raw: &[RawTrack],
        now: Instant,
        camera: &mut impl OrbitCamera,
    ) -> Result<(), TrailError> {
        let tracks = match process(raw, &self.options) {
            Ok(tracks) => tracks,
            Err(e) => {
                log::warn!("Reload failed, keeping current dataset: {e}");
                return Err(e);
            }
        };

        let epoch = self.timers.cancel_all();
        let discarded = self.interaction_rx.discard_pending();
        if discarded > 0 {
            log::debug!("Discarded {discarded} interactions from the previous dataset");
        }
        self.controller.reset(now, camera);
        self.driver.reset();
        self.tracks = Arc::new(tracks);
        self.buffers = InstanceBuffers::with_capacity(self.tracks.len());
        self.epoch_started = now;
        self.trails_uploaded = false;
        self.schedule_timers(now);

        log::info!(
            "Reloaded dataset (epoch {epoch}) with {} tracks",
            self.tracks.len()
        );
        Ok(())
    }

    /// Sender for the renderer's camera-control callbacks.
    #[must_use]
    pub fn interaction_sender(&self) -> InteractionSender {
        self.interaction_tx.clone()
    }

    /// Run one display tick at `now`.
    pub fn frame(
        &mut self,
        now: Instant,
        camera: &mut impl OrbitCamera,
        sink: &mut impl SceneSink,
    ) -> FrameReport {
        if !self.trails_uploaded {
            sink.configure_bloom(&self.options.bloom);
            sink.upload_trails(&build_trails(
                &self.tracks,
                self.options.tracks.curve_subdivisions,
            ));
            self.trails_uploaded = true;
        }

        let mut interactions = 0;
        for event in self.interaction_rx.drain() {
            if event.at < self.epoch_started {
                continue;
            }
            if self.controller.on_interaction(event.at) {
                interactions += 1;
            }
        }

        let fires = self.timers.poll(now);
        let timers_fired = fires.len();
        for fire in fires {
            let _ = self.dispatch_timer(fire, now, camera);
        }

        let _ = self.controller.validate_featured(now, &self.tracks, camera);
        let camera_pose = self.controller.update(now, camera);

        let featured = self.controller.current_featured_track_id();
        let snapshot = self
            .driver
            .update(now, &self.tracks, featured, &mut self.buffers);
        sink.write_instances(&self.buffers);

        FrameReport {
            snapshot,
            mode: self.controller.mode(),
            featured,
            camera_pose,
            interactions,
            timers_fired,
        }
    }

    /// Deliver one timer firing. Fires from before the last reload are
    /// dropped. Returns true if the fire changed the tour's state.
    pub fn dispatch_timer(
        &mut self,
        fire: TimerFire,
        now: Instant,
        camera: &mut impl OrbitCamera,
    ) -> bool {
        if !self.timers.is_current(&fire) {
            log::debug!(
                "Dropping {:?} fire from epoch {} (current {})",
                fire.kind,
                fire.epoch,
                self.timers.epoch()
            );
            return false;
        }
        match fire.kind {
            TimerKind::FeaturedSelection => self
                .controller
                .on_selection_timer(now, &self.tracks, camera)
                .is_some(),
            TimerKind::InactivityCheck => self.controller.on_inactivity_check(now),
        }
    }

    /// The loaded tracks.
    #[must_use]
    pub fn tracks(&self) -> &Arc<TrackSet> {
        &self.tracks
    }

    /// Options the session was loaded with.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Instance buffers from the last frame.
    #[must_use]
    pub fn buffers(&self) -> &InstanceBuffers {
        &self.buffers
    }

    /// The animation driver.
    #[must_use]
    pub fn driver(&self) -> &AnimationDriver {
        &self.driver
    }

    /// The camera tour.
    #[must_use]
    pub fn controller(&self) -> &CameraController<R> {
        &self.controller
    }

    /// Current dataset epoch.
    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.timers.epoch()
    }

    /// Track the tour is featuring.
    #[must_use]
    pub fn current_featured_track_id(&self) -> Option<u32> {
        self.controller.current_featured_track_id()
    }

    /// The featured track itself, for overlays.
    #[must_use]
    pub fn featured_track(&self) -> Option<&ProcessedTrack> {
        self.current_featured_track_id()
            .and_then(|id| self.tracks.get(id))
    }

    /// Whether the tour owns the camera.
    #[must_use]
    pub fn is_auto_animating(&self) -> bool {
        self.controller.is_auto_animating()
    }

    /// Whether a camera move is in flight.
    #[must_use]
    pub fn is_transitioning(&self) -> bool {
        self.controller.is_transitioning()
    }

    /// Current camera mode.
    #[must_use]
    pub fn mode(&self) -> CameraMode {
        self.controller.mode()
    }
}

fn process(raw: &[RawTrack], options: &Options) -> Result<TrackSet, TrailError> {
    TrackProcessor::new(&options.tracks, &options.projection).process(raw)
}
