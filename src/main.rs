//! Headless tour: load a track file, simulate frames on a fixed clock, and
//! log what the camera tour does.
//!
//! ```text
//! RUST_LOG=debug trailglow tracks.json --frames 1200 --seed 7 --interact-at 6.5
//! trailglow tracks.json --options tour.toml --write-options effective.toml
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use glam::DVec3;
use rand::rngs::StdRng;
use rand::SeedableRng;
use trailglow::animation::InstanceBuffers;
use trailglow::camera::{CameraMode, OrbitRig};
use trailglow::input::{InputEvent, MouseButton};
use trailglow::options::{BloomOptions, Options};
use trailglow::render::{SceneSink, TrailGeometry};
use trailglow::session::Session;
use trailglow::util::frame_timing::FrameTiming;
use trailglow::{source, TrailError};
use web_time::{Duration, Instant};

#[derive(Parser)]
#[command(name = "trailglow", about = "Simulate the GPS track tour headlessly")]
struct Cli {
    /// JSON track file
    tracks: PathBuf,
    /// TOML options file (defaults when omitted)
    #[arg(long)]
    options: Option<PathBuf>,
    /// Write the effective options to this TOML file before running
    #[arg(long)]
    write_options: Option<PathBuf>,
    /// Number of frames to simulate
    #[arg(long, default_value_t = 600)]
    frames: u64,
    /// Simulated frame rate
    #[arg(long, default_value_t = 60)]
    fps: u32,
    /// Random seed for the tour (OS entropy when omitted)
    #[arg(long)]
    seed: Option<u64>,
    /// Simulate a user drag at this many seconds in (repeatable)
    #[arg(long)]
    interact_at: Vec<f64>,
}

/// Sink that logs what a renderer would receive.
#[derive(Default)]
struct LogSink {
    trail_vertices: usize,
    instances_written: usize,
}

impl SceneSink for LogSink {
    fn upload_trails(&mut self, trails: &[TrailGeometry]) {
        self.trail_vertices = trails.iter().map(|t| t.vertices.len()).sum();
        log::info!(
            "Uploaded {} trails ({} vertices)",
            trails.len(),
            self.trail_vertices
        );
    }

    fn write_instances(&mut self, buffers: &InstanceBuffers) {
        self.instances_written += buffers.len();
    }

    fn configure_bloom(&mut self, bloom: &BloomOptions) {
        log::debug!(
            "Bloom: intensity {} threshold {} radius {}",
            bloom.intensity,
            bloom.threshold,
            bloom.radius
        );
    }
}

fn run(cli: &Cli) -> Result<(), TrailError> {
    let options = match &cli.options {
        Some(path) => Options::load(path)?,
        None => Options::default(),
    };
    if let Some(path) = &cli.write_options {
        options.save(path)?;
        log::info!("Wrote effective options to {}", path.display());
    }
    let raw = source::load_path(&cli.tracks)?;

    let start = Instant::now();
    let rng = cli
        .seed
        .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
    let mut session = Session::with_rng(&raw, options, rng, start)?;

    let bounds = session.tracks().bounds();
    let center = bounds.map_or(DVec3::ZERO, |b| b.center());
    let mut camera = OrbitRig::new(
        center + DVec3::new(0.0, 400.0, 400.0),
        center,
        session.options().camera.fovy,
    )
    .with_interaction(session.interaction_sender());

    let mut sink = LogSink::default();
    let mut timing = FrameTiming::new(cli.fps.max(1), start);
    let frame = timing.frame_duration();
    let mut interactions: Vec<Duration> = cli
        .interact_at
        .iter()
        .filter_map(|&s| Duration::try_from_secs_f64(s).ok())
        .collect();
    interactions.sort_unstable();
    let mut interactions = interactions.into_iter().peekable();

    let mut now = start;
    let mut last_mode = session.mode();
    let mut last_featured = None;
    for _ in 0..cli.frames {
        now += frame;
        while let Some(at) = interactions.next_if(|&at| start + at <= now) {
            simulate_drag(&mut camera, start + at);
        }
        if !timing.should_render(now) {
            continue;
        }

        let report = session.frame(now, &mut camera, &mut sink);
        timing.end_frame(now);

        if report.featured != last_featured {
            if let Some(track) = session.featured_track() {
                log::info!(
                    "t={:.2}s featuring track {} ({} points, {:.0} units long)",
                    (now - start).as_secs_f64(),
                    track.id,
                    track.raw_point_count,
                    track.length
                );
            }
            last_featured = report.featured;
        }
        if report.mode != last_mode {
            log::info!(
                "t={:.2}s camera {:?} -> {:?}",
                (now - start).as_secs_f64(),
                last_mode,
                report.mode
            );
            last_mode = report.mode;
        }
    }

    log::info!(
        "Simulated {} frames ({:.1} fps), {} instances written, tour {}",
        timing.frame_count(),
        timing.fps(),
        sink.instances_written,
        if session.mode() == CameraMode::UserControl {
            "paused"
        } else {
            "running"
        }
    );
    Ok(())
}

/// Press, drag and release the primary button.
fn simulate_drag(camera: &mut OrbitRig, at: Instant) {
    let events = [
        InputEvent::CursorMoved { x: 100.0, y: 100.0 },
        InputEvent::MouseButton {
            button: MouseButton::Left,
            pressed: true,
        },
        InputEvent::CursorMoved { x: 140.0, y: 110.0 },
        InputEvent::MouseButton {
            button: MouseButton::Left,
            pressed: false,
        },
    ];
    let moved = events
        .into_iter()
        .filter(|&event| camera.handle_input(event, at))
        .count();
    log::debug!("Simulated drag moved the camera {moved} times");
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
