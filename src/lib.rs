// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Synchronized 3D animation of GPS tracks with an autonomous touring
//! camera.
//!
//! Trailglow turns a collection of recorded GPS paths into scene data for a
//! renderer: every track becomes a smooth curve in a local Cartesian frame,
//! a glowing head travels along each curve in lockstep with all others, and
//! a camera tours the dataset by featuring one track at a time until the
//! user takes over.
//!
//! # Key entry points
//!
//! - [`session::Session`] - one loaded dataset, advanced once per frame
//! - [`source`] - reading JSON track files into [`track::RawTrack`]s
//! - [`options::Options`] - runtime configuration (projection, tracks,
//!   animation, camera tour, bloom)
//! - [`render`] - traits a renderer implements to receive the scene
//!
//! # Architecture
//!
//! Loading runs the [`track::TrackProcessor`]: points are projected around
//! the dataset centroid by [`geo::Projector`], downsampled, and fitted with
//! a [`curve::CatmullRomCurve`]. Per frame, the session drains user
//! interactions, fires due timers into the
//! [`camera::CameraController`] state machine, advances any camera move,
//! and has the [`animation::AnimationDriver`] sample every curve at one
//! shared progress value into GPU-ready instance buffers.

pub mod animation;
pub mod camera;
pub mod curve;
pub mod error;
pub mod geo;
pub mod input;
pub mod options;
pub mod render;
pub mod session;
pub mod source;
pub mod track;
pub mod trail;
pub mod util;

pub use error::{TrackBuildError, TrailError};
pub use options::Options;
pub use session::{FrameReport, Session};
