//! One-time trail geometry: each track's curve sampled into a line strip.

use crate::curve::sample_uniform;
use crate::render::TrailGeometry;
use crate::track::{ProcessedTrack, TrackSet};

/// Line strip of `subdivisions + 1` vertices along one track.
#[must_use]
pub fn build_trail(track: &ProcessedTrack, subdivisions: usize) -> TrailGeometry {
    TrailGeometry {
        track_id: track.id,
        vertices: sample_uniform(&track.curve, subdivisions)
            .into_iter()
            .map(|p| p.as_vec3().to_array())
            .collect(),
    }
}

/// Trails for every track in the set, in id order.
#[must_use]
pub fn build_trails(tracks: &TrackSet, subdivisions: usize) -> Vec<TrailGeometry> {
    let trails: Vec<TrailGeometry> = tracks
        .tracks()
        .iter()
        .map(|t| build_trail(t, subdivisions))
        .collect();
    log::debug!(
        "Built {} trails ({} vertices)",
        trails.len(),
        trails.iter().map(|t| t.vertices.len()).sum::<usize>()
    );
    trails
}
