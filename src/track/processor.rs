//! Raw tracks → processed tracks.
//!
//! Computes the dataset centroid, then per track: downsample, project,
//! build the curve. A track that cannot be built is dropped and recorded;
//! it never fails the batch.

use glam::DVec3;

use super::processed::{
    BoundingBox, DroppedTrack, ProcessedTrack, TrackMetadata, TrackSet,
};
use super::raw::RawTrack;
use crate::curve::{self, CatmullRomCurve};
use crate::error::{TrackBuildError, TrailError};
use crate::geo::{Centroid, Projector, RawPoint};
use crate::options::{ProjectionOptions, TrackOptions};

/// Offset from the centroid (degrees, about 55 km of latitude) beyond which
/// the flat projection is noticeably distorted.
const DISTORTION_WARN_DEGREES: f64 = 0.5;

/// Segments used to estimate a track's arc length.
const LENGTH_DIVISIONS: usize = 256;

/// Keep at most `max_points` samples at a uniform stride, plus the final
/// sample when the stride skips it.
///
/// The result never exceeds `max_points + 1` entries and always ends with
/// the last input sample. Inputs at or under the limit are returned as-is.
#[must_use]
pub fn downsample<T: Clone>(points: &[T], max_points: usize) -> Vec<T> {
    let len = points.len();
    if len <= max_points || max_points == 0 {
        return points.to_vec();
    }

    let step = len as f64 / max_points as f64;
    let mut out: Vec<T> = Vec::with_capacity(max_points + 1);
    let mut last_index = None;
    for i in 0..max_points {
        let index = ((i as f64 * step).floor() as usize).min(len - 1);
        out.push(points[index].clone());
        last_index = Some(index);
    }
    if last_index != Some(len - 1) {
        out.push(points[len - 1].clone());
    }
    out
}

/// Turns raw tracks into a [`TrackSet`].
#[derive(Debug, Clone)]
pub struct TrackProcessor {
    tracks: TrackOptions,
    projection: ProjectionOptions,
}

impl TrackProcessor {
    /// Processor with the given options.
    #[must_use]
    pub fn new(tracks: &TrackOptions, projection: &ProjectionOptions) -> Self {
        Self {
            tracks: tracks.clone(),
            projection: projection.clone(),
        }
    }

    /// Process a dataset, failing when nothing usable remains.
    ///
    /// Returns [`TrailError::EmptyDataset`] when there are no points at all
    /// and [`TrailError::NoValidTracks`] when every track was dropped.
    ///
    /// # Errors
    ///
    /// As above.
    pub fn process(&self, raw: &[RawTrack]) -> Result<TrackSet, TrailError> {
        let set = self.process_lenient(raw)?;
        if set.is_empty() {
            return Err(TrailError::NoValidTracks {
                dropped: set.dropped().len(),
            });
        }
        Ok(set)
    }

    /// Process a dataset, returning an empty set when every track is
    /// dropped.
    ///
    /// # Errors
    ///
    /// [`TrailError::EmptyDataset`] when there are no points at all.
    pub fn process_lenient(
        &self,
        raw: &[RawTrack],
    ) -> Result<TrackSet, TrailError> {
        let centroid = Centroid::from_points(raw.iter().flat_map(|t| &t.points))
            .ok_or(TrailError::EmptyDataset)?;
        let projector = Projector::new(centroid, &self.projection);
        warn_if_distorted(raw, centroid);

        let mut tracks = Vec::with_capacity(raw.len());
        let mut dropped = Vec::new();
        for (index, raw_track) in raw.iter().enumerate() {
            let id = index as u32;
            match self.build_track(id, raw_track, &projector) {
                Ok(track) => tracks.push(track),
                Err(reason) => {
                    log::debug!("Dropping track {id}: {reason}");
                    dropped.push(DroppedTrack { id, reason });
                }
            }
        }

        log::info!(
            "Processed {} tracks ({} kept, {} dropped) around ({:.5}, {:.5})",
            raw.len(),
            tracks.len(),
            dropped.len(),
            centroid.lat,
            centroid.lon,
        );
        Ok(TrackSet::new(tracks, centroid, dropped))
    }

    /// Downsample, project and fit a curve for one track.
    fn build_track(
        &self,
        id: u32,
        raw: &RawTrack,
        projector: &Projector,
    ) -> Result<ProcessedTrack, TrackBuildError> {
        let (Some(first), Some(last)) = (raw.points.first(), raw.points.last())
        else {
            return Err(TrackBuildError::TooFewPoints { count: 0 });
        };

        let retained = downsample(&raw.points, self.tracks.max_points_per_track);
        let local_points: Vec<DVec3> =
            retained.iter().map(|p| projector.project_point(p)).collect();
        if local_points.len() < 2 {
            return Err(TrackBuildError::TooFewPoints {
                count: local_points.len(),
            });
        }

        let bounding_box = BoundingBox::from_points(&local_points)
            .ok_or(TrackBuildError::TooFewPoints { count: 0 })?;
        let curve = CatmullRomCurve::new(
            local_points,
            self.tracks.curve_kind,
            self.tracks.tension,
        )?;
        let length = curve::length(&curve, LENGTH_DIVISIONS);

        Ok(ProcessedTrack {
            id,
            curve,
            bounding_box,
            metadata: metadata(first, last, raw),
            raw_point_count: raw.len(),
            length,
        })
    }
}

fn metadata(first: &RawPoint, last: &RawPoint, raw: &RawTrack) -> TrackMetadata {
    TrackMetadata {
        start_lat: first.lat,
        start_lon: first.lon,
        end_lat: last.lat,
        end_lon: last.lon,
        timestamp: raw.meta.timestamp.clone(),
        sequence_index: raw.meta.sequence_index,
    }
}

/// Largest lat or lon offset (degrees) of any point from the centroid.
fn max_centroid_offset(raw: &[RawTrack], centroid: Centroid) -> f64 {
    raw.iter()
        .flat_map(|t| &t.points)
        .map(|p| (p.lat - centroid.lat).abs().max((p.lon - centroid.lon).abs()))
        .fold(0.0_f64, f64::max)
}

fn warn_if_distorted(raw: &[RawTrack], centroid: Centroid) {
    let max_offset = max_centroid_offset(raw, centroid);
    if max_offset > DISTORTION_WARN_DEGREES {
        log::warn!(
            "Dataset spans {max_offset:.2}° from its centroid; the flat \
             projection will distort distant tracks",
        );
    }
}
