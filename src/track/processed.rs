//! Scene-ready tracks: projected points, their curve, and derived bounds.

use glam::DVec3;
use rustc_hash::FxHashMap;

use crate::curve::CatmullRomCurve;
use crate::error::TrackBuildError;
use crate::geo::Centroid;

/// Axis-aligned bounding box in the local frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Minimum corner.
    pub min: DVec3,
    /// Maximum corner.
    pub max: DVec3,
}

impl BoundingBox {
    /// Tightest box around `points`, or `None` for an empty slice.
    #[must_use]
    pub fn from_points(points: &[DVec3]) -> Option<Self> {
        let first = *points.first()?;
        Some(points.iter().fold(
            Self {
                min: first,
                max: first,
            },
            |bbox, p| Self {
                min: bbox.min.min(*p),
                max: bbox.max.max(*p),
            },
        ))
    }

    /// Center point.
    #[must_use]
    pub fn center(&self) -> DVec3 {
        (self.min + self.max) * 0.5
    }

    /// Extent along each axis.
    #[must_use]
    pub fn size(&self) -> DVec3 {
        self.max - self.min
    }

    /// Smallest box containing both.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }
}

/// Geodetic endpoints and source metadata of a processed track.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackMetadata {
    /// Latitude of the first sample.
    pub start_lat: f64,
    /// Longitude of the first sample.
    pub start_lon: f64,
    /// Latitude of the last sample.
    pub end_lat: f64,
    /// Longitude of the last sample.
    pub end_lon: f64,
    /// Recording date, if known.
    pub timestamp: Option<String>,
    /// Ordinal within the source collection.
    pub sequence_index: usize,
}

/// A track ready for animation: immutable after processing.
#[derive(Debug, Clone)]
pub struct ProcessedTrack {
    /// Original index in the raw collection. Dropping other tracks never
    /// changes it.
    pub id: u32,
    /// Smooth curve through the projected (and possibly downsampled)
    /// points.
    pub curve: CatmullRomCurve,
    /// Bounds of the projected points.
    pub bounding_box: BoundingBox,
    /// Geodetic endpoints and source metadata.
    pub metadata: TrackMetadata,
    /// Sample count before downsampling.
    pub raw_point_count: usize,
    /// Approximate arc length of the curve in scene units.
    pub length: f64,
}

impl ProcessedTrack {
    /// Projected points the curve passes through, at least two.
    #[must_use]
    pub fn local_points(&self) -> &[DVec3] {
        self.curve.control_points()
    }
}

/// A track that did not survive processing, and why.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DroppedTrack {
    /// Original index in the raw collection.
    pub id: u32,
    /// Why it was dropped.
    pub reason: TrackBuildError,
}

/// Every processed track of a dataset, owned by the session and shared by
/// reference with the animation driver and the trail builder.
#[derive(Debug, Clone)]
pub struct TrackSet {
    tracks: Vec<ProcessedTrack>,
    index: FxHashMap<u32, usize>,
    centroid: Centroid,
    dropped: Vec<DroppedTrack>,
    bounds: Option<BoundingBox>,
}

impl TrackSet {
    /// Assemble a set. `tracks` must be in ascending id order.
    #[must_use]
    pub fn new(
        tracks: Vec<ProcessedTrack>,
        centroid: Centroid,
        dropped: Vec<DroppedTrack>,
    ) -> Self {
        let index = tracks
            .iter()
            .enumerate()
            .map(|(i, t)| (t.id, i))
            .collect();
        let bounds = tracks
            .iter()
            .map(|t| t.bounding_box)
            .reduce(|a, b| a.union(&b));
        Self {
            tracks,
            index,
            centroid,
            dropped,
            bounds,
        }
    }

    /// Tracks in id order.
    #[must_use]
    pub fn tracks(&self) -> &[ProcessedTrack] {
        &self.tracks
    }

    /// Look up a track by its original id.
    #[must_use]
    pub fn get(&self, id: u32) -> Option<&ProcessedTrack> {
        self.index.get(&id).map(|&i| &self.tracks[i])
    }

    /// Position of a track within [`tracks`](Self::tracks).
    #[must_use]
    pub fn position(&self, id: u32) -> Option<usize> {
        self.index.get(&id).copied()
    }

    /// Whether a track with this id survived processing.
    #[must_use]
    pub fn contains(&self, id: u32) -> bool {
        self.index.contains_key(&id)
    }

    /// Number of surviving tracks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Whether no track survived.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Origin of the local frame.
    #[must_use]
    pub fn centroid(&self) -> Centroid {
        self.centroid
    }

    /// Tracks dropped during processing.
    #[must_use]
    pub fn dropped(&self) -> &[DroppedTrack] {
        &self.dropped
    }

    /// Bounds of the whole dataset.
    #[must_use]
    pub fn bounds(&self) -> Option<BoundingBox> {
        self.bounds
    }

    /// Ids of surviving tracks, ascending.
    pub fn ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.tracks.iter().map(|t| t.id)
    }
}
