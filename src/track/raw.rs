//! Tracks as read from the source data, before projection.

use crate::geo::RawPoint;

/// Optional per-track metadata carried through from the source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTrackMeta {
    /// Recording date (`YYYY-MM-DD`), if the source provided one.
    pub timestamp: Option<String>,
    /// Ordinal of the track within the source collection.
    pub sequence_index: usize,
}

/// One recorded path: points in temporal order plus metadata.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTrack {
    /// Samples in recording order.
    pub points: Vec<RawPoint>,
    /// Source metadata.
    pub meta: RawTrackMeta,
}

impl RawTrack {
    /// Track with no metadata beyond its ordinal.
    #[must_use]
    pub fn new(points: Vec<RawPoint>, sequence_index: usize) -> Self {
        Self {
            points,
            meta: RawTrackMeta {
                timestamp: None,
                sequence_index,
            },
        }
    }

    /// Attach a recording date.
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.meta.timestamp = Some(timestamp.into());
        self
    }

    /// Number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the track has no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
