//! Crate-level error types.

use std::fmt;

/// Errors that abort loading a dataset.
///
/// These are surfaced to the caller as a distinct "failed to load" state;
/// no animation starts from a dataset that produced one.
#[derive(Debug)]
pub enum TrailError {
    /// Generic I/O failure while reading a track or options file.
    Io(std::io::Error),
    /// The track file is not valid JSON or has no recognizable track list.
    Parse(String),
    /// The dataset contains no points at all.
    EmptyDataset,
    /// Every track was dropped during processing.
    NoValidTracks {
        /// Number of tracks that were dropped.
        dropped: usize,
    },
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Options parsed but hold values the pipeline cannot run with.
    InvalidOptions(String),
}

impl fmt::Display for TrailError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Parse(msg) => write!(f, "track data parse error: {msg}"),
            Self::EmptyDataset => {
                write!(f, "dataset contains no track points")
            }
            Self::NoValidTracks { dropped } => {
                write!(f, "no valid tracks after filtering ({dropped} dropped)")
            }
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::InvalidOptions(msg) => write!(f, "invalid options: {msg}"),
        }
    }
}

impl std::error::Error for TrailError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for TrailError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for TrailError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e.to_string())
    }
}

/// Reasons a single track is dropped while building the scene.
///
/// Never fatal: the offending track is recorded and skipped, the rest of
/// the dataset continues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackBuildError {
    /// Fewer than two usable points remained.
    TooFewPoints {
        /// Points available after downsampling and projection.
        count: usize,
    },
    /// A projected point had a NaN or infinite coordinate.
    NonFinitePoint {
        /// Index of the offending point within the retained points.
        index: usize,
    },
    /// All points collapse onto a single location.
    Degenerate,
}

impl fmt::Display for TrackBuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewPoints { count } => {
                write!(f, "too few points ({count}, need at least 2)")
            }
            Self::NonFinitePoint { index } => {
                write!(f, "non-finite coordinate at point {index}")
            }
            Self::Degenerate => write!(f, "all points coincide"),
        }
    }
}

impl std::error::Error for TrackBuildError {}
