//! Track data from raw GPS samples to scene-ready curves.

mod processed;
pub mod processor;
mod raw;

pub use processed::{
    BoundingBox, DroppedTrack, ProcessedTrack, TrackMetadata, TrackSet,
};
pub use processor::{downsample, TrackProcessor};
pub use raw::{RawTrack, RawTrackMeta};
