//! Track files.
//!
//! A track file is JSON. The top level is either an array of tracks or an
//! object with a `tracks` array. Each track is either an array of points or
//! an object `{"points": [...], "timestamp": "YYYY-MM-DD"}`. Each point is
//! either `[lat, lon]`, `[lat, lon, elevation]`, or an object with `lat`,
//! `lon` and an optional `ele`/`elevation`.
//!
//! ```json
//! {"tracks": [
//!   {"timestamp": "2024-05-01", "points": [[47.60, -122.33, 12.0], [47.61, -122.34]]},
//!   [{"lat": 47.62, "lon": -122.30}, {"lat": 47.63, "lon": -122.31, "ele": 40}]
//! ]}
//! ```
//!
//! Points that are not readable or lie outside valid lat/lon ranges are
//! skipped one by one; a track with no readable points is kept (empty) so
//! ids stay equal to the track's position in the file.

use std::path::Path;

use serde_json::Value;

use crate::error::TrailError;
use crate::geo::RawPoint;
use crate::track::RawTrack;

/// Parse a track file already in memory.
///
/// # Errors
///
/// [`TrailError::Parse`] if the text is not JSON or has no track list.
pub fn parse_str(json: &str) -> Result<Vec<RawTrack>, TrailError> {
    let root: Value = serde_json::from_str(json)?;
    let list = match &root {
        Value::Array(tracks) => tracks,
        Value::Object(map) => match map.get("tracks") {
            Some(Value::Array(tracks)) => tracks,
            _ => {
                return Err(TrailError::Parse(
                    "expected a \"tracks\" array at the top level".to_owned(),
                ))
            }
        },
        _ => {
            return Err(TrailError::Parse(
                "expected an array of tracks or an object with \"tracks\"".to_owned(),
            ))
        }
    };

    let mut skipped = 0;
    let tracks: Vec<RawTrack> = list
        .iter()
        .enumerate()
        .map(|(index, value)| parse_track(index, value, &mut skipped))
        .collect();

    log::info!(
        "Read {} tracks ({} points, {skipped} malformed points skipped)",
        tracks.len(),
        tracks.iter().map(RawTrack::len).sum::<usize>()
    );
    Ok(tracks)
}

/// Read and parse a track file.
///
/// # Errors
///
/// [`TrailError::Io`] if the file cannot be read, otherwise as
/// [`parse_str`].
pub fn load_path(path: &Path) -> Result<Vec<RawTrack>, TrailError> {
    let content = std::fs::read_to_string(path)?;
    parse_str(&content)
}

fn parse_track(index: usize, value: &Value, skipped: &mut usize) -> RawTrack {
    let (points, timestamp) = match value {
        Value::Array(points) => (points.as_slice(), None),
        Value::Object(map) => (
            map.get("points")
                .and_then(Value::as_array)
                .map_or(&[][..], Vec::as_slice),
            map.get("timestamp").and_then(Value::as_str),
        ),
        _ => {
            log::debug!("Track {index} is neither an array nor an object");
            (&[][..], None)
        }
    };

    let mut parsed = Vec::with_capacity(points.len());
    for point in points {
        match parse_point(point) {
            Some(p) => parsed.push(p),
            None => *skipped += 1,
        }
    }

    let mut track = RawTrack::new(parsed, index);
    if let Some(ts) = timestamp {
        if is_iso_date(ts) {
            track = track.with_timestamp(ts);
        } else {
            log::debug!("Track {index}: ignoring non-ISO timestamp {ts:?}");
        }
    }
    track
}

fn parse_point(value: &Value) -> Option<RawPoint> {
    let (lat, lon, elevation) = match value {
        Value::Array(fields) => (
            fields.first()?.as_f64()?,
            fields.get(1)?.as_f64()?,
            fields.get(2).and_then(Value::as_f64),
        ),
        Value::Object(map) => (
            map.get("lat")?.as_f64()?,
            map.get("lon")?.as_f64()?,
            map.get("ele")
                .or_else(|| map.get("elevation"))
                .and_then(Value::as_f64),
        ),
        _ => return None,
    };
    let point = RawPoint::with_elevation(lat, lon, elevation.unwrap_or(0.0));
    point.is_valid().then_some(point)
}

/// `YYYY-MM-DD` with a plausible month and day.
fn is_iso_date(s: &str) -> bool {
    let bytes = s.as_bytes();
    if !s.is_ascii() || bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return false;
    }
    let digits = |range: std::ops::Range<usize>| -> Option<u32> {
        let part = &s[range];
        part.bytes()
            .all(|b| b.is_ascii_digit())
            .then(|| part.parse().ok())
            .flatten()
    };
    matches!(
        (digits(0..4), digits(5..7), digits(8..10)),
        (Some(_), Some(1..=12), Some(1..=31))
    )
}
