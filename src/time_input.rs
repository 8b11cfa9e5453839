//! Conversion between `datetime-local` style strings and epoch seconds.
//!
//! Input is wall-clock time without an offset; the configured [`InputZone`]
//! decides which instant it names.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};

use crate::config::InputZone;

/// Minute-resolution format the create dialog pre-fills
pub const INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";

const ACCEPTED_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"];

/// Parses a wall-clock string in `zone`; `None` if malformed or nonexistent (DST gap)
pub fn parse_input(value: &str, zone: InputZone) -> Option<DateTime<Utc>> {
    let value = value.trim();
    let naive = ACCEPTED_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())?;

    match zone {
        InputZone::System => Local
            .from_local_datetime(&naive)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc)),
        InputZone::Fixed(offset) => offset
            .from_local_datetime(&naive)
            .single()
            .map(|dt| dt.with_timezone(&Utc)),
    }
}

/// Epoch seconds, rounded half up from the millisecond timestamp
pub fn to_epoch_seconds(instant: DateTime<Utc>) -> i64 {
    (instant.timestamp_millis() + 500).div_euclid(1000)
}

pub fn format_input(instant: DateTime<Utc>, zone: InputZone) -> String {
    match zone {
        InputZone::System => instant.with_timezone(&Local).format(INPUT_FORMAT).to_string(),
        InputZone::Fixed(offset) => instant.with_timezone(&offset).format(INPUT_FORMAT).to_string(),
    }
}
