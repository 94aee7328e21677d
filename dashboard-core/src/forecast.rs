//! Down-sampling of the 3-hour forecast feed to one entry per day.

use chrono::{DateTime, FixedOffset, Offset, Utc};

use crate::model::{ForecastEntry, ForecastFeed, ForecastSample};

/// Entries per day in a 3-hour feed.
pub const SAMPLES_PER_DAY: usize = 8;
/// Days shown in the forecast section.
pub const MAX_DAYS: usize = 5;

/// Pick samples at indices 0, 8, 16, 24, 32 (those that exist) and format them.
///
/// Short feeds give a shorter list, never an error. Samples with an
/// unrepresentable timestamp are skipped.
pub fn sample_daily(feed: &ForecastFeed) -> Vec<ForecastEntry> {
    let offset = FixedOffset::east_opt(feed.utc_offset_secs).unwrap_or(Utc.fix());

    feed.samples
        .iter()
        .step_by(SAMPLES_PER_DAY)
        .take(MAX_DAYS)
        .filter_map(|sample| to_entry(sample, offset))
        .collect()
}

fn to_entry(sample: &ForecastSample, offset: FixedOffset) -> Option<ForecastEntry> {
    let timestamp = DateTime::<Utc>::from_timestamp(sample.dt, 0)?;
    Some(ForecastEntry {
        timestamp,
        day_label: day_label(timestamp, offset),
        temperature_k: sample.temperature_k,
        icon: sample.icon.clone(),
        description: sample.description.clone(),
    })
}

/// Weekday plus day and month in the city's local time, e.g. `Tue 14 Nov`.
pub fn day_label(timestamp: DateTime<Utc>, offset: FixedOffset) -> String {
    timestamp.with_timezone(&offset).format("%a %d %b").to_string()
}
