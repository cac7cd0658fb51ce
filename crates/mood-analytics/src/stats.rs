//! Shared counting, rounding, entropy, and calendar helpers.

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc, Weekday};
use indexmap::IndexMap;

/// Milliseconds in one day.
pub const MS_PER_DAY: f64 = 86_400_000.0;

/// Full English weekday names, Sunday first.
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// The default calendar policy: UTC.
pub fn utc_offset() -> FixedOffset {
    Utc.fix()
}

pub fn weekday_name(day: Weekday) -> &'static str {
    WEEKDAY_NAMES[day.num_days_from_sunday() as usize]
}

/// Epoch milliseconds viewed at a fixed offset. `None` when out of chrono's range.
pub fn local_datetime(timestamp_ms: i64, offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
    DateTime::from_timestamp_millis(timestamp_ms).map(|dt| dt.with_timezone(&offset))
}

/// Calendar date of a timestamp at a fixed offset.
pub fn local_date(timestamp_ms: i64, offset: FixedOffset) -> Option<NaiveDate> {
    local_datetime(timestamp_ms, offset).map(|dt| dt.date_naive())
}

/// `round(count / total * 100)`, or 0 when `total` is 0.
pub fn percentage(count: usize, total: usize) -> u32 {
    if total == 0 {
        0
    } else {
        (count as f64 / total as f64 * 100.0).round() as u32
    }
}

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Occurrence counts keyed by first appearance.
pub fn count_occurrences<'a, I>(keys: I) -> IndexMap<String, usize>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: IndexMap<String, usize> = IndexMap::new();
    for key in keys {
        *counts.entry(key.to_string()).or_insert(0) += 1;
    }
    counts
}

/// Counts sorted by descending count; ties keep first-appearance order.
pub fn ranked(counts: &IndexMap<String, usize>) -> Vec<(String, usize)> {
    let mut sorted: Vec<(String, usize)> =
        counts.iter().map(|(k, v)| (k.clone(), *v)).collect();
    // sort_by is stable, so equal counts stay in insertion order.
    sorted.sort_by(|a, b| b.1.cmp(&a.1));
    sorted
}

/// Shannon entropy of the distribution normalized by `log2(k)`, in [0, 1].
///
/// Zero for fewer than two non-empty categories.
pub fn normalized_entropy<I>(counts: I) -> f64
where
    I: IntoIterator<Item = usize>,
{
    let counts: Vec<usize> = counts.into_iter().filter(|c| *c > 0).collect();
    if counts.len() < 2 {
        return 0.0;
    }
    let total: usize = counts.iter().sum();
    let entropy: f64 = counts
        .iter()
        .map(|&c| {
            let p = c as f64 / total as f64;
            -p * p.log2()
        })
        .sum();
    (entropy / (counts.len() as f64).log2()).clamp(0.0, 1.0)
}

/// Fractional days between two timestamps, floored at one day.
pub fn day_span(first_ms: i64, last_ms: i64) -> f64 {
    (last_ms.abs_diff(first_ms) as f64 / MS_PER_DAY).max(1.0)
}
