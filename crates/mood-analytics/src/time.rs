//! Hour-of-day and weekday habits.

use crate::stats::{local_datetime, utc_offset, weekday_name};
use chrono::{Datelike, FixedOffset, Timelike};
use indexmap::IndexMap;
use mood_core::SessionRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Hour reported when there is no data.
pub const DEFAULT_HOUR: u32 = 12;
/// Weekday reported when there is no data.
pub const DEFAULT_DAY: &str = "Monday";

/// Coarse part of the day derived from the most active hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeRange {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl TimeRange {
    /// [5,12) morning, [12,17) afternoon, [17,22) evening, otherwise night.
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            5..=11 => TimeRange::Morning,
            12..=16 => TimeRange::Afternoon,
            17..=21 => TimeRange::Evening,
            _ => TimeRange::Night,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::Morning => "morning",
            TimeRange::Afternoon => "afternoon",
            TimeRange::Evening => "evening",
            TimeRange::Night => "night",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimePatterns {
    /// Hour (0-23) to session count.
    pub by_hour: BTreeMap<u32, usize>,
    /// Weekday name to session count, in first-seen order.
    pub by_day_of_week: IndexMap<String, usize>,
    pub most_active_hour: u32,
    pub most_active_day: String,
    pub preferred_time_range: TimeRange,
}

/// Time patterns with calendar values taken in UTC.
pub fn analyze_time_patterns(records: &[SessionRecord]) -> TimePatterns {
    analyze_time_patterns_at(records, utc_offset())
}

/// Time patterns with calendar values taken at `offset`.
///
/// Ties for the most active hour go to the lowest hour; ties for the most
/// active weekday go to the weekday seen first in `records`.
pub fn analyze_time_patterns_at(records: &[SessionRecord], offset: FixedOffset) -> TimePatterns {
    let mut by_hour: BTreeMap<u32, usize> = BTreeMap::new();
    let mut by_day_of_week: IndexMap<String, usize> = IndexMap::new();

    for dt in records
        .iter()
        .filter_map(|r| local_datetime(r.timestamp, offset))
    {
        *by_hour.entry(dt.hour()).or_insert(0) += 1;
        *by_day_of_week
            .entry(weekday_name(dt.weekday()).to_string())
            .or_insert(0) += 1;
    }

    tracing::debug!(
        "Time analysis: {} records, {} distinct hours, {} distinct weekdays",
        records.len(),
        by_hour.len(),
        by_day_of_week.len()
    );

    let most_active_hour = first_max(by_hour.iter().map(|(h, c)| (*h, *c))).unwrap_or(DEFAULT_HOUR);
    let most_active_day = first_max(by_day_of_week.iter().map(|(d, c)| (d.clone(), *c)))
        .unwrap_or_else(|| DEFAULT_DAY.to_string());

    TimePatterns {
        preferred_time_range: TimeRange::from_hour(most_active_hour),
        by_hour,
        by_day_of_week,
        most_active_hour,
        most_active_day,
    }
}

/// Key with the highest count; the earliest key wins a tie.
fn first_max<K>(entries: impl Iterator<Item = (K, usize)>) -> Option<K> {
    let mut best: Option<(K, usize)> = None;
    for (key, count) in entries {
        let replace = match &best {
            Some((_, best_count)) => count > *best_count,
            None => true,
        };
        if replace {
            best = Some((key, count));
        }
    }
    best.map(|(key, _)| key)
}
