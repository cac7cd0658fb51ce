//! Session cadence: weekly average, trend direction, and the current streak.

use crate::stats::{day_span, local_date, utc_offset, MS_PER_DAY};
use chrono::{FixedOffset, NaiveDate};
use mood_core::SessionRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Second-half rate above `first * INCREASE_FACTOR` counts as increasing.
pub const INCREASE_FACTOR: f64 = 1.2;
/// Second-half rate below `first * DECREASE_FACTOR` counts as decreasing.
pub const DECREASE_FACTOR: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Increasing,
    Decreasing,
    Stable,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Increasing => "increasing",
            Trend::Decreasing => "decreasing",
            Trend::Stable => "stable",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionTrends {
    pub total_sessions: usize,
    /// Sessions per week over the whole history, rounded.
    pub weekly_average: u64,
    pub trend: Trend,
    /// Consecutive active days ending at the most recent session date.
    pub streak_days: u32,
    /// Epoch milliseconds of the latest session.
    pub last_active: Option<i64>,
}

impl SessionTrends {
    pub fn empty() -> Self {
        Self {
            total_sessions: 0,
            weekly_average: 0,
            trend: Trend::Stable,
            streak_days: 0,
            last_active: None,
        }
    }
}

/// Session trends with calendar dates taken in UTC.
pub fn analyze_session_trends(records: &[SessionRecord]) -> SessionTrends {
    analyze_session_trends_at(records, utc_offset())
}

/// Session trends with calendar dates (for the streak) taken at `offset`.
pub fn analyze_session_trends_at(records: &[SessionRecord], offset: FixedOffset) -> SessionTrends {
    let mut timestamps: Vec<i64> = records.iter().map(|r| r.timestamp).collect();
    timestamps.sort_unstable();

    let (first, last) = match (timestamps.first(), timestamps.last()) {
        (Some(f), Some(l)) => (*f, *l),
        _ => return SessionTrends::empty(),
    };

    let total = timestamps.len();
    let days = whole_days(first, last);
    let weekly_average = (total as f64 / days * 7.0).round() as u64;
    tracing::debug!(
        "Session trends: {} records over {} days, {} per week",
        total,
        days,
        weekly_average
    );

    SessionTrends {
        total_sessions: total,
        weekly_average,
        trend: detect_trend(&timestamps),
        streak_days: current_streak(&timestamps, offset),
        last_active: Some(last),
    }
}

/// Whole days between two timestamps, rounded up, at least one.
fn whole_days(first_ms: i64, last_ms: i64) -> f64 {
    (last_ms.abs_diff(first_ms) as f64 / MS_PER_DAY).ceil().max(1.0)
}

/// Compare the session rate of the later half of the history with the earlier half.
///
/// `sorted` must be ascending. The earlier half gets the smaller share when
/// the length is odd.
fn detect_trend(sorted: &[i64]) -> Trend {
    if sorted.len() < 2 {
        return Trend::Stable;
    }
    let (first_half, second_half) = sorted.split_at(sorted.len() / 2);
    let first_rate = half_rate(first_half);
    let second_rate = half_rate(second_half);

    if second_rate > first_rate * INCREASE_FACTOR {
        Trend::Increasing
    } else if second_rate < first_rate * DECREASE_FACTOR {
        Trend::Decreasing
    } else {
        Trend::Stable
    }
}

/// Sessions per day within a non-empty ascending slice.
fn half_rate(half: &[i64]) -> f64 {
    match (half.first(), half.last()) {
        (Some(f), Some(l)) => half.len() as f64 / day_span(*f, *l),
        _ => 0.0,
    }
}

/// Length of the run of consecutive calendar days ending at the latest active date.
///
/// Any non-empty history has a streak of at least 1, even when no timestamp
/// maps to a calendar date.
pub fn current_streak(timestamps: &[i64], offset: FixedOffset) -> u32 {
    let dates: Vec<NaiveDate> = timestamps
        .iter()
        .filter_map(|ts| local_date(*ts, offset))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    if dates.is_empty() {
        return u32::from(!timestamps.is_empty());
    }

    let mut streak = 1;
    for pair in dates.windows(2).rev() {
        if (pair[1] - pair[0]).num_days() == 1 {
            streak += 1;
        } else {
            break;
        }
    }
    streak
}
