//! The combined pattern report.

use crate::emotions::{analyze_emotional_patterns, EmotionalPatterns};
use crate::stats::utc_offset;
use crate::themes::{analyze_theme_patterns, ThemePatterns};
use crate::time::{analyze_time_patterns_at, TimePatterns};
use crate::tools::{analyze_tool_usage_patterns, ToolUsagePatterns};
use crate::trends::{analyze_session_trends_at, SessionTrends};
use chrono::FixedOffset;
use mood_core::SessionRecord;
use serde::{Deserialize, Serialize};

/// Output of every analyzer over the same history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullReport {
    pub time_patterns: TimePatterns,
    pub theme_patterns: ThemePatterns,
    pub emotional_patterns: EmotionalPatterns,
    pub tool_usage_patterns: ToolUsagePatterns,
    pub session_trends: SessionTrends,
}

/// Full report with calendar values taken in UTC.
pub fn generate_full_report(records: &[SessionRecord]) -> FullReport {
    generate_full_report_at(records, utc_offset())
}

/// Full report with every calendar value taken at `offset`.
pub fn generate_full_report_at(records: &[SessionRecord], offset: FixedOffset) -> FullReport {
    tracing::debug!(
        "Generating pattern report over {} records at offset {}",
        records.len(),
        offset
    );
    FullReport {
        time_patterns: analyze_time_patterns_at(records, offset),
        theme_patterns: analyze_theme_patterns(records),
        emotional_patterns: analyze_emotional_patterns(records),
        tool_usage_patterns: analyze_tool_usage_patterns(records),
        session_trends: analyze_session_trends_at(records, offset),
    }
}

/// Whether a history is long enough for patterns to mean anything.
pub fn has_enough_history(records: &[SessionRecord], min_sessions: usize) -> bool {
    records.len() >= min_sessions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::TimeRange;
    use crate::trends::Trend;
    use mood_core::seed;
    use mood_core::ToolId;

    #[test]
    fn test_empty_report() {
        let report = generate_full_report(&[]);
        assert_eq!(report.time_patterns.most_active_hour, 12);
        assert_eq!(report.theme_patterns.top_theme, "general");
        assert_eq!(report.emotional_patterns.most_common, "neutral");
        assert_eq!(report.tool_usage_patterns.usage_balance, 0.0);
        assert_eq!(report.session_trends.total_sessions, 0);
        assert_eq!(report.session_trends.last_active, None);
    }

    #[test]
    fn test_report_matches_individual_analyzers() {
        let records = seed::persona("anna").unwrap().records;
        let report = generate_full_report(&records);

        assert_eq!(report.theme_patterns, analyze_theme_patterns(&records));
        assert_eq!(report.emotional_patterns, analyze_emotional_patterns(&records));
        assert_eq!(report.tool_usage_patterns, analyze_tool_usage_patterns(&records));
        assert_eq!(
            report.time_patterns,
            crate::time::analyze_time_patterns(&records)
        );
        assert_eq!(
            report.session_trends,
            crate::trends::analyze_session_trends(&records)
        );
    }

    #[test]
    fn test_report_is_idempotent() {
        let records = seed::persona("ruby").unwrap().records;
        assert_eq!(generate_full_report(&records), generate_full_report(&records));
    }

    #[test]
    fn test_anna_report() {
        let records = seed::persona("anna").unwrap().records;
        let report = generate_full_report(&records);

        assert_eq!(report.theme_patterns.top_theme, "work");
        assert_eq!(report.theme_patterns.themes[0].count, 4);
        assert_eq!(report.theme_patterns.themes[0].percentage, 67);
        assert_eq!(report.emotional_patterns.most_common, "anxious");
        // Ratings 4,5,3,5,4,4: five of six are >= 4.
        assert_eq!(report.emotional_patterns.improvement_rate, 83);
        assert_eq!(report.tool_usage_patterns.favorite_tools[0], ToolId::MindDump);
        // All six sessions fall on Mondays.
        assert_eq!(report.time_patterns.most_active_day, "Monday");
        assert_eq!(report.time_patterns.by_day_of_week.len(), 1);
        assert_eq!(report.session_trends.total_sessions, 6);
        assert_eq!(report.session_trends.streak_days, 1);
    }

    #[test]
    fn test_dan_report() {
        let records = seed::persona("dan").unwrap().records;
        let report = generate_full_report(&records);
        assert_eq!(
            report.tool_usage_patterns.by_tool[&ToolId::DecisionHelper],
            4
        );
        assert_eq!(report.emotional_patterns.improvement_rate, 100);
        // Two sessions over 6.7 days, then three over 13.8 days.
        assert_eq!(report.session_trends.trend, Trend::Decreasing);
    }

    #[test]
    fn test_offset_applies_to_every_calendar_analyzer() {
        // 2024-01-08T23:30Z and 2024-01-09T00:30Z.
        let records = vec![
            SessionRecord::new(ToolId::MindDump, "", "", 1_704_756_600_000),
            SessionRecord::new(ToolId::MindDump, "", "", 1_704_760_200_000),
        ];
        let utc = generate_full_report(&records);
        assert_eq!(utc.session_trends.streak_days, 2);
        assert_eq!(utc.time_patterns.preferred_time_range, TimeRange::Night);

        let minus_three = FixedOffset::west_opt(3 * 3600).unwrap();
        let shifted = generate_full_report_at(&records, minus_three);
        assert_eq!(shifted.session_trends.streak_days, 1);
        assert_eq!(shifted.time_patterns.most_active_hour, 20);
        assert_eq!(shifted.time_patterns.most_active_day, "Monday");
    }

    #[test]
    fn test_report_json_shape() {
        let records = seed::persona("dan").unwrap().records;
        let json = serde_json::to_value(generate_full_report(&records)).unwrap();
        for key in [
            "timePatterns",
            "themePatterns",
            "emotionalPatterns",
            "toolUsagePatterns",
            "sessionTrends",
        ] {
            assert!(json.get(key).is_some(), "missing {}", key);
        }
        assert_eq!(json["sessionTrends"]["totalSessions"], 5);
        assert_eq!(json["toolUsagePatterns"]["byTool"]["decision-helper"], 4);
    }

    #[test]
    fn test_report_is_total_on_extreme_timestamps() {
        let records = vec![
            SessionRecord::new(ToolId::MindDump, "", "", i64::MIN),
            SessionRecord::new(ToolId::FindWords, "", "", i64::MAX),
        ];
        let report = generate_full_report(&records);
        assert_eq!(report.session_trends.total_sessions, 2);
        assert_eq!(report.session_trends.streak_days, 1);
        assert_eq!(report.time_patterns.most_active_hour, 12);
        assert_eq!(report.tool_usage_patterns.usage_balance, 1.0);
    }

    #[test]
    fn test_has_enough_history() {
        let records = seed::persona("dan").unwrap().records;
        assert!(has_enough_history(&records, 3));
        assert!(!has_enough_history(&records[..2], 3));
        assert!(has_enough_history(&[], 0));
    }
}
