//! Markdown and plain-text rendering of pattern reports.

use crate::report::FullReport;
use crate::stats::WEEKDAY_NAMES;
use chrono::{DateTime, FixedOffset};
use mood_core::ToolId;

/// Renders a [`FullReport`] for people rather than programs.
pub struct ReportRenderer;

impl ReportRenderer {
    /// Full markdown report. `offset` should be the one the report was
    /// generated at, so Last Active reads in the same zone as the hour and
    /// weekday figures.
    pub fn markdown(report: &FullReport, offset: FixedOffset) -> String {
        let mut out = String::new();
        out.push_str("# Pattern Report\n\n");

        // Overview.
        let trends = &report.session_trends;
        out.push_str("## Overview\n\n");
        out.push_str(&format!("- **Sessions:** {}\n", trends.total_sessions));
        out.push_str(&format!("- **Weekly Average:** {}\n", trends.weekly_average));
        out.push_str(&format!("- **Trend:** {}\n", trends.trend.as_str()));
        out.push_str(&format!("- **Streak:** {}\n", plural_days(trends.streak_days)));
        out.push_str(&format!(
            "- **Last Active:** {}\n\n",
            trends
                .last_active
                .map(|ts| format_timestamp(ts, offset))
                .unwrap_or_else(|| "never".to_string())
        ));

        // Time of day.
        let time = &report.time_patterns;
        out.push_str("## Time of Day\n\n");
        out.push_str(&format!(
            "- **Most Active Hour:** {:02}:00\n",
            time.most_active_hour
        ));
        out.push_str(&format!("- **Most Active Day:** {}\n", time.most_active_day));
        out.push_str(&format!(
            "- **Preferred Time:** {}\n\n",
            time.preferred_time_range.as_str()
        ));
        out.push_str("| Day | Sessions |\n");
        out.push_str("|-----|----------|\n");
        for day in WEEKDAY_NAMES {
            let count = time.by_day_of_week.get(day).copied().unwrap_or(0);
            out.push_str(&format!("| {} | {} |\n", day, count));
        }
        out.push('\n');

        // Themes.
        let themes = &report.theme_patterns;
        out.push_str("## Themes\n\n");
        if themes.themes.is_empty() {
            out.push_str("No themes recorded yet.\n");
        } else {
            for (i, t) in themes.themes.iter().enumerate() {
                out.push_str(&format!(
                    "{}. {} - {} ({}%)\n",
                    i + 1,
                    t.theme,
                    t.count,
                    t.percentage
                ));
            }
        }
        out.push_str(&format!("\n- **Diversity:** {:.2}\n\n", themes.diversity));

        // Emotions.
        let emotions = &report.emotional_patterns;
        out.push_str("## Emotions\n\n");
        if emotions.emotions.is_empty() {
            out.push_str("No emotions recorded yet.\n");
        } else {
            for (i, e) in emotions.emotions.iter().enumerate() {
                out.push_str(&format!(
                    "{}. {} - {} ({}%)\n",
                    i + 1,
                    e.emotion,
                    e.count,
                    e.percentage
                ));
            }
        }
        out.push_str(&format!(
            "\n- **Improvement Rate:** {}%\n\n",
            emotions.improvement_rate
        ));

        // Tools.
        let tools = &report.tool_usage_patterns;
        out.push_str("## Tools\n\n");
        if !tools.by_tool.is_empty() {
            out.push_str("| Tool | Sessions |\n");
            out.push_str("|------|----------|\n");
            for (tool, count) in &tools.by_tool {
                out.push_str(&format!("| {} | {} |\n", tool.display_name(), count));
            }
            out.push('\n');
        }
        out.push_str(&format!(
            "- **Favorites:** {}\n",
            tool_list(&tools.favorite_tools)
        ));
        out.push_str(&format!(
            "- **Least Used:** {}\n",
            tool_list(&tools.least_used_tools)
        ));
        out.push_str(&format!("- **Balance:** {:.2}\n", tools.usage_balance));

        out
    }

    /// Compact summary for terminal output.
    ///
    /// Below `min_sessions` this only says how much more history is needed.
    pub fn text_summary(report: &FullReport, min_sessions: usize) -> String {
        let trends = &report.session_trends;
        if trends.total_sessions < min_sessions {
            return format!(
                "  {} sessions recorded. Use the tools a few more times (at least {}) so meaningful patterns can emerge.\n",
                trends.total_sessions, min_sessions
            );
        }

        let time = &report.time_patterns;
        let themes = &report.theme_patterns;
        let emotions = &report.emotional_patterns;
        let tools = &report.tool_usage_patterns;

        let mut out = String::new();
        out.push_str(&format!(
            "  Sessions: {} (about {}/week, {})\n",
            trends.total_sessions,
            trends.weekly_average,
            trends.trend.as_str()
        ));
        out.push_str(&format!("  Streak: {}\n", plural_days(trends.streak_days)));
        out.push_str(&format!(
            "  Most active: {} around {:02}:00 ({})\n",
            time.most_active_day,
            time.most_active_hour,
            time.preferred_time_range.as_str()
        ));
        out.push_str(&format!(
            "  Top theme: {} (diversity {:.2})\n",
            themes.top_theme, themes.diversity
        ));
        out.push_str(&format!(
            "  Most common emotion: {}, {}% rated helpful\n",
            emotions.most_common, emotions.improvement_rate
        ));
        out.push_str(&format!(
            "  Favorite tools: {} (balance {:.2})\n",
            tool_list(&tools.favorite_tools),
            tools.usage_balance
        ));
        out
    }
}

fn tool_list(tools: &[ToolId]) -> String {
    if tools.is_empty() {
        return "-".to_string();
    }
    tools
        .iter()
        .map(|t| t.display_name())
        .collect::<Vec<_>>()
        .join(", ")
}

fn plural_days(days: u32) -> String {
    if days == 1 {
        "1 day".to_string()
    } else {
        format!("{} days", days)
    }
}

fn format_timestamp(ms: i64, offset: FixedOffset) -> String {
    let zone = if offset.local_minus_utc() == 0 {
        "UTC".to_string()
    } else {
        format!("UTC{}", offset)
    };
    DateTime::from_timestamp_millis(ms)
        .map(|dt| format!("{} {}", dt.with_timezone(&offset).format("%Y-%m-%d %H:%M"), zone))
        .unwrap_or_else(|| ms.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{generate_full_report, generate_full_report_at};
    use mood_core::seed;

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    #[test]
    fn test_markdown_structure() {
        let records = seed::persona("anna").unwrap().records;
        let md = ReportRenderer::markdown(&generate_full_report(&records), utc());

        assert!(md.starts_with("# Pattern Report"));
        for section in ["## Overview", "## Time of Day", "## Themes", "## Emotions", "## Tools"] {
            assert!(md.contains(section), "missing {}", section);
        }
        assert!(md.contains("| Monday | 6 |"));
        assert!(md.contains("| Sunday | 0 |"));
        assert!(md.contains("1. work - 4 (67%)"));
        assert!(md.contains("| Mind Dump | 3 |"));
        assert!(md.contains("- **Last Active:** 2024-02-05 22:30 UTC"));
    }

    #[test]
    fn test_markdown_empty_report() {
        let md = ReportRenderer::markdown(&generate_full_report(&[]), utc());
        assert!(md.contains("- **Sessions:** 0"));
        assert!(md.contains("- **Last Active:** never"));
        assert!(md.contains("No themes recorded yet."));
        assert!(md.contains("No emotions recorded yet."));
        assert!(md.contains("- **Favorites:** -"));
    }

    #[test]
    fn test_markdown_last_active_follows_offset() {
        let records = seed::persona("anna").unwrap().records;
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        let md = ReportRenderer::markdown(&generate_full_report_at(&records, plus_two), plus_two);

        // 2024-02-05T22:30Z is 00:30 on the 6th at +02:00, a Tuesday.
        assert!(md.contains("- **Last Active:** 2024-02-06 00:30 UTC+02:00"));
        assert!(md.contains("| Tuesday | 1 |"));
    }

    #[test]
    fn test_format_timestamp_out_of_range() {
        assert_eq!(format_timestamp(i64::MAX, utc()), i64::MAX.to_string());
    }

    #[test]
    fn test_text_summary() {
        let records = seed::persona("ruby").unwrap().records;
        let summary = ReportRenderer::text_summary(&generate_full_report(&records), 3);
        assert!(summary.contains("Sessions: 5"));
        assert!(summary.contains("Top theme: relationships"));
        assert!(summary.contains("Favorite tools: Write The Hard Thing, Find Words"));
    }

    #[test]
    fn test_text_summary_below_threshold() {
        let records = seed::persona("ruby").unwrap().records;
        let summary = ReportRenderer::text_summary(&generate_full_report(&records[..2]), 3);
        assert!(summary.contains("2 sessions recorded"));
        assert!(summary.contains("at least 3"));
    }

    #[test]
    fn test_plural_days() {
        assert_eq!(plural_days(0), "0 days");
        assert_eq!(plural_days(1), "1 day");
        assert_eq!(plural_days(4), "4 days");
    }
}
