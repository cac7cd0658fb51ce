//! Topic frequency and diversity.

use crate::stats::{count_occurrences, normalized_entropy, percentage, ranked, round2};
use mood_core::SessionRecord;
use serde::{Deserialize, Serialize};

/// Top theme reported when no record carries a theme.
pub const DEFAULT_THEME: &str = "general";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeCount {
    pub theme: String,
    pub count: usize,
    /// Share of all records, 0-100.
    pub percentage: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemePatterns {
    /// Themes by descending count.
    pub themes: Vec<ThemeCount>,
    pub top_theme: String,
    /// Normalized entropy of the theme distribution, 0-1, two decimals.
    pub diversity: f64,
}

pub fn analyze_theme_patterns(records: &[SessionRecord]) -> ThemePatterns {
    let total = records.len();
    let counts = count_occurrences(records.iter().filter_map(|r| r.theme()));

    let themes: Vec<ThemeCount> = ranked(&counts)
        .into_iter()
        .map(|(theme, count)| ThemeCount {
            theme,
            count,
            percentage: percentage(count, total),
        })
        .collect();

    let top_theme = themes
        .first()
        .map(|t| t.theme.clone())
        .unwrap_or_else(|| DEFAULT_THEME.to_string());
    let diversity = round2(normalized_entropy(counts.values().copied()));

    tracing::debug!(
        "Theme analysis: {} records, {} distinct themes, diversity {}",
        total,
        themes.len(),
        diversity
    );

    ThemePatterns {
        themes,
        top_theme,
        diversity,
    }
}
