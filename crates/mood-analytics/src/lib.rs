//! Behavioral pattern analysis over session histories.
//!
//! Five independent analyzers (time of day, themes, emotions, tool usage,
//! session trends), an aggregator that runs them all, markdown/text rendering,
//! and training-feedback quality analysis. Every function is pure: the same
//! records always produce the same output.
//!
//! Calendar values (hour, weekday, date) are derived at a fixed UTC offset.
//! The plain `analyze_*` functions use UTC; the `*_at` variants take the offset.

pub mod emotions;
pub mod render;
pub mod report;
pub mod stats;
pub mod themes;
pub mod time;
pub mod tools;
pub mod training;
pub mod trends;

pub use emotions::{analyze_emotional_patterns, EmotionCount, EmotionalPatterns};
pub use render::ReportRenderer;
pub use report::{generate_full_report, generate_full_report_at, has_enough_history, FullReport};
pub use themes::{analyze_theme_patterns, ThemeCount, ThemePatterns};
pub use time::{analyze_time_patterns, analyze_time_patterns_at, TimePatterns, TimeRange};
pub use tools::{analyze_tool_usage_patterns, ToolUsagePatterns};
pub use training::{analyze_training_quality, training_report, TrainingQuality};
pub use trends::{analyze_session_trends, analyze_session_trends_at, SessionTrends, Trend};
