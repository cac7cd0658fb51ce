//! Emotion frequency and how often sessions helped.

use crate::stats::{count_occurrences, percentage, ranked};
use mood_core::SessionRecord;
use serde::{Deserialize, Serialize};

/// Most common emotion reported when no record carries one.
pub const DEFAULT_EMOTION: &str = "neutral";
/// Ratings at or above this count as an improvement.
pub const IMPROVED_RATING: u8 = 4;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmotionCount {
    pub emotion: String,
    pub count: usize,
    /// Share of all records, 0-100.
    pub percentage: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmotionalPatterns {
    /// Emotions by descending count.
    pub emotions: Vec<EmotionCount>,
    pub most_common: String,
    /// Percentage of all records rated helpful (rating >= 4).
    pub improvement_rate: u32,
}

pub fn analyze_emotional_patterns(records: &[SessionRecord]) -> EmotionalPatterns {
    let total = records.len();
    let counts = count_occurrences(records.iter().filter_map(|r| r.emotion()));
    let improved = records
        .iter()
        .filter(|r| r.helpful_rating.is_some_and(|rating| rating >= IMPROVED_RATING))
        .count();

    let emotions: Vec<EmotionCount> = ranked(&counts)
        .into_iter()
        .map(|(emotion, count)| EmotionCount {
            emotion,
            count,
            percentage: percentage(count, total),
        })
        .collect();

    let most_common = emotions
        .first()
        .map(|e| e.emotion.clone())
        .unwrap_or_else(|| DEFAULT_EMOTION.to_string());
    let improvement_rate = percentage(improved, total);

    tracing::debug!(
        "Emotion analysis: {} records, {} distinct emotions, improvement {}%",
        total,
        emotions.len(),
        improvement_rate
    );

    EmotionalPatterns {
        emotions,
        most_common,
        improvement_rate,
    }
}
