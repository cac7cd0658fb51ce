//! Quality analysis over training-phase feedback annotations.
//!
//! Used before launch to check that responses land: how emotionally accurate
//! they felt, whether people would come back, and what keeps coming up as
//! helpful or missing.

use crate::stats::{count_occurrences, percentage, ranked};
use chrono::{DateTime, Utc};
use mood_core::TrainingAnnotation;
use serde::{Deserialize, Serialize};

/// Average accuracy below this triggers a prompt-empathy recommendation.
pub const ACCURACY_THRESHOLD: f64 = 3.5;
/// "Would use again" rate below this triggers a satisfaction recommendation.
pub const REUSE_THRESHOLD: u32 = 70;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingQuality {
    pub total_annotations: usize,
    /// Mean emotional accuracy (1-5), one decimal.
    pub avg_emotional_accuracy: f64,
    /// Percentage who would use the tool again.
    pub would_use_again_rate: u32,
    pub most_common_missing: Option<String>,
    pub most_common_helpful: Option<String>,
}

/// Summarize a set of annotations. `None` when there are none.
pub fn analyze_training_quality(annotations: &[TrainingAnnotation]) -> Option<TrainingQuality> {
    if annotations.is_empty() {
        return None;
    }
    let total = annotations.len();

    let accuracy_sum: u32 = annotations
        .iter()
        .map(|a| u32::from(a.emotional_accuracy))
        .sum();
    let avg = accuracy_sum as f64 / total as f64;
    let reuse = annotations.iter().filter(|a| a.would_use_again).count();

    Some(TrainingQuality {
        total_annotations: total,
        avg_emotional_accuracy: (avg * 10.0).round() / 10.0,
        would_use_again_rate: percentage(reuse, total),
        most_common_missing: mode(annotations.iter().map(|a| a.what_was_missing.as_str())),
        most_common_helpful: mode(annotations.iter().map(|a| a.what_was_helpful.as_str())),
    })
}

/// Most frequent non-empty answer; ties go to the first seen.
fn mode<'a>(answers: impl Iterator<Item = &'a str>) -> Option<String> {
    let counts = count_occurrences(answers.map(str::trim).filter(|s| !s.is_empty()));
    ranked(&counts).into_iter().next().map(|(answer, _)| answer)
}

/// Plain-text export of the quality summary, every annotation, and recommendations.
pub fn training_report(annotations: &[TrainingAnnotation], generated_at: DateTime<Utc>) -> String {
    let quality = match analyze_training_quality(annotations) {
        Some(q) => q,
        None => return "No training data available".to_string(),
    };

    let mut report = String::new();
    report.push_str("TRAINING DATA ANALYSIS REPORT\n");
    report.push_str(&format!("Generated: {}\n\n", generated_at.to_rfc3339()));

    report.push_str("=== OVERVIEW ===\n");
    report.push_str(&format!(
        "Total Training Sessions: {}\n",
        quality.total_annotations
    ));
    report.push_str(&format!(
        "Average Emotional Accuracy: {:.1}/5\n",
        quality.avg_emotional_accuracy
    ));
    report.push_str(&format!(
        "Would Use Again Rate: {}%\n",
        quality.would_use_again_rate
    ));
    report.push_str(&format!(
        "Most Common Missing Element: {}\n",
        quality.most_common_missing.as_deref().unwrap_or("N/A")
    ));
    report.push_str(&format!(
        "Most Common Helpful Element: {}\n\n",
        quality.most_common_helpful.as_deref().unwrap_or("N/A")
    ));

    report.push_str("=== DETAILED ANNOTATIONS ===\n");
    for (i, a) in annotations.iter().enumerate() {
        let tool = a.tool_id.map(|t| t.display_name()).unwrap_or("unknown");
        let date = DateTime::from_timestamp_millis(a.created_at)
            .map(|dt| dt.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".to_string());

        report.push_str(&format!("\nSession {}:\n", i + 1));
        report.push_str(&format!("Tool: {}\n", tool));
        report.push_str(&format!("Date: {}\n", date));
        report.push_str(&format!("What I Needed: {}\n", a.what_i_needed));
        report.push_str(&format!("What Was Helpful: {}\n", a.what_was_helpful));
        report.push_str(&format!("What Was Missing: {}\n", a.what_was_missing));
        report.push_str(&format!("Emotional Accuracy: {}/5\n", a.emotional_accuracy));
        report.push_str(&format!(
            "Would Use Again: {}\n",
            if a.would_use_again { "Yes" } else { "No" }
        ));
        if let Some(notes) = a.additional_notes.as_deref().filter(|n| !n.is_empty()) {
            report.push_str(&format!("Notes: {}\n", notes));
        }
        report.push_str("---\n");
    }

    report.push_str("\n=== RECOMMENDATIONS ===\n");
    for line in recommendations(&quality) {
        report.push_str(&format!("- {}\n", line));
    }

    report
}

/// Actionable follow-ups derived from the quality summary.
pub fn recommendations(quality: &TrainingQuality) -> Vec<String> {
    let mut lines = Vec::new();

    if quality.avg_emotional_accuracy < ACCURACY_THRESHOLD {
        lines.push("Low emotional accuracy: review prompts for empathy".to_string());
    } else {
        lines.push("Good emotional accuracy".to_string());
    }

    if quality.would_use_again_rate < REUSE_THRESHOLD {
        lines.push("Low \"would use again\" rate: investigate user satisfaction".to_string());
    } else {
        lines.push("High \"would use again\" rate".to_string());
    }

    match &quality.most_common_missing {
        Some(missing) => lines.push(format!(
            "Commonly missing: \"{}\", consider adding this",
            missing
        )),
        None => lines.push("No consistent gaps identified".to_string()),
    }

    lines
}
