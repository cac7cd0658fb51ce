use crate::error::{MoodError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// The prompt tools a session can be submitted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToolId {
    MindDump,
    FindWords,
    DecisionHelper,
    WriteHard,
    QuickReset,
}

impl ToolId {
    pub const ALL: [ToolId; 5] = [
        ToolId::MindDump,
        ToolId::FindWords,
        ToolId::DecisionHelper,
        ToolId::WriteHard,
        ToolId::QuickReset,
    ];

    /// Wire identifier, e.g. `mind-dump`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolId::MindDump => "mind-dump",
            ToolId::FindWords => "find-words",
            ToolId::DecisionHelper => "decision-helper",
            ToolId::WriteHard => "write-hard",
            ToolId::QuickReset => "quick-reset",
        }
    }

    /// Human-facing tool name.
    pub fn display_name(&self) -> &'static str {
        match self {
            ToolId::MindDump => "Mind Dump",
            ToolId::FindWords => "Find Words",
            ToolId::DecisionHelper => "Decision Helper",
            ToolId::WriteHard => "Write The Hard Thing",
            ToolId::QuickReset => "Quick Reset",
        }
    }
}

impl fmt::Display for ToolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolId {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        ToolId::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown tool id: {}", s))
    }
}

/// One logged interaction with a tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub id: String,
    pub tool_id: ToolId,
    #[serde(default)]
    pub input: String,
    #[serde(default)]
    pub output: String,
    /// Epoch milliseconds. The only ordering key.
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emotion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub helpful_rating: Option<u8>,
}

impl SessionRecord {
    pub fn new(
        tool_id: ToolId,
        input: impl Into<String>,
        output: impl Into<String>,
        timestamp: i64,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            tool_id,
            input: input.into(),
            output: output.into(),
            timestamp,
            theme: None,
            emotion: None,
            helpful_rating: None,
        }
    }

    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = Some(theme.into());
        self
    }

    pub fn with_emotion(mut self, emotion: impl Into<String>) -> Self {
        self.emotion = Some(emotion.into());
        self
    }

    pub fn with_rating(mut self, rating: u8) -> Self {
        self.helpful_rating = Some(rating);
        self
    }

    /// Timestamp as a UTC date-time, if it is within chrono's range.
    pub fn occurred_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }

    /// Theme, ignoring empty strings.
    pub fn theme(&self) -> Option<&str> {
        self.theme.as_deref().filter(|t| !t.is_empty())
    }

    /// Emotion, ignoring empty strings.
    pub fn emotion(&self) -> Option<&str> {
        self.emotion.as_deref().filter(|e| !e.is_empty())
    }

    /// Check the caller contract for a record at position `index`.
    pub fn validate(&self, index: usize) -> Result<()> {
        let invalid = |reason: String| MoodError::InvalidRecord { index, reason };

        if self.id.trim().is_empty() {
            return Err(invalid("id must not be empty".into()));
        }
        if self.occurred_at().is_none() {
            return Err(invalid(format!(
                "timestamp {} is out of range",
                self.timestamp
            )));
        }
        if let Some(rating) = self.helpful_rating {
            if !(1..=5).contains(&rating) {
                return Err(invalid(format!(
                    "helpfulRating must be between 1 and 5, got {}",
                    rating
                )));
            }
        }
        Ok(())
    }
}

/// Validate a whole history, reporting the first offending index.
pub fn validate_records(records: &[SessionRecord]) -> Result<()> {
    records
        .iter()
        .enumerate()
        .try_for_each(|(i, r)| r.validate(i))
}

/// Detailed feedback collected on a single conversation during training runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingAnnotation {
    pub conversation_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_id: Option<ToolId>,
    #[serde(default)]
    pub what_i_needed: String,
    #[serde(default)]
    pub what_was_helpful: String,
    #[serde(default)]
    pub what_was_missing: String,
    /// 1-5 scale.
    pub emotional_accuracy: u8,
    pub would_use_again: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_notes: Option<String>,
    /// Epoch milliseconds.
    pub created_at: i64,
}

impl TrainingAnnotation {
    pub fn validate(&self, index: usize) -> Result<()> {
        let invalid = |reason: String| MoodError::InvalidAnnotation { index, reason };

        if self.conversation_id.trim().is_empty() {
            return Err(invalid("conversationId must not be empty".into()));
        }
        if !(1..=5).contains(&self.emotional_accuracy) {
            return Err(invalid(format!(
                "emotionalAccuracy must be between 1 and 5, got {}",
                self.emotional_accuracy
            )));
        }
        if DateTime::from_timestamp_millis(self.created_at).is_none() {
            return Err(invalid(format!(
                "createdAt {} is out of range",
                self.created_at
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_id_wire_names() {
        for tool in ToolId::ALL {
            let json = serde_json::to_string(&tool).unwrap();
            assert_eq!(json, format!("\"{}\"", tool.as_str()));
            assert_eq!(tool.as_str().parse::<ToolId>().unwrap(), tool);
        }
        assert!("journal".parse::<ToolId>().is_err());
    }

    #[test]
    fn test_record_deserializes_camel_case() {
        let json = r#"{
            "id": "r1",
            "toolId": "decision-helper",
            "input": "job offer?",
            "output": "let's weigh it",
            "timestamp": 1704700000000,
            "theme": "work",
            "helpfulRating": 5
        }"#;
        let record: SessionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.tool_id, ToolId::DecisionHelper);
        assert_eq!(record.theme(), Some("work"));
        assert_eq!(record.emotion(), None);
        assert_eq!(record.helpful_rating, Some(5));
    }

    #[test]
    fn test_unknown_tool_is_rejected() {
        let json = r#"{"id":"r1","toolId":"journal","timestamp":0}"#;
        assert!(serde_json::from_str::<SessionRecord>(json).is_err());
    }

    #[test]
    fn test_missing_timestamp_is_rejected() {
        let json = r#"{"id":"r1","toolId":"mind-dump"}"#;
        assert!(serde_json::from_str::<SessionRecord>(json).is_err());
    }

    #[test]
    fn test_empty_theme_is_ignored() {
        let record = SessionRecord::new(ToolId::MindDump, "", "", 0).with_theme("");
        assert_eq!(record.theme(), None);
    }

    #[test]
    fn test_validate_rating_range() {
        let ok = SessionRecord::new(ToolId::MindDump, "a", "b", 0).with_rating(4);
        assert!(ok.validate(0).is_ok());

        let bad = SessionRecord::new(ToolId::MindDump, "a", "b", 0).with_rating(9);
        let err = bad.validate(3).unwrap_err();
        assert!(matches!(err, MoodError::InvalidRecord { index: 3, .. }));
    }

    #[test]
    fn test_validate_timestamp_range() {
        let bad = SessionRecord::new(ToolId::MindDump, "a", "b", i64::MAX);
        assert!(bad.validate(0).is_err());
    }

    #[test]
    fn test_validate_records_reports_index() {
        let mut second = SessionRecord::new(ToolId::WriteHard, "", "", 0);
        second.id = String::new();
        let records = vec![SessionRecord::new(ToolId::MindDump, "", "", 0), second];
        match validate_records(&records) {
            Err(MoodError::InvalidRecord { index, .. }) => assert_eq!(index, 1),
            other => panic!("expected InvalidRecord, got {:?}", other),
        }
    }

    #[test]
    fn test_annotation_validation() {
        let annotation = TrainingAnnotation {
            conversation_id: "c1".into(),
            tool_id: Some(ToolId::FindWords),
            what_i_needed: "words".into(),
            what_was_helpful: "tone".into(),
            what_was_missing: String::new(),
            emotional_accuracy: 0,
            would_use_again: true,
            additional_notes: None,
            created_at: 0,
        };
        assert!(annotation.validate(0).is_err());

        let fixed = TrainingAnnotation {
            emotional_accuracy: 4,
            ..annotation
        };
        assert!(fixed.validate(0).is_ok());
    }
}
