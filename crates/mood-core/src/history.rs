//! Reading and writing session histories and training annotations on disk.
//!
//! Histories are either a JSON array of records or JSON Lines (`.jsonl`), one
//! record per line. Every record is validated on load.

use crate::error::{MoodError, Result};
use crate::types::{validate_records, SessionRecord, TrainingAnnotation};
use std::path::Path;

/// Load and validate a session history.
pub fn load_records(path: &Path) -> Result<Vec<SessionRecord>> {
    let contents = std::fs::read_to_string(path)?;
    let records = if is_jsonl(path) {
        parse_jsonl(&contents)?
    } else {
        serde_json::from_str::<Vec<SessionRecord>>(&contents)?
    };
    validate_records(&records)?;
    tracing::debug!("Loaded {} session records from {:?}", records.len(), path);
    Ok(records)
}

/// Persist a session history as a pretty JSON array.
pub fn save_records(path: &Path, records: &[SessionRecord]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(records)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Load and validate training annotations (JSON array).
pub fn load_annotations(path: &Path) -> Result<Vec<TrainingAnnotation>> {
    let contents = std::fs::read_to_string(path)?;
    let annotations: Vec<TrainingAnnotation> = serde_json::from_str(&contents)?;
    for (i, annotation) in annotations.iter().enumerate() {
        annotation.validate(i)?;
    }
    Ok(annotations)
}

fn is_jsonl(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("jsonl")
}

fn parse_jsonl(contents: &str) -> Result<Vec<SessionRecord>> {
    let mut records = Vec::new();
    for line in contents.lines().filter(|l| !l.trim().is_empty()) {
        let record = serde_json::from_str::<SessionRecord>(line).map_err(|e| {
            MoodError::InvalidRecord {
                index: records.len(),
                reason: e.to_string(),
            }
        })?;
        records.push(record);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ToolId;

    fn sample() -> Vec<SessionRecord> {
        vec![
            SessionRecord::new(ToolId::MindDump, "too much", "grouped", 1_704_700_000_000)
                .with_theme("work")
                .with_rating(4),
            SessionRecord::new(ToolId::FindWords, "say no", "draft", 1_704_786_400_000)
                .with_emotion("stuck"),
        ]
    }

    #[test]
    fn test_save_then_load_json() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("sub").join("history.json");
        let records = sample();

        save_records(&path, &records).unwrap();
        let loaded = load_records(&path).unwrap();
        assert_eq!(loaded, records);
    }

    #[test]
    fn test_load_jsonl_skips_blank_lines() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("history.jsonl");
        let lines: Vec<String> = sample()
            .iter()
            .map(|r| serde_json::to_string(r).unwrap())
            .collect();
        std::fs::write(&path, format!("{}\n\n{}\n", lines[0], lines[1])).unwrap();

        let loaded = load_records(&path).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[1].tool_id, ToolId::FindWords);
    }

    #[test]
    fn test_jsonl_error_reports_index() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("history.jsonl");
        let good = serde_json::to_string(&sample()[0]).unwrap();
        std::fs::write(&path, format!("{}\n{{\"id\":\"x\"}}\n", good)).unwrap();

        match load_records(&path) {
            Err(MoodError::InvalidRecord { index, .. }) => assert_eq!(index, 1),
            other => panic!("expected InvalidRecord, got {:?}", other),
        }
    }

    #[test]
    fn test_load_rejects_invalid_rating() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("history.json");
        std::fs::write(
            &path,
            r#"[{"id":"a","toolId":"mind-dump","timestamp":0,"helpfulRating":7}]"#,
        )
        .unwrap();
        assert!(matches!(
            load_records(&path),
            Err(MoodError::InvalidRecord { index: 0, .. })
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let result = load_records(&tmp.path().join("nope.json"));
        assert!(matches!(result, Err(MoodError::Io(_))));
    }

    #[test]
    fn test_load_annotations() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("annotations.json");
        std::fs::write(
            &path,
            r#"[{
                "conversationId": "c1",
                "whatINeeded": "clarity",
                "whatWasHelpful": "categories",
                "whatWasMissing": "",
                "emotionalAccuracy": 4,
                "wouldUseAgain": true,
                "createdAt": 1704700000000
            }]"#,
        )
        .unwrap();

        let annotations = load_annotations(&path).unwrap();
        assert_eq!(annotations.len(), 1);
        assert_eq!(annotations[0].what_i_needed, "clarity");
    }
}
