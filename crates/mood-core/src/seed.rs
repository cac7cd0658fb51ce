//! Synthetic users with realistic histories for exercising the pattern analyzer
//! before real data exists.

use crate::error::{MoodError, Result};
use crate::types::{SessionRecord, ToolId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommunicationStyle {
    Concise,
    Warm,
    Detailed,
    Direct,
}

/// A synthetic user and their session history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Persona {
    pub key: String,
    pub name: String,
    pub communication_style: CommunicationStyle,
    pub stress_triggers: Vec<String>,
    pub helpful_approaches: Vec<String>,
    pub records: Vec<SessionRecord>,
}

/// Keys accepted by [`persona`].
pub const PERSONA_KEYS: [&str; 3] = ["anna", "dan", "ruby"];

/// All seed personas.
pub fn personas() -> Vec<Persona> {
    vec![anna(), dan(), ruby()]
}

/// Look up one persona by key.
pub fn persona(key: &str) -> Result<Persona> {
    match key {
        "anna" => Ok(anna()),
        "dan" => Ok(dan()),
        "ruby" => Ok(ruby()),
        other => Err(MoodError::UnknownPersona(other.to_string())),
    }
}

struct Entry {
    tool: ToolId,
    input: &'static str,
    theme: &'static str,
    emotion: &'static str,
    rating: u8,
    /// (year, month, day, hour, minute) in UTC.
    at: (i32, u32, u32, u32, u32),
}

fn build(key: &str, entries: Vec<Entry>) -> Vec<SessionRecord> {
    entries
        .into_iter()
        .enumerate()
        .map(|(i, e)| {
            let (y, mo, d, h, mi) = e.at;
            let mut record = SessionRecord::new(e.tool, e.input, "", utc_millis(y, mo, d, h, mi))
                .with_theme(e.theme)
                .with_emotion(e.emotion)
                .with_rating(e.rating);
            record.id = format!("{}-{}", key, i + 1);
            record
        })
        .collect()
}

fn utc_millis(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> i64 {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(hour, minute, 0))
        .map(|dt| dt.and_utc().timestamp_millis())
        .unwrap_or_default()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn anna() -> Persona {
    let entries = vec![
        Entry {
            tool: ToolId::MindDump,
            input: "I have this presentation on Friday and I keep rewriting the slides and nothing feels good enough and I'm running out of time...",
            theme: "work",
            emotion: "overwhelmed",
            rating: 4,
            at: (2024, 1, 8, 9, 30),
        },
        Entry {
            tool: ToolId::DecisionHelper,
            input: "Should I ask for help with this project or just power through? I don't want to look incompetent but I'm drowning...",
            theme: "work",
            emotion: "anxious",
            rating: 5,
            at: (2024, 1, 8, 14, 20),
        },
        Entry {
            tool: ToolId::MindDump,
            input: "Another deadline. Another panic. Why do I do this to myself every single time?",
            theme: "work",
            emotion: "overwhelmed",
            rating: 3,
            at: (2024, 1, 15, 8, 15),
        },
        Entry {
            tool: ToolId::WriteHard,
            input: "I need to tell my manager I need more time on this report but I already asked for an extension last month...",
            theme: "work",
            emotion: "anxious",
            rating: 5,
            at: (2024, 1, 22, 16, 45),
        },
        Entry {
            tool: ToolId::FindWords,
            input: "My friend keeps asking me to help with her project but I'm so behind on my own work. I don't know how to say no.",
            theme: "relationships",
            emotion: "stuck",
            rating: 4,
            at: (2024, 1, 29, 19, 0),
        },
        Entry {
            tool: ToolId::MindDump,
            input: "I've been having these headaches and now I'm convinced something is seriously wrong even though the doctor said I'm fine...",
            theme: "health",
            emotion: "anxious",
            rating: 4,
            at: (2024, 2, 5, 22, 30),
        },
    ];

    Persona {
        key: "anna".into(),
        name: "Anxious Anna".into(),
        communication_style: CommunicationStyle::Detailed,
        stress_triggers: strings(&["deadlines", "perfectionism", "letting people down"]),
        helpful_approaches: strings(&["breaking tasks down", "permission to be imperfect"]),
        records: build("anna", entries),
    }
}

fn dan() -> Persona {
    let entries = vec![
        Entry {
            tool: ToolId::DecisionHelper,
            input: "Job offer. 20% raise. But startup. Risk vs security?",
            theme: "work",
            emotion: "stuck",
            rating: 5,
            at: (2024, 1, 10, 19, 0),
        },
        Entry {
            tool: ToolId::DecisionHelper,
            input: "Move to Austin or stay in SF? Cheaper vs network?",
            theme: "life",
            emotion: "stuck",
            rating: 4,
            at: (2024, 1, 17, 12, 30),
        },
        Entry {
            tool: ToolId::QuickReset,
            input: "Been researching cars for weeks. Too many options. Just need to pick one.",
            theme: "life",
            emotion: "overwhelmed",
            rating: 5,
            at: (2024, 1, 24, 15, 0),
        },
        Entry {
            tool: ToolId::DecisionHelper,
            input: "Gym membership vs home equipment? Budget $500.",
            theme: "health",
            emotion: "stuck",
            rating: 4,
            at: (2024, 1, 31, 18, 0),
        },
        Entry {
            tool: ToolId::DecisionHelper,
            input: "Keep freelancing or take full-time role? Freedom vs stability.",
            theme: "work",
            emotion: "stuck",
            rating: 5,
            at: (2024, 2, 7, 10, 0),
        },
    ];

    Persona {
        key: "dan".into(),
        name: "Decisive Dan".into(),
        communication_style: CommunicationStyle::Concise,
        stress_triggers: strings(&["uncertainty", "too many options", "analysis paralysis"]),
        helpful_approaches: strings(&["pros/cons lists", "clear next steps", "binary choices"]),
        records: build("dan", entries),
    }
}

fn ruby() -> Persona {
    let entries = vec![
        Entry {
            tool: ToolId::WriteHard,
            input: "I need to tell my best friend I can't be her maid of honor because I'm overwhelmed with work and my own stuff...",
            theme: "relationships",
            emotion: "anxious",
            rating: 5,
            at: (2024, 1, 5, 21, 0),
        },
        Entry {
            tool: ToolId::FindWords,
            input: "My partner keeps asking me to move in but I'm not ready and I don't know how to say that without it sounding wrong",
            theme: "relationships",
            emotion: "stuck",
            rating: 4,
            at: (2024, 1, 12, 18, 30),
        },
        Entry {
            tool: ToolId::WriteHard,
            input: "My mom keeps making comments about my weight and I need to set a boundary but I don't want to hurt her feelings",
            theme: "relationships",
            emotion: "anxious",
            rating: 5,
            at: (2024, 1, 19, 20, 0),
        },
        Entry {
            tool: ToolId::MindDump,
            input: "I feel like I'm always the one reaching out to my friends and planning things and I'm tired...",
            theme: "relationships",
            emotion: "overwhelmed",
            rating: 4,
            at: (2024, 1, 26, 22, 0),
        },
        Entry {
            tool: ToolId::FindWords,
            input: "My coworker keeps taking credit for my ideas in meetings and I need to address it without seeming petty",
            theme: "work",
            emotion: "stuck",
            rating: 5,
            at: (2024, 2, 2, 14, 0),
        },
    ];

    Persona {
        key: "ruby".into(),
        name: "Relationship Ruby".into(),
        communication_style: CommunicationStyle::Warm,
        stress_triggers: strings(&["conflict", "disappointing others", "saying no"]),
        helpful_approaches: strings(&[
            "reframing",
            "permission to prioritize self",
            "scripts for tough conversations",
        ]),
        records: build("ruby", entries),
    }
}
