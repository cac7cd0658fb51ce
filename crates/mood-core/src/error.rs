use thiserror::Error;

#[derive(Error, Debug)]
pub enum MoodError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid session record at index {index}: {reason}")]
    InvalidRecord { index: usize, reason: String },

    #[error("Invalid training annotation at index {index}: {reason}")]
    InvalidAnnotation { index: usize, reason: String },

    #[error("Unknown persona: {0}")]
    UnknownPersona(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MoodError>;
