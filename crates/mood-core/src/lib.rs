pub mod config;
pub mod error;
pub mod history;
pub mod seed;
pub mod types;

pub use config::AppConfig;
pub use error::MoodError;
pub use types::{SessionRecord, ToolId, TrainingAnnotation};
