use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

pub const TITLE_MAX_CHARS: usize = 256;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateTaskRequest {
    pub title: String,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "crate::timestamp::deserialize_option")]
    pub due_at: Option<DateTime<Utc>>,
    pub parent_task_id: Option<Uuid>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl CreateTaskRequest {
    pub fn validate(&self) -> Result<(), String> {
        validate_title(&self.title)
    }
}

pub fn validate_title(title: &str) -> Result<(), String> {
    let len = title.chars().count();
    if len == 0 {
        return Err("title must not be empty".to_string());
    }
    if len > TITLE_MAX_CHARS {
        return Err(format!("title must be at most {TITLE_MAX_CHARS} characters"));
    }
    Ok(())
}
