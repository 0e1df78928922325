use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::{create_task_request::validate_title, patch::Patch, task_status::TaskStatus};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpdateTaskRequest {
    pub title: Patch<String>,
    pub description: Patch<String>,
    pub status: Patch<TaskStatus>,
    #[serde(deserialize_with = "crate::timestamp::deserialize_patch")]
    pub due_at: Patch<DateTime<Utc>>,
    pub tags: Patch<Vec<String>>,
    pub priority_score: Patch<f64>,
    pub parent_task_id: Patch<Uuid>,
}

impl UpdateTaskRequest {
    pub fn validate(&self) -> Result<(), String> {
        match &self.title {
            Patch::Set(title) => validate_title(title)?,
            Patch::Clear => return Err("title cannot be null".to_string()),
            Patch::Absent => {}
        }
        if self.status.is_clear() {
            return Err("status cannot be null".to_string());
        }
        if self.tags.is_clear() {
            return Err("tags cannot be null".to_string());
        }
        match self.priority_score {
            Patch::Set(score) if !score.is_finite() || !(0.0..=100.0).contains(&score) => {
                return Err("priority_score must be between 0 and 100".to_string());
            }
            Patch::Clear => return Err("priority_score cannot be null".to_string()),
            _ => {}
        }
        Ok(())
    }
}
