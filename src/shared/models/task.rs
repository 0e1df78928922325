use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    create_task_request::CreateTaskRequest, task_status::TaskStatus,
    update_task_request::UpdateTaskRequest,
};

pub const DEFAULT_PRIORITY_SCORE: f64 = 50.0;
pub const DEFAULT_ESTIMATED_MINUTES: u32 = 30;

/// A unit of work owned by exactly one user.
///
/// Persisted as a postcard record: field order is the storage layout, and no
/// field may be skipped during serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority_score: f64,
    pub estimated_minutes: u32,
    /// Confidence of the last effort estimate written to `estimated_minutes`.
    pub estimate_confidence: Option<f64>,
    pub due_at: Option<DateTime<Utc>>,
    pub predicted_due_at: Option<DateTime<Utc>>,
    pub parent_task_id: Option<Uuid>,
    pub tags: Vec<String>,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    pub fn new(request: CreateTaskRequest, owner_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: request.title,
            description: request.description,
            status: TaskStatus::Todo,
            priority_score: DEFAULT_PRIORITY_SCORE,
            estimated_minutes: DEFAULT_ESTIMATED_MINUTES,
            estimate_confidence: None,
            due_at: request.due_at,
            predicted_due_at: None,
            parent_task_id: request.parent_task_id,
            tags: request.tags,
            owner_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge-patch: only fields present in the request change.
    pub fn edit(&mut self, request: UpdateTaskRequest) {
        request.title.assign_to(&mut self.title);
        request.description.merge_into(&mut self.description);
        request.status.assign_to(&mut self.status);
        request.due_at.merge_into(&mut self.due_at);
        request.tags.assign_to(&mut self.tags);
        request.priority_score.assign_to(&mut self.priority_score);
        request.parent_task_id.merge_into(&mut self.parent_task_id);
        self.touch();
    }

    pub fn record_estimate(&mut self, minutes: u32, confidence: f64) {
        self.estimated_minutes = minutes;
        self.estimate_confidence = Some(confidence);
        self.touch();
    }

    /// Refresh `updated_at`. Strictly increasing even when the clock hasn't moved.
    pub fn touch(&mut self) {
        let now = Utc::now();
        self.updated_at = if now > self.updated_at {
            now
        } else {
            self.updated_at + Duration::microseconds(1)
        };
    }

    pub fn is_done(&self) -> bool {
        self.status == TaskStatus::Done
    }
}
