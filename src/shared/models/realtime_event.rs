use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::task::Task;

/// Task lifecycle event pushed to websocket subscribers as
/// `{"type": "...", "payload": {...}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum RealtimeEvent {
    #[serde(rename = "task.created")]
    TaskCreated(Task),
    #[serde(rename = "task.updated")]
    TaskUpdated(Task),
    #[serde(rename = "task.deleted")]
    TaskDeleted { task_id: Uuid },
}

impl RealtimeEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            RealtimeEvent::TaskCreated(_) => "task.created",
            RealtimeEvent::TaskUpdated(_) => "task.updated",
            RealtimeEvent::TaskDeleted { .. } => "task.deleted",
        }
    }
}
