use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskBreakdownResponse {
    pub task_id: Uuid,
    pub generated_subtasks: Vec<String>,
}
