use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskEstimationResponse {
    pub task_id: Uuid,
    pub estimated_minutes: u32,
    pub confidence: f64,
}
