use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleBlock {
    pub task_id: Uuid,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub confidence: f64,
    pub explanation: BlockExplanation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockExplanation {
    pub strategy: String,
    pub priority_score: f64,
    pub estimated_minutes: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleResponse {
    pub blocks: Vec<ScheduleBlock>,
}
