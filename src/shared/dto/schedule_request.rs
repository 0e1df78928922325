use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct ScheduleRequest {
    pub tasks: Vec<Uuid>,
    #[serde(deserialize_with = "crate::timestamp::deserialize")]
    pub start_at: DateTime<Utc>,
}
