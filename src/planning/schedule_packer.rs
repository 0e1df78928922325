use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::{
    data_access::data_context::DataContext,
    data_error::DataError,
    schedule_response::{BlockExplanation, ScheduleBlock},
    task::Task,
};

pub const STRATEGY: &str = "priority_and_energy_fit";
pub const BLOCK_CONFIDENCE: f64 = 0.78;
pub const MIN_BLOCK_MINUTES: u32 = 25;
pub const GAP_MINUTES: i64 = 5;

/// Lay the caller's tasks end to end starting at `start_at`.
///
/// Every id must resolve under `owner_id`; one miss fails the whole request.
pub fn optimize_schedule(
    data_context: &DataContext,
    task_ids: &[Uuid],
    start_at: DateTime<Utc>,
    owner_id: Uuid,
) -> Result<Vec<ScheduleBlock>, DataError> {
    let tasks = task_ids
        .iter()
        .map(|id| data_context.get_task(*id, owner_id))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(pack_blocks(&tasks, start_at))
}

/// Order is the caller's. Each block lasts at least 25 minutes and is
/// followed by a 5 minute gap.
pub fn pack_blocks(tasks: &[Task], start_at: DateTime<Utc>) -> Vec<ScheduleBlock> {
    let mut cursor = start_at;
    let mut blocks = Vec::with_capacity(tasks.len());
    for task in tasks {
        let duration = task.estimated_minutes.max(MIN_BLOCK_MINUTES);
        let ends_at = cursor + Duration::minutes(i64::from(duration));
        blocks.push(ScheduleBlock {
            task_id: task.id,
            starts_at: cursor,
            ends_at,
            confidence: BLOCK_CONFIDENCE,
            explanation: BlockExplanation {
                strategy: STRATEGY.to_string(),
                priority_score: task.priority_score,
                estimated_minutes: task.estimated_minutes,
            },
        });
        cursor = ends_at + Duration::minutes(GAP_MINUTES);
    }
    blocks
}
