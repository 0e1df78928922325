use axum::{
    extract::{Path, State},
    Extension, Json,
};
use tracing::info;

use crate::{
    api_error::ApiError,
    app_state::SharedState,
    heuristic_engine,
    realtime_event::RealtimeEvent,
    task_breakdown_response::TaskBreakdownResponse,
    task_controller::parse_task_id,
    task_estimation_response::TaskEstimationResponse,
    user::User,
};

pub struct AiController {}

impl AiController {
    /// Suggested checklist only; nothing is stored.
    pub async fn breakdown(
        State(state): State<SharedState>,
        Extension(user): Extension<User>,
        Path(id): Path<String>,
    ) -> Result<Json<TaskBreakdownResponse>, ApiError> {
        let task = state.data_context.get_task(parse_task_id(&id)?, user.id)?;
        Ok(Json(TaskBreakdownResponse {
            task_id: task.id,
            generated_subtasks: heuristic_engine::generate_subtasks(&task),
        }))
    }

    pub async fn estimate(
        State(state): State<SharedState>,
        Extension(user): Extension<User>,
        Path(id): Path<String>,
    ) -> Result<Json<TaskEstimationResponse>, ApiError> {
        let id = parse_task_id(&id)?;
        let task = state.data_context.get_task(id, user.id)?;
        let estimate = heuristic_engine::estimate_effort(&task);

        let task = state
            .data_context
            .record_estimate(id, user.id, estimate.minutes, estimate.confidence)?;
        info!(
            task_id = %task.id,
            minutes = estimate.minutes,
            confidence = estimate.confidence,
            "task re-estimated"
        );
        state.broadcaster.broadcast(&RealtimeEvent::TaskUpdated(task));

        Ok(Json(TaskEstimationResponse {
            task_id: id,
            estimated_minutes: estimate.minutes,
            confidence: estimate.confidence,
        }))
    }
}
