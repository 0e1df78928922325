use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    api_error::ApiError,
    api_json::ApiJson,
    app_state::SharedState,
    create_task_request::CreateTaskRequest,
    heuristic_engine,
    realtime_event::RealtimeEvent,
    task::Task,
    update_task_request::UpdateTaskRequest,
    user::User,
};

/// Path ids that are not UUIDs can't name a task, so they are reported the
/// same way as a missing one.
pub fn parse_task_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::NotFound("Task not found".to_string()))
}

pub struct TaskController {}

impl TaskController {
    pub async fn get_all(
        State(state): State<SharedState>,
        Extension(user): Extension<User>,
    ) -> Result<Json<Vec<Task>>, ApiError> {
        let tasks = state.data_context.list_tasks(user.id)?;
        debug!(user_id = %user.id, count = tasks.len(), "listed tasks");
        Ok(Json(tasks))
    }

    pub async fn add(
        State(state): State<SharedState>,
        Extension(user): Extension<User>,
        ApiJson(body): ApiJson<CreateTaskRequest>,
    ) -> Result<(StatusCode, Json<Task>), ApiError> {
        body.validate().map_err(ApiError::Validation)?;

        let now = Utc::now();
        let task = state
            .data_context
            .create_task(body, user.id, |task| heuristic_engine::enrich(task, now))?;

        info!(task_id = %task.id, user_id = %user.id, "task created");
        state.broadcaster.broadcast(&RealtimeEvent::TaskCreated(task.clone()));
        Ok((StatusCode::CREATED, Json(task)))
    }

    pub async fn get(
        State(state): State<SharedState>,
        Extension(user): Extension<User>,
        Path(id): Path<String>,
    ) -> Result<Json<Task>, ApiError> {
        let id = parse_task_id(&id)?;
        Ok(Json(state.data_context.get_task(id, user.id)?))
    }

    pub async fn edit(
        State(state): State<SharedState>,
        Extension(user): Extension<User>,
        Path(id): Path<String>,
        ApiJson(body): ApiJson<UpdateTaskRequest>,
    ) -> Result<Json<Task>, ApiError> {
        let id = parse_task_id(&id)?;
        body.validate().map_err(ApiError::Validation)?;

        let task = state.data_context.update_task(id, user.id, body)?;
        info!(task_id = %task.id, status = ?task.status, "task updated");
        state.broadcaster.broadcast(&RealtimeEvent::TaskUpdated(task.clone()));
        Ok(Json(task))
    }

    pub async fn delete(
        State(state): State<SharedState>,
        Extension(user): Extension<User>,
        Path(id): Path<String>,
    ) -> Result<StatusCode, ApiError> {
        let root_id = parse_task_id(&id)?;
        let removed = state.data_context.delete_task(root_id, user.id)?;

        info!(task_id = %root_id, removed = removed.len(), "task deleted");
        for task_id in removed {
            state.broadcaster.broadcast(&RealtimeEvent::TaskDeleted { task_id });
        }
        Ok(StatusCode::NO_CONTENT)
    }
}
