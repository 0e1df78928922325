use axum::{extract::State, Extension, Json};
use tracing::debug;

use crate::{
    api_error::ApiError,
    api_json::ApiJson,
    app_state::SharedState,
    schedule_packer,
    schedule_request::ScheduleRequest,
    schedule_response::ScheduleResponse,
    user::User,
};

pub struct ScheduleController {}

impl ScheduleController {
    pub async fn optimize(
        State(state): State<SharedState>,
        Extension(user): Extension<User>,
        ApiJson(body): ApiJson<ScheduleRequest>,
    ) -> Result<Json<ScheduleResponse>, ApiError> {
        let blocks = schedule_packer::optimize_schedule(
            &state.data_context,
            &body.tasks,
            body.start_at,
            user.id,
        )?;
        debug!(user_id = %user.id, blocks = blocks.len(), "schedule packed");
        Ok(Json(ScheduleResponse { blocks }))
    }
}
