use axum::{extract::State, Extension, Json};

use crate::{
    api_error::ApiError, app_state::SharedState,
    behavior_insights_response::BehaviorInsightsResponse, insight_aggregator, user::User,
};

pub struct InsightController {}

impl InsightController {
    pub async fn behavior(
        State(state): State<SharedState>,
        Extension(user): Extension<User>,
    ) -> Result<Json<BehaviorInsightsResponse>, ApiError> {
        Ok(Json(insight_aggregator::generate_insights(&state.data_context, user.id)?))
    }
}
